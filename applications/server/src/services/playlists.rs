//! Playlist access control, membership mutation and the activity log
//!
//! Handlers are expected to call `verify_access` (or `verify_owner`) before
//! touching a playlist. `add_song_logged` / `remove_song_logged` apply the
//! membership change and its activity entry in one transaction, so either
//! both are stored or neither is.

use super::CollaborationService;
use std::sync::Arc;
use tuneshelf_core::{
    error::Result,
    types::{
        ActivityAction, ActivityId, PlaylistActivities, PlaylistId, PlaylistSongId,
        PlaylistSummary, PlaylistWithSongs, SongId, UserId,
    },
    CoreError,
};
use tuneshelf_storage::{activities, playlist_songs, playlists, Database};

const PLAYLIST_NOT_FOUND: &str = "Playlist not found";
const NOT_AUTHORIZED: &str = "You are not authorized to access this resource";

pub struct PlaylistService {
    db: Database,
    collaborations: Arc<CollaborationService>,
}

impl PlaylistService {
    pub fn new(db: Database, collaborations: Arc<CollaborationService>) -> Self {
        Self { db, collaborations }
    }

    pub async fn create(&self, name: &str, owner: &UserId) -> Result<PlaylistId> {
        let id = playlists::create(self.db.pool(), name, owner).await?;
        tracing::info!("Created playlist {} for {}", id.as_str(), owner.as_str());
        Ok(id)
    }

    /// Playlists owned by or shared with `user_id`
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        playlists::get_for_user(self.db.pool(), user_id).await
    }

    pub async fn get_with_songs(&self, playlist_id: &PlaylistId) -> Result<PlaylistWithSongs> {
        playlists::get_with_songs(self.db.pool(), playlist_id)
            .await?
            .ok_or_else(|| CoreError::not_found(PLAYLIST_NOT_FOUND))
    }

    /// Delete a playlist; only its owner may
    pub async fn delete(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        self.verify_owner(playlist_id, user_id).await?;
        playlists::delete(self.db.pool(), playlist_id).await?;
        tracing::info!("Deleted playlist {}", playlist_id.as_str());
        Ok(())
    }

    pub async fn verify_owner(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        let playlist = playlists::get_by_id(self.db.pool(), playlist_id)
            .await?
            .ok_or_else(|| CoreError::not_found(PLAYLIST_NOT_FOUND))?;

        if &playlist.owner != user_id {
            return Err(CoreError::forbidden(NOT_AUTHORIZED));
        }

        Ok(())
    }

    /// Owner or collaborator
    ///
    /// A missing playlist is reported as such. When the caller is not the
    /// owner, any failure of the collaborator lookup surfaces as the owner
    /// check's `Forbidden`. Storage failures of the owner check propagate.
    pub async fn verify_access(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        match self.verify_owner(playlist_id, user_id).await {
            Ok(()) => Ok(()),
            Err(forbidden @ CoreError::Forbidden(_)) => {
                match self
                    .collaborations
                    .verify_collaborator(playlist_id, user_id)
                    .await
                {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        tracing::debug!(
                            "Collaborator check for {} on {} failed: {}",
                            user_id.as_str(),
                            playlist_id.as_str(),
                            err
                        );
                        Err(forbidden)
                    }
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn add_song(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<PlaylistSongId> {
        let id = playlist_songs::add(self.db.pool(), playlist_id, song_id).await?;
        tracing::debug!(
            "Added song {} to playlist {}",
            song_id.as_str(),
            playlist_id.as_str()
        );
        Ok(id)
    }

    pub async fn remove_song(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
        playlist_songs::remove(self.db.pool(), playlist_id, song_id).await?;
        tracing::debug!(
            "Removed song {} from playlist {}",
            song_id.as_str(),
            playlist_id.as_str()
        );
        Ok(())
    }

    /// Append one entry to the playlist's activity log
    pub async fn record_activity(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<ActivityId> {
        activities::add(self.db.pool(), playlist_id, song_id, user_id, action)
            .await
            .map_err(|err| activity_failure(err, action, playlist_id))
    }

    /// Add a song and log the `Add` activity atomically
    pub async fn add_song_logged(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<PlaylistSongId> {
        let mut tx = self.db.pool().begin().await?;

        let id = playlist_songs::add(&mut *tx, playlist_id, song_id).await?;
        activities::add(&mut *tx, playlist_id, song_id, user_id, ActivityAction::Add)
            .await
            .map_err(|err| activity_failure(err, ActivityAction::Add, playlist_id))?;

        tx.commit().await?;
        tracing::debug!(
            "Added song {} to playlist {}",
            song_id.as_str(),
            playlist_id.as_str()
        );
        Ok(id)
    }

    /// Remove a song and log the `Delete` activity atomically
    pub async fn remove_song_logged(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        playlist_songs::remove(&mut *tx, playlist_id, song_id).await?;
        activities::add(&mut *tx, playlist_id, song_id, user_id, ActivityAction::Delete)
            .await
            .map_err(|err| activity_failure(err, ActivityAction::Delete, playlist_id))?;

        tx.commit().await?;
        tracing::debug!(
            "Removed song {} from playlist {}",
            song_id.as_str(),
            playlist_id.as_str()
        );
        Ok(())
    }

    /// Full activity log in insertion order
    ///
    /// A playlist with no history yields an empty list; only a missing
    /// playlist is `NotFound`.
    pub async fn list_activities(&self, playlist_id: &PlaylistId) -> Result<PlaylistActivities> {
        if playlists::get_by_id(self.db.pool(), playlist_id)
            .await?
            .is_none()
        {
            return Err(CoreError::not_found(PLAYLIST_NOT_FOUND));
        }

        let activities = activities::get_by_playlist(self.db.pool(), playlist_id).await?;

        Ok(PlaylistActivities {
            playlist_id: playlist_id.clone(),
            activities,
        })
    }
}

fn activity_failure(err: CoreError, action: ActivityAction, playlist_id: &PlaylistId) -> CoreError {
    match err {
        CoreError::Invariant(_) => err,
        other => {
            tracing::error!(
                "Failed to record {} on playlist {}: {}",
                action,
                playlist_id.as_str(),
                other
            );
            CoreError::invariant("Song failed to add to playlist activity")
        }
    }
}

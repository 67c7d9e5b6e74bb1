/// Collaboration grants on playlists
use tuneshelf_core::{
    error::Result,
    types::{CollaborationId, PlaylistId, UserId},
    CoreError,
};
use tuneshelf_storage::{collaborations, Database};

pub struct CollaborationService {
    db: Database,
}

impl CollaborationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Grant `user_id` collaborator rights on `playlist_id`
    ///
    /// Callers check ownership and that both sides exist.
    pub async fn add(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<CollaborationId> {
        let id = collaborations::add(self.db.pool(), playlist_id, user_id).await?;
        tracing::info!(
            "Added collaborator {} to playlist {}",
            user_id.as_str(),
            playlist_id.as_str()
        );
        Ok(id)
    }

    pub async fn delete(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        collaborations::delete(self.db.pool(), playlist_id, user_id).await?;
        tracing::info!(
            "Removed collaborator {} from playlist {}",
            user_id.as_str(),
            playlist_id.as_str()
        );
        Ok(())
    }

    /// Succeeds only when a (playlist, user) grant exists
    pub async fn verify_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        if collaborations::exists(self.db.pool(), playlist_id, user_id).await? {
            Ok(())
        } else {
            Err(CoreError::invariant("Collaboration verification failed"))
        }
    }
}

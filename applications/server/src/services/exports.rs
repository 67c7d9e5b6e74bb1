/// Playlist export dispatch
use super::PlaylistService;
use std::sync::Arc;
use tuneshelf_core::{
    error::Result,
    types::{ExportPlaylistMessage, PlaylistId, UserId},
    QueueGateway,
};

pub struct ExportService {
    playlists: Arc<PlaylistService>,
    queue: Arc<dyn QueueGateway>,
    topic: String,
}

impl ExportService {
    pub fn new(playlists: Arc<PlaylistService>, queue: Arc<dyn QueueGateway>, topic: String) -> Self {
        Self {
            playlists,
            queue,
            topic,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Queue an export of `playlist_id` to `target_email`
    ///
    /// Owner only; collaborators get `Forbidden`. Returns once the message
    /// is handed to the queue.
    pub async fn request_export(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
        target_email: &str,
    ) -> Result<()> {
        self.playlists.verify_owner(playlist_id, user_id).await?;

        let message = ExportPlaylistMessage {
            user_id: user_id.clone(),
            target_email: target_email.to_string(),
            playlist_id: playlist_id.clone(),
        };

        self.queue.publish(&self.topic, message.to_payload()?).await?;
        tracing::info!(
            "Queued export of playlist {} for {}",
            playlist_id.as_str(),
            user_id.as_str()
        );
        Ok(())
    }
}

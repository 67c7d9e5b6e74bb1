//! Export job message

use super::{PlaylistId, UserId};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Job request handed to the export worker through the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistMessage {
    pub user_id: UserId,
    pub target_email: String,
    pub playlist_id: PlaylistId,
}

impl ExportPlaylistMessage {
    /// Serialize to the JSON bytes published on the queue
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

//! Playlist activity log types

use super::PlaylistId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of playlist membership change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Song added to the playlist
    Add,
    /// Song removed from the playlist
    Delete,
}

impl ActivityAction {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ActivityAction::Add),
            "delete" => Ok(ActivityAction::Delete),
            other => Err(format!("unknown activity action: {}", other)),
        }
    }
}

/// One immutable activity log entry, joined for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSongActivity {
    /// Username of the acting user
    pub username: String,
    /// Title of the affected song
    pub title: String,
    pub action: ActivityAction,
    /// Storage-assigned timestamp (RFC 3339, UTC)
    pub time: String,
}

/// Full activity history of a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistActivities {
    pub playlist_id: PlaylistId,
    pub activities: Vec<PlaylistSongActivity>,
}

/// ID types for Tuneshelf entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares a string-backed identifier whose generated values carry `$prefix`.
macro_rules! prefixed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

prefixed_id!(
    /// User identifier
    UserId,
    "user"
);
prefixed_id!(
    /// Album identifier
    AlbumId,
    "album"
);
prefixed_id!(
    /// Song identifier
    SongId,
    "song"
);
prefixed_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);
prefixed_id!(
    /// Collaboration grant identifier
    CollaborationId,
    "collab"
);
prefixed_id!(
    /// Playlist membership edge identifier
    PlaylistSongId,
    "playlist-song"
);
prefixed_id!(
    /// Activity log entry identifier
    ActivityId,
    "activity"
);
prefixed_id!(
    /// Album like identifier
    AlbumLikeId,
    "like"
);

/// Album like count as returned by the cache-aside read path
use serde::Serialize;

/// Like count plus where it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeCount {
    pub value: u64,
    /// True when served from the cache rather than the database
    pub from_cache: bool,
}

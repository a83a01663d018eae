use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::EmbedError;

/// Number of characters in a YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

lazy_static! {
    static ref BARE_ID_RE: Regex = Regex::new(r"^\s*([A-Za-z0-9]{11})\s*$").unwrap();
    // The leading `.*` is greedy, so the last URL marker in the input wins.
    static ref LINK_RE: Regex =
        Regex::new(r"^.*((youtu.be/)|(v/)|(/u/[0-9A-Za-z_]/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*").unwrap();
    // Characters YouTube uses in ids; anything else could escape the player URL path
    static ref CANONICAL_ID_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
}

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Parse a canonical id, a bare ID or any supported link shape.
    ///
    /// Every id `extract_video_id` produces parses back to itself.
    pub fn parse(id_or_link: &str) -> Result<Self, EmbedError> {
        if CANONICAL_ID_RE.is_match(id_or_link) {
            return Ok(VideoId(id_or_link.to_string()));
        }
        extract_video_id(id_or_link)
            .ok_or_else(|| EmbedError::InvalidVideoId(id_or_link.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = EmbedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VideoId::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Accepts a link or a bare id and returns the 11-character video id.
///
/// Bare ids must be alphanumeric; ids captured from a link may also contain
/// `-` and `_`. Anything else, including truncated links, yields `None`.
pub fn extract_video_id(id_or_link: &str) -> Option<VideoId> {
    if let Some(cap) = BARE_ID_RE.captures(id_or_link) {
        return cap.get(1).map(|m| VideoId(m.as_str().to_string()));
    }

    let token = LINK_RE.captures(id_or_link)?.get(7)?.as_str();
    if token.chars().count() == VIDEO_ID_LEN && CANONICAL_ID_RE.is_match(token) {
        Some(VideoId(token.to_string()))
    } else {
        None
    }
}

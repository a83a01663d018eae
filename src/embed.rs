use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::settings::SETTINGS;
use crate::{EmbedError, VideoId};

/// Element id of the mount point the embedding library replaces.
pub const MOUNT_ID: &str = "ytapiplayer";
/// Id given to the embedded player element, reported back on readiness.
pub const PLAYER_ID: &str = "ytplayer";

/// Pixel size of the player element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Options accepted by `load_video`.
///
/// Deserializes from the user-options map shape, e.g.
/// `{"startTime": 42, "loop": 1}`; both keys are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackOptions {
    /// Position in whole seconds at which playback starts.
    pub start_time: u32,
    /// Keep replaying the video once it ends.
    #[serde(rename = "loop", deserialize_with = "deserialize_flag")]
    pub looping: bool,
}

impl PlaybackOptions {
    pub fn starting_at(start_time: u32) -> Self {
        Self {
            start_time,
            ..Self::default()
        }
    }

    pub fn looped(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Parse a JSON user-options map.
    pub fn from_json(json: &str) -> Result<Self, EmbedError> {
        Ok(serde_json::from_str(json)?)
    }
}

// "loop" is 0/1 in the player API, but plain booleans are accepted too
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n == 1,
    })
}

/// Everything the embedding library needs to inject a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedRequest {
    pub url: String,
    pub mount_id: String,
    pub dimensions: Dimensions,
    pub version: String,
    pub params: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

impl EmbedRequest {
    pub fn new(
        video_id: &VideoId,
        options: &PlaybackOptions,
        dimensions: Dimensions,
    ) -> Result<Self, EmbedError> {
        let url = build_embed_url(video_id, options)?;

        let mut params = BTreeMap::new();
        params.insert("allowScriptAccess".to_string(), "always".to_string());

        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), PLAYER_ID.to_string());

        Ok(Self {
            url,
            mount_id: MOUNT_ID.to_string(),
            dimensions,
            version: SETTINGS.flash_version.clone(),
            params,
            attributes,
        })
    }
}

/// Builds the player URL for a video.
///
/// Branding, info and related videos are suppressed and playback starts
/// automatically. Looping a single video needs a one-item playlist of itself.
pub fn build_embed_url(
    video_id: &VideoId,
    options: &PlaybackOptions,
) -> Result<String, EmbedError> {
    let start = options.start_time.to_string();
    let mut query: Vec<(&str, &str)> = vec![
        ("enablejsapi", "1"),
        ("modestbranding", "1"),
        ("rel", "0"),
        ("showinfo", "0"),
        ("autohide", "1"),
        ("iv_load_policy", "3"),
        ("version", "3"),
        ("autoplay", "1"),
        ("playerapiid", PLAYER_ID),
        ("start", &start),
    ];
    if options.looping {
        query.push(("loop", "1"));
        query.push(("playlist", video_id.as_str()));
    }

    let query = serde_urlencoded::to_string(&query)?;
    Ok(format!(
        "{}{}?{}",
        SETTINGS.embed_base_url,
        video_id.as_str(),
        query
    ))
}

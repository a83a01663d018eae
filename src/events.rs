use crate::embed::Dimensions;
use crate::{PlaybackCommand, VideoId};

// Event types broadcast by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Loading { video_id: VideoId, url: String },
    Ready { player_id: String },
    Unloaded { player_id: String },
    Resized(Dimensions),
    CommandIssued(PlaybackCommand),
}

impl PlayerEvent {
    // Get the name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            PlayerEvent::Loading { .. } => "loading",
            PlayerEvent::Ready { .. } => "onYouTubePlayerReady",
            PlayerEvent::Unloaded { .. } => "unloaded",
            PlayerEvent::Resized(_) => "resized",
            PlayerEvent::CommandIssued(_) => "commandIssued",
        }
    }

    /// If this event started a load, returns the video being loaded
    pub fn video_id(&self) -> Option<&VideoId> {
        match self {
            PlayerEvent::Loading { video_id, .. } => Some(video_id),
            _ => None,
        }
    }
}

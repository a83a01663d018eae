use tokio::sync::oneshot;

use crate::embed::PlaybackOptions;
use crate::host::{Container, PlayerHandle};
use crate::VideoId;

/// State of the single player owned by a controller.
#[derive(Default)]
pub(crate) struct PlayerSession {
    pub(crate) container: Option<Box<dyn Container>>,
    pub(crate) video_id: Option<VideoId>,
    pub(crate) options: PlaybackOptions,
    pub(crate) player: Option<Box<dyn PlayerHandle>>,
    // Completed by the embedder once the player initialized
    pub(crate) pending_ready: Option<oneshot::Receiver<String>>,
}

impl PlayerSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make sure the mount point exists exactly once in the container.
    /// Returns `true` when it had to be created.
    pub(crate) fn ensure_mount(&mut self, mount_id: &str) -> bool {
        match self.container.as_mut() {
            Some(container) if !container.contains(mount_id) => {
                container.append(mount_id);
                true
            }
            _ => false,
        }
    }

    /// Drop the live player and any readiness still outstanding.
    /// Returns the removed player so the caller can tear it down.
    pub(crate) fn take_player(&mut self) -> Option<Box<dyn PlayerHandle>> {
        self.pending_ready = None;
        self.player.take()
    }
}

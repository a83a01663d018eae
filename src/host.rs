// Seams to the page hosting the player. The embedding library, the DOM and
// the player element itself all live on the other side of these traits.

use tokio::sync::oneshot;
use tracing::debug;

use crate::embed::{Dimensions, EmbedRequest};
use crate::{EmbedError, PlaybackCommand};

/// The library that injects and removes the player plugin.
pub trait Embedder: Send + Sync {
    /// Inject a player for `request`. Once the player has initialized the
    /// embedder calls [`ReadySignal::notify`] with the player element id.
    fn embed(&self, request: EmbedRequest, ready: ReadySignal) -> Result<(), EmbedError>;

    /// Remove a previously embedded player.
    fn remove(&self, player_id: &str);
}

/// Window-level queries.
pub trait Page: Send + Sync {
    fn viewport(&self) -> Dimensions;

    /// Look up an embedded player element by id.
    fn find_player(&self, player_id: &str) -> Option<Box<dyn PlayerHandle>>;
}

/// The element the player is mounted into.
pub trait Container: Send {
    fn contains(&self, element_id: &str) -> bool;

    fn append(&mut self, element_id: &str);
}

/// A live, initialized player element.
pub trait PlayerHandle: Send {
    fn id(&self) -> &str;

    fn execute(&self, command: &PlaybackCommand);

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    fn resize(&self, dimensions: Dimensions);
}

/// One-shot readiness notification handed to the embedder with each request.
#[derive(Debug)]
pub struct ReadySignal {
    sender: oneshot::Sender<String>,
}

impl ReadySignal {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<String>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Report that the player element `player_id` finished initializing.
    ///
    /// Returns `false` when the load it belonged to has since been replaced
    /// or unloaded; the notification is then dropped.
    pub fn notify(self, player_id: impl Into<String>) -> bool {
        let player_id = player_id.into();
        match self.sender.send(player_id) {
            Ok(()) => true,
            Err(stale) => {
                debug!(player_id = %stale, "Readiness for a discarded load ignored");
                false
            }
        }
    }
}

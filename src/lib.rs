mod bootstrap;
pub use bootstrap::{on_page_ready, ResizePolicy, SharedController};
mod commands;
pub use commands::PlaybackCommand;
mod debounce;
pub use debounce::Debouncer;
mod embed;
pub use embed::{build_embed_url, Dimensions, EmbedRequest, PlaybackOptions, MOUNT_ID, PLAYER_ID};
mod error;
pub use error::EmbedError;
mod events;
pub use events::PlayerEvent;
mod host;
pub use host::{Container, Embedder, Page, PlayerHandle, ReadySignal};
mod session;
use session::PlayerSession;
pub mod settings;
mod video_id;
pub use video_id::{extract_video_id, VideoId, VIDEO_ID_LEN};

use std::sync::Arc;
use tokio::sync::{broadcast, oneshot::error::TryRecvError};
use tracing::{debug, info, warn};

use settings::SETTINGS;

/// Controller for a single embedded YouTube player.
///
/// The controller owns the player session: the container the player is
/// mounted into, the current video and, once the embedder reports
/// readiness, the live player handle. Loading a new video always tears the
/// previous player down first, so at most one player is alive at a time.
///
/// Playback commands issued before the player is ready are dropped.
///
/// # Logging
///
/// This library uses the `tracing` crate for logging. To enable logs, you'll need to
/// initialize a tracing subscriber in your application.
///
/// Example using `tracing_subscriber`:
/// ```no_run
/// use tracing::Level;
/// use tracing_subscriber::FmtSubscriber;
///
/// // Create a subscriber with the desired log level
/// let subscriber = FmtSubscriber::builder()
///     .with_max_level(Level::DEBUG) // Set to DEBUG, INFO, WARN, or ERROR
///     .finish();
///
/// // Initialize the global subscriber
/// tracing::subscriber::set_global_default(subscriber)
///     .expect("Failed to set tracing subscriber");
/// ```
///
/// The log levels control what information is displayed:
/// - `TRACE`: Debounce timer scheduling
/// - `DEBUG`: Session lifecycle steps (mount creation, teardown, stale readiness)
/// - `INFO`: Video loads and player readiness
/// - `WARN`: Unresolvable video ids, rejected embeds, unknown player ids
pub struct VideoController {
    embedder: Arc<dyn Embedder>,
    page: Arc<dyn Page>,
    session: PlayerSession,
    event_sender: broadcast::Sender<PlayerEvent>,
}

impl VideoController {
    pub fn new(embedder: Arc<dyn Embedder>, page: Arc<dyn Page>) -> Self {
        let (event_tx, _) = broadcast::channel(SETTINGS.event_buffer_capacity);
        Self {
            embedder,
            page,
            session: PlayerSession::new(),
            event_sender: event_tx,
        }
    }

    /// Helper method to send events - discards send errors
    #[inline]
    fn send_event(&self, event: PlayerEvent) {
        let _ = self.event_sender.send(event);
    }

    /// Get a channel for receiving player events
    pub fn event_receiver(&self) -> broadcast::Receiver<PlayerEvent> {
        self.event_sender.subscribe()
    }

    /// Set the element the player is embedded into.
    pub fn set_container(&mut self, container: Box<dyn Container>) {
        self.session.container = Some(container);
    }

    pub fn current_video_id(&self) -> Option<&VideoId> {
        self.session.video_id.as_ref()
    }

    /// Options of the current load.
    pub fn options(&self) -> PlaybackOptions {
        self.session.options
    }

    /// Whether a live player handle is stored.
    pub fn is_ready(&mut self) -> bool {
        self.poll_ready();
        self.session.player.is_some()
    }

    /// Embed `id_or_link` and start playing it.
    ///
    /// An unresolvable id is logged and reported without touching the
    /// current session. Otherwise any existing player is removed before the
    /// new one is requested. The returned id is current from then on; the
    /// player handle only arrives with the readiness signal.
    pub fn load_video(
        &mut self,
        id_or_link: &str,
        options: PlaybackOptions,
    ) -> Result<VideoId, EmbedError> {
        let video_id = match extract_video_id(id_or_link) {
            Some(id) => id,
            None => {
                warn!("Youtube ID not found from: {}", id_or_link);
                return Err(EmbedError::InvalidVideoId(id_or_link.to_string()));
            }
        };
        self.load_resolved(video_id, options)
    }

    // Embeds an id that was already resolved, so a reload never re-parses it
    fn load_resolved(
        &mut self,
        video_id: VideoId,
        options: PlaybackOptions,
    ) -> Result<VideoId, EmbedError> {
        if self.session.container.is_none() {
            warn!(%video_id, "Cannot load video without a container");
            return Err(EmbedError::NoContainer);
        }
        let request = EmbedRequest::new(&video_id, &options, self.page.viewport())?;

        // If a video is already playing, remove it before embedding the next one
        self.unload_video();

        // The embedder consumes the mount point, so it may need re-adding
        if self.session.ensure_mount(MOUNT_ID) {
            debug!("Created mount point #{}", MOUNT_ID);
        }

        let url = request.url.clone();
        let (ready, pending_ready) = ReadySignal::channel();
        if let Err(e) = self.embedder.embed(request, ready) {
            warn!(%video_id, "Embed request rejected: {}", e);
            self.session.video_id = None;
            return Err(e);
        }

        info!(%video_id, start_time = options.start_time, looping = options.looping, "Loading video");
        self.session.pending_ready = Some(pending_ready);
        self.session.video_id = Some(video_id.clone());
        self.session.options = options;
        self.send_event(PlayerEvent::Loading {
            video_id: video_id.clone(),
            url,
        });
        Ok(video_id)
    }

    /// Load the configured default video.
    pub fn load_default_video(&mut self) -> Result<VideoId, EmbedError> {
        let default_id = SETTINGS.default_video_id.clone();
        self.load_video(&default_id, PlaybackOptions::default())
    }

    /// Remove the current player, if there is one. Safe to call repeatedly.
    pub fn unload_video(&mut self) {
        if let Some(player) = self.session.take_player() {
            let player_id = player.id().to_string();
            debug!(%player_id, "Removing player");
            self.embedder.remove(&player_id);
            self.send_event(PlayerEvent::Unloaded { player_id });
        }
    }

    /// Reload the current video and resume at the same position.
    ///
    /// Does nothing when no video was loaded.
    pub fn reload_video(&mut self) -> Result<(), EmbedError> {
        self.poll_ready();
        let Some(video_id) = self.session.video_id.clone() else {
            return Ok(());
        };

        let resume_time = self
            .session
            .player
            .as_ref()
            .map(|player| seconds_from(player.current_time()))
            .unwrap_or(0);
        let options = PlaybackOptions {
            start_time: resume_time,
            ..self.session.options
        };

        debug!(%video_id, resume_time, "Reloading video");
        self.load_resolved(video_id, options).map(|_| ())
    }

    /// Fit the player to the viewport.
    pub fn resize_video(&mut self) {
        self.poll_ready();
        if let Some(player) = self.session.player.as_ref() {
            let dimensions = self.page.viewport();
            player.resize(dimensions);
            self.send_event(PlayerEvent::Resized(dimensions));
        }
    }

    pub fn play(&mut self) -> bool {
        self.send_command(PlaybackCommand::Play)
    }

    pub fn pause(&mut self) -> bool {
        self.send_command(PlaybackCommand::Pause)
    }

    pub fn stop(&mut self) -> bool {
        self.send_command(PlaybackCommand::Stop)
    }

    /// Forward a command to the live player. Returns `false` when there is
    /// no player to receive it.
    pub fn send_command(&mut self, command: PlaybackCommand) -> bool {
        self.poll_ready();
        match self.session.player.as_ref() {
            Some(player) => {
                player.execute(&command);
                self.send_event(PlayerEvent::CommandIssued(command));
                true
            }
            None => {
                debug!(command = command.method_name(), "No player ready, command dropped");
                false
            }
        }
    }

    /// Store the player element `player_id` as the live player.
    pub fn on_player_ready(&mut self, player_id: &str) {
        match self.page.find_player(player_id) {
            Some(player) => {
                info!(%player_id, "Player ready");
                self.session.pending_ready = None;
                self.session.player = Some(player);
                self.send_event(PlayerEvent::Ready {
                    player_id: player_id.to_string(),
                });
            }
            None => {
                warn!(%player_id, "Player reported ready but no such element exists");
            }
        }
    }

    /// Pick up a readiness signal that already fired. Never blocks.
    pub fn poll_ready(&mut self) {
        let Some(pending) = self.session.pending_ready.as_mut() else {
            return;
        };
        match pending.try_recv() {
            Ok(player_id) => {
                self.session.pending_ready = None;
                self.on_player_ready(&player_id);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                debug!("Embedder dropped the readiness signal");
                self.session.pending_ready = None;
            }
        }
    }

    /// Wait until the embedder reports the current load as ready.
    ///
    /// Cancelling the wait keeps the readiness signal armed, so a later
    /// notification is still picked up by the next command.
    ///
    /// Do not await this while holding the lock of a [`SharedController`];
    /// the debounced resize handler needs the same lock.
    pub async fn wait_until_ready(&mut self) -> Result<(), EmbedError> {
        let Some(pending) = self.session.pending_ready.as_mut() else {
            return if self.session.player.is_some() {
                Ok(())
            } else {
                Err(EmbedError::NothingLoading)
            };
        };
        let outcome = pending.await;
        // a completed receiver must not be polled again
        self.session.pending_ready = None;
        match outcome {
            Ok(player_id) => {
                self.on_player_ready(&player_id);
                Ok(())
            }
            Err(_) => Err(EmbedError::ReadinessDropped),
        }
    }
}

impl std::fmt::Debug for VideoController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoController")
            .field("video_id", &self.session.video_id)
            .field("options", &self.session.options)
            .field("has_player", &self.session.player.is_some())
            .finish()
    }
}

/// Whole seconds of a playback position; negative and NaN positions clamp to 0.
fn seconds_from(position: f64) -> u32 {
    if position.is_finite() && position > 0.0 {
        position.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

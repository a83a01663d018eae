use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, warn};

use crate::settings::SETTINGS;
use crate::{Container, Debouncer, VideoController};

/// Controller shared between the page and its event handlers.
pub type SharedController = Arc<Mutex<VideoController>>;

/// What a viewport resize does to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Restyle the live player to the new viewport size.
    #[default]
    Restyle,
    /// Rebuild the player at the new size, resuming at the same position.
    Reload,
}

impl ResizePolicy {
    fn apply(self, controller: &mut VideoController) {
        match self {
            ResizePolicy::Restyle => controller.resize_video(),
            ResizePolicy::Reload => {
                if let Err(e) = controller.reload_video() {
                    error!("Reload on resize failed: {}", e);
                }
            }
        }
    }
}

/// Page-ready entry point.
///
/// Mounts the player into `container`, starts the default video and returns
/// the debounced handler to bind to the window's resize event. A failed
/// default load is logged; the handler is returned either way.
pub fn on_page_ready(
    controller: &SharedController,
    container: Box<dyn Container>,
    policy: ResizePolicy,
) -> Debouncer<()> {
    {
        let mut guard = controller.lock().unwrap_or_else(PoisonError::into_inner);
        guard.set_container(container);
        if let Err(e) = guard.load_default_video() {
            warn!("Default video failed to load: {}", e);
        }
    }

    let shared = Arc::clone(controller);
    Debouncer::new(
        move |()| {
            let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
            policy.apply(&mut guard);
        },
        SETTINGS.resize_debounce,
    )
}

// Mock page collaborators shared by the integration tests
#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use youtube_embed_rs::{
    Container, Dimensions, EmbedError, EmbedRequest, Embedder, Page, PlaybackCommand,
    PlayerHandle, ReadySignal, VideoController, PLAYER_ID,
};

#[derive(Default)]
pub struct MockEmbedder {
    pub requests: Mutex<Vec<EmbedRequest>>,
    pub signals: Mutex<Vec<ReadySignal>>,
    pub removed: Mutex<Vec<String>>,
    pub reject: AtomicBool,
}

impl MockEmbedder {
    pub fn embed_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<EmbedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Fire the readiness signal of the most recent embed.
    pub fn fire_ready(&self) -> bool {
        match self.signals.lock().unwrap().pop() {
            Some(signal) => signal.notify(PLAYER_ID),
            None => false,
        }
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, request: EmbedRequest, ready: ReadySignal) -> Result<(), EmbedError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(EmbedError::EmbedRejected("plugin unavailable".to_string()));
        }
        self.requests.lock().unwrap().push(request);
        self.signals.lock().unwrap().push(ready);
        Ok(())
    }

    fn remove(&self, player_id: &str) {
        self.removed.lock().unwrap().push(player_id.to_string());
    }
}

/// What the mock player element has been asked to do.
#[derive(Default)]
pub struct PlayerLog {
    pub commands: Mutex<Vec<PlaybackCommand>>,
    pub resizes: Mutex<Vec<Dimensions>>,
    pub current_time: Mutex<f64>,
}

pub struct MockPlayer {
    id: String,
    log: Arc<PlayerLog>,
}

impl PlayerHandle for MockPlayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self, command: &PlaybackCommand) {
        self.log.commands.lock().unwrap().push(*command);
    }

    fn current_time(&self) -> f64 {
        *self.log.current_time.lock().unwrap()
    }

    fn resize(&self, dimensions: Dimensions) {
        self.log.resizes.lock().unwrap().push(dimensions);
    }
}

pub struct MockPage {
    pub viewport: Mutex<Dimensions>,
    pub player: Arc<PlayerLog>,
}

impl Default for MockPage {
    fn default() -> Self {
        Self {
            viewport: Mutex::new(Dimensions::new(1280, 720)),
            player: Arc::new(PlayerLog::default()),
        }
    }
}

impl Page for MockPage {
    fn viewport(&self) -> Dimensions {
        *self.viewport.lock().unwrap()
    }

    fn find_player(&self, player_id: &str) -> Option<Box<dyn PlayerHandle>> {
        if player_id != PLAYER_ID {
            return None;
        }
        Some(Box::new(MockPlayer {
            id: player_id.to_string(),
            log: Arc::clone(&self.player),
        }))
    }
}

#[derive(Clone, Default)]
pub struct MockContainer {
    pub children: Arc<Mutex<Vec<String>>>,
}

impl Container for MockContainer {
    fn contains(&self, element_id: &str) -> bool {
        self.children.lock().unwrap().iter().any(|c| c == element_id)
    }

    fn append(&mut self, element_id: &str) {
        self.children.lock().unwrap().push(element_id.to_string());
    }
}

pub struct Fixture {
    pub controller: VideoController,
    pub embedder: Arc<MockEmbedder>,
    pub page: Arc<MockPage>,
    pub container: MockContainer,
}

/// A controller wired to fresh mocks, with a container already set.
pub fn fixture() -> Fixture {
    let embedder = Arc::new(MockEmbedder::default());
    let page = Arc::new(MockPage::default());
    let container = MockContainer::default();
    let mut controller = VideoController::new(embedder.clone(), page.clone());
    controller.set_container(Box::new(container.clone()));
    Fixture {
        controller,
        embedder,
        page,
        container,
    }
}

// Playback commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Stop,
}

impl PlaybackCommand {
    // Name of the player API method the command maps to
    pub fn method_name(&self) -> &'static str {
        match self {
            PlaybackCommand::Play => "playVideo",
            PlaybackCommand::Pause => "pauseVideo",
            PlaybackCommand::Stop => "stopVideo",
        }
    }
}

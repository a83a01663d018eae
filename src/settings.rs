use once_cell::sync::Lazy;
use std::{env, time::Duration};

/// Holds all tunables, read-once from ENV with fallbacks.
pub struct Settings {
    pub default_video_id: String,
    pub resize_debounce: Duration,
    pub event_buffer_capacity: usize,
    pub embed_base_url: String,
    pub flash_version: String,
}

impl Settings {
    fn from_env() -> Self {
        // optionally load .env
        let _ = dotenvy::dotenv();

        fn parse_string(var: &str, default: &str) -> String {
            env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        // helper to parse usize
        fn parse_usize(var: &str, default: usize) -> usize {
            env::var(var)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        // helper to parse millis into Duration
        fn parse_millis(var: &str, default_ms: u64) -> Duration {
            env::var(var)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or_else(|| Duration::from_millis(default_ms))
        }

        Settings {
            default_video_id: parse_string("DEFAULT_VIDEO_ID", "itvJybdcYbI"),
            resize_debounce: parse_millis("RESIZE_DEBOUNCE_MS", 300),
            // broadcast::channel panics on zero capacity
            event_buffer_capacity: parse_usize("EVENT_BUFFER_CAPACITY", 100).max(1),
            embed_base_url: parse_string("EMBED_BASE_URL", "http://www.youtube.com/v/"),
            flash_version: parse_string("FLASH_VERSION", "8"),
        }
    }
}

/// Global settings instance
pub static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

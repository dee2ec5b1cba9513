// Global configuration for the spectra library
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

// Global configuration for the decay line dataset location
pub static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::new()));

/// Global configuration container.
///
/// Holds the path of the decay line dataset so callers can configure it once
/// and then construct databases without re-passing paths. A single global
/// instance is exposed via the `CONFIG` static; most code should obtain a
/// guard with [`Config::global`] rather than locking the mutex directly.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the JSON decay line dataset.
    pub decay_lines: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Config { decay_lines: None }
    }

    /// Set the decay line dataset path.
    pub fn set_decay_lines(&mut self, path: &str) {
        self.decay_lines = Some(path.to_string());
    }

    /// Get the configured dataset path, if any.
    pub fn get_decay_lines(&self) -> Option<String> {
        self.decay_lines.clone()
    }

    /// Clear the configured dataset path.
    pub fn clear(&mut self) {
        self.decay_lines = None;
    }

    /// Get the global configuration instance
    pub fn global() -> MutexGuard<'static, Self> {
        CONFIG.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

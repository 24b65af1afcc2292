use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::{dispatcher::DEFAULT_COOLDOWN, smoother::DEFAULT_HISTORY_LEN, types::ActionEvent};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("history_len must be at least 1")]
    EmptyHistory,
    #[error("frame size must be non-zero, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cooldown_ms: u64,
    pub history_len: usize,
    pub frame_width: u32,
    pub frame_height: u32,
    pub keys: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN.as_millis() as u64,
            history_len: DEFAULT_HISTORY_LEN,
            frame_width: 640,
            frame_height: 480,
            keys: KeyBindings::default(),
        }
    }
}

/// Key name sent for each action.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub down: String,
    pub jump: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "left".to_string(),
            right: "right".to_string(),
            down: "down".to_string(),
            jump: "up".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn key_for(&self, action: ActionEvent) -> &str {
        match action {
            ActionEvent::MoveLeft => &self.left,
            ActionEvent::MoveRight => &self.right,
            ActionEvent::Slide => &self.down,
            ActionEvent::Jump => &self.jump,
        }
    }
}

impl Config {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.history_len == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::EmptyFrame {
                width: self.frame_width,
                height: self.frame_height,
            });
        }
        Ok(())
    }
}

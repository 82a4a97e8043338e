//! Configuration system
//!
//! Every document the crate reads or writes (layouts, editor settings,
//! playlist settings) goes through the [`Config`] trait, which picks the
//! encoding from the file extension.
//!
//! ## Supported Formats
//!
//! - **JSON** (`.json`, also `.lpl`) via `serde_json`
//! - **TOML** (`.toml`) via `toml`
//! - **RON** (`.ron`) via `ron`

mod color;
mod editor;
mod layout;

pub use color::Rgb;
pub use editor::EditorSettings;
pub use layout::{
    FontConfig, FrameConfig, ImageSlotConfig, LayoutConfig, PlayersConfig, RatingConfig,
    TextSlotConfig,
};

pub use serde::{Deserialize, Serialize};

use std::path::Path;

/// Document encodings understood by [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document
    Json,
    /// TOML document
    Toml,
    /// RON document
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json" | "lpl") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a document into any deserializable type
    pub fn parse<T: for<'de> Deserialize<'de>>(self, contents: &str) -> Result<T, ConfigError> {
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render a value in this format
    pub fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Json => {
                serde_json::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            Self::Toml => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        format.parse(&contents)
    }

    /// Load configuration from file, falling back to defaults when the file is absent
    fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::warn!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = ConfigFormat::from_path(path)?.render(self)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A layout key was absent; the documented default is used instead
    #[error("Missing key '{0}'")]
    MissingKey(String),

    /// A layout key held a value of the wrong shape; the default is used instead
    #[error("Invalid value for '{key}': {reason}")]
    InvalidKey {
        /// Dotted path of the offending key
        key: String,
        /// What the deserializer complained about
        reason: String,
    },
}

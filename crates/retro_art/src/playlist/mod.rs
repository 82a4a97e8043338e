//! RetroArch playlists
//!
//! Walks a ROM directory, matches every ROM against the [`Catalog`] and
//! writes the matches as a `.lpl` playlist (JSON, four-space indent).

mod core_info;

pub use core_info::{load_core_infos, parse_core_info, write_system_configs, CoreInfo};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

use crate::catalog::{genre_matches, Catalog};
use crate::config::{Config, ConfigError};

/// Playlist format version written to every file
pub const PLAYLIST_VERSION: &str = "1.4";

/// Marker telling RetroArch to compute the checksum itself
pub const CRC_DETECT: &str = "DETECT";

/// Playlist errors
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error("Failed to scan ROM directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// # Playlist Configuration
///
/// One document per system. Display modes are RetroArch's numeric codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistConfig {
    /// Core used when an entry names none
    pub default_core_path: String,
    /// Display name of the default core
    pub default_core_name: String,
    /// Label display mode
    pub label_display_mode: u32,
    /// Right thumbnail mode
    pub right_thumbnail_mode: u32,
    /// Left thumbnail mode
    pub left_thumbnail_mode: u32,
    /// Sort mode
    pub sort_mode: u32,
    /// Keep only ROMs whose genre matches [`Self::genres`]
    pub filter_genre: bool,
    /// ROM file extension, with the dot
    pub rom_extension: String,
    /// Playlist file name, also written as each entry's `db_name`
    pub output_name: String,
    /// Directory scanned for ROMs
    pub roms_path: PathBuf,
    /// Genre substrings to keep
    pub genres: Vec<String>,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            default_core_path: "cores/snes9x_libretro.so".to_string(),
            default_core_name: "Nintendo - SNES / SFC (Snes9x - Current)".to_string(),
            label_display_mode: 3,
            right_thumbnail_mode: 0,
            left_thumbnail_mode: 0,
            sort_mode: 0,
            filter_genre: false,
            rom_extension: ".zip".to_string(),
            output_name: "playlist.lpl".to_string(),
            roms_path: PathBuf::from("data/roms"),
            genres: Vec::new(),
        }
    }
}

impl Config for PlaylistConfig {}

impl PlaylistConfig {
    /// Config for the system a core info file describes
    pub fn from_core_info(info: &CoreInfo) -> Self {
        Self {
            default_core_path: info.path.clone(),
            default_core_name: info.display_version.clone(),
            output_name: format!("{}.lpl", file_safe(&info.display_name)),
            ..Self::default()
        }
    }

    /// Set the ROM directory
    pub fn with_roms_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.roms_path = path.into();
        self
    }

    /// Keep only these genres
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self.filter_genre = true;
        self
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let wanted = self.rom_extension.trim_start_matches('.');
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }
}

/// One playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// ROM path, forward slashes
    pub path: String,
    /// Display label
    pub label: String,
    /// Core binary
    pub core_path: String,
    /// Core display name
    pub core_name: String,
    /// Checksum or [`CRC_DETECT`]
    pub crc32: String,
    /// Playlist the entry belongs to
    pub db_name: String,
}

/// A complete `.lpl` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Format version
    pub version: String,
    /// Default core binary
    pub default_core_path: String,
    /// Default core display name
    pub default_core_name: String,
    /// Label display mode
    pub label_display_mode: u32,
    /// Right thumbnail mode
    pub right_thumbnail_mode: u32,
    /// Left thumbnail mode
    pub left_thumbnail_mode: u32,
    /// Sort mode
    pub sort_mode: u32,
    /// Entries
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    /// Empty playlist carrying the config's header fields
    pub fn empty(config: &PlaylistConfig) -> Self {
        Self {
            version: PLAYLIST_VERSION.to_string(),
            default_core_path: config.default_core_path.clone(),
            default_core_name: config.default_core_name.clone(),
            label_display_mode: config.label_display_mode,
            right_thumbnail_mode: config.right_thumbnail_mode,
            left_thumbnail_mode: config.left_thumbnail_mode,
            sort_mode: config.sort_mode,
            items: Vec::new(),
        }
    }

    /// JSON text with four-space indentation
    pub fn to_json(&self) -> Result<String, PlaylistError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write `<dir>/<name>` and return the path
    pub fn write_to<P: AsRef<Path>>(&self, dir: P, name: &str) -> Result<PathBuf, PlaylistError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(name);
        std::fs::write(&path, self.to_json()?)?;
        log::info!("Wrote playlist with {} items to {:?}", self.items.len(), path);
        Ok(path)
    }
}

/// Builds a playlist from a ROM directory and a catalog
pub struct PlaylistBuilder<'a> {
    config: &'a PlaylistConfig,
}

impl<'a> PlaylistBuilder<'a> {
    /// Create a builder
    pub const fn new(config: &'a PlaylistConfig) -> Self {
        Self { config }
    }

    /// Scan `roms_path` recursively and match every ROM
    pub fn build(&self, catalog: &Catalog) -> Result<Playlist, PlaylistError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.config.roms_path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.config.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        log::debug!("Found {} ROMs under {:?}", files.len(), self.config.roms_path);
        Ok(self.build_from_files(catalog, files))
    }

    /// Match an explicit list of ROM paths
    pub fn build_from_files<I>(&self, catalog: &Catalog, files: I) -> Playlist
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let config = self.config;
        let mut playlist = Playlist::empty(config);

        for file in files {
            let file_name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let Some(record) = catalog.lookup(file_name) else {
                log::debug!("No catalog entry for {:?}", file);
                continue;
            };
            if config.filter_genre && !genre_matches(record.text("genre"), &config.genres) {
                log::trace!("Filtered out {:?} by genre '{}'", file, record.text("genre"));
                continue;
            }

            playlist.items.push(PlaylistItem {
                path: file.to_string_lossy().replace('\\', "/"),
                label: record.title().to_string(),
                core_path: config.default_core_path.clone(),
                core_name: config.default_core_name.clone(),
                crc32: CRC_DETECT.to_string(),
                db_name: config.output_name.clone(),
            });
        }

        playlist
    }
}

/// Replace path separators so a system name can be used as a file name
pub(crate) fn file_safe(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
rom_name,game_name,genre
smw,Super Mario World,Platform
contra,Contra,Shooter
gradius,Gradius,Shooter / Horizontal
";

    fn catalog() -> Catalog {
        Catalog::from_csv_reader(CATALOG.as_bytes()).unwrap()
    }

    fn rom_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("retro_art_playlist_{}_{}", tag, std::process::id()));
        std::fs::create_dir_all(dir.join("shmups")).unwrap();
        for name in ["smw.zip", "shmups/contra.zip", "shmups/gradius.ZIP", "tetris.zip", "notes.txt"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
        dir
    }

    #[test]
    fn test_build_matches_catalog() {
        let dir = rom_dir("all");
        let config = PlaylistConfig::default().with_roms_path(&dir);
        let playlist = PlaylistBuilder::new(&config).build(&catalog()).unwrap();

        let labels: Vec<&str> = playlist.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Contra", "Gradius", "Super Mario World"]);
        let item = &playlist.items[0];
        assert!(item.path.ends_with("shmups/contra.zip"));
        assert!(!item.path.contains('\\'));
        assert_eq!(item.crc32, CRC_DETECT);
        assert_eq!(item.db_name, "playlist.lpl");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_genre_filter() {
        let dir = rom_dir("genre");
        let config = PlaylistConfig::default()
            .with_roms_path(&dir)
            .with_genres(["shooter"]);
        let playlist = PlaylistBuilder::new(&config).build(&catalog()).unwrap();
        assert_eq!(playlist.items.len(), 2);
        assert!(playlist.items.iter().all(|i| i.label != "Super Mario World"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_written_playlist_format() {
        let config = PlaylistConfig::default();
        let playlist = PlaylistBuilder::new(&config)
            .build_from_files(&catalog(), [PathBuf::from("roms/smw.zip")]);

        let dir = std::env::temp_dir().join(format!("retro_art_lpl_{}", std::process::id()));
        let path = playlist.write_to(&dir, &config.output_name).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("{\n    \"version\": \"1.4\""));
        assert!(text.contains("\n        {\n            \"path\": \"roms/smw.zip\""));
        let back: Playlist = serde_json::from_str(&text).unwrap();
        assert_eq!(back, playlist);
        assert_eq!(back.label_display_mode, 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_from_core_info() {
        let info = CoreInfo {
            display_name: "Sega - Mega Drive".to_string(),
            path: "cores/genesis_plus_gx_libretro.so".to_string(),
            display_version: "v1.7.4".to_string(),
        };
        let config = PlaylistConfig::from_core_info(&info);
        assert_eq!(config.default_core_path, "cores/genesis_plus_gx_libretro.so");
        assert_eq!(config.default_core_name, "v1.7.4");
        assert_eq!(config.output_name, "Sega - Mega Drive.lpl");
        assert!(!config.filter_genre);
    }
}

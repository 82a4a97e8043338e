//! libretro core `.info` files
//!
//! Only three keys matter for playlists: `display_name` names the system,
//! `path` is the core binary and `display_version` becomes the core name.

use std::path::Path;

use super::{file_safe, PlaylistConfig, PlaylistError};
use crate::config::Config;

/// What a playlist needs to know about one core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreInfo {
    /// System name, also the playlist name
    pub display_name: String,
    /// Core binary path
    pub path: String,
    /// Core version string, empty when absent
    pub display_version: String,
}

/// Parse `key = "value"` lines; `None` without a display name and a path
pub fn parse_core_info(text: &str) -> Option<CoreInfo> {
    let mut display_name = None;
    let mut path = None;
    let mut display_version = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        match key.trim() {
            "display_name" => display_name = Some(value),
            "path" => path = Some(value),
            "display_version" => display_version = Some(value),
            _ => {}
        }
    }

    Some(CoreInfo {
        display_name: display_name.filter(|v| !v.is_empty())?,
        path: path.filter(|v| !v.is_empty())?,
        display_version: display_version.unwrap_or_default(),
    })
}

/// Read every `.info` file in a directory, sorted by system name
pub fn load_core_infos<P: AsRef<Path>>(dir: P) -> Result<Vec<CoreInfo>, PlaylistError> {
    let mut infos = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_info = path.extension().and_then(|ext| ext.to_str()) == Some("info");
        if !is_info {
            continue;
        }
        let text = std::fs::read_to_string(&path)?;
        match parse_core_info(&text) {
            Some(info) => infos.push(info),
            None => log::warn!("Skipping {:?}: no display_name/path", path),
        }
    }
    infos.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(infos)
}

/// Write one `<system>.toml` playlist config per core into `config_dir`
pub fn write_system_configs<P: AsRef<Path>>(
    infos: &[CoreInfo],
    config_dir: P,
) -> Result<Vec<std::path::PathBuf>, PlaylistError> {
    let config_dir = config_dir.as_ref();
    std::fs::create_dir_all(config_dir)?;

    let mut written = Vec::with_capacity(infos.len());
    for info in infos {
        let path = config_dir.join(format!("{}.toml", file_safe(&info.display_name)));
        PlaylistConfig::from_core_info(info).save_to_file(&path)?;
        log::debug!("Wrote playlist config {:?}", path);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNES9X: &str = r#"
display_name = "Nintendo - SNES / SFC (Snes9x - Current)"
authors = "Snes9x Team"
path = "cores/snes9x_libretro.so"
display_version = "1.62.3"
"#;

    #[test]
    fn test_parse_core_info() {
        let info = parse_core_info(SNES9X).unwrap();
        assert_eq!(info.display_name, "Nintendo - SNES / SFC (Snes9x - Current)");
        assert_eq!(info.path, "cores/snes9x_libretro.so");
        assert_eq!(info.display_version, "1.62.3");
    }

    #[test]
    fn test_incomplete_info_is_rejected() {
        assert!(parse_core_info("display_name = \"Atari - 2600\"").is_none());
        assert!(parse_core_info("path = \"\"\ndisplay_name = \"x\"").is_none());

        let info = parse_core_info("display_name = \"Atari - 2600\"\npath = stella.so").unwrap();
        assert_eq!(info.display_version, "");
    }

    #[test]
    fn test_configs_from_info_dir() {
        let dir = std::env::temp_dir().join(format!("retro_art_cores_{}", std::process::id()));
        let info_dir = dir.join("info");
        std::fs::create_dir_all(&info_dir).unwrap();
        std::fs::write(info_dir.join("snes9x.info"), SNES9X).unwrap();
        std::fs::write(info_dir.join("stella.info"), "display_name = \"Atari - 2600\"\npath = \"stella.so\"").unwrap();
        std::fs::write(info_dir.join("broken.info"), "authors = nobody").unwrap();
        std::fs::write(info_dir.join("readme.txt"), "not a core").unwrap();

        let infos = load_core_infos(&info_dir).unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].display_name, "Atari - 2600");

        let written = write_system_configs(&infos, dir.join("config")).unwrap();
        let config = PlaylistConfig::load_from_file(&written[0]).unwrap();
        assert_eq!(config.default_core_path, "stella.so");
        assert_eq!(config.output_name, "Atari - 2600.lpl");
        assert!(written[1].ends_with("Nintendo - SNES _ SFC (Snes9x - Current).toml"));
        assert!(written[1].is_file());

        std::fs::remove_dir_all(&dir).ok();
    }
}

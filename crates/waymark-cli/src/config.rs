//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use waymark::{WaymarkError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for WaymarkError {
    fn from(err: ConfigError) -> Self {
        WaymarkError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (waymark/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config file holds values no layout can use
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WaymarkError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("waymark/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "waymark", "waymark") {
        let config_dir = proj_dirs.config_dir();
        let system_config = config_dir.join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - A layout setting is out of range
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, WaymarkError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .layout()
        .validate()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use waymark::config::LayoutMode;

    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_explicit_config() {
        let (_dir, path) = write_config(
            r#"
            [layout]
            mode = "swim_lane"
            grid_size = 10

            [layout.tree]
            branch_spacing = 400

            [layout.swim_lane]
            lane_height = 320
            "#,
        );

        let config = load_config(Some(&path)).unwrap();
        let layout = config.layout();

        assert_eq!(layout.mode(), LayoutMode::SwimLane);
        assert_eq!(layout.grid().unwrap().unit(), 10);
        assert_eq!(layout.tree().branch_spacing(), 400);
        assert_eq!(layout.tree().level_gap(), 36);
        assert_eq!(layout.swim_lane().lane_height(), 320);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let (_dir, path) = write_config("");

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout().mode(), LayoutMode::Tree);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_malformed_toml_fails() {
        let (_dir, path) = write_config("[layout\nmode = ");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, WaymarkError::Config(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let (_dir, path) = write_config(
            r#"
            [layout.swim_lane]
            node_height = 400
            lane_height = 300
            "#,
        );

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Validation error"));
    }
}

//! Loading and saving of [`OverlaySettings`].
//!
//! Settings live in the user's config directory (managed by `confy`) unless
//! an explicit TOML path is given. A missing file is not an error: the
//! defaults are used and, for the confy location, written back.

use std::fs;
use std::path::{Path, PathBuf};

use hdt_types::OverlaySettings;

/// Application name used for the config directory.
pub const APP_NAME: &str = "hdt";
/// File stem of the settings file inside the config directory.
pub const CONFIG_NAME: &str = "overlay";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
    #[error("config store error: {0}")]
    Store(#[from] confy::ConfyError),
}

/// Load settings from the default per-user location.
pub fn load_settings() -> Result<OverlaySettings, ConfigError> {
    let settings: OverlaySettings = confy::load(APP_NAME, CONFIG_NAME)?;
    Ok(settings)
}

/// Persist settings to the default per-user location.
pub fn store_settings(settings: &OverlaySettings) -> Result<(), ConfigError> {
    confy::store(APP_NAME, CONFIG_NAME, settings)?;
    Ok(())
}

/// Load settings from a confy-managed file at `path`, creating it with
/// defaults when missing.
pub fn load_settings_at(path: &Path) -> Result<OverlaySettings, ConfigError> {
    let settings: OverlaySettings = confy::load_path(path)?;
    Ok(settings)
}

/// Persist settings to a confy-managed file at `path`.
pub fn store_settings_at(path: &Path, settings: &OverlaySettings) -> Result<(), ConfigError> {
    confy::store_path(path, settings)?;
    Ok(())
}

/// Settings from an explicit TOML file when one is given, otherwise from
/// the default per-user location.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<OverlaySettings, ConfigError> {
    match explicit {
        Some(path) => load_settings_file(path),
        None => load_settings(),
    }
}

/// Path of the default settings file, if a config directory exists.
pub fn default_settings_path() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
        .ok()
        .or_else(|| dirs::config_dir().map(|p| p.join(APP_NAME).join(format!("{CONFIG_NAME}.toml"))))
}

/// Load settings from an explicit TOML file. A missing file yields defaults.
pub fn load_settings_file(path: &Path) -> Result<OverlaySettings, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Settings file not found, using defaults");
        return Ok(OverlaySettings::default());
    }
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_settings(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save settings to an explicit TOML file.
pub fn save_settings_file(path: &Path, settings: &OverlaySettings) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<OverlaySettings, toml::de::Error> {
    toml::from_str(contents)
}

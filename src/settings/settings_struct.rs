use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CommonSettings {
    fn default() -> Self {
        CommonSettings {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    #[serde(default = "default_true")]
    pub header: bool,
    /// minijinja template replacing the built-in header.
    pub header_template: Option<String>,
    #[serde(default = "default_true")]
    pub comments: bool,
    #[serde(default = "default_true")]
    pub blank_line_between_sections: bool,
    /// Run the command shortener over the final config before export.
    #[serde(default = "default_true")]
    pub shorten: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            header: true,
            header_template: None,
            comments: true,
            blank_line_between_sections: true,
            shorten: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub common: CommonSettings,
    pub export: ExportSettings,
    /// File the settings were loaded from, if any.
    #[serde(skip)]
    pub pref_path: String,
}

lazy_static! {
    static ref GLOBAL: RwLock<Arc<Settings>> = RwLock::new(Arc::new(Settings::default()));
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the process-wide settings.
    pub fn current() -> Arc<Settings> {
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Parse settings content. YAML is recognised by its `common:` key,
    /// anything else is read as TOML.
    pub fn load_from_content(content: &str) -> Result<Self> {
        if content.contains("common:") {
            debug!("parsing settings as YAML");
            return Ok(serde_yaml::from_str(content)?);
        }
        debug!("parsing settings as TOML");
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut settings = Settings::load_from_content(&content)?;
        settings.pref_path = path.display().to_string();
        Ok(settings)
    }
}

fn replace_global(settings: Settings) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(settings);
}

/// Replace the global settings with the parsed `content`. On error the
/// previous settings stay in place.
pub fn update_settings_from_content(content: &str) -> Result<()> {
    let settings = Settings::load_from_content(content)?;
    replace_global(settings);
    Ok(())
}

/// Replace the global settings with the content of `path`.
pub fn update_settings_from_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let settings = Settings::load_from_file(path)?;
    info!("loaded settings from {}", settings.pref_path);
    replace_global(settings);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_content() {
        let settings = Settings::load_from_content(
            "common:\n  log_level: debug\nexport:\n  header: false\n",
        )
        .unwrap();
        assert_eq!(settings.common.log_level, "debug");
        assert!(!settings.export.header);
        assert!(settings.export.shorten);
    }

    #[test]
    fn test_toml_content() {
        let settings = Settings::load_from_content(
            "[export]\nblank_line_between_sections = false\nheader_template = \"# {{ model }}\"\n",
        )
        .unwrap();
        assert_eq!(settings.common.log_level, "info");
        assert!(!settings.export.blank_line_between_sections);
        assert_eq!(settings.export.header_template.as_deref(), Some("# {{ model }}"));
    }

    #[test]
    fn test_invalid_content() {
        assert!(Settings::load_from_content("[export\nheader = ").is_err());
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DroidScopeError, DroidScopeResult};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for pulling a hierarchy dump off the device with adb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_adb_path")]
    pub adb_path: String,
    /// Target device; `None` lets adb pick the only connected one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default = "default_device_dump_path")]
    pub device_dump_path: String,
    #[serde(default = "default_local_dump_path")]
    pub local_dump_path: PathBuf,
    /// Per adb invocation.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            serial: None,
            device_dump_path: default_device_dump_path(),
            local_dump_path: default_local_dump_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_adb_path() -> String {
    "adb".into()
}

fn default_device_dump_path() -> String {
    "/sdcard/window_dump.xml".into()
}

fn default_local_dump_path() -> PathBuf {
    PathBuf::from("window_dump.xml")
}

fn default_timeout_ms() -> u64 {
    20_000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// How many structured records the CLI prints after the prompt.
    #[serde(default = "default_records_preview")]
    pub records_preview: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_preview: default_records_preview(),
        }
    }
}

fn default_records_preview() -> usize {
    3
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join(CONFIG_FILE);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Some(candidate);
            }
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in working directory");
            return Some(candidate);
        }
    }

    let candidate = dirs::config_dir()?.join("droidscope").join(CONFIG_FILE);
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in user config dir");
        return Some(candidate);
    }
    None
}

pub fn load_config_from(path: &Path) -> DroidScopeResult<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DroidScopeError::Config(format!("{}: {e}", path.display())))?;
    let config: AppConfig = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), adb = %config.capture.adb_path, "config loaded");
    Ok(config)
}

/// Loads the first `config.toml` found next to the executable, in the working
/// directory or in the user config dir. Falls back to defaults when none exists.
pub fn load_config() -> DroidScopeResult<AppConfig> {
    match resolve_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::info!("no config.toml found; using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn save_config(config: &AppConfig, path: &Path) -> DroidScopeResult<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.capture.adb_path, "adb");
        assert_eq!(config.capture.device_dump_path, "/sdcard/window_dump.xml");
        assert_eq!(config.capture.timeout_ms, 20_000);
        assert_eq!(config.output.records_preview, 3);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config: AppConfig = toml::from_str(
            r#"
            [capture]
            adb_path = "/opt/platform-tools/adb"
            serial = "emulator-5554"
            "#,
        )
        .unwrap();
        assert_eq!(config.capture.adb_path, "/opt/platform-tools/adb");
        assert_eq!(config.capture.serial.as_deref(), Some("emulator-5554"));
        assert_eq!(config.capture.local_dump_path, PathBuf::from("window_dump.xml"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let result: Result<AppConfig, _> = toml::from_str("[capture]\ntimeout_ms = \"soon\"");
        assert!(result.is_err());
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("droidscope-config-{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.capture.serial = Some("R58M123".into());
        config.output.records_preview = 10;
        save_config(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_config_from(Path::new("/nonexistent/droidscope.toml")).unwrap_err();
        assert!(matches!(err, DroidScopeError::Config(_)));
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::ClientSettings;

pub const ENV_API_URL: &str = "EQUIPMENT_BOOKING_API_URL";
pub const ENV_TOKEN: &str = "EQUIPMENT_BOOKING_TOKEN";

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory, falling back to the
    /// working directory when none can be resolved.
    pub fn from_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "EquipmentBooking", "EquipmentBooking") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the settings file, or defaults when it does not exist yet.
    /// Environment overrides are not applied.
    pub fn load_file(&self) -> Result<ClientSettings> {
        if !self.path.exists() {
            log::debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(ClientSettings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        let settings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", self.path.display()))?;
        Ok(settings)
    }

    /// Effective settings: file, then environment, then validation.
    pub fn load(&self) -> Result<ClientSettings> {
        let mut settings = self.load_file()?;
        Self::apply_env_overrides(&mut settings);
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(settings)
    }

    pub fn apply_env_overrides(settings: &mut ClientSettings) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                log::debug!("API base URL overridden from {}", ENV_API_URL);
                settings.api_base_url = url;
            }
        }

        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                settings.auth_token = Some(token);
            }
        }
    }

    pub fn save(&self, settings: &ClientSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }

    /// Forget the stored token, e.g. after the backend rejected it.
    pub fn clear_token(&self) -> Result<()> {
        let mut settings = self.load_file()?;
        if settings.auth_token.take().is_some() {
            self.save(&settings)?;
            log::info!("Stored auth token cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_TOKEN);
    }

    #[test]
    #[serial]
    fn test_missing_file_gives_defaults() {
        clear_env();
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));

        assert_eq!(service.load().unwrap(), ClientSettings::default());
    }

    #[test]
    #[serial]
    fn test_save_then_load() {
        clear_env();
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join("settings.toml"));

        let settings = ClientSettings {
            api_base_url: "http://localhost:3000/api".to_string(),
            request_timeout_secs: 5,
            auth_token: Some("tok".to_string()),
            grid_days: 5,
        };
        service.save(&settings).unwrap();

        assert_eq!(service.load().unwrap(), settings);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "api_base_url = \"http://file.example/api\"\n").unwrap();

        std::env::set_var(ENV_API_URL, "http://env.example/api");
        std::env::set_var(ENV_TOKEN, "from-env");
        let settings = SettingsService::new(&path).load().unwrap();
        clear_env();

        assert_eq!(settings.api_base_url, "http://env.example/api");
        assert_eq!(settings.token(), Some("from-env"));
    }

    #[test]
    #[serial]
    fn test_invalid_file_is_error() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "grid_days = 40\n").unwrap();

        let err = SettingsService::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_error() {
        clear_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "grid_days = \"three\"\n").unwrap();

        assert!(SettingsService::new(&path).load().is_err());
    }

    #[test]
    #[serial]
    fn test_clear_token() {
        clear_env();
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));
        service
            .save(&ClientSettings {
                auth_token: Some("stale".to_string()),
                ..ClientSettings::default()
            })
            .unwrap();

        service.clear_token().unwrap();
        assert_eq!(service.load().unwrap().auth_token, None);
    }
}

// Settings module
// Client configuration for reaching the reservation backend

use serde::{Deserialize, Serialize};

use super::slot::GRID_DAYS;

pub const DEFAULT_API_BASE_URL: &str = "https://equipment-reservation-backend.vercel.app/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub auth_token: Option<String>,
    pub grid_days: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 20,
            auth_token: None,
            grid_days: GRID_DAYS,
        }
    }
}

impl ClientSettings {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err("API base URL must start with http:// or https://".to_string());
        }

        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err("Request timeout must be between 1 and 300 seconds".to_string());
        }

        if !(1..=14).contains(&self.grid_days) {
            return Err("Grid must show between 1 and 14 days".to_string());
        }

        Ok(())
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    pub fn token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

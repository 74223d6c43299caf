// Settings service
// Loads and saves client settings as TOML, with environment overrides

mod service;

pub use service::{SettingsService, ENV_API_URL, ENV_TOKEN};

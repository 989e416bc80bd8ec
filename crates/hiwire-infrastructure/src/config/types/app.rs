//! Application and server sections of the system configuration

use crate::constants::{DEFAULT_APP_NAME, DEFAULT_CONTEXT_PATH, DEFAULT_SERVER_PORT};
use hiwire_domain::constants::DEFAULT_PROFILE;
use serde::{Deserialize, Serialize};

/// Profile settings (`app.profiles.*`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// Active profile
    pub active: String,
    /// Units admitted when filtering is enabled
    pub include: Vec<String>,
    /// Whether the include list is enforced
    pub filter: bool,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            active: DEFAULT_PROFILE.to_string(),
            include: Vec::new(),
            filter: false,
        }
    }
}

/// Application identity (`app.*`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name
    pub name: String,
    /// Project the application belongs to
    pub project: String,
    /// Profile settings
    pub profiles: ProfilesConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            project: String::new(),
            profiles: ProfilesConfig::default(),
        }
    }
}

/// Server settings (`server.*`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port
    pub port: u16,
    /// Context path prefix
    pub context_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            context_path: DEFAULT_CONTEXT_PATH.to_string(),
        }
    }
}

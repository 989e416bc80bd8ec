//! System configuration
//!
//! Built first, from the `application[-<profile>]` property files, so that
//! unit builds can resolve `${system.*}` placeholders against it.

use super::{AppConfig, LoggingConfig, ServerConfig};
use hiwire_domain::constants::SYSTEM_CONFIGURATION_NAME;
use hiwire_domain::error::Result;
use hiwire_domain::ports::ConfigurationUnit;
use hiwire_domain::value_objects::{Marker, Producer, PropertySpace, UnitDescriptor};
use serde::{Deserialize, Serialize};

/// Process-wide settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfiguration {
    /// `app.*`
    pub app: AppConfig,
    /// `server.*`
    pub server: ServerConfig,
    /// `logging.*`
    pub logging: LoggingConfig,
}

impl SystemConfiguration {
    /// Decode a system configuration from a merged property space
    pub fn from_properties(space: &PropertySpace) -> Result<Self> {
        let mut config = Self::default();
        space.bind("", &mut config)?;
        Ok(config)
    }
}

impl ConfigurationUnit for SystemConfiguration {
    fn descriptor(&self) -> UnitDescriptor {
        UnitDescriptor::new("SystemConfiguration", SYSTEM_CONFIGURATION_NAME)
            .with_marker(Marker::PreConfiguration)
            .with_marker(Marker::ContextAware)
    }

    fn bind(&mut self, properties: &PropertySpace) -> Result<()> {
        properties.bind("", self)
    }

    fn producers(&self) -> Vec<Producer> {
        Vec::new()
    }
}

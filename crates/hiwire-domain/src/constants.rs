//! Domain layer constants
//!
//! Names and defaults that every layer agrees on. Infrastructure-only
//! constants (file names, environment prefixes) live in
//! `hiwire_infrastructure::constants`.

// ============================================================================
// PROFILE CONSTANTS
// ============================================================================

/// Profile used when none is configured
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable holding the active profile
pub const ENV_APP_PROFILES_ACTIVE: &str = "APP_PROFILES_ACTIVE";

/// Property key the active profile is published under
pub const PROP_APP_PROFILES_ACTIVE: &str = "app.profiles.active";

// ============================================================================
// NAMING CONSTANTS
// ============================================================================

/// Postfix stripped from unit type names when deriving the unit name
pub const CONFIGURATION_POSTFIX: &str = "Configuration";

/// Name of the system-wide configuration
pub const SYSTEM_CONFIGURATION_NAME: &str = "system";

/// Registry name of the system configuration instance
pub const SYSTEM_CONFIGURATION_INSTANCE: &str = "systemConfiguration";

/// Reserved operation name that is never treated as an artifact producer
pub const RESERVED_INITIALIZER: &str = "init";

/// Separator between a package and an artifact name
pub const QUALIFIER_SEPARATOR: char = '.';

/// Prefix forcing a placeholder to resolve against the system configuration
pub const SYSTEM_PLACEHOLDER_PREFIX: &str = "system.";

//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `hiwire_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Directory holding property files, relative to the working directory
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Directory name under the platform config dir
pub const APPLICATION_CONFIG_DIR: &str = "hiwire";

/// Base name of the system property files (`application.yml`, `application-local.yml`)
pub const APPLICATION_BASE_NAME: &str = "application";

/// Environment variable prefix for property overrides (`HIWIRE__SERVER__PORT`)
pub const CONFIG_ENV_PREFIX: &str = "HIWIRE";

/// Nesting separator in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Property file extensions, in load order
pub const PROPERTY_FILE_EXTENSIONS: [&str; 3] = ["yml", "yaml", "toml"];

// ============================================================================
// PLACEHOLDER CONSTANTS
// ============================================================================

/// `${key}` or `${key:default}`
pub const PLACEHOLDER_PATTERN: &str = r"\$\{([^}:]+)(?::([^}]*))?\}";

/// Maximum nesting of placeholders inside resolved values
pub const PLACEHOLDER_MAX_DEPTH: usize = 8;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "HIWIRE_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem of the rolling log file when none is configured
pub const DEFAULT_LOG_FILE_STEM: &str = "hiwire";

// ============================================================================
// SERVER CONSTANTS
// ============================================================================

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default context path
pub const DEFAULT_CONTEXT_PATH: &str = "/";

/// Default application name
pub const DEFAULT_APP_NAME: &str = "hiwire";

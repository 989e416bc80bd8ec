//! Error handling types

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Hiwire
#[derive(Error, Debug)]
pub enum Error {
    /// The dependency graph of a phase bucket contains a cycle
    #[error("Circular dependency found between: {}", nodes.join(", "))]
    CircularDependency {
        /// Names of the nodes forming the cyclic subgraph, sorted
        nodes: Vec<String>,
    },

    /// A configuration unit lacks exactly one recognized phase marker
    #[error("Invalid configuration type {unit}: {message}")]
    InvalidConfigurationType {
        /// Name of the offending unit
        unit: String,
        /// Why the unit was rejected
        message: String,
    },

    /// Two configuration units registered the same name
    #[error("Artifact name is already taken: {name}")]
    DuplicateArtifactName {
        /// The contested name
        name: String,
    },

    /// A property source file could not be parsed
    #[error("Failed to parse property source {}: {message}", path.display())]
    PropertySourceParse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A producer parameter could not be resolved
    #[error("Missing dependency {dependency} of artifact {artifact}")]
    MissingDependency {
        /// Artifact whose producer declared the parameter
        artifact: String,
        /// Name that could not be resolved
        dependency: String,
    },

    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON conversion error while binding properties
    #[error("JSON conversion error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal engine error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// Coarse classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::CircularDependency`]
    CircularDependency,
    /// See [`Error::InvalidConfigurationType`]
    InvalidConfigurationType,
    /// See [`Error::DuplicateArtifactName`]
    DuplicateArtifactName,
    /// See [`Error::PropertySourceParse`]
    PropertySourceParseError,
    /// See [`Error::MissingDependency`]
    MissingDependency,
    /// Any other failure
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CircularDependency => "CircularDependency",
            Self::InvalidConfigurationType => "InvalidConfigurationType",
            Self::DuplicateArtifactName => "DuplicateArtifactName",
            Self::PropertySourceParseError => "PropertySourceParseError",
            Self::MissingDependency => "MissingDependency",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

// Engine error creation methods
impl Error {
    /// Create a circular dependency error; node names are sorted for stable output
    pub fn circular_dependency<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nodes: Vec<String> = nodes.into_iter().map(Into::into).collect();
        nodes.sort();
        Self::CircularDependency { nodes }
    }

    /// Create an invalid configuration type error
    pub fn invalid_configuration_type<U: Into<String>, M: Into<String>>(unit: U, message: M) -> Self {
        Self::InvalidConfigurationType {
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate artifact name error
    pub fn duplicate_artifact<S: Into<String>>(name: S) -> Self {
        Self::DuplicateArtifactName { name: name.into() }
    }

    /// Create a property source parse error
    pub fn property_source_parse<P: Into<PathBuf>, M: Into<String>>(path: P, message: M) -> Self {
        Self::PropertySourceParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing dependency error
    pub fn missing_dependency<A: Into<String>, D: Into<String>>(artifact: A, dependency: D) -> Self {
        Self::MissingDependency {
            artifact: artifact.into(),
            dependency: dependency.into(),
        }
    }
}

// Basic error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CircularDependency { .. } => ErrorKind::CircularDependency,
            Self::InvalidConfigurationType { .. } => ErrorKind::InvalidConfigurationType,
            Self::DuplicateArtifactName { .. } => ErrorKind::DuplicateArtifactName,
            Self::PropertySourceParse { .. } => ErrorKind::PropertySourceParseError,
            Self::MissingDependency { .. } => ErrorKind::MissingDependency,
            _ => ErrorKind::Other,
        }
    }

    /// Whether the error must abort the startup sequence.
    ///
    /// Graph-level and duplicate-name errors are fatal; everything else is
    /// recovered per unit.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::CircularDependency | ErrorKind::DuplicateArtifactName
        )
    }
}

//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error preserved as the source of a wrapped failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for svcreg
///
/// The first five variants form the resolution error taxonomy. All of them are
/// configuration-time errors: none is retried, and none leaves a partially
/// constructed service behind.
#[derive(Error, Debug)]
pub enum Error {
    /// The identifier matches neither the URL grammar nor the `python:` grammar
    #[error("Malformed service identifier '{identifier}': {reason}")]
    MalformedIdentifier {
        /// The raw identifier as supplied by the caller
        identifier: String,
        /// What made it unparseable
        reason: String,
    },

    /// No constructor is registered for the `(kind, scheme)` pair
    #[error(
        "Unknown {kind} service scheme '{scheme}'. Available schemes: [{}]",
        .available.join(", ")
    )]
    UnknownScheme {
        /// Service kind the caller asked for
        kind: String,
        /// Scheme parsed from the identifier
        scheme: String,
        /// Schemes registered for the kind at lookup time
        available: Vec<String>,
    },

    /// A dynamic-import module path could not be loaded
    #[error("Failed to import module '{module}': {reason}")]
    ImportFailure {
        /// Module path from the identifier
        module: String,
        /// Why the module could not be loaded
        reason: String,
    },

    /// The loaded module has no such attribute
    #[error("Module '{module}' has no attribute '{attribute}'")]
    AttributeResolutionFailure {
        /// Module path from the identifier
        module: String,
        /// Attribute name that was requested
        attribute: String,
    },

    /// The resolved constructor failed while being invoked
    #[error("Failed to instantiate '{target}': {message}")]
    InstantiationFailure {
        /// Scheme or import target that was being constructed
        target: String,
        /// Description of the failure
        message: String,
        /// The constructor's original error
        #[source]
        source: Option<BoxError>,
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
        source: Option<BoxError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
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
        source: Option<BoxError>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a malformed identifier error
    pub fn malformed_identifier<I: Into<String>, R: Into<String>>(identifier: I, reason: R) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown scheme error
    pub fn unknown_scheme<K: Into<String>, S: Into<String>>(
        kind: K,
        scheme: S,
        available: Vec<String>,
    ) -> Self {
        Self::UnknownScheme {
            kind: kind.into(),
            scheme: scheme.into(),
            available,
        }
    }

    /// Create an import failure error
    pub fn import_failure<M: Into<String>, R: Into<String>>(module: M, reason: R) -> Self {
        Self::ImportFailure {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Create an attribute resolution error
    pub fn attribute_resolution<M: Into<String>, A: Into<String>>(module: M, attribute: A) -> Self {
        Self::AttributeResolutionFailure {
            module: module.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an instantiation failure without an underlying error
    pub fn instantiation<T: Into<String>, M: Into<String>>(target: T, message: M) -> Self {
        Self::InstantiationFailure {
            target: target.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a constructor's error as an instantiation failure
    pub fn instantiation_with_source<T: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        target: T,
        source: E,
    ) -> Self {
        Self::InstantiationFailure {
            target: target.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error belongs to the resolution taxonomy
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedIdentifier { .. }
                | Self::UnknownScheme { .. }
                | Self::ImportFailure { .. }
                | Self::AttributeResolutionFailure { .. }
                | Self::InstantiationFailure { .. }
        )
    }
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
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

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wirebox
///
/// Every variant is a configuration problem surfaced to the caller of
/// `set`, `get` or `prepare`; nothing is recovered internally.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument has the wrong kind of value
    #[error("Invalid type for {context}: {found}, required: {expected}")]
    InvalidType {
        /// What was being validated
        context: String,
        /// Accepted kinds, human readable
        expected: String,
        /// Kind that was actually supplied
        found: String,
    },

    /// Malformed declarative service definition
    #[error("Service syntax error: {message}")]
    ServiceSyntax {
        /// Description of the problem
        message: String,
    },

    /// Mistyped declarative service definition or service value
    #[error("Service invalid type: {message}")]
    ServiceInvalidType {
        /// Description of the problem
        message: String,
    },

    /// Malformed declarative listener definition
    #[error("Listener syntax error: {message}")]
    ListenerSyntax {
        /// Description of the problem
        message: String,
    },

    /// Mistyped declarative listener definition
    #[error("Listener invalid type: {message}")]
    ListenerInvalidType {
        /// Description of the problem
        message: String,
    },

    /// Alias target is not a string
    #[error("Alias invalid type: {message}")]
    AliasInvalidType {
        /// Description of the problem
        message: String,
    },

    /// Alias key declared twice
    #[error("Alias \"{key}\" already exists")]
    AliasOverflow {
        /// The alias key
        key: String,
    },

    /// Visibility flag is not a boolean
    #[error("Public invalid type: {message}")]
    PublicInvalidType {
        /// Description of the problem
        message: String,
    },

    /// Lookup of an absent key
    #[error("Key \"{key}\" does not exist")]
    KeyReference {
        /// The missing key
        key: String,
    },

    /// Alias pointing at an absent key
    #[error("Key \"{target}\" for \"{alias}\" does not exist")]
    AliasKeyReference {
        /// The alias key being resolved
        alias: String,
        /// The missing target key
        target: String,
    },

    /// Method missing on a resolved service
    #[error("{owner} does not have a method \"{method}\"")]
    MethodReference {
        /// Class or service key the method was looked up on
        owner: String,
        /// The missing method
        method: String,
    },

    /// Embedded interpolation resolved to something other than a string or number
    #[error("Value for key \"{key}\" has invalid type {found}, must be a string or number")]
    ReplaceValueInvalidType {
        /// The referenced key
        key: String,
        /// Kind of the resolved value
        found: String,
    },

    /// Class identifier could not be resolved to a factory
    #[error("Class \"{class}\" cannot be resolved: {message}")]
    Class {
        /// The class identifier
        class: String,
        /// Why the lookup failed
        message: String,
    },

    /// A service method, property assignment or factory failed
    #[error("Invocation of \"{target}\" failed: {message}")]
    Invocation {
        /// Method, property or class that failed
        target: String,
        /// Failure description
        message: String,
    },

    /// An entry was referenced while it was still being compiled
    #[error("Circular reference while compiling \"{key}\"")]
    CircularReference {
        /// The key that was re-entered
        key: String,
    },

    /// An alias chain loops back on itself
    #[error("Alias cycle detected: {}", chain.join(" -> "))]
    AliasCycle {
        /// Keys visited, ending with the repeated one
        chain: Vec<String>,
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

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

// Validation error creation methods
impl Error {
    /// Create an invalid type error
    pub fn invalid_type<C, E, F>(context: C, expected: E, found: F) -> Self
    where
        C: Into<String>,
        E: Into<String>,
        F: Into<String>,
    {
        Self::InvalidType {
            context: context.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a service syntax error
    pub fn service_syntax<S: Into<String>>(message: S) -> Self {
        Self::ServiceSyntax {
            message: message.into(),
        }
    }

    /// Create a service invalid type error
    pub fn service_invalid_type<S: Into<String>>(message: S) -> Self {
        Self::ServiceInvalidType {
            message: message.into(),
        }
    }

    /// Create a listener syntax error
    pub fn listener_syntax<S: Into<String>>(message: S) -> Self {
        Self::ListenerSyntax {
            message: message.into(),
        }
    }

    /// Create a listener invalid type error
    pub fn listener_invalid_type<S: Into<String>>(message: S) -> Self {
        Self::ListenerInvalidType {
            message: message.into(),
        }
    }

    /// Create an alias invalid type error
    pub fn alias_invalid_type<S: Into<String>>(message: S) -> Self {
        Self::AliasInvalidType {
            message: message.into(),
        }
    }

    /// Create a public invalid type error
    pub fn public_invalid_type<S: Into<String>>(message: S) -> Self {
        Self::PublicInvalidType {
            message: message.into(),
        }
    }
}

// Resolution error creation methods
impl Error {
    /// Create an alias overflow error
    pub fn alias_overflow<S: Into<String>>(key: S) -> Self {
        Self::AliasOverflow { key: key.into() }
    }

    /// Create a key reference error
    pub fn key_reference<S: Into<String>>(key: S) -> Self {
        Self::KeyReference { key: key.into() }
    }

    /// Create an alias key reference error
    pub fn alias_key_reference<A: Into<String>, T: Into<String>>(alias: A, target: T) -> Self {
        Self::AliasKeyReference {
            alias: alias.into(),
            target: target.into(),
        }
    }

    /// Create a method reference error
    pub fn method_reference<O: Into<String>, M: Into<String>>(owner: O, method: M) -> Self {
        Self::MethodReference {
            owner: owner.into(),
            method: method.into(),
        }
    }

    /// Create a replace value invalid type error
    pub fn replace_value_invalid_type<K: Into<String>, F: Into<String>>(key: K, found: F) -> Self {
        Self::ReplaceValueInvalidType {
            key: key.into(),
            found: found.into(),
        }
    }

    /// Create a class resolution error
    pub fn class<C: Into<String>, S: Into<String>>(class: C, message: S) -> Self {
        Self::Class {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Create an invocation error
    pub fn invocation<T: Into<String>, S: Into<String>>(target: T, message: S) -> Self {
        Self::Invocation {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a circular reference error
    pub fn circular_reference<S: Into<String>>(key: S) -> Self {
        Self::CircularReference { key: key.into() }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Error {
    /// Whether this error reports a missing key
    ///
    /// `AliasKeyReference` is a specialization of `KeyReference` and matches too.
    pub fn is_key_reference(&self) -> bool {
        matches!(
            self,
            Self::KeyReference { .. } | Self::AliasKeyReference { .. }
        )
    }
}

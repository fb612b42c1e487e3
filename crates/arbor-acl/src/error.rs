//! Error types for arbor-acl

use arbor_core::PropertyType;
use thiserror::Error;

/// Result type alias for arbor-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in arbor-acl
///
/// Every variant except [`Error::Core`] and [`Error::Config`] is an
/// access-control input error: the request was rejected before the list was
/// touched and the caller can correct it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from arbor-core
    #[error("Core error: {0}")]
    Core(#[from] arbor_core::Error),

    /// Configuration document is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Principal is neither native nor known to the principal directory
    #[error("Invalid principal: '{name}'")]
    InvalidPrincipal {
        /// Name of the rejected principal
        name: String,
    },

    /// No privileges were requested
    #[error("Privileges must not be empty")]
    EmptyPrivileges,

    /// Privilege name does not resolve, or cannot be granted
    #[error("Invalid privilege: '{name}'")]
    InvalidPrivilege {
        /// Offending privilege name
        name: String,
    },

    /// Restriction name is not supported at this path
    #[error("Unsupported restriction: '{name}'")]
    UnsupportedRestriction {
        /// Offending restriction name
        name: String,
    },

    /// Restriction value has the wrong type
    #[error("Invalid type for restriction '{name}': expected {expected}, got {actual}")]
    InvalidRestrictionType {
        /// Restriction name
        name: String,
        /// Type required by the definition
        expected: PropertyType,
        /// Type of the submitted value
        actual: PropertyType,
    },

    /// A mandatory restriction was not submitted
    #[error("Missing mandatory restriction: '{name}'")]
    MissingMandatoryRestriction {
        /// Name of the missing restriction
        name: String,
    },

    /// Entry is not present in the list
    #[error("Entry not found: {entry}")]
    EntryNotFound {
        /// Description of the entry that was looked up
        entry: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid principal error.
    pub fn invalid_principal<S: Into<String>>(name: S) -> Self {
        Error::InvalidPrincipal { name: name.into() }
    }

    /// Creates an invalid privilege error.
    pub fn invalid_privilege<S: Into<String>>(name: S) -> Self {
        Error::InvalidPrivilege { name: name.into() }
    }

    /// Returns whether this error is an access-control input error.
    ///
    /// These are user-correctable and leave the list unchanged. Configuration
    /// and I/O failures are not.
    pub fn is_access_control_error(&self) -> bool {
        match self {
            Error::Core(_) | Error::Config { .. } => false,
            Error::InvalidPrincipal { .. }
            | Error::EmptyPrivileges
            | Error::InvalidPrivilege { .. }
            | Error::UnsupportedRestriction { .. }
            | Error::InvalidRestrictionType { .. }
            | Error::MissingMandatoryRestriction { .. }
            | Error::EntryNotFound { .. } => true,
        }
    }
}

//! Typed property values.
//!
//! Restrictions carry a single typed [`Value`]; restriction definitions name
//! the [`PropertyType`] a value must have.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Any type. Only meaningful on definitions.
    Undefined,
    /// Free-form string.
    String,
    /// Qualified item name, e.g. `rep:glob`.
    Name,
    /// Repository path.
    Path,
    /// `true` or `false`.
    Boolean,
    /// Signed 64-bit integer.
    Long,
    /// Point in time.
    Date,
}

impl PropertyType {
    /// Returns `true` if a value of type `actual` satisfies this required type.
    ///
    /// ```
    /// use arbor_core::PropertyType;
    ///
    /// assert!(PropertyType::Undefined.accepts(PropertyType::Boolean));
    /// assert!(PropertyType::Name.accepts(PropertyType::Name));
    /// assert!(!PropertyType::Name.accepts(PropertyType::String));
    /// ```
    #[must_use]
    pub fn accepts(self, actual: PropertyType) -> bool {
        self == Self::Undefined || self == actual
    }

    /// Parses a type name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "undefined" => Some(Self::Undefined),
            "string" => Some(Self::String),
            "name" => Some(Self::Name),
            "path" => Some(Self::Path),
            "boolean" => Some(Self::Boolean),
            "long" => Some(Self::Long),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "Undefined",
            Self::String => "String",
            Self::Name => "Name",
            Self::Path => "Path",
            Self::Boolean => "Boolean",
            Self::Long => "Long",
            Self::Date => "Date",
        };
        write!(f, "{name}")
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// String value.
    String(String),
    /// Name value.
    Name(String),
    /// Path value.
    Path(String),
    /// Boolean value.
    Boolean(bool),
    /// Long value.
    Long(i64),
    /// Date value.
    Date(DateTime<Utc>),
}

impl Value {
    /// Creates a string value.
    pub fn string<S: Into<String>>(s: S) -> Self {
        Self::String(s.into())
    }

    /// Creates a name value.
    pub fn name<S: Into<String>>(s: S) -> Self {
        Self::Name(s.into())
    }

    /// Creates a path value.
    pub fn path<S: Into<String>>(s: S) -> Self {
        Self::Path(s.into())
    }

    /// Returns the type of this value.
    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::String(_) => PropertyType::String,
            Self::Name(_) => PropertyType::Name,
            Self::Path(_) => PropertyType::Path,
            Self::Boolean(_) => PropertyType::Boolean,
            Self::Long(_) => PropertyType::Long,
            Self::Date(_) => PropertyType::Date,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Name(s) | Self::Path(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Long(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.to_rfc3339()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while reading or interpreting case data.
///
/// Validation failures a user can fix are not errors: they are returned
/// as message lists by the rules in `validation`. These variants cover
/// data the service cannot work with at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A fixed-list field held a value outside its list.
    InvalidOption {
        /// The field or list name.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A state name is not part of the case type.
    UnknownState(String),
    /// A case reference is not 16 digits with a valid check digit.
    InvalidCaseReference(String),
    /// The case data map could not be read into the typed model.
    MalformedCaseData {
        /// The underlying serde message.
        message: String,
    },
    /// A value the operation depends on is missing.
    MissingField {
        /// The wire key of the missing field.
        field: &'static str,
    },
    /// Date arithmetic overflowed.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A field id is not part of the case definition.
    UnknownField(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOption { field, value } => {
                write!(f, "'{value}' is not a valid value for {field}")
            }
            Self::UnknownState(state) => write!(f, "Unknown case state '{state}'"),
            Self::InvalidCaseReference(reference) => {
                write!(f, "Invalid case reference '{reference}'")
            }
            Self::MalformedCaseData { message } => {
                write!(f, "Case data could not be read: {message}")
            }
            Self::MissingField { field } => write!(f, "Required field {field} is missing"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::UnknownField(field) => write!(f, "Unknown case field '{field}'"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedCaseData {
            message: err.to_string(),
        }
    }
}

// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for protocodec.
//!
//! Provides the decode failure taxonomy:
//! - Schema registration and lookup failures
//! - Wire-format truncation and malformed varints
//! - Enum value mismatches between schema and data
//!
//! Clean buffer exhaustion is not an error. The decoder returns `Ok` when a
//! message's bytes are fully consumed, so callers can never mistake a normal
//! end-of-message for a failure.

use std::fmt;

/// Errors that can occur while registering schemas or decoding wire data.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Parse error in schema or wire data
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Invalid schema shape (duplicate field number, empty name, ...)
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Requested message or enum type absent from the registry
    TypeNotFound {
        /// Owning package of the missing type
        package: String,
        /// Type name that was not found
        type_name: String,
    },

    /// Wire integer with no symbolic mapping in the enum descriptor
    UnknownEnumValue {
        /// Enum type name
        enum_name: String,
        /// The integer read from the wire
        value: u64,
    },

    /// Buffer shorter than the wire format requires
    Truncated {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the short read occurred
        cursor_pos: usize,
    },

    /// Unsupported wire construct (deprecated group wire types, ...)
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(package: impl Into<String>, type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            package: package.into(),
            type_name: type_name.into(),
        }
    }

    /// Create an "unknown enum value" error.
    pub fn unknown_enum_value(enum_name: impl Into<String>, value: u64) -> Self {
        CodecError::UnknownEnumValue {
            enum_name: enum_name.into(),
            value,
        }
    }

    /// Create a truncated buffer error.
    pub fn truncated(requested: usize, available: usize, cursor_pos: usize) -> Self {
        CodecError::Truncated {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Check whether this error is the truncation failure.
    ///
    /// Callers that probe partially captured buffers use this to separate
    /// corrupt input from schema problems.
    pub fn is_truncated(&self) -> bool {
        matches!(self, CodecError::Truncated { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::TypeNotFound { package, type_name } => vec![
                ("package", package.clone()),
                ("type", type_name.clone()),
            ],
            CodecError::UnknownEnumValue { enum_name, value } => vec![
                ("enum", enum_name.clone()),
                ("value", value.to_string()),
            ],
            CodecError::Truncated {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            CodecError::TypeNotFound { package, type_name } => {
                write!(f, "Type not found: '{package}.{type_name}'")
            }
            CodecError::UnknownEnumValue { enum_name, value } => {
                write!(f, "Unknown value {value} for enum '{enum_name}'")
            }
            CodecError::Truncated {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Truncated buffer: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for protocodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

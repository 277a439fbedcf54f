// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! Provides a unified value representation for dynamically decoded Protobuf
//! messages. All variants are serde-serializable so a decoded tree can be
//! handed straight to downstream format producers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type alias for a decoded message as field name -> value mapping.
pub type DecodedMessage = HashMap<String, CodecValue>;

/// Unified value type for dynamically decoded messages.
///
/// This enum represents everything the wire decoder can produce: scalars,
/// symbolic enum names (as [`CodecValue::String`]), repeated-field sequences,
/// nested submessages, and map fields. It is serde-serializable and designed
/// for easy conversion to other value types.
///
/// # Design Principles
///
/// - **Serde support**: All variants are serializable for downstream processing
/// - **Owned types**: Uses owned `String` and `Vec<u8>` for clarity and simplicity
/// - **Closed set**: Exhaustive matching over every wire-representable shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    // Boolean
    Bool(bool),

    // Signed integers
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt32(u32),
    UInt64(u64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // String (UTF-8); also carries symbolic enum names
    String(String),

    // Binary data (length-prefixed byte runs)
    Bytes(Vec<u8>),

    // Repeated field, in wire encounter order
    Array(Vec<CodecValue>),

    // Nested submessage
    Struct(DecodedMessage),

    // Map field, keyed by the canonical string rendering of the wire key
    Map(HashMap<String, CodecValue>),

    // Absent map-entry value
    Null,
}

impl CodecValue {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CodecValue::Int32(_)
                | CodecValue::Int64(_)
                | CodecValue::UInt32(_)
                | CodecValue::UInt64(_)
                | CodecValue::Float32(_)
                | CodecValue::Float64(_)
        )
    }

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CodecValue::Int32(_)
                | CodecValue::Int64(_)
                | CodecValue::UInt32(_)
                | CodecValue::UInt64(_)
        )
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, CodecValue::Float32(_) | CodecValue::Float64(_))
    }

    /// Check if this value is a container type (array, struct, or map).
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            CodecValue::Array(_) | CodecValue::Struct(_) | CodecValue::Map(_)
        )
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CodecValue::Null)
    }

    // ========================================================================
    // Type Conversion Methods
    // ========================================================================

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int32(v) => Some(*v as f64),
            CodecValue::Int64(v) => Some(*v as f64),
            CodecValue::UInt32(v) => Some(*v as f64),
            CodecValue::UInt64(v) => Some(*v as f64),
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodecValue::Int32(v) => Some(*v as i64),
            CodecValue::Int64(v) => Some(*v),
            CodecValue::UInt32(v) => Some(*v as i64),
            CodecValue::UInt64(v) => {
                if *v <= i64::MAX as u64 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Try to convert this value to u64 (for non-negative integers only).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CodecValue::UInt32(v) => Some(*v as u64),
            CodecValue::UInt64(v) => Some(*v),
            CodecValue::Int32(v) => {
                if *v >= 0 {
                    Some(*v as u64)
                } else {
                    None
                }
            }
            CodecValue::Int64(v) => {
                if *v >= 0 {
                    Some(*v as u64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CodecValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<CodecValue>> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get the inner map.
    pub fn as_map(&self) -> Option<&HashMap<String, CodecValue>> {
        match self {
            CodecValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner map.
    pub fn as_map_mut(&mut self) -> Option<&mut HashMap<String, CodecValue>> {
        match self {
            CodecValue::Map(m) => Some(m),
            _ => None,
        }
    }

    // ========================================================================
    // Codec-Specific Helpers
    // ========================================================================

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Bool(_) => "bool",
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt32(_) => "uint32",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float32(_) => "float",
            CodecValue::Float64(_) => "double",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
            CodecValue::Map(_) => "map",
            CodecValue::Null => "null",
        }
    }

    /// Render this value as a canonical map key.
    ///
    /// The generic value type keys maps by string, so non-string wire keys
    /// (bool and integer kinds) are converted to their decimal/`true`/`false`
    /// rendering. Returns `None` for values that are not valid protobuf map
    /// key kinds (floats, bytes, containers).
    pub fn as_map_key(&self) -> Option<String> {
        match self {
            CodecValue::String(s) => Some(s.clone()),
            CodecValue::Bool(v) => Some(v.to_string()),
            CodecValue::Int32(v) => Some(v.to_string()),
            CodecValue::Int64(v) => Some(v.to_string()),
            CodecValue::UInt32(v) => Some(v.to_string()),
            CodecValue::UInt64(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

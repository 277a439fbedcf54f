// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Descriptor types for runtime-loaded Protobuf schemas.
//!
//! These types are the tree shape produced by an external `.proto` parser.
//! The registry consumes them as-is; the decoder never sees schema syntax.

use std::collections::HashMap;

/// Scalar protobuf field kinds supported by the dynamic decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Boolean (varint, `1` is true)
    Bool,
    /// 32-bit signed integer (varint)
    Int32,
    /// 64-bit signed integer (varint)
    Int64,
    /// 32-bit unsigned integer (varint)
    UInt32,
    /// 64-bit unsigned integer (varint)
    UInt64,
    /// 32-bit IEEE-754 float (fixed32)
    Float,
    /// 64-bit IEEE-754 float (fixed64)
    Double,
    /// UTF-8 string (length-prefixed)
    String,
    /// Raw bytes (length-prefixed)
    Bytes,
}

impl ScalarKind {
    /// Parse a scalar kind from its `.proto` type name.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(ScalarKind::Bool),
            "int32" | "sint32" => Some(ScalarKind::Int32),
            "int64" | "sint64" => Some(ScalarKind::Int64),
            "uint32" => Some(ScalarKind::UInt32),
            "uint64" => Some(ScalarKind::UInt64),
            "float" => Some(ScalarKind::Float),
            "double" => Some(ScalarKind::Double),
            "string" => Some(ScalarKind::String),
            "bytes" => Some(ScalarKind::Bytes),
            _ => None,
        }
    }

    /// The `.proto` type name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::UInt64 => "uint64",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
        }
    }

    /// Check whether this kind is a valid protobuf map key kind.
    ///
    /// Map keys can be any integral or string kind, never floats or bytes.
    pub fn is_valid_map_key(self) -> bool {
        !matches!(self, ScalarKind::Float | ScalarKind::Double | ScalarKind::Bytes)
    }
}

/// Declared type of a field.
///
/// A closed set: dispatch in the decoder is an exhaustive `match`, so adding
/// a kind forces every decode path to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Scalar kind
    Scalar(ScalarKind),
    /// Reference to an enum type in the same package
    Enum(String),
    /// Reference to a message type in the same package
    Message(String),
    /// Map field with a scalar key and any value kind
    Map {
        /// Key kind (integral or string)
        key: ScalarKind,
        /// Value kind
        value: Box<FieldKind>,
    },
}

/// Whether a field holds one value or a sequence.
///
/// Map fields are `Singular`; their repetition lives in the wire-level
/// entry occurrences, not in the decoded value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one value
    Singular,
    /// Ordered sequence of values
    Repeated,
}

/// A single field declaration inside a message.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, unique within its message
    pub name: String,
    /// Field number, the wire tag
    pub number: u32,
    /// Singular or repeated
    pub cardinality: Cardinality,
    /// Declared type
    pub kind: FieldKind,
    /// Name of the enclosing oneof group, if any
    pub oneof: Option<String>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(
        name: impl Into<String>,
        number: u32,
        cardinality: Cardinality,
        kind: FieldKind,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            cardinality,
            kind,
            oneof: None,
        }
    }

    /// Mark this field as a member of a oneof group.
    pub fn with_oneof(mut self, group: impl Into<String>) -> Self {
        self.oneof = Some(group.into());
        self
    }

    /// Check whether this field is repeated.
    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }
}

/// A message type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    /// Owning package (e.g., "test")
    pub package: String,
    /// Message name (e.g., "Test" or a synthesized "Test.field.Entry")
    pub name: String,
    /// Ordered list of fields
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Create a new message descriptor with no fields.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to this message.
    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Look up a field by its wire tag number.
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Look up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An enum type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Owning package
    pub package: String,
    /// Enum name
    pub name: String,
    /// Integer value -> symbolic name; values need not be contiguous
    values: HashMap<i32, String>,
}

impl EnumDescriptor {
    /// Create a new enum descriptor with no values.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Add a value to this enum.
    pub fn add_value(&mut self, number: i32, symbol: impl Into<String>) {
        self.values.insert(number, symbol.into());
    }

    /// Look up the symbolic name for a wire integer.
    pub fn name_of(&self, number: i32) -> Option<&str> {
        self.values.get(&number).map(String::as_str)
    }

    /// Number of declared values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether this enum has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parsed schema file: one package with its message and enum declarations.
///
/// This is the registry-population input produced by the external schema-text
/// parser. The registry consumes exactly this shape, independent of the
/// originating file syntax.
#[derive(Debug, Clone, Default)]
pub struct ProtoFile {
    /// Package declared by the file (empty string for none)
    pub package: String,
    /// Top-level message declarations
    pub messages: Vec<MessageDescriptor>,
    /// Top-level enum declarations
    pub enums: Vec<EnumDescriptor>,
}

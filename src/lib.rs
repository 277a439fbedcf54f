// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Protocodec
//!
//! Schema-driven dynamic decoder for the Protobuf wire format.
//!
//! This library decodes length-delimited, tag-based binary messages into a
//! generic value tree without any compiled/generated message types. Schemas
//! are supplied at runtime as descriptor trees and held in a
//! [`SchemaRegistry`](crate::schema::SchemaRegistry); the decoder resolves
//! every wire tag against the registry while making a single linear pass
//! over the buffer.
//!
//! The library is organized into three modules:
//! - `core/` - Error and value types shared by all components
//! - `schema/` - Message/enum/field descriptors and the schema registry
//! - `encoding/` - The Protobuf wire cursor and the recursive decoder
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use protocodec::encoding::protobuf::ProtobufDecoder;
//! use protocodec::schema::{
//!     Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, ScalarKind, SchemaRegistry,
//! };
//! use protocodec::CodecValue;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(SchemaRegistry::new());
//! let mut message = MessageDescriptor::new("test", "Test");
//! message.add_field(FieldDescriptor::new(
//!     "field_int32",
//!     1,
//!     Cardinality::Singular,
//!     FieldKind::Scalar(ScalarKind::Int32),
//! ));
//! registry.add_message("test", "Test", message)?;
//!
//! // Field 1, varint wire type, value 42
//! let data = [0x08, 0x2A];
//! let decoder = ProtobufDecoder::new(registry);
//! let decoded = decoder.decode("test", "Test", &data)?;
//! assert_eq!(decoded.get("field_int32"), Some(&CodecValue::Int32(42)));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, CodecValue, DecodedMessage, Result};

// Schema descriptors and registry
pub mod schema;

pub use schema::{
    Cardinality, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor, ProtoFile,
    ScalarKind, SchemaRegistry,
};

// Encoding/decoding
pub mod encoding;

pub use encoding::protobuf::ProtobufDecoder;

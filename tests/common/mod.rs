// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! Hand-rolled wire-format writers (encoding is out of scope for the
//! library itself) plus schema-building shorthands.

#![allow(dead_code)]

use std::sync::Arc;

use protocodec::schema::{
    Cardinality, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor, ScalarKind,
    SchemaRegistry,
};

// ============================================================================
// Wire writers
// ============================================================================

/// Encode a base-128 varint.
pub fn varint(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
    out
}

/// Encode a tag from field number and wire type bits.
pub fn tag(field_number: u32, wire_type: u8) -> Vec<u8> {
    varint(((field_number as u64) << 3) | wire_type as u64)
}

/// Encode a varint-typed field occurrence.
pub fn varint_field(field_number: u32, value: u64) -> Vec<u8> {
    let mut out = tag(field_number, 0);
    out.extend(varint(value));
    out
}

/// Encode a length-prefixed field occurrence.
pub fn len_field(field_number: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = tag(field_number, 2);
    out.extend(varint(payload.len() as u64));
    out.extend_from_slice(payload);
    out
}

/// Encode a string field occurrence.
pub fn string_field(field_number: u32, value: &str) -> Vec<u8> {
    len_field(field_number, value.as_bytes())
}

/// Encode a fixed32 field occurrence.
pub fn fixed32_field(field_number: u32, bits: u32) -> Vec<u8> {
    let mut out = tag(field_number, 5);
    out.extend_from_slice(&bits.to_le_bytes());
    out
}

/// Encode a fixed64 field occurrence.
pub fn fixed64_field(field_number: u32, bits: u64) -> Vec<u8> {
    let mut out = tag(field_number, 1);
    out.extend_from_slice(&bits.to_le_bytes());
    out
}

/// Encode a packed run of varints under one tag.
pub fn packed_varints(field_number: u32, values: &[u64]) -> Vec<u8> {
    let mut payload = Vec::new();
    for v in values {
        payload.extend(varint(*v));
    }
    len_field(field_number, &payload)
}

/// Encode one map entry occurrence with varint key and value.
pub fn map_entry_varints(field_number: u32, key: u64, value: u64) -> Vec<u8> {
    let mut entry = varint_field(1, key);
    entry.extend(varint_field(2, value));
    len_field(field_number, &entry)
}

/// Encode one map entry occurrence with string key and varint value.
pub fn map_entry_string_varint(field_number: u32, key: &str, value: u64) -> Vec<u8> {
    let mut entry = string_field(1, key);
    entry.extend(varint_field(2, value));
    len_field(field_number, &entry)
}

// ============================================================================
// Schema shorthands
// ============================================================================

/// Build a singular scalar field descriptor.
pub fn scalar(name: &str, number: u32, kind: ScalarKind) -> FieldDescriptor {
    FieldDescriptor::new(name, number, Cardinality::Singular, FieldKind::Scalar(kind))
}

/// Build a repeated scalar field descriptor.
pub fn repeated_scalar(name: &str, number: u32, kind: ScalarKind) -> FieldDescriptor {
    FieldDescriptor::new(name, number, Cardinality::Repeated, FieldKind::Scalar(kind))
}

/// Build a singular message-typed field descriptor.
pub fn message_field(name: &str, number: u32, type_name: &str) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        number,
        Cardinality::Singular,
        FieldKind::Message(type_name.to_string()),
    )
}

/// Build a repeated message-typed field descriptor.
pub fn repeated_message_field(name: &str, number: u32, type_name: &str) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        number,
        Cardinality::Repeated,
        FieldKind::Message(type_name.to_string()),
    )
}

/// Build a map field descriptor.
pub fn map_field(name: &str, number: u32, key: ScalarKind, value: FieldKind) -> FieldDescriptor {
    FieldDescriptor::new(
        name,
        number,
        Cardinality::Singular,
        FieldKind::Map {
            key,
            value: Box::new(value),
        },
    )
}

/// Build a registry holding the given messages and enums under package "test".
pub fn test_registry(
    messages: Vec<MessageDescriptor>,
    enums: Vec<EnumDescriptor>,
) -> Arc<SchemaRegistry> {
    let registry = Arc::new(SchemaRegistry::new());
    for message in messages {
        let name = message.name.clone();
        registry.add_message("test", name, message).unwrap();
    }
    for enum_type in enums {
        let name = enum_type.name.clone();
        registry.add_enum("test", name, enum_type).unwrap();
    }
    registry
}

/// Build a message descriptor under package "test".
pub fn test_message(name: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    let mut message = MessageDescriptor::new("test", name);
    for field in fields {
        message.add_field(field);
    }
    message
}

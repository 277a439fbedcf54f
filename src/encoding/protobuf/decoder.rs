// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven Protobuf wire decoder.
//!
//! Decodes one message occurrence per invocation: a single linear pass that
//! reads tag/value pairs, resolves each field number against the registry,
//! and accumulates decoded values by field name. Submessages and map entries
//! recurse over borrowed sub-slices of the original buffer.
//!
//! Running out of bytes at a tag boundary is the normal end of a message,
//! including for nested decodes whose sub-slice has been fully consumed; it
//! surfaces as `Ok`, never as an error. Genuine truncation (a short read
//! inside a value) fails with [`CodecError::Truncated`] and propagates
//! through every enclosing decode.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::error::{CodecError, Result};
use crate::core::value::{CodecValue, DecodedMessage};
use crate::schema::ast::{
    Cardinality, FieldDescriptor, FieldKind, MessageDescriptor, ScalarKind,
};
use crate::schema::registry::SchemaRegistry;

use super::cursor::{WireCursor, WireType};

/// Field number of the synthesized map-entry key field.
const MAP_ENTRY_KEY_NUMBER: u32 = 1;
/// Field number of the synthesized map-entry value field.
const MAP_ENTRY_VALUE_NUMBER: u32 = 2;

/// Dynamic Protobuf decoder backed by a shared schema registry.
///
/// Holds only an `Arc` to the registry, so one decoder (or many) can run
/// concurrent decodes against the same schema set.
pub struct ProtobufDecoder {
    registry: Arc<SchemaRegistry>,
}

impl ProtobufDecoder {
    /// Create a new decoder over a populated registry.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// The schema registry backing this decoder.
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Decode one message occurrence.
    ///
    /// # Arguments
    ///
    /// * `package` - Owning package of the message type
    /// * `type_name` - Message type name within the package
    /// * `data` - The wire-format bytes of exactly one message occurrence
    ///
    /// Returns the accumulated field map once the buffer is cleanly
    /// exhausted. Fails with [`CodecError::TypeNotFound`] for an
    /// unregistered type, [`CodecError::UnknownEnumValue`] for a wire
    /// integer with no symbolic mapping, and [`CodecError::Truncated`] for
    /// a buffer shorter than the format requires.
    pub fn decode(&self, package: &str, type_name: &str, data: &[u8]) -> Result<DecodedMessage> {
        let message = self
            .registry
            .message(package, type_name)?
            .ok_or_else(|| CodecError::type_not_found(package, type_name))?;

        let mut cursor = WireCursor::new(data);
        let mut result = DecodedMessage::new();

        while !cursor.is_empty() {
            let (field_number, wire_type) = cursor.read_tag()?;

            let Some(field) = message.field_by_number(field_number) else {
                // Unknown field numbers are skipped, not fatal; the value
                // bytes are consumed to keep the stream in sync but are not
                // preserved.
                debug!(
                    message = %message.name,
                    field_number,
                    "skipping unknown field"
                );
                skip_value(wire_type, &mut cursor)?;
                continue;
            };

            if let Some(group) = &field.oneof {
                // Oneof merge semantics are unresolved. The value is decoded
                // so the stream stays aligned, then discarded.
                let mut scratch = DecodedMessage::new();
                self.decode_field(&message, field, wire_type, &mut cursor, &mut scratch)?;
                warn!(
                    message = %message.name,
                    field = %field.name,
                    oneof = %group,
                    "discarding unhandled oneof field value"
                );
                continue;
            }

            self.decode_field(&message, field, wire_type, &mut cursor, &mut result)?;
        }

        Ok(result)
    }

    /// Decode one tagged value and fold it into the result map.
    ///
    /// Dispatch is on the declared field kind; the wire type only selects
    /// between packed and one-tag-per-value encodings of repeated scalars.
    fn decode_field(
        &self,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        wire_type: WireType,
        cursor: &mut WireCursor<'_>,
        result: &mut DecodedMessage,
    ) -> Result<()> {
        match &field.kind {
            FieldKind::Scalar(kind) => {
                self.decode_scalar(field, *kind, wire_type, cursor, result)
            }
            FieldKind::Enum(enum_name) => {
                self.decode_enum(&message.package, field, enum_name, wire_type, cursor, result)
            }
            FieldKind::Message(type_name) => {
                self.decode_submessage(&message.package, field, type_name, cursor, result)
            }
            FieldKind::Map { key, value } => {
                self.decode_map_entry(message, field, *key, value, cursor, result)
            }
        }
    }

    /// Decode a scalar field value (or one packed run of them).
    fn decode_scalar(
        &self,
        field: &FieldDescriptor,
        kind: ScalarKind,
        wire_type: WireType,
        cursor: &mut WireCursor<'_>,
        result: &mut DecodedMessage,
    ) -> Result<()> {
        match kind {
            ScalarKind::String => {
                let bytes = cursor.read_length_prefixed()?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| CodecError::parse("string utf8", e.to_string()))?;
                add(result, field, CodecValue::String(text.to_string()));
                Ok(())
            }
            ScalarKind::Bytes => {
                let bytes = cursor.read_length_prefixed()?;
                add(result, field, CodecValue::Bytes(bytes.to_vec()));
                Ok(())
            }
            ScalarKind::Bool
            | ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::UInt32
            | ScalarKind::UInt64 => {
                if field.is_repeated() && wire_type == WireType::LengthDelimited {
                    // Packed encoding: one run of concatenated varints.
                    let run = cursor.read_length_prefixed()?;
                    let mut packed = WireCursor::new(run);
                    while !packed.is_empty() {
                        let raw = packed.read_varint()?;
                        add(result, field, varint_value(kind, raw));
                    }
                } else {
                    let raw = cursor.read_varint()?;
                    add(result, field, varint_value(kind, raw));
                }
                Ok(())
            }
            ScalarKind::Float => {
                if field.is_repeated() && wire_type == WireType::LengthDelimited {
                    let run = cursor.read_length_prefixed()?;
                    let mut packed = WireCursor::new(run);
                    while !packed.is_empty() {
                        let bits = packed.read_fixed32()?;
                        add(result, field, CodecValue::Float32(f32::from_bits(bits)));
                    }
                } else {
                    let bits = cursor.read_fixed32()?;
                    add(result, field, CodecValue::Float32(f32::from_bits(bits)));
                }
                Ok(())
            }
            ScalarKind::Double => {
                if field.is_repeated() && wire_type == WireType::LengthDelimited {
                    let run = cursor.read_length_prefixed()?;
                    let mut packed = WireCursor::new(run);
                    while !packed.is_empty() {
                        let bits = packed.read_fixed64()?;
                        add(result, field, CodecValue::Float64(f64::from_bits(bits)));
                    }
                } else {
                    let bits = cursor.read_fixed64()?;
                    add(result, field, CodecValue::Float64(f64::from_bits(bits)));
                }
                Ok(())
            }
        }
    }

    /// Decode an enum-typed field into its symbolic name.
    fn decode_enum(
        &self,
        package: &str,
        field: &FieldDescriptor,
        enum_name: &str,
        wire_type: WireType,
        cursor: &mut WireCursor<'_>,
        result: &mut DecodedMessage,
    ) -> Result<()> {
        let descriptor = self
            .registry
            .enum_type(package, enum_name)?
            .ok_or_else(|| CodecError::type_not_found(package, enum_name))?;

        let resolve = |raw: u64| -> Result<CodecValue> {
            descriptor
                .name_of(raw as i32)
                .map(|symbol| CodecValue::String(symbol.to_string()))
                .ok_or_else(|| CodecError::unknown_enum_value(enum_name, raw))
        };

        if field.is_repeated() && wire_type == WireType::LengthDelimited {
            let run = cursor.read_length_prefixed()?;
            let mut packed = WireCursor::new(run);
            while !packed.is_empty() {
                let value = resolve(packed.read_varint()?)?;
                add(result, field, value);
            }
        } else {
            let value = resolve(cursor.read_varint()?)?;
            add(result, field, value);
        }
        Ok(())
    }

    /// Decode a message-typed field by recursing on its length-prefixed run.
    ///
    /// Each occurrence of a repeated submessage carries its own tag and run
    /// and appends one element in encounter order.
    fn decode_submessage(
        &self,
        package: &str,
        field: &FieldDescriptor,
        type_name: &str,
        cursor: &mut WireCursor<'_>,
        result: &mut DecodedMessage,
    ) -> Result<()> {
        let run = cursor.read_length_prefixed()?;
        let nested = self.decode(package, type_name, run)?;
        add(result, field, CodecValue::Struct(nested));
        Ok(())
    }

    /// Decode one wire-level map entry and fold it into the field's mapping.
    ///
    /// A map entry is structurally a two-field message (`key` = 1,
    /// `value` = 2). The entry descriptor is synthesized on first use and
    /// registered idempotently, so repeated entries and concurrent decodes
    /// share one descriptor. Later occurrences of the same key overwrite
    /// earlier ones.
    fn decode_map_entry(
        &self,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        key_kind: ScalarKind,
        value_kind: &FieldKind,
        cursor: &mut WireCursor<'_>,
        result: &mut DecodedMessage,
    ) -> Result<()> {
        let entry_name = format!("{}.{}.Entry", message.name, field.name);

        if !key_kind.is_valid_map_key() {
            return Err(CodecError::invalid_schema(
                &entry_name,
                format!("map key kind '{}' is not keyable", key_kind.as_str()),
            ));
        }

        let mut entry = MessageDescriptor::new(&message.package, &entry_name);
        entry.add_field(FieldDescriptor::new(
            "key",
            MAP_ENTRY_KEY_NUMBER,
            Cardinality::Singular,
            FieldKind::Scalar(key_kind),
        ));
        entry.add_field(FieldDescriptor::new(
            "value",
            MAP_ENTRY_VALUE_NUMBER,
            Cardinality::Singular,
            value_kind.clone(),
        ));
        self.registry
            .add_message_if_absent(&message.package, &entry_name, entry)?;

        let run = cursor.read_length_prefixed()?;
        let mut pair = self.decode(&message.package, &entry_name, run)?;

        // A zero-valued key or value may be absent from the wire.
        let key = pair
            .remove("key")
            .unwrap_or_else(|| default_scalar(key_kind))
            .as_map_key()
            .ok_or_else(|| {
                CodecError::invalid_schema(
                    &entry_name,
                    format!("map key kind '{}' is not keyable", key_kind.as_str()),
                )
            })?;
        let value = pair.remove("value").unwrap_or(CodecValue::Null);

        match result
            .entry(field.name.clone())
            .or_insert_with(|| CodecValue::Map(HashMap::new()))
            .as_map_mut()
        {
            Some(map) => {
                map.insert(key, value);
                Ok(())
            }
            None => Err(CodecError::Other(format!(
                "field '{}' holds a non-map value",
                field.name
            ))),
        }
    }
}

/// Fold a decoded value into the result per the field's cardinality.
///
/// Repeated occurrences of one field number collect into a single array in
/// encounter order; a singular field keeps its last occurrence.
fn add(result: &mut DecodedMessage, field: &FieldDescriptor, value: CodecValue) {
    if field.is_repeated() {
        match result
            .entry(field.name.clone())
            .or_insert_with(|| CodecValue::Array(Vec::new()))
            .as_array_mut()
        {
            Some(array) => array.push(value),
            None => {
                // Field changed shape mid-stream; keep the latest value.
                result.insert(field.name.clone(), CodecValue::Array(vec![value]));
            }
        }
    } else {
        result.insert(field.name.clone(), value);
    }
}

/// Convert a raw varint to the declared scalar kind.
///
/// Negative int32/int64 values arrive as sign-extended 64-bit varints, so
/// plain truncating casts reproduce the declared-width value.
fn varint_value(kind: ScalarKind, raw: u64) -> CodecValue {
    match kind {
        ScalarKind::Bool => CodecValue::Bool(raw == 1),
        ScalarKind::Int32 => CodecValue::Int32(raw as i32),
        ScalarKind::Int64 => CodecValue::Int64(raw as i64),
        ScalarKind::UInt32 => CodecValue::UInt32(raw as u32),
        ScalarKind::UInt64 => CodecValue::UInt64(raw),
        // Length-prefixed and fixed-width kinds never reach here.
        ScalarKind::Float
        | ScalarKind::Double
        | ScalarKind::String
        | ScalarKind::Bytes => CodecValue::Null,
    }
}

/// Zero value of a scalar kind, for map entries whose key was omitted.
fn default_scalar(kind: ScalarKind) -> CodecValue {
    match kind {
        ScalarKind::Bool => CodecValue::Bool(false),
        ScalarKind::Int32 => CodecValue::Int32(0),
        ScalarKind::Int64 => CodecValue::Int64(0),
        ScalarKind::UInt32 => CodecValue::UInt32(0),
        ScalarKind::UInt64 => CodecValue::UInt64(0),
        ScalarKind::Float => CodecValue::Float32(0.0),
        ScalarKind::Double => CodecValue::Float64(0.0),
        ScalarKind::String => CodecValue::String(String::new()),
        ScalarKind::Bytes => CodecValue::Bytes(Vec::new()),
    }
}

/// Skip the value of an unrecognized field number by wire type.
fn skip_value(wire_type: WireType, cursor: &mut WireCursor<'_>) -> Result<()> {
    match wire_type {
        WireType::Varint => {
            cursor.read_varint()?;
        }
        WireType::Fixed64 => {
            cursor.read_fixed64()?;
        }
        WireType::LengthDelimited => {
            cursor.read_length_prefixed()?;
        }
        WireType::Fixed32 => {
            cursor.read_fixed32()?;
        }
        WireType::StartGroup | WireType::EndGroup => {
            return Err(CodecError::unsupported("group wire type (deprecated)"));
        }
    }
    Ok(())
}

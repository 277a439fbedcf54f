// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema descriptors and the runtime schema registry.
//!
//! Descriptors arrive as a parsed declaration tree ([`ProtoFile`]) from an
//! external schema-text parser and are held by the [`SchemaRegistry`] for
//! `(package, type-name)` lookup during decoding.

pub mod ast;
pub mod registry;

pub use ast::{
    Cardinality, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor, ProtoFile,
    ScalarKind,
};
pub use registry::SchemaRegistry;

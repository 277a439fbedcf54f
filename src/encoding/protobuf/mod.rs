// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf wire-format support.
//!
//! - [`cursor`] - Bounds-checked reader over a borrowed wire buffer
//! - [`decoder`] - Recursive schema-driven message decoder

pub mod cursor;
pub mod decoder;

pub use cursor::{WireCursor, WireType};
pub use decoder::ProtobufDecoder;

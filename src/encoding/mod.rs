// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec implementations.
//!
//! Currently one codec: the dynamic Protobuf wire decoder. Encoding is out
//! of scope; buffers arrive already serialized.

pub mod protobuf;

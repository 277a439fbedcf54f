// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Thread-safe registry of message and enum descriptors.
//!
//! The registry is populated once from parsed schema files and then shared
//! read-only across decode invocations. The one write path that runs during
//! decoding is map-entry synthesis, which goes through the idempotent
//! [`SchemaRegistry::add_message_if_absent`] so concurrent first use is safe.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::error::{CodecError, Result};
use crate::schema::ast::{EnumDescriptor, MessageDescriptor, ProtoFile};

/// Registry of descriptors keyed by `(package, type-name)`.
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Suitable for sharing behind an `Arc` across multiple decoder instances.
pub struct SchemaRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    messages: HashMap<String, Arc<MessageDescriptor>>,
    enums: HashMap<String, Arc<EnumDescriptor>>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
        }
    }

    /// Register all declarations of a parsed schema file.
    pub fn add_file(&self, file: ProtoFile) -> Result<()> {
        let package = file.package;
        for message in file.messages {
            let name = message.name.clone();
            self.add_message(&package, name, message)?;
        }
        for enum_type in file.enums {
            let name = enum_type.name.clone();
            self.add_enum(&package, name, enum_type)?;
        }
        Ok(())
    }

    /// Look up a message descriptor.
    pub fn message(&self, package: &str, name: &str) -> Result<Option<Arc<MessageDescriptor>>> {
        let inner = self.read_lock()?;
        Ok(inner.messages.get(&qualify(package, name)).cloned())
    }

    /// Look up an enum descriptor.
    pub fn enum_type(&self, package: &str, name: &str) -> Result<Option<Arc<EnumDescriptor>>> {
        let inner = self.read_lock()?;
        Ok(inner.enums.get(&qualify(package, name)).cloned())
    }

    /// Check whether a message type is registered.
    pub fn contains_message(&self, package: &str, name: &str) -> Result<bool> {
        let inner = self.read_lock()?;
        Ok(inner.messages.contains_key(&qualify(package, name)))
    }

    /// Register a message descriptor, inserting or replacing.
    pub fn add_message(
        &self,
        package: &str,
        name: impl Into<String>,
        descriptor: MessageDescriptor,
    ) -> Result<()> {
        let mut inner = self.write_lock()?;
        inner
            .messages
            .insert(qualify(package, &name.into()), Arc::new(descriptor));
        Ok(())
    }

    /// Register a message descriptor only if the name is not yet taken.
    ///
    /// Used for synthesized map-entry descriptors: first use wins and every
    /// later synthesis of the same entry type is a no-op, so concurrent
    /// decodes may race here without harm.
    pub fn add_message_if_absent(
        &self,
        package: &str,
        name: impl Into<String>,
        descriptor: MessageDescriptor,
    ) -> Result<Arc<MessageDescriptor>> {
        let key = qualify(package, &name.into());
        let mut inner = self.write_lock()?;
        Ok(inner
            .messages
            .entry(key)
            .or_insert_with(|| Arc::new(descriptor))
            .clone())
    }

    /// Register an enum descriptor, inserting or replacing.
    pub fn add_enum(
        &self,
        package: &str,
        name: impl Into<String>,
        descriptor: EnumDescriptor,
    ) -> Result<()> {
        let mut inner = self.write_lock()?;
        inner
            .enums
            .insert(qualify(package, &name.into()), Arc::new(descriptor));
        Ok(())
    }

    /// Get all registered message names, fully qualified.
    pub fn message_names(&self) -> Result<Vec<String>> {
        let inner = self.read_lock()?;
        Ok(inner.messages.keys().cloned().collect())
    }

    /// Get the number of registered message types.
    pub fn len(&self) -> Result<usize> {
        let inner = self.read_lock()?;
        Ok(inner.messages.len())
    }

    /// Check if the registry holds no message types.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, RegistryInner>> {
        self.inner
            .read()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, RegistryInner>> {
        self.inner
            .write()
            .map_err(|e| CodecError::Other(format!("Registry lock poisoned: {e}")))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `(package, name)` lookup key.
///
/// An empty package qualifies to the bare name so schemas without a package
/// declaration still resolve.
fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ast::{Cardinality, FieldDescriptor, FieldKind, ScalarKind};

    fn test_message(name: &str) -> MessageDescriptor {
        let mut msg = MessageDescriptor::new("test", name);
        msg.add_field(FieldDescriptor::new(
            "value",
            1,
            Cardinality::Singular,
            FieldKind::Scalar(ScalarKind::Int32),
        ));
        msg
    }

    #[test]
    fn test_message_round_trip() {
        let registry = SchemaRegistry::new();
        registry.add_message("test", "Test", test_message("Test")).unwrap();

        let found = registry.message("test", "Test").unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "Test");
        assert!(registry.message("test", "Missing").unwrap().is_none());
        assert!(registry.message("other", "Test").unwrap().is_none());
    }

    #[test]
    fn test_enum_round_trip() {
        let registry = SchemaRegistry::new();
        let mut e = EnumDescriptor::new("test", "Color");
        e.add_value(0, "RED");
        registry.add_enum("test", "Color", e).unwrap();

        let found = registry.enum_type("test", "Color").unwrap().unwrap();
        assert_eq!(found.name_of(0), Some("RED"));
    }

    #[test]
    fn test_add_message_if_absent_is_idempotent() {
        let registry = SchemaRegistry::new();

        let first = registry
            .add_message_if_absent("test", "Test.m.Entry", test_message("Test.m.Entry"))
            .unwrap();

        // Second synthesis with a different shape must not replace the first.
        let other = MessageDescriptor::new("test", "Test.m.Entry");
        let second = registry
            .add_message_if_absent("test", "Test.m.Entry", other)
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn test_add_file() {
        let mut file = ProtoFile {
            package: "test".to_string(),
            ..Default::default()
        };
        file.messages.push(test_message("Test"));
        let mut e = EnumDescriptor::new("test", "Color");
        e.add_value(1, "BLUE");
        file.enums.push(e);

        let registry = SchemaRegistry::new();
        registry.add_file(file).unwrap();

        assert!(registry.contains_message("test", "Test").unwrap());
        assert!(registry.enum_type("test", "Color").unwrap().is_some());
    }

    #[test]
    fn test_empty_package_qualification() {
        let registry = SchemaRegistry::new();
        registry
            .add_message("", "Bare", MessageDescriptor::new("", "Bare"))
            .unwrap();
        assert!(registry.message("", "Bare").unwrap().is_some());
        assert_eq!(registry.message_names().unwrap(), vec!["Bare".to_string()]);
    }

    #[test]
    fn test_concurrent_reads() {
        let registry = Arc::new(SchemaRegistry::new());
        registry.add_message("test", "Test", test_message("Test")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(registry.message("test", "Test").unwrap().is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}

//! Field descriptors and the ordered field registry

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::FieldsError;

/// Ordered mapping of field name to descriptor
pub type FieldMap = IndexMap<String, FieldDescriptor>;

/// Description of one output-eligible field of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Name of the field as it appears in the serialized output
    pub name: String,

    /// Accepted on input, never emitted on output
    #[serde(default)]
    pub write_only: bool,

    /// Emitted on output, ignored on input
    #[serde(default)]
    pub read_only: bool,
}

impl FieldDescriptor {
    /// Create a plain read/write field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            write_only: false,
            read_only: false,
        }
    }

    /// Mark the field as write-only
    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    /// Mark the field as read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Whether the field can appear in serialized output
    pub fn is_readable(&self) -> bool {
        !self.write_only
    }
}

/// Declared fields of a resource, in declaration order
///
/// Names are unique. The registry is built once per resource type and is never
/// mutated afterwards, so it can be shared freely between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    fields: FieldMap,
}

impl FieldRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style
    ///
    /// A field with the same name replaces the previous descriptor but keeps
    /// its original position.
    pub fn with(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Add a field, rejecting duplicate names
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<(), FieldsError> {
        if self.fields.contains_key(&descriptor.name) {
            return Err(FieldsError::DuplicateField {
                name: descriptor.name,
            });
        }
        self.fields.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Build a registry from descriptors, rejecting duplicate names
    pub fn try_from_fields(
        descriptors: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Result<Self, FieldsError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All declared fields
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// The registry restricted to fields that are not write-only
    pub fn readable(&self) -> FieldMap {
        self.fields
            .iter()
            .filter(|(_, field)| field.is_readable())
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect()
    }

    /// The registry restricted to fields that are not read-only
    pub fn writable(&self) -> FieldMap {
        self.fields
            .iter()
            .filter(|(_, field)| !field.read_only)
            .map(|(name, field)| (name.clone(), field.clone()))
            .collect()
    }
}

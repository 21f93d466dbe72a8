//! Resources with dynamic field selection

use serde::Serialize;

use super::context::SerializationContext;
use super::field::FieldRegistry;
use super::selection::FieldSelection;
use super::selector::FieldSelector;

/// A serializable resource that declares its output fields
///
/// Usually implemented with [`impl_dynamic_fields!`](crate::impl_dynamic_fields).
pub trait DynamicFields: Serialize {
    /// The declared fields of this resource, in declaration order
    fn field_registry() -> &'static FieldRegistry;

    /// Start a serialization pass for this resource
    fn selection<'a>(
        selector: &'a FieldSelector,
        context: Option<&'a SerializationContext>,
    ) -> FieldSelection<'a> {
        FieldSelection::new(Self::field_registry(), selector, context)
    }
}

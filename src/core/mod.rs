//! Core module containing the field selection types

pub mod context;
pub mod error;
pub mod extractors;
pub mod field;
pub mod params;
pub mod query;
pub mod resource;
pub mod selection;
pub mod selector;

pub use context::SerializationContext;
pub use error::FieldsError;
pub use extractors::RequestContext;
pub use field::{FieldDescriptor, FieldMap, FieldRegistry};
pub use params::{HttpRequest, QueryLookup, QueryMap, RequestView, TestRequest};
pub use query::FieldDirectives;
pub use resource::DynamicFields;
pub use selection::FieldSelection;
pub use selector::FieldSelector;

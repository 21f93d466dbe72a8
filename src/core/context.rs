//! Per-request serialization context

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::params::RequestView;

/// The request-scoped data available to one serialization pass
///
/// A context normally carries the current request. A context without one
/// still works: the selector warns and shows every field.
#[derive(Clone, Default)]
pub struct SerializationContext {
    request: Option<Arc<dyn RequestView>>,
    extras: HashMap<String, Value>,
}

impl SerializationContext {
    /// A context with no request attached
    pub fn new() -> Self {
        Self::default()
    }

    /// A context carrying the given request
    pub fn for_request(request: impl RequestView + 'static) -> Self {
        Self::new().with_request(request)
    }

    /// Attach a request, builder style
    pub fn with_request(mut self, request: impl RequestView + 'static) -> Self {
        self.request = Some(Arc::new(request));
        self
    }

    /// Attach an arbitrary host value, builder style
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }

    pub fn request(&self) -> Option<&dyn RequestView> {
        self.request.as_deref()
    }

    pub fn has_request(&self) -> bool {
        self.request.is_some()
    }

    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }
}

impl std::fmt::Debug for SerializationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializationContext")
            .field("has_request", &self.has_request())
            .field("extras", &self.extras)
            .finish()
    }
}

//! One serialization pass with dynamic fields
//!
//! A [`FieldSelection`] is created when a handler starts rendering a
//! resource for a request and dropped when the response is built. The
//! readable subset and the selected fields are computed on first use and
//! cached inside the selection, so they are never shared between requests.

use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::OnceCell;

use super::context::SerializationContext;
use super::error::{FieldsError, json_kind};
use super::field::{FieldMap, FieldRegistry};
use super::selector::FieldSelector;

/// The fields to render for one serialization pass
pub struct FieldSelection<'a> {
    registry: &'a FieldRegistry,
    selector: &'a FieldSelector,
    context: Option<&'a SerializationContext>,
    readable: OnceCell<FieldMap>,
    selected: OnceCell<FieldMap>,
}

impl<'a> FieldSelection<'a> {
    pub fn new(
        registry: &'a FieldRegistry,
        selector: &'a FieldSelector,
        context: Option<&'a SerializationContext>,
    ) -> Self {
        Self {
            registry,
            selector,
            context,
            readable: OnceCell::new(),
            selected: OnceCell::new(),
        }
    }

    pub fn context(&self) -> Option<&'a SerializationContext> {
        self.context
    }

    /// Declared fields minus the write-only ones
    pub fn readable_fields(&self) -> &FieldMap {
        self.readable.get_or_init(|| self.registry.readable())
    }

    /// Readable fields that survive the request's directives
    pub fn fields(&self) -> &FieldMap {
        self.selected
            .get_or_init(|| self.selector.select(self.readable_fields(), self.context))
    }

    /// Selected field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields().keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields().contains_key(name)
    }

    /// Serialize `item` and keep only the selected fields
    ///
    /// Keys not declared in the registry are dropped. Selected fields the
    /// item does not produce are skipped.
    pub fn render<T: Serialize + ?Sized>(&self, item: &T) -> Result<Value, FieldsError> {
        let mut object = match serde_json::to_value(item)? {
            Value::Object(object) => object,
            other => {
                return Err(FieldsError::NotAnObject {
                    kind: json_kind(&other),
                });
            }
        };

        let mut output = Map::with_capacity(self.fields().len());
        for name in self.field_names() {
            if let Some(field_value) = object.remove(name) {
                output.insert(name.to_string(), field_value);
            }
        }
        Ok(Value::Object(output))
    }

    /// Render every item of a list with the same selection
    pub fn render_many<'i, T, I>(&self, items: I) -> Result<Value, FieldsError>
    where
        T: Serialize + 'i,
        I: IntoIterator<Item = &'i T>,
    {
        let rendered = items
            .into_iter()
            .map(|item| self.render(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(rendered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldDescriptor;
    use crate::core::params::TestRequest;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: String,
        email: String,
        password: String,
        internal_note: String,
    }

    fn registry() -> FieldRegistry {
        FieldRegistry::new()
            .with(FieldDescriptor::new("id"))
            .with(FieldDescriptor::new("name"))
            .with(FieldDescriptor::new("email"))
            .with(FieldDescriptor::new("password").write_only())
            .with(FieldDescriptor::new("url"))
    }

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
            internal_note: "vip".to_string(),
        }
    }

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_render_without_context() {
        let registry = registry();
        let selector = FieldSelector::new();
        let selection = FieldSelection::new(&registry, &selector, None);

        let rendered = selection.render(&alice()).unwrap();
        assert_eq!(keys(&rendered), vec!["id", "name", "email"]);
        assert_eq!(rendered["name"], json!("Alice"));
    }

    #[test]
    fn test_render_with_fields() {
        let registry = registry();
        let selector = FieldSelector::new();
        let ctx = SerializationContext::for_request(TestRequest::new().param("fields", "email,id"));
        let selection = FieldSelection::new(&registry, &selector, Some(&ctx));

        let rendered = selection.render(&alice()).unwrap();
        assert_eq!(keys(&rendered), vec!["id", "email"]);
        assert!(selection.contains("email"));
        assert!(!selection.contains("name"));
    }

    #[test]
    fn test_write_only_never_rendered() {
        let registry = registry();
        let selector = FieldSelector::new();
        let ctx =
            SerializationContext::for_request(TestRequest::new().param("fields", "id,password"));
        let selection = FieldSelection::new(&registry, &selector, Some(&ctx));

        assert_eq!(selection.readable_fields().len(), 4);
        assert_eq!(selection.field_names().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(selection.render(&alice()).unwrap(), json!({ "id": 1 }));
    }

    #[test]
    fn test_selection_is_memoized() {
        let registry = registry();
        let selector = FieldSelector::new();
        let ctx = SerializationContext::for_request(TestRequest::new().param("omit", "url"));
        let selection = FieldSelection::new(&registry, &selector, Some(&ctx));

        let first = selection.fields() as *const FieldMap;
        let second = selection.fields() as *const FieldMap;
        assert_eq!(first, second);
        assert!(selection.context().is_some());
    }

    #[test]
    fn test_render_many() {
        let registry = registry();
        let selector = FieldSelector::new();
        let ctx = SerializationContext::for_request(TestRequest::new().param("fields", "name"));
        let selection = FieldSelection::new(&registry, &selector, Some(&ctx));

        let mut bob = alice();
        bob.name = "Bob".to_string();
        let rendered = selection.render_many(&[alice(), bob]).unwrap();
        assert_eq!(rendered, json!([{ "name": "Alice" }, { "name": "Bob" }]));
    }

    #[test]
    fn test_render_rejects_non_object() {
        let registry = registry();
        let selector = FieldSelector::new();
        let selection = FieldSelection::new(&registry, &selector, None);

        let err = selection.render(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, FieldsError::NotAnObject { kind: "array" }));
    }
}

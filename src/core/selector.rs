//! The field selector
//!
//! Computes which readable fields a request wants to see:
//!
//! ```text
//! GET /users                               -> every readable field
//! GET /users?fields=id,name                -> id, name
//! GET /users?fields                        -> nothing
//! GET /users?omit=email                    -> every readable field but email
//! GET /users?fields=id,email&omit=email    -> id
//! ```
//!
//! Selection never fails. Missing pieces of the request context are logged
//! as warnings and the selector falls back to showing more fields, never fewer.

use super::context::SerializationContext;
use super::error::FieldsError;
use super::field::FieldMap;
use super::query::FieldDirectives;
use crate::config::SelectorConfig;

/// Selects the fields to emit for a request
#[derive(Debug, Clone, Default)]
pub struct FieldSelector {
    config: SelectorConfig,
}

impl FieldSelector {
    /// A selector with the default `fields` / `omit` parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector with custom parameter names
    ///
    /// Rejects configurations where both directives share a parameter name.
    pub fn with_config(config: SelectorConfig) -> Result<Self, FieldsError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Read the directives a context carries
    ///
    /// `None` means the context gives no usable request, in which case no
    /// filtering applies at all.
    pub fn directives(&self, context: Option<&SerializationContext>) -> Option<FieldDirectives> {
        // Called outside a request cycle, e.g. for schema introspection.
        let context = context?;

        let Some(request) = context.request() else {
            tracing::warn!("Context does not have access to request");
            return None;
        };

        let params = request.query_params();
        if params.is_none() {
            tracing::warn!("Request object does not contain query parameters");
        }

        Some(FieldDirectives::from_params(params, &self.config))
    }

    /// Restrict `readable` to the fields requested by `context`
    ///
    /// Order always follows `readable`, never the order of the names in the
    /// query string.
    pub fn select(&self, readable: &FieldMap, context: Option<&SerializationContext>) -> FieldMap {
        let Some(directives) = self.directives(context) else {
            return readable.clone();
        };

        let selected = directives.apply(readable);
        tracing::debug!(
            readable = readable.len(),
            selected = selected.len(),
            "Applied field directives"
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldDescriptor, FieldRegistry};
    use crate::core::params::{HttpRequest, TestRequest};

    fn readable() -> FieldMap {
        FieldRegistry::new()
            .with(FieldDescriptor::new("id"))
            .with(FieldDescriptor::new("name"))
            .with(FieldDescriptor::new("email"))
            .with(FieldDescriptor::new("url"))
            .readable()
    }

    fn select(ctx: Option<&SerializationContext>) -> Vec<String> {
        FieldSelector::new()
            .select(&readable(), ctx)
            .into_keys()
            .collect()
    }

    #[test]
    fn test_no_context_returns_all() {
        assert_eq!(select(None), vec!["id", "name", "email", "url"]);
    }

    #[test]
    fn test_context_without_request_returns_all() {
        let ctx = SerializationContext::new();
        assert_eq!(select(Some(&ctx)), vec!["id", "name", "email", "url"]);
        assert!(FieldSelector::new().directives(Some(&ctx)).is_none());
    }

    #[test]
    fn test_request_without_params_returns_all() {
        let ctx = SerializationContext::for_request(TestRequest::without_params());
        assert_eq!(select(Some(&ctx)), vec!["id", "name", "email", "url"]);
        assert_eq!(
            FieldSelector::new().directives(Some(&ctx)),
            Some(FieldDirectives::none())
        );
    }

    #[test]
    fn test_http_request_fields() {
        let request = HttpRequest::get("/users?fields=url,id".parse().unwrap());
        let ctx = SerializationContext::for_request(request);
        assert_eq!(select(Some(&ctx)), vec!["id", "url"]);
    }

    #[test]
    fn test_test_request_omit() {
        let ctx = SerializationContext::for_request(TestRequest::new().param("omit", "id,name"));
        assert_eq!(select(Some(&ctx)), vec!["email", "url"]);
    }

    #[test]
    fn test_custom_config() {
        let selector = FieldSelector::with_config(SelectorConfig {
            fields_param: "only".to_string(),
            ..SelectorConfig::default()
        })
        .expect("valid config");
        let ctx = SerializationContext::for_request(
            TestRequest::new().param("only", "name").param("fields", "id"),
        );
        let selected: Vec<String> = selector.select(&readable(), Some(&ctx)).into_keys().collect();
        assert_eq!(selected, vec!["name"]);
        assert_eq!(selector.config().fields_param, "only");
    }

    #[test]
    fn test_with_config_rejects_shared_param_name() {
        let result = FieldSelector::with_config(SelectorConfig {
            fields_param: "x".to_string(),
            omit_param: "x".to_string(),
            ..SelectorConfig::default()
        });
        assert!(matches!(result, Err(FieldsError::Config(_))));
    }
}

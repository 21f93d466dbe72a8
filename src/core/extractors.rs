//! Axum extractor for the serialization context
//!
//! Handlers take a [`RequestContext`] and pass it to a field selection:
//!
//! ```rust,ignore
//! async fn list_users(
//!     State(state): State<AppState>,
//!     RequestContext(ctx): RequestContext,
//! ) -> Result<Json<Value>, FieldsError> {
//!     let selection = User::selection(&state.selector, Some(&ctx));
//!     Ok(Json(selection.render_many(&state.users)?))
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use super::context::SerializationContext;
use super::params::HttpRequest;

/// Serialization context of the current HTTP request
///
/// Extraction never rejects: a query string that cannot be decoded yields a
/// request without parameters, which shows every field.
#[derive(Debug, Clone)]
pub struct RequestContext(pub SerializationContext);

impl RequestContext {
    pub fn into_inner(self) -> SerializationContext {
        self.0
    }
}

impl std::ops::Deref for RequestContext {
    type Target = SerializationContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request = HttpRequest::from_parts(parts);
        Ok(Self(SerializationContext::for_request(request)))
    }
}

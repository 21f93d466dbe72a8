//! # dynamic-fields
//!
//! Per-request field selection for serde-based REST APIs.
//!
//! Clients pick the fields they want with query parameters:
//!
//! - `?fields=id,name` returns only `id` and `name`
//! - `?omit=email` returns everything except `email`
//! - `?fields` (blank) returns no fields at all
//! - no parameter returns every readable field
//!
//! Output always follows the order in which fields were declared, and
//! write-only fields are never emitted.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dynamic_fields::prelude::*;
//!
//! #[derive(Serialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//!     email: String,
//!     password: String,
//! }
//!
//! impl_dynamic_fields!(User, [id(read_only), name, email, password(write_only)]);
//!
//! async fn get_user(
//!     State(selector): State<Arc<FieldSelector>>,
//!     RequestContext(ctx): RequestContext,
//! ) -> Result<Json<Value>, FieldsError> {
//!     let user = load_user();
//!     // GET /users/1?fields=name,id -> {"id": 1, "name": "Alice"}
//!     Ok(Json(User::selection(&selector, Some(&ctx)).render(&user)?))
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        context::SerializationContext,
        error::FieldsError,
        extractors::RequestContext,
        field::{FieldDescriptor, FieldMap, FieldRegistry},
        params::{HttpRequest, QueryLookup, QueryMap, RequestView, TestRequest},
        query::FieldDirectives,
        resource::DynamicFields,
        selection::FieldSelection,
        selector::FieldSelector,
    };

    // === Macros ===
    pub use crate::impl_dynamic_fields;

    // === Config ===
    pub use crate::config::SelectorConfig;

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;

    // === Axum ===
    pub use axum::{
        Json, Router,
        extract::{Query, State},
        routing::get,
    };
}

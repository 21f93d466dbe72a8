//! Simple example serving a `users` resource with dynamic field selection
//!
//! ```text
//! curl 'http://127.0.0.1:3000/users'
//! curl 'http://127.0.0.1:3000/users?fields=id,name'
//! curl 'http://127.0.0.1:3000/users?omit=email'
//! curl 'http://127.0.0.1:3000/users/1?fields=name&omit=name'
//! curl 'http://127.0.0.1:3000/schema/users'
//! ```
//!
//! Set `SELECTOR_CONFIG=path/to/selector.yaml` to rename the query parameters.

use anyhow::Result;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dynamic_fields::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: u64,
    name: String,
    email: String,
    url: String,
    password_hash: String,
}

impl_dynamic_fields!(User, [id(read_only), name, email, url, password_hash(write_only)]);

#[derive(Clone)]
struct AppState {
    selector: Arc<FieldSelector>,
    users: Arc<Vec<User>>,
}

async fn list_users(
    State(state): State<AppState>,
    RequestContext(ctx): RequestContext,
) -> Result<Json<Value>, FieldsError> {
    let selection = User::selection(&state.selector, Some(&ctx));
    Ok(Json(selection.render_many(state.users.iter())?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    RequestContext(ctx): RequestContext,
) -> Result<Response, FieldsError> {
    let Some(user) = state.users.iter().find(|u| u.id == id) else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "User not found" })),
        )
            .into_response());
    };

    let selection = User::selection(&state.selector, Some(&ctx));
    Ok(Json(selection.render(user)?).into_response())
}

/// Declared fields, outside of any request
async fn user_schema() -> Json<FieldRegistry> {
    Json(User::field_registry().clone())
}

fn seed_users() -> Vec<User> {
    ["Alice", "Bob", "Carol"]
        .into_iter()
        .zip(1u64..)
        .map(|(name, id)| User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            url: format!("http://127.0.0.1:3000/users/{id}"),
            password_hash: "$argon2$...".to_string(),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynamic_fields=debug,simple_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("SELECTOR_CONFIG") {
        Ok(path) => SelectorConfig::from_yaml_file(&path)?,
        Err(_) => SelectorConfig::default(),
    };
    tracing::info!(
        fields_param = %config.fields_param,
        omit_param = %config.omit_param,
        "Field selector configured"
    );

    let state = AppState {
        selector: Arc::new(FieldSelector::with_config(config)?),
        users: Arc::new(seed_users()),
    };

    let app = Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/schema/users", get(user_schema))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

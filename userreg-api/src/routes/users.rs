//! User endpoints
//!
//! - `POST /v1/users` - Create a user with a unique email
//! - `GET /v1/users?email=...` - Look up a user by email
//!
//! Both handlers trim the submitted email, run it through the shared email
//! rules and then consult the store's email index. Every failure is returned
//! as `{"error": "<message>"}` (see `crate::error`).
//!
//! # Uniqueness
//!
//! `create_user` checks the index and then writes. The two calls are not
//! atomic, so concurrent requests for the same email can both succeed and
//! leave duplicate records behind. `get_user` copes with that by returning
//! the first match the store reports.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, RawQuery, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use userreg_shared::{
    models::user::{CreateUser, User, MAX_NAME_LENGTH},
    validation::check_email,
};

/// Get user query parameters
#[derive(Debug, Deserialize)]
pub struct GetUserParams {
    /// Email address to look up
    #[serde(default)]
    pub email: Option<String>,
}

/// Create a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/users
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "name": "Jean Dupont"
/// }
/// ```
///
/// Only `email` and `name` are read; any other field in the body is ignored.
/// `email` is checked in full before `name` is looked at.
///
/// # Response
///
/// ```json
/// {
///   "id": "0b5f6a52-6f0c-4a55-9d8b-3c3b5e2f0a11",
///   "email": "user@example.com",
///   "name": "Jean Dupont"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing body, invalid JSON, missing or malformed
///   email, name over 100 characters
/// - `409 Conflict`: Email already registered
/// - `413 Payload Too Large`: Body over the router's body limit
/// - `500 Internal Server Error`: Store failure or unexpected input shape
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let body = body.map_err(|e| ApiError::Rejected {
        status: e.status(),
        message: e.body_text(),
    })?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("Request body is required".to_string()));
    }

    let fields = parse_create_request(&body)?;

    let email = optional_string(&fields, "email")?;
    let email = email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(ApiError::BadRequest("Email is required".to_string()));
    }

    if let Err(rule) = check_email(email) {
        debug!(email, %rule, "Rejected email on create");
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    let name = optional_string(&fields, "name")?;
    let name = name.as_deref().map(str::trim).unwrap_or_default();
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ApiError::BadRequest(
            "Name must be less than 100 characters".to_string(),
        ));
    }

    let existing = state.store.query_by_email(email).await?;
    if !existing.is_empty() {
        warn!(matches = existing.len(), "Rejected duplicate email on create");
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let user = User::new(CreateUser {
        email: email.to_string(),
        name: (!name.is_empty()).then(|| name.to_string()),
    });

    state.store.put(&user).await?;

    info!(user_id = %user.id, backend = state.store.backend(), "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Look up a user by email
///
/// # Endpoint
///
/// ```text
/// GET /v1/users?email=user%40example.com
/// ```
///
/// A literal `+` in the query is kept as `+` rather than read as a space, so
/// `?email=user+tag@example.org` finds `user+tag@example.org`.
///
/// # Response
///
/// The stored record, as returned by `create_user`.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or malformed email
/// - `404 Not Found`: No user with that exact (case-sensitive) email
/// - `500 Internal Server Error`: Store failure or unparseable query string
pub async fn get_user(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<User>> {
    let params = parse_lookup_query(query.as_deref())?;

    let email = params.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(ApiError::BadRequest(
            "Email query parameter is required".to_string(),
        ));
    }

    if let Err(rule) = check_email(email) {
        debug!(email, %rule, "Rejected email on lookup");
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    let matches = state.store.query_by_email(email).await?;
    if matches.len() > 1 {
        warn!(matches = matches.len(), "Email index holds duplicates, returning the first");
    }

    let user = matches
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    debug!(user_id = %user.id, "Found user");
    Ok(Json(user))
}

/// Decodes a create request body into its top-level fields
///
/// Invalid JSON is a client error. Valid JSON that is not an object falls
/// through to an internal error.
fn parse_create_request(body: &[u8]) -> ApiResult<Map<String, Value>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON in request body".to_string()))?;

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(ApiError::internal_with_detail(format!(
            "request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Reads `key` as an optional string; absent and `null` both mean `None`
fn optional_string(fields: &Map<String, Value>, key: &str) -> ApiResult<Option<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Option::<String>::deserialize(value)
            .map_err(|e| ApiError::internal_with_detail(e.to_string())),
    }
}

/// Decodes the lookup query string with `+` kept literal
///
/// A repeated `email` key fails to decode and surfaces as an internal error.
fn parse_lookup_query(query: Option<&str>) -> ApiResult<GetUserParams> {
    let escaped = query.unwrap_or_default().replace('+', "%2B");
    let uri: Uri = format!("/?{}", escaped)
        .parse()
        .map_err(|e: axum::http::uri::InvalidUri| ApiError::internal(e.to_string()))?;

    let Query(params) =
        Query::<GetUserParams>::try_from_uri(&uri).map_err(|e| ApiError::internal(e.body_text()))?;
    Ok(params)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

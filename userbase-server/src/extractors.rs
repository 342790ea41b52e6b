//! Custom Axum extractors

use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Form;
use serde_json::Value;

use crate::db::RequestDb;
use crate::error::ServerError;
use crate::models::{RawUserInput, ValidationError};
use crate::state::AppState;

/// Hand each request its own lazily opened connection.
///
/// The handle is dropped, and the connection closed, when the handler
/// returns.
impl<S> FromRequestParts<S> for RequestDb
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(AppState::from_ref(state).db.request())
    }
}

/// Integer id from the item path.
///
/// Anything but plain decimal digits is treated as an unmatched route.
pub struct UserId(pub i64);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        parse_user_id(&raw).map(Self).ok_or(StatusCode::NOT_FOUND)
    }
}

pub(crate) fn parse_user_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Create-user input from a JSON body or a form body, falling back to the
/// query string when the body carries no `name`
pub struct UserInput(pub RawUserInput);

impl<S> FromRequest<S> for UserInput
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| malformed(e.body_text()))?;
        let query_name = query.get("name").cloned().map(Value::String);

        if content_type.starts_with("application/json") {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| malformed(e.body_text()))?;
            let mut raw = if bytes.iter().all(u8::is_ascii_whitespace) {
                RawUserInput::default()
            } else {
                serde_json::from_slice::<RawUserInput>(&bytes)
                    .map_err(|e| malformed(e.to_string()))?
            };
            // A name in the query string is used when the body has none
            if raw.name.is_none() {
                raw.name = query_name;
            }
            return Ok(Self(raw));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| malformed(e.body_text()))?;
            let name = fields.get("name").cloned().map(Value::String).or(query_name);
            return Ok(Self(RawUserInput { name }));
        }

        Ok(Self(RawUserInput { name: query_name }))
    }
}

fn malformed(reason: String) -> ServerError {
    ServerError::Validation(ValidationError::MalformedBody { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_digits() {
        assert_eq!(parse_user_id("1"), Some(1));
        assert_eq!(parse_user_id("0042"), Some(42));
        assert_eq!(parse_user_id("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn rejects_anything_else() {
        for raw in ["", "abc", "-1", "+1", "1.5", " 1", "1e3", "9223372036854775808"] {
            assert_eq!(parse_user_id(raw), None, "{:?}", raw);
        }
    }
}

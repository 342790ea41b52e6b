//! User model, input validation and API response shapes

use rusqlite::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationError;

/// Message returned alongside a freshly created user
pub const USER_CREATED_MESSAGE: &str = "User created successfully";

/// Error body for an unknown user id
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// A persisted user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

impl User {
    /// Map a `SELECT id, name ...` row by column name.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// Validated user name: never empty or whitespace only.
///
/// Text is stored as sent; surrounding whitespace is not trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ValidationError::Blank { field: "name" });
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated input for the create operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
}

/// Unvalidated create input, as decoded from JSON, form or query string.
///
/// `name` stays a raw JSON value so a non-string can be told apart from a
/// missing field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserInput {
    #[serde(default)]
    pub name: Option<Value>,
}

impl RawUserInput {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
        }
    }
}

/// Validate create input before anything touches storage.
pub fn validate_new_user(raw: RawUserInput) -> Result<NewUser, ValidationError> {
    match raw.name {
        None | Some(Value::Null) => Err(ValidationError::Blank { field: "name" }),
        Some(Value::String(s)) => Ok(NewUser {
            name: UserName::new(s)?,
        }),
        Some(_) => Err(ValidationError::NotAString { field: "name" }),
    }
}

/// GET /api/users
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// GET /api/users/{user_id}
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// POST /api/users
#[derive(Debug, Serialize, Deserialize)]
pub struct UserCreatedResponse {
    pub message: String,
    pub user: User,
}

impl UserCreatedResponse {
    pub fn new(user: User) -> Self {
        Self {
            message: USER_CREATED_MESSAGE.to_string(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_plain_name() {
        let input = validate_new_user(RawUserInput::with_name("Ada")).unwrap();
        assert_eq!(input.name.as_str(), "Ada");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let input = validate_new_user(RawUserInput::with_name("  Ada ")).unwrap();
        assert_eq!(input.name.as_str(), "  Ada ");
    }

    #[test]
    fn rejects_missing_and_null() {
        let err = validate_new_user(RawUserInput::default()).unwrap_err();
        assert_eq!(err, ValidationError::Blank { field: "name" });

        let raw = RawUserInput {
            name: Some(Value::Null),
        };
        assert!(matches!(
            validate_new_user(raw),
            Err(ValidationError::Blank { .. })
        ));
    }

    #[test]
    fn rejects_blank() {
        for blank in ["", " ", "\t\n"] {
            let err = validate_new_user(RawUserInput::with_name(blank)).unwrap_err();
            assert!(matches!(err, ValidationError::Blank { .. }), "{:?}", blank);
        }
    }

    #[test]
    fn rejects_non_string() {
        for value in [json!(42), json!(true), json!(["Ada"]), json!({"first": "Ada"})] {
            let raw = RawUserInput { name: Some(value) };
            assert!(matches!(
                validate_new_user(raw),
                Err(ValidationError::NotAString { .. })
            ));
        }
    }

    #[test]
    fn created_response_shape() {
        let body = serde_json::to_value(UserCreatedResponse::new(User {
            id: 1,
            name: "Ada".into(),
        }))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "message": "User created successfully",
                "user": { "id": 1, "name": "Ada" }
            })
        );
    }
}

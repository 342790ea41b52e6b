//! User routes - REST API over the users collection

use axum::{http::StatusCode, Json};

use crate::db::RequestDb;
use crate::error::ServerResult;
use crate::extractors::{UserId, UserInput};
use crate::models::{
    validate_new_user, UserCreatedResponse, UserResponse, UsersResponse,
};
use crate::users::UserService;

/// GET /api/users - List all users
pub async fn list_users(mut db: RequestDb) -> ServerResult<Json<UsersResponse>> {
    let users = UserService::new(&mut db).list()?;
    Ok(Json(UsersResponse { users }))
}

/// GET /api/users/{user_id} - Get a single user
pub async fn get_user(
    mut db: RequestDb,
    UserId(user_id): UserId,
) -> ServerResult<Json<UserResponse>> {
    let user = UserService::new(&mut db).get(user_id)?;
    Ok(Json(UserResponse { user }))
}

/// POST /api/users - Create a user
pub async fn create_user(
    mut db: RequestDb,
    UserInput(raw): UserInput,
) -> ServerResult<(StatusCode, Json<UserCreatedResponse>)> {
    // Rejected input never opens a connection
    let input = validate_new_user(raw)?;
    let user = UserService::new(&mut db).create(input)?;
    tracing::info!(id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(UserCreatedResponse::new(user))))
}

//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod user;
pub mod validation;

pub use user::{
    validate_new_user, NewUser, RawUserInput, User, UserCreatedResponse, UserName,
    UserResponse, UsersResponse, USER_CREATED_MESSAGE, USER_NOT_FOUND_MESSAGE,
};
pub use validation::ValidationError;

//! User collection service
//!
//! List, get-by-id and create, run against one request's [`RequestDb`].

use rusqlite::params;

use crate::db::RequestDb;
use crate::error::{ServerError, ServerResult};
use crate::models::{NewUser, User, USER_NOT_FOUND_MESSAGE};

/// User operations bound to a request-scoped connection
pub struct UserService<'a> {
    db: &'a mut RequestDb,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a mut RequestDb) -> Self {
        Self { db }
    }

    /// All users in ascending id order.
    pub fn list(&mut self) -> ServerResult<Vec<User>> {
        self.db
            .query("SELECT id, name FROM users ORDER BY id", [], User::from_row)
    }

    /// A single user, or `NotFound` with the API's error message.
    pub fn get(&mut self, user_id: i64) -> ServerResult<User> {
        self.db
            .query_row(
                "SELECT id, name FROM users WHERE id = ?1",
                params![user_id],
                User::from_row,
            )?
            .ok_or_else(|| ServerError::NotFound(USER_NOT_FOUND_MESSAGE.to_string()))
    }

    /// Insert a validated user and return it with the store-assigned id.
    pub fn create(&mut self, input: NewUser) -> ServerResult<User> {
        let name = input.name.into_string();
        let id = self
            .db
            .execute("INSERT INTO users (name) VALUES (?1)", params![name])?;
        tracing::debug!(id, "Created user");
        Ok(User { id, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DEFAULT_SCHEMA};
    use crate::models::{validate_new_user, RawUserInput};
    use tempfile::TempDir;

    fn fresh_db() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().join("data.db"));
        db.bootstrap(DEFAULT_SCHEMA).unwrap();
        (dir, db)
    }

    fn new_user(name: &str) -> NewUser {
        validate_new_user(RawUserInput::with_name(name)).unwrap()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let (_dir, db) = fresh_db();
        let mut req = db.request();
        assert!(UserService::new(&mut req).list().unwrap().is_empty());
    }

    #[test]
    fn create_then_get_round_trips_name() {
        let (_dir, db) = fresh_db();

        for name in ["Ada", "Grace Hopper", "  padded ", "名前", "O'Brien; DROP TABLE users"] {
            let created = UserService::new(&mut db.request())
                .create(new_user(name))
                .unwrap();
            let fetched = UserService::new(&mut db.request()).get(created.id).unwrap();
            assert_eq!(fetched, created);
            assert_eq!(fetched.name, name);
        }
    }

    #[test]
    fn list_returns_every_created_user_in_id_order() {
        let (_dir, db) = fresh_db();
        let mut req = db.request();
        let mut service = UserService::new(&mut req);

        let created: Vec<User> = ["Ada", "Grace", "Barbara", "Ada"]
            .into_iter()
            .map(|name| service.create(new_user(name)).unwrap())
            .collect();

        let listed = service.list().unwrap();
        assert_eq!(listed, created);
        assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (_dir, db) = fresh_db();
        let mut req = db.request();
        let mut service = UserService::new(&mut req);

        let err = service.get(1).unwrap_err();
        assert!(matches!(err, ServerError::NotFound(ref m) if m == "User not found"));

        let ada = service.create(new_user("Ada")).unwrap();
        assert!(matches!(
            service.get(ada.id + 1),
            Err(ServerError::NotFound(_))
        ));
    }

    #[test]
    fn repeated_reads_are_identical() {
        let (_dir, db) = fresh_db();
        let ada = UserService::new(&mut db.request())
            .create(new_user("Ada"))
            .unwrap();

        let first = UserService::new(&mut db.request()).get(ada.id).unwrap();
        let second = UserService::new(&mut db.request()).get(ada.id).unwrap();
        assert_eq!(first, second);
    }
}

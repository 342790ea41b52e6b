//! Index page - server-rendered list of users

use axum::response::Html;

use crate::db::RequestDb;
use crate::error::ServerResult;
use crate::templates::render_index;
use crate::users::UserService;

/// GET / - Render the users page
pub async fn index(mut db: RequestDb) -> ServerResult<Html<String>> {
    let users = UserService::new(&mut db).list()?;
    Ok(Html(render_index(&users)))
}

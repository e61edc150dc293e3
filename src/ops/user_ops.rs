use log::info;
use rusqlite::Connection;

use crate::db::user_repo;
use crate::error::ShajraResult;
use crate::model::User;
use crate::validation::{self, trim_optional};

/// Creates a profile. Sign-in itself is handled outside this crate.
pub fn register_user(
    conn: &Connection,
    full_name: &str,
    avatar_url: Option<&str>,
) -> ShajraResult<User> {
    let name = validation::non_blank(full_name, "Full name")?;

    let mut user = User::create(name);
    user.avatar_url = trim_optional(avatar_url);
    user_repo::insert(conn, &user)?;

    info!("event=user_registered module=ops status=ok user_id={}", user.id);
    Ok(user)
}

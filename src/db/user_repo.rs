use rusqlite::{params, Connection};

use crate::error::ShajraResult;
use crate::model::{Id, User};

pub fn insert(conn: &Connection, user: &User) -> ShajraResult<()> {
    conn.execute(
        "INSERT INTO users (id, full_name, avatar_url) VALUES (?1, ?2, ?3)",
        params![user.id.value.to_string(), user.full_name, user.avatar_url],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, user_id: Id<User>) -> ShajraResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, full_name, avatar_url FROM users WHERE id = ?1")?;

    let result = stmt.query_row(params![user_id.value.to_string()], |row| {
        Ok(row_to_user(row))
    });

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_first(conn: &Connection) -> ShajraResult<Option<User>> {
    let mut stmt =
        conn.prepare("SELECT id, full_name, avatar_url FROM users ORDER BY created_at, rowid LIMIT 1")?;

    let result = stmt.query_row([], |row| Ok(row_to_user(row)));

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_user(row: &rusqlite::Row) -> ShajraResult<User> {
    let id_str: String = row.get(0).map_err(rusqlite::Error::from)?;
    Ok(User {
        id: Id::from_column(&id_str)?,
        full_name: row.get(1).map_err(rusqlite::Error::from)?,
        avatar_url: row.get(2).map_err(rusqlite::Error::from)?,
    })
}

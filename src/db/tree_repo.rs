use rusqlite::{params, Connection};

use super::{parse_timestamp, timestamp_column};
use crate::error::ShajraResult;
use crate::model::{FamilyTree, Id, User};

const TREE_COLUMNS: &str = "id, user_id, name, description, is_default, created_at, updated_at";

pub fn insert(conn: &Connection, tree: &FamilyTree) -> ShajraResult<()> {
    conn.execute(
        "INSERT INTO family_trees (id, user_id, name, description, is_default, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            tree.id.value.to_string(),
            tree.user_id.value.to_string(),
            tree.name,
            tree.description,
            tree.is_default as i32,
            timestamp_column(&tree.created_at),
            timestamp_column(&tree.updated_at),
        ],
    )?;
    Ok(())
}

/// Writes every mutable column. Returns the number of rows touched.
pub fn update(conn: &Connection, tree: &FamilyTree) -> ShajraResult<usize> {
    let changed = conn.execute(
        "UPDATE family_trees SET name = ?1, description = ?2, is_default = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            tree.name,
            tree.description,
            tree.is_default as i32,
            timestamp_column(&tree.updated_at),
            tree.id.value.to_string(),
        ],
    )?;
    Ok(changed)
}

/// Deletes a tree; members and relationships go with it.
pub fn delete(conn: &Connection, id: Id<FamilyTree>) -> ShajraResult<usize> {
    let changed = conn.execute(
        "DELETE FROM family_trees WHERE id = ?1",
        params![id.value.to_string()],
    )?;
    Ok(changed)
}

pub fn find_by_id(conn: &Connection, id: Id<FamilyTree>) -> ShajraResult<Option<FamilyTree>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM family_trees WHERE id = ?1",
        TREE_COLUMNS
    ))?;

    let result = stmt.query_row(params![id.value.to_string()], |row| Ok(row_to_tree(row)));

    match result {
        Ok(tree) => Ok(Some(tree?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Finds a tree only if it belongs to `owner_id`.
pub fn find_owned(
    conn: &Connection,
    owner_id: Id<User>,
    id: Id<FamilyTree>,
) -> ShajraResult<Option<FamilyTree>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM family_trees WHERE id = ?1 AND user_id = ?2",
        TREE_COLUMNS
    ))?;

    let result = stmt.query_row(
        params![id.value.to_string(), owner_id.value.to_string()],
        |row| Ok(row_to_tree(row)),
    );

    match result {
        Ok(tree) => Ok(Some(tree?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Default trees first, then newest first.
pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> ShajraResult<Vec<FamilyTree>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM family_trees WHERE user_id = ?1
         ORDER BY is_default DESC, created_at DESC, rowid DESC",
        TREE_COLUMNS
    ))?;

    let trees = stmt
        .query_map(params![owner_id.value.to_string()], |row| Ok(row_to_tree(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(trees)
}

fn row_to_tree(row: &rusqlite::Row) -> ShajraResult<FamilyTree> {
    let id_str: String = row.get(0).map_err(rusqlite::Error::from)?;
    let user_str: String = row.get(1).map_err(rusqlite::Error::from)?;
    let created: String = row.get(5).map_err(rusqlite::Error::from)?;
    let updated: String = row.get(6).map_err(rusqlite::Error::from)?;

    Ok(FamilyTree {
        id: Id::from_column(&id_str)?,
        user_id: Id::from_column(&user_str)?,
        name: row.get(2).map_err(rusqlite::Error::from)?,
        description: row.get(3).map_err(rusqlite::Error::from)?,
        is_default: row.get::<_, i32>(4).map_err(rusqlite::Error::from)? != 0,
        created_at: parse_timestamp(&created)?,
        updated_at: parse_timestamp(&updated)?,
    })
}

use rusqlite::{params, Connection};

use super::{parse_timestamp, timestamp_column};
use crate::error::ShajraResult;
use crate::model::{FamilyTree, Id, Member, Relationship, RelationshipType};

const RELATIONSHIP_COLUMNS: &str =
    "id, tree_id, member_id, related_member_id, relationship_type, created_at";

pub fn insert(conn: &Connection, rel: &Relationship) -> ShajraResult<()> {
    conn.execute(
        "INSERT INTO relationships (id, tree_id, member_id, related_member_id, relationship_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            rel.id.value.to_string(),
            rel.tree_id.value.to_string(),
            rel.member_id.value.to_string(),
            rel.related_member_id.value.to_string(),
            rel.relationship_type.as_str(),
            timestamp_column(&rel.created_at),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Id<Relationship>) -> ShajraResult<usize> {
    let changed = conn.execute(
        "DELETE FROM relationships WHERE id = ?1",
        params![id.value.to_string()],
    )?;
    Ok(changed)
}

pub fn find_by_id(conn: &Connection, id: Id<Relationship>) -> ShajraResult<Option<Relationship>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM relationships WHERE id = ?1",
        RELATIONSHIP_COLUMNS
    ))?;

    let result = stmt.query_row(params![id.value.to_string()], |row| {
        Ok(row_to_relationship(row))
    });

    match result {
        Ok(rel) => Ok(Some(rel?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_tree(conn: &Connection, tree_id: Id<FamilyTree>) -> ShajraResult<Vec<Relationship>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM relationships WHERE tree_id = ?1 ORDER BY created_at, rowid",
        RELATIONSHIP_COLUMNS
    ))?;

    let rels = stmt
        .query_map(params![tree_id.value.to_string()], |row| {
            Ok(row_to_relationship(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rels)
}

/// Relationships naming `member_id` on either side.
pub fn find_by_member(conn: &Connection, member_id: Id<Member>) -> ShajraResult<Vec<Relationship>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM relationships WHERE member_id = ?1 OR related_member_id = ?1
         ORDER BY created_at, rowid",
        RELATIONSHIP_COLUMNS
    ))?;

    let rels = stmt
        .query_map(params![member_id.value.to_string()], |row| {
            Ok(row_to_relationship(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rels)
}

fn row_to_relationship(row: &rusqlite::Row) -> ShajraResult<Relationship> {
    let id_str: String = row.get(0).map_err(rusqlite::Error::from)?;
    let tree_str: String = row.get(1).map_err(rusqlite::Error::from)?;
    let member_str: String = row.get(2).map_err(rusqlite::Error::from)?;
    let related_str: String = row.get(3).map_err(rusqlite::Error::from)?;
    let kind: String = row.get(4).map_err(rusqlite::Error::from)?;
    let created: String = row.get(5).map_err(rusqlite::Error::from)?;

    Ok(Relationship {
        id: Id::from_column(&id_str)?,
        tree_id: Id::from_column(&tree_str)?,
        member_id: Id::from_column(&member_str)?,
        related_member_id: Id::from_column(&related_str)?,
        relationship_type: RelationshipType::from(kind),
        created_at: parse_timestamp(&created)?,
    })
}

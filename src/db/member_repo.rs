use rusqlite::{params, Connection};

use super::{parse_timestamp, timestamp_column};
use crate::error::{ShajraError, ShajraResult};
use crate::model::{FamilyTree, Gender, Id, Member};

const MEMBER_COLUMNS: &str =
    "id, tree_id, name, gender, birth_year, death_year, img, notes, created_at, updated_at";

pub fn insert(conn: &Connection, member: &Member) -> ShajraResult<()> {
    conn.execute(
        "INSERT INTO family_members (id, tree_id, name, gender, birth_year, death_year, img, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            member.id.value.to_string(),
            member.tree_id.value.to_string(),
            member.name,
            member.gender.as_str(),
            member.birth_year,
            member.death_year,
            member.img,
            member.notes,
            timestamp_column(&member.created_at),
            timestamp_column(&member.updated_at),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, member: &Member) -> ShajraResult<usize> {
    let changed = conn.execute(
        "UPDATE family_members SET name = ?1, gender = ?2, birth_year = ?3, death_year = ?4,
         img = ?5, notes = ?6, updated_at = ?7
         WHERE id = ?8",
        params![
            member.name,
            member.gender.as_str(),
            member.birth_year,
            member.death_year,
            member.img,
            member.notes,
            timestamp_column(&member.updated_at),
            member.id.value.to_string(),
        ],
    )?;
    Ok(changed)
}

/// Deletes a member; relationships naming it on either side go with it.
pub fn delete(conn: &Connection, id: Id<Member>) -> ShajraResult<usize> {
    let changed = conn.execute(
        "DELETE FROM family_members WHERE id = ?1",
        params![id.value.to_string()],
    )?;
    Ok(changed)
}

pub fn find_by_id(conn: &Connection, id: Id<Member>) -> ShajraResult<Option<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM family_members WHERE id = ?1",
        MEMBER_COLUMNS
    ))?;

    let result = stmt.query_row(params![id.value.to_string()], |row| Ok(row_to_member(row)));

    match result {
        Ok(member) => Ok(Some(member?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Members of a tree, oldest first.
pub fn find_by_tree(conn: &Connection, tree_id: Id<FamilyTree>) -> ShajraResult<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM family_members WHERE tree_id = ?1 ORDER BY created_at, rowid",
        MEMBER_COLUMNS
    ))?;

    let members = stmt
        .query_map(params![tree_id.value.to_string()], |row| Ok(row_to_member(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(members)
}

pub fn find_by_tree_and_gender(
    conn: &Connection,
    tree_id: Id<FamilyTree>,
    gender: Gender,
) -> ShajraResult<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM family_members WHERE tree_id = ?1 AND gender = ?2
         ORDER BY created_at, rowid",
        MEMBER_COLUMNS
    ))?;

    let members = stmt
        .query_map(params![tree_id.value.to_string(), gender.as_str()], |row| {
            Ok(row_to_member(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(members)
}

fn row_to_member(row: &rusqlite::Row) -> ShajraResult<Member> {
    let id_str: String = row.get(0).map_err(rusqlite::Error::from)?;
    let tree_str: String = row.get(1).map_err(rusqlite::Error::from)?;
    let gender_str: String = row.get(3).map_err(rusqlite::Error::from)?;
    let created: String = row.get(8).map_err(rusqlite::Error::from)?;
    let updated: String = row.get(9).map_err(rusqlite::Error::from)?;

    Ok(Member {
        id: Id::from_column(&id_str)?,
        tree_id: Id::from_column(&tree_str)?,
        name: row.get(2).map_err(rusqlite::Error::from)?,
        gender: Gender::parse(&gender_str)
            .ok_or_else(|| ShajraError::Other(format!("Invalid gender: {}", gender_str)))?,
        birth_year: row.get(4).map_err(rusqlite::Error::from)?,
        death_year: row.get(5).map_err(rusqlite::Error::from)?,
        img: row.get(6).map_err(rusqlite::Error::from)?,
        notes: row.get(7).map_err(rusqlite::Error::from)?,
        created_at: parse_timestamp(&created)?,
        updated_at: parse_timestamp(&updated)?,
    })
}

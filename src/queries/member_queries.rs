use rusqlite::Connection;

use crate::auth::Session;
use crate::db::member_repo;
use crate::error::ShajraResult;
use crate::model::{FamilyTree, Gender, Id, Member};
use crate::ops::member_ops::owned_member;
use crate::ops::tree_ops::owned_tree;

pub fn members_of_tree(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
) -> ShajraResult<Vec<Member>> {
    let owner_id = session.require_principal()?;
    owned_tree(conn, owner_id, tree_id)?;
    member_repo::find_by_tree(conn, tree_id)
}

pub fn get_member(conn: &Connection, session: &Session, member_id: Id<Member>) -> ShajraResult<Member> {
    let owner_id = session.require_principal()?;
    owned_member(conn, owner_id, member_id)
}

pub fn members_by_gender(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
    gender: Gender,
) -> ShajraResult<Vec<Member>> {
    let owner_id = session.require_principal()?;
    owned_tree(conn, owner_id, tree_id)?;
    member_repo::find_by_tree_and_gender(conn, tree_id, gender)
}

/// Case-insensitive substring match on member names within a tree.
pub fn find_by_name(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
    query: &str,
) -> ShajraResult<Vec<Member>> {
    let lower = query.trim().to_lowercase();
    Ok(members_of_tree(conn, session, tree_id)?
        .into_iter()
        .filter(|m| m.name.to_lowercase().contains(&lower))
        .collect())
}

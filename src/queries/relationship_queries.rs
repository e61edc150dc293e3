use rusqlite::Connection;

use crate::auth::Session;
use crate::db::relationship_repo;
use crate::error::ShajraResult;
use crate::model::{FamilyTree, Id, Member, Relationship};
use crate::ops::member_ops::owned_member;
use crate::ops::tree_ops::owned_tree;

pub fn relationships_of_tree(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
) -> ShajraResult<Vec<Relationship>> {
    let owner_id = session.require_principal()?;
    owned_tree(conn, owner_id, tree_id)?;
    relationship_repo::find_by_tree(conn, tree_id)
}

pub fn relationships_of_member(
    conn: &Connection,
    session: &Session,
    member_id: Id<Member>,
) -> ShajraResult<Vec<Relationship>> {
    let owner_id = session.require_principal()?;
    owned_member(conn, owner_id, member_id)?;
    relationship_repo::find_by_member(conn, member_id)
}

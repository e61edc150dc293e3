use log::info;
use rusqlite::Connection;

use super::tree_ops::owned_tree;
use crate::auth::Session;
use crate::db::{member_repo, relationship_repo, tree_repo};
use crate::error::{ShajraError, ShajraResult};
use crate::model::{FamilyTree, Id, Member, NewRelationship, Relationship};
use crate::validation;

fn member_in_tree(
    conn: &Connection,
    tree_id: Id<FamilyTree>,
    member_id: Id<Member>,
) -> ShajraResult<Member> {
    member_repo::find_by_id(conn, member_id)?
        .filter(|m| m.tree_id == tree_id)
        .ok_or_else(|| ShajraError::not_found("Family member", member_id))
}

pub fn create_relationship(
    conn: &Connection,
    session: &Session,
    input: &NewRelationship,
) -> ShajraResult<Relationship> {
    let owner_id = session.require_principal()?;

    validation::distinct_members(input.member_id, input.related_member_id)?;
    let kind = validation::relationship_type(&input.relationship_type)?;

    owned_tree(conn, owner_id, input.tree_id)?;
    member_in_tree(conn, input.tree_id, input.member_id)?;
    member_in_tree(conn, input.tree_id, input.related_member_id)?;

    let rel = Relationship::create(input.tree_id, input.member_id, input.related_member_id, kind);
    relationship_repo::insert(conn, &rel)?;
    info!(
        "event=relationship_created module=ops status=ok relationship_id={} type={}",
        rel.id, rel.relationship_type
    );
    Ok(rel)
}

pub fn delete_relationship(
    conn: &Connection,
    session: &Session,
    relationship_id: Id<Relationship>,
) -> ShajraResult<()> {
    let owner_id = session.require_principal()?;

    let rel = relationship_repo::find_by_id(conn, relationship_id)?
        .ok_or_else(|| ShajraError::not_found("Relationship", relationship_id))?;
    tree_repo::find_owned(conn, owner_id, rel.tree_id)?
        .ok_or_else(|| ShajraError::not_found("Relationship", relationship_id))?;

    relationship_repo::delete(conn, relationship_id)?;
    info!(
        "event=relationship_deleted module=ops status=ok relationship_id={}",
        relationship_id
    );
    Ok(())
}

use rusqlite::Connection;

use crate::auth::Session;
use crate::db::{member_repo, relationship_repo, tree_repo};
use crate::error::ShajraResult;
use crate::model::{FamilyTree, FamilyTreeWithMembers, Id};
use crate::ops::tree_ops::owned_tree;

/// Trees of the signed-in user, default trees first, then newest first.
pub fn list_trees(conn: &Connection, session: &Session) -> ShajraResult<Vec<FamilyTree>> {
    let owner_id = session.require_principal()?;
    tree_repo::find_by_owner(conn, owner_id)
}

pub fn get_tree(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
) -> ShajraResult<FamilyTreeWithMembers> {
    let owner_id = session.require_principal()?;
    let tree = owned_tree(conn, owner_id, tree_id)?;

    Ok(FamilyTreeWithMembers {
        members: member_repo::find_by_tree(conn, tree.id)?,
        relationships: relationship_repo::find_by_tree(conn, tree.id)?,
        tree,
    })
}

/// The first tree flagged default, falling back to the first tree listed.
pub fn default_tree(conn: &Connection, session: &Session) -> ShajraResult<Option<FamilyTree>> {
    let trees = list_trees(conn, session)?;
    Ok(pick_default(&trees).cloned())
}

pub(crate) fn pick_default(trees: &[FamilyTree]) -> Option<&FamilyTree> {
    trees.iter().find(|t| t.is_default).or_else(|| trees.first())
}

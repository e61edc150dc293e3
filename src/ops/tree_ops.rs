use log::info;
use rusqlite::Connection;

use crate::auth::Session;
use crate::db::tree_repo;
use crate::error::{ShajraError, ShajraResult};
use crate::model::{timestamp_now, FamilyTree, Id, NewTree, TreeUpdate, User};
use crate::validation::{self, trim_optional};

/// Loads a tree owned by `owner_id`. A tree owned by someone else is
/// reported as not found.
pub(crate) fn owned_tree(
    conn: &Connection,
    owner_id: Id<User>,
    tree_id: Id<FamilyTree>,
) -> ShajraResult<FamilyTree> {
    tree_repo::find_owned(conn, owner_id, tree_id)?
        .ok_or_else(|| ShajraError::not_found("Family tree", tree_id))
}

pub fn create_tree(conn: &Connection, session: &Session, input: &NewTree) -> ShajraResult<FamilyTree> {
    let owner_id = session.require_principal()?;
    let name = validation::non_blank(&input.name, "Tree name")?;

    let mut tree = FamilyTree::create(owner_id, name);
    tree.description = trim_optional(input.description.as_deref());
    // Other trees keep their flag; exclusivity is not enforced.
    tree.is_default = input.is_default;

    tree_repo::insert(conn, &tree)?;
    info!("event=tree_created module=ops status=ok tree_id={}", tree.id);
    Ok(tree)
}

pub fn update_tree(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
    update: &TreeUpdate,
) -> ShajraResult<FamilyTree> {
    let owner_id = session.require_principal()?;
    let name = match &update.name {
        Some(n) => Some(validation::non_blank(n, "Tree name")?),
        None => None,
    };

    let mut updated = owned_tree(conn, owner_id, tree_id)?;

    if let Some(n) = name {
        updated.name = n;
    }
    if let Some(desc) = &update.description {
        updated.description = trim_optional(desc.as_deref());
    }
    if let Some(flag) = update.is_default {
        updated.is_default = flag;
    }
    updated.updated_at = timestamp_now();

    tree_repo::update(conn, &updated)?;
    info!("event=tree_updated module=ops status=ok tree_id={}", tree_id);
    Ok(updated)
}

/// Deletes a tree with all of its members and relationships.
pub fn delete_tree(conn: &Connection, session: &Session, tree_id: Id<FamilyTree>) -> ShajraResult<()> {
    let owner_id = session.require_principal()?;
    owned_tree(conn, owner_id, tree_id)?;

    tree_repo::delete(conn, tree_id)?;
    info!("event=tree_deleted module=ops status=ok tree_id={}", tree_id);
    Ok(())
}

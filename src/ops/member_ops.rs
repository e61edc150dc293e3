use log::info;
use rusqlite::Connection;

use super::tree_ops::owned_tree;
use crate::auth::Session;
use crate::db::{member_repo, tree_repo};
use crate::error::{ShajraError, ShajraResult};
use crate::model::{timestamp_now, Id, Member, MemberUpdate, NewMember, User};
use crate::validation::{self, trim_optional};

/// Loads a member whose tree belongs to `owner_id`. A member of someone
/// else's tree is reported as not found; store failures pass through.
pub(crate) fn owned_member(
    conn: &Connection,
    owner_id: Id<User>,
    member_id: Id<Member>,
) -> ShajraResult<Member> {
    let member = member_repo::find_by_id(conn, member_id)?
        .ok_or_else(|| ShajraError::not_found("Family member", member_id))?;
    tree_repo::find_owned(conn, owner_id, member.tree_id)?
        .ok_or_else(|| ShajraError::not_found("Family member", member_id))?;
    Ok(member)
}

pub fn create_member(conn: &Connection, session: &Session, input: &NewMember) -> ShajraResult<Member> {
    let owner_id = session.require_principal()?;

    let name = validation::non_blank(&input.name, "Member name")?;
    let gender = validation::gender(&input.gender)?;
    validation::year_order(input.birth_year, input.death_year)?;

    owned_tree(conn, owner_id, input.tree_id)?;

    let mut member = Member::create(input.tree_id, name, gender);
    member.birth_year = input.birth_year;
    member.death_year = input.death_year;
    member.img = trim_optional(input.img.as_deref());
    member.notes = trim_optional(input.notes.as_deref());

    member_repo::insert(conn, &member)?;
    info!(
        "event=member_created module=ops status=ok tree_id={} member_id={}",
        member.tree_id, member.id
    );
    Ok(member)
}

/// Applies only the fields present in `update`. The year check runs on the
/// merged record, so a patch cannot leave death before birth.
pub fn update_member(
    conn: &Connection,
    session: &Session,
    member_id: Id<Member>,
    update: &MemberUpdate,
) -> ShajraResult<Member> {
    let owner_id = session.require_principal()?;

    let name = match &update.name {
        Some(n) => Some(validation::non_blank(n, "Member name")?),
        None => None,
    };
    let gender = match &update.gender {
        Some(g) => Some(validation::gender(g)?),
        None => None,
    };

    let mut updated = owned_member(conn, owner_id, member_id)?;

    if let Some(n) = name {
        updated.name = n;
    }
    if let Some(g) = gender {
        updated.gender = g;
    }
    if let Some(year) = update.birth_year {
        updated.birth_year = year;
    }
    if let Some(year) = update.death_year {
        updated.death_year = year;
    }
    if let Some(img) = &update.img {
        updated.img = trim_optional(img.as_deref());
    }
    if let Some(notes) = &update.notes {
        updated.notes = trim_optional(notes.as_deref());
    }
    validation::year_order(updated.birth_year, updated.death_year)?;
    updated.updated_at = timestamp_now();

    member_repo::update(conn, &updated)?;
    info!("event=member_updated module=ops status=ok member_id={}", member_id);
    Ok(updated)
}

/// Deletes a member together with every relationship that names it.
pub fn delete_member(conn: &Connection, session: &Session, member_id: Id<Member>) -> ShajraResult<()> {
    let owner_id = session.require_principal()?;
    owned_member(conn, owner_id, member_id)?;

    member_repo::delete(conn, member_id)?;
    info!("event=member_deleted module=ops status=ok member_id={}", member_id);
    Ok(())
}

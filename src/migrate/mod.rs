use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use rusqlite::Connection;

use crate::auth::Session;
use crate::error::{ShajraError, ShajraResult};
use crate::model::*;
use crate::ops::{member_ops, relationship_ops, tree_ops};
use crate::queries::{chart_queries, tree_queries};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub members: usize,
    pub relationships: usize,
    pub skipped_relationships: usize,
}

/// Writes a tree with its members and relationships as pretty JSON.
pub fn export_tree_json(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
    path: &Path,
) -> ShajraResult<()> {
    let snapshot = tree_queries::get_tree(conn, session, tree_id)?;
    std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
    info!(
        "event=tree_exported module=migrate status=ok tree_id={} members={}",
        tree_id,
        snapshot.members.len()
    );
    Ok(())
}

/// Writes the rendered chart of a tree as pretty JSON.
pub fn export_chart_json(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
    path: &Path,
) -> ShajraResult<()> {
    let chart = chart_queries::tree_chart(conn, session, tree_id)?;
    std::fs::write(path, serde_json::to_string_pretty(&chart)?)?;
    Ok(())
}

/// Recreates an exported tree under the signed-in user with fresh ids.
///
/// Members go through the same validation as interactive edits; any invalid
/// member aborts the whole import. Relationships whose endpoints are not in
/// the file, or that fail validation, are skipped and counted.
pub fn import_tree_json(
    conn: &Connection,
    session: &Session,
    path: &Path,
) -> ShajraResult<(FamilyTree, ImportStats)> {
    let json_str = std::fs::read_to_string(path)?;
    let snapshot: FamilyTreeWithMembers = serde_json::from_str(&json_str)?;

    let tx = conn.unchecked_transaction()?;
    let result = import_snapshot(&tx, session, &snapshot)?;
    tx.commit()?;

    info!(
        "event=tree_imported module=migrate status=ok tree_id={} members={} relationships={} skipped={}",
        result.0.id, result.1.members, result.1.relationships, result.1.skipped_relationships
    );
    Ok(result)
}

fn import_snapshot(
    conn: &Connection,
    session: &Session,
    snapshot: &FamilyTreeWithMembers,
) -> ShajraResult<(FamilyTree, ImportStats)> {
    let tree = tree_ops::create_tree(
        conn,
        session,
        &NewTree {
            name: snapshot.tree.name.clone(),
            description: snapshot.tree.description.clone(),
            is_default: snapshot.tree.is_default,
        },
    )?;

    let mut stats = ImportStats::default();
    let mut id_map: HashMap<Id<Member>, Id<Member>> = HashMap::new();

    for old in &snapshot.members {
        let input = NewMember {
            tree_id: tree.id,
            name: old.name.clone(),
            gender: old.gender.as_str().to_string(),
            birth_year: old.birth_year,
            death_year: old.death_year,
            img: old.img.clone(),
            notes: old.notes.clone(),
        };
        let member = member_ops::create_member(conn, session, &input)?;
        id_map.insert(old.id, member.id);
        stats.members += 1;
    }

    for rel in &snapshot.relationships {
        let endpoints = (id_map.get(&rel.member_id), id_map.get(&rel.related_member_id));
        let (Some(&member_id), Some(&related_member_id)) = endpoints else {
            warn!(
                "event=import_relationship_skipped module=migrate reason=dangling relationship_id={}",
                rel.id
            );
            stats.skipped_relationships += 1;
            continue;
        };

        let input = NewRelationship::new(
            tree.id,
            member_id,
            related_member_id,
            rel.relationship_type.as_str(),
        );
        match relationship_ops::create_relationship(conn, session, &input) {
            Ok(_) => stats.relationships += 1,
            Err(e @ (ShajraError::Validation { .. } | ShajraError::NotFound { .. })) => {
                warn!(
                    "event=import_relationship_skipped module=migrate reason=invalid relationship_id={} error={}",
                    rel.id, e
                );
                stats.skipped_relationships += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok((tree, stats))
}

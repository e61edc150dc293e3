use log::debug;
use rusqlite::Connection;

use super::tree_queries;
use crate::auth::Session;
use crate::chart;
use crate::error::ShajraResult;
use crate::model::{FamilyTree, FamilyTreeChartData, Id};

/// Loads a tree's members and relationships and renders them as chart nodes.
pub fn tree_chart(
    conn: &Connection,
    session: &Session,
    tree_id: Id<FamilyTree>,
) -> ShajraResult<FamilyTreeChartData> {
    let loaded = tree_queries::get_tree(conn, session, tree_id)?;
    let chart_data = chart::to_chart_nodes(&loaded.members, &loaded.relationships);
    debug!(
        "event=chart_built module=queries tree_id={} members={} relationships={}",
        tree_id,
        loaded.members.len(),
        loaded.relationships.len()
    );

    Ok(FamilyTreeChartData {
        tree: loaded.tree,
        chart_data,
    })
}

use std::collections::BTreeMap;

use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;

use crate::error::ShajraResult;

/// Tables the application expects to find.
pub const TABLES: [&str; 4] = ["users", "family_trees", "family_members", "relationships"];

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// `relationship_type` carries no CHECK; rows with other values still load.
pub fn initialize(conn: &Connection) -> ShajraResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            full_name TEXT NOT NULL,
            avatar_url TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS family_trees (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT,
            is_default INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_family_trees_user ON family_trees(user_id);

        CREATE TABLE IF NOT EXISTS family_members (
            id TEXT PRIMARY KEY NOT NULL,
            tree_id TEXT NOT NULL REFERENCES family_trees(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            gender TEXT NOT NULL CHECK (gender IN ('M', 'F')),
            birth_year INTEGER,
            death_year INTEGER,
            img TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_family_members_tree ON family_members(tree_id);

        CREATE TABLE IF NOT EXISTS relationships (
            id TEXT PRIMARY KEY NOT NULL,
            tree_id TEXT NOT NULL REFERENCES family_trees(id) ON DELETE CASCADE,
            member_id TEXT NOT NULL REFERENCES family_members(id) ON DELETE CASCADE,
            related_member_id TEXT NOT NULL REFERENCES family_members(id) ON DELETE CASCADE,
            relationship_type TEXT NOT NULL,
            created_at TEXT NOT NULL,
            CHECK (member_id <> related_member_id)
        );

        CREATE INDEX IF NOT EXISTS idx_relationships_tree ON relationships(tree_id);
        CREATE INDEX IF NOT EXISTS idx_relationships_member ON relationships(member_id);
        CREATE INDEX IF NOT EXISTS idx_relationships_related ON relationships(related_member_id);
        ",
    )?;
    Ok(())
}

/// Open (or create) a database file and initialize it.
pub fn open(path: &std::path::Path) -> ShajraResult<Connection> {
    info!("event=db_open module=db status=start mode=file");
    let conn = Connection::open(path)?;
    initialize(&conn)?;
    info!("event=db_open module=db status=ok mode=file");
    Ok(conn)
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub tables: BTreeMap<String, bool>,
}

/// Checks that every expected table can be queried.
pub fn health_check(conn: &Connection) -> HealthReport {
    let mut tables = BTreeMap::new();
    for table in TABLES {
        let ok = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get::<_, i64>(0)
            })
            .is_ok();
        if !ok {
            warn!("event=health_check module=db status=error table={}", table);
        }
        tables.insert(table.to_string(), ok);
    }

    let status = if tables.values().all(|ok| *ok) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };
    HealthReport { status, tables }
}

use shajra::auth::Session;
use shajra::db::*;
use shajra::error::ShajraError;
use shajra::migrate::{self, ImportStats};
use shajra::model::*;
use shajra::ops::*;
use shajra::queries::*;

fn setup() -> (rusqlite::Connection, Session) {
    let conn = schema::test_connection();
    let user = user_ops::register_user(&conn, "Ali Khan", None).unwrap();
    (conn, Session::signed_in(user.id))
}

fn seed(conn: &rusqlite::Connection, session: &Session) -> FamilyTree {
    let tree = tree_ops::create_tree(
        conn,
        session,
        &NewTree {
            name: "Khan".into(),
            description: Some("Paternal side".into()),
            is_default: true,
        },
    )
    .unwrap();
    let ali = member_ops::create_member(conn, session, &NewMember::new(tree.id, "Ali", "M").years(Some(1950), None))
        .unwrap();
    let sara = member_ops::create_member(conn, session, &NewMember::new(tree.id, "Sara", "F")).unwrap();
    let omar = member_ops::create_member(conn, session, &NewMember::new(tree.id, "Omar", "M")).unwrap();
    for (a, b, kind) in [(&ali, &sara, "spouse"), (&ali, &omar, "parent"), (&omar, &sara, "child")] {
        relationship_ops::create_relationship(conn, session, &NewRelationship::new(tree.id, a.id, b.id, kind))
            .unwrap();
    }
    tree
}

// ==========================================================================
// EXPORT TESTS
// ==========================================================================

#[test]
fn export_tree_writes_snapshot() {
    let (conn, session) = setup();
    let tree = seed(&conn, &session);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("khan.json");

    migrate::export_tree_json(&conn, &session, tree.id, &path).unwrap();

    let snapshot: FamilyTreeWithMembers =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(snapshot.tree.id, tree.id);
    assert_eq!(snapshot.members.len(), 3);
    assert_eq!(snapshot.relationships.len(), 3);
}

#[test]
fn export_chart_writes_chart_payload() {
    let (conn, session) = setup();
    let tree = seed(&conn, &session);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");

    migrate::export_chart_json(&conn, &session, tree.id, &path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let nodes = json["chartData"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["data"]["name"], "Ali");
    assert_eq!(nodes[0]["data"]["gender"], "M");
    assert_eq!(nodes[0]["data"]["birth_year"], 1950);
    assert!(nodes[0]["data"].get("img").is_none());
    assert_eq!(nodes[1]["rels"]["children"].as_array().unwrap().len(), 1);
}

#[test]
fn export_of_foreign_tree_is_not_found() {
    let (conn, session) = setup();
    let tree = seed(&conn, &session);
    let stranger = user_ops::register_user(&conn, "Stranger", None).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stolen.json");

    let err = migrate::export_tree_json(&conn, &Session::signed_in(stranger.id), tree.id, &path).unwrap_err();
    assert!(matches!(err, ShajraError::NotFound { .. }));
    assert!(!path.exists());
}

// ==========================================================================
// IMPORT TESTS
// ==========================================================================

#[test]
fn import_recreates_tree_with_fresh_ids() {
    let (conn, session) = setup();
    let tree = seed(&conn, &session);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("khan.json");
    migrate::export_tree_json(&conn, &session, tree.id, &path).unwrap();

    let (imported, stats) = migrate::import_tree_json(&conn, &session, &path).unwrap();
    assert_ne!(imported.id, tree.id);
    assert_eq!(imported.name, "Khan");
    assert_eq!(imported.description, Some("Paternal side".into()));
    assert!(imported.is_default);
    assert_eq!(
        stats,
        ImportStats {
            members: 3,
            relationships: 3,
            skipped_relationships: 0,
        }
    );

    let original = chart_queries::tree_chart(&conn, &session, tree.id).unwrap();
    let copy = chart_queries::tree_chart(&conn, &session, imported.id).unwrap();
    let shape = |nodes: &[ChartNode]| -> Vec<(String, usize, usize, usize)> {
        nodes
            .iter()
            .map(|n| {
                (
                    n.data.name.clone(),
                    n.rels.parents.as_ref().map_or(0, Vec::len),
                    n.rels.spouses.as_ref().map_or(0, Vec::len),
                    n.rels.children.as_ref().map_or(0, Vec::len),
                )
            })
            .collect()
    };
    assert_eq!(shape(&original.chart_data), shape(&copy.chart_data));
    assert_eq!(tree_queries::list_trees(&conn, &session).unwrap().len(), 2);
}

#[test]
fn import_skips_relationships_it_cannot_place() {
    let (conn, session) = setup();
    let tree = seed(&conn, &session);
    let mut snapshot = tree_queries::get_tree(&conn, &session, tree.id).unwrap();

    let ali = snapshot.members[0].id;
    snapshot
        .relationships
        .push(Relationship::create(tree.id, ali, Id::generate(), RelationshipType::Spouse));
    let sara = snapshot.members[1].id;
    snapshot
        .relationships
        .push(Relationship::create(tree.id, ali, sara, RelationshipType::from("cousin")));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.json");
    std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

    let (imported, stats) = migrate::import_tree_json(&conn, &session, &path).unwrap();
    assert_eq!(stats.members, 3);
    assert_eq!(stats.relationships, 3);
    assert_eq!(stats.skipped_relationships, 2);
    assert_eq!(relationship_repo::find_by_tree(&conn, imported.id).unwrap().len(), 3);
}

#[test]
fn import_with_invalid_member_rolls_back() {
    let (conn, session) = setup();
    let tree = seed(&conn, &session);
    let mut snapshot = tree_queries::get_tree(&conn, &session, tree.id).unwrap();
    snapshot.members[2].birth_year = Some(2000);
    snapshot.members[2].death_year = Some(1990);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

    let err = migrate::import_tree_json(&conn, &session, &path).unwrap_err();
    assert!(matches!(err, ShajraError::Validation { .. }));
    assert_eq!(tree_queries::list_trees(&conn, &session).unwrap().len(), 1);
}

#[test]
fn import_of_malformed_file_fails() {
    let (conn, session) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = migrate::import_tree_json(&conn, &session, &path).unwrap_err();
    assert!(matches!(err, ShajraError::Json(_)));

    let missing = dir.path().join("missing.json");
    let err = migrate::import_tree_json(&conn, &session, &missing).unwrap_err();
    assert!(matches!(err, ShajraError::Io(_)));
}

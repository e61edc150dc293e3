use shajra::auth::Session;
use shajra::db::*;
use shajra::error::ShajraError;
use shajra::model::*;
use shajra::ops::*;
use shajra::queries::*;

fn setup() -> (rusqlite::Connection, Session) {
    let conn = schema::test_connection();
    let user = user_ops::register_user(&conn, "Ali Khan", None).unwrap();
    (conn, Session::signed_in(user.id))
}

fn create_tree(conn: &rusqlite::Connection, session: &Session, name: &str, is_default: bool) -> FamilyTree {
    tree_ops::create_tree(
        conn,
        session,
        &NewTree {
            name: name.into(),
            description: None,
            is_default,
        },
    )
    .unwrap()
}

fn add(conn: &rusqlite::Connection, session: &Session, input: NewMember) -> Member {
    member_ops::create_member(conn, session, &input).unwrap()
}

fn link(conn: &rusqlite::Connection, session: &Session, tree: &FamilyTree, a: &Member, b: &Member, kind: &str) {
    relationship_ops::create_relationship(conn, session, &NewRelationship::new(tree.id, a.id, b.id, kind)).unwrap();
}

// ==========================================================================
// TREE QUERY TESTS
// ==========================================================================

#[test]
fn list_trees_puts_default_first_then_newest() {
    let (conn, session) = setup();
    let old = create_tree(&conn, &session, "Old", false);
    conn.execute(
        "UPDATE family_trees SET created_at = '2000-01-01T00:00:00.000000Z' WHERE id = ?1",
        [old.id.to_string()],
    )
    .unwrap();
    create_tree(&conn, &session, "Flagged", true);
    create_tree(&conn, &session, "Recent", false);

    let names: Vec<String> = tree_queries::list_trees(&conn, &session)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Flagged", "Recent", "Old"]);
}

#[test]
fn list_trees_only_shows_own_trees() {
    let (conn, session) = setup();
    create_tree(&conn, &session, "Mine", false);

    let stranger = user_ops::register_user(&conn, "Stranger", None).unwrap();
    let stranger_session = Session::signed_in(stranger.id);
    create_tree(&conn, &stranger_session, "Theirs", false);

    let trees = tree_queries::list_trees(&conn, &session).unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].name, "Mine");
}

#[test]
fn list_trees_requires_principal() {
    let (conn, _) = setup();
    let err = tree_queries::list_trees(&conn, &Session::anonymous()).unwrap_err();
    assert!(matches!(err, ShajraError::Unauthorized));
}

#[test]
fn get_tree_returns_members_and_relationships() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let ali = add(&conn, &session, NewMember::new(tree.id, "Ali", "M"));
    let sara = add(&conn, &session, NewMember::new(tree.id, "Sara", "F"));
    link(&conn, &session, &tree, &ali, &sara, "spouse");

    let loaded = tree_queries::get_tree(&conn, &session, tree.id).unwrap();
    assert_eq!(loaded.tree.id, tree.id);
    let names: Vec<&str> = loaded.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ali", "Sara"]);
    assert_eq!(loaded.relationships.len(), 1);
}

#[test]
fn get_tree_of_other_user_is_not_found() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let stranger = user_ops::register_user(&conn, "Stranger", None).unwrap();

    let err = tree_queries::get_tree(&conn, &Session::signed_in(stranger.id), tree.id).unwrap_err();
    assert!(matches!(err, ShajraError::NotFound { .. }));
}

#[test]
fn default_tree_prefers_flag_then_first() {
    let (conn, session) = setup();
    assert!(tree_queries::default_tree(&conn, &session).unwrap().is_none());

    let first = create_tree(&conn, &session, "First", false);
    assert_eq!(tree_queries::default_tree(&conn, &session).unwrap().unwrap().id, first.id);

    let flagged = create_tree(&conn, &session, "Flagged", true);
    create_tree(&conn, &session, "Later", false);
    assert_eq!(tree_queries::default_tree(&conn, &session).unwrap().unwrap().id, flagged.id);
}

// ==========================================================================
// MEMBER QUERY TESTS
// ==========================================================================

#[test]
fn members_by_gender_filters() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    add(&conn, &session, NewMember::new(tree.id, "Ali", "M"));
    add(&conn, &session, NewMember::new(tree.id, "Sara", "F"));
    add(&conn, &session, NewMember::new(tree.id, "Hina", "F"));

    let women = member_queries::members_by_gender(&conn, &session, tree.id, Gender::Female).unwrap();
    let names: Vec<&str> = women.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Sara", "Hina"]);
}

#[test]
fn find_by_name_is_case_insensitive() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    add(&conn, &session, NewMember::new(tree.id, "Ali Khan", "M"));
    add(&conn, &session, NewMember::new(tree.id, "Sara Khan", "F"));
    add(&conn, &session, NewMember::new(tree.id, "Omar", "M"));

    assert_eq!(member_queries::find_by_name(&conn, &session, tree.id, "KHAN").unwrap().len(), 2);
    assert_eq!(member_queries::find_by_name(&conn, &session, tree.id, "oma").unwrap().len(), 1);
    assert!(member_queries::find_by_name(&conn, &session, tree.id, "zz").unwrap().is_empty());
}

#[test]
fn get_member_hides_other_users_members() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let ali = add(&conn, &session, NewMember::new(tree.id, "Ali", "M"));

    assert_eq!(member_queries::get_member(&conn, &session, ali.id).unwrap().name, "Ali");

    let stranger = user_ops::register_user(&conn, "Stranger", None).unwrap();
    let err = member_queries::get_member(&conn, &Session::signed_in(stranger.id), ali.id).unwrap_err();
    assert!(matches!(err, ShajraError::NotFound { .. }));
}

#[test]
fn get_member_surfaces_corrupt_tree_row() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let ali = add(&conn, &session, NewMember::new(tree.id, "Ali", "M"));
    conn.execute(
        "UPDATE family_trees SET created_at = 'garbage' WHERE id = ?1",
        [tree.id.to_string()],
    )
    .unwrap();

    let err = member_queries::get_member(&conn, &session, ali.id).unwrap_err();
    assert!(matches!(err, ShajraError::Other(_)), "got {:?}", err);

    let err = member_ops::delete_member(&conn, &session, ali.id).unwrap_err();
    assert!(!matches!(err, ShajraError::NotFound { .. }), "got {:?}", err);
    assert!(member_repo::find_by_id(&conn, ali.id).unwrap().is_some());
}

// ==========================================================================
// RELATIONSHIP QUERY TESTS
// ==========================================================================

#[test]
fn relationships_of_member_covers_both_directions() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let ali = add(&conn, &session, NewMember::new(tree.id, "Ali", "M"));
    let sara = add(&conn, &session, NewMember::new(tree.id, "Sara", "F"));
    let omar = add(&conn, &session, NewMember::new(tree.id, "Omar", "M"));
    link(&conn, &session, &tree, &ali, &sara, "spouse");
    link(&conn, &session, &tree, &omar, &ali, "child");
    link(&conn, &session, &tree, &sara, &omar, "parent");

    assert_eq!(relationship_queries::relationships_of_member(&conn, &session, ali.id).unwrap().len(), 2);
    assert_eq!(relationship_queries::relationships_of_tree(&conn, &session, tree.id).unwrap().len(), 3);
}

// ==========================================================================
// CHART QUERY TESTS
// ==========================================================================

#[test]
fn tree_chart_builds_bidirectional_nodes() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let mut ali_input = NewMember::new(tree.id, "Ali", "M").years(Some(1950), None);
    ali_input.img = Some("ali.jpg".into());
    let ali = add(&conn, &session, ali_input);
    let sara = add(&conn, &session, NewMember::new(tree.id, "Sara", "F").years(Some(1952), None));
    let omar = add(&conn, &session, NewMember::new(tree.id, "Omar", "M").years(Some(1975), None));
    link(&conn, &session, &tree, &ali, &sara, "spouse");
    link(&conn, &session, &tree, &ali, &omar, "parent");
    link(&conn, &session, &tree, &sara, &omar, "parent");

    let chart = chart_queries::tree_chart(&conn, &session, tree.id).unwrap();
    assert_eq!(chart.tree.id, tree.id);

    let ids: Vec<Id<Member>> = chart.chart_data.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![ali.id, sara.id, omar.id]);

    let ali_node = &chart.chart_data[0];
    assert_eq!(ali_node.data.img, Some("ali.jpg".into()));
    assert_eq!(ali_node.rels.spouses, Some(vec![sara.id]));
    assert_eq!(ali_node.rels.children, Some(vec![omar.id]));
    assert_eq!(ali_node.rels.parents, None);

    let sara_node = &chart.chart_data[1];
    assert_eq!(sara_node.rels.spouses, Some(vec![ali.id]));
    assert_eq!(sara_node.rels.children, Some(vec![omar.id]));

    let omar_node = &chart.chart_data[2];
    assert_eq!(omar_node.data.birth_year, Some(1975));
    assert_eq!(omar_node.rels.parents, Some(vec![ali.id, sara.id]));
    assert_eq!(omar_node.rels.spouses, None);
    assert_eq!(omar_node.rels.children, None);
}

#[test]
fn tree_chart_ignores_stored_edges_it_cannot_place() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Khan", false);
    let other = create_tree(&conn, &session, "Other", false);
    let ali = add(&conn, &session, NewMember::new(tree.id, "Ali", "M"));
    let sara = add(&conn, &session, NewMember::new(tree.id, "Sara", "F"));
    let hina = add(&conn, &session, NewMember::new(other.id, "Hina", "F"));

    // Rows the ops layer would refuse, written straight to the store.
    let cross_tree = Relationship::create(tree.id, ali.id, hina.id, RelationshipType::Spouse);
    relationship_repo::insert(&conn, &cross_tree).unwrap();
    let unknown = Relationship::create(tree.id, ali.id, sara.id, RelationshipType::from("sibling"));
    relationship_repo::insert(&conn, &unknown).unwrap();

    let chart = chart_queries::tree_chart(&conn, &session, tree.id).unwrap();
    assert_eq!(chart.chart_data.len(), 2);
    assert!(chart.chart_data.iter().all(|n| n.rels.is_empty()));
}

#[test]
fn tree_chart_of_empty_tree_is_empty() {
    let (conn, session) = setup();
    let tree = create_tree(&conn, &session, "Empty", false);
    let chart = chart_queries::tree_chart(&conn, &session, tree.id).unwrap();
    assert!(chart.chart_data.is_empty());

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["chartData"], serde_json::json!([]));
    assert_eq!(json["tree"]["name"], "Empty");
}

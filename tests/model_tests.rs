use serde_json::json;
use shajra::model::*;

// ==========================================================================
// GENDER TESTS
// ==========================================================================

#[test]
fn gender_serializes_as_letter() {
    assert_eq!(serde_json::to_value(Gender::Male).unwrap(), json!("M"));
    assert_eq!(serde_json::to_value(Gender::Female).unwrap(), json!("F"));
    assert_eq!(serde_json::from_value::<Gender>(json!("F")).unwrap(), Gender::Female);
    assert!(serde_json::from_value::<Gender>(json!("female")).is_err());
}

#[test]
fn gender_parse_is_exact() {
    assert_eq!(Gender::parse("M"), Some(Gender::Male));
    assert_eq!(Gender::parse("m"), None);
    assert_eq!(Gender::parse(" F"), None);
}

// ==========================================================================
// RELATIONSHIP TYPE TESTS
// ==========================================================================

#[test]
fn relationship_type_uses_lowercase_text() {
    assert_eq!(serde_json::to_value(RelationshipType::Parent).unwrap(), json!("parent"));
    assert_eq!(
        serde_json::from_value::<RelationshipType>(json!("child")).unwrap(),
        RelationshipType::Child
    );
}

#[test]
fn unknown_relationship_type_survives_serde() {
    let kind: RelationshipType = serde_json::from_value(json!("sibling")).unwrap();
    assert_eq!(kind, RelationshipType::Unrecognized("sibling".into()));
    assert!(!kind.is_known());
    assert_eq!(serde_json::to_value(&kind).unwrap(), json!("sibling"));
}

#[test]
fn relationship_involves_either_endpoint() {
    let tree_id = Id::generate();
    let a = Id::generate();
    let b = Id::generate();
    let rel = Relationship::create(tree_id, a, b, RelationshipType::Spouse);
    assert!(rel.involves(a));
    assert!(rel.involves(b));
    assert!(!rel.involves(Id::generate()));
}

// ==========================================================================
// INPUT TESTS
// ==========================================================================

#[test]
fn new_tree_defaults_flag_when_missing() {
    let input: NewTree = serde_json::from_value(json!({ "name": "Khan", "description": null })).unwrap();
    assert!(!input.is_default);
}

#[test]
fn empty_updates_report_empty() {
    assert!(TreeUpdate::default().is_empty());
    let update = TreeUpdate {
        description: Some(None),
        ..TreeUpdate::default()
    };
    assert!(!update.is_empty());
}

// ==========================================================================
// CHART PAYLOAD TESTS
// ==========================================================================

#[test]
fn chart_node_omits_empty_lists_and_image() {
    let id: Id<Member> = Id::generate();
    let spouse: Id<Member> = Id::generate();
    let node = ChartNode {
        id,
        data: ChartMemberData {
            gender: Gender::Female,
            name: "Sara".into(),
            img: None,
            birth_year: Some(1952),
            death_year: None,
        },
        rels: ChartRels {
            spouses: Some(vec![spouse]),
            ..ChartRels::default()
        },
    };

    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "id": id.to_string(),
            "data": {
                "gender": "F",
                "name": "Sara",
                "birth_year": 1952,
                "death_year": null
            },
            "rels": { "spouses": [spouse.to_string()] }
        })
    );
}

#[test]
fn chart_payload_renames_chart_data() {
    let tree = FamilyTree::create(Id::generate(), "Khan".into());
    let payload = FamilyTreeChartData {
        tree,
        chart_data: Vec::new(),
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert!(value.get("chartData").is_some());
    assert!(value.get("chart_data").is_none());
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Id;
use super::member::Member;
use super::tree::FamilyTree;

/// Kind of a directed relationship edge.
///
/// Stored as text. A value outside the three known kinds is kept as
/// `Unrecognized` so that such rows can still be loaded; creation rejects it
/// and the chart transform ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Spouse,
    /// `member_id` is the parent of `related_member_id`.
    Parent,
    /// `member_id` is the child of `related_member_id`.
    Child,
    Unrecognized(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipType::Spouse => "spouse",
            RelationshipType::Parent => "parent",
            RelationshipType::Child => "child",
            RelationshipType::Unrecognized(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RelationshipType::Unrecognized(_))
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        match s {
            "spouse" => RelationshipType::Spouse,
            "parent" => RelationshipType::Parent,
            "child" => RelationshipType::Child,
            other => RelationshipType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        RelationshipType::from(s.as_str())
    }
}

impl From<RelationshipType> for String {
    fn from(t: RelationshipType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed edge between two members of the same tree.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Id<Relationship>,
    pub tree_id: Id<FamilyTree>,
    pub member_id: Id<Member>,
    pub related_member_id: Id<Member>,
    pub relationship_type: RelationshipType,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    pub fn create(
        tree_id: Id<FamilyTree>,
        member_id: Id<Member>,
        related_member_id: Id<Member>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            id: Id::generate(),
            tree_id,
            member_id,
            related_member_id,
            relationship_type,
            created_at: super::timestamp_now(),
        }
    }

    /// Whether either endpoint is `member_id`.
    pub fn involves(&self, member_id: Id<Member>) -> bool {
        self.member_id == member_id || self.related_member_id == member_id
    }
}

/// Raw input for creating a relationship, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelationship {
    pub tree_id: Id<FamilyTree>,
    pub member_id: Id<Member>,
    pub related_member_id: Id<Member>,
    pub relationship_type: String,
}

impl NewRelationship {
    pub fn new(
        tree_id: Id<FamilyTree>,
        member_id: Id<Member>,
        related_member_id: Id<Member>,
        relationship_type: &str,
    ) -> Self {
        Self {
            tree_id,
            member_id,
            related_member_id,
            relationship_type: relationship_type.to_string(),
        }
    }
}

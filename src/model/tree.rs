use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::member::Member;
use super::relationship::Relationship;
use super::user::User;

/// A top-level collection of family members and their relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyTree {
    pub id: Id<FamilyTree>,
    pub user_id: Id<User>,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FamilyTree {
    pub fn create(user_id: Id<User>, name: String) -> Self {
        let now = super::timestamp_now();
        Self {
            id: Id::generate(),
            user_id,
            name,
            description: None,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTree {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update of a tree. `None` leaves a field unchanged; for
/// `description`, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TreeUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_default: Option<bool>,
}

impl TreeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_default.is_none()
    }
}

/// A tree together with everything it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyTreeWithMembers {
    pub tree: FamilyTree,
    pub members: Vec<Member>,
    pub relationships: Vec<Relationship>,
}

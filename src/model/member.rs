use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Id;
use super::tree::FamilyTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Accepts exactly `"M"` or `"F"`.
    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person recorded within a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: Id<Member>,
    pub tree_id: Id<FamilyTree>,
    pub name: String,
    pub gender: Gender,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub img: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn create(tree_id: Id<FamilyTree>, name: String, gender: Gender) -> Self {
        let now = super::timestamp_now();
        Self {
            id: Id::generate(),
            tree_id,
            name,
            gender,
            birth_year: None,
            death_year: None,
            img: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw input for creating a member, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub tree_id: Id<FamilyTree>,
    pub name: String,
    pub gender: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub img: Option<String>,
    pub notes: Option<String>,
}

impl NewMember {
    pub fn new(tree_id: Id<FamilyTree>, name: &str, gender: &str) -> Self {
        Self {
            tree_id,
            name: name.to_string(),
            gender: gender.to_string(),
            birth_year: None,
            death_year: None,
            img: None,
            notes: None,
        }
    }

    pub fn years(mut self, birth_year: Option<i32>, death_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self.death_year = death_year;
        self
    }
}

/// Partial update of a member. Outer `None` leaves the field alone; for the
/// nullable fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<Option<i32>>,
    pub death_year: Option<Option<i32>>,
    pub img: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

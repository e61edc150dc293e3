use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Profile of an account holder. Trees are owned by users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id<User>,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl User {
    pub fn create(full_name: String) -> Self {
        Self {
            id: Id::generate(),
            full_name,
            avatar_url: None,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{ShajraError, ShajraResult};

/// UUID key of a user, tree, member or relationship row.
///
/// `T` is the row type, so `Id<Member>` and `Id<FamilyTree>` cannot be
/// swapped when calling `create_relationship(tree, member, related)`.
/// Serializes as the bare hyphenated UUID, which is also how it is stored
/// and how chart nodes reference each other.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: Uuid,
    #[serde(skip)]
    row: PhantomData<T>,
}

impl<T> Id<T> {
    /// Fresh random (v4) key for a row about to be inserted.
    pub fn generate() -> Self {
        Uuid::new_v4().into()
    }

    /// Key read back from a TEXT column; malformed text is stored-data
    /// corruption, not a missing row.
    pub fn from_column(s: &str) -> ShajraResult<Self> {
        s.parse()
            .map_err(|e| ShajraError::Other(format!("Invalid UUID: {}", e)))
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(value: Uuid) -> Self {
        Self {
            value,
            row: PhantomData,
        }
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Id::from)
    }
}

// Hand-written so no bounds are placed on the row type `T`.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

pub mod ids;
pub mod user;
pub mod tree;
pub mod member;
pub mod relationship;
pub mod chart;

// Re-exports for convenience
pub use ids::Id;
pub use user::User;
pub use tree::{FamilyTree, FamilyTreeWithMembers, NewTree, TreeUpdate};
pub use member::{Gender, Member, MemberUpdate, NewMember};
pub use relationship::{NewRelationship, Relationship, RelationshipType};
pub use chart::{ChartMemberData, ChartNode, ChartRels, FamilyTreeChartData};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision the store keeps (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

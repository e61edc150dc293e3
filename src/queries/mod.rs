pub mod tree_queries;
pub mod member_queries;
pub mod relationship_queries;
pub mod chart_queries;

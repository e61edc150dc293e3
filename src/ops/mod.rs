pub mod user_ops;
pub mod tree_ops;
pub mod member_ops;
pub mod relationship_ops;

pub mod assignments;
pub mod collaboration;

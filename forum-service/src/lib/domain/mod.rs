pub mod identity;
pub mod pagination;
pub mod topic;

pub mod chain;
pub mod organizational_entity;
pub mod solution;
pub mod task;
pub mod user;

// Re-export core models for easy access
pub use chain::{TaskOrUser, TaskOrUserRef};
pub use organizational_entity::{Group, OrganizationalEntity};
pub use solution::TaskAssigningSolution;
pub use task::{Task, TaskId, TaskVariable};
pub use user::{User, UserId};

//! # Chain Nodes
//!
//! A user's work queue is a singly-linked chain `User -> Task -> Task -> ... -> None`.
//! Links are stored as handles into the working solution's arenas rather than as
//! references, so relinking is O(1) and ownership stays with the solution.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::task::TaskId;
use super::user::UserId;

/// Handle to a chain node: either a chain head (user) or a link (task)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum TaskOrUserRef {
    User(UserId),
    Task(TaskId),
}

impl TaskOrUserRef {
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Task(id) => Some(*id),
            Self::User(_) => None,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::User(id) => Some(*id),
            Self::Task(_) => None,
        }
    }
}

impl fmt::Display for TaskOrUserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user#{id}"),
            Self::Task(id) => write!(f, "task#{id}"),
        }
    }
}

/// Behaviour shared by every node of a chain
pub trait TaskOrUser {
    /// Handle of this node
    fn node_ref(&self) -> TaskOrUserRef;

    /// Next task in the chain, maintained as the inverse of `previous_task_or_user`
    fn next_task(&self) -> Option<TaskId>;

    /// Point in time from which the following task may start
    fn end_time(&self) -> Option<i64>;

    /// User heading the chain this node belongs to
    fn anchor(&self) -> Option<UserId>;
}

//! # User Model
//!
//! Users are the heads of the task chains. A user's "end time" is the moment
//! its first task may start, which is always zero for the model.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::chain::{TaskOrUser, TaskOrUserRef};
use super::organizational_entity::Group;
use super::task::TaskId;

pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub entity_id: String,
    pub enabled: bool,
    pub groups: HashSet<Group>,
    /// Inverse of the first task's `previous_task_or_user`
    #[serde(default)]
    pub(crate) next_task: Option<TaskId>,
}

impl User {
    pub fn new(id: UserId, entity_id: impl Into<String>) -> Self {
        Self {
            id,
            entity_id: entity_id.into(),
            enabled: true,
            groups: HashSet::new(),
            next_task: None,
        }
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Group::new).collect();
        self
    }

    pub fn is_member_of(&self, group_id: &str) -> bool {
        self.groups.iter().any(|group| group.entity_id == group_id)
    }
}

impl TaskOrUser for User {
    fn node_ref(&self) -> TaskOrUserRef {
        TaskOrUserRef::User(self.id)
    }

    fn next_task(&self) -> Option<TaskId> {
        self.next_task
    }

    fn end_time(&self) -> Option<i64> {
        Some(0)
    }

    fn anchor(&self) -> Option<UserId> {
        Some(self.id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(id={}, entity_id={})", self.id, self.entity_id)
    }
}

//! # Task Model
//!
//! The task is the only planning entity of the model and carries a single
//! planning variable, `previous_task_or_user`.
//!
//! ## Overview
//!
//! Tasks assigned to the same user form an ordered chain headed by that user:
//!
//! ```text
//! User1 -> A -> B -> C -> D
//! User2 -> E -> F
//! ```
//!
//! Only the first task of a chain points to a user; every other task points to
//! the task it follows. The remaining chain fields are shadow variables that are
//! derived from `previous_task_or_user` and kept consistent by the variable
//! listeners:
//!
//! - `user`: the anchor of the chain (the assigned user)
//! - `next_task`: inverse of the following task's `previous_task_or_user`
//! - `start_time` / `end_time`: a task starts when its predecessor ends
//!
//! ## Pinning
//!
//! A pinned task keeps its chain position regardless of the solver's search.
//! Pinned tasks always form a prefix of a chain.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::chain::{TaskOrUser, TaskOrUserRef};
use super::organizational_entity::OrganizationalEntity;
use super::user::UserId;
use crate::constants::{TaskStatus, DEFAULT_TASK_DURATION};

pub type TaskId = i64;

/// Variables of a task whose changes are announced to the score director
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskVariable {
    /// Genuine planning variable, the source of every shadow variable
    PreviousTaskOrUser,
    /// Anchor shadow variable
    User,
    StartTime,
    EndTime,
}

impl fmt::Display for TaskVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreviousTaskOrUser => write!(f, "previous_task_or_user"),
            Self::User => write!(f, "user"),
            Self::StartTime => write!(f, "start_time"),
            Self::EndTime => write!(f, "end_time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub process_instance_id: i64,
    pub process_id: String,
    pub container_id: String,
    pub name: String,
    /// 0 is the highest priority, 10 the lowest
    pub priority: i32,
    pub status: TaskStatus,
    pub input_data: HashMap<String, Value>,
    pub pinned: bool,
    pub published: bool,
    pub potential_owners: HashSet<OrganizationalEntity>,
    /// In minutes
    pub duration: i64,

    #[serde(default)]
    pub(crate) previous_task_or_user: Option<TaskOrUserRef>,
    #[serde(default)]
    pub(crate) user: Option<UserId>,
    #[serde(default)]
    pub(crate) next_task: Option<TaskId>,
    #[serde(default)]
    pub(crate) start_time: Option<i64>,
    #[serde(default)]
    pub(crate) end_time: Option<i64>,
}

impl Task {
    pub fn new(id: TaskId, name: impl Into<String>, priority: i32) -> Self {
        Self {
            id,
            process_instance_id: 0,
            process_id: String::new(),
            container_id: String::new(),
            name: name.into(),
            priority,
            status: TaskStatus::Ready,
            input_data: HashMap::new(),
            pinned: false,
            published: false,
            potential_owners: HashSet::new(),
            duration: DEFAULT_TASK_DURATION,
            previous_task_or_user: None,
            user: None,
            next_task: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_potential_owners<I>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = OrganizationalEntity>,
    {
        self.potential_owners = owners.into_iter().collect();
        self
    }

    pub fn with_process(
        mut self,
        container_id: impl Into<String>,
        process_id: impl Into<String>,
        process_instance_id: i64,
    ) -> Self {
        self.container_id = container_id.into();
        self.process_id = process_id.into();
        self.process_instance_id = process_instance_id;
        self
    }

    pub fn previous_task_or_user(&self) -> Option<TaskOrUserRef> {
        self.previous_task_or_user
    }

    /// The assigned user, i.e. the anchor of the chain
    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    /// A task is assigned when it's linked into some user's chain
    pub fn is_assigned(&self) -> bool {
        self.previous_task_or_user.is_some()
    }

    /// Clears every value the planner calculates, so a task arriving from
    /// outside can't bring stale chain state into the working solution.
    pub(crate) fn sanitize_planning_values(&mut self) {
        self.previous_task_or_user = None;
        self.user = None;
        self.pinned = false;
        self.next_task = None;
        self.start_time = None;
        self.end_time = None;
    }
}

impl TaskOrUser for Task {
    fn node_ref(&self) -> TaskOrUserRef {
        TaskOrUserRef::Task(self.id)
    }

    fn next_task(&self) -> Option<TaskId> {
        self.next_task
    }

    fn end_time(&self) -> Option<i64> {
        self.end_time
    }

    fn anchor(&self) -> Option<UserId> {
        self.user
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task(id={}, name={}, priority={}", self.id, self.name, self.priority)?;
        if self.pinned {
            write!(f, ", pinned")?;
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => write!(f, ", {start}..{end})"),
            _ => write!(f, ")"),
        }
    }
}

//! Snapshot of a task as reported by the process runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::constants::TaskStatus;
use crate::models::{OrganizationalEntity, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskData {
    pub task_id: TaskId,
    pub name: String,
    pub priority: i32,
    pub status: TaskStatus,
    /// Entity id of the user currently owning the task
    #[serde(default)]
    pub actual_owner: Option<String>,
    #[serde(default)]
    pub potential_owners: HashSet<OrganizationalEntity>,
    /// Assignment from the previous plan, absent when the task was never planned
    #[serde(default)]
    pub planning_task: Option<PlanningTask>,
    #[serde(default)]
    pub container_id: String,
    #[serde(default)]
    pub process_id: String,
    #[serde(default)]
    pub process_instance_id: i64,
    #[serde(default)]
    pub input_data: HashMap<String, Value>,
}

/// Where a previous plan put a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningTask {
    /// Entity id of the planned user
    pub assigned_user: String,
    /// Position in the planned user's chain
    pub index: usize,
    /// Whether the planned assignment has already been shown to the user
    #[serde(default)]
    pub published: bool,
}

impl PlanningTask {
    pub fn new(assigned_user: impl Into<String>, index: usize) -> Self {
        Self {
            assigned_user: assigned_user.into(),
            index,
            published: false,
        }
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }
}

impl TaskData {
    pub fn new(task_id: TaskId, name: impl Into<String>, priority: i32, status: TaskStatus) -> Self {
        Self {
            task_id,
            name: name.into(),
            priority,
            status,
            actual_owner: None,
            potential_owners: HashSet::new(),
            planning_task: None,
            container_id: String::new(),
            process_id: String::new(),
            process_instance_id: 0,
            input_data: HashMap::new(),
        }
    }

    pub fn with_actual_owner(mut self, owner: impl Into<String>) -> Self {
        self.actual_owner = Some(owner.into());
        self
    }

    pub fn with_potential_owners<I>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = OrganizationalEntity>,
    {
        self.potential_owners = owners.into_iter().collect();
        self
    }

    pub fn with_planning_task(mut self, planning_task: PlanningTask) -> Self {
        self.planning_task = Some(planning_task);
        self
    }

    /// Tasks never planned count as published: nobody decided their placement
    pub fn is_published(&self) -> bool {
        self.planning_task
            .as_ref()
            .map_or(true, |planning_task| planning_task.published)
    }

    /// Planning entity for this snapshot, unassigned and unpinned
    pub fn to_task(&self, duration: i64) -> Task {
        let mut task = Task::new(self.task_id, self.name.clone(), self.priority)
            .with_status(self.status)
            .with_duration(duration)
            .with_potential_owners(self.potential_owners.iter().cloned())
            .with_process(
                self.container_id.clone(),
                self.process_id.clone(),
                self.process_instance_id,
            );
        task.published = self
            .planning_task
            .as_ref()
            .is_some_and(|planning_task| planning_task.published);
        task.input_data = self.input_data.clone();
        task
    }
}

//! # Working Solution
//!
//! Arena holding every user and task of the plan. Tasks and users keep their
//! insertion order and are indexed by id; chain links are handles into these
//! arenas.
//!
//! Chain pointers are only meant to be mutated by the variable listeners and
//! the real-time problem fact changes, which is why the mutators touching them
//! are crate-private.

use std::collections::HashMap;
use std::fmt;

use super::chain::{TaskOrUser, TaskOrUserRef};
use super::task::{Task, TaskId};
use super::user::{User, UserId};
use crate::constants::DEFAULT_PLANNING_USER_ID;
use crate::error::{Result, TaskAssigningError};

#[derive(Debug, Clone)]
pub struct TaskAssigningSolution {
    pub id: i64,
    planning_user_id: String,
    users: Vec<User>,
    user_index: HashMap<UserId, usize>,
    tasks: Vec<Task>,
    task_index: HashMap<TaskId, usize>,
}

impl TaskAssigningSolution {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            planning_user_id: DEFAULT_PLANNING_USER_ID.to_string(),
            users: Vec::new(),
            user_index: HashMap::new(),
            tasks: Vec::new(),
            task_index: HashMap::new(),
        }
    }

    pub fn with_planning_user_id(mut self, planning_user_id: impl Into<String>) -> Self {
        self.planning_user_id = planning_user_id.into();
        self
    }

    pub fn planning_user_id(&self) -> &str {
        &self.planning_user_id
    }

    pub fn is_planning_user(&self, user: &User) -> bool {
        user.entity_id == self.planning_user_id
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.user_index.get(&id).map(|&idx| &self.users[idx])
    }

    pub fn user_by_entity_id(&self, entity_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.entity_id == entity_id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.task_index.get(&id).map(|&idx| &self.tasks[idx])
    }

    pub fn contains_task(&self, id: TaskId) -> bool {
        self.task_index.contains_key(&id)
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.user_index.contains_key(&id)
    }

    pub fn node(&self, node: TaskOrUserRef) -> Option<&dyn TaskOrUser> {
        match node {
            TaskOrUserRef::User(id) => self.user(id).map(|user| user as &dyn TaskOrUser),
            TaskOrUserRef::Task(id) => self.task(id).map(|task| task as &dyn TaskOrUser),
        }
    }

    /// End time of a chain node, `None` when the node is unknown or unscheduled
    pub fn end_time_of(&self, node: TaskOrUserRef) -> Option<i64> {
        self.node(node).and_then(|n| n.end_time())
    }

    /// Task ids of a user's chain, in chain order
    pub fn chain(&self, user_id: UserId) -> Vec<TaskId> {
        let mut chain = Vec::new();
        let mut next = self.user(user_id).and_then(|user| user.next_task);
        while let Some(task) = next.and_then(|id| self.task(id)) {
            // a corrupted chain must not loop forever
            if chain.len() > self.tasks.len() {
                break;
            }
            chain.push(task.id);
            next = task.next_task;
        }
        chain
    }

    /// Returns false when a user with the same id is already present
    pub(crate) fn add_user(&mut self, mut user: User) -> bool {
        if self.user_index.contains_key(&user.id) {
            return false;
        }
        user.next_task = None;
        self.user_index.insert(user.id, self.users.len());
        self.users.push(user);
        true
    }

    pub(crate) fn add_task(&mut self, task: Task) -> Result<()> {
        if self.task_index.contains_key(&task.id) {
            return Err(TaskAssigningError::DuplicateTask(task.id));
        }
        self.task_index.insert(task.id, self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Removes a task from the arena, dropping the inverse pointer its
    /// predecessor may still hold. Successors must be relinked beforehand.
    pub(crate) fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let idx = self.task_index.remove(&id)?;
        let task = self.tasks.remove(idx);
        for (position, remaining) in self.tasks.iter().enumerate().skip(idx) {
            self.task_index.insert(remaining.id, position);
        }
        if let Some(previous) = task.previous_task_or_user {
            self.clear_next_task_if(previous, id);
        }
        Some(task)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        match self.task_index.get(&id) {
            Some(&idx) => self.tasks.get_mut(idx),
            None => None,
        }
    }

    pub(crate) fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        match self.user_index.get(&id) {
            Some(&idx) => self.users.get_mut(idx),
            None => None,
        }
    }

    /// Sets the planning variable of a task and maintains the `next_task`
    /// inverse relation of both the old and the new predecessor.
    ///
    /// The old predecessor only loses its inverse pointer if it still points to
    /// this task, which lets a relink sequence pass through transient states
    /// where two tasks share a predecessor.
    pub(crate) fn set_previous_task_or_user(
        &mut self,
        task_id: TaskId,
        previous: Option<TaskOrUserRef>,
    ) {
        let old_previous = match self.task_mut(task_id) {
            Some(task) => std::mem::replace(&mut task.previous_task_or_user, previous),
            None => return,
        };
        if let Some(old_previous) = old_previous {
            self.clear_next_task_if(old_previous, task_id);
        }
        if let Some(previous) = previous {
            self.set_next_task(previous, Some(task_id));
        }
    }

    fn clear_next_task_if(&mut self, node: TaskOrUserRef, expected: TaskId) {
        let points_to_expected = self
            .node(node)
            .map(|n| n.next_task() == Some(expected))
            .unwrap_or(false);
        if points_to_expected {
            self.set_next_task(node, None);
        }
    }

    fn set_next_task(&mut self, node: TaskOrUserRef, next: Option<TaskId>) {
        match node {
            TaskOrUserRef::User(id) => {
                if let Some(user) = self.user_mut(id) {
                    user.next_task = next;
                }
            }
            TaskOrUserRef::Task(id) => {
                if let Some(task) = self.task_mut(id) {
                    task.next_task = next;
                }
            }
        }
    }
}

impl fmt::Display for TaskAssigningSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for user in &self.users {
            write!(f, "{}", user.entity_id)?;
            for task_id in self.chain(user.id) {
                if let Some(task) = self.task(task_id) {
                    let marker = if task.pinned { "*" } else { "" };
                    write!(f, " -> {}{}", task.id, marker)?;
                }
            }
            writeln!(f)?;
        }
        let unassigned: Vec<String> = self
            .tasks
            .iter()
            .filter(|task| !task.is_assigned())
            .map(|task| task.id.to_string())
            .collect();
        if !unassigned.is_empty() {
            writeln!(f, "unassigned: {}", unassigned.join(", "))?;
        }
        Ok(())
    }
}

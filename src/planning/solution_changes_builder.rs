//! # Solution Changes Builder
//!
//! Compares a fresh task data snapshot against the working solution and
//! returns the problem fact changes that reconcile them.
//!
//! ## Rules
//!
//! Tasks not yet in the solution:
//! - `Ready` tasks are added for planning.
//! - `Reserved`, `InProgress` and `Suspended` tasks with an actual owner are
//!   assigned to that owner. Without an owner they are ignored until they come
//!   back as `Ready` or owned.
//!
//! Tasks already in the solution:
//! - back to `Ready` from any other status: released;
//! - owned status without an owner: removed;
//! - owned by someone other than the planned user: assigned to the owner;
//! - owned by the planned user, published (or never planned) and not pinned
//!   yet: assigned (pinned);
//! - finished (`Completed`, `Exited`, `Failed`, `Error`, `Obsolete`): removed.
//!
//! Every assignment marks the task published, since its owner has seen it.
//!
//! Priority or status drift on any task that isn't removed produces a property
//! change.
//!
//! ## Ordering
//!
//! Owners missing from the solution are added first, followed by removals,
//! releases, assignments grouped per user (users ordered by entity id),
//! property changes and finally new tasks. A user's assignments follow the
//! planned index of their tasks; assignments without one come last, in
//! snapshot order.

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace};

use super::{next_user_id, TaskData};
use crate::constants::{TaskStatus, DEFAULT_TASK_DURATION};
use crate::models::{Task, TaskAssigningSolution, TaskId, User, UserId};
use crate::solver::realtime::{
    AddTaskProblemFactChange, AddUserProblemFactChange, AssignTaskProblemFactChange,
    ProblemFactChange, ReleaseTaskProblemFactChange, RemoveTaskProblemFactChange,
    TaskPropertyChangeProblemFactChange,
};

#[derive(Debug)]
pub struct SolutionChangesBuilder<'a> {
    solution: &'a TaskAssigningSolution,
    tasks: Vec<TaskData>,
    default_task_duration: i64,
}

#[derive(Default)]
struct PendingChanges {
    new_users: Vec<User>,
    removed: Vec<TaskId>,
    removed_set: HashSet<TaskId>,
    released: Vec<TaskId>,
    assigned: BTreeMap<String, Vec<IndexedAssignment>>,
    properties: Vec<TaskPropertyChangeProblemFactChange>,
    added: Vec<Task>,
}

struct IndexedAssignment {
    index: Option<usize>,
    change: AssignTaskProblemFactChange,
}

impl<'a> SolutionChangesBuilder<'a> {
    pub fn new(solution: &'a TaskAssigningSolution) -> Self {
        Self {
            solution,
            tasks: Vec::new(),
            default_task_duration: DEFAULT_TASK_DURATION,
        }
    }

    pub fn with_tasks<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = TaskData>,
    {
        self.tasks.extend(tasks);
        self
    }

    pub fn with_default_task_duration(mut self, duration: i64) -> Self {
        self.default_task_duration = duration;
        self
    }

    pub fn build(&self) -> Vec<Box<dyn ProblemFactChange>> {
        let mut users: HashMap<String, User> = self
            .solution
            .users()
            .iter()
            .map(|user| (user.entity_id.clone(), user.clone()))
            .collect();
        let mut pending = PendingChanges::default();

        for data in &self.tasks {
            match self.solution.task(data.task_id) {
                None => self.new_task_changes(data, &mut users, &mut pending),
                Some(task) => self.known_task_changes(data, task, &mut users, &mut pending),
            }
        }

        let mut changes: Vec<Box<dyn ProblemFactChange>> = Vec::new();
        changes.extend(
            pending
                .new_users
                .into_iter()
                .map(|user| Box::new(AddUserProblemFactChange::new(user)) as Box<dyn ProblemFactChange>),
        );
        changes.extend(pending.removed.into_iter().map(|id| {
            Box::new(RemoveTaskProblemFactChange::new(id)) as Box<dyn ProblemFactChange>
        }));
        changes.extend(pending.released.into_iter().map(|id| {
            Box::new(ReleaseTaskProblemFactChange::new(id)) as Box<dyn ProblemFactChange>
        }));
        for mut user_changes in pending.assigned.into_values() {
            user_changes.sort_by_key(|assignment| {
                (assignment.index.is_none(), assignment.index)
            });
            changes.extend(
                user_changes
                    .into_iter()
                    .map(|assignment| Box::new(assignment.change) as Box<dyn ProblemFactChange>),
            );
        }
        changes.extend(
            pending
                .properties
                .into_iter()
                .map(|change| Box::new(change) as Box<dyn ProblemFactChange>),
        );
        changes.extend(pending.added.into_iter().map(|task| {
            Box::new(AddTaskProblemFactChange::new(task)) as Box<dyn ProblemFactChange>
        }));

        if changes.is_empty() {
            trace!("No changes have been calculated");
        } else {
            debug!(changes = changes.len(), "Solution changes calculated");
        }
        changes
    }

    fn new_task_changes(
        &self,
        data: &TaskData,
        users: &mut HashMap<String, User>,
        pending: &mut PendingChanges,
    ) {
        match (data.status, data.actual_owner.as_deref()) {
            (TaskStatus::Ready, _) => {
                pending.added.push(data.to_task(self.default_task_duration));
            }
            (status, Some(owner)) if status.is_owned() => {
                let user = self.resolve_user(owner, users, pending);
                let task = data.to_task(self.default_task_duration);
                push_assignment(pending, task, user, None);
            }
            _ => {
                trace!(
                    task_id = data.task_id,
                    status = %data.status,
                    "Task not planned until it becomes ready or owned"
                );
            }
        }
    }

    fn known_task_changes(
        &self,
        data: &TaskData,
        task: &Task,
        users: &mut HashMap<String, User>,
        pending: &mut PendingChanges,
    ) {
        match data.status {
            TaskStatus::Ready => {
                if task.status != TaskStatus::Ready {
                    pending.released.push(task.id);
                }
            }
            status if status.is_owned() => match data.actual_owner.as_deref() {
                None => mark_removed(pending, task.id),
                Some(owner) => {
                    let planned_owner = task
                        .user()
                        .and_then(|id| self.solution.user(id))
                        .map(|user| user.entity_id.as_str());
                    if planned_owner != Some(owner) {
                        let user = self.resolve_user(owner, users, pending);
                        push_assignment(pending, task.clone(), user, None);
                    } else if data.is_published() && !task.pinned {
                        let user = self.resolve_user(owner, users, pending);
                        let index = data.planning_task.as_ref().map(|p| p.index);
                        push_assignment(pending, task.clone(), user, index);
                    }
                }
            },
            status if status.is_terminal() => mark_removed(pending, task.id),
            _ => {}
        }

        if pending.removed_set.contains(&task.id) {
            return;
        }
        if data.priority != task.priority || data.status != task.status {
            let mut change = TaskPropertyChangeProblemFactChange::new(task.id);
            if data.priority != task.priority {
                change = change.with_priority(data.priority);
            }
            if data.status != task.status {
                change = change.with_status(data.status);
            }
            pending.properties.push(change);
        }
    }

    /// Working user for an entity id; users delegated to outside the solution
    /// are created and scheduled for addition.
    fn resolve_user(
        &self,
        entity_id: &str,
        users: &mut HashMap<String, User>,
        pending: &mut PendingChanges,
    ) -> User {
        if let Some(user) = users.get(entity_id) {
            return user.clone();
        }
        let new_ids: Vec<UserId> = pending.new_users.iter().map(|user| user.id).collect();
        let user = User::new(next_user_id(self.solution, &new_ids), entity_id);
        debug!(
            user_id = user.id,
            entity_id,
            "User not found in the working solution, it will be added"
        );
        users.insert(entity_id.to_string(), user.clone());
        pending.new_users.push(user.clone());
        user
    }
}

fn mark_removed(pending: &mut PendingChanges, task_id: TaskId) {
    if pending.removed_set.insert(task_id) {
        pending.removed.push(task_id);
    }
}

fn push_assignment(pending: &mut PendingChanges, task: Task, user: User, index: Option<usize>) {
    let change = AssignTaskProblemFactChange::new(task, user).with_published(true);
    pending
        .assigned
        .entry(change.user().entity_id.clone())
        .or_default()
        .push(IndexedAssignment { index, change });
}

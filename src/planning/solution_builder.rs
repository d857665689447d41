//! Initial working solution from a task data snapshot.
//!
//! - `Ready` tasks are planned unassigned.
//! - `Reserved`, `InProgress` and `Suspended` tasks with an actual owner are
//!   pinned to that owner, in snapshot order. Owners missing from the user
//!   list are created on the fly.
//! - `Ready` tasks carrying a planning task from a previous plan are put back
//!   on the planned user unpinned, after the user's pinned tasks and ordered
//!   by their planned index.
//! - Owned tasks without an owner and finished tasks are left out.
//!
//! The planning user is always part of the result.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::{next_user_id, TaskData};
use crate::config::TaskAssigningConfig;
use crate::constants::{TaskStatus, DEFAULT_PLANNING_USER_ID, DEFAULT_TASK_DURATION};
use crate::error::Result;
use crate::models::{TaskAssigningSolution, TaskId, TaskOrUserRef, TaskVariable, User, UserId};
use crate::solver::listeners::{
    update_anchor, update_start_and_end_time, ListenerEvent, ListenerEventKind,
};
use crate::solver::score_director::TracingNotifier;
use crate::solver::task_helper::validate_priority;
use crate::validation::validate_solution;

#[derive(Debug, Clone)]
pub struct SolutionBuilder {
    id: i64,
    planning_user_id: String,
    default_task_duration: i64,
    users: Vec<User>,
    tasks: Vec<TaskData>,
}

impl SolutionBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            planning_user_id: DEFAULT_PLANNING_USER_ID.to_string(),
            default_task_duration: DEFAULT_TASK_DURATION,
            users: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: &TaskAssigningConfig) -> Self {
        self.planning_user_id = config.planning_user_id.clone();
        self.default_task_duration = config.default_task_duration;
        self
    }

    pub fn with_users<I>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = User>,
    {
        self.users.extend(users);
        self
    }

    pub fn with_tasks<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = TaskData>,
    {
        self.tasks.extend(tasks);
        self
    }

    pub fn build(self) -> Result<TaskAssigningSolution> {
        let mut solution =
            TaskAssigningSolution::new(self.id).with_planning_user_id(self.planning_user_id.clone());

        for user in self.users {
            let user_id = user.id;
            if !solution.add_user(user) {
                warn!(user_id, "Duplicate user ignored while building the solution");
            }
        }
        if solution.user_by_entity_id(&self.planning_user_id).is_none() {
            let id = next_user_id(&solution, std::iter::empty());
            solution.add_user(User::new(id, self.planning_user_id.clone()));
        }

        let mut chains: BTreeMap<UserId, Vec<TaskId>> = BTreeMap::new();
        let mut planned: BTreeMap<UserId, Vec<(usize, TaskId)>> = BTreeMap::new();
        for data in &self.tasks {
            let owner = match (data.status, data.actual_owner.as_deref()) {
                (TaskStatus::Ready, _) => data
                    .planning_task
                    .as_ref()
                    .map(|planning_task| (planning_task.assigned_user.as_str(), false)),
                (status, Some(owner)) if status.is_owned() => Some((owner, true)),
                _ => {
                    debug!(
                        task_id = data.task_id,
                        status = %data.status,
                        "Task left out of the initial solution"
                    );
                    continue;
                }
            };

            validate_priority(data.priority)?;
            let mut task = data.to_task(self.default_task_duration);

            if let Some((owner, pinned)) = owner {
                let existing = solution.user_by_entity_id(owner).map(|user| user.id);
                let user_id = match existing {
                    Some(user_id) => user_id,
                    None => {
                        let id = next_user_id(&solution, std::iter::empty());
                        debug!(user_id = id, entity_id = owner, "Adding unknown task owner");
                        solution.add_user(User::new(id, owner));
                        id
                    }
                };
                task.pinned = pinned;
                if pinned {
                    chains.entry(user_id).or_default().push(task.id);
                } else {
                    let index = data.planning_task.as_ref().map_or(0, |p| p.index);
                    planned.entry(user_id).or_default().push((index, task.id));
                }
            }
            solution.add_task(task)?;
        }

        for (user_id, mut indexed) in planned {
            indexed.sort_by_key(|&(index, _)| index);
            chains
                .entry(user_id)
                .or_default()
                .extend(indexed.into_iter().map(|(_, task_id)| task_id));
        }

        let mut notifier = TracingNotifier;
        for (user_id, task_ids) in &chains {
            let mut previous = TaskOrUserRef::User(*user_id);
            for &task_id in task_ids {
                solution.set_previous_task_or_user(task_id, Some(previous));
                previous = TaskOrUserRef::Task(task_id);
            }
            if let Some(&head) = task_ids.first() {
                refresh_shadow_variables(&mut solution, &mut notifier, head);
            }
        }
        let unassigned: Vec<TaskId> = solution
            .tasks()
            .iter()
            .filter(|task| !task.is_assigned())
            .map(|task| task.id)
            .collect();
        for task_id in unassigned {
            refresh_shadow_variables(&mut solution, &mut notifier, task_id);
        }

        validate_solution(&solution)?;
        debug!(
            solution_id = solution.id,
            users = solution.users().len(),
            tasks = solution.tasks().len(),
            "Initial solution built"
        );
        Ok(solution)
    }
}

fn refresh_shadow_variables(
    solution: &mut TaskAssigningSolution,
    notifier: &mut TracingNotifier,
    task: TaskId,
) {
    let event = ListenerEvent {
        kind: ListenerEventKind::VariableChanged(TaskVariable::PreviousTaskOrUser),
        task,
    };
    update_anchor(solution, notifier, event);
    update_start_and_end_time(solution, notifier, event);
}

//! # Real-Time Problem Fact Changes
//!
//! External mutations applied to a running plan between solving steps. Each
//! change runs against a [`ScoreDirector`], brackets every mutation with the
//! matching before/after notification and finishes by triggering the variable
//! listeners, so chain and pinning invariants hold again when it returns.
//!
//! Changes validate and look up everything they need before mutating, so a
//! failing change leaves the working solution untouched.
//!
//! Producers hand changes to a [`ProblemFactChangeQueue`] from any thread; the
//! solver thread drains it and applies the changes one at a time.

mod add_task;
mod add_user;
mod assign_task;
mod release_task;
mod remove_task;
mod task_property_change;

pub use add_task::AddTaskProblemFactChange;
pub use add_user::AddUserProblemFactChange;
pub use assign_task::AssignTaskProblemFactChange;
pub use release_task::ReleaseTaskProblemFactChange;
pub use remove_task::RemoveTaskProblemFactChange;
pub use task_property_change::TaskPropertyChangeProblemFactChange;

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use super::score_director::ScoreDirector;
use crate::error::{Result, TaskAssigningError};
use crate::logging::log_change_operation;
use crate::models::{TaskId, TaskOrUser, TaskOrUserRef, TaskVariable};

/// A real-time mutation of the working solution
pub trait ProblemFactChange: fmt::Debug + Send {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Outcome of applying a batch of queued changes
#[derive(Debug, Default)]
pub struct ChangeBatchReport {
    pub applied: usize,
    pub failures: Vec<(String, TaskAssigningError)>,
}

impl ChangeBatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Thread-safe FIFO of pending changes. Cloning shares the queue.
#[derive(Debug, Clone, Default)]
pub struct ProblemFactChangeQueue {
    pending: Arc<Mutex<VecDeque<Box<dyn ProblemFactChange>>>>,
}

impl ProblemFactChangeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_problem_fact_change(&self, change: Box<dyn ProblemFactChange>) {
        self.pending.lock().push_back(change);
    }

    pub fn add_problem_fact_changes<I>(&self, changes: I)
    where
        I: IntoIterator<Item = Box<dyn ProblemFactChange>>,
    {
        self.pending.lock().extend(changes);
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Applies every change queued so far, in order. The lock is released
    /// before any change runs; changes queued meanwhile wait for the next call.
    /// A failing change is reported and the remaining ones still apply.
    pub fn apply_pending(&self, director: &mut dyn ScoreDirector) -> ChangeBatchReport {
        let batch: Vec<Box<dyn ProblemFactChange>> = self.pending.lock().drain(..).collect();
        let mut report = ChangeBatchReport::default();

        for change in batch {
            match change.do_change(director) {
                Ok(()) => {
                    log_change_operation(change.name(), "applied", None);
                    report.applied += 1;
                }
                Err(error) => {
                    warn!(
                        change = change.name(),
                        error = %error,
                        "Problem fact change failed, continuing with the remaining changes"
                    );
                    let details = error.to_string();
                    log_change_operation(change.name(), "failed", Some(details.as_str()));
                    report.failures.push((format!("{change:?}"), error));
                }
            }
        }
        report
    }
}

/// Detaches a task from its chain by pointing its successor to its predecessor.
fn relink_successor_to_predecessor(director: &mut dyn ScoreDirector, task_id: TaskId) {
    let Some(task) = director.look_up_task(task_id) else {
        return;
    };
    let previous = task.previous_task_or_user();
    let Some(next) = task.next_task() else {
        return;
    };
    set_previous(director, next, previous);
}

/// Changes the planning variable of a task between its notifications.
fn set_previous(director: &mut dyn ScoreDirector, task_id: TaskId, previous: Option<TaskOrUserRef>) {
    director.before_variable_changed(task_id, TaskVariable::PreviousTaskOrUser);
    director
        .working_solution_mut()
        .set_previous_task_or_user(task_id, previous);
    director.after_variable_changed(task_id, TaskVariable::PreviousTaskOrUser);
}

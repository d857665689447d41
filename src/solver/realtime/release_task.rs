use tracing::debug;

use super::{relink_successor_to_predecessor, set_previous, ProblemFactChange};
use crate::constants::TaskStatus;
use crate::error::Result;
use crate::models::{TaskId, TaskOrUserRef};
use crate::solver::score_director::ScoreDirector;

/// Returns a task to the pool of unassigned tasks.
///
/// The task is unlinked from its chain rather than only unpinned, since an
/// unpinned task left in place could precede pinned ones. Absent tasks are a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseTaskProblemFactChange {
    task_id: TaskId,
}

impl ReleaseTaskProblemFactChange {
    pub fn new(task_id: TaskId) -> Self {
        Self { task_id }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }
}

impl ProblemFactChange for ReleaseTaskProblemFactChange {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()> {
        let Some(task) = director.look_up_task(self.task_id) else {
            debug!(task_id = self.task_id, "Task to release is not in the working solution");
            return Ok(());
        };
        let assigned = task.is_assigned();
        let needs_reset = task.pinned || task.status != TaskStatus::Ready;

        if assigned {
            relink_successor_to_predecessor(director, self.task_id);
            set_previous(director, self.task_id, None);
        }

        if needs_reset {
            let node = TaskOrUserRef::Task(self.task_id);
            director.before_problem_property_changed(node);
            if let Some(task) = director.working_solution_mut().task_mut(self.task_id) {
                task.pinned = false;
                task.status = TaskStatus::Ready;
            }
            director.after_problem_property_changed(node);
        }

        director.trigger_variable_listeners();
        debug!(task_id = self.task_id, was_assigned = assigned, "Task released");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "release_task"
    }
}

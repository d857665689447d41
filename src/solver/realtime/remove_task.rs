use tracing::debug;

use super::{relink_successor_to_predecessor, ProblemFactChange};
use crate::error::Result;
use crate::models::TaskId;
use crate::solver::score_director::ScoreDirector;

/// Removes a task from the working solution, closing the gap it leaves in its chain.
///
/// Removing a task that isn't in the working solution is a no-op: external
/// systems may race to remove the same task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveTaskProblemFactChange {
    task_id: TaskId,
}

impl RemoveTaskProblemFactChange {
    pub fn new(task_id: TaskId) -> Self {
        Self { task_id }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }
}

impl ProblemFactChange for RemoveTaskProblemFactChange {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()> {
        if director.look_up_task(self.task_id).is_none() {
            debug!(task_id = self.task_id, "Task to remove is not in the working solution");
            return Ok(());
        }

        relink_successor_to_predecessor(director, self.task_id);

        director.before_entity_removed(self.task_id);
        director.working_solution_mut().remove_task(self.task_id);
        director.after_entity_removed(self.task_id);

        director.trigger_variable_listeners();
        debug!(task_id = self.task_id, "Task removed");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "remove_task"
    }
}

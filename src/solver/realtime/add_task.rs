use tracing::debug;

use super::ProblemFactChange;
use crate::error::{Result, TaskAssigningError};
use crate::models::Task;
use crate::solver::score_director::ScoreDirector;
use crate::solver::task_helper::validate_priority;

/// Adds a new task to the working solution, unassigned and unpinned, for the
/// solver to plan.
#[derive(Debug, Clone)]
pub struct AddTaskProblemFactChange {
    task: Task,
}

impl AddTaskProblemFactChange {
    pub fn new(task: Task) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }
}

impl ProblemFactChange for AddTaskProblemFactChange {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()> {
        let task_id = self.task.id;
        if director.look_up_task(task_id).is_some() {
            return Err(TaskAssigningError::DuplicateTask(task_id));
        }
        validate_priority(self.task.priority)?;

        let mut task = self.task.clone();
        task.sanitize_planning_values();

        director.before_entity_added(task_id);
        director.working_solution_mut().add_task(task)?;
        director.after_entity_added(task_id);

        director.trigger_variable_listeners();
        debug!(task_id, "Task added to the working solution");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "add_task"
    }
}

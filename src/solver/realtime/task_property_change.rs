use tracing::debug;

use super::ProblemFactChange;
use crate::constants::TaskStatus;
use crate::error::Result;
use crate::models::{TaskId, TaskOrUserRef};
use crate::solver::score_director::ScoreDirector;
use crate::solver::task_helper::validate_priority;

/// Updates the priority and/or status of a planned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPropertyChangeProblemFactChange {
    task_id: TaskId,
    priority: Option<i32>,
    status: Option<TaskStatus>,
}

impl TaskPropertyChangeProblemFactChange {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            priority: None,
            status: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }
}

impl ProblemFactChange for TaskPropertyChangeProblemFactChange {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()> {
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        if director.look_up_task(self.task_id).is_none() {
            debug!(task_id = self.task_id, "Task to change is not in the working solution");
            return Ok(());
        }

        let node = TaskOrUserRef::Task(self.task_id);
        director.before_problem_property_changed(node);
        if let Some(task) = director.working_solution_mut().task_mut(self.task_id) {
            if let Some(priority) = self.priority {
                task.priority = priority;
            }
            if let Some(status) = self.status {
                task.status = status;
            }
        }
        director.after_problem_property_changed(node);

        debug!(
            task_id = self.task_id,
            priority = ?self.priority,
            status = ?self.status,
            "Task properties changed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "task_property_change"
    }
}

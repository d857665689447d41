use tracing::debug;

use super::{relink_successor_to_predecessor, set_previous, ProblemFactChange};
use crate::error::{Result, TaskAssigningError};
use crate::models::{
    Task, TaskAssigningSolution, TaskId, TaskOrUser, TaskOrUserRef, User, UserId,
};
use crate::solver::score_director::ScoreDirector;
use crate::solver::task_helper::validate_priority;

/// Assigns a task to a user and pins it, right after the user's pinned tasks.
///
/// The user must exist in the working solution. The task may be new, in which
/// case it's added, or already planned anywhere (including another user's
/// chain), in which case it's moved. With `with_published(true)` the working
/// task is also marked published, for tasks the user has already seen.
#[derive(Debug, Clone)]
pub struct AssignTaskProblemFactChange {
    task: Task,
    user: User,
    published: bool,
}

impl AssignTaskProblemFactChange {
    pub fn new(task: Task, user: User) -> Self {
        Self {
            task,
            user,
            published: false,
        }
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

/// Last pinned task of the user's chain, or the user itself when nothing is pinned.
pub(crate) fn find_insert_position(
    solution: &TaskAssigningSolution,
    user_id: UserId,
) -> TaskOrUserRef {
    let mut position = TaskOrUserRef::User(user_id);
    let mut next = solution.user(user_id).and_then(|user| user.next_task());
    while let Some(task) = next.and_then(|id| solution.task(id)) {
        if !task.pinned {
            break;
        }
        position = TaskOrUserRef::Task(task.id);
        next = task.next_task();
    }
    position
}

impl ProblemFactChange for AssignTaskProblemFactChange {
    fn do_change(&self, director: &mut dyn ScoreDirector) -> Result<()> {
        if director.look_up_user(self.user.id).is_none() {
            return Err(TaskAssigningError::UserNotFound {
                user: self.user.to_string(),
            });
        }

        let task_id = self.task.id;
        let solution = director.working_solution();
        let is_new = !solution.contains_task(task_id);
        if is_new {
            validate_priority(self.task.priority)?;
        }
        let insert_position = find_insert_position(solution, self.user.id);
        let insert_position_next = solution
            .node(insert_position)
            .and_then(|node| node.next_task());

        if insert_position == TaskOrUserRef::Task(task_id) {
            debug!(
                task_id,
                user_id = self.user.id,
                "Task is already pinned at the insert position"
            );
            let unpublished = solution.task(task_id).is_some_and(|task| !task.published);
            if self.published && unpublished {
                pin(director, task_id, true);
                director.trigger_variable_listeners();
            }
            return Ok(());
        }

        if insert_position_next == Some(task_id) {
            debug!(
                task_id,
                user_id = self.user.id,
                "Task already follows the insert position, pinning it"
            );
            pin(director, task_id, self.published);
            director.trigger_variable_listeners();
            return Ok(());
        }

        if is_new {
            let mut task = self.task.clone();
            task.sanitize_planning_values();
            director.before_entity_added(task_id);
            let solution = director.working_solution_mut();
            solution.add_task(task)?;
            solution.set_previous_task_or_user(task_id, Some(insert_position));
            director.after_entity_added(task_id);
        } else {
            relink_successor_to_predecessor(director, task_id);
            set_previous(director, task_id, Some(insert_position));
        }

        if let Some(next) = insert_position_next {
            set_previous(director, next, Some(TaskOrUserRef::Task(task_id)));
        }

        pin(director, task_id, self.published);
        director.trigger_variable_listeners();

        debug!(
            task_id,
            user_id = self.user.id,
            new_task = is_new,
            insert_after = %insert_position,
            "Task assigned and pinned"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "assign_task"
    }
}

fn pin(director: &mut dyn ScoreDirector, task_id: TaskId, publish: bool) {
    let node = TaskOrUserRef::Task(task_id);
    director.before_problem_property_changed(node);
    if let Some(task) = director.working_solution_mut().task_mut(task_id) {
        task.pinned = true;
        task.published |= publish;
    }
    director.after_problem_property_changed(node);
}

//! Structural validation of a working solution
//!
//! Checks the invariants every problem fact change must restore before
//! returning: consistent chain links and inverse pointers, anchors matching the
//! chain head, start/end times following the chain, and pinned tasks forming
//! a prefix of each chain.

use std::collections::HashSet;

use crate::error::{Result, TaskAssigningError};
use crate::models::{TaskAssigningSolution, TaskOrUser, TaskOrUserRef};

/// Validates every chain of the solution, failing on the first violation found
pub fn validate_solution(solution: &TaskAssigningSolution) -> Result<()> {
    let mut visited = HashSet::new();

    for user in solution.users() {
        validate_chain(solution, user.id, &mut visited)?;
    }

    for task in solution.tasks() {
        if visited.contains(&task.id) {
            continue;
        }
        if task.is_assigned() {
            return Err(violation(format!(
                "task {} is linked but not reachable from any user",
                task.id
            )));
        }
        if task.next_task().is_some() {
            return Err(violation(format!(
                "unassigned task {} still points to a next task",
                task.id
            )));
        }
        if task.user().is_some() {
            return Err(violation(format!(
                "unassigned task {} still has a user",
                task.id
            )));
        }
        if task.pinned {
            return Err(violation(format!("unassigned task {} is pinned", task.id)));
        }
    }

    Ok(())
}

fn validate_chain(
    solution: &TaskAssigningSolution,
    user_id: i64,
    visited: &mut HashSet<i64>,
) -> Result<()> {
    let mut previous = TaskOrUserRef::User(user_id);
    let mut previous_end = 0;
    let mut pinned_prefix = true;
    let mut next = solution.user(user_id).and_then(|user| user.next_task());

    while let Some(task_id) = next {
        let task = solution.task(task_id).ok_or_else(|| {
            violation(format!("{previous} points to unknown task {task_id}"))
        })?;
        if !visited.insert(task_id) {
            return Err(violation(format!(
                "task {task_id} is reachable twice, chains must not share or cycle"
            )));
        }
        if task.previous_task_or_user() != Some(previous) {
            return Err(violation(format!(
                "task {task_id} follows {previous} but its previous is {:?}",
                task.previous_task_or_user()
            )));
        }
        if task.user() != Some(user_id) {
            return Err(violation(format!(
                "task {task_id} is in the chain of user {user_id} but anchored to {:?}",
                task.user()
            )));
        }
        if task.start_time() != Some(previous_end) {
            return Err(violation(format!(
                "task {task_id} starts at {:?}, expected {previous_end}",
                task.start_time()
            )));
        }
        let expected_end = previous_end + task.duration;
        if task.end_time() != Some(expected_end) {
            return Err(violation(format!(
                "task {task_id} ends at {:?}, expected {expected_end}",
                task.end_time()
            )));
        }
        if task.pinned && !pinned_prefix {
            return Err(violation(format!(
                "pinned task {task_id} follows an unpinned task in the chain of user {user_id}"
            )));
        }
        pinned_prefix &= task.pinned;

        previous = TaskOrUserRef::Task(task_id);
        previous_end = expected_end;
        next = task.next_task();
    }

    Ok(())
}

fn violation(message: String) -> TaskAssigningError {
    TaskAssigningError::ChainInvariantViolation(message)
}

//! # Planning
//!
//! Bridges externally observed task data and the working solution: the
//! [`SolutionBuilder`] creates the initial solution, the
//! [`SolutionChangesBuilder`] computes the problem fact changes that bring a
//! running solution up to date.

pub mod solution_builder;
pub mod solution_changes_builder;
pub mod task_data;

pub use solution_builder::SolutionBuilder;
pub use solution_changes_builder::SolutionChangesBuilder;
pub use task_data::{PlanningTask, TaskData};

use crate::models::{TaskAssigningSolution, UserId};

/// Id for a user created on the fly, one past the highest id in use
pub(crate) fn next_user_id<'a, I>(solution: &TaskAssigningSolution, extra: I) -> UserId
where
    I: IntoIterator<Item = &'a UserId>,
{
    solution
        .users()
        .iter()
        .map(|user| user.id)
        .chain(extra.into_iter().copied())
        .max()
        .map_or(1, |max| max + 1)
}

//! # Score Calculation
//!
//! Bendable score with one hard and four soft levels:
//!
//! | Level  | Constraint                                                        |
//! |--------|-------------------------------------------------------------------|
//! | hard 0 | -1 per assigned task whose user isn't a potential owner           |
//! | soft 0 | -1 per task parked on the planning user                           |
//! | soft 1 | weighted lateness penalty of high priority tasks (0-2)            |
//! | soft 2 | weighted lateness penalty of medium priority tasks (3-6)          |
//! | soft 3 | weighted lateness penalty of low priority tasks (7-10)            |
//!
//! Scores compare lexicographically, hard level first.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::task_helper::{accepts_assigned_user, weighted_penalty, PriorityBand};
use crate::error::Result;
use crate::models::{TaskAssigningSolution, TaskOrUser};

pub const SOFT_LEVELS: usize = 4;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TaskAssigningScore {
    pub hard: i64,
    pub soft: [i64; SOFT_LEVELS],
}

impl TaskAssigningScore {
    pub fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl fmt::Display for TaskAssigningScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let soft: Vec<String> = self.soft.iter().map(|level| level.to_string()).collect();
        write!(f, "[{}]hard/[{}]soft", self.hard, soft.join("/"))
    }
}

/// Full recalculation over every assigned task of the working solution.
pub fn calculate_score(solution: &TaskAssigningSolution) -> Result<TaskAssigningScore> {
    let mut score = TaskAssigningScore::default();

    for task in solution.tasks().iter().filter(|task| task.is_assigned()) {
        if !accepts_assigned_user(task, solution) {
            score.hard -= 1;
        }

        let on_planning_user = task
            .user()
            .and_then(|id| solution.user(id))
            .map(|user| solution.is_planning_user(user))
            .unwrap_or(false);
        if on_planning_user {
            score.soft[0] -= 1;
        }

        let level = match PriorityBand::of(task.priority)? {
            PriorityBand::High => 1,
            PriorityBand::Medium => 2,
            PriorityBand::Low => 3,
        };
        score.soft[level] += weighted_penalty(task.priority, task.end_time().unwrap_or(0))?;
    }

    Ok(score)
}

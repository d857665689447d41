//! Priority classification, lateness penalties and potential owner checks
//! feeding the score calculation.

use serde::{Deserialize, Serialize};

use crate::constants::{priority_bands, MAX_PRIORITY, MIN_PRIORITY};
use crate::error::{Result, TaskAssigningError};
use crate::models::{OrganizationalEntity, Task, TaskAssigningSolution, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    /// Priorities 0 to 2
    High,
    /// Priorities 3 to 6
    Medium,
    /// Priorities 7 to 10
    Low,
}

impl PriorityBand {
    pub fn of(priority: i32) -> Result<Self> {
        let priority = validate_priority(priority)?;
        Ok(if priority <= priority_bands::HIGH_MAX {
            Self::High
        } else if priority <= priority_bands::MEDIUM_MAX {
            Self::Medium
        } else {
            Self::Low
        })
    }
}

/// Fails fast on priorities outside `[0, 10]`; they are never clamped.
pub fn validate_priority(priority: i32) -> Result<i32> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(priority)
    } else {
        Err(TaskAssigningError::InvalidPriority(priority))
    }
}

pub fn is_high_level(priority: i32) -> Result<bool> {
    Ok(PriorityBand::of(priority)? == PriorityBand::High)
}

pub fn is_medium_level(priority: i32) -> Result<bool> {
    Ok(PriorityBand::of(priority)? == PriorityBand::Medium)
}

pub fn is_low_level(priority: i32) -> Result<bool> {
    Ok(PriorityBand::of(priority)? == PriorityBand::Low)
}

/// Lateness penalty `-(11 - priority) * end_time`: the more important the
/// task, the more every minute of delay costs.
pub fn weighted_penalty(priority: i32, end_time: i64) -> Result<i64> {
    let priority = validate_priority(priority)?;
    Ok(-(i64::from(MAX_PRIORITY + 1 - priority)) * end_time)
}

/// A user is a potential owner when named directly or through one of its groups.
pub fn is_potential_owner(task: &Task, user: &User) -> bool {
    task.potential_owners.iter().any(|owner| match owner {
        OrganizationalEntity::User(entity_id) => *entity_id == user.entity_id,
        OrganizationalEntity::Group(group_id) => user.is_member_of(group_id),
    })
}

/// Whether the user currently anchoring the task may execute it. The planning
/// user belongs to every group by definition, unassigned tasks accept nobody.
pub fn accepts_assigned_user(task: &Task, solution: &TaskAssigningSolution) -> bool {
    match task.user().and_then(|id| solution.user(id)) {
        Some(user) if solution.is_planning_user(user) => true,
        Some(user) => is_potential_owner(task, user),
        None => false,
    }
}

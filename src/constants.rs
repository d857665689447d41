//! # System Constants
//!
//! Core constants and enums that define the operational boundaries of the
//! task assigning model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity id of the planning user by default.
pub const DEFAULT_PLANNING_USER_ID: &str = "planninguser";

/// Duration (in minutes) assumed for a task when none is provided.
pub const DEFAULT_TASK_DURATION: i64 = 1;

pub const MIN_PRIORITY: i32 = 0;
pub const MAX_PRIORITY: i32 = 10;

/// Priority bands, inclusive upper bounds.
pub mod priority_bands {
    pub const HIGH_MAX: i32 = 2;
    pub const MEDIUM_MAX: i32 = 6;
}

/// Human task status as observed in the workload system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Ready,
    Reserved,
    InProgress,
    Suspended,
    Completed,
    Failed,
    Error,
    Exited,
    Obsolete,
}

impl TaskStatus {
    /// Statuses where the task has an actual owner working (or about to work) on it
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Reserved | Self::InProgress | Self::Suspended)
    }

    /// Statuses after which the task never comes back to the plan
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Error | Self::Exited | Self::Obsolete
        )
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Ready
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Reserved => write!(f, "reserved"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Suspended => write!(f, "suspended"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Error => write!(f, "error"),
            Self::Exited => write!(f, "exited"),
            Self::Obsolete => write!(f, "obsolete"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(Self::Ready),
            "reserved" => Ok(Self::Reserved),
            "in_progress" => Ok(Self::InProgress),
            "suspended" => Ok(Self::Suspended),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "error" => Ok(Self::Error),
            "exited" => Ok(Self::Exited),
            "obsolete" => Ok(Self::Obsolete),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

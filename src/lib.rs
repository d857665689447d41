#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Task Assigning Core
//!
//! Chained task-assignment model for planning human tasks on users.
//!
//! ## Overview
//!
//! Every user heads a chain of tasks it will work on in order. Each task points
//! back to the task or user it follows; the rest of the chain state (anchor
//! user, next task, start and end times) is derived and kept consistent by
//! variable listeners whenever a chain link changes.
//!
//! ```text
//! john -> 10* -> 12* -> 15
//! mary -> 11
//! ```
//!
//! Tasks marked `*` are pinned: the host solver may not move them, and they
//! always form a prefix of their chain.
//!
//! ## Module Organization
//!
//! - [`models`] - Users, tasks, chain nodes and the working solution arena
//! - [`solver`] - Score director contract, listeners, scoring and real-time changes
//! - [`planning`] - Building solutions and change sets from task data snapshots
//! - [`validation`] - Structural checks of a working solution
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use task_assigning::models::{Task, User};
//! use task_assigning::planning::SolutionBuilder;
//! use task_assigning::solver::{
//!     AssignTaskProblemFactChange, IncrementalScoreDirector, ProblemFactChange,
//! };
//!
//! # fn example() -> task_assigning::Result<()> {
//! let solution = SolutionBuilder::new(1)
//!     .with_users([User::new(1, "john")])
//!     .build()?;
//! let mut director = IncrementalScoreDirector::new(solution);
//!
//! let change = AssignTaskProblemFactChange::new(
//!     Task::new(10, "Approve invoice", 2).with_duration(30),
//!     User::new(1, "john"),
//! );
//! change.do_change(&mut director)?;
//!
//! println!("score: {}", director.calculate_score()?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;
pub mod planning;
pub mod solver;
pub mod validation;

pub use config::{LogFormat, LoggingConfig, TaskAssigningConfig};
pub use constants::TaskStatus;
pub use error::{Result, TaskAssigningError};
pub use models::{
    Group, OrganizationalEntity, Task, TaskAssigningSolution, TaskId, TaskOrUser, TaskOrUserRef,
    User, UserId,
};
pub use planning::{PlanningTask, SolutionBuilder, SolutionChangesBuilder, TaskData};
pub use solver::{
    ChangeEvent, ChangeLog, ChangeNotifier, IncrementalScoreDirector, ProblemFactChange,
    ProblemFactChangeQueue, ScoreDirector, TaskAssigningScore, TracingNotifier,
};
pub use validation::validate_solution;

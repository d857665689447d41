//! # Solver Support
//!
//! Everything a host solver needs to plan tasks on the chained model: the
//! score director contract and its incremental implementation, the shadow
//! variable listeners, the difficulty comparator, score calculation and the
//! real-time problem fact changes.

pub mod difficulty;
pub mod listeners;
pub mod realtime;
pub mod score;
pub mod score_director;
pub mod task_helper;

pub use difficulty::TaskDifficultyComparator;
pub use listeners::{
    EntityKind, ListenerEvent, ListenerEventKind, VariableListenerFn, VariableListenerTable,
};
pub use realtime::{
    AddTaskProblemFactChange, AddUserProblemFactChange, AssignTaskProblemFactChange,
    ChangeBatchReport, ProblemFactChange, ProblemFactChangeQueue, ReleaseTaskProblemFactChange,
    RemoveTaskProblemFactChange, TaskPropertyChangeProblemFactChange,
};
pub use score::{calculate_score, TaskAssigningScore};
pub use score_director::{
    ChangeEvent, ChangeLog, ChangeNotifier, IncrementalScoreDirector, ScoreDirector,
    TracingNotifier,
};
pub use task_helper::PriorityBand;

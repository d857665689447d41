//! # Score Director
//!
//! The working-solution container a host solver exposes to problem fact changes.
//!
//! ## Overview
//!
//! Every structural mutation of the working solution is bracketed by a
//! before/after notification so the host can keep its incremental score
//! consistent. Notifications reach a [`ChangeNotifier`] sink. After-notifications
//! on the chain planning variable are also queued for the variable listeners,
//! which only run when [`ScoreDirector::trigger_variable_listeners`] is called.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::listeners::{ListenerEvent, ListenerEventKind, VariableListenerTable};
use super::score::{calculate_score, TaskAssigningScore};
use crate::error::Result;
use crate::models::{
    Task, TaskAssigningSolution, TaskId, TaskOrUserRef, TaskVariable, User, UserId,
};

/// A single notification emitted around a working solution mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    BeforeVariableChanged { task: TaskId, variable: TaskVariable },
    AfterVariableChanged { task: TaskId, variable: TaskVariable },
    BeforeEntityAdded { task: TaskId },
    AfterEntityAdded { task: TaskId },
    BeforeEntityRemoved { task: TaskId },
    AfterEntityRemoved { task: TaskId },
    BeforeProblemPropertyChanged { node: TaskOrUserRef },
    AfterProblemPropertyChanged { node: TaskOrUserRef },
    BeforeProblemFactAdded { user: UserId },
    AfterProblemFactAdded { user: UserId },
    VariableListenersTriggered,
}

/// Sink for change notifications, typically the host's incremental score calculator
pub trait ChangeNotifier {
    fn notify(&mut self, event: ChangeEvent);
}

/// Notifier that only traces events, keeping no state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingNotifier;

impl ChangeNotifier for TracingNotifier {
    fn notify(&mut self, event: ChangeEvent) {
        trace!(?event, "Change notification");
    }
}

/// Notifier that records every event in order. Events are kept until
/// [`ChangeLog::clear`], so long-running hosts should drain it or use
/// [`TracingNotifier`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    events: Vec<ChangeEvent>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ChangeEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ChangeNotifier for ChangeLog {
    fn notify(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }
}

/// Contract a problem fact change relies on when mutating the working solution
pub trait ScoreDirector {
    fn working_solution(&self) -> &TaskAssigningSolution;

    fn working_solution_mut(&mut self) -> &mut TaskAssigningSolution;

    fn before_variable_changed(&mut self, task: TaskId, variable: TaskVariable);
    fn after_variable_changed(&mut self, task: TaskId, variable: TaskVariable);

    fn before_entity_added(&mut self, task: TaskId);
    fn after_entity_added(&mut self, task: TaskId);

    fn before_entity_removed(&mut self, task: TaskId);
    fn after_entity_removed(&mut self, task: TaskId);

    fn before_problem_property_changed(&mut self, node: TaskOrUserRef);
    fn after_problem_property_changed(&mut self, node: TaskOrUserRef);

    fn before_problem_fact_added(&mut self, user: UserId);
    fn after_problem_fact_added(&mut self, user: UserId);

    /// Runs pending variable listeners now instead of deferring them
    fn trigger_variable_listeners(&mut self);

    /// Resolves an externally supplied user to its working counterpart
    fn look_up_user(&self, id: UserId) -> Option<&User> {
        self.working_solution().user(id)
    }

    /// Resolves an externally supplied task to its working counterpart
    fn look_up_task(&self, id: TaskId) -> Option<&Task> {
        self.working_solution().task(id)
    }
}

/// Score director owning the working solution, a notification sink and the
/// variable listener table
#[derive(Debug)]
pub struct IncrementalScoreDirector<N: ChangeNotifier = TracingNotifier> {
    solution: TaskAssigningSolution,
    notifier: N,
    listeners: VariableListenerTable,
    pending: Vec<ListenerEvent>,
}

impl IncrementalScoreDirector<TracingNotifier> {
    pub fn new(solution: TaskAssigningSolution) -> Self {
        Self::with_notifier(solution, TracingNotifier)
    }
}

impl IncrementalScoreDirector<ChangeLog> {
    /// Director recording every notification in a [`ChangeLog`]
    pub fn recording(solution: TaskAssigningSolution) -> Self {
        Self::with_notifier(solution, ChangeLog::new())
    }
}

impl<N: ChangeNotifier> IncrementalScoreDirector<N> {
    pub fn with_notifier(solution: TaskAssigningSolution, notifier: N) -> Self {
        Self {
            solution,
            notifier,
            listeners: VariableListenerTable::task_assigning_defaults(),
            pending: Vec::new(),
        }
    }

    pub fn with_listeners(mut self, listeners: VariableListenerTable) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Number of listener notifications waiting for the next trigger
    pub fn pending_listener_events(&self) -> usize {
        self.pending.len()
    }

    pub fn calculate_score(&self) -> Result<TaskAssigningScore> {
        calculate_score(&self.solution)
    }

    pub fn into_solution(self) -> TaskAssigningSolution {
        self.solution
    }

    fn emit(&mut self, event: ChangeEvent) {
        trace!(event = ?event, "Score director notification");
        self.notifier.notify(event);
    }

    fn enqueue(&mut self, kind: ListenerEventKind, task: TaskId) {
        self.pending.push(ListenerEvent { kind, task });
    }
}

impl<N: ChangeNotifier> ScoreDirector for IncrementalScoreDirector<N> {
    fn working_solution(&self) -> &TaskAssigningSolution {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut TaskAssigningSolution {
        &mut self.solution
    }

    fn before_variable_changed(&mut self, task: TaskId, variable: TaskVariable) {
        self.emit(ChangeEvent::BeforeVariableChanged { task, variable });
    }

    fn after_variable_changed(&mut self, task: TaskId, variable: TaskVariable) {
        self.emit(ChangeEvent::AfterVariableChanged { task, variable });
        self.enqueue(ListenerEventKind::VariableChanged(variable), task);
    }

    fn before_entity_added(&mut self, task: TaskId) {
        self.emit(ChangeEvent::BeforeEntityAdded { task });
    }

    fn after_entity_added(&mut self, task: TaskId) {
        self.emit(ChangeEvent::AfterEntityAdded { task });
        self.enqueue(ListenerEventKind::EntityAdded, task);
    }

    fn before_entity_removed(&mut self, task: TaskId) {
        self.emit(ChangeEvent::BeforeEntityRemoved { task });
    }

    fn after_entity_removed(&mut self, task: TaskId) {
        self.emit(ChangeEvent::AfterEntityRemoved { task });
        self.enqueue(ListenerEventKind::EntityRemoved, task);
    }

    fn before_problem_property_changed(&mut self, node: TaskOrUserRef) {
        self.emit(ChangeEvent::BeforeProblemPropertyChanged { node });
    }

    fn after_problem_property_changed(&mut self, node: TaskOrUserRef) {
        self.emit(ChangeEvent::AfterProblemPropertyChanged { node });
    }

    fn before_problem_fact_added(&mut self, user: UserId) {
        self.emit(ChangeEvent::BeforeProblemFactAdded { user });
    }

    fn after_problem_fact_added(&mut self, user: UserId) {
        self.emit(ChangeEvent::AfterProblemFactAdded { user });
    }

    fn trigger_variable_listeners(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        trace!(pending = pending.len(), "Triggering variable listeners");
        for event in pending {
            self.listeners
                .dispatch(&mut self.solution, &mut self.notifier, event);
        }
        self.notifier.notify(ChangeEvent::VariableListenersTriggered);
    }
}

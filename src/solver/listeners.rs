//! # Variable Listeners
//!
//! Shadow variable maintenance for the chained model. Listeners are plain
//! functions registered in a [`VariableListenerTable`] keyed by entity kind and
//! source variable; the score director dispatches queued events to them when
//! listeners are triggered.
//!
//! Two listeners are registered on `previous_task_or_user` by default:
//!
//! - the anchor listener keeps `user` equal to the chain head;
//! - the start/end time listener keeps `start == previous.end` and
//!   `end == start + duration` down the chain.
//!
//! Both walk down the chain from the changed task and stop as soon as they
//! reach a task whose value is already correct, since everything after it was
//! consistent before the change.

use std::collections::HashMap;
use std::fmt;

use super::score_director::{ChangeEvent, ChangeNotifier};
use crate::models::{
    TaskAssigningSolution, TaskId, TaskOrUser, TaskOrUserRef, TaskVariable, UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerEventKind {
    EntityAdded,
    VariableChanged(TaskVariable),
    EntityRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerEvent {
    pub kind: ListenerEventKind,
    pub task: TaskId,
}

impl ListenerEvent {
    pub fn entity_kind(&self) -> EntityKind {
        EntityKind::Task
    }
}

pub type VariableListenerFn =
    Box<dyn Fn(&mut TaskAssigningSolution, &mut dyn ChangeNotifier, ListenerEvent) + Send + Sync>;

struct RegisteredListener {
    name: &'static str,
    source: TaskVariable,
    callback: VariableListenerFn,
}

/// Listener registrations, dispatched in registration order
#[derive(Default)]
pub struct VariableListenerTable {
    listeners: HashMap<EntityKind, Vec<RegisteredListener>>,
}

impl VariableListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the anchor and start/end time listeners of the chained model
    pub fn task_assigning_defaults() -> Self {
        let mut table = Self::new();
        table.register(
            EntityKind::Task,
            TaskVariable::PreviousTaskOrUser,
            "anchor",
            update_anchor,
        );
        table.register(
            EntityKind::Task,
            TaskVariable::PreviousTaskOrUser,
            "start_and_end_time",
            update_start_and_end_time,
        );
        table
    }

    pub fn register<F>(
        &mut self,
        entity: EntityKind,
        source: TaskVariable,
        name: &'static str,
        callback: F,
    ) where
        F: Fn(&mut TaskAssigningSolution, &mut dyn ChangeNotifier, ListenerEvent)
            + Send
            + Sync
            + 'static,
    {
        self.listeners
            .entry(entity)
            .or_default()
            .push(RegisteredListener {
                name,
                source,
                callback: Box::new(callback),
            });
    }

    pub fn listener_names(&self, entity: EntityKind) -> Vec<&'static str> {
        self.listeners
            .get(&entity)
            .map(|listeners| listeners.iter().map(|l| l.name).collect())
            .unwrap_or_default()
    }

    /// Entity added/removed events reach every listener of the entity kind,
    /// variable changes only the listeners sourced on that variable.
    pub fn dispatch(
        &self,
        solution: &mut TaskAssigningSolution,
        notifier: &mut dyn ChangeNotifier,
        event: ListenerEvent,
    ) {
        let Some(listeners) = self.listeners.get(&event.entity_kind()) else {
            return;
        };
        for listener in listeners {
            if let ListenerEventKind::VariableChanged(variable) = event.kind {
                if variable != listener.source {
                    continue;
                }
            }
            (listener.callback)(&mut *solution, &mut *notifier, event);
        }
    }
}

impl fmt::Debug for VariableListenerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (entity, listeners) in &self.listeners {
            let names: Vec<&str> = listeners.iter().map(|l| l.name).collect();
            map.entry(entity, &names);
        }
        map.finish()
    }
}

/// Keeps the anchor shadow variable equal to the user heading the chain.
pub fn update_anchor(
    solution: &mut TaskAssigningSolution,
    notifier: &mut dyn ChangeNotifier,
    event: ListenerEvent,
) {
    if event.kind == ListenerEventKind::EntityRemoved {
        return;
    }
    let Some(source) = solution.task(event.task) else {
        return;
    };
    let anchor: Option<UserId> = match source.previous_task_or_user() {
        None => None,
        Some(TaskOrUserRef::User(user_id)) => Some(user_id),
        Some(TaskOrUserRef::Task(task_id)) => solution.task(task_id).and_then(|t| t.user()),
    };

    let mut current = Some(event.task);
    while let Some(task_id) = current {
        let Some(task) = solution.task(task_id) else {
            break;
        };
        if task.user() == anchor {
            break;
        }
        let next = task.next_task();

        notifier.notify(ChangeEvent::BeforeVariableChanged {
            task: task_id,
            variable: TaskVariable::User,
        });
        if let Some(task) = solution.task_mut(task_id) {
            task.user = anchor;
        }
        notifier.notify(ChangeEvent::AfterVariableChanged {
            task: task_id,
            variable: TaskVariable::User,
        });

        current = next;
    }
}

/// Recomputes start and end times from the changed task down its chain.
///
/// A task starts when its predecessor ends; a task without predecessor, or
/// whose predecessor has no end time yet, starts at 0.
pub fn update_start_and_end_time(
    solution: &mut TaskAssigningSolution,
    notifier: &mut dyn ChangeNotifier,
    event: ListenerEvent,
) {
    if event.kind == ListenerEventKind::EntityRemoved {
        return;
    }
    let Some(source) = solution.task(event.task) else {
        return;
    };
    let mut start_time = source
        .previous_task_or_user()
        .and_then(|previous| solution.end_time_of(previous))
        .unwrap_or(0);

    let mut current = Some(event.task);
    while let Some(task_id) = current {
        let Some(task) = solution.task(task_id) else {
            break;
        };
        if task.start_time() == Some(start_time) {
            break;
        }
        let end_time = start_time + task.duration;
        let next = task.next_task();

        notifier.notify(ChangeEvent::BeforeVariableChanged {
            task: task_id,
            variable: TaskVariable::StartTime,
        });
        if let Some(task) = solution.task_mut(task_id) {
            task.start_time = Some(start_time);
        }
        notifier.notify(ChangeEvent::AfterVariableChanged {
            task: task_id,
            variable: TaskVariable::StartTime,
        });

        notifier.notify(ChangeEvent::BeforeVariableChanged {
            task: task_id,
            variable: TaskVariable::EndTime,
        });
        if let Some(task) = solution.task_mut(task_id) {
            task.end_time = Some(end_time);
        }
        notifier.notify(ChangeEvent::AfterVariableChanged {
            task: task_id,
            variable: TaskVariable::EndTime,
        });

        start_time = end_time;
        current = next;
    }
}

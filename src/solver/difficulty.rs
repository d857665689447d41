use std::cmp::Ordering;

use crate::models::Task;

/// Orders tasks for the construction heuristic: most important first (lowest
/// numeric priority), ties broken by ascending id so the order is total and
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskDifficultyComparator;

impl TaskDifficultyComparator {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

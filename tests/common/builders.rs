//! Fixtures shared by the integration tests.
//!
//! Users built by [`director_with_users`] keep their ids; the planning user is
//! appended with the next free id. Directors record their notifications.

pub type Director = IncrementalScoreDirector<ChangeLog>;

use task_assigning::models::{OrganizationalEntity, Task, TaskId, TaskOrUser, User, UserId};
use task_assigning::planning::{SolutionBuilder, TaskData};
use task_assigning::solver::{
    AssignTaskProblemFactChange, ChangeLog, IncrementalScoreDirector, ProblemFactChange,
    ScoreDirector,
};
use task_assigning::{TaskAssigningConfig, TaskAssigningSolution};

pub const JOHN: UserId = 1;
pub const MARY: UserId = 2;

pub fn john() -> User {
    User::new(JOHN, "john").with_groups(["HR"])
}

pub fn mary() -> User {
    User::new(MARY, "mary").with_groups(["IT"])
}

pub fn task(id: TaskId, priority: i32, duration: i64) -> Task {
    Task::new(id, format!("Task_{id}"), priority)
        .with_duration(duration)
        .with_potential_owners([OrganizationalEntity::group("HR")])
}

pub fn solution_with_users() -> TaskAssigningSolution {
    SolutionBuilder::new(1)
        .with_users([john(), mary()])
        .build()
        .expect("valid solution")
}

pub fn director_with_users() -> Director {
    IncrementalScoreDirector::recording(solution_with_users())
}

/// Director built from a task data snapshot, every task lasting `duration`
pub fn director_from_snapshot(tasks: Vec<TaskData>, duration: i64) -> Director {
    let config = TaskAssigningConfig {
        default_task_duration: duration,
        ..TaskAssigningConfig::default()
    };
    let solution = SolutionBuilder::new(1)
        .with_config(&config)
        .with_users([john(), mary()])
        .with_tasks(tasks)
        .build()
        .expect("valid snapshot");
    IncrementalScoreDirector::recording(solution)
}

pub fn assign(director: &mut Director, task: Task, user: User) {
    AssignTaskProblemFactChange::new(task, user)
        .do_change(director)
        .expect("assignment applies");
}

/// Director where each user's tasks were assigned, and therefore pinned, in order
pub fn director_with_pinned_chains(chains: &[(User, Vec<Task>)]) -> Director {
    let mut director = director_with_users();
    for (user, tasks) in chains {
        for task in tasks {
            assign(&mut director, task.clone(), user.clone());
        }
    }
    director.notifier_mut().clear();
    director
}

pub fn chain(director: &Director, user: UserId) -> Vec<TaskId> {
    director.working_solution().chain(user)
}

pub fn times(director: &Director, ids: &[TaskId]) -> Vec<(i64, i64)> {
    ids.iter()
        .filter_map(|id| director.look_up_task(*id))
        .map(|task| {
            (
                task.start_time().unwrap_or(-1),
                task.end_time().unwrap_or(-1),
            )
        })
        .collect()
}

pub fn is_pinned(director: &Director, id: TaskId) -> bool {
    director
        .look_up_task(id)
        .map(|task| task.pinned)
        .unwrap_or(false)
}

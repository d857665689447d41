use task_assigning::constants::TaskStatus;
use task_assigning::models::User;
use task_assigning::solver::{
    AddTaskProblemFactChange, AddUserProblemFactChange, ChangeEvent, ProblemFactChange,
    ReleaseTaskProblemFactChange, ScoreDirector, TaskPropertyChangeProblemFactChange,
};
use task_assigning::{validate_solution, TaskAssigningError};

use crate::common::*;

#[test]
fn test_add_task_is_planned_unassigned() {
    let mut director = director_with_users();

    AddTaskProblemFactChange::new(task(5, 4, 25))
        .do_change(&mut director)
        .expect("task added");

    let task = director.look_up_task(5).expect("task present");
    assert!(!task.is_assigned());
    assert!(!task.pinned);
    assert_eq!(task.user(), None);
    assert_eq!(times(&director, &[5]), vec![(0, 25)]);
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

#[test]
fn test_add_duplicate_task_fails() {
    let mut director = director_with_pinned_chains(&[(john(), vec![task(5, 4, 25)])]);

    let result = AddTaskProblemFactChange::new(task(5, 4, 25)).do_change(&mut director);

    assert_eq!(result, Err(TaskAssigningError::DuplicateTask(5)));
    assert!(director.notifier().is_empty());
}

#[test]
fn test_add_user_then_assign() {
    let mut director = director_with_users();
    let katy = User::new(7, "katy");

    AddUserProblemFactChange::new(katy.clone())
        .do_change(&mut director)
        .expect("user added");
    AddUserProblemFactChange::new(katy.clone())
        .do_change(&mut director)
        .expect("adding twice is a no-op");
    assign(&mut director, task(1, 3, 10), katy);

    assert_eq!(chain(&director, 7), vec![1]);
    let added: Vec<&ChangeEvent> = director
        .notifier()
        .events()
        .iter()
        .filter(|event| matches!(event, ChangeEvent::AfterProblemFactAdded { user: 7 }))
        .collect();
    assert_eq!(added.len(), 1);
}

#[test]
fn test_release_unlinks_and_unpins() {
    let mut director = director_with_pinned_chains(&[(
        john(),
        vec![task(1, 3, 10), task(2, 3, 10), task(3, 3, 10)],
    )]);

    ReleaseTaskProblemFactChange::new(2)
        .do_change(&mut director)
        .expect("release applies");

    assert_eq!(chain(&director, JOHN), vec![1, 3]);
    let released = director.look_up_task(2).expect("task kept");
    assert!(!released.is_assigned());
    assert!(!released.pinned);
    assert_eq!(released.status, TaskStatus::Ready);
    assert_eq!(times(&director, &[1, 3, 2]), vec![(0, 10), (10, 20), (0, 10)]);
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

#[test]
fn test_release_absent_task_is_noop() {
    let mut director = director_with_users();
    ReleaseTaskProblemFactChange::new(42)
        .do_change(&mut director)
        .expect("absent release is a no-op");
    assert!(director.notifier().is_empty());
}

#[test]
fn test_property_change_updates_priority_and_status() {
    let mut director = director_with_pinned_chains(&[(john(), vec![task(1, 3, 10)])]);

    TaskPropertyChangeProblemFactChange::new(1)
        .with_priority(0)
        .with_status(TaskStatus::InProgress)
        .do_change(&mut director)
        .expect("property change applies");

    let task = director.look_up_task(1).expect("task present");
    assert_eq!(task.priority, 0);
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(director.notifier().len(), 2);
}

#[test]
fn test_property_change_rejects_invalid_priority() {
    let mut director = director_with_pinned_chains(&[(john(), vec![task(1, 3, 10)])]);

    let result = TaskPropertyChangeProblemFactChange::new(1)
        .with_priority(-1)
        .do_change(&mut director);

    assert_eq!(result, Err(TaskAssigningError::InvalidPriority(-1)));
    assert_eq!(director.look_up_task(1).map(|t| t.priority), Some(3));
    assert!(director.notifier().is_empty());
}

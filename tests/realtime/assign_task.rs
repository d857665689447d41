use task_assigning::constants::TaskStatus;
use task_assigning::models::{TaskOrUserRef, TaskVariable, User};
use task_assigning::planning::{PlanningTask, TaskData};
use task_assigning::solver::{
    AssignTaskProblemFactChange, ChangeEvent, ProblemFactChange, ScoreDirector,
};
use task_assigning::validate_solution;

use crate::common::*;

#[test]
fn test_assign_to_empty_chain() {
    let mut director = director_with_users();

    assign(&mut director, task(10, 3, 30), john());

    let task = director.look_up_task(10).expect("task added");
    assert_eq!(task.previous_task_or_user(), Some(TaskOrUserRef::User(JOHN)));
    assert!(task.pinned);
    assert_eq!(task.user(), Some(JOHN));
    assert_eq!(times(&director, &[10]), vec![(0, 30)]);
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

#[test]
fn test_assign_skips_pinned_prefix() {
    let mut director = director_from_snapshot(
        vec![
            TaskData::new(1, "T1", 3, TaskStatus::Reserved).with_actual_owner("john"),
            TaskData::new(2, "T2", 3, TaskStatus::Ready).with_planning_task(PlanningTask::new("john", 1)),
        ],
        20,
    );
    assert_eq!(chain(&director, JOHN), vec![1, 2]);
    assert!(!is_pinned(&director, 2));

    assign(&mut director, task(3, 3, 30), john());

    assert_eq!(chain(&director, JOHN), vec![1, 3, 2]);
    assert_eq!(times(&director, &[1, 3, 2]), vec![(0, 20), (20, 50), (50, 70)]);
    assert!(is_pinned(&director, 3));
    assert!(!is_pinned(&director, 2));
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

#[test]
fn test_assign_moves_task_between_chains() {
    let mut director = director_with_pinned_chains(&[
        (john(), vec![task(10, 3, 10), task(11, 3, 20)]),
        (mary(), vec![task(20, 3, 5), task(21, 3, 5)]),
    ]);

    assign(&mut director, task(10, 3, 10), mary());

    assert_eq!(chain(&director, JOHN), vec![11]);
    assert_eq!(chain(&director, MARY), vec![20, 21, 10]);
    assert_eq!(times(&director, &[11]), vec![(0, 20)]);
    assert_eq!(times(&director, &[10]), vec![(10, 20)]);
    assert_eq!(
        director.look_up_task(10).and_then(|t| t.user()),
        Some(MARY)
    );
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

#[test]
fn test_assign_already_at_insert_position_is_noop() {
    let mut director = director_with_pinned_chains(&[(john(), vec![task(10, 3, 10)])]);

    assign(&mut director, task(10, 3, 10), john());

    assert_eq!(chain(&director, JOHN), vec![10]);
    assert!(director.notifier().is_empty());
}

#[test]
fn test_assign_publishes_task_already_at_insert_position() {
    let mut director = director_with_pinned_chains(&[(john(), vec![task(10, 3, 10)])]);
    assert_eq!(director.look_up_task(10).map(|t| t.published), Some(false));

    AssignTaskProblemFactChange::new(task(10, 3, 10), john())
        .with_published(true)
        .do_change(&mut director)
        .expect("assignment applies");

    assert_eq!(chain(&director, JOHN), vec![10]);
    assert_eq!(director.look_up_task(10).map(|t| t.published), Some(true));
    assert_eq!(
        director.notifier().events(),
        &[
            ChangeEvent::BeforeProblemPropertyChanged {
                node: TaskOrUserRef::Task(10)
            },
            ChangeEvent::AfterProblemPropertyChanged {
                node: TaskOrUserRef::Task(10)
            },
            ChangeEvent::VariableListenersTriggered,
        ]
    );
}

#[test]
fn test_assign_successor_of_insert_position_only_pins() {
    let mut director = director_from_snapshot(
        vec![TaskData::new(1, "T1", 3, TaskStatus::Ready)
            .with_planning_task(PlanningTask::new("john", 0))],
        10,
    );

    assign(&mut director, task(1, 3, 10), john());

    assert_eq!(chain(&director, JOHN), vec![1]);
    assert!(is_pinned(&director, 1));
    assert_eq!(
        director.notifier().events(),
        &[
            ChangeEvent::BeforeProblemPropertyChanged {
                node: TaskOrUserRef::Task(1)
            },
            ChangeEvent::AfterProblemPropertyChanged {
                node: TaskOrUserRef::Task(1)
            },
            ChangeEvent::VariableListenersTriggered,
        ]
    );
}

#[test]
fn test_assign_notification_order() {
    // john -> 10* -> 11, mary -> 20* -> 21, every task lasting 1
    let mut director = director_from_snapshot(
        vec![
            TaskData::new(10, "T10", 3, TaskStatus::Reserved).with_actual_owner("john"),
            TaskData::new(11, "T11", 3, TaskStatus::Ready)
                .with_planning_task(PlanningTask::new("john", 1)),
            TaskData::new(20, "T20", 3, TaskStatus::Reserved).with_actual_owner("mary"),
            TaskData::new(21, "T21", 3, TaskStatus::Ready)
                .with_planning_task(PlanningTask::new("mary", 1)),
        ],
        1,
    );
    let moved = director.look_up_task(21).cloned().expect("task present");

    AssignTaskProblemFactChange::new(moved, john())
        .do_change(&mut director)
        .expect("assignment applies");

    let changed = |task, variable| {
        [
            ChangeEvent::BeforeVariableChanged { task, variable },
            ChangeEvent::AfterVariableChanged { task, variable },
        ]
    };
    let mut expected = Vec::new();
    expected.extend(changed(21, TaskVariable::PreviousTaskOrUser));
    expected.extend(changed(11, TaskVariable::PreviousTaskOrUser));
    expected.push(ChangeEvent::BeforeProblemPropertyChanged {
        node: TaskOrUserRef::Task(21),
    });
    expected.push(ChangeEvent::AfterProblemPropertyChanged {
        node: TaskOrUserRef::Task(21),
    });
    expected.extend(changed(21, TaskVariable::User));
    expected.extend(changed(11, TaskVariable::StartTime));
    expected.extend(changed(11, TaskVariable::EndTime));
    expected.push(ChangeEvent::VariableListenersTriggered);

    assert_eq!(director.notifier().events(), expected.as_slice());
    assert_eq!(chain(&director, JOHN), vec![10, 21, 11]);
    assert_eq!(chain(&director, MARY), vec![20]);
}

#[test]
fn test_assign_to_unknown_user_fails_without_mutation() {
    let mut director = director_with_pinned_chains(&[(john(), vec![task(10, 3, 10)])]);
    let before = director.working_solution().to_string();

    let result = AssignTaskProblemFactChange::new(task(11, 3, 10), User::new(-12345, "Non Existing"))
        .do_change(&mut director);

    let error = result.expect_err("user must be found");
    assert_eq!(
        error.to_string(),
        "Expected user: User(id=-12345, entity_id=Non Existing) was not found in current working solution"
    );
    assert_eq!(director.working_solution().to_string(), before);
    assert!(!director.working_solution().contains_task(11));
    assert!(director.notifier().is_empty());
}

#[test]
fn test_assign_with_invalid_priority_fails_fast() {
    let mut director = director_with_users();

    let result = AssignTaskProblemFactChange::new(task(10, 11, 10), john()).do_change(&mut director);

    assert!(result.is_err());
    assert!(!director.working_solution().contains_task(10));
    assert!(director.notifier().is_empty());
}

#[test]
fn test_assigned_chain_keeps_user_along_the_chain() {
    let mut director = director_with_pinned_chains(&[(
        mary(),
        vec![task(1, 3, 1), task(2, 3, 1), task(3, 3, 1)],
    )]);

    assign(&mut director, task(4, 3, 1), john());
    assign(&mut director, task(2, 3, 1), john());

    assert_eq!(chain(&director, JOHN), vec![4, 2]);
    assert_eq!(chain(&director, MARY), vec![1, 3]);
    for id in chain(&director, JOHN) {
        assert_eq!(director.look_up_task(id).and_then(|t| t.user()), Some(JOHN));
        assert!(is_pinned(&director, id));
    }
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

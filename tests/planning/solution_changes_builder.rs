use task_assigning::constants::TaskStatus;
use task_assigning::planning::{PlanningTask, SolutionChangesBuilder, TaskData};
use task_assigning::solver::{ProblemFactChangeQueue, ScoreDirector};
use task_assigning::validate_solution;

use crate::common::*;

fn snapshot() -> Vec<TaskData> {
    vec![
        TaskData::new(10, "Approve", 3, TaskStatus::Reserved).with_actual_owner("john"),
        TaskData::new(11, "Review", 5, TaskStatus::Ready)
            .with_planning_task(PlanningTask::new("john", 1)),
        TaskData::new(20, "Sign", 2, TaskStatus::InProgress).with_actual_owner("mary"),
    ]
}

#[test]
fn test_changes_bring_solution_in_line_with_snapshot() {
    let mut director = director_from_snapshot(snapshot(), 10);

    let changes = SolutionChangesBuilder::new(director.working_solution())
        .with_default_task_duration(10)
        .with_tasks([
            // finished
            TaskData::new(10, "Approve", 3, TaskStatus::Completed),
            // delegated to someone the solution doesn't know yet
            TaskData::new(11, "Review", 5, TaskStatus::Reserved).with_actual_owner("peter"),
            // priority raised
            TaskData::new(20, "Sign", 0, TaskStatus::InProgress).with_actual_owner("mary"),
            // brand new
            TaskData::new(30, "Archive", 8, TaskStatus::Ready),
        ])
        .build();

    let queue = ProblemFactChangeQueue::new();
    queue.add_problem_fact_changes(changes);
    let report = queue.apply_pending(&mut director);
    assert!(report.is_success(), "failures: {:?}", report.failures);

    let solution = director.working_solution();
    let peter = solution.user_by_entity_id("peter").expect("owner added");
    assert_eq!(solution.chain(peter.id), vec![11]);
    assert!(is_pinned(&director, 11));
    assert!(!solution.contains_task(10));
    assert_eq!(solution.chain(JOHN), Vec::<i64>::new());
    assert_eq!(solution.task(20).map(|t| t.priority), Some(0));
    assert_eq!(solution.task(11).map(|t| t.status), Some(TaskStatus::Reserved));
    assert!(solution.task(30).map(|t| !t.is_assigned()).unwrap_or(false));
    assert_eq!(validate_solution(solution), Ok(()));
}

#[test]
fn test_released_task_returns_to_the_pool() {
    let mut director = director_from_snapshot(snapshot(), 10);

    let changes = SolutionChangesBuilder::new(director.working_solution())
        .with_tasks([TaskData::new(20, "Sign", 2, TaskStatus::Ready)])
        .build();
    assert_eq!(changes.len(), 2);

    for change in &changes {
        change.do_change(&mut director).expect("change applies");
    }

    let task = director.look_up_task(20).expect("task kept");
    assert!(!task.is_assigned());
    assert_eq!(task.status, TaskStatus::Ready);
    assert_eq!(chain(&director, MARY), Vec::<i64>::new());
}

#[test]
fn test_published_task_gets_pinned() {
    let mut director = director_from_snapshot(snapshot(), 10);
    assert!(!is_pinned(&director, 11));

    let changes = SolutionChangesBuilder::new(director.working_solution())
        .with_tasks([TaskData::new(11, "Review", 5, TaskStatus::Reserved)
            .with_actual_owner("john")
            .with_planning_task(PlanningTask::new("john", 1).with_published(true))])
        .build();
    for change in &changes {
        change.do_change(&mut director).expect("change applies");
    }

    assert_eq!(chain(&director, JOHN), vec![10, 11]);
    assert!(is_pinned(&director, 11));
    assert_eq!(
        director.look_up_task(11).map(|t| t.status),
        Some(TaskStatus::Reserved)
    );
}

fn apply(director: &mut Director, tasks: Vec<TaskData>) -> Vec<&'static str> {
    let changes = SolutionChangesBuilder::new(director.working_solution())
        .with_tasks(tasks)
        .build();
    let names = changes.iter().map(|change| change.name()).collect();
    for change in &changes {
        change.do_change(director).expect("change applies");
    }
    names
}

#[test]
fn test_claimed_task_without_planning_info_gets_pinned() {
    let mut director = director_from_snapshot(snapshot(), 10);

    let names = apply(
        &mut director,
        vec![TaskData::new(11, "Review", 5, TaskStatus::Reserved).with_actual_owner("john")],
    );

    assert_eq!(names, vec!["assign_task", "task_property_change"]);
    assert_eq!(chain(&director, JOHN), vec![10, 11]);
    assert!(is_pinned(&director, 11));
    assert_eq!(director.look_up_task(11).map(|t| t.published), Some(true));
}

#[test]
fn test_claimed_task_with_unpublished_plan_stays_unpinned() {
    let mut director = director_from_snapshot(snapshot(), 10);

    let names = apply(
        &mut director,
        vec![TaskData::new(11, "Review", 5, TaskStatus::Reserved)
            .with_actual_owner("john")
            .with_planning_task(PlanningTask::new("john", 1))],
    );

    assert_eq!(names, vec!["task_property_change"]);
    assert!(!is_pinned(&director, 11));
}

#[test]
fn test_claimed_tasks_are_pinned_in_planned_order() {
    let mut director = director_from_snapshot(
        vec![
            TaskData::new(10, "Approve", 3, TaskStatus::Reserved).with_actual_owner("john"),
            TaskData::new(11, "Review", 5, TaskStatus::Ready)
                .with_planning_task(PlanningTask::new("john", 1)),
            TaskData::new(12, "Sign", 5, TaskStatus::Ready)
                .with_planning_task(PlanningTask::new("john", 2)),
        ],
        10,
    );
    assert_eq!(chain(&director, JOHN), vec![10, 11, 12]);

    // reported in reverse planned order
    apply(
        &mut director,
        vec![
            TaskData::new(12, "Sign", 5, TaskStatus::InProgress)
                .with_actual_owner("john")
                .with_planning_task(PlanningTask::new("john", 2).with_published(true)),
            TaskData::new(11, "Review", 5, TaskStatus::Reserved)
                .with_actual_owner("john")
                .with_planning_task(PlanningTask::new("john", 1).with_published(true)),
        ],
    );

    assert_eq!(chain(&director, JOHN), vec![10, 11, 12]);
    assert!(is_pinned(&director, 11));
    assert!(is_pinned(&director, 12));
    assert_eq!(validate_solution(director.working_solution()), Ok(()));
}

#[test]
fn test_reassigned_task_is_marked_published() {
    let mut director = director_from_snapshot(snapshot(), 10);
    assert_eq!(director.look_up_task(10).map(|t| t.published), Some(false));

    apply(
        &mut director,
        vec![TaskData::new(10, "Approve", 3, TaskStatus::InProgress).with_actual_owner("mary")],
    );

    assert_eq!(chain(&director, MARY), vec![20, 10]);
    assert!(is_pinned(&director, 10));
    assert_eq!(director.look_up_task(10).map(|t| t.published), Some(true));
}

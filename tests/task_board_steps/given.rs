//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use chrono::{Days, NaiveDate};
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use taskmaster::task::{
    domain::{DueDate, Priority},
    services::CreateTaskRequest,
};

fn create(world: &mut TaskBoardWorld, request: CreateTaskRequest) -> Result<(), eyre::Report> {
    run_async(world.service.create(request)).wrap_err("create task in scenario setup")?;
    Ok(())
}

fn today(world: &TaskBoardWorld) -> NaiveDate {
    world.clock.utc().date_naive()
}

#[given("an empty task board")]
fn empty_board(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.service.tasks().is_empty(), "board should start empty");
    Ok(())
}

#[given(r#"a task "{title}" with priority "{priority}""#)]
fn task_with_priority(
    world: &mut TaskBoardWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    create(world, CreateTaskRequest::new(title).with_priority(level))
}

#[given(r#"a task "{title}" described as "{description}""#)]
fn task_with_description(
    world: &mut TaskBoardWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    create(
        world,
        CreateTaskRequest::new(title).with_description(description),
    )
}

#[given(r#"a task "{title}" due {days:u64} days ago"#)]
fn task_due_days_ago(
    world: &mut TaskBoardWorld,
    title: String,
    days: u64,
) -> Result<(), eyre::Report> {
    let date = today(world)
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| eyre::eyre!("due date out of range"))?;
    create(
        world,
        CreateTaskRequest::new(title).with_due_date(DueDate::new(date)),
    )
}

#[given(r#"a task "{title}" due {days:u64} days from now"#)]
fn task_due_days_from_now(
    world: &mut TaskBoardWorld,
    title: String,
    days: u64,
) -> Result<(), eyre::Report> {
    let date = today(world)
        .checked_add_days(Days::new(days))
        .ok_or_else(|| eyre::eyre!("due date out of range"))?;
    create(
        world,
        CreateTaskRequest::new(title).with_due_date(DueDate::new(date)),
    )
}

#[given(r#"the task "{title}" has been completed"#)]
fn task_is_completed(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_titled(&title)?.id().clone();
    run_async(world.service.toggle_completion(&id))
        .ok_or_else(|| eyre::eyre!("task {title:?} vanished"))?;
    Ok(())
}

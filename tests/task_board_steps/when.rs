//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, run_async};
use mockable::Clock;
use rstest_bdd_macros::when;
use taskmaster::task::{
    domain::TaskId,
    services::CreateTaskRequest,
    view::{SearchQuery, TaskFilter, TaskStats},
};

#[when(r#"I create a task titled "{title}""#)]
fn create_task(world: &mut TaskBoardWorld, title: String) {
    let result = run_async(world.service.create(CreateTaskRequest::new(title)));
    world.last_create_result = Some(result);
}

#[when("I create a task with a blank title")]
fn create_blank_task(world: &mut TaskBoardWorld) {
    let result = run_async(world.service.create(CreateTaskRequest::new("   ")));
    world.last_create_result = Some(result);
}

#[when(r#"I toggle the task "{title}""#)]
fn toggle_task(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_titled(&title)?.id().clone();
    run_async(world.service.toggle_completion(&id))
        .ok_or_else(|| eyre::eyre!("task {title:?} vanished"))?;
    Ok(())
}

#[when("I delete a task that does not exist")]
fn delete_unknown_task(world: &mut TaskBoardWorld) {
    let deleted = run_async(world.service.delete(&TaskId::new()));
    world.last_deleted = Some(deleted);
}

#[when(r#"I view the "{filter}" filter"#)]
fn view_filter(world: &mut TaskBoardWorld, filter: String) -> Result<(), eyre::Report> {
    world.selection.filter = TaskFilter::try_from(filter.as_str())
        .map_err(|err| eyre::eyre!("invalid filter in scenario: {err}"))?;
    world.refresh_view();
    Ok(())
}

#[when(r#"I search for "{query}""#)]
fn search_for(world: &mut TaskBoardWorld, query: String) {
    world.selection.search = SearchQuery::new(&query);
    world.refresh_view();
}

#[when("I compute the statistics")]
fn compute_statistics(world: &mut TaskBoardWorld) {
    world.stats = Some(TaskStats::collect(world.service.tasks(), world.clock.utc()));
}

use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use crate::config::AppConfig;
use crate::model::{next_task_id, CompleteOutcome, DeleteOutcome, Filter, Task, TaskPatch};
use crate::reducer::Action;
use crate::state::{StateStore, ERROR_EMPTY_TITLE};

/// Add a todo with the provided text. The text is trimmed here, at the
/// call boundary; an empty-after-trim title never reaches the reducer.
pub fn add_task(config: &AppConfig, text: &str) -> Result<Task> {
    let title = text.trim();
    if title.is_empty() {
        return Err(anyhow!(ERROR_EMPTY_TITLE));
    }

    let mut state = StateStore::open(config);
    let id = next_task_id(&state.snapshot().tasks, Utc::now());
    let task = Task::new(id, title);
    state
        .dispatch(Action::AddTask(task.clone()))
        .context("failed to persist the new todo")?;
    Ok(task)
}

/// List todos through the given filter, in insertion order.
pub fn list_tasks(config: &AppConfig, filter: Filter) -> Vec<Task> {
    let state = StateStore::open(config);
    state
        .snapshot()
        .tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Mark the todos with the provided ids as completed and return per-id
/// results. Unknown ids report `changed: false`.
pub fn complete_tasks(config: &AppConfig, ids: &[i64]) -> Result<Vec<CompleteOutcome>> {
    let mut state = StateStore::open(config);
    let mut results = Vec::with_capacity(ids.len());
    for &id in ids {
        let changed = match state.snapshot().task(id) {
            Some(task) => !task.completed,
            None => false,
        };
        if changed {
            state
                .dispatch(Action::ModifyTask {
                    id,
                    patch: TaskPatch::completed(true),
                })
                .context("failed to persist the completed todo")?;
        }
        results.push(CompleteOutcome { id, changed });
    }
    Ok(results)
}

/// Delete the todos with the provided ids and return per-id results.
pub fn delete_tasks(config: &AppConfig, ids: &[i64]) -> Result<Vec<DeleteOutcome>> {
    let mut state = StateStore::open(config);
    let mut results = Vec::with_capacity(ids.len());
    for &id in ids {
        let deleted = state.snapshot().task(id).is_some();
        state
            .dispatch(Action::DeleteTask(id))
            .context("failed to persist the deletion")?;
        results.push(DeleteOutcome { id, deleted });
    }
    Ok(results)
}

/// Delete every completed todo and return how many were removed.
pub fn clear_completed(config: &AppConfig) -> Result<usize> {
    let mut state = StateStore::open(config);
    let completed: Vec<i64> = state
        .snapshot()
        .tasks
        .iter()
        .filter(|task| task.completed)
        .map(|task| task.id)
        .collect();
    for &id in &completed {
        state
            .dispatch(Action::DeleteTask(id))
            .context("failed to persist the deletion")?;
    }
    Ok(completed.len())
}

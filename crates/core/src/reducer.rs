use crate::model::{AppState, Filter, Task, TaskPatch};

/// The closed set of state transitions. Everything that happens to the
/// application state goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the task list wholesale. Used for hydration only.
    SetTasks(Vec<Task>),
    AddTask(Task),
    DeleteTask(i64),
    ModifyTask { id: i64, patch: TaskPatch },
    SetFilter(Filter),
    SetError(String),
    ClearError,
}

impl Action {
    /// Actions that change the task collection. These are the only
    /// persistence triggers: the dispatcher re-serializes the entire
    /// resulting list within the same transition.
    pub fn mutates_tasks(&self) -> bool {
        matches!(
            self,
            Action::AddTask(_) | Action::DeleteTask(_) | Action::ModifyTask { .. }
        )
    }
}

/// Pure transition function. Returns a fully-formed successor state and
/// never touches storage; the dispatcher owns the persistence
/// side-effect.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::SetTasks(tasks) => next.tasks = tasks.clone(),
        Action::AddTask(task) => next.tasks.push(task.clone()),
        Action::DeleteTask(id) => next.tasks.retain(|task| task.id != *id),
        Action::ModifyTask { id, patch } => {
            for task in &mut next.tasks {
                if task.id == *id {
                    patch.apply_to(task);
                }
            }
        }
        Action::SetFilter(filter) => next.filter = *filter,
        Action::SetError(message) => next.error_message = Some(message.clone()),
        Action::ClearError => next.error_message = None,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: i64, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed,
        }
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut state = AppState::default();
        for id in 1..=3 {
            let before = state.tasks.len();
            state = reduce(&state, &Action::AddTask(task(id, "t", false)));
            assert_eq!(state.tasks.len(), before + 1);
        }
        let ids: Vec<i64> = state.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn delete_removes_only_the_matching_task() {
        let state = AppState {
            tasks: vec![task(1, "a", false), task(2, "b", true), task(3, "c", false)],
            ..AppState::default()
        };

        let next = reduce(&state, &Action::DeleteTask(2));
        assert_eq!(next.tasks, vec![task(1, "a", false), task(3, "c", false)]);

        // Unknown id is a no-op, not an error.
        let unchanged = reduce(&next, &Action::DeleteTask(42));
        assert_eq!(unchanged.tasks, next.tasks);
    }

    #[test]
    fn modify_merges_patch_into_matching_task_only() {
        let state = AppState {
            tasks: vec![task(1, "a", false), task(2, "b", false)],
            ..AppState::default()
        };

        let next = reduce(
            &state,
            &Action::ModifyTask {
                id: 1,
                patch: TaskPatch::completed(true),
            },
        );
        assert_eq!(next.tasks[0], task(1, "a", true));
        assert_eq!(next.tasks[1], task(2, "b", false));
    }

    #[test]
    fn set_filter_leaves_tasks_untouched() {
        let state = AppState {
            tasks: vec![task(1, "a", false), task(2, "b", true)],
            ..AppState::default()
        };

        let next = reduce(&state, &Action::SetFilter(Filter::Active));
        assert_eq!(next.filter, Filter::Active);
        assert_eq!(next.tasks, state.tasks);
    }

    #[test]
    fn clear_error_is_idempotent_when_idle() {
        let state = AppState::default();
        assert_eq!(reduce(&state, &Action::ClearError), state);

        let showing = reduce(&state, &Action::SetError("boom".into()));
        assert_eq!(showing.error_message.as_deref(), Some("boom"));
        assert_eq!(reduce(&showing, &Action::ClearError), state);
    }

    #[test]
    fn only_collection_changes_trigger_persistence() {
        assert!(Action::AddTask(task(1, "a", false)).mutates_tasks());
        assert!(Action::DeleteTask(1).mutates_tasks());
        assert!(Action::ModifyTask {
            id: 1,
            patch: TaskPatch::completed(true),
        }
        .mutates_tasks());

        assert!(!Action::SetTasks(Vec::new()).mutates_tasks());
        assert!(!Action::SetFilter(Filter::Completed).mutates_tasks());
        assert!(!Action::SetError("boom".into()).mutates_tasks());
        assert!(!Action::ClearError.mutates_tasks());
    }
}

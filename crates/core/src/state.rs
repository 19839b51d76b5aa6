use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::model::AppState;
use crate::reducer::{reduce, Action};
use crate::store::{StoreError, TaskStore};

/// How long a transient error stays visible before it self-clears.
pub const DEFAULT_ERROR_TTL: Duration = Duration::from_millis(3000);

pub const ERROR_EMPTY_TITLE: &str = "Title should not be empty";
pub const ERROR_ADD: &str = "Unable to add a todo";
pub const ERROR_UPDATE: &str = "Unable to update a todo";
pub const ERROR_DELETE: &str = "Unable to delete a todo";
pub const ERROR_DELETE_COMPLETED: &str = "Unable to delete completed todos";

/// Expiry state for the transient error message. A newer error re-arms
/// the deadline, replacing the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorTimer {
    Idle,
    Armed { expires_at: Instant },
}

type Subscriber = Box<dyn FnMut(&AppState)>;

/// Owner of the single [`AppState`]. Consumers read via [`snapshot`] and
/// write via [`dispatch`]; nothing else mutates the state.
///
/// [`snapshot`]: StateStore::snapshot
/// [`dispatch`]: StateStore::dispatch
pub struct StateStore {
    state: AppState,
    store: TaskStore,
    error_ttl: Duration,
    timer: ErrorTimer,
    subscribers: Vec<Subscriber>,
}

impl StateStore {
    /// Open the store and hydrate the initial state from disk. A stored
    /// empty list and an absent store are equivalent.
    pub fn open(config: &AppConfig) -> Self {
        Self::with_error_ttl(config, DEFAULT_ERROR_TTL)
    }

    pub fn with_error_ttl(config: &AppConfig, error_ttl: Duration) -> Self {
        let store = TaskStore::new(config);
        let stored = store.load();
        let mut state_store = Self {
            state: AppState::default(),
            store,
            error_ttl,
            timer: ErrorTimer::Idle,
            subscribers: Vec::new(),
        };
        if !stored.is_empty() {
            let _ = state_store.dispatch(Action::SetTasks(stored));
        }
        state_store
    }

    pub fn snapshot(&self) -> &AppState {
        &self.state
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn error_ttl(&self) -> Duration {
        self.error_ttl
    }

    /// Register a consumer that is handed every committed snapshot
    /// before the triggering `dispatch` returns.
    pub fn subscribe<F: FnMut(&AppState) + 'static>(&mut self, subscriber: F) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply one action. For task-mutating actions the resulting list is
    /// persisted first and the new state committed only when the save
    /// succeeds; a failed save leaves the old state in place and
    /// surfaces the error to the caller as a value.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        debug!(?action, "dispatch");
        let next = reduce(&self.state, &action);
        if action.mutates_tasks() {
            if let Err(err) = self.store.save(&next.tasks) {
                warn!(error = %err, "save failed, state unchanged");
                return Err(err);
            }
        }
        self.commit(next);
        Ok(())
    }

    /// Show a transient error and (re)arm its expiry deadline. Calling
    /// this while an earlier error is still pending replaces both the
    /// message and the deadline.
    pub fn show_error<T: Into<String>>(&mut self, message: T, now: Instant) {
        let _ = self.dispatch(Action::SetError(message.into()));
        self.timer = ErrorTimer::Armed {
            expires_at: now + self.error_ttl,
        };
    }

    /// Clear the transient error once its deadline has passed. Safe to
    /// call on every UI tick; does nothing while idle.
    pub fn tick(&mut self, now: Instant) {
        if let ErrorTimer::Armed { expires_at } = self.timer {
            if now >= expires_at {
                self.timer = ErrorTimer::Idle;
                let _ = self.dispatch(Action::ClearError);
            }
        }
    }

    fn commit(&mut self, next: AppState) {
        self.state = next;
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Filter, Task};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn open_with_temp_dir() -> (StateStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        (StateStore::open(&config), temp_dir)
    }

    #[test]
    fn add_commits_state_and_store_together() {
        let (mut state, _guard) = open_with_temp_dir();
        let task = Task::new(1, "buy milk");

        state.dispatch(Action::AddTask(task.clone())).unwrap();

        assert_eq!(state.snapshot().tasks, vec![task.clone()]);
        let store = TaskStore::new(
            &AppConfig::from_data_dir(state.store_path().parent().unwrap().to_path_buf()).unwrap(),
        );
        assert_eq!(store.load(), vec![task]);
    }

    #[test]
    fn hydrates_from_a_non_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        TaskStore::new(&config)
            .save(&[Task::new(1, "persisted")])
            .unwrap();

        let state = StateStore::open(&config);
        assert_eq!(state.snapshot().tasks, vec![Task::new(1, "persisted")]);
        assert_eq!(state.snapshot().filter, Filter::All);
    }

    #[test]
    fn failed_save_leaves_state_unchanged() {
        let (mut state, _guard) = open_with_temp_dir();
        state.dispatch(Action::AddTask(Task::new(1, "kept"))).unwrap();

        // A directory at the store path makes the atomic rename fail.
        fs::remove_file(state.store_path()).unwrap();
        fs::create_dir(state.store_path()).unwrap();

        let result = state.dispatch(Action::AddTask(Task::new(2, "lost")));
        assert!(result.is_err());
        assert_eq!(state.snapshot().tasks, vec![Task::new(1, "kept")]);
    }

    #[test]
    fn subscribers_see_the_committed_snapshot() {
        let (mut state, _guard) = open_with_temp_dir();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        state.subscribe(move |snapshot: &AppState| {
            sink.borrow_mut().push(snapshot.tasks.len());
        });

        state.dispatch(Action::AddTask(Task::new(1, "a"))).unwrap();
        state.dispatch(Action::AddTask(Task::new(2, "b"))).unwrap();
        state.dispatch(Action::SetFilter(Filter::Completed)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 2]);
    }

    #[test]
    fn error_clears_only_after_its_deadline() {
        let (mut state, _guard) = open_with_temp_dir();
        let t0 = Instant::now();
        state.show_error(ERROR_ADD, t0);
        assert_eq!(state.snapshot().error_message.as_deref(), Some(ERROR_ADD));

        state.tick(t0 + Duration::from_millis(100));
        assert_eq!(state.snapshot().error_message.as_deref(), Some(ERROR_ADD));

        state.tick(t0 + DEFAULT_ERROR_TTL);
        assert_eq!(state.snapshot().error_message, None);
    }

    #[test]
    fn newer_error_replaces_the_pending_deadline() {
        let (mut state, _guard) = open_with_temp_dir();
        let t0 = Instant::now();
        state.show_error(ERROR_ADD, t0);

        let t1 = t0 + Duration::from_millis(2000);
        state.show_error(ERROR_UPDATE, t1);

        // The first error's deadline passes without clearing the newer
        // message.
        state.tick(t0 + DEFAULT_ERROR_TTL);
        assert_eq!(
            state.snapshot().error_message.as_deref(),
            Some(ERROR_UPDATE)
        );

        state.tick(t1 + DEFAULT_ERROR_TTL);
        assert_eq!(state.snapshot().error_message, None);
    }

    #[test]
    fn tick_while_idle_is_a_no_op() {
        let (mut state, _guard) = open_with_temp_dir();
        assert_eq!(state.error_ttl(), DEFAULT_ERROR_TTL);
        state.tick(Instant::now());
        assert_eq!(state.snapshot(), &AppState::default());
    }
}

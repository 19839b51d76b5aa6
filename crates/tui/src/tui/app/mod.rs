use std::time::Instant;

use chrono::Utc;
use ratatui::widgets::TableState;

use super::buffer::TextBuffer;
use crate::config::AppConfig;
use crate::model::{next_task_id, Filter, Task, TaskPatch};
use crate::reducer::Action;
use crate::state::{
    StateStore, ERROR_ADD, ERROR_DELETE, ERROR_DELETE_COMPLETED, ERROR_EMPTY_TITLE, ERROR_UPDATE,
};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
struct FilterTab {
    label: &'static str,
    filter: Filter,
    description: &'static str,
}

impl FilterTab {
    pub(crate) fn new(label: &'static str, filter: Filter, description: &'static str) -> Self {
        Self {
            label,
            filter,
            description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Edit,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

pub(crate) struct App {
    config: AppConfig,
    state: StateStore,
    first_run: bool,
    tabs: Vec<FilterTab>,
    tab_index: usize,
    visible: Vec<Task>,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    input: TextBuffer,
    editing_task_id: Option<i64>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, state: StateStore, first_run: bool) -> Self {
        let tabs = vec![
            FilterTab::new("📋 All", Filter::All, "Every todo"),
            FilterTab::new("⚡ Active", Filter::Active, "Todos still to do"),
            FilterTab::new("✅ Completed", Filter::Completed, "Finished todos"),
        ];

        let mut app = Self {
            config,
            state,
            first_run,
            tabs,
            tab_index: 0,
            visible: Vec::new(),
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            input: TextBuffer::new(),
            editing_task_id: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Rebuild the visible task list from the latest snapshot and keep
    /// the selection within bounds.
    pub(crate) fn refresh(&mut self) {
        let snapshot = self.state.snapshot();
        let filter = snapshot.filter;
        self.visible = snapshot
            .tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();

        if self.first_run && !snapshot.tasks.is_empty() {
            self.first_run = false;
        }

        if self.visible.is_empty() {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= self.visible.len() {
                self.selected = self.visible.len() - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    pub(crate) fn on_tick(&mut self) {
        self.state.tick(Instant::now());
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn current_filter(&self) -> Filter {
        self.tabs
            .get(self.tab_index)
            .map(|tab| tab.filter)
            .unwrap_or_default()
    }

    /// Dispatch at the view boundary: a failed save becomes a transient
    /// error and the state is left as it was.
    fn dispatch_or_error(&mut self, action: Action, fallback: &'static str) -> bool {
        match self.state.dispatch(action) {
            Ok(()) => true,
            Err(_) => {
                self.state.show_error(fallback, Instant::now());
                false
            }
        }
    }

    fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.visible.len() - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    fn select_task_by_id(&mut self, id: i64) {
        if let Some((idx, _)) = self
            .visible
            .iter()
            .enumerate()
            .find(|(_, task)| task.id == id)
        {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn set_tab(&mut self, index: usize) {
        self.tab_index = index;
        let filter = self.current_filter();
        let _ = self.state.dispatch(Action::SetFilter(filter));
        self.refresh();
    }

    fn next_tab(&mut self) {
        self.set_tab((self.tab_index + 1) % self.tabs.len());
    }

    fn prev_tab(&mut self) {
        let index = if self.tab_index == 0 {
            self.tabs.len() - 1
        } else {
            self.tab_index - 1
        };
        self.set_tab(index);
    }

    fn add_task(&mut self) {
        let title = self.input.as_str().trim().to_string();
        if title.is_empty() {
            // Rejected at the view boundary; the reducer never sees it.
            self.state.show_error(ERROR_EMPTY_TITLE, Instant::now());
            return;
        }

        let id = next_task_id(&self.state.snapshot().tasks, Utc::now());
        if self.dispatch_or_error(Action::AddTask(Task::new(id, title)), ERROR_ADD) {
            self.input.clear();
            self.input_mode = InputMode::Normal;
            self.refresh();
            self.select_task_by_id(id);
        }
    }

    fn toggle_selected(&mut self) {
        let Some(task) = self.visible.get(self.selected).cloned() else {
            return;
        };
        let patch = TaskPatch::completed(!task.completed);
        if self.dispatch_or_error(Action::ModifyTask { id: task.id, patch }, ERROR_UPDATE) {
            self.refresh();
        }
    }

    /// Complete everything while any todo is still active; un-complete
    /// everything once all are done. Only tasks whose flag actually
    /// changes are touched.
    fn toggle_all(&mut self) {
        let snapshot = self.state.snapshot();
        if snapshot.tasks.is_empty() {
            return;
        }
        let target = !snapshot.tasks.iter().all(|task| task.completed);
        let pending: Vec<i64> = snapshot
            .tasks
            .iter()
            .filter(|task| task.completed != target)
            .map(|task| task.id)
            .collect();

        for id in pending {
            self.dispatch_or_error(
                Action::ModifyTask {
                    id,
                    patch: TaskPatch::completed(target),
                },
                ERROR_UPDATE,
            );
        }
        self.refresh();
    }

    fn clear_completed(&mut self) {
        let completed: Vec<i64> = self
            .state
            .snapshot()
            .tasks
            .iter()
            .filter(|task| task.completed)
            .map(|task| task.id)
            .collect();

        for id in completed {
            self.dispatch_or_error(Action::DeleteTask(id), ERROR_DELETE_COMPLETED);
        }
        self.refresh();
    }

    fn prompt_delete(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
    }

    fn perform_delete(&mut self) {
        let Some(task) = self.visible.get(self.selected) else {
            return;
        };
        let id = task.id;
        if self.dispatch_or_error(Action::DeleteTask(id), ERROR_DELETE) {
            self.refresh();
        }
    }

    fn start_edit(&mut self) {
        let Some(task) = self.visible.get(self.selected).cloned() else {
            return;
        };
        self.input.set(task.title);
        self.editing_task_id = Some(task.id);
        self.input_mode = InputMode::Edit;
    }

    fn apply_edit(&mut self) {
        let Some(id) = self.editing_task_id else {
            self.input_mode = InputMode::Normal;
            return;
        };

        let trimmed = self.input.as_str().trim().to_string();
        let current = self.state.snapshot().task(id).map(|task| task.title.clone());

        let done = if trimmed.is_empty() {
            // Editing a title down to nothing deletes the todo.
            self.dispatch_or_error(Action::DeleteTask(id), ERROR_DELETE)
        } else if Some(&trimmed) == current.as_ref() {
            true
        } else {
            self.dispatch_or_error(
                Action::ModifyTask {
                    id,
                    patch: TaskPatch::title(trimmed),
                },
                ERROR_UPDATE,
            )
        };

        if done {
            self.input.clear();
            self.editing_task_id = None;
            self.input_mode = InputMode::Normal;
            self.refresh();
        }
    }

    fn cancel_edit(&mut self) {
        self.editing_task_id = None;
        self.input.clear();
        self.input_mode = InputMode::Normal;
    }
}

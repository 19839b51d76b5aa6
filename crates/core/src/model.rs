use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One todo item. Serialized field names are the store contract; do not
/// rename without migrating `todos.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl Task {
    pub fn new<T: Into<String>>(id: i64, title: T) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial-update payload merged into the task matching an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(value: bool) -> Self {
        Self {
            title: None,
            completed: Some(value),
        }
    }

    pub fn title<T: Into<String>>(value: T) -> Self {
        Self {
            title: Some(value.into()),
            completed: None,
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// View-only projection of the task list. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            other => Err(anyhow!(
                "Unknown filter '{}': expected all|active|completed",
                other
            )),
        }
    }
}

impl ValueEnum for Filter {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// The whole application state: one of these exists per process, owned
/// by the state store and replaced (never mutated in place) on each
/// transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub filter: Filter,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}

/// Next task id: the creation timestamp in Unix milliseconds, bumped
/// past the current maximum when two creations land in the same
/// millisecond. Keeps ids unique and insertion-ordered.
pub fn next_task_id(tasks: &[Task], now: DateTime<Utc>) -> i64 {
    let max = tasks.iter().map(|task| task.id).max().unwrap_or(0);
    now.timestamp_millis().max(max + 1)
}

/// Outcome of a one-shot `done` invocation.
#[derive(Debug, Clone)]
pub struct CompleteOutcome {
    pub id: i64,
    pub changed: bool,
}

/// Outcome of a one-shot `delete` invocation.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub id: i64,
    pub deleted: bool,
}

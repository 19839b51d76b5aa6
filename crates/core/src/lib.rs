pub mod commands;
pub mod config;
pub mod model;
pub mod reducer;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use model::*;
pub use reducer::{reduce, Action};
pub use state::StateStore;
pub use store::{StoreError, TaskStore};

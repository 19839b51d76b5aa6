pub use tido_tui::cli;
pub use tido_tui::commands;
pub use tido_tui::config;
pub use tido_tui::tui;
pub use tido_tui::AppConfig;

pub use tido_core as core;
pub use tido_core::model;
pub use tido_core::reducer;
pub use tido_core::state;
pub use tido_core::store;

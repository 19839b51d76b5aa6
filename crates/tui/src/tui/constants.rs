use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);

pub(crate) const ADD_PLACEHOLDER: &str = "What needs to be done?";

pub(crate) const HELP_NORMAL: &str = "nav: tab/shift+tab filters | j/k move | q quit | actions: a add ✚ | e edit ✏️ | space/d toggle ✅ | t toggle all | c clear completed 🧹 | x delete 🗑️ | h help ❔";
pub(crate) const HELP_ADD: &str = "Enter to add ✍️ • Esc to cancel";
pub(crate) const HELP_EDIT: &str = "Enter to save ✏️ • Esc to cancel • an empty title deletes the todo";
pub(crate) const HELP_HELP: &str = "Enter/Esc to close ❔";
pub(crate) const HELP_CONFIRM: &str = "←/→ choose • Space toggle • Enter confirm • Esc cancel";

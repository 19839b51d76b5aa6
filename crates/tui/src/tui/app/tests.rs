use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use super::{App, ConfirmChoice, InputMode};
use crate::config::AppConfig;
use crate::model::Filter;
use crate::state::{StateStore, ERROR_EMPTY_TITLE};
use crate::tui::helpers::{centered_rect, items_left_label};
use ratatui::layout::Rect;

fn app_with_temp_dir() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::from_data_dir(dir.path().to_path_buf()).unwrap();
    let state = StateStore::open(&config);
    (App::new(config, state, true), dir)
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn add_todo(app: &mut App, title: &str) {
    press(app, KeyCode::Char('a'));
    type_text(app, title);
    press(app, KeyCode::Enter);
}

#[test]
fn add_flow_trims_and_appends() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "  buy milk  ");

    let snapshot = app.state.snapshot();
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].title, "buy milk");
    assert!(!snapshot.tasks[0].completed);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.visible.len(), 1);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_add_is_rejected_with_a_transient_error(#[case] text: &str) {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, text);

    let snapshot = app.state.snapshot();
    assert_eq!(snapshot.tasks, Vec::new());
    assert_eq!(
        snapshot.error_message.as_deref(),
        Some(ERROR_EMPTY_TITLE)
    );
    // The input stays open so the user can fix the title.
    assert_eq!(app.input_mode, InputMode::Add);
}

#[test]
fn escape_cancels_the_add_input() {
    let (mut app, _guard) = app_with_temp_dir();
    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "half-typed");
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.input.as_str(), "");
    assert_eq!(app.state.snapshot().tasks, Vec::new());
}

#[test]
fn space_toggles_the_selected_todo() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "toggle me");

    press(&mut app, KeyCode::Char(' '));
    assert!(app.state.snapshot().tasks[0].completed);

    press(&mut app, KeyCode::Char(' '));
    assert!(!app.state.snapshot().tasks[0].completed);
}

#[test]
fn tab_switch_dispatches_set_filter_and_hides_completed() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "done soon");
    press(&mut app, KeyCode::Char(' '));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state.snapshot().filter, Filter::Active);
    assert_eq!(app.visible, Vec::new());

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state.snapshot().filter, Filter::Completed);
    assert_eq!(app.visible.len(), 1);

    // Filtering never touches the stored collection.
    assert_eq!(app.state.snapshot().tasks.len(), 1);
}

#[test]
fn edit_rewrites_the_title_in_place() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "old title");
    let id = app.state.snapshot().tasks[0].id;

    press(&mut app, KeyCode::Char('e'));
    for _ in 0.."old title".len() {
        press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "new title");
    press(&mut app, KeyCode::Enter);

    let snapshot = app.state.snapshot();
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].id, id);
    assert_eq!(snapshot.tasks[0].title, "new title");
}

#[test]
fn editing_to_an_empty_title_deletes_the_todo() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "gone");

    press(&mut app, KeyCode::Char('e'));
    for _ in 0.."gone".len() {
        press(&mut app, KeyCode::Backspace);
    }
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state.snapshot().tasks, Vec::new());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn delete_requires_confirmation() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "keep me safe");

    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.input_mode, InputMode::ConfirmDelete);
    assert_eq!(app.confirm_choice, ConfirmChoice::No);

    // Confirming "No" leaves the todo alone.
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state.snapshot().tasks.len(), 1);

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state.snapshot().tasks, Vec::new());
}

#[test]
fn toggle_all_completes_then_uncompletes() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "one");
    add_todo(&mut app, "two");
    press(&mut app, KeyCode::Char(' '));

    press(&mut app, KeyCode::Char('t'));
    assert!(app.state.snapshot().tasks.iter().all(|t| t.completed));

    press(&mut app, KeyCode::Char('t'));
    assert!(app.state.snapshot().tasks.iter().all(|t| !t.completed));
}

#[test]
fn clear_completed_keeps_active_todos() {
    let (mut app, _guard) = app_with_temp_dir();
    add_todo(&mut app, "active");
    add_todo(&mut app, "done");
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char(' '));

    press(&mut app, KeyCode::Char('c'));

    let snapshot = app.state.snapshot();
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].title, "active");
}

#[test]
fn centered_rect_keeps_within_bounds() {
    let area = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };
    let rect = centered_rect(40, 10, area);
    assert!(rect.x >= area.x);
    assert!(rect.y >= area.y);
    assert!(rect.width <= area.width);
    assert!(rect.height <= area.height);
    assert_eq!(rect.width, 40);
    assert_eq!(rect.height, 10);
}

#[test]
fn items_left_label_pluralizes() {
    assert_eq!(items_left_label(0), "0 items left");
    assert_eq!(items_left_label(1), "1 item left");
    assert_eq!(items_left_label(2), "2 items left");
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    ToggleDone,
    ToggleAll,
    ClearCompleted,
    Delete,
    ShowHelp,
    SelectNext,
    SelectPrev,
    PrevTab,
    NextTab,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('e') => Some(Self::EnterEdit),
            KeyCode::Char(' ') | KeyCode::Char('d') | KeyCode::Enter => Some(Self::ToggleDone),
            KeyCode::Char('t') => Some(Self::ToggleAll),
            KeyCode::Char('c') => Some(Self::ClearCompleted),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('h') => Some(Self::ShowHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Left | KeyCode::BackTab => Some(Self::PrevTab),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Self::NextTab),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Edit => self.handle_edit_mode(key),
            InputMode::Help => self.handle_help_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => {
                self.should_quit = true;
            }
            NormalAction::EnterAdd => {
                self.input_mode = InputMode::Add;
                self.input.clear();
            }
            NormalAction::EnterEdit => {
                self.start_edit();
            }
            NormalAction::ToggleDone => {
                self.toggle_selected();
            }
            NormalAction::ToggleAll => {
                self.toggle_all();
            }
            NormalAction::ClearCompleted => {
                self.clear_completed();
            }
            NormalAction::Delete => {
                self.prompt_delete();
            }
            NormalAction::ShowHelp => {
                self.input_mode = InputMode::Help;
            }
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::PrevTab => self.prev_tab(),
            NormalAction::NextTab => self.next_tab(),
            NormalAction::SelectFirst => {
                if !self.visible.is_empty() {
                    self.selected = 0;
                    self.table_state.select(Some(self.selected));
                }
            }
            NormalAction::SelectLast => {
                if !self.visible.is_empty() {
                    self.selected = self.visible.len() - 1;
                    self.table_state.select(Some(self.selected));
                }
            }
        }
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.add_task(),
            KeyCode::Esc => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
            }
            _ => self.handle_buffer_key(key),
        }
    }

    fn handle_edit_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.apply_edit(),
            KeyCode::Esc => self.cancel_edit(),
            _ => self.handle_buffer_key(key),
        }
    }

    fn handle_buffer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Char(c) => self.input.insert_char(c),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h')) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Enter => {
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete();
                }
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }
}

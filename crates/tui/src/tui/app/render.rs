use std::cmp::min;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use ratatui::Frame;

use crate::model::Filter;
use crate::tui::constants::{
    ADD_PLACEHOLDER, APP_VERSION, HELP_ADD, HELP_CONFIRM, HELP_EDIT, HELP_HELP, HELP_NORMAL,
};
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, inset_rect, items_left_label, BG_ACCENT,
    BG_BASE, BG_PANEL,
};

use super::{App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_tasks(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Add | InputMode::Edit => self.draw_input_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let current = self
            .tabs
            .get(self.tab_index)
            .map(|tab| tab.description)
            .unwrap_or("Todos");
        let left_line = Line::from(vec![
            Span::styled(
                format!(" tido v{} ☑ ", APP_VERSION),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {}", current)),
            Span::raw("  "),
            Span::styled(
                format!("💾 {}", self.config.store_path().display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        f.render_widget(
            Paragraph::new(left_line).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let snapshot = self.state.snapshot();
        let right_line = Line::from(vec![Span::styled(
            format!(
                "{} todos • {} done ",
                snapshot.tasks.len(),
                snapshot.completed_count()
            ),
            Style::default().fg(Color::DarkGray),
        )]);
        let right_para = Paragraph::new(right_line)
            .alignment(ratatui::layout::Alignment::Right)
            .style(Style::default().bg(BG_BASE));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let titles: Vec<Line> = self.tabs.iter().map(|tab| Line::from(tab.label)).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab_index)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Filters"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_tasks(&mut self, f: &mut Frame<'_>, area: Rect) {
        if self.visible.is_empty() {
            let lines = self.empty_state();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL));
            let inner = block.inner(area);
            f.render_widget(Clear, area);
            f.render_widget(block, area);

            if inner.width == 0 || inner.height == 0 {
                return;
            }

            let width = inner.width.min(80).max(1);
            let mut height = (lines.len() as u16).saturating_add(2).min(inner.height);
            if height < 3 && inner.height >= 3 {
                height = 3;
            }
            let content_area = centered_rect(width, height, inner);
            f.render_widget(Clear, content_area);

            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().bg(BG_PANEL));
            f.render_widget(paragraph, content_area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("✔"),
            Cell::from("📝 Title"),
            Cell::from("#️⃣ ID"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .visible
            .iter()
            .map(|task| {
                let mark = if task.completed { "[x]" } else { "[ ]" };
                let title_style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(mark),
                    Cell::from(Span::styled(task.title.clone(), title_style)),
                    Cell::from(task.id.to_string())
                        .style(Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(14),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn empty_state(&self) -> Vec<Line<'static>> {
        let heading = match self.current_filter() {
            Filter::All => "All clear ✨",
            Filter::Active => "Nothing left to do ⚡",
            Filter::Completed => "Nothing completed yet ✅",
        };

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::from(vec![Span::styled(
            heading,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::default());

        let hint_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        let hints = [
            "Press 'a' to add a todo.",
            "Use Tab to switch between All, Active, and Completed.",
        ];
        for hint in hints {
            lines.push(Line::from(vec![Span::styled(hint, hint_style)]));
        }

        if self.first_run {
            lines.push(Line::default());
            lines.push(Line::from(vec![Span::styled(
                format!(
                    "Your todos live in `{}` (adjust with `--data-dir` or `TIDO_DATA_DIR`).",
                    self.config.store_path().display()
                ),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        lines
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let snapshot = self.state.snapshot();
        let status_line = if let Some(message) = &snapshot.error_message {
            Line::from(vec![Span::styled(
                format!("⚠️  {}", message),
                Style::default().fg(Color::Red),
            )])
        } else {
            let mut spans = vec![Span::raw(items_left_label(snapshot.active_count()))];
            if snapshot.has_completed() {
                spans.push(Span::styled(
                    format!(" • {} completed", snapshot.completed_count()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        };

        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => HELP_NORMAL,
            InputMode::Add => HELP_ADD,
            InputMode::Edit => HELP_EDIT,
            InputMode::Help => HELP_HELP,
            InputMode::ConfirmDelete => HELP_CONFIRM,
        };
        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_input_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(10), 80);
        let popup_area = centered_rect(width, 5, area);
        f.render_widget(Clear, popup_area);

        let title = match self.input_mode {
            InputMode::Add => "➕ Add Todo",
            InputMode::Edit => "✏️ Edit Todo",
            InputMode::Normal | InputMode::Help | InputMode::ConfirmDelete => "Input",
        };
        let inner = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(popup_area);

        f.render_widget(Clear, inner[0]);
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        f.render_widget(input_block.clone(), inner[0]);
        let input_area = input_block.inner(inner[0]);

        let text = self.input.as_str();
        let paragraph = if text.is_empty() && self.input_mode == InputMode::Add {
            Paragraph::new(Span::styled(
                ADD_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Paragraph::new(text)
        };
        f.render_widget(paragraph.style(Style::default().bg(BG_PANEL)), input_area);

        if input_area.width > 0 {
            let cursor_x = input_area.x + (self.input.cursor_col() as u16).min(input_area.width - 1);
            f.set_cursor(cursor_x, input_area.y);
        }
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("⌨️ Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(combo, Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(desc),
                ])
            })
            .collect();

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        let content = inset_rect(inner, 1);
        f.render_widget(Clear, inner);
        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            content,
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("🗑 Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let task_title = self
            .visible
            .get(self.selected)
            .map(|task| task.title.as_str())
            .unwrap_or("selected todo");

        let mut lines = Vec::new();
        lines.push(Line::from(vec![Span::styled(
            "This action cannot be undone.",
            Style::default().fg(Color::Red),
        )]));
        lines.push(Line::from(vec![Span::styled(
            format!("Delete '{}'?", task_title),
            Style::default().fg(Color::White),
        )]));
        lines.push(Line::default());

        let yes_style = if self.confirm_choice == super::ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == super::ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled("  Yes  ", yes_style),
            Span::raw("    "),
            Span::styled("  No  ", no_style),
        ]));

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}

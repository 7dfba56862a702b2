//! Board view: input line, pending and completed columns, status bar

use chrono::Utc;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::tui::app::{App, Focus};
use crate::cli::tui::utils::{age_label, truncate_str};
use crate::domain::Column;

/// Draw the board layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(5),    // Columns
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_input(frame, app, chunks[0]);
    draw_column(frame, app, Column::Pending, columns[0]);
    draw_column(frame, app, Column::Completed, columns[1]);
    draw_status_bar(frame, app, chunks[2]);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Input;
    let draft = app.board().draft();

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" ● ", Style::default().fg(Color::Cyan)),
            Span::raw("To-Do Board "),
        ]))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner_width = area.width.saturating_sub(2);
    let draft_width = Line::from(draft).width() as u16;

    let paragraph = if draft.is_empty() {
        Paragraph::new(Span::styled(
            app.labels().input_placeholder.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        // Keep the end of a long draft in view
        let offset = draft_width.saturating_sub(inner_width.saturating_sub(1));
        Paragraph::new(draft).scroll((0, offset))
    };

    frame.render_widget(paragraph.block(block), area);

    if focused {
        let x = area.x + 1 + draft_width.min(inner_width.saturating_sub(1));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn draw_column(frame: &mut Frame, app: &App, column: Column, area: Rect) {
    let labels = app.labels();
    let tasks = app.board().state().column(column);
    let focused = app.focus().column() == Some(column);

    let (title, empty, color, marker) = match column {
        Column::Pending => (&labels.pending_title, &labels.pending_empty, Color::Green, "[ ]"),
        Column::Completed => (
            &labels.completed_title,
            &labels.completed_empty,
            Color::DarkGray,
            "[x]",
        ),
    };

    let mut border_style = Style::default().fg(color);
    if focused {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .title(format!("{} ({})", title, tasks.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if tasks.is_empty() {
        let paragraph = Paragraph::new(empty.as_str())
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let now = Utc::now();
    let text_style = match column {
        Column::Pending => Style::default(),
        Column::Completed => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
    };

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let age = if app.show_age() {
                format!("  {}", age_label(task.created_at, now))
            } else {
                String::new()
            };
            // borders, highlight symbol, marker and its space
            let budget = (area.width as usize)
                .saturating_sub(2 + 2 + marker.len() + 1)
                .saturating_sub(age.chars().count());

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(color)),
                Span::styled(truncate_str(&task.text, budget), text_style),
                Span::styled(age, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    if focused {
        let mut state = ListState::default().with_selected(Some(app.selected_index(column)));
        frame.render_stateful_widget(list, area, &mut state);
    } else {
        frame.render_widget(list, area);
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (focus_label, hints) = match app.focus() {
        Focus::Input => ("Input", "Tip: press Enter to add a task. Tab/Esc: columns"),
        Focus::Pending => ("To Do", "Enter:complete j/k:move Tab:focus a:add ?:help q:quit"),
        Focus::Completed => (
            "Completed",
            "r:restore d:delete j/k:move Tab:focus a:add ?:help q:quit",
        ),
    };

    let (content, style) = match app.status_message() {
        Some(msg) => (msg, Style::default().fg(Color::Yellow)),
        None => (hints, Style::default()),
    };

    let paragraph = Paragraph::new(format!("[{}] {}", focus_label, content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

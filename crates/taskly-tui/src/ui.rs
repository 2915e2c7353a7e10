//! Rendering of the board

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use taskly_core::Status;

use crate::model::Board;

/// Accent color for a status column
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::DarkGray,
        Status::InProgress => Color::Yellow,
        Status::Done => Color::Green,
    }
}

/// Draw the three status columns and the footer
pub fn draw_board(f: &mut Frame, area: Rect, board: &Board) {
    let [columns_area, footer_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
    let column_areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(columns_area);

    for (status, column_area) in Status::all().iter().zip(column_areas.iter()) {
        draw_column(f, *column_area, board, *status);
    }

    draw_footer(f, footer_area, board);
}

fn draw_column(f: &mut Frame, area: Rect, board: &Board, status: Status) {
    let is_focused = board.focus() == status;
    let tasks = board.visible_tasks(status);

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let mut lines = vec![Line::from(Span::styled(
                task.title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if let Some(description) = task.description() {
                lines.push(Line::from(Span::styled(
                    description,
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(status_color(status))
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ({}) ", status.label(), tasks.len()));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if is_focused && !tasks.is_empty() {
        state.select(Some(board.column(status).selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(f: &mut Frame, area: Rect, board: &Board) {
    let line = if let Some(error) = board.error() {
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red)))
    } else if board.is_filtering() {
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Magenta)),
            Span::raw(format!("{}_", board.filter())),
        ])
    } else {
        let mut spans = vec![Span::styled(
            "←/→ column  ↑/↓ select  enter next  backspace prev  / filter  q quit",
            Style::default().fg(Color::DarkGray),
        )];
        if !board.filter().is_empty() {
            spans.push(Span::styled(
                format!("  [filter: {}]", board.filter()),
                Style::default().fg(Color::Magenta),
            ));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line), area);
}

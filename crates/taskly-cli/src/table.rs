//! Table rendering for `taskly list`.

use crossterm::style::{Color, Stylize};
use taskly_core::{Status, Task};
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 5] = ["ID", "Name", "Project", "Status", "Created At"];
const STATUS_COLUMN: usize = 3;

fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::DarkGrey,
        Status::InProgress => Color::Yellow,
        Status::Done => Color::Green,
    }
}

/// Render tasks as a bordered table. With `color`, headers and status cells
/// carry ANSI styling.
pub fn render_table(tasks: &[Task], color: bool) -> String {
    let rows: Vec<[String; 5]> = tasks
        .iter()
        .map(|task| {
            [
                task.id.to_string(),
                task.name.clone(),
                task.project.clone(),
                task.status.label().to_string(),
                task.created_date(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let border = |s: String| {
        if color {
            s.with(Color::DarkGrey).to_string()
        } else {
            s
        }
    };
    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        border(format!("{left}{}{right}", segments.join(mid)))
    };
    let pipe = border("│".to_string());

    let mut lines = vec![rule("┌", "┬", "┐")];

    let header_cells: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(header, width)| {
            let cell = pad(header, width);
            if color {
                cell.bold().magenta().to_string()
            } else {
                cell
            }
        })
        .collect();
    lines.push(join_cells(&header_cells, &pipe));
    lines.push(rule("├", "┼", "┤"));

    for (task, row) in tasks.iter().zip(&rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (cell, width))| {
                let cell = pad(cell, width);
                if color && index == STATUS_COLUMN {
                    cell.with(status_color(task.status)).to_string()
                } else {
                    cell
                }
            })
            .collect();
        lines.push(join_cells(&cells, &pipe));
    }

    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!(" {text}{} ", " ".repeat(fill))
}

fn join_cells(cells: &[String], pipe: &str) -> String {
    format!("{pipe}{}{pipe}", cells.join(pipe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskly_core::TaskId;

    fn task(id: u64, name: &str, project: &str, status: Status) -> Task {
        Task {
            id: TaskId(id),
            name: name.to_string(),
            project: project.to_string(),
            status,
            created: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn plain_table_layout() {
        let tasks = vec![task(1, "Buy milk", "home", Status::Todo)];
        let date = tasks[0].created_date();

        let expected = [
            "┌────┬──────────┬─────────┬────────┬────────────┐".to_string(),
            "│ ID │ Name     │ Project │ Status │ Created At │".to_string(),
            "├────┼──────────┼─────────┼────────┼────────────┤".to_string(),
            format!("│ 1  │ Buy milk │ home    │ todo   │ {date} │"),
            "└────┴──────────┴─────────┴────────┴────────────┘".to_string(),
        ]
        .join("\n");
        assert_eq!(render_table(&tasks, false), expected);
    }

    #[test]
    fn columns_grow_to_widest_cell() {
        let tasks = vec![
            task(1, "a", "", Status::InProgress),
            task(10, "Prepare quarterly report", "work", Status::Done),
        ];
        let table = render_table(&tasks, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        let width = lines[0].width();
        assert!(lines.iter().all(|line| line.width() == width));
        assert!(lines[3].contains("│ in progress │"));
        assert!(lines[4].contains("│ Prepare quarterly report │"));
    }

    #[test]
    fn wide_characters_are_measured_by_display_width() {
        let tasks = vec![task(1, "日本語", "", Status::Todo)];
        let table = render_table(&tasks, false);
        let widths: Vec<usize> = table.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn color_output_styles_status_cells() {
        let tasks = vec![task(1, "Ship", "", Status::Done)];
        let table = render_table(&tasks, true);
        assert!(table.contains("\u{1b}["));
        assert!(table.contains("done"));
        assert!(!render_table(&tasks, false).contains("\u{1b}["));
    }
}

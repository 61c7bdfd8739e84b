use crate::app::{AppState, PICKER_MAX_ROWS};
use crate::tui::table::truncate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// First row shown so that `cursor` stays inside a window of `rows`.
pub fn scroll_offset(cursor: usize, rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        cursor.saturating_sub(rows - 1)
    }
}

pub fn render(f: &mut Frame, state: &AppState) {
    let Some(picker) = state.picker_ref() else {
        return;
    };
    let matches = state.picker_matches();
    let area = f.area();

    let rows = matches.len().clamp(1, PICKER_MAX_ROWS);
    // query line + separator + rows + borders
    let height = (rows as u16 + 4).min(area.height);
    let width = (area.width / 2).max(30).min(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 3;
    let overlay_area = Rect::new(x, y, width, height);
    f.render_widget(Clear, overlay_area);

    let inner_width = width.saturating_sub(4) as usize;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}█", picker.query), Style::default().fg(Color::White)),
        ]),
        Line::styled("─".repeat(inner_width + 2), Style::default().fg(Color::DarkGray)),
    ];

    if matches.is_empty() {
        let msg = if state.projects.is_loading() {
            "Loading projects…"
        } else {
            "No matching projects"
        };
        lines.push(Line::styled(msg, Style::default().fg(Color::DarkGray)));
    } else {
        let offset = scroll_offset(picker.cursor, rows);
        for (i, project) in matches.iter().enumerate().skip(offset).take(rows) {
            let current = state.selected_project.as_deref() == Some(project.name.as_str());
            let marker = if current { "● " } else { "  " };
            let mut style = Style::default().fg(Color::White);
            if i == picker.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Green)),
                Span::styled(truncate(&project.name, inner_width.saturating_sub(2)), style),
            ]));
        }
    }

    let block = Block::default()
        .title(format!(" Team Project ({}) ", matches.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    f.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

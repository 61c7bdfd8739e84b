use crate::app::DetailOverlay;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const MIN_PANEL_WIDTH: u16 = 40;

/// Side panel docked to the right edge, below the header.
fn panel_area(area: Rect, rows: usize) -> Rect {
    let width = (area.width / 2).max(MIN_PANEL_WIDTH).min(area.width);
    let wanted = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    let height = wanted.min(area.height.saturating_sub(2)).max(3).min(area.height);
    let top = (area.height - height).min(2);
    Rect::new(area.x + area.width - width, area.y + top, width, height)
}

fn value_style(label: &str, value: &str) -> Style {
    if value == "-" || value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else if label == "URL" {
        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn render(f: &mut Frame, overlay: &DetailOverlay) {
    let area = panel_area(f.area(), overlay.lines.len());
    f.render_widget(Clear, area);

    let label_width = overlay
        .lines
        .iter()
        .map(|(l, _)| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0);

    let rows = overlay.lines.iter().map(|(label, value)| {
        Row::new([
            Cell::from(label.as_str()).style(Style::default().fg(Color::DarkGray)),
            Cell::from(value.as_str()).style(value_style(label, value)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(u16::try_from(label_width).unwrap_or(u16::MAX)),
            Constraint::Fill(1),
        ],
    )
    .column_spacing(2)
    .block(
        Block::default()
            .title(format!(" {} ", overlay.title))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .title_bottom(" d/q/Esc close ")
            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );
    f.render_widget(table, area);
}

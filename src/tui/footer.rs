use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;

fn hints(state: &AppState, narrow: bool) -> &'static [(&'static str, &'static str)] {
    if state.has_picker() {
        &[("type", "filter"), ("↑↓", "move"), ("Enter", "select"), ("Esc", "close")]
    } else if state.has_detail_overlay() {
        &[("d/q/Esc", "close")]
    } else if state.filter.editing {
        &[("type", "keyword"), ("Enter", "keep"), ("Esc", "clear")]
    } else if state.shows_zero_data() {
        &[("o/Enter", "create pipeline"), ("p", "project"), ("Tab", "runs"), ("q", "quit")]
    } else if narrow {
        &[("j/k", "nav"), ("Tab", "tab"), ("p", "proj"), ("/", "find"), ("o", "open"), ("q", "quit")]
    } else {
        &[
            ("↑↓/jk", "navigate"),
            ("Tab", "switch tab"),
            ("p", "project"),
            ("/", "filter"),
            ("d", "details"),
            ("o", "open"),
            ("e", "edit"),
            ("v", "releases"),
            ("r", "refresh"),
            ("q", "quit"),
        ]
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let narrow = area.width < crate::app::NARROW_WIDTH_THRESHOLD;

    let line = if let Some(notif) = state.notifications.last() {
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(notif.message.as_str(), Style::default().fg(Color::Yellow)),
        ])
    } else {
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, desc)) in hints(state, narrow).iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(format!(" {desc}"), Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);

    if !narrow && !state.config.version_string.is_empty() {
        let version = Paragraph::new(Span::styled(
            state.config.version_string.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
        f.render_widget(version, area);
    }
}

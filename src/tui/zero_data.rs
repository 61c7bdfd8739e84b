use crate::app::AppState;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub const PRIMARY_TEXT: &str = "Create your first Pipeline";
pub const SECONDARY_TEXT: &str = "Automate your build and release processes using our wizard, \
and go from code to cloud-hosted within minutes.";
pub const ACTION_TEXT: &str = "Create Pipeline";

/// Placeholder shown instead of the Summary table when the project has no definitions.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" All pipelines ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let target = state.current_project_url();
    let lines = vec![
        Line::from(Span::styled(
            PRIMARY_TEXT,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(SECONDARY_TEXT, Style::default().fg(Color::Gray))),
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                format!(" {ACTION_TEXT} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  o / Enter", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(target, Style::default().fg(Color::DarkGray))),
    ];

    let height = lines.len() as u16 + 2;
    let vertical = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(inner);

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, vertical[1]);
}

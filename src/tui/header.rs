use crate::app::{AppState, Tab};
use crate::tui::spinner;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            " CI/CD Dashboard ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];

    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *tab == state.tab {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(tab.title(), style));
    }
    spans.push(Span::raw(" │ "));

    match &state.selected_project {
        Some(name) => spans.push(Span::styled(
            name.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled("Team Project", Style::default().fg(Color::DarkGray))),
    }

    if state.filter.editing {
        spans.push(Span::styled(
            format!(" /{}█", state.filter.text),
            Style::default().fg(Color::Magenta),
        ));
    } else if !state.filter.text.trim().is_empty() {
        spans.push(Span::styled(
            format!(" [{}]", state.filter.text.trim()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if state.deployments.status == crate::app::SlotStatus::Ready {
        spans.push(Span::styled(
            format!(" {} deployments", state.deployments.items.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if state.has_active_builds() {
        spans.push(Span::styled(" ● running", Style::default().fg(Color::Cyan)));
    }

    // Loading spinner or refresh countdown
    if state.is_loading() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            spinner::frame(state.spinner_frame),
            Style::default().fg(Color::Yellow),
        ));
    } else if state.next_refresh_in > 0 {
        spans.push(Span::styled(
            format!(" {}s", state.next_refresh_in),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if state.error_message().is_some() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

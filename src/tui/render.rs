use crate::app::{ActiveOverlay, AppState};
use crate::tui::{detail_overlay, footer, header, picker_overlay, table, zero_data};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(1),    // table
            Constraint::Length(2), // footer
        ])
        .split(f.area());

    header::render(f, chunks[0], state);
    if state.shows_zero_data() {
        zero_data::render(f, chunks[1], state);
    } else {
        table::render(f, chunks[1], state);
    }
    footer::render(f, chunks[2], state);

    if let Some(err) = state.error_message() {
        let area = f.area();
        if area.height > 6 && area.width >= 4 {
            let err_area = Rect {
                x: area.x + 1,
                y: area.y + area.height.saturating_sub(5),
                width: area.width.saturating_sub(2),
                height: 3,
            };
            let err_widget = Paragraph::new(err.to_owned())
                .style(Style::default().fg(Color::Red))
                .block(
                    Block::default()
                        .title(" Error ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .wrap(Wrap { trim: true });
            f.render_widget(err_widget, err_area);
        }
    }

    // Overlays draw on top of everything
    match &state.overlay {
        ActiveOverlay::Picker(_) => picker_overlay::render(f, state),
        ActiveOverlay::Detail(overlay) => detail_overlay::render(f, overlay),
        ActiveOverlay::None => {}
    }
}

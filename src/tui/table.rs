use crate::app::{AppState, Build, BuildDefinitionReference, SlotStatus, Tab};
use crate::indicator::{pipeline_indicator, IndicatorStyle};
use crate::tui::spinner;
use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let title = match state.tab {
        Tab::Summary => " All pipelines ".to_string(),
        Tab::Runs => format!(" Runs (latest {}) ", state.config.top),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if state.selected_project.is_none() {
        let msg = if state.projects.is_loading() {
            format!("{} Loading projects…", spinner::frame(state.spinner_frame))
        } else {
            "No project selected. Press p to choose a team project.".to_string()
        };
        render_message(f, area, block, msg, Color::DarkGray);
        return;
    }

    let (status, empty) = match state.tab {
        Tab::Summary => (&state.definitions.status, state.definitions.items.is_empty()),
        Tab::Runs => (&state.builds.status, state.builds.items.is_empty()),
    };
    if empty {
        match status {
            SlotStatus::Loading => {
                let msg = format!("{} Loading…", spinner::frame(state.spinner_frame));
                render_message(f, area, block, msg, Color::Yellow);
                return;
            }
            SlotStatus::Failed(err) => {
                render_message(f, area, block, format!("Failed to load: {err}"), Color::Red);
                return;
            }
            SlotStatus::Idle | SlotStatus::Ready => {}
        }
    }

    let narrow = area.width < crate::app::NARROW_WIDTH_THRESHOLD;
    let now = Utc::now();
    let (header, rows, widths) = match state.tab {
        Tab::Summary => summary_table(state, now, narrow),
        Tab::Runs => runs_table(state, now, narrow),
    };

    if rows.is_empty() {
        let msg = if state.filter.text.trim().is_empty() {
            "No builds found"
        } else {
            "Nothing matches the filter"
        };
        render_message(f, area, block, msg.to_string(), Color::DarkGray);
        return;
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn render_message(f: &mut Frame, area: Rect, block: Block, msg: String, color: Color) {
    let para = Paragraph::new(msg)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(para, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|t| {
        Cell::from(*t).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }))
}

fn summary_table(
    state: &AppState,
    now: DateTime<Utc>,
    narrow: bool,
) -> (Row<'static>, Vec<Row<'static>>, Vec<Constraint>) {
    let rows: Vec<Row> = state
        .visible_definitions()
        .into_iter()
        .map(|d| definition_row(d, state, now, narrow))
        .collect();
    if narrow {
        (
            header_row(&["", "Pipeline", "Last run"]),
            rows,
            vec![Constraint::Length(2), Constraint::Fill(2), Constraint::Fill(1)],
        )
    } else {
        (
            header_row(&["", "Pipeline", "Last run", "Requested by", "State", "When", "Duration"]),
            rows,
            vec![
                Constraint::Length(2),
                Constraint::Fill(3),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(18),
                Constraint::Length(9),
                Constraint::Length(8),
            ],
        )
    }
}

fn definition_row(
    d: &BuildDefinitionReference,
    state: &AppState,
    now: DateTime<Utc>,
    narrow: bool,
) -> Row<'static> {
    let latest = d.latest_build.as_ref();
    let (glyph, color, label) = match latest {
        Some(b) => {
            let ind = pipeline_indicator(b.result, b.status);
            let (g, c) = indicator_glyph(ind.style, state.spinner_frame);
            (g, c, ind.label)
        }
        None => ("·", Color::DarkGray, "No runs"),
    };
    let number = latest.map_or_else(String::new, |b| format!("#{}", b.build_number));
    let mut cells = vec![
        Cell::from(glyph).style(Style::default().fg(color)),
        Cell::from(d.name.clone()),
        Cell::from(number).style(Style::default().fg(Color::DarkGray)),
    ];
    if !narrow {
        cells.push(Cell::from(latest.map_or("", Build::requester).to_string()));
        cells.push(Cell::from(label).style(Style::default().fg(color)));
        cells.push(Cell::from(latest.and_then(|b| b.queue_time).map_or_else(String::new, |t| ago(t, now))));
        cells.push(Cell::from(latest.and_then(|b| build_duration(b, now)).map_or_else(String::new, format_duration)));
    }
    Row::new(cells)
}

fn runs_table(
    state: &AppState,
    now: DateTime<Utc>,
    narrow: bool,
) -> (Row<'static>, Vec<Row<'static>>, Vec<Constraint>) {
    let notified: Vec<u64> = state.notifications.iter().map(|n| n.build_id).collect();
    let rows: Vec<Row> = state
        .visible_builds()
        .into_iter()
        .map(|b| build_row(b, state.spinner_frame, notified.contains(&b.id), now, narrow))
        .collect();
    if narrow {
        (
            header_row(&["", "Pipeline", "Build"]),
            rows,
            vec![Constraint::Length(2), Constraint::Fill(2), Constraint::Fill(1)],
        )
    } else {
        (
            header_row(&["", "Pipeline", "Build", "Branch", "Requested by", "When", "Duration"]),
            rows,
            vec![
                Constraint::Length(2),
                Constraint::Fill(3),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Fill(2),
                Constraint::Length(9),
                Constraint::Length(8),
            ],
        )
    }
}

fn build_row(
    b: &Build,
    spinner_frame: usize,
    notified: bool,
    now: DateTime<Utc>,
    narrow: bool,
) -> Row<'static> {
    let ind = pipeline_indicator(b.result, b.status);
    let (glyph, color) = indicator_glyph(ind.style, spinner_frame);
    let name = if notified {
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::raw(b.definition.name.clone()),
        ])
    } else {
        Line::from(b.definition.name.clone())
    };
    let mut cells = vec![
        Cell::from(glyph).style(Style::default().fg(color)),
        Cell::from(name),
        Cell::from(format!("#{}", b.build_number)).style(Style::default().fg(Color::DarkGray)),
    ];
    if !narrow {
        cells.push(Cell::from(b.short_branch().unwrap_or("").to_string()).style(Style::default().fg(Color::Blue)));
        cells.push(Cell::from(b.requester().to_string()));
        cells.push(Cell::from(b.queue_time.map_or_else(String::new, |t| ago(t, now))));
        cells.push(Cell::from(build_duration(b, now).map_or_else(String::new, format_duration)));
    }
    Row::new(cells)
}

/// Glyph and color for an indicator style. Running builds animate with the spinner.
pub fn indicator_glyph(style: IndicatorStyle, spinner_frame: usize) -> (&'static str, Color) {
    match style {
        IndicatorStyle::Success => ("✓", Color::Green),
        IndicatorStyle::Failed => ("✗", Color::Red),
        IndicatorStyle::Warning => ("!", Color::Yellow),
        IndicatorStyle::Canceled => ("⊘", Color::Magenta),
        IndicatorStyle::Running => (spinner::frame(spinner_frame), Color::Cyan),
        IndicatorStyle::Queued => ("◷", Color::Blue),
        IndicatorStyle::Skipped => ("-", Color::DarkGray),
    }
}

/// Seconds between start and finish, or start and now while still running.
pub fn build_duration(b: &Build, now: DateTime<Utc>) -> Option<i64> {
    let start = b.start_time?;
    let end = b.finish_time.unwrap_or(now);
    Some(end.signed_duration_since(start).num_seconds())
}

pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

pub fn ago(t: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(t).num_seconds().max(0);
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Cuts `s` to `max_width` display columns, ending in `…` when shortened.
pub fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw + 1 > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{BuildResult, BuildStatus, DefinitionRef, Links};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn build(start: Option<i64>, finish: Option<i64>) -> Build {
        Build {
            id: 1,
            project: None,
            definition: DefinitionRef { id: 1, name: "CI".to_string() },
            build_number: "1".to_string(),
            requested_for: None,
            result: BuildResult::None,
            status: BuildStatus::InProgress,
            queue_time: None,
            start_time: start.map(at),
            finish_time: finish.map(at),
            source_branch: None,
            links: Links::default(),
        }
    }

    #[test]
    fn duration_seconds() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
    }

    #[test]
    fn duration_minutes() {
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(754), "12m 34s");
    }

    #[test]
    fn duration_hours() {
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(7380), "2h 3m");
    }

    #[test]
    fn duration_negative_clamped() {
        assert_eq!(format_duration(-5), "0s");
    }

    #[test]
    fn ago_buckets() {
        let now = at(200_000);
        assert_eq!(ago(at(199_990), now), "just now");
        assert_eq!(ago(at(200_000 - 300), now), "5m ago");
        assert_eq!(ago(at(200_000 - 7200), now), "2h ago");
        assert_eq!(ago(at(0), now), "2d ago");
        assert_eq!(ago(at(200_100), now), "just now");
    }

    #[test]
    fn build_duration_finished_and_running() {
        assert_eq!(build_duration(&build(Some(0), Some(90)), at(1000)), Some(90));
        assert_eq!(build_duration(&build(Some(0), None), at(45)), Some(45));
        assert_eq!(build_duration(&build(None, None), at(45)), None);
    }

    #[test]
    fn truncate_short_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_long_gets_ellipsis() {
        assert_eq!(truncate("hello world", 6), "hello…");
    }

    #[test]
    fn truncate_zero_width() {
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn glyph_colors() {
        assert_eq!(indicator_glyph(IndicatorStyle::Success, 0), ("✓", Color::Green));
        assert_eq!(indicator_glyph(IndicatorStyle::Failed, 0), ("✗", Color::Red));
        assert_eq!(indicator_glyph(IndicatorStyle::Skipped, 0).1, Color::DarkGray);
    }

    #[test]
    fn running_glyph_animates() {
        let a = indicator_glyph(IndicatorStyle::Running, 0).0;
        let b = indicator_glyph(IndicatorStyle::Running, 1).0;
        assert_ne!(a, b);
    }
}

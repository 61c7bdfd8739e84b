//! Startup screen shown while the organization is contacted.
//!
//! Each phase future runs inside `tokio::select!` next to an 80ms spinner tick so the
//! screen keeps animating during slow network calls.

use crate::app::Project;
use crate::traits::PipelineSource;
use crate::tui::spinner;
use color_eyre::eyre::{eyre, Result};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::future::Future;
use std::time::Duration;

const BANNER: &[&str] = &[
    r"            _             ",
    r"   __ _  __| |__      __  ",
    r"  / _` |/ _` |\ \ /\ / /  ",
    r" | (_| | (_| | \ V  V /   ",
    r"  \__,_|\__,_|  \_/\_/    ",
];

/// Two-stop gradient from azure to deep blue across `total_lines`.
fn gradient_color(line_idx: usize, total_lines: usize) -> Color {
    if total_lines <= 1 {
        return Color::Rgb(0, 170, 255);
    }
    let t = line_idx as f64 / (total_lines - 1) as f64;
    let lerp = |a: f64, b: f64| (a + (b - a) * t) as u8;
    Color::Rgb(lerp(0.0, 40.0), lerp(170.0, 60.0), lerp(255.0, 200.0))
}

#[derive(Clone)]
enum PhaseStatus {
    InProgress,
    Done,
    Failed(String),
}

#[derive(Clone)]
struct StartupPhase {
    label: String,
    detail: Option<String>,
    status: PhaseStatus,
}

pub struct StartupResult {
    pub projects: Vec<Project>,
    /// Project to select right away, confirmed to exist.
    pub project: Option<String>,
}

fn render_startup<B: Backend>(terminal: &mut Terminal<B>, phases: &[StartupPhase], frame: usize) {
    if let Err(e) = terminal.draw(|f| {
        let area = f.area();
        let art_height = BANNER.len() as u16;
        let total_lines = art_height + 1 + phases.len() as u16;
        let top_offset = area.height.saturating_sub(total_lines) / 2;
        let vertical = Layout::vertical([
            Constraint::Length(top_offset),
            Constraint::Length(total_lines),
            Constraint::Min(0),
        ])
        .split(area);

        let mut lines: Vec<Line> = BANNER
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Line::from(Span::styled(
                    *row,
                    Style::default().fg(gradient_color(i, BANNER.len())),
                ))
            })
            .collect();
        lines.push(Line::raw(""));

        for phase in phases {
            let (icon, icon_style) = match &phase.status {
                PhaseStatus::InProgress => (
                    spinner::frame(frame).to_string(),
                    Style::default().fg(Color::Yellow),
                ),
                PhaseStatus::Done => ("\u{2713}".to_string(), Style::default().fg(Color::Green)),
                PhaseStatus::Failed(_) => ("\u{2717}".to_string(), Style::default().fg(Color::Red)),
            };
            let mut spans = vec![
                Span::styled(format!("  {icon} "), icon_style),
                Span::styled(phase.label.as_str(), Style::default().fg(Color::White)),
            ];
            if let Some(detail) = &phase.detail {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(detail.as_str(), Style::default().fg(Color::DarkGray)));
            }
            if let PhaseStatus::Failed(msg) = &phase.status {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Red)));
            }
            lines.push(Line::from(spans));
        }

        f.render_widget(Paragraph::new(lines), vertical[1]);
    }) {
        tracing::warn!("startup render failed: {e}");
    }
}

async fn run_phase<B, F, T>(
    terminal: &mut Terminal<B>,
    phases: &mut Vec<StartupPhase>,
    label: &str,
    fut: F,
) -> Result<T>
where
    B: Backend,
    F: Future<Output = Result<T>>,
{
    phases.push(StartupPhase {
        label: label.to_string(),
        detail: None,
        status: PhaseStatus::InProgress,
    });
    render_startup(terminal, phases, 0);

    let mut ticker = tokio::time::interval(Duration::from_millis(80));
    let mut frame = 0usize;
    tokio::pin!(fut);

    loop {
        tokio::select! {
            result = &mut fut => {
                if let Some(phase) = phases.last_mut() {
                    phase.status = match &result {
                        Ok(_) => PhaseStatus::Done,
                        Err(e) => PhaseStatus::Failed(e.to_string()),
                    };
                }
                render_startup(terminal, phases, frame);
                return result;
            }
            _ = ticker.tick() => {
                frame += 1;
                render_startup(terminal, phases, frame);
            }
        }
    }
}

fn finish_phase<B: Backend>(
    terminal: &mut Terminal<B>,
    phases: &mut [StartupPhase],
    detail: String,
) {
    if let Some(phase) = phases.last_mut() {
        phase.detail = Some(detail);
    }
    render_startup(terminal, phases, 0);
}

pub async fn run_startup<B: Backend>(
    terminal: &mut Terminal<B>,
    source: &dyn PipelineSource,
    org_url: &str,
    project: Option<&str>,
    validate_project: Option<fn(&str) -> Result<(), String>>,
) -> Result<StartupResult> {
    let mut phases: Vec<StartupPhase> = Vec::new();

    if let (Some(name), Some(validate)) = (project, validate_project) {
        run_phase(terminal, &mut phases, "Validating project name", async {
            validate(name).map_err(|e| eyre!(e))
        })
        .await?;
    }

    let projects = run_phase(
        terminal,
        &mut phases,
        &format!("Connecting to {org_url}"),
        source.list_projects(),
    )
    .await?;
    finish_phase(terminal, &mut phases, format!("{} projects", projects.len()));

    let project = match project {
        Some(name) => {
            let found = run_phase(terminal, &mut phases, "Finding project", async {
                projects
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(name))
                    .map(|p| p.name.clone())
                    .ok_or_else(|| eyre!("Project '{name}' not found in {org_url}"))
            })
            .await?;
            finish_phase(terminal, &mut phases, found.clone());
            Some(found)
        }
        None => None,
    };

    Ok(StartupResult { projects, project })
}

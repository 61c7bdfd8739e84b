
use fixtures::*;
use adw::ado::{loader, parser};
use adw::app::{AppState, BuildResult, LoadEffect, SlotStatus, Tab};
use adw::events::AppEvent;
use adw::indicator::{pipeline_indicator, IndicatorStyle};
use adw::input::{self, Action, InputContext};
use adw::traits::PipelineSource;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("channel closed")
}

/// Receives `n` load results and applies them in arrival order.
async fn apply_n(
    state: &mut AppState,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    n: usize,
) -> Vec<LoadEffect> {
    let mut effects = Vec::new();
    for _ in 0..n {
        match next_event(rx).await {
            AppEvent::Loaded { generation, payload } => {
                effects.push(state.apply_load(generation, payload));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
    effects
}

fn screen_text(state: &AppState, width: u16, height: u16) -> String {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| {
            adw::tui::render::render(f, state);
        })
        .unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.cell((x, y)).unwrap().symbol());
        }
        text.push('\n');
    }
    text
}

// ========== Data flow tests ==========

#[test]
fn json_to_state_to_indicator() {
    let definitions = parser::parse_definitions(DEFINITIONS_JSON).expect("parse should succeed");
    assert_eq!(definitions.len(), 3);

    let mut state = make_state();
    let ticket = state.select_project("Fabrikam");
    state.apply_load(
        ticket.generation,
        adw::app::LoadPayload::Definitions(Ok(definitions)),
    );

    let styles: Vec<Option<IndicatorStyle>> = state
        .visible_definitions()
        .iter()
        .map(|d| {
            d.latest_build
                .as_ref()
                .map(|b| pipeline_indicator(b.result, b.status).style)
        })
        .collect();
    assert_eq!(
        styles,
        vec![
            Some(IndicatorStyle::Success),
            Some(IndicatorStyle::Failed),
            None
        ]
    );
}

#[test]
fn unfinished_builds_classified_by_status() {
    let builds = parser::parse_builds(BUILDS_JSON).unwrap();
    let labels: Vec<&str> = builds
        .iter()
        .map(|b| pipeline_indicator(b.result, b.status).label)
        .collect();
    assert_eq!(labels, vec!["NotStarted", "InProgress", "Success"]);
    assert_eq!(
        pipeline_indicator(builds[0].result, builds[0].status).aria_label,
        "Not Started"
    );
}

// ========== Loader tests ==========

#[tokio::test]
async fn project_load_fills_all_lists() {
    let source: Arc<dyn PipelineSource> = Arc::new(FakeSource::from_fixtures());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let ticket = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &ticket, &tx);
    assert!(state.is_loading());

    let effects = apply_n(&mut state, &mut rx, 3).await;
    assert!(effects.iter().all(|e| matches!(e, LoadEffect::Replaced { .. })));
    assert!(!state.is_loading());
    assert_eq!(state.definitions.items.len(), 3);
    assert_eq!(state.builds.items.len(), 3);
    assert_eq!(state.deployments.items.len(), 2);
    assert_eq!(state.refresh_failures, 0);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn reselection_discards_slow_results() {
    let source: Arc<dyn PipelineSource> = Arc::new(
        FakeSource::from_fixtures().with_slow_project("Fabrikam", Duration::from_millis(200)),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let first = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &first, &tx);
    let second = state.select_project("Tailspin");
    loader::spawn_project_load(&source, &second, &tx);

    let effects = apply_n(&mut state, &mut rx, 6).await;
    let stale = effects
        .iter()
        .filter(|e| matches!(e, LoadEffect::Stale))
        .count();
    assert_eq!(stale, 3);
    assert_eq!(state.selected_project.as_deref(), Some("Tailspin"));
    assert!(state
        .builds
        .items
        .iter()
        .all(|b| b.definition.name == "Tailspin"));
}

#[tokio::test]
async fn failed_selection_leaves_list_empty() {
    let fake = Arc::new(FakeSource::from_fixtures());
    fake.set_failing(&["builds"]);
    let source: Arc<dyn PipelineSource> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let ticket = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &ticket, &tx);
    apply_n(&mut state, &mut rx, 3).await;

    assert!(state.builds.items.is_empty());
    assert!(matches!(state.builds.status, SlotStatus::Failed(_)));
    assert_eq!(state.definitions.status, SlotStatus::Ready);
    assert!(state.error_message().is_some_and(|m| m.contains("HTTP 500")));
    assert_eq!(state.refresh_failures, 1);
}

#[tokio::test]
async fn failed_refresh_keeps_last_good_lists() {
    let fake = Arc::new(FakeSource::from_fixtures());
    let source: Arc<dyn PipelineSource> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let ticket = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &ticket, &tx);
    apply_n(&mut state, &mut rx, 3).await;

    fake.set_failing(&["definitions", "builds", "deployments"]);
    let ticket = state.refresh().unwrap();
    loader::spawn_project_load(&source, &ticket, &tx);
    apply_n(&mut state, &mut rx, 3).await;

    assert_eq!(state.builds.items.len(), 3);
    assert_eq!(state.definitions.items.len(), 3);
    assert_eq!(state.deployments.items.len(), 2);
    // Three failed lists in one generation count as one failed refresh.
    assert_eq!(state.refresh_failures, 1);
    assert!(state.refresh_delay() > state.refresh_interval);

    fake.set_failing(&[]);
    let ticket = state.refresh().unwrap();
    loader::spawn_project_load(&source, &ticket, &tx);
    apply_n(&mut state, &mut rx, 3).await;
    assert_eq!(state.refresh_failures, 0);
}

#[tokio::test]
async fn refresh_reports_finished_builds() {
    let fake = Arc::new(FakeSource::from_fixtures());
    let source: Arc<dyn PipelineSource> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let ticket = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &ticket, &tx);
    let effects = apply_n(&mut state, &mut rx, 3).await;
    assert!(effects
        .iter()
        .all(|e| matches!(e, LoadEffect::Replaced { finished } if finished.is_empty())));

    fake.finish_build(102, BuildResult::Failed);
    let ticket = state.refresh().unwrap();
    loader::spawn_project_load(&source, &ticket, &tx);
    let effects = apply_n(&mut state, &mut rx, 3).await;

    let finished: Vec<u64> = effects
        .iter()
        .flat_map(|e| match e {
            LoadEffect::Replaced { finished } => finished.iter().map(|b| b.id).collect(),
            _ => Vec::new(),
        })
        .collect();
    assert_eq!(finished, vec![102]);
    assert_eq!(state.notifications.len(), 1);
    assert!(state.notifications[0].message.contains("finished: Fail"));
}

#[tokio::test]
async fn project_list_reload() {
    let fake = Arc::new(FakeSource::from_fixtures());
    let source: Arc<dyn PipelineSource> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = AppState::new(ORG_URL.to_string(), 50);

    state.begin_projects_load();
    loader::load_projects(Arc::clone(&source), tx.clone()).await;
    match next_event(&mut rx).await {
        AppEvent::ProjectsLoaded(result) => state.apply_projects(result),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(state.projects.items.len(), 2);

    fake.set_failing(&["projects"]);
    state.begin_projects_load();
    loader::load_projects(Arc::clone(&source), tx.clone()).await;
    match next_event(&mut rx).await {
        AppEvent::ProjectsLoaded(result) => state.apply_projects(result),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(state.projects.items.len(), 2);
    assert!(matches!(state.projects.status, SlotStatus::Failed(_)));
    assert!(state
        .error_message()
        .is_some_and(|m| m.starts_with("Failed to load projects")));
}

// ========== Input flow ==========

#[tokio::test]
async fn input_to_state_action_flow() {
    let source: Arc<dyn PipelineSource> = Arc::new(FakeSource::from_fixtures());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let ticket = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &ticket, &tx);
    apply_n(&mut state, &mut rx, 3).await;

    let ctx = InputContext::default();
    assert_eq!(input::map_key(press(KeyCode::Tab), &ctx), Action::NextTab);
    state.next_tab();
    assert_eq!(state.tab, Tab::Runs);

    assert_eq!(input::map_key(press(KeyCode::Char('j')), &ctx), Action::MoveDown);
    state.move_cursor_down();
    state.move_cursor_down();
    state.move_cursor_down();
    assert_eq!(state.cursor, 2);
    assert_eq!(
        state.current_row_url().as_deref(),
        Some("https://dev.azure.com/contoso/Fabrikam/_build/results?buildId=101")
    );

    state.begin_filter();
    for c in "grace".chars() {
        state.filter_push(c);
    }
    state.commit_filter();
    assert_eq!(state.visible_builds().len(), 1);
    assert_eq!(state.cursor, 0);
}

// ========== TUI snapshot tests ==========

#[tokio::test]
async fn tui_summary_lists_pipelines() {
    let source: Arc<dyn PipelineSource> = Arc::new(FakeSource::from_fixtures());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = make_state();

    let ticket = state.select_project("Fabrikam");
    loader::spawn_project_load(&source, &ticket, &tx);
    apply_n(&mut state, &mut rx, 3).await;

    let text = screen_text(&state, 120, 30);
    assert!(text.contains("Fabrikam"), "header should name the project, got: {text}");
    assert!(text.contains("All pipelines"), "got: {text}");
    assert!(text.contains("Nightly"), "got: {text}");
    assert!(text.contains("Docs"), "got: {text}");
}

#[test]
fn tui_zero_data_for_project_without_pipelines() {
    let mut state = make_state();
    let ticket = state.select_project("Tailspin");
    state.apply_load(
        ticket.generation,
        adw::app::LoadPayload::Definitions(Ok(Vec::new())),
    );
    assert!(state.shows_zero_data());

    let text = screen_text(&state, 120, 30);
    assert!(text.contains("Create your first Pipeline"), "got: {text}");
    assert!(text.contains("https://dev.azure.com/contoso/Tailspin"), "got: {text}");
}

#[test]
fn tui_without_project_prompts_for_one() {
    let state = make_state();
    let text = screen_text(&state, 100, 24);
    assert!(text.contains("No project selected"), "got: {text}");
    assert!(text.contains("Team Project"), "got: {text}");
}

// ========== Live service tests (ignored by default) ==========

#[tokio::test]
#[ignore]
async fn live_list_projects() {
    let org = std::env::var("AZURE_DEVOPS_ORG_URL").expect("AZURE_DEVOPS_ORG_URL must be set");
    let pat = std::env::var("AZURE_DEVOPS_EXT_PAT").ok();
    let client = adw::ado::client::AdoClient::new(
        adw::ado::links::parse_org_url(&org).unwrap(),
        None,
        5,
        pat,
    )
    .unwrap();
    let projects = client.list_projects().await.expect("should list projects");
    assert!(!projects.is_empty());
}

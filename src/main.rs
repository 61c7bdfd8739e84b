use adw::ado::{client, links, loader};
use adw::app::{AppState, LoadEffect};
use adw::cli::{self, Cli};
use adw::events::{AppEvent, EventHandler};
use adw::input::{self, Action, InputContext, OverlayMode};
use adw::notify;
use adw::traits::PipelineSource;
use adw::tui;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

fn setup_verbose_logging() -> Result<()> {
    let state_dir = state_dir();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| eyre!("Failed to create log directory {state_dir:?}: {e}"))?;
    let log_path = state_dir.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eyre!("Failed to open log file {log_path:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!("adw v{} starting with verbose logging", cli::VERSION);
    Ok(())
}

fn state_dir() -> std::path::PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
        std::path::PathBuf::from(state).join("adw")
    } else if let Some(home) = std::env::var_os("HOME") {
        std::path::PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("adw")
    } else {
        std::path::PathBuf::from("/tmp/adw")
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle(""))?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.verbose {
        setup_verbose_logging()?;
    }

    // Configuration errors are reported before the terminal switches screens.
    let org = links::parse_org_url(&args.org)?;
    let release = args
        .release_url
        .as_deref()
        .map(links::parse_org_url)
        .transpose()?;
    let top = usize::try_from(args.top).unwrap_or(usize::MAX);
    let source: Arc<dyn PipelineSource> =
        Arc::new(client::AdoClient::new(org, release, top, args.pat.clone())?);
    let org_url = args.org.trim().trim_end_matches('/').to_string();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Failed to disable raw mode during panic: {e}");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, SetTitle("")) {
            eprintln!("Failed to leave alternate screen during panic: {e}");
        }
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let startup = match tui::startup::run_startup(
        &mut terminal,
        source.as_ref(),
        &org_url,
        args.project.as_deref(),
        Some(cli::validate_project_name),
    )
    .await
    {
        Ok(result) => result,
        Err(e) => {
            restore_terminal(&mut terminal)?;
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut state = AppState::new(org_url, top);
    state.config.version_string = format!("adw v{}", cli::VERSION);
    state.refresh_interval = args.interval;
    state.desktop_notify = !args.no_notify;
    state.projects.replace(startup.projects);

    let events = EventHandler::new(Duration::from_millis(100));
    let tx = events.sender();

    if let Some(project) = startup.project {
        let ticket = state.select_project(&project);
        loader::spawn_project_load(&source, &ticket, &tx);
        execute!(io::stdout(), SetTitle(format!("adw: {project}")))?;
    } else {
        state.open_picker();
    }

    let result = run_app(&mut terminal, &mut state, events, &tx, &source).await;

    restore_terminal(&mut terminal)?;
    result
}

fn input_context(state: &AppState) -> InputContext {
    InputContext {
        has_error: state.error.is_some(),
        is_loading: state.is_loading(),
        overlay: if state.has_picker() {
            OverlayMode::Picker
        } else if state.has_detail_overlay() {
            OverlayMode::Detail
        } else {
            OverlayMode::None
        },
        editing_filter: state.filter.editing,
        has_filter: !state.filter.text.is_empty(),
        zero_data: state.shows_zero_data(),
    }
}

fn open_url(state: &mut AppState, url: &str) {
    if let Err(e) = client::open_in_browser(url) {
        state.set_error(format!("{e}"));
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    mut events: EventHandler,
    tx: &UnboundedSender<AppEvent>,
    source: &Arc<dyn PipelineSource>,
) -> Result<()> {
    loop {
        terminal.draw(|f| tui::render::render(f, state))?;

        state.prune_notifications();
        state.prune_error();

        let Some(event) = events.next().await else {
            tracing::warn!("event channel closed");
            return Ok(());
        };

        match event {
            AppEvent::Key(key) => match input::map_key(key, &input_context(state)) {
                Action::Quit => state.should_quit = true,
                Action::DismissError => state.clear_error(),
                Action::MoveUp => state.move_cursor_up(),
                Action::MoveDown => state.move_cursor_down(),
                Action::NextTab => state.next_tab(),
                Action::PrevTab => state.prev_tab(),
                Action::OpenPicker => state.open_picker(),
                Action::PickerUp => state.picker_up(),
                Action::PickerDown => state.picker_down(),
                Action::PickerInput(c) => state.picker_push(c),
                Action::PickerBackspace => state.picker_pop(),
                Action::PickerSelect => {
                    if let Some(name) = state.picker_take_selection() {
                        let ticket = state.select_project(&name);
                        loader::spawn_project_load(source, &ticket, tx);
                        execute!(io::stdout(), SetTitle(format!("adw: {name}")))?;
                    }
                }
                Action::CloseOverlay => state.close_overlay(),
                Action::BeginFilter => state.begin_filter(),
                Action::FilterInput(c) => state.filter_push(c),
                Action::FilterBackspace => state.filter_pop(),
                Action::CommitFilter => state.commit_filter(),
                Action::ClearFilter => state.clear_filter(),
                Action::Refresh => {
                    if let Some(ticket) = state.refresh() {
                        loader::spawn_project_load(source, &ticket, tx);
                    }
                }
                Action::ReloadProjects => {
                    state.begin_projects_load();
                    spawn_project_list(source, tx);
                }
                Action::OpenBrowser => match state.current_row_url() {
                    Some(url) => open_url(state, &url),
                    None => state.set_error("No web link for this row".to_string()),
                },
                Action::CreatePipeline => {
                    let url = state.current_project_url();
                    open_url(state, &url);
                }
                Action::EditPipeline => match state.current_edit_url() {
                    Some(url) => open_url(state, &url),
                    None => state.set_error("Select a pipeline on the Summary tab to edit it".to_string()),
                },
                Action::ViewReleases => match state.releases_url() {
                    Some(url) => open_url(state, &url),
                    None => state.set_error("No project selected".to_string()),
                },
                Action::ShowDetails => state.open_current_details(),
                Action::None => {}
            },
            AppEvent::Tick => {
                state.advance_spinner();
                if state.tick_refresh() {
                    if let Some(ticket) = state.refresh() {
                        loader::spawn_project_load(source, &ticket, tx);
                    }
                }
            }
            AppEvent::ProjectsLoaded(result) => state.apply_projects(result),
            AppEvent::Loaded { generation, payload } => {
                if let LoadEffect::Replaced { finished } = state.apply_load(generation, payload) {
                    if state.desktop_notify {
                        for build in &finished {
                            notify::send_desktop(build);
                        }
                    }
                }
            }
            AppEvent::Error(e) => {
                tracing::warn!("{e}");
                state.set_error(e);
            }
        }

        if state.should_quit {
            tracing::info!(generation = state.generation, "quitting");
            events.stop();
            return Ok(());
        }
    }
}

fn spawn_project_list(source: &Arc<dyn PipelineSource>, tx: &UnboundedSender<AppEvent>) {
    let (src, out) = (Arc::clone(source), tx.clone());
    loader::spawn_monitored(tx.clone(), "project list", loader::load_projects(src, out));
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissError,
    MoveUp,
    MoveDown,
    NextTab,
    PrevTab,
    OpenPicker,
    PickerUp,
    PickerDown,
    PickerSelect,
    PickerInput(char),
    PickerBackspace,
    CloseOverlay,
    BeginFilter,
    FilterInput(char),
    FilterBackspace,
    CommitFilter,
    ClearFilter,
    Refresh,
    ReloadProjects,
    OpenBrowser,
    CreatePipeline,
    EditPipeline,
    ViewReleases,
    ShowDetails,
    None,
}

/// Which overlay (if any) is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayMode {
    #[default]
    None,
    Picker,
    Detail,
}

/// Captures the UI state needed to interpret a key press.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub has_error: bool,
    pub is_loading: bool,
    pub overlay: OverlayMode,
    pub editing_filter: bool,
    pub has_filter: bool,
    /// The "create your first pipeline" placeholder is on screen.
    pub zero_data: bool,
}

pub fn map_key(key: KeyEvent, ctx: &InputContext) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match ctx.overlay {
        OverlayMode::Picker => {
            return match key.code {
                KeyCode::Esc => Action::CloseOverlay,
                KeyCode::Enter => Action::PickerSelect,
                KeyCode::Up => Action::PickerUp,
                KeyCode::Down => Action::PickerDown,
                KeyCode::Backspace => Action::PickerBackspace,
                KeyCode::Char(c) => Action::PickerInput(c),
                _ => Action::None,
            };
        }
        OverlayMode::Detail => {
            return match key.code {
                KeyCode::Char('q' | 'd') | KeyCode::Esc => Action::CloseOverlay,
                _ => Action::None,
            };
        }
        OverlayMode::None => {}
    }

    if ctx.editing_filter {
        return match key.code {
            KeyCode::Enter => Action::CommitFilter,
            KeyCode::Esc => Action::ClearFilter,
            KeyCode::Backspace => Action::FilterBackspace,
            KeyCode::Char(c) => Action::FilterInput(c),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => {
            if ctx.has_error {
                Action::DismissError
            } else if ctx.has_filter {
                Action::ClearFilter
            } else {
                Action::Quit
            }
        }
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('p') => Action::OpenPicker,
        KeyCode::Char('P') if !ctx.is_loading => Action::ReloadProjects,
        KeyCode::Char('/') => Action::BeginFilter,
        KeyCode::Char('r') if !ctx.is_loading => Action::Refresh,
        KeyCode::Char('o') | KeyCode::Enter if ctx.zero_data => Action::CreatePipeline,
        KeyCode::Char('o') => Action::OpenBrowser,
        KeyCode::Char('e') => Action::EditPipeline,
        KeyCode::Char('v') => Action::ViewReleases,
        KeyCode::Char('d') | KeyCode::Enter => Action::ShowDetails,
        _ => Action::None,
    }
}

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Instant;

use crate::ado::{links, loader};
use crate::diff;

// Refresh intervals (seconds)
pub const DEFAULT_REFRESH_SECS: u64 = 30;

// UI constants
pub const NOTIFICATION_TTL_SECS: u64 = 5;
pub const SPINNER_FRAME_COUNT: usize = 10;
pub const NARROW_WIDTH_THRESHOLD: u16 = 80;
pub const ERROR_TTL_SECS: u64 = 10;
pub const PICKER_MAX_ROWS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildResult {
    #[default]
    None,
    Succeeded,
    PartiallySucceeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildStatus {
    #[default]
    None,
    InProgress,
    Completed,
    Cancelling,
    Postponed,
    NotStarted,
    All,
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    pub fn is_active(self) -> bool {
        matches!(
            self,
            BuildStatus::InProgress
                | BuildStatus::NotStarted
                | BuildStatus::Postponed
                | BuildStatus::Cancelling
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeploymentStatus {
    #[default]
    Undefined,
    NotDeployed,
    InProgress,
    Succeeded,
    PartiallySucceeded,
    Failed,
    All,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Links {
    #[serde(default)]
    pub web: Option<Link>,
}

/// A team project (`TeamProjectReference` on the wire).
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub unique_name: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRef {
    pub id: u64,
    pub name: String,
}

/// One pipeline execution.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: u64,
    #[serde(default)]
    pub project: Option<Project>,
    pub definition: DefinitionRef,
    #[serde(default)]
    pub build_number: String,
    #[serde(default)]
    pub requested_for: Option<IdentityRef>,
    // Absent on the wire until the build finishes.
    #[serde(default)]
    pub result: BuildResult,
    #[serde(default)]
    pub status: BuildStatus,
    #[serde(default)]
    pub queue_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finish_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_branch: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl Build {
    pub fn requester(&self) -> &str {
        self.requested_for
            .as_ref()
            .map_or("", |r| r.display_name.as_str())
    }

    pub fn web_url(&self) -> Option<&str> {
        self.links.web.as_ref().map(|l| l.href.as_str())
    }

    /// Branch name without the `refs/heads/` prefix.
    pub fn short_branch(&self) -> Option<&str> {
        self.source_branch
            .as_deref()
            .map(|b| b.strip_prefix("refs/heads/").unwrap_or(b))
    }

    pub fn is_finished(&self) -> bool {
        self.result != BuildResult::None || self.status == BuildStatus::Completed
    }
}

/// A named, reusable pipeline configuration.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinitionReference {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub revision: Option<u64>,
    #[serde(default)]
    pub queue_status: Option<String>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub latest_build: Option<Build>,
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl BuildDefinitionReference {
    pub fn web_url(&self) -> Option<&str> {
        self.links.web.as_ref().map(|l| l.href.as_str())
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRef {
    #[serde(default)]
    pub name: String,
}

/// A release deployment. Counted in the header, not tabulated.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: u64,
    #[serde(default)]
    pub release: Option<ReleaseRef>,
    #[serde(default)]
    pub release_environment: Option<EnvironmentRef>,
    #[serde(default)]
    pub deployment_status: DeploymentStatus,
    #[serde(default)]
    pub started_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Summary,
    Runs,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Summary, Tab::Runs];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Summary => "summary",
            Tab::Runs => "builds",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::Runs => "Runs",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Summary => Tab::Runs,
            Tab::Runs => Tab::Summary,
        }
    }

    pub fn prev(self) -> Self {
        // Two tabs: previous and next coincide.
        self.next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// One fetched list plus where its last fetch stands.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub items: Vec<T>,
    pub status: SlotStatus,
    /// `items` came from a successful fetch and has not been cleared since.
    pub loaded: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: SlotStatus::Idle,
            loaded: false,
        }
    }
}

impl<T> Slot<T> {
    /// Marks a fetch as started. `clear` drops the previous items.
    pub fn begin(&mut self, clear: bool) {
        if clear {
            self.items = Vec::new();
            self.loaded = false;
        }
        self.status = SlotStatus::Loading;
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = SlotStatus::Ready;
        self.loaded = true;
    }

    /// Records a failure. Items from an earlier successful fetch stay.
    pub fn fail(&mut self, msg: String) {
        self.status = SlotStatus::Failed(msg);
    }

    pub fn is_loading(&self) -> bool {
        self.status == SlotStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SlotStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Identifies one selection or refresh of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub project: String,
}

#[derive(Debug)]
pub enum LoadPayload {
    Definitions(Result<Vec<BuildDefinitionReference>, String>),
    Builds(Result<Vec<Build>, String>),
    Deployments(Result<Vec<Deployment>, String>),
}

impl LoadPayload {
    pub fn label(&self) -> &'static str {
        match self {
            LoadPayload::Definitions(_) => "definitions",
            LoadPayload::Builds(_) => "builds",
            LoadPayload::Deployments(_) => "deployments",
        }
    }
}

/// What applying a fetch result did to the state.
#[derive(Debug)]
pub enum LoadEffect {
    /// The result belonged to an older generation and was dropped.
    Stale,
    /// The list was replaced. `finished` holds builds that completed since the last refresh.
    Replaced { finished: Vec<Build> },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub build_id: u64,
    pub message: String,
    pub timestamp: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    pub text: String,
    pub editing: bool,
}

impl KeywordFilter {
    pub fn matches(&self, fields: &[&str]) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        fields.iter().any(|f| f.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPicker {
    pub query: String,
    pub cursor: usize,
}

pub struct DetailOverlay {
    pub title: String,
    pub lines: Vec<(String, String)>,
}

pub enum ActiveOverlay {
    None,
    Picker(ProjectPicker),
    Detail(DetailOverlay),
}

/// Immutable configuration set at startup.
pub struct AppConfig {
    pub org_url: String,
    pub top: usize,
    pub version_string: String,
}

pub struct AppState {
    pub config: AppConfig,
    pub tab: Tab,

    // Data
    pub projects: Slot<Project>,
    pub selected_project: Option<String>,
    pub generation: u64,
    pub definitions: Slot<BuildDefinitionReference>,
    pub builds: Slot<Build>,
    pub deployments: Slot<Deployment>,
    pub previous_snapshot: HashMap<u64, (BuildStatus, BuildResult)>,

    // Navigation
    pub cursor: usize,
    pub filter: KeywordFilter,
    pub overlay: ActiveOverlay,

    // Refresh
    pub refresh_interval: u64,
    pub last_refresh: Option<Instant>,
    pub next_refresh_in: u64,
    pub refresh_failures: u32,
    failed_generation: Option<u64>,

    // Transient UI
    pub notifications: Vec<Notification>,
    pub error: Option<(String, Instant)>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub desktop_notify: bool,
}

impl AppState {
    pub fn new(org_url: String, top: usize) -> Self {
        Self {
            config: AppConfig {
                org_url,
                top,
                version_string: String::new(),
            },
            tab: Tab::Summary,
            projects: Slot::default(),
            selected_project: None,
            generation: 0,
            definitions: Slot::default(),
            builds: Slot::default(),
            deployments: Slot::default(),
            previous_snapshot: HashMap::new(),
            cursor: 0,
            filter: KeywordFilter::default(),
            overlay: ActiveOverlay::None,
            refresh_interval: DEFAULT_REFRESH_SECS,
            last_refresh: None,
            next_refresh_in: 0,
            refresh_failures: 0,
            failed_generation: None,
            notifications: Vec::new(),
            error: None,
            spinner_frame: 0,
            should_quit: false,
            desktop_notify: true,
        }
    }

    // --- Loading ---

    /// Switches to `name` and starts a new generation. Lists of the previous project are dropped.
    pub fn select_project(&mut self, name: &str) -> LoadTicket {
        self.generation += 1;
        self.selected_project = Some(name.to_string());
        self.definitions.begin(true);
        self.builds.begin(true);
        self.deployments.begin(true);
        self.previous_snapshot.clear();
        self.refresh_failures = 0;
        self.failed_generation = None;
        self.cursor = 0;
        self.last_refresh = Some(Instant::now());
        tracing::info!(project = name, generation = self.generation, "project selected");
        LoadTicket {
            generation: self.generation,
            project: name.to_string(),
        }
    }

    /// Starts a new generation for the current project, keeping its lists until results arrive.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        let project = self.selected_project.clone()?;
        self.generation += 1;
        self.definitions.begin(false);
        self.builds.begin(false);
        self.deployments.begin(false);
        self.last_refresh = Some(Instant::now());
        tracing::debug!(project = %project, generation = self.generation, "refresh");
        Some(LoadTicket {
            generation: self.generation,
            project,
        })
    }

    pub fn begin_projects_load(&mut self) {
        self.projects.begin(false);
    }

    /// Applies a project list fetch. A failure keeps the previous list.
    pub fn apply_projects(&mut self, result: Result<Vec<Project>, String>) {
        match result {
            Ok(projects) => {
                if let Some(name) = &self.selected_project {
                    if !projects.iter().any(|p| &p.name == name) {
                        tracing::warn!(project = %name, "selected project no longer listed");
                    }
                }
                self.projects.replace(projects);
            }
            Err(e) => {
                tracing::warn!("project list failed: {e}");
                self.set_error(format!("Failed to load projects: {e}"));
                self.projects.fail(e);
            }
        }
    }

    /// Seconds between automatic refreshes, stretched while fetches keep failing.
    pub fn refresh_delay(&self) -> u64 {
        if self.refresh_failures > 0 {
            loader::backoff_delay(self.refresh_interval, self.refresh_failures)
        } else {
            self.refresh_interval
        }
    }

    /// Updates the countdown. Returns `true` when an automatic refresh is due.
    pub fn tick_refresh(&mut self) -> bool {
        if self.refresh_interval == 0 || self.selected_project.is_none() || self.is_loading() {
            self.next_refresh_in = 0;
            return false;
        }
        let delay = self.refresh_delay();
        let elapsed = self.last_refresh.map_or(delay, |t| t.elapsed().as_secs());
        self.next_refresh_in = delay.saturating_sub(elapsed);
        self.next_refresh_in == 0
    }

    pub fn apply_load(&mut self, generation: u64, payload: LoadPayload) -> LoadEffect {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                list = payload.label(),
                "dropping stale result"
            );
            return LoadEffect::Stale;
        }

        let label = payload.label();
        let effect = match payload {
            LoadPayload::Definitions(Ok(items)) => {
                self.definitions.replace(items);
                LoadEffect::Replaced { finished: Vec::new() }
            }
            LoadPayload::Builds(Ok(items)) => {
                let finished = diff::detect_changes(self, &items);
                self.builds.replace(items);
                LoadEffect::Replaced { finished }
            }
            LoadPayload::Deployments(Ok(items)) => {
                self.deployments.replace(items);
                LoadEffect::Replaced { finished: Vec::new() }
            }
            LoadPayload::Definitions(Err(e)) => {
                self.definitions.fail(e.clone());
                LoadEffect::Failed(e)
            }
            LoadPayload::Builds(Err(e)) => {
                self.builds.fail(e.clone());
                LoadEffect::Failed(e)
            }
            LoadPayload::Deployments(Err(e)) => {
                self.deployments.fail(e.clone());
                LoadEffect::Failed(e)
            }
        };

        if let LoadEffect::Failed(msg) = &effect {
            tracing::warn!(list = label, generation, "fetch failed: {msg}");
            self.set_error(format!("Failed to load {label}: {msg}"));
            if self.failed_generation != Some(generation) {
                self.failed_generation = Some(generation);
                self.refresh_failures = self.refresh_failures.saturating_add(1);
            }
        } else if !self.is_project_loading() && self.failed_generation != Some(generation) {
            self.refresh_failures = 0;
        }

        self.clamp_cursor();
        effect
    }

    /// Any of the three lists of the selected project still in flight.
    fn is_project_loading(&self) -> bool {
        self.definitions.is_loading() || self.builds.is_loading() || self.deployments.is_loading()
    }

    pub fn is_loading(&self) -> bool {
        self.projects.is_loading()
            || self.definitions.is_loading()
            || self.builds.is_loading()
            || self.deployments.is_loading()
    }

    pub fn has_active_builds(&self) -> bool {
        self.builds
            .items
            .iter()
            .any(|b| b.result == BuildResult::None && b.status.is_active())
    }

    // --- Filtering ---

    pub fn visible_definitions(&self) -> Vec<&BuildDefinitionReference> {
        self.definitions
            .items
            .iter()
            .filter(|d| {
                let latest = d.latest_build.as_ref();
                self.filter.matches(&[
                    d.name.as_str(),
                    d.path.as_str(),
                    latest.map_or("", |b| b.build_number.as_str()),
                    latest.map_or("", Build::requester),
                ])
            })
            .collect()
    }

    pub fn visible_builds(&self) -> Vec<&Build> {
        self.builds
            .items
            .iter()
            .filter(|b| {
                self.filter.matches(&[
                    b.definition.name.as_str(),
                    b.build_number.as_str(),
                    b.requester(),
                    b.short_branch().unwrap_or(""),
                ])
            })
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Summary => self.visible_definitions().len(),
            Tab::Runs => self.visible_builds().len(),
        }
    }

    /// The "create your first pipeline" placeholder replaces the Summary table.
    /// Stays up while a refresh of the same project is in flight or has failed.
    pub fn shows_zero_data(&self) -> bool {
        self.tab == Tab::Summary && self.definitions.loaded && self.definitions.items.is_empty()
    }

    pub fn begin_filter(&mut self) {
        self.filter.editing = true;
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter.text.push(c);
        self.cursor = 0;
    }

    pub fn filter_pop(&mut self) {
        self.filter.text.pop();
        self.cursor = 0;
    }

    pub fn commit_filter(&mut self) {
        self.filter.editing = false;
        self.clamp_cursor();
    }

    pub fn clear_filter(&mut self) {
        self.filter = KeywordFilter::default();
        self.clamp_cursor();
    }

    // --- Navigation ---

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.cursor = 0;
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
        self.cursor = 0;
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn current_build(&self) -> Option<&Build> {
        match self.tab {
            Tab::Runs => self.visible_builds().get(self.cursor).copied(),
            Tab::Summary => None,
        }
    }

    pub fn current_definition(&self) -> Option<&BuildDefinitionReference> {
        match self.tab {
            Tab::Summary => self.visible_definitions().get(self.cursor).copied(),
            Tab::Runs => None,
        }
    }

    pub fn current_row_url(&self) -> Option<String> {
        match self.tab {
            Tab::Summary => self
                .current_definition()
                .and_then(BuildDefinitionReference::web_url)
                .map(str::to_string),
            Tab::Runs => self
                .current_build()
                .and_then(Build::web_url)
                .map(str::to_string),
        }
    }

    /// Web URL of the named project, or the organization URL when the project is unknown.
    pub fn project_url(&self, name: &str) -> String {
        let known = self.projects.items.iter().any(|p| p.name == name);
        if known {
            if let Some(url) = links::project_web_url(&self.config.org_url, name) {
                return url;
            }
        }
        tracing::debug!(project = name, "project url unavailable, using organization");
        self.config.org_url.clone()
    }

    pub fn current_project_url(&self) -> String {
        match &self.selected_project {
            Some(name) => self.project_url(name),
            None => self.config.org_url.clone(),
        }
    }

    /// Editor of the definition under the cursor (Summary tab only).
    pub fn current_edit_url(&self) -> Option<String> {
        let project = self.selected_project.as_deref()?;
        let definition = self.current_definition()?;
        links::definition_edit_url(&self.config.org_url, project, definition.id)
    }

    pub fn releases_url(&self) -> Option<String> {
        let project = self.selected_project.as_deref()?;
        links::releases_web_url(&self.config.org_url, project)
    }

    // --- Project picker ---

    pub fn has_picker(&self) -> bool {
        matches!(self.overlay, ActiveOverlay::Picker(_))
    }

    pub fn open_picker(&mut self) {
        self.overlay = ActiveOverlay::Picker(ProjectPicker::default());
    }

    pub fn picker_ref(&self) -> Option<&ProjectPicker> {
        match &self.overlay {
            ActiveOverlay::Picker(p) => Some(p),
            _ => None,
        }
    }

    pub fn picker_matches(&self) -> Vec<&Project> {
        let Some(picker) = self.picker_ref() else {
            return Vec::new();
        };
        let needle = picker.query.to_lowercase();
        self.projects
            .items
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn picker_push(&mut self, c: char) {
        if let ActiveOverlay::Picker(ref mut p) = self.overlay {
            p.query.push(c);
            p.cursor = 0;
        }
    }

    pub fn picker_pop(&mut self) {
        if let ActiveOverlay::Picker(ref mut p) = self.overlay {
            p.query.pop();
            p.cursor = 0;
        }
    }

    pub fn picker_up(&mut self) {
        if let ActiveOverlay::Picker(ref mut p) = self.overlay {
            p.cursor = p.cursor.saturating_sub(1);
        }
    }

    pub fn picker_down(&mut self) {
        let len = self.picker_matches().len();
        if let ActiveOverlay::Picker(ref mut p) = self.overlay {
            if len > 0 && p.cursor < len - 1 {
                p.cursor += 1;
            }
        }
    }

    /// Closes the picker and returns the highlighted project name, if any.
    pub fn picker_take_selection(&mut self) -> Option<String> {
        let cursor = self.picker_ref()?.cursor;
        let name = self.picker_matches().get(cursor).map(|p| p.name.clone());
        self.overlay = ActiveOverlay::None;
        name
    }

    // --- Detail overlay ---

    pub fn has_detail_overlay(&self) -> bool {
        matches!(self.overlay, ActiveOverlay::Detail(_))
    }

    pub fn close_overlay(&mut self) {
        self.overlay = ActiveOverlay::None;
    }

    pub fn open_current_details(&mut self) {
        let detail = match self.tab {
            Tab::Runs => self.current_build().map(build_details),
            Tab::Summary => self.current_definition().map(definition_details),
        };
        if let Some(detail) = detail {
            self.overlay = ActiveOverlay::Detail(detail);
        }
    }

    // --- Transient UI ---

    pub fn prune_notifications(&mut self) {
        let now = Instant::now();
        self.notifications
            .retain(|n| now.duration_since(n.timestamp).as_secs() < NOTIFICATION_TTL_SECS);
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn set_error(&mut self, msg: String) {
        self.error = Some((msg, Instant::now()));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn prune_error(&mut self) {
        if let Some((_, ts)) = &self.error {
            if ts.elapsed().as_secs() >= ERROR_TTL_SECS {
                self.error = None;
            }
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|(msg, _)| msg.as_str())
    }
}

fn format_time(t: Option<DateTime<Utc>>) -> String {
    t.map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

fn build_details(b: &Build) -> DetailOverlay {
    let indicator = crate::indicator::pipeline_indicator(b.result, b.status);
    let lines = vec![
        ("Id".to_string(), b.id.to_string()),
        (
            "Project".to_string(),
            b.project.as_ref().map_or("-".to_string(), |p| p.name.clone()),
        ),
        ("Pipeline".to_string(), b.definition.name.clone()),
        ("Build".to_string(), b.build_number.clone()),
        ("Requested for".to_string(), b.requester().to_string()),
        ("Branch".to_string(), b.short_branch().unwrap_or("-").to_string()),
        ("Indicator".to_string(), indicator.label.to_string()),
        ("Result".to_string(), format!("{:?}", b.result)),
        ("Status".to_string(), format!("{:?}", b.status)),
        ("Queued".to_string(), format_time(b.queue_time)),
        ("Started".to_string(), format_time(b.start_time)),
        ("Finished".to_string(), format_time(b.finish_time)),
        ("URL".to_string(), b.web_url().unwrap_or("-").to_string()),
    ];
    DetailOverlay {
        title: format!("{} {}", b.definition.name, b.build_number),
        lines,
    }
}

fn definition_details(d: &BuildDefinitionReference) -> DetailOverlay {
    let mut lines = vec![
        ("Id".to_string(), d.id.to_string()),
        ("Name".to_string(), d.name.clone()),
        ("Path".to_string(), d.path.clone()),
        (
            "Revision".to_string(),
            d.revision.map_or("-".to_string(), |r| r.to_string()),
        ),
        (
            "Queue".to_string(),
            d.queue_status.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    if let Some(b) = &d.latest_build {
        let indicator = crate::indicator::pipeline_indicator(b.result, b.status);
        lines.push(("Latest build".to_string(), b.build_number.clone()));
        lines.push(("Latest state".to_string(), indicator.label.to_string()));
        lines.push(("Requested for".to_string(), b.requester().to_string()));
    }
    lines.push(("URL".to_string(), d.web_url().unwrap_or("-").to_string()));
    DetailOverlay {
        title: d.name.clone(),
        lines,
    }
}

use clap::Parser;

pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_NUMBER"));

#[derive(Parser, Debug)]
#[command(name = "adw", version = VERSION, about = "Azure DevOps CI/CD Dashboard TUI")]
pub struct Cli {
    /// Organization URL (e.g. https://dev.azure.com/contoso)
    #[arg(long, env = "AZURE_DEVOPS_ORG_URL")]
    pub org: String,

    /// Personal access token (needs Build and Release read scopes)
    #[arg(long, env = "AZURE_DEVOPS_EXT_PAT", hide_env_values = true)]
    pub pat: Option<String>,

    /// Project to select at startup
    #[arg(short, long)]
    pub project: Option<String>,

    /// Maximum number of builds to fetch
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub top: u64,

    /// Auto-refresh interval in seconds (0 disables)
    #[arg(short, long, default_value_t = 30)]
    pub interval: u64,

    /// Release management base URL (derived from --org when omitted)
    #[arg(long)]
    pub release_url: Option<String>,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Enable verbose logging to $XDG_STATE_HOME/adw/debug.log
    #[arg(long)]
    pub verbose: bool,
}

/// Rejects names the REST API would treat as a different path.
pub fn validate_project_name(project: &str) -> Result<(), String> {
    let trimmed = project.trim();
    if trimmed.is_empty() {
        return Err("Project name must not be empty.".to_string());
    }
    if trimmed.contains(['/', '\\']) {
        return Err(format!(
            "Invalid project name '{project}'. Pass the project name only, not a path."
        ));
    }
    Ok(())
}

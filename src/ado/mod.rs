//! Azure DevOps REST access: URL building, response parsing, the HTTP client, and the
//! generation-tagged fetch tasks that feed [`crate::app::AppState`].

pub mod client;
pub mod links;
pub mod loader;
pub mod parser;

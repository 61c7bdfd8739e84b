use crate::app::{Build, BuildDefinitionReference, Deployment, Project};
use color_eyre::eyre::{eyre, Result};
use serde::de::DeserializeOwned;

/// Every list endpoint wraps its items as `{ "count": n, "value": [...] }`.
#[derive(serde::Deserialize)]
struct ListEnvelope<T> {
    #[serde(default)]
    count: Option<usize>,
    value: Vec<T>,
}

pub fn parse_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let envelope: ListEnvelope<T> = serde_json::from_str(json)?;
    if let Some(count) = envelope.count {
        if count != envelope.value.len() {
            tracing::debug!(count, len = envelope.value.len(), "envelope count mismatch");
        }
    }
    Ok(envelope.value)
}

pub fn parse_projects(json: &str) -> Result<Vec<Project>> {
    parse_list(json)
}

pub fn parse_definitions(json: &str) -> Result<Vec<BuildDefinitionReference>> {
    parse_list(json)
}

pub fn parse_builds(json: &str) -> Result<Vec<Build>> {
    parse_list(json)
}

pub fn parse_deployments(json: &str) -> Result<Vec<Deployment>> {
    parse_list(json)
}

/// Pulls the human-readable message out of an error body, if the server sent one.
pub fn parse_error_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

/// Unauthenticated requests get a sign-in page instead of JSON.
pub fn ensure_json(content_type: Option<&str>, body: &str) -> Result<()> {
    let is_html = content_type.is_some_and(|ct| ct.contains("text/html"))
        || body.trim_start().starts_with('<');
    if is_html {
        return Err(eyre!(
            "Received a sign-in page instead of data. Check the personal access token."
        ));
    }
    Ok(())
}

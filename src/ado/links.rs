//! URL construction for the Azure DevOps REST API and web UI.

use color_eyre::eyre::{eyre, Result};
use url::Url;

pub const API_VERSION: &str = "7.1";

const CLOUD_HOST: &str = "dev.azure.com";
const CLOUD_RELEASE_HOST: &str = "vsrm.dev.azure.com";

/// Parses an organization URL, accepting only http(s).
pub fn parse_org_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| eyre!("Invalid organization URL '{raw}': {e}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(eyre!("Unsupported scheme '{other}' in organization URL '{raw}'")),
    }
    if url.host_str().is_none() {
        return Err(eyre!("Organization URL '{raw}' has no host"));
    }
    Ok(url)
}

/// Release management lives on its own host in the cloud service; on-premises servers
/// serve it from the collection URL itself.
pub fn release_base_url(org: &Url) -> Url {
    let mut url = org.clone();
    if url.host_str() == Some(CLOUD_HOST) && url.set_host(Some(CLOUD_RELEASE_HOST)).is_err() {
        tracing::warn!("could not derive release host from {org}");
        return org.clone();
    }
    url
}

/// Appends `segments` (percent-encoded) and the query to `base`, always adding `api-version`.
pub fn api_url(base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| eyre!("URL '{base}' cannot have a path"))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("api-version", API_VERSION);
    }
    Ok(url)
}

/// Browser URL of a project: `{org}/{project}`.
pub fn project_web_url(org_url: &str, project: &str) -> Option<String> {
    let mut url = Url::parse(org_url).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(project);
    Some(url.to_string())
}

/// Pipeline editor for definition `id`.
pub fn definition_edit_url(org_url: &str, project: &str, id: u64) -> Option<String> {
    let mut url = Url::parse(org_url).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend([project, "_build", "designer"]);
    url.query_pairs_mut()
        .append_pair("id", &id.to_string())
        .append_pair("_a", "edit-build-definition");
    Some(url.to_string())
}

/// Release hub of a project.
pub fn releases_web_url(org_url: &str, project: &str) -> Option<String> {
    let mut url = Url::parse(org_url).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend([project, "_release"]);
    Some(url.to_string())
}

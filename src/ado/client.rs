use crate::ado::{links, parser};
use crate::app::{Build, BuildDefinitionReference, Deployment, Project};
use crate::traits::PipelineSource;
use async_trait::async_trait;
use color_eyre::eyre::{eyre, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio::process::Command;
use url::Url;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the token for the next page of a list.
const CONTINUATION_HEADER: &str = "x-ms-continuationtoken";
/// Upper bound on pages followed for one list.
const MAX_PAGES: usize = 50;

pub struct AdoClient {
    http: reqwest::Client,
    org: Url,
    release: Url,
    top: usize,
    pat: Option<String>,
}

impl AdoClient {
    pub fn new(org: Url, release: Option<Url>, top: usize, pat: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("adw/", env!("CARGO_PKG_VERSION")))
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| eyre!("Failed to create HTTP client: {e}"))?;
        let release = release.unwrap_or_else(|| links::release_base_url(&org));
        tracing::debug!(org = %org, release = %release, top, auth = pat.is_some(), "client configured");
        Ok(Self {
            http,
            org,
            release,
            top,
            pat: pat.filter(|p| !p.is_empty()),
        })
    }

    pub fn org_url(&self) -> &Url {
        &self.org
    }

    /// One request, one page. Used where `$top` already bounds the list.
    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let (items, _) = self.get_page(&url, None).await?;
        Ok(items)
    }

    /// Follows continuation tokens until the server stops sending one.
    async fn get_all<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        collect_pages(|token| self.get_page(&url, token)).await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        base: &Url,
        token: Option<String>,
    ) -> Result<(Vec<T>, Option<String>)> {
        let mut url = base.clone();
        if let Some(token) = &token {
            url.query_pairs_mut().append_pair("continuationToken", token);
        }
        tracing::debug!(%url, "GET");
        let mut request = self.http.get(url.clone());
        if let Some(pat) = &self.pat {
            request = request.basic_auth("", Some(pat));
        }
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                eyre!("Request timed out after {}s: {url}", HTTP_TIMEOUT.as_secs())
            } else if e.is_connect() {
                eyre!("Could not connect to {}: {e}", url.host_str().unwrap_or("server"))
            } else {
                eyre!("Request failed: {e}")
            }
        })?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE.as_str());
        let next = header(CONTINUATION_HEADER);
        let body = response
            .text()
            .await
            .map_err(|e| eyre!("Failed to read response body: {e}"))?;

        if let Some(msg) = describe_status(status, &body) {
            tracing::warn!(%url, status = status.as_u16(), "request rejected");
            return Err(eyre!(msg));
        }
        parser::ensure_json(content_type.as_deref(), &body)?;
        let items = parser::parse_list(&body)
            .map_err(|e| eyre!("Unexpected response from {}: {e}", url.path()))?;
        Ok((items, next))
    }
}

/// Concatenates pages from `fetch_page`, passing each page's continuation token to the next call.
/// Stops on a missing or empty token, a repeated token, or after `MAX_PAGES`.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>)>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    for page in 1..=MAX_PAGES {
        let (batch, next) = fetch_page(token.clone()).await?;
        items.extend(batch);
        match next.filter(|t| !t.is_empty()) {
            Some(next) if token.as_deref() != Some(next.as_str()) => {
                tracing::debug!(page, count = items.len(), "following continuation token");
                token = Some(next);
            }
            _ => return Ok(items),
        }
    }
    tracing::warn!(pages = MAX_PAGES, count = items.len(), "stopped following continuation tokens");
    Ok(items)
}

/// Turns a non-success response into an actionable message. `None` means the body is usable.
pub fn describe_status(status: StatusCode, body: &str) -> Option<String> {
    // 203 is what the service answers with a sign-in page when credentials are missing.
    if status == StatusCode::NON_AUTHORITATIVE_INFORMATION {
        return Some(
            "Not authenticated. Set AZURE_DEVOPS_EXT_PAT or pass --pat.".to_string(),
        );
    }
    if status.is_success() {
        return None;
    }
    let detail = parser::parse_error_message(body);
    let msg = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            format!("Access denied (HTTP {}). Check the personal access token and its scopes.", status.as_u16())
        }
        StatusCode::NOT_FOUND => {
            "Not found (HTTP 404). Check the organization URL and project name.".to_string()
        }
        _ => format!("HTTP {}", status.as_u16()),
    };
    Some(match detail {
        Some(d) => format!("{msg}: {d}"),
        None => msg,
    })
}

#[async_trait]
impl PipelineSource for AdoClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = links::api_url(&self.org, &["_apis", "projects"], &[])?;
        self.get_all(url).await
    }

    async fn list_build_definitions(&self, project: &str) -> Result<Vec<BuildDefinitionReference>> {
        let url = links::api_url(
            &self.org,
            &[project, "_apis", "build", "definitions"],
            &[("includeLatestBuilds", "true")],
        )?;
        self.get_all(url).await
    }

    async fn list_builds(&self, project: &str) -> Result<Vec<Build>> {
        let top = self.top.to_string();
        let url = links::api_url(
            &self.org,
            &[project, "_apis", "build", "builds"],
            &[("$top", top.as_str()), ("queryOrder", "queueTimeDescending")],
        )?;
        self.get_list(url).await
    }

    async fn list_deployments(&self, project: &str) -> Result<Vec<Deployment>> {
        let url = links::api_url(
            &self.release,
            &[project, "_apis", "release", "deployments"],
            &[],
        )?;
        self.get_list(url).await
    }
}

pub fn open_in_browser(url: &str) -> Result<()> {
    let (cmd, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", "", url])
    } else {
        ("xdg-open", vec![url])
    };
    Command::new(cmd)
        .args(&args)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| eyre!("Failed to open browser: {e}"))?;
    tracing::info!(url, "opened in browser");
    Ok(())
}

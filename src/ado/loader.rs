//! Background fetches for the selected project.
//!
//! Each selection or refresh hands out a [`LoadTicket`]; the three lists of that ticket are
//! fetched by independent tasks, and every completion is sent back tagged with the ticket's
//! generation. Nothing here touches [`crate::app::AppState`]: the event loop applies results,
//! and results from a superseded generation are dropped there.
//!
//! Consecutive failed refreshes push the next automatic refresh out exponentially
//! (`interval × 2^failures`) up to `MAX_BACKOFF_SECS`.

use crate::app::{LoadPayload, LoadTicket};
use crate::events::AppEvent;
use crate::traits::PipelineSource;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Upper bound between automatic refreshes while the service keeps failing.
pub const MAX_BACKOFF_SECS: u64 = 300;

/// `min(base_interval * 2^failures, MAX_BACKOFF_SECS)`, never below one second.
pub fn backoff_delay(base_interval: u64, failures: u32) -> u64 {
    let multiplier = 1u64.checked_shl(failures).unwrap_or(u64::MAX);
    base_interval
        .saturating_mul(multiplier)
        .clamp(1, MAX_BACKOFF_SECS)
}

/// Runs `fut` on its own task and reports a panic as an [`AppEvent::Error`].
pub fn spawn_monitored(
    tx: mpsc::UnboundedSender<AppEvent>,
    label: &'static str,
    fut: impl Future<Output = ()> + Send + 'static,
) {
    tokio::spawn(async move {
        let handle = tokio::spawn(fut);
        if let Err(join_err) = handle.await {
            let msg = if join_err.is_panic() {
                match join_err.into_panic().downcast::<String>() {
                    Ok(s) => *s,
                    Err(payload) => match payload.downcast::<&str>() {
                        Ok(s) => s.to_string(),
                        Err(_) => "unknown panic".to_string(),
                    },
                }
            } else {
                "task cancelled".to_string()
            };
            tracing::error!("{label} panicked: {msg}");
            if tx
                .send(AppEvent::Error(format!("{label} crashed: {msg}")))
                .is_err()
            {
                tracing::warn!("{label}: channel closed while reporting panic");
            }
        }
    });
}

pub async fn load_projects(source: Arc<dyn PipelineSource>, tx: mpsc::UnboundedSender<AppEvent>) {
    let result = source.list_projects().await.map_err(|e| format!("{e}"));
    if let Ok(projects) = &result {
        tracing::info!(count = projects.len(), "projects loaded");
    }
    if tx.send(AppEvent::ProjectsLoaded(result)).is_err() {
        tracing::warn!("load_projects: channel closed");
    }
}

/// Starts the definitions, builds and deployments fetches for `ticket`.
pub fn spawn_project_load(
    source: &Arc<dyn PipelineSource>,
    ticket: &LoadTicket,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let generation = ticket.generation;

    let (src, project, out) = (Arc::clone(source), ticket.project.clone(), tx.clone());
    spawn_monitored(tx.clone(), "definitions fetch", async move {
        let result = src
            .list_build_definitions(&project)
            .await
            .map_err(|e| format!("{e}"));
        send_loaded(&out, generation, LoadPayload::Definitions(result));
    });

    let (src, project, out) = (Arc::clone(source), ticket.project.clone(), tx.clone());
    spawn_monitored(tx.clone(), "builds fetch", async move {
        let result = src.list_builds(&project).await.map_err(|e| format!("{e}"));
        send_loaded(&out, generation, LoadPayload::Builds(result));
    });

    let (src, project, out) = (Arc::clone(source), ticket.project.clone(), tx.clone());
    spawn_monitored(tx.clone(), "deployments fetch", async move {
        let result = src
            .list_deployments(&project)
            .await
            .map_err(|e| format!("{e}"));
        send_loaded(&out, generation, LoadPayload::Deployments(result));
    });
}

fn send_loaded(tx: &mpsc::UnboundedSender<AppEvent>, generation: u64, payload: LoadPayload) {
    let label = payload.label();
    if tx.send(AppEvent::Loaded { generation, payload }).is_err() {
        tracing::warn!(list = label, generation, "fetch finished after channel closed");
    }
}

use crate::app::{AppState, Build, BuildResult, Notification};
use crate::indicator::pipeline_indicator;

/// Compares a fresh builds list with the last one seen for the same project.
///
/// Pushes a notification for every build that went from unfinished to finished and
/// returns those builds. The first list after a project selection only seeds the snapshot.
pub fn detect_changes(state: &mut AppState, new_builds: &[Build]) -> Vec<Build> {
    let now = std::time::Instant::now();
    let mut finished = Vec::new();

    if !state.previous_snapshot.is_empty() {
        for build in new_builds {
            let Some(&(old_status, old_result)) = state.previous_snapshot.get(&build.id) else {
                continue;
            };
            let was_finished =
                old_result != BuildResult::None || old_status == crate::app::BuildStatus::Completed;
            if !was_finished && build.is_finished() {
                let indicator = pipeline_indicator(build.result, build.status);
                let message = format!(
                    "{} {} finished: {}",
                    build.definition.name, build.build_number, indicator.label
                );
                state.notifications.push(Notification {
                    build_id: build.id,
                    message,
                    timestamp: now,
                });
                finished.push(build.clone());
            }
        }
    }

    state.previous_snapshot = new_builds
        .iter()
        .map(|b| (b.id, (b.status, b.result)))
        .collect();

    finished
}

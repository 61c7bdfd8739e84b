use crate::app::Build;

#[cfg(feature = "desktop-notify")]
pub fn send_desktop(build: &Build) {
    use crate::app::BuildResult;
    use notify_rust::{Notification, Urgency};

    let (summary, icon, urgency) = match build.result {
        BuildResult::Succeeded => ("Build Succeeded", "dialog-information", Urgency::Normal),
        BuildResult::Failed => ("Build Failed", "dialog-error", Urgency::Critical),
        BuildResult::PartiallySucceeded => ("Build Partially Succeeded", "dialog-warning", Urgency::Normal),
        BuildResult::Canceled => ("Build Canceled", "dialog-information", Urgency::Low),
        BuildResult::None | BuildResult::Unknown => ("Build Finished", "dialog-information", Urgency::Normal),
    };

    let body = format!("{} {}", build.definition.name, build.build_number);

    if let Err(e) = Notification::new()
        .summary(summary)
        .body(&body)
        .icon(icon)
        .urgency(urgency)
        .show()
    {
        tracing::warn!("desktop notification failed: {e}");
    }
}

#[cfg(not(feature = "desktop-notify"))]
pub fn send_desktop(build: &Build) {
    tracing::debug!(build = build.id, "desktop notifications disabled at build time");
}

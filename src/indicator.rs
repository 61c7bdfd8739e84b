//! Maps a build's (result, status) pair to the indicator shown next to it.
//!
//! `result` wins whenever it is set; `status` only decides while the result is
//! still `None`. Anything unrecognized falls through to the `Skipped`/"NA" default.

use crate::app::{BuildResult, BuildStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    Success,
    Failed,
    Warning,
    Canceled,
    Running,
    Queued,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub style: IndicatorStyle,
    pub label: &'static str,
    /// Screen-reader text; differs from `label` only for "Not Started".
    pub aria_label: &'static str,
}

impl Indicator {
    const fn new(style: IndicatorStyle, label: &'static str) -> Self {
        Self {
            style,
            label,
            aria_label: label,
        }
    }
}

pub const DEFAULT_INDICATOR: Indicator = Indicator {
    style: IndicatorStyle::Skipped,
    label: "NA",
    aria_label: "None",
};

pub fn pipeline_indicator(result: BuildResult, status: BuildStatus) -> Indicator {
    match result {
        BuildResult::Canceled => Indicator::new(IndicatorStyle::Canceled, "Canceled"),
        BuildResult::Succeeded => Indicator::new(IndicatorStyle::Success, "Success"),
        BuildResult::Failed => Indicator::new(IndicatorStyle::Failed, "Fail"),
        BuildResult::PartiallySucceeded => {
            Indicator::new(IndicatorStyle::Warning, "PartiallySucceeded")
        }
        BuildResult::None => match status {
            BuildStatus::Cancelling => Indicator::new(IndicatorStyle::Canceled, "Cancelling"),
            BuildStatus::Completed => Indicator::new(IndicatorStyle::Success, "Completed"),
            BuildStatus::NotStarted => Indicator {
                style: IndicatorStyle::Queued,
                label: "NotStarted",
                aria_label: "Not Started",
            },
            BuildStatus::InProgress => Indicator::new(IndicatorStyle::Running, "InProgress"),
            BuildStatus::Postponed => Indicator::new(IndicatorStyle::Queued, "Postponed"),
            BuildStatus::None | BuildStatus::All | BuildStatus::Unknown => DEFAULT_INDICATOR,
        },
        BuildResult::Unknown => DEFAULT_INDICATOR,
    }
}

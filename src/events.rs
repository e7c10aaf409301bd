//! Event log derived from dashboard reports
//!
//! Each notable condition in a behavior profile or a component assessment
//! becomes one timestamped entry. Entries are listed newest first.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::demo::{Bucket, DemoProfile, DriverType};

/// Minutes between consecutive entries.
pub const EVENT_SPACING_MINUTES: i64 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    pub time: DateTime<Utc>,
    pub severity: Severity,
    pub event: String,
}

/// Build the event log for a behavior profile and the component
/// assessments shown next to it. `components` pairs a label with the
/// assessment text, which may come from the service or from the profile.
pub fn derive_events(
    profile: &DemoProfile,
    components: &[(&str, &str)],
    now: DateTime<Utc>,
) -> Vec<LogEvent> {
    let behavior = &profile.behavior;
    let mut entries: Vec<(Severity, String)> = Vec::new();

    if profile.bucket == Bucket::Poor {
        entries.push((Severity::Critical, "Driver Drowsy Detected".to_string()));
    }
    if behavior.driver_type == DriverType::Aggressive {
        entries.push((Severity::Warning, "Aggressive Driving Detected".to_string()));
    }
    for (_, assessment) in components {
        if let Some(entry) = component_event(assessment) {
            entries.push(entry);
        }
    }
    if behavior.events.speed_violations > 0 {
        entries.push((
            Severity::Info,
            format!("{} Speed Violations Recorded", behavior.events.speed_violations),
        ));
    }
    if entries.is_empty() {
        entries.push((Severity::Info, "All Systems Normal".to_string()));
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (severity, event))| LogEvent {
            time: now - Duration::minutes(EVENT_SPACING_MINUTES * i as i64),
            severity,
            event,
        })
        .collect()
}

/// Map an assessment such as "Brakes Service Soon (2mm)" to its log entry.
fn component_event(assessment: &str) -> Option<(Severity, String)> {
    if assessment.starts_with("Battery Low") {
        Some((Severity::Warning, "Battery Health Low".to_string()))
    } else if assessment.starts_with("Brakes Service Soon") {
        Some((Severity::Warning, "Brake Service Suggested".to_string()))
    } else if assessment.starts_with("Engine High Temp") {
        Some((Severity::Critical, "Engine Temperature High".to_string()))
    } else {
        None
    }
}

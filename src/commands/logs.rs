//! Logs command - list recent driver and vehicle events
//!
//! Usage: vahan logs [--limit N] [--json]

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use serde_json::json;

use crate::api::{MaintenanceRequest, TripFeatures};
use crate::dashboard::{BehaviorReport, DataSource, MaintenanceReport};
use crate::events::derive_events;

use super::prompts::CommandPrompts;
use super::render::{print_event_log, print_source};
use super::CommandContext;

#[derive(Args)]
pub struct LogsArgs {
    /// Show at most this many entries
    #[arg(long)]
    pub limit: Option<usize>,

    /// Custom API URL (default: http://localhost:5000)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Skip the simulated delay in demo mode
    #[arg(long)]
    pub no_delay: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// The source to show for the pair of reports. A fallback on either side wins.
fn combined_source<'a>(behavior: &'a BehaviorReport, maintenance: &'a MaintenanceReport) -> &'a DataSource {
    if maintenance.source.is_fallback() && !behavior.source.is_fallback() {
        &maintenance.source
    } else {
        &behavior.source
    }
}

pub fn run(args: LogsArgs) -> Result<()> {
    let prompts = CommandPrompts::new();
    let ctx = CommandContext::load(args.api_url.as_deref())?;
    let session = ctx.session();
    let dashboard = ctx.dashboard(session.as_ref(), args.no_delay);

    let spinner = prompts.spinner("Collecting events...");
    let behavior = dashboard.analyze_behavior(&TripFeatures::default());
    let maintenance = dashboard.check_maintenance(&MaintenanceRequest::Components(Default::default()));
    spinner.finish_and_clear();

    let mut events = derive_events(&behavior.profile, &maintenance.components(), Utc::now());
    if let Some(limit) = args.limit {
        events.truncate(limit);
    }
    let source = combined_source(&behavior, &maintenance);

    if args.json {
        let output = json!({
            "source": source,
            "events": events,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    print_source(source);
    print_event_log(&events);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::demo::FixedClock;
    use std::time::Duration;

    #[test]
    fn test_fallback_source_wins() {
        let offline = Dashboard::offline(FixedClock(0), Duration::ZERO);
        let behavior = offline.analyze_behavior(&TripFeatures::default());
        let mut maintenance =
            offline.check_maintenance(&MaintenanceRequest::Components(Default::default()));
        assert_eq!(combined_source(&behavior, &maintenance), &DataSource::Demo);

        maintenance.source = DataSource::Fallback {
            reason: "timed out".to_string(),
        };
        assert!(combined_source(&behavior, &maintenance).is_fallback());
    }
}

//! Behavior command - analyze a trip's driving behavior
//!
//! Usage: vahan behavior [--harsh-brakes N] [--harsh-accels N] [--sharp-turns N] [--overspeeding-seconds N]

use anyhow::Result;
use clap::Args;

use crate::api::TripFeatures;

use super::prompts::CommandPrompts;
use super::render::print_behavior_report;
use super::CommandContext;

#[derive(Args)]
pub struct BehaviorArgs {
    /// Number of harsh braking events
    #[arg(long, default_value_t = 0)]
    pub harsh_brakes: u32,

    /// Number of harsh acceleration events
    #[arg(long, default_value_t = 0)]
    pub harsh_accels: u32,

    /// Number of sharp turns
    #[arg(long, default_value_t = 0)]
    pub sharp_turns: u32,

    /// Seconds spent over the speed limit
    #[arg(long, default_value_t = 0)]
    pub overspeeding_seconds: u32,

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

impl BehaviorArgs {
    fn features(&self) -> TripFeatures {
        TripFeatures {
            harsh_brake_count: self.harsh_brakes,
            harsh_accel_count: self.harsh_accels,
            sharp_turn_count: self.sharp_turns,
            overspeeding_seconds: self.overspeeding_seconds,
        }
    }
}

pub fn run(args: BehaviorArgs) -> Result<()> {
    let prompts = CommandPrompts::new();
    let ctx = CommandContext::load(args.api_url.as_deref())?;
    let session = ctx.session();
    let dashboard = ctx.dashboard(session.as_ref(), args.no_delay);

    let spinner = prompts.spinner("Analyzing driving behavior...");
    let report = dashboard.analyze_behavior(&args.features());
    spinner.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_behavior_report(&report);
    Ok(())
}

//! Whoami command - display the current session and dashboard mode
//!
//! Usage: vahan whoami [--json]

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::json;

use crate::dashboard::DashboardMode;

use super::CommandContext;

#[derive(Args)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WhoamiArgs) -> Result<()> {
    let ctx = CommandContext::load(None)?;
    let session = ctx.session();
    let mode = DashboardMode::for_session(session.as_ref());

    if args.json {
        let output = json!({
            "mode": mode,
            "live": mode.is_live(),
            "api_url": ctx.api_url,
            "user": session.as_ref().and_then(|s| s.user.as_ref()),
            "since": session.as_ref().map(|s| s.created_at.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("{}", style("Current Session").cyan().bold());
    println!("{}", style("-".repeat(40)).dim());
    println!();

    let mode_styled = match mode {
        DashboardMode::Authenticated => style(mode.to_string()).green(),
        DashboardMode::Demo => style(mode.to_string()).yellow(),
        DashboardMode::Guest => style(mode.to_string()).dim(),
    };
    println!("  {} {}", style("Mode:").dim(), mode_styled);
    println!("  {} {}", style("API URL:").dim(), ctx.api_url);
    let data = if mode.is_live() {
        "live predictions"
    } else {
        "demo data"
    };
    println!("  {} {}", style("Data:").dim(), data);

    match &session {
        Some(session) => {
            println!("  {} {}", style("User:").dim(), session.display_name());
            if let Some(user) = &session.user {
                println!("  {} {}", style("Email:").dim(), user.email);
                if let Some(vehicle) = &user.vehicle_number {
                    println!("  {} {}", style("Vehicle:").dim(), vehicle);
                }
            }
            println!(
                "  {} {}",
                style("Since:").dim(),
                session.created_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => {
            println!();
            println!("Not logged in. Dashboard actions will show demo data.");
            println!("Run '{}' to connect.", style("vahan login").cyan());
        }
    }

    println!();

    Ok(())
}

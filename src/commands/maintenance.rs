//! Maintenance command - check vehicle component health
//!
//! Usage: vahan maintenance [--battery-voltage V] [--brake-pad-thickness MM] [--engine-temp C]
//!        vahan maintenance --mileage KM --last-service KM --engine-hours H

use anyhow::Result;
use clap::Args;

use crate::api::{MaintenanceRequest, ServiceHistory};
use crate::demo::ComponentReadings;

use super::prompts::CommandPrompts;
use super::render::print_maintenance_report;
use super::CommandContext;

#[derive(Args)]
pub struct MaintenanceArgs {
    /// Battery voltage in volts
    #[arg(long, default_value_t = 12.5)]
    pub battery_voltage: f64,

    /// Brake pad thickness in millimeters
    #[arg(long, default_value_t = 5.0)]
    pub brake_pad_thickness: f64,

    /// Engine temperature in degrees Celsius
    #[arg(long, default_value_t = 90.0)]
    pub engine_temp: f64,

    /// Odometer reading; sends service history instead of component readings
    #[arg(long, requires_all = ["last_service", "engine_hours"])]
    pub mileage: Option<u32>,

    /// Odometer reading at the last service
    #[arg(long, requires = "mileage")]
    pub last_service: Option<u32>,

    /// Total engine hours
    #[arg(long, requires = "mileage")]
    pub engine_hours: Option<u32>,

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

impl MaintenanceArgs {
    fn request(&self) -> MaintenanceRequest {
        match (self.mileage, self.last_service, self.engine_hours) {
            (Some(mileage), Some(last_service), Some(engine_hours)) => {
                MaintenanceRequest::ServiceHistory(ServiceHistory {
                    mileage,
                    last_service,
                    engine_hours,
                })
            }
            _ => MaintenanceRequest::Components(ComponentReadings {
                battery_voltage: self.battery_voltage,
                brake_pad_thickness: self.brake_pad_thickness,
                engine_temp: self.engine_temp,
            }),
        }
    }
}

pub fn run(args: MaintenanceArgs) -> Result<()> {
    let prompts = CommandPrompts::new();
    let ctx = CommandContext::load(args.api_url.as_deref())?;
    let session = ctx.session();
    let dashboard = ctx.dashboard(session.as_ref(), args.no_delay);

    let spinner = prompts.spinner("Checking vehicle health...");
    let report = dashboard.check_maintenance(&args.request());
    spinner.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_maintenance_report(&report);
    Ok(())
}

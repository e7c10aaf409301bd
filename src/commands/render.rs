//! Terminal rendering of dashboard reports

use console::{style, StyledObject};

use crate::api::BehaviorPrediction;
use crate::dashboard::{BehaviorReport, DataSource, MaintenanceReport};
use crate::demo::{Bucket, DemoProfile, DriverType, HealthBreakdown, TimelineSample};
use crate::events::{LogEvent, Severity};

const BAR_WIDTH: usize = 30;

pub fn print_source(source: &DataSource) {
    match source {
        DataSource::Live => println!("{}", style("Live prediction").green()),
        DataSource::Demo => println!("{}", style("Demo mode: showing generated data").dim()),
        DataSource::Fallback { reason } => {
            println!(
                "{}",
                style("Prediction service unavailable: showing demo data").yellow().bold()
            );
            println!("  {}", style(reason).dim());
        }
    }
}

fn bucket_style<D>(bucket: Bucket, value: D) -> StyledObject<D> {
    match bucket {
        Bucket::Excellent => style(value).green().bold(),
        Bucket::Good => style(value).cyan(),
        Bucket::Fair => style(value).yellow(),
        Bucket::Poor => style(value).red().bold(),
    }
}

fn bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn print_behavior(profile: &DemoProfile) {
    let behavior = &profile.behavior;
    let driver = match behavior.driver_type {
        DriverType::Safe => style(behavior.driver_type.to_string()).green(),
        DriverType::Aggressive => style(behavior.driver_type.to_string()).red(),
    };

    println!();
    println!("{}", style("Driver Behavior").cyan().bold());
    println!("{}", style("-".repeat(40)).dim());
    println!("  {} {}", style("Driver type:").dim(), driver);
    println!("  {} {}", style("Confidence:").dim(), behavior.confidence);
    println!("  {} {}/100", style("Risk score:").dim(), behavior.risk_score);
    println!(
        "  {} {}",
        style("Safety rating:").dim(),
        bucket_style(profile.bucket, behavior.safety_rating)
    );
    println!("  {} {}", style("Category:").dim(), behavior.category);
    println!();
    println!("  {}", style("Driving events").bold());
    println!("    Harsh braking:      {}", behavior.events.harsh_brakes);
    println!("    Harsh acceleration: {}", behavior.events.harsh_accels);
    println!("    Sharp turns:        {}", behavior.events.sharp_turns);
    println!("    Speed violations:   {}", behavior.events.speed_violations);
}

pub fn print_timeline(timeline: &[TimelineSample]) {
    println!();
    println!("  {}", style("Confidence history").bold());
    for sample in timeline {
        println!(
            "    {} {} {:>4.0}%",
            style(&sample.label).dim(),
            bar(sample.confidence),
            sample.confidence * 100.0
        );
    }
}

pub fn print_breakdown(breakdown: &HealthBreakdown) {
    println!();
    println!("  {}", style("Health breakdown").bold());
    for (label, percent) in breakdown.slices() {
        println!(
            "    {:<10} {} {:>3}%",
            label,
            bar(f64::from(percent) / 100.0),
            percent
        );
    }
}

fn print_maintenance_header(profile: &DemoProfile, overall_health: u8) {
    let maintenance = &profile.maintenance;
    println!();
    println!("{}", style("Vehicle Maintenance").cyan().bold());
    println!("{}", style("-".repeat(40)).dim());
    println!(
        "  {} {}",
        style("Status:").dim(),
        bucket_style(profile.bucket, maintenance.status.to_string())
    );
    println!("  {} {}%", style("Overall health:").dim(), overall_health);
}

pub fn print_profile(profile: &DemoProfile) {
    print_behavior(profile);
    print_maintenance_header(profile, profile.maintenance.overall_health);
    let maintenance = &profile.maintenance;
    for (label, value) in [
        ("Battery", &maintenance.battery),
        ("Brakes", &maintenance.brakes),
        ("Engine", &maintenance.engine),
    ] {
        println!("  {} {}", style(format!("{}:", label)).dim(), value);
    }
    print_breakdown(&maintenance.health_breakdown);
}

/// Set when the model's verdict and the confidence-keyed driver type disagree.
fn verdict_note(prediction: &BehaviorPrediction, driver_type: DriverType) -> Option<&'static str> {
    let risky = prediction.is_risky()?;
    (risky != (driver_type == DriverType::Aggressive))
        .then_some("Profile below is keyed on confidence, not on the model verdict")
}

pub fn print_behavior_report(report: &BehaviorReport) {
    println!();
    print_source(&report.source);
    if let Some(prediction) = &report.prediction {
        if let Some(label) = &prediction.predicted_behavior_label {
            println!("  {} {}", style("Model verdict:").dim(), label);
        }
        if let Some(note) = verdict_note(prediction, report.profile.behavior.driver_type) {
            println!("  {}", style(note).dim().italic());
        }
        if let Some(vehicle) = &prediction.vehicle_no {
            println!("  {} {}", style("Vehicle:").dim(), vehicle);
        }
    }
    print_behavior(&report.profile);
    print_timeline(&report.timeline);
    println!();
}

pub fn print_maintenance_report(report: &MaintenanceReport) {
    println!();
    print_source(&report.source);
    if let Some(vehicle) = report.live.as_ref().and_then(|l| l.vehicle_no.as_ref()) {
        println!("  {} {}", style("Vehicle:").dim(), vehicle);
    }
    print_maintenance_header(&report.profile, report.overall_health());
    for (label, value) in report.components() {
        println!("  {} {}", style(format!("{}:", label)).dim(), value);
    }
    print_breakdown(&report.profile.maintenance.health_breakdown);
    println!();
}

fn severity_style<D>(severity: Severity, value: D) -> StyledObject<D> {
    match severity {
        Severity::Info => style(value).dim(),
        Severity::Warning => style(value).yellow(),
        Severity::Critical => style(value).red().bold(),
    }
}

pub fn print_event_log(events: &[LogEvent]) {
    println!();
    println!("{}", style("Event Logs").cyan().bold());
    println!("{}", style("-".repeat(40)).dim());
    for (i, entry) in events.iter().enumerate() {
        if i > 0 {
            println!("  {}", style("-".repeat(36)).dim());
        }
        println!(
            "  {} {}",
            severity_style(entry.severity, format!("{:<8}", entry.severity)),
            entry.event
        );
        println!(
            "  {:<8} {}",
            "",
            style(entry.time.format("%Y-%m-%d %H:%M UTC")).dim()
        );
    }
}

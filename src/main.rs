use anyhow::Result;
use clap::{Parser, Subcommand};
use vahan::commands::{
    self, behavior::BehaviorArgs, login::LoginArgs, logs::LogsArgs, maintenance::MaintenanceArgs,
    profile::ProfileArgs, register::RegisterArgs, whoami::WhoamiArgs,
};

#[derive(Parser)]
#[command(
    name = "vahan",
    version,
    about = "Vahan CLI for driver-behavior and vehicle-maintenance insights"
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in to the prediction service (or the demo account)
    Login(LoginArgs),
    /// Create a new account
    Register(RegisterArgs),
    /// Clear the stored session
    Logout,
    /// Show the current session and dashboard mode
    Whoami(WhoamiArgs),
    /// Analyze driving behavior for a trip
    Behavior(BehaviorArgs),
    /// Check vehicle maintenance status
    Maintenance(MaintenanceArgs),
    /// Show the generated profile for a confidence value
    Profile(ProfileArgs),
    /// List recent driver and vehicle events
    Logs(LogsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    vahan::logging::init(cli.verbose);

    match cli.command {
        Command::Login(args) => commands::login::run(args)?,
        Command::Register(args) => commands::register::run(args)?,
        Command::Logout => commands::logout::run()?,
        Command::Whoami(args) => commands::whoami::run(args)?,
        Command::Behavior(args) => commands::behavior::run(args)?,
        Command::Maintenance(args) => commands::maintenance::run(args)?,
        Command::Profile(args) => commands::profile::run(args)?,
        Command::Logs(args) => commands::logs::run(args)?,
    };

    Ok(())
}

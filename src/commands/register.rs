//! Register command - create a new account
//!
//! Usage: vahan register [options]

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use zeroize::Zeroizing;

use crate::auth::{self, SignupForm};

use super::prompts::CommandPrompts;
use super::CommandContext;

#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub username: Option<String>,

    /// Account email
    #[arg(long)]
    pub email: Option<String>,

    /// Account password
    #[arg(long, env = "VAHAN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Vehicle registration number
    #[arg(long)]
    pub vehicle_number: Option<String>,

    /// Custom API URL (default: http://localhost:5000)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Disable interactive mode
    #[arg(long)]
    pub non_interactive: bool,
}

fn required(
    prompts: &CommandPrompts,
    value: Option<String>,
    flag: &str,
    prompt: &str,
    non_interactive: bool,
) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if non_interactive => anyhow::bail!("--{} is required in non-interactive mode", flag),
        None => prompts.prompt_string(prompt, None),
    }
}

pub fn run(args: RegisterArgs) -> Result<()> {
    let prompts = CommandPrompts::new();
    let ctx = CommandContext::load(args.api_url.as_deref())?;

    prompts.section_header("Vahan - Create Account")?;

    let username = required(&prompts, args.username, "username", "Username", args.non_interactive)?;
    let email = required(&prompts, args.email, "email", "Email", args.non_interactive)?;

    let (password, confirm_password) = match args.password {
        Some(password) => {
            let password = Zeroizing::new(password);
            (password.clone(), password)
        }
        None if args.non_interactive => {
            anyhow::bail!("--password is required in non-interactive mode")
        }
        None => (
            prompts.prompt_password("Password")?,
            prompts.prompt_password("Confirm password")?,
        ),
    };

    let vehicle_number = match args.vehicle_number {
        Some(v) => Some(v),
        None if args.non_interactive => None,
        None => prompts.prompt_optional("Vehicle number (optional)")?,
    };

    let form = SignupForm {
        username,
        email,
        password,
        confirm_password,
        vehicle_number,
    };

    let client = ctx.client()?;
    let spinner = prompts.spinner("Creating account...");
    let result = auth::register(&client, &form);
    spinner.finish_and_clear();
    let session = result?;

    ctx.store.save(&session).context("failed to save session")?;

    println!();
    prompts.success("Registration successful!")?;
    println!();
    if let Some(user) = &session.user {
        prompts.field("User", &user.username)?;
        prompts.field("Email", &user.email)?;
        if let Some(vehicle) = &user.vehicle_number {
            prompts.field("Vehicle", vehicle)?;
        }
    }

    println!();
    println!("{}", style("Next steps:").cyan().bold());
    println!("  Check your session:        vahan whoami");
    println!("  Analyze driving behavior:  vahan behavior");
    println!();

    Ok(())
}

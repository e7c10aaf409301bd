//! Login command - authenticate with the prediction service
//!
//! Usage: vahan login [--email <email>] [--demo]

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use zeroize::Zeroizing;

use crate::auth::{self, Credentials};
use crate::session::{Session, DEMO_EMAIL, DEMO_PASSWORD};

use super::prompts::CommandPrompts;
use super::CommandContext;

#[derive(Args)]
pub struct LoginArgs {
    /// Custom API URL (default: http://localhost:5000)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Account email (prompted if omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Account password (prompted if omitted)
    #[arg(long, env = "VAHAN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Log in with the built-in demo account
    #[arg(long, conflicts_with_all = ["email", "password"])]
    pub demo: bool,

    /// Disable interactive mode
    #[arg(long)]
    pub non_interactive: bool,
}

pub fn run(args: LoginArgs) -> Result<()> {
    let prompts = CommandPrompts::new();
    let ctx = CommandContext::load(args.api_url.as_deref())?;

    prompts.section_header("Vahan Login")?;

    let credentials = if args.demo {
        Credentials::new(DEMO_EMAIL, DEMO_PASSWORD)
    } else {
        let email = match args.email {
            Some(email) => email,
            None if args.non_interactive => {
                anyhow::bail!("--email is required in non-interactive mode")
            }
            None => {
                prompts.info(&format!("Demo access: {} / {}", DEMO_EMAIL, DEMO_PASSWORD))?;
                prompts.prompt_string("Email", None)?
            }
        };
        let password = match args.password {
            Some(password) => Zeroizing::new(password),
            None if args.non_interactive => {
                anyhow::bail!("--password is required in non-interactive mode. Use --password or set VAHAN_PASSWORD")
            }
            None => prompts.prompt_password("Password")?,
        };
        Credentials {
            email: email.trim().to_string(),
            password,
        }
    };

    let session = authenticate(&ctx, &prompts, &credentials)?;
    ctx.store.save(&session).context("failed to save session")?;

    println!();
    prompts.success("Login successful!")?;
    println!();
    if let Some(user) = &session.user {
        prompts.field("User", &user.username)?;
        prompts.field("Email", &user.email)?;
        if let Some(vehicle) = &user.vehicle_number {
            prompts.field("Vehicle", vehicle)?;
        }
    }
    if session.demo {
        prompts.field("Mode", "demo (generated data)")?;
    }

    println!();
    println!("{}", style("Next steps:").cyan().bold());
    println!("  Analyze driving behavior:  vahan behavior");
    println!("  Check vehicle health:      vahan maintenance");

    Ok(())
}

/// Resolve the credentials to a session, building a client only when the
/// service has to be asked.
fn authenticate(
    ctx: &CommandContext,
    prompts: &CommandPrompts,
    credentials: &Credentials,
) -> Result<Session> {
    if let Some(session) = auth::demo_login(credentials)? {
        return Ok(session);
    }

    let client = ctx.client()?;
    let spinner = prompts.spinner("Signing in...");
    let result = auth::login(&client, credentials);
    spinner.finish_and_clear();
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VahanConfig;
    use crate::session::SessionStore;
    use tempfile::tempdir;

    fn context(api_url: &str, dir: &std::path::Path) -> CommandContext {
        CommandContext {
            config: VahanConfig::default(),
            store: SessionStore::new(dir.join("session.json")),
            api_url: api_url.to_string(),
        }
    }

    #[test]
    fn test_demo_login_ignores_bad_api_url() {
        let dir = tempdir().unwrap();
        let ctx = context("not a url", dir.path());
        let session = authenticate(
            &ctx,
            &CommandPrompts::new(),
            &Credentials::new(DEMO_EMAIL, DEMO_PASSWORD),
        )
        .unwrap();
        assert!(session.demo);
    }

    #[test]
    fn test_real_login_reports_bad_api_url() {
        let dir = tempdir().unwrap();
        let ctx = context("not a url", dir.path());
        let err = authenticate(
            &ctx,
            &CommandPrompts::new(),
            &Credentials::new("someone@example.com", "hunter22"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("prediction client"), "{}", err);
    }
}

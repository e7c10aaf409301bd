//! Logout command - clear the stored session
//!
//! Usage: vahan logout

use anyhow::Result;
use console::style;

use super::prompts::CommandPrompts;
use super::CommandContext;

pub fn run() -> Result<()> {
    let prompts = CommandPrompts::new();
    let ctx = CommandContext::load(None)?;

    prompts.section_header("Vahan Logout")?;
    println!();

    if !ctx.store.clear()? {
        prompts.warn("You are not currently logged in.")?;
        return Ok(());
    }

    prompts.success("Logged out successfully.")?;
    println!();
    println!("To log in again, run: {}", style("vahan login").cyan());

    Ok(())
}

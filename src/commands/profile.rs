//! Profile command - show the generated profile for a confidence
//!
//! Usage: vahan profile [CONFIDENCE] [--ratio] [--json]

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::json;

use crate::demo::{classify, synthesize, Confidence, DemoSelector, SystemClock};

use super::render::{print_profile, print_timeline};

#[derive(Args)]
pub struct ProfileArgs {
    /// Confidence percentage (0-100). Defaults to the current demo value.
    #[arg(allow_negative_numbers = true)]
    pub confidence: Option<f64>,

    /// Read CONFIDENCE as a 0-1 ratio
    #[arg(long, requires = "confidence")]
    pub ratio: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProfileArgs {
    fn resolve_confidence(&self) -> Confidence {
        match self.confidence {
            Some(value) if self.ratio => Confidence::from_ratio(value),
            Some(value) => Confidence::from_percent(value),
            None => DemoSelector::new(SystemClock).select(),
        }
    }
}

pub fn run(args: ProfileArgs) -> Result<()> {
    let confidence = args.resolve_confidence();

    let profile = classify(confidence);
    let timeline = synthesize(confidence);

    if args.json {
        let output = json!({
            "profile": profile,
            "timeline": timeline,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {} ({})",
        style("Profile for").cyan().bold(),
        confidence,
        profile.bucket
    );
    print_profile(&profile);
    print_timeline(&timeline);
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct ProfileCli {
        #[command(flatten)]
        args: ProfileArgs,
    }

    fn parse(argv: &[&str]) -> ProfileArgs {
        ProfileCli::try_parse_from(std::iter::once("profile").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_negative_confidence_clamps_to_zero() {
        let args = parse(&["-5"]);
        assert_eq!(args.confidence, Some(-5.0));
        assert_eq!(args.resolve_confidence().percent(), 0);
    }

    #[test]
    fn test_ratio_flag() {
        let args = parse(&["0.734", "--ratio"]);
        assert_eq!(args.resolve_confidence().percent(), 73);
        assert!(ProfileCli::try_parse_from(["profile", "--ratio"]).is_err());
    }
}

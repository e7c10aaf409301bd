//! Diagnostic logging to stderr
//!
//! `RUST_LOG` takes precedence; otherwise the level follows the `-v` count.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "vahan=warn",
        1 => "vahan=info",
        2 => "vahan=debug",
        _ => "vahan=trace,reqwest=debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed when embedded or under test.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

use std::io;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directives are read from this variable unless `-v` is given.
pub const LOG_ENV: &str = "CMKUP_LOG";

fn filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => return EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        1 => "debug",
        _ => "trace",
    };
    EnvFilter::new(level)
}

pub fn init(verbose: u8) {
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(verbose > 0);

    // A second initialization (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(filter(verbose)).with(layer).try_init();
}

//! # Logging Setup
//!
//! Installs the global `tracing` subscriber. INFO by default, DEBUG with
//! `--verbose`. `--profile` adds span close events with uptime timestamps so
//! each pipeline stage reports how long it took.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Install the stderr subscriber; later calls are ignored
pub fn init_logging(verbose: bool, profile: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let span_events = if profile {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(span_events)
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_filter(level),
        )
        .try_init();
}

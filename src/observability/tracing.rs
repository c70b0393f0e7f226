use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable that takes precedence over `RUST_LOG`
pub const LOG_ENV_VAR: &str = "EVCATALOG_LOG";

/// Filter directive for a `-v` count when no environment override is set.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "evcatalog=info,warn",
        2 => "evcatalog=debug,info",
        _ => "trace",
    }
}

fn env_directive() -> Option<String> {
    [LOG_ENV_VAR, "RUST_LOG"]
        .into_iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

/// Install the global subscriber writing to stderr.
///
/// Safe to call more than once; later calls are ignored. `log` records
/// from the config loader are bridged into the same subscriber.
pub fn init_tracing(verbosity: u8) {
    let directive = env_directive().unwrap_or_else(|| filter_directive(verbosity).to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(stderr_layer).try_init() {
        tracing::debug!("Tracing already initialized: {}", e);
    }
}

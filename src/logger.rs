use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV: &str = "CONREQ_LOG";

/// Installs the global subscriber. Logs go to stderr so reports on stdout
/// stay machine readable. Calling this twice keeps the first subscriber.
pub fn init_logging(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_level),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SALESPULSE_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs a compact stderr subscriber so stdout stays machine-parseable.
///
/// The filter comes from `SALESPULSE_LOG`; an unparseable value falls back to `warn`.
pub fn init() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init();
}

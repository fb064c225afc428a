use tracing_subscriber::EnvFilter;

/// Install a stdout fmt subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `debug` selects the `debug` level and
/// anything else only shows warnings. Returns false if a global subscriber
/// was already installed, in which case nothing changes.
pub fn init_tracing(debug: bool) -> bool {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

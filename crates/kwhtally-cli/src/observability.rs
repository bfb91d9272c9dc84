use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "kwhtally=warn,kwhtally_core=warn";

/// Installs a stderr subscriber filtered by `RUST_LOG`, so stdout stays pure JSON.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

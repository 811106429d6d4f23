use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Output goes to stderr so stdout stays
/// reserved for the stdio transport.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// JSON lines for CloudWatch; ANSI colours would show up as escape codes.
pub fn init_lambda_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_current_span(false)
        .init();
}

/// Human readable logs on stderr so stdout only carries the check result.
pub fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();
}

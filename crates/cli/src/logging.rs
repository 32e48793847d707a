use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Console logging to stderr, so stdout stays clean for `theme` and
/// `completions` output.
pub fn setup_console_logging(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Console logging initialized: level={}", log_level);

    Ok(())
}

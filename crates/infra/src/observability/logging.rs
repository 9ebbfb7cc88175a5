use botpub_domain::{BotPubError, LogFormat, LoggingConfig, Result};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Spans are reported when
/// they close, so every transport call logs its duration.
///
/// # Errors
/// Returns `BotPubError::Config` if the level is not a valid filter
/// directive or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => {
            registry.with(fmt::layer().json().with_span_events(FmtSpan::CLOSE)).try_init()
        }
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true).with_span_events(FmtSpan::CLOSE))
            .try_init(),
    };
    installed
        .map_err(|e| BotPubError::Config(format!("Failed to install log subscriber: {e}")))?;

    tracing::info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| BotPubError::Config(format!("Invalid log level {level:?}: {e}"))),
    }
}

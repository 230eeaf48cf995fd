//! Logging setup for the command-line host.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! embedding host's job. The binary uses [`init_logging`].

use std::env;
use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter (e.g., "debug", "info", "component_locator=trace")
    pub level: String,
    /// Whether to use structured JSON format for logs
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Read `RUST_LOG` and `COMPONENT_LOCATOR_LOG_JSON`.
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let json_format = env::var("COMPONENT_LOCATOR_LOG_JSON").unwrap_or_default() == "true";
        Self { level, json_format }
    }
}

/// Install a stderr subscriber. Stdout stays free for command output.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        let stderr_layer = fmt::layer().json().with_writer(io::stderr).with_ansi(false);
        subscriber.with(stderr_layer).try_init()?;
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_line_number(true);
        subscriber.with(stderr_layer).try_init()?;
    }

    Ok(())
}

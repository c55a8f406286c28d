//! Logging setup built on `tracing`
//!
//! The host application decides when to install the subscriber; everything
//! else in the workspace just emits events.

use serde::{Deserialize, Serialize};
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Subscriber configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
    /// Line format on stdout
    pub format: LogFormat,
    /// Annotate events with the source file and line
    pub source_location: bool,
    /// Annotate events with thread ids and names
    pub thread_info: bool,
    /// Extra `EnvFilter` directives applied on top of the level
    pub filter_directives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Pretty,
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            source_location: true,
            thread_info: false,
            filter_directives: vec![
                "hms_core=debug".to_string(),
                "hms_auth=debug".to_string(),
            ],
        }
    }
}

/// Install the global subscriber
///
/// Fails if the host application already installed one, or if a filter
/// directive does not parse.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for directive in &config.filter_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_writer(io::stdout)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_thread_ids(config.thread_info)
                .with_thread_names(config.thread_info);

            registry.with(layer).try_init()?;
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(io::stdout)
                .with_file(config.source_location)
                .with_line_number(config.source_location)
                .with_thread_ids(config.thread_info)
                .with_thread_names(config.thread_info);

            registry.with(layer).try_init()?;
        }
    }

    Ok(())
}

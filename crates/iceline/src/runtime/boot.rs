//! Boot — logging init and config load.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::ParserConfig;
use crate::parser::model::ConfigError;
use crate::stream::LogPipeline;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iceline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config and build the pipeline.
///
/// An unknown format tag surfaces here, before any input is read.
pub fn boot() -> Result<(ParserConfig, LogPipeline), ConfigError> {
    let config = ParserConfig::load()?;
    let pipeline = LogPipeline::from_config(&config)?;

    info!(
        format = pipeline.format().as_str(),
        flush_trailing = config.flush_trailing,
        emit_raw_lines = config.emit_raw_lines,
        "parser configured"
    );

    Ok((config, pipeline))
}

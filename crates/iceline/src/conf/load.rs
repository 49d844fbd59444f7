//! Load — config loading from file and environment variables.

use std::path::Path;
use std::fs::File;
use std::io::Read;

use crate::parser::model::ConfigError;
use super::model::ParserConfig;

impl ParserConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("ICELINE_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/iceline/parser.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        // Environment variables override file config
        if let Ok(format) = std::env::var("ICELINE_FORMAT") {
            config.format = format;
        }
        if let Ok(input) = std::env::var("ICELINE_INPUT") {
            config.input = Some(input.into());
        }
        if let Ok(flush) = std::env::var("ICELINE_FLUSH_TRAILING") {
            if let Ok(flush) = flush.parse::<bool>() {
                config.flush_trailing = flush;
            }
        }
        if let Ok(raw) = std::env::var("ICELINE_EMIT_RAW_LINES") {
            if let Ok(raw) = raw.parse::<bool>() {
                config.emit_raw_lines = raw;
            }
        }

        // Unknown format tags fail at load time, not mid-stream
        config.format()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ParserConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

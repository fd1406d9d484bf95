//! Command-line interface.
//!
//! Defined outside `main.rs` so tests can parse arguments and resolve the
//! effective configuration without spawning the binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, ConfigError, GatewayConfig};

#[derive(Parser, Debug)]
#[command(name = "booking-gateway")]
#[command(about = "Forwards /api requests of the booking site to the backend", long_about = None)]
pub struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Override the backend origin (takes precedence over BACKEND_URL).
    #[arg(long)]
    pub backend_url: Option<String>,
}

impl Cli {
    /// Resolve the effective configuration: file, then environment, then flags.
    pub fn resolve_config<F>(&self, env: F) -> Result<GatewayConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GatewayConfig::default(),
        };

        config.apply_env(env);

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(url) = &self.backend_url {
            config.backend.url = Some(url.clone());
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

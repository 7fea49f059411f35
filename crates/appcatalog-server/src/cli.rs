//! Command line arguments and their overlay on the configuration file.

use appcatalog_core::{CatalogConfig, ConfigResult};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "appcatalog")]
#[command(author, version, about = "Serve a browsable catalog of .ipa bundles", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./appCatalog.conf when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the .ipa files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Configuration from the file, with flags taking precedence.
    pub fn resolve_config(&self) -> ConfigResult<CatalogConfig> {
        let config = CatalogConfig::load(self.config.as_deref())?;
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, mut config: CatalogConfig) -> CatalogConfig {
        if let Some(dir) = &self.dir {
            config.ipa_dir = dir.clone();
        }
        if let Some(port) = self.port {
            config.server_port = port;
        }
        if let Some(bind) = &self.bind {
            config.bind_address = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

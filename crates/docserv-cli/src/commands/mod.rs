//! CLI command definitions and dispatch.

pub mod config;
pub mod documentserver_test;
pub mod link;
pub mod preview;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::output::OutputFormat;
use docserv_auth::Crypt;
use docserv_core::config::AppConfig;
use docserv_core::error::AppError;
use docserv_service::SecureLinkBuilder;

/// DocServ: office document previews through a document service
#[derive(Debug, Parser)]
#[command(name = "docserv", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check connectivity with the document service
    #[command(name = "documentserver-test")]
    DocumentserverTest,
    /// Configuration management
    Config(config::ConfigArgs),
    /// Signed callback links
    Link(link::LinkArgs),
    /// Render a thumbnail of a file in the data root
    Preview(preview::PreviewArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::DocumentserverTest => {
                documentserver_test::execute(&self.config, self.format).await
            }
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Link(args) => link::execute(args, &self.config, self.format).await,
            Commands::Preview(args) => preview::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub async fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: callback link builder signed with the configured secret
pub fn link_builder(config: &AppConfig) -> Result<SecureLinkBuilder, AppError> {
    if config.auth.is_default_secret() {
        warn!("Signing callback links with the default auth.secret_key; set a private secret");
    }
    SecureLinkBuilder::new(
        &config.server,
        &config.document_server,
        Arc::new(Crypt::new(&config.auth)),
    )
}

#[cfg(test)]
mod tests {
    use docserv_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_link_builder_rejects_relative_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "cloud.example.com".to_string();
        let err = link_builder(&config).unwrap_err();
        assert!(err.is(ErrorKind::Configuration));
    }

    #[test]
    fn test_link_builder_with_defaults() {
        let links = link_builder(&AppConfig::default()).unwrap();
        let url = links.empty_file_url().unwrap();
        assert!(url.starts_with("http://localhost/apps/docserv/empty?doc="));
    }
}

//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use docserv_core::config::AppConfig;
use docserv_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path).await?;
            output::print_item(&masked(config), format);
        }
        ConfigCommand::Validate => match super::load_config(config_path).await {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                let base_url = config.server.public_url()?;
                output::print_kv("Base URL", base_url.as_str());
                output::print_kv("Callback route", &config.server.app_route);
                output::print_kv("Document service", display_or_unset(&config.document_server.url));
                output::print_kv(
                    "Request signing",
                    if config.document_server.secret().is_some() { "enabled" } else { "disabled" },
                );
                output::print_kv("Data root", &config.storage.data_root);

                if config.auth.is_default_secret() {
                    output::print_warning("auth.secret_key still has its default value");
                }
                if !config.document_server.is_configured() {
                    output::print_warning("document_server.url is not set");
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

/// Replace secrets with a mask for display
fn masked(mut config: AppConfig) -> AppConfig {
    config.auth.secret_key = mask(&config.auth.secret_key);
    config.document_server.jwt_secret = config.document_server.jwt_secret.as_deref().map(mask);
    config
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "****".to_string()
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.trim().is_empty() { "(not set)" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_are_masked() {
        let mut config = AppConfig::default();
        config.auth.secret_key = "hunter2".to_string();
        config.document_server.jwt_secret = Some("jwt".to_string());

        let shown = masked(config);
        assert_eq!(shown.auth.secret_key, "****");
        assert_eq!(shown.document_server.jwt_secret.as_deref(), Some("****"));
    }

    #[test]
    fn test_shipped_default_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
        let config = AppConfig::load(path).unwrap();
        assert!(config.auth.is_default_secret());
        assert_eq!(config.document_server.jwt_header, "Authorization");
        assert_eq!(config.preview.default_size, 256);
    }
}

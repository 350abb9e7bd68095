//! Signed callback link commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use docserv_core::error::AppError;
use docserv_core::types::SignedUrlRequest;

/// Arguments for link commands
#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Link subcommand
    #[command(subcommand)]
    pub command: LinkCommand,
}

/// Link subcommands
#[derive(Debug, Subcommand)]
pub enum LinkCommand {
    /// Build the download link the document service would fetch a file from
    Download {
        /// Host file id
        #[arg(long)]
        file_id: i64,
        /// Acting user id
        #[arg(short, long)]
        user: Option<String>,
        /// Version ordinal; 0 for the live file
        #[arg(short, long, default_value_t = 0)]
        version: u32,
    },
    /// Verify a token taken from a callback link and show its payload
    Verify {
        /// The `doc` query parameter value
        token: String,
    },
}

/// Execute link commands
pub async fn execute(
    args: &LinkArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let links = super::link_builder(&config)?;

    match &args.command {
        LinkCommand::Download {
            file_id,
            user,
            version,
        } => {
            let request = SignedUrlRequest::download(*file_id, user.as_deref(), *version);
            let url = links.url_for(&request)?;
            match format {
                OutputFormat::Json => {
                    let item = serde_json::json!({ "url": url, "payload": request });
                    output::print_item(&item, format);
                }
                OutputFormat::Table => println!("{}", url),
            }
        }
        LinkCommand::Verify { token } => match links.verify(token) {
            Ok(payload) => {
                output::print_success("Token is valid");
                output::print_item(&payload, format);
            }
            Err(e) => {
                output::print_error(&format!("Token rejected: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

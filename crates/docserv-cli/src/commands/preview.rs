//! Thumbnail rendering for files under the configured data root.

use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::output::{self, OutputFormat};
use docserv_client::DocumentServiceClient;
use docserv_core::error::AppError;
use docserv_core::traits::VersionHistory;
use docserv_service::{PreviewService, VersionResolver};
use docserv_storage::LocalFileStore;

/// Arguments for the preview command
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Path in the data tree, e.g. /alice/files/report.docx
    pub path: String,
    /// Bounding box width; 0 uses the configured default
    #[arg(long, default_value_t = 0)]
    pub width: u32,
    /// Bounding box height; 0 uses the configured default
    #[arg(long, default_value_t = 0)]
    pub height: u32,
    /// Where to write the image
    #[arg(short, long, default_value = "thumbnail.jpeg")]
    pub output: String,
}

/// Execute the preview command
pub async fn execute(
    args: &PreviewArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    if !config.document_server.is_configured() {
        return Err(AppError::configuration("document_server.url is not set"));
    }

    let store = Arc::new(LocalFileStore::new(&config.storage.data_root));
    let history = config
        .storage
        .versions_enabled
        .then(|| store.clone() as Arc<dyn VersionHistory>);
    let resolver = VersionResolver::new(store, history, &config.server.instance_id);
    let client = DocumentServiceClient::new(&config.document_server)?;
    let previews = PreviewService::new(
        resolver,
        super::link_builder(&config)?,
        Arc::new(client),
        config.preview.clone(),
    );

    if !previews.is_available(&args.path) {
        output::print_warning(&format!("'{}' is not a previewable format", args.path));
    }

    let thumbnail = previews
        .generate(&args.path, args.width, args.height)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No preview available for '{}'", args.path)))?;

    tokio::fs::write(&args.output, &thumbnail.data).await?;
    info!(
        path = %args.path,
        output = %args.output,
        bytes = thumbnail.data.len(),
        "Thumbnail written"
    );

    match format {
        OutputFormat::Json => output::print_item(
            &serde_json::json!({
                "path": args.path,
                "output": args.output,
                "content_type": thumbnail.content_type,
                "width": thumbnail.width,
                "height": thumbnail.height,
                "bytes": thumbnail.data.len(),
            }),
            format,
        ),
        OutputFormat::Table => {
            output::print_success(&format!("Thumbnail written to '{}'", args.output));
            output::print_kv("Content type", &thumbnail.content_type);
            output::print_kv("Size", &format!("{}x{}", thumbnail.width, thumbnail.height));
            output::print_kv("Bytes", &thumbnail.data.len().to_string());
        }
    }

    Ok(())
}

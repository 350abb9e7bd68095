//! Connectivity test against the configured document service.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use docserv_core::error::AppError;
use docserv_service::{CheckReport, ConnectivityCheck};

/// Check step display row
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    /// Step name
    step: String,
    /// Result
    status: String,
    /// Observation
    detail: String,
}

/// Run the connectivity check and report each step
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let check = ConnectivityCheck::new(super::link_builder(&config)?, &config);

    let report = check.run().await;

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => print_report(&report, format),
    }

    match report.error {
        None => {
            output::print_success("Document service is reachable and compatible");
            Ok(())
        }
        Some(error) => {
            output::print_error(&error);
            Err(AppError::external_service(error))
        }
    }
}

fn print_report(report: &CheckReport, format: OutputFormat) {
    let rows: Vec<StepRow> = report
        .steps
        .iter()
        .map(|step| StepRow {
            step: step.name.clone(),
            status: if step.passed { "ok" } else { "failed" }.to_string(),
            detail: step.detail.clone(),
        })
        .collect();
    output::print_list(&rows, format);

    if let Some(version) = &report.version {
        output::print_kv("Version", version);
    }
}

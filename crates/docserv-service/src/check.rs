//! End-to-end connectivity test against the document service.
//!
//! The check runs the same chain a real preview does, in order: the service
//! answers its healthcheck, speaks a supported version, and can download a
//! file from the host through a signed callback link and convert it.

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use docserv_client::DocumentServiceClient;
use docserv_core::config::{AppConfig, DocumentServerConfig, ServerConfig};
use docserv_core::result::AppResult;
use docserv_core::traits::ConversionClient;
use docserv_core::types::{ConversionRequest, RevisionKey};

use crate::link::SecureLinkBuilder;

/// Newest document service release line that is no longer supported.
const LAST_UNSUPPORTED_VERSION: (u32, u32) = (6, 0);

/// Outcome of a single check step.
#[derive(Debug, Clone, Serialize)]
pub struct CheckStep {
    /// Step name.
    pub name: String,
    /// Whether the step passed.
    pub passed: bool,
    /// What was observed.
    pub detail: String,
}

/// Outcome of a full connectivity check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    /// Steps in the order they ran; stops at the first failure.
    pub steps: Vec<CheckStep>,
    /// Version reported by the document service.
    pub version: Option<String>,
    /// First error encountered, if any.
    pub error: Option<String>,
}

impl CheckReport {
    /// Whether every step passed.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    fn pass(&mut self, name: &str, detail: impl Into<String>) {
        let detail = detail.into();
        info!(step = name, %detail, "Check step passed");
        self.steps.push(CheckStep {
            name: name.to_string(),
            passed: true,
            detail,
        });
    }

    fn fail(mut self, name: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        error!(step = name, %detail, "Check step failed");
        self.steps.push(CheckStep {
            name: name.to_string(),
            passed: false,
            detail: detail.clone(),
        });
        self.error = Some(detail);
        self
    }
}

/// Runs the connectivity test.
#[derive(Debug, Clone)]
pub struct ConnectivityCheck {
    /// Callback link construction.
    links: SecureLinkBuilder,
    /// Host addressing.
    server: ServerConfig,
    /// Document service settings.
    document_server: DocumentServerConfig,
}

impl ConnectivityCheck {
    /// Creates a check over the configured document service.
    pub fn new(links: SecureLinkBuilder, config: &AppConfig) -> Self {
        Self {
            links,
            server: config.server.clone(),
            document_server: config.document_server.clone(),
        }
    }

    /// Run every step, stopping at the first failure.
    pub async fn run(&self) -> CheckReport {
        let mut report = CheckReport::default();

        let client = match self.configured_client() {
            Ok(client) => client,
            Err(detail) => return report.fail("configuration", detail),
        };
        report.pass("configuration", client.base_url().as_str());

        match client.healthcheck().await {
            Ok(true) => report.pass("healthcheck", "healthy"),
            Ok(false) => return report.fail("healthcheck", "Bad healthcheck status"),
            Err(e) => return report.fail("healthcheck", e.message),
        }

        match client.command_version().await {
            Ok(version) if !is_supported_version(&version) => {
                report.version = Some(version);
                return report.fail("version", "Not supported version");
            }
            Ok(version) => {
                report.pass("version", version.clone());
                report.version = Some(version);
            }
            Err(e) => return report.fail("version", e.message),
        }

        let url = match self.links.empty_file_url() {
            Ok(url) => url,
            Err(e) => return report.fail("conversion", e.message),
        };
        let request = ConversionRequest {
            url,
            from_extension: "docx".to_string(),
            to_extension: "docx".to_string(),
            key: RevisionKey::normalize(&format!("check_{}", Uuid::new_v4().simple())),
            title: "check.docx".to_string(),
            thumbnail: None,
        };

        match client.convert(&request).await {
            Ok(data) => report.pass("conversion", format!("{} bytes", data.len())),
            Err(e) => return report.fail("conversion", e.message),
        }

        report
    }

    /// Validate addresses and build the client, or say what is wrong.
    fn configured_client(&self) -> Result<DocumentServiceClient, String> {
        if !self.document_server.is_configured() {
            return Err("Document service address is not configured".to_string());
        }

        let mixed_content = || -> AppResult<bool> {
            let host = self.server.public_url()?;
            let service = self.document_server.public_url()?;
            Ok(host.scheme() == "https" && service.scheme() == "http")
        };
        match mixed_content() {
            Ok(true) => {
                return Err("Mixed Active Content is not allowed. \
                     HTTPS address for the document service is required."
                    .to_string());
            }
            Ok(false) => {}
            Err(e) => return Err(e.message),
        }

        DocumentServiceClient::new(&self.document_server).map_err(|e| e.message)
    }
}

/// Whether a reported version string is newer than the last unsupported line.
///
/// Unparseable versions are given the benefit of the doubt.
pub fn is_supported_version(version: &str) -> bool {
    let mut parts = version.trim().split('.');
    let major = parts.next().and_then(|p| p.parse::<u32>().ok());
    let minor = parts.next().and_then(|p| p.parse::<u32>().ok()).unwrap_or(0);

    match major {
        Some(major) => (major, minor) > LAST_UNSUPPORTED_VERSION,
        None => true,
    }
}

//! Document service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use docserv_auth::ServiceTokenEncoder;
use docserv_core::config::DocumentServerConfig;
use docserv_core::error::AppError;
use docserv_core::result::AppResult;
use docserv_core::traits::ConversionClient;
use docserv_core::types::ConversionRequest;

use crate::error::DocumentServiceError;
use crate::models::{CommandBody, CommandResponse, ConvertBody, ConvertResponse};

/// Path of the liveness check.
const HEALTHCHECK_PATH: &str = "healthcheck";
/// Path of the command service.
const COMMAND_PATH: &str = "coauthoring/CommandService.ashx";
/// Path of the conversion service.
const CONVERT_PATH: &str = "ConvertService.ashx";

/// Client for one document service installation.
#[derive(Debug, Clone)]
pub struct DocumentServiceClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Server-to-server base URL, its path ending with `/`.
    base_url: Url,
    /// Request signer, when the service requires signed requests.
    signer: Option<ServiceTokenEncoder>,
}

impl DocumentServiceClient {
    /// Creates a client from document service configuration.
    ///
    /// Fails with a configuration error when the service URL is not an
    /// absolute http(s) URL.
    pub fn new(config: &DocumentServerConfig) -> AppResult<Self> {
        let base_url = config.effective_internal_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .danger_accept_invalid_certs(config.verify_peer_off)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let signer = config
            .secret()
            .map(|secret| ServiceTokenEncoder::new(secret, &config.jwt_header));

        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Liveness check. `true` when the service reports itself healthy.
    pub async fn healthcheck(&self) -> AppResult<bool> {
        let url = self.endpoint(HEALTHCHECK_PATH)?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| DocumentServiceError::Transport {
                url: url.to_string(),
                source,
            })?;
        let response = check_status(url.as_str(), response)?;
        let body = response
            .text()
            .await
            .map_err(|source| DocumentServiceError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!(url = %url, body = %body.trim(), "Healthcheck answered");
        Ok(body.trim() == "true")
    }

    /// Ask the command service for its version string.
    pub async fn command_version(&self) -> AppResult<String> {
        let body = serde_json::to_value(CommandBody {
            c: "version".to_string(),
        })?;
        let url = self.endpoint(COMMAND_PATH)?;
        let response: CommandResponse = self.post_json(url.clone(), body).await?;

        if response.error != 0 {
            return Err(DocumentServiceError::Command {
                code: response.error,
            }
            .into());
        }

        response.version.ok_or_else(|| {
            DocumentServiceError::InvalidResponse {
                url: url.to_string(),
                reason: "missing version".to_string(),
            }
            .into()
        })
    }

    /// Run a synchronous conversion and return the URL of the result.
    pub async fn converted_uri(&self, request: &ConversionRequest) -> AppResult<String> {
        let body = serde_json::to_value(ConvertBody::from(request))?;
        let response: ConvertResponse =
            self.post_json(self.endpoint(CONVERT_PATH)?, body).await?;

        if let Some(code) = response.error.filter(|code| *code != 0) {
            warn!(code, key = %request.key, "Conversion failed");
            return Err(DocumentServiceError::Conversion { code }.into());
        }

        match response.file_url.filter(|u| !u.is_empty()) {
            Some(url) if response.end_convert => Ok(url),
            _ => Err(DocumentServiceError::Unfinished {
                percent: response.percent,
            }
            .into()),
        }
    }

    /// Download a file the service produced.
    pub async fn download(&self, url: &str) -> AppResult<Bytes> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| DocumentServiceError::Transport {
                url: url.to_string(),
                source,
            })?;
        let response = check_status(url, response)?;
        let data = response
            .bytes()
            .await
            .map_err(|source| DocumentServiceError::Transport {
                url: url.to_string(),
                source,
            })?;

        if data.is_empty() {
            return Err(DocumentServiceError::EmptyResponse {
                url: url.to_string(),
            }
            .into());
        }
        Ok(data)
    }

    /// POST a JSON body (signed when required) and decode the JSON answer.
    async fn post_json<T: DeserializeOwned>(&self, url: Url, body: Value) -> AppResult<T> {
        let mut builder = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        let body = match &self.signer {
            Some(signer) => {
                let header = signer
                    .header_value(&body)
                    .map_err(|e| DocumentServiceError::Signing(e.message))?;
                builder = builder.header(signer.header_name(), header);
                signer
                    .sign_body(body)
                    .map_err(|e| DocumentServiceError::Signing(e.message))?
            }
            None => body,
        };

        let response = builder
            .body(serde_json::to_vec(&body)?)
            .send()
            .await
            .map_err(|source| DocumentServiceError::Transport {
                url: url.to_string(),
                source,
            })?;
        let response = check_status(url.as_str(), response)?;
        let text = response
            .text()
            .await
            .map_err(|source| DocumentServiceError::Transport {
                url: url.to_string(),
                source,
            })?;

        if text.trim().is_empty() {
            return Err(DocumentServiceError::EmptyResponse {
                url: url.to_string(),
            }
            .into());
        }

        serde_json::from_str(&text).map_err(|e| {
            DocumentServiceError::InvalidResponse {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Endpoint below the base URL.
    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid endpoint path '{path}': {e}")))
    }
}

fn check_status(
    url: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, DocumentServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(DocumentServiceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ConversionClient for DocumentServiceClient {
    async fn convert(&self, request: &ConversionRequest) -> AppResult<Bytes> {
        let result_url = self.converted_uri(request).await?;
        debug!(key = %request.key, url = %result_url, "Conversion finished");
        self.download(&result_url).await
    }
}

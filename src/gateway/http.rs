//! HTTP implementation of the form gateway.
//!
//! Thin reqwest wrapper over the four form-service endpoints. Response
//! bodies are read as text first and decoded by the pure `parse_*`
//! functions below so decoding can be tested without a server.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::GatewayConfig;
use super::{FormGateway, FormRecord, GatewayError, HistoryEntry, SaveMode, SaveRequest, SavedInfo};
use crate::form::{FormDocument, FormId};

pub const DEFAULT_CREATED_MESSAGE: &str = "Form saved successfully!";
pub const DEFAULT_UPDATED_MESSAGE: &str = "Form updated successfully!";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGateway {
    http: reqwest::Client,
    base: Url,
    api_token: String,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns [`GatewayError::Unreachable`] if the base URL cannot take path
    /// segments or the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::Unreachable(format!("invalid base url '{}': {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::Unreachable(format!("invalid base url '{}'", config.base_url)));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GatewayError::Unreachable(format!("http client build failed: {e}")))?;
        Ok(Self { http, base, api_token: config.api_token.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        endpoint(&self.base, segments)
    }

    /// Send `request` and return the body of a success response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, GatewayError> {
        let response = request
            .header(AUTHORIZATION, &self.api_token)
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let message = rejection_message(status, &text);
            warn!(status = status.as_u16(), %message, "form service rejected request");
            return Err(GatewayError::Rejected { status: status.as_u16(), message });
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl FormGateway for HttpGateway {
    async fn save(&self, request: &SaveRequest) -> Result<SavedInfo, GatewayError> {
        let builder = match request {
            SaveRequest::Create(payload) => {
                debug!(form_name = %payload.form_name, fields = payload.form_data.len(), "creating form");
                self.http.post(self.url(&["api", "forms", "save"])?).json(payload)
            }
            SaveRequest::Update { id, payload } => {
                debug!(form_id = %id, fields = payload.form_data.len(), "updating form");
                self.http.put(self.url(&["api", "forms", "update", id.as_str()])?).json(payload)
            }
        };

        let text = self.execute(builder).await?;
        let addressed = match request {
            SaveRequest::Create(_) => None,
            SaveRequest::Update { id, .. } => Some(id.clone()),
        };
        parse_save_response(request.mode(), addressed, &text)
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        debug!("listing forms");
        let text = self.execute(self.http.get(self.url(&["api", "forms", "list"])?)).await?;
        parse_history(&text)
    }

    async fn load_by_id(&self, id: &FormId) -> Result<FormDocument, GatewayError> {
        debug!(form_id = %id, "loading form");
        let text = self.execute(self.http.get(self.url(&["api", "forms", id.as_str()])?)).await?;
        parse_record(&text, id.clone())
    }
}

/// Append `segments` to the path of `base`. Each segment is percent-encoded,
/// so an id containing `/` or `..` stays a single segment.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, GatewayError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| GatewayError::Unreachable(format!("invalid base url '{base}'")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct SaveResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "formId", default)]
    form_id: Option<FormId>,
}

fn parse_save_response(mode: SaveMode, addressed: Option<FormId>, text: &str) -> Result<SavedInfo, GatewayError> {
    let body: SaveResponse = if text.trim().is_empty() {
        SaveResponse { message: None, form_id: None }
    } else {
        serde_json::from_str(text).map_err(|e| GatewayError::Invalid(e.to_string()))?
    };

    let message = body.message.filter(|m| !m.is_empty()).unwrap_or_else(|| {
        match mode {
            SaveMode::Create => DEFAULT_CREATED_MESSAGE,
            SaveMode::Update => DEFAULT_UPDATED_MESSAGE,
        }
        .to_string()
    });
    let form_id = match mode {
        SaveMode::Create => body.form_id,
        SaveMode::Update => addressed,
    };

    Ok(SavedInfo { mode, message, form_id })
}

fn parse_history(text: &str) -> Result<Vec<HistoryEntry>, GatewayError> {
    serde_json::from_str(text).map_err(|e| GatewayError::Invalid(e.to_string()))
}

fn parse_record(text: &str, id: FormId) -> Result<FormDocument, GatewayError> {
    let record: FormRecord = serde_json::from_str(text).map_err(|e| GatewayError::Invalid(e.to_string()))?;
    Ok(record.into_document(id))
}

/// Human-readable reason from an error body: `message`, `detail` or
/// `error` when present as a string, else the status line.
fn rejection_message(status: StatusCode, text: &str) -> String {
    let from_body = serde_json::from_str::<Value>(text).map_or(None, |body| {
        ["message", "detail", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str).map(str::to_owned))
    });

    from_body.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    })
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

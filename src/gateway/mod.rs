//! Persistence gateway: create, update, list and load forms remotely.
//!
//! DESIGN
//! ======
//! `FormGateway` is the seam between the builder and the remote form
//! service; `http::HttpGateway` is the production implementation and tests
//! substitute their own. Whether a save creates or updates is decided once,
//! from the document's `remote_id`, when the `SaveRequest` is built. The
//! request owns a snapshot of the document so editing can continue while
//! it is in flight.
//!
//! ERROR HANDLING
//! ==============
//! Gateway failures are expected and recoverable. Nothing here retries; the
//! caller decides. Transport faults, non-success statuses and undecodable
//! bodies are kept apart so the caller can tell them apart.

pub mod config;
pub mod http;

use serde::{Deserialize, Serialize};

use crate::form::{FieldDefinition, FormDocument, FormId};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The service could not be reached or the connection broke.
    #[error("form service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("form service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered with a body we could not decode.
    #[error("invalid response from form service: {0}")]
    Invalid(String),
}

impl GatewayError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "E_UNREACHABLE",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Invalid(_) => "E_INVALID_RESPONSE",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Rejected { status: 500..=599, .. })
    }
}

// =============================================================================
// WIRE RECORDS
// =============================================================================

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    pub form_name: String,
    pub form_data: Vec<FieldDefinition>,
}

impl FormPayload {
    #[must_use]
    pub fn from_document(doc: &FormDocument) -> Self {
        Self { form_name: doc.title.clone(), form_data: doc.fields.clone() }
    }
}

/// One row of the saved-forms listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: FormId,
    #[serde(rename = "form_name", default)]
    pub title: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A stored form as returned by `GET /api/forms/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FormRecord {
    #[serde(default)]
    pub id: Option<FormId>,
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub form_data: Vec<FieldDefinition>,
}

impl FormRecord {
    /// Turn the record into a builder document addressed by `id`.
    #[must_use]
    pub fn into_document(self, id: FormId) -> FormDocument {
        FormDocument { title: self.form_name, fields: self.form_data, remote_id: Some(id) }
    }
}

// =============================================================================
// SAVE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// A save decided against a document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(FormPayload),
    Update { id: FormId, payload: FormPayload },
}

impl SaveRequest {
    /// Create when the document has never been saved, update otherwise.
    #[must_use]
    pub fn for_document(doc: &FormDocument) -> Self {
        let payload = FormPayload::from_document(doc);
        match &doc.remote_id {
            None => Self::Create(payload),
            Some(id) => Self::Update { id: id.clone(), payload },
        }
    }

    #[must_use]
    pub fn mode(&self) -> SaveMode {
        match self {
            Self::Create(_) => SaveMode::Create,
            Self::Update { .. } => SaveMode::Update,
        }
    }

    #[must_use]
    pub fn payload(&self) -> &FormPayload {
        match self {
            Self::Create(payload) | Self::Update { payload, .. } => payload,
        }
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedInfo {
    pub mode: SaveMode,
    pub message: String,
    /// Identifier the form is stored under: newly assigned on create (when
    /// the service reports one), the addressed id on update.
    pub form_id: Option<FormId>,
}

// =============================================================================
// GATEWAY TRAIT
// =============================================================================

/// Remote form store. Implementations must not retry.
#[async_trait::async_trait]
pub trait FormGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the service is unreachable, rejects
    /// the request, or answers with an undecodable body.
    async fn save(&self, request: &SaveRequest) -> Result<SavedInfo, GatewayError>;

    /// # Errors
    ///
    /// See [`FormGateway::save`].
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, GatewayError>;

    /// # Errors
    ///
    /// See [`FormGateway::save`].
    async fn load_by_id(&self, id: &FormId) -> Result<FormDocument, GatewayError>;

    /// Save `doc` as it is now.
    ///
    /// # Errors
    ///
    /// See [`FormGateway::save`].
    async fn save_document(&self, doc: &FormDocument) -> Result<SavedInfo, GatewayError> {
        self.save(&SaveRequest::for_document(doc)).await
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

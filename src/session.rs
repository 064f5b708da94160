//! Builder session: the state one user edits.
//!
//! DESIGN
//! ======
//! `BuilderSession` owns the document, the single selected field, the
//! notification slot, the last fetched history and the preview toggle. It
//! is a plain value handed to whatever drives the UI; there is no global
//! state. Local edits are synchronous and fail with `EditError`.
//!
//! GATEWAY RESULTS
//! ===============
//! Network calls are split in two: `begin_*` issues a ticket carrying a
//! monotonically increasing token (and, for saves, a snapshot of the
//! document), the caller awaits the gateway, and `finish_*` applies the
//! result. A result is dropped as stale when a newer result of the same
//! kind was already applied, or when the document was replaced (load or
//! reset) after the ticket was issued. Editing may continue while a call
//! is in flight. Failures leave the document untouched and raise a
//! failure notification.

use tracing::{debug, info};

use crate::catalog::{self, FieldType, Property};
use crate::editor::{self, PropertyEdit};
use crate::form::{EditError, FieldDefinition, FormDocument, FormId};
use crate::gateway::{FormGateway, GatewayError, HistoryEntry, SaveRequest, SavedInfo};
use crate::notify::Notifier;
use crate::preview::Preview;

/// What `finish_*` did with a gateway result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Superseded by a newer result or a document replacement; ignored.
    Stale,
    Failed(GatewayError),
}

#[derive(Debug, Clone)]
pub struct SaveTicket {
    token: u64,
    request: SaveRequest,
}

impl SaveTicket {
    #[must_use]
    pub fn token(&self) -> u64 {
        self.token
    }

    #[must_use]
    pub fn request(&self) -> &SaveRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub struct LoadTicket {
    token: u64,
    id: FormId,
}

impl LoadTicket {
    #[must_use]
    pub fn token(&self) -> u64 {
        self.token
    }

    #[must_use]
    pub fn id(&self) -> &FormId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HistoryTicket {
    token: u64,
}

#[derive(Debug, Default)]
pub struct BuilderSession {
    document: FormDocument,
    selection: Option<usize>,
    notifier: Notifier,
    history: Vec<HistoryEntry>,
    preview_mode: bool,
    /// Last token handed out.
    issued: u64,
    last_save_applied: u64,
    last_load_applied: u64,
    last_history_applied: u64,
    /// Save tickets at or below this token predate the current document.
    save_floor: u64,
    /// Load tickets at or below this token predate the last reset.
    load_floor: u64,
}

impl BuilderSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_notifier(notifier: Notifier) -> Self {
        Self { notifier, ..Self::default() }
    }

    #[must_use]
    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn toggle_preview(&mut self) -> bool {
        self.preview_mode = !self.preview_mode;
        self.preview_mode
    }

    /// Derived view of the current document.
    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview::of(&self.document)
    }

    /// Start over with an empty, never-saved document.
    pub fn reset(&mut self) {
        self.document = FormDocument::new();
        self.selection = None;
        self.save_floor = self.issued;
        self.load_floor = self.issued;
    }

    // =========================================================================
    // DOCUMENT EDITS
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.set_title(title);
    }

    pub fn append_field(&mut self, field_type: FieldType) -> usize {
        self.document.append_field(field_type)
    }

    /// Remove a field and keep the selection pointing at the same field.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `index` is not a field position.
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDefinition, EditError> {
        let removed = self.document.remove_field(index)?;
        self.selection = match self.selection {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Ok(removed)
    }

    // =========================================================================
    // SELECTION & PROPERTY EDITS
    // =========================================================================

    /// Open the property panel for the field at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `index` is not a field position.
    pub fn open_for(&mut self, index: usize) -> Result<(), EditError> {
        self.document.check_index(index)?;
        self.selection = Some(index);
        Ok(())
    }

    pub fn close(&mut self) {
        self.selection = None;
    }

    fn selected_index(&self) -> Result<usize, EditError> {
        match self.selection {
            Some(index) if index < self.document.len() => Ok(index),
            _ => Err(EditError::NoSelection),
        }
    }

    /// # Errors
    ///
    /// Returns [`EditError::NoSelection`] if the panel is closed.
    pub fn selected_field(&self) -> Result<&FieldDefinition, EditError> {
        let index = self.selected_index()?;
        self.document.field(index)
    }

    fn selected_field_mut(&mut self) -> Result<&mut FieldDefinition, EditError> {
        let index = self.selected_index()?;
        self.document.field_mut(index)
    }

    /// Properties the panel shows for the selected field.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NoSelection`] if the panel is closed.
    pub fn editable_properties(&self) -> Result<&'static [Property], EditError> {
        Ok(catalog::allowed_properties(self.selected_field()?.field_type()))
    }

    /// # Errors
    ///
    /// Returns [`EditError::NoSelection`] if the panel is closed and
    /// [`EditError::PropertyNotApplicable`] if the selected field's type does
    /// not expose the property.
    pub fn set_property(&mut self, edit: PropertyEdit) -> Result<(), EditError> {
        editor::apply(self.selected_field_mut()?, edit)
    }

    /// Set a property from raw control input.
    ///
    /// # Errors
    ///
    /// As [`BuilderSession::set_property`], plus [`EditError::InvalidValue`]
    /// when `raw` does not parse for `property`. Applicability is checked
    /// before the value is parsed.
    pub fn set_property_input(&mut self, property: Property, raw: &str) -> Result<(), EditError> {
        let field_type = self.selected_field()?.field_type();
        if !catalog::allows(field_type, property) {
            return Err(EditError::PropertyNotApplicable { property, field_type });
        }
        let edit = PropertyEdit::from_input(property, raw)?;
        self.set_property(edit)
    }

    /// # Errors
    ///
    /// Returns [`EditError::NoSelection`], [`EditError::NotOptionBearing`] or
    /// [`EditError::OutOfRange`].
    pub fn set_option(&mut self, option_index: usize, value: impl Into<String>) -> Result<(), EditError> {
        editor::set_option(self.selected_field_mut()?, option_index, value)
    }

    /// Append an empty option to the selected field and return its position.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NoSelection`] or [`EditError::NotOptionBearing`].
    pub fn add_option(&mut self) -> Result<usize, EditError> {
        editor::add_option(self.selected_field_mut()?)
    }

    // =========================================================================
    // GATEWAY TICKETS
    // =========================================================================

    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Snapshot the document into a create-or-update request.
    pub fn begin_save(&mut self) -> SaveTicket {
        let token = self.issue();
        SaveTicket { token, request: SaveRequest::for_document(&self.document) }
    }

    pub fn finish_save(&mut self, ticket: SaveTicket, result: Result<SavedInfo, GatewayError>) -> Outcome {
        if ticket.token <= self.last_save_applied || ticket.token <= self.save_floor {
            debug!(token = ticket.token, "ignoring stale save response");
            return Outcome::Stale;
        }

        match result {
            Ok(info) => {
                self.last_save_applied = ticket.token;
                if let Some(id) = info.form_id {
                    info!(form_id = %id, mode = ?info.mode, "form saved");
                    self.document.remote_id = Some(id);
                }
                self.notifier.notify(info.message, true);
                Outcome::Applied
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn begin_load(&mut self, id: FormId) -> LoadTicket {
        let token = self.issue();
        LoadTicket { token, id }
    }

    /// Replace the document with a loaded one and close the panel.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<FormDocument, GatewayError>) -> Outcome {
        if ticket.token <= self.last_load_applied || ticket.token <= self.load_floor {
            debug!(token = ticket.token, form_id = %ticket.id, "ignoring stale load response");
            return Outcome::Stale;
        }

        match result {
            Ok(mut document) => {
                document.remote_id = Some(ticket.id.clone());
                info!(form_id = %ticket.id, fields = document.len(), "form loaded");
                let message = format!("Loaded form '{}'", document.title);
                self.document = document;
                self.selection = None;
                self.last_load_applied = ticket.token;
                self.save_floor = self.issued;
                self.notifier.notify(message, true);
                Outcome::Applied
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn begin_history(&mut self) -> HistoryTicket {
        HistoryTicket { token: self.issue() }
    }

    pub fn finish_history(
        &mut self,
        ticket: HistoryTicket,
        result: Result<Vec<HistoryEntry>, GatewayError>,
    ) -> Outcome {
        if ticket.token <= self.last_history_applied {
            debug!(token = ticket.token, "ignoring stale history response");
            return Outcome::Stale;
        }

        match result {
            Ok(entries) => {
                self.last_history_applied = ticket.token;
                self.history = entries;
                Outcome::Applied
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: GatewayError) -> Outcome {
        self.notifier.notify(error.to_string(), false);
        Outcome::Failed(error)
    }

    // =========================================================================
    // SEQUENTIAL HELPERS
    // =========================================================================

    pub async fn save_with<G>(&mut self, gateway: &G) -> Outcome
    where
        G: FormGateway + ?Sized,
    {
        let ticket = self.begin_save();
        let result = gateway.save(ticket.request()).await;
        self.finish_save(ticket, result)
    }

    pub async fn load_with<G>(&mut self, gateway: &G, id: FormId) -> Outcome
    where
        G: FormGateway + ?Sized,
    {
        let ticket = self.begin_load(id);
        let result = gateway.load_by_id(ticket.id()).await;
        self.finish_load(ticket, result)
    }

    pub async fn history_with<G>(&mut self, gateway: &G) -> Outcome
    where
        G: FormGateway + ?Sized,
    {
        let ticket = self.begin_history();
        let result = gateway.list_history().await;
        self.finish_history(ticket, result)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

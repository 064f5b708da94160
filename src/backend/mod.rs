//! Reference form service.
//!
//! DESIGN
//! ======
//! An in-memory implementation of the four form endpoints the gateway
//! talks to. Forms get integer ids counting from 1 and keep their
//! `form_data` exactly as posted, so what a client sends is what a later
//! load returns. Every request must carry the configured credential in
//! `Authorization`.
//!
//! Used by `formbuilder serve` for local work and by the integration tests.

pub mod routes;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::gateway::config::BackendConfig;

// =============================================================================
// STATE
// =============================================================================

/// One stored form.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredForm {
    pub form_name: String,
    pub form_data: Vec<Value>,
    pub updated_at: String,
}

#[derive(Debug, Default)]
struct Store {
    last_id: u64,
    forms: BTreeMap<u64, StoredForm>,
}

/// Shared backend state. Clone is cheap: the store is behind an `Arc`.
#[derive(Clone)]
pub struct BackendState {
    store: Arc<RwLock<Store>>,
    api_token: Arc<str>,
}

impl BackendState {
    #[must_use]
    pub fn new(api_token: &str) -> Self {
        Self { store: Arc::new(RwLock::new(Store::default())), api_token: Arc::from(api_token) }
    }

    pub(crate) fn token_matches(&self, presented: &str) -> bool {
        let presented = presented.strip_prefix("Bearer ").unwrap_or(presented);
        presented == &*self.api_token
    }

    /// Store a new form and return its id.
    pub async fn insert(&self, form_name: String, form_data: Vec<Value>) -> u64 {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let id = store.last_id;
        store.forms.insert(id, StoredForm { form_name, form_data, updated_at: timestamp() });
        id
    }

    /// Replace a stored form. Returns `false` if `id` is unknown.
    pub async fn replace(&self, id: u64, form_name: String, form_data: Vec<Value>) -> bool {
        let mut store = self.store.write().await;
        match store.forms.get_mut(&id) {
            Some(form) => {
                *form = StoredForm { form_name, form_data, updated_at: timestamp() };
                true
            }
            None => false,
        }
    }

    pub async fn get(&self, id: u64) -> Option<StoredForm> {
        self.store.read().await.forms.get(&id).cloned()
    }

    /// All forms in id order.
    pub async fn list(&self) -> Vec<(u64, StoredForm)> {
        self.store
            .read()
            .await
            .forms
            .iter()
            .map(|(id, form)| (*id, form.clone()))
            .collect()
    }
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

// =============================================================================
// ROUTER
// =============================================================================

#[must_use]
pub fn router(state: BackendState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/forms/save", post(routes::save_form))
        .route("/api/forms/update/{id}", put(routes::update_form))
        .route("/api/forms/list", get(routes::list_forms))
        .route("/api/forms/{id}", get(routes::get_form))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the backend on an already bound listener until the task is dropped.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve_listener(listener: TcpListener, state: BackendState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

/// Bind `0.0.0.0:<port>` and serve.
///
/// # Errors
///
/// Returns an I/O error if binding or serving fails.
pub async fn serve(config: &BackendConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "form service listening");
    serve_listener(listener, BackendState::new(&config.api_token)).await
}

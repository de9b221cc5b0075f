//! Shared application state.

use std::sync::Arc;

use fangate_backend::BackendClient;
use fangate_core::config::{BackendConfig, SearchConfig};
use fangate_core::types::{CollectionTarget, ResultLimit};
use fangate_query::builder::FieldSelection;

use crate::query_store::QueryStore;

/// Everything a handler needs, cloneable per request.
///
/// The backend client is constructed exactly once and injected here so
/// every request and every concurrent fan-out task shares one connection
/// pool; there is no global client.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<BackendClient>,
    pub targets: Arc<Vec<CollectionTarget>>,
    pub fields: Arc<FieldSelection>,
    pub default_limit: ResultLimit,
    pub backend_embeds: bool,
    pub query_store: Option<Arc<QueryStore>>,
}

impl AppState {
    pub fn new(
        backend: &BackendConfig,
        search: &SearchConfig,
        query_store: Option<QueryStore>,
    ) -> anyhow::Result<Self> {
        let client = BackendClient::new(backend)?;
        let targets = search.targets()?;
        let default_limit = ResultLimit::new(search.default_limit)?;
        Ok(Self {
            client: Arc::new(client),
            targets: Arc::new(targets),
            fields: Arc::new(FieldSelection {
                properties: search.properties.clone(),
                return_fields: search.return_fields.clone(),
            }),
            default_limit,
            backend_embeds: backend.embeds_queries,
            query_store: query_store.map(Arc::new),
        })
    }
}

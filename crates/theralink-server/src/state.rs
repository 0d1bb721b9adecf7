use std::sync::Arc;

use theralink_bedrock::summary::SummaryService;
use theralink_dashboard::error::DashboardError;
use theralink_dashboard::render::Renderer;
use theralink_storage::store::TriageStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriageStore>,
    pub summaries: Arc<SummaryService>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TriageStore>,
        summaries: SummaryService,
    ) -> Result<Self, DashboardError> {
        Ok(Self {
            store,
            summaries: Arc::new(summaries),
            renderer: Arc::new(Renderer::new()?),
        })
    }
}

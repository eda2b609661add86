use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::ComparisonOptions;
use crate::storage::GameStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<GameStore>>,
    pub options: ComparisonOptions,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(store: GameStore, options: ComparisonOptions) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            options,
            cors_origin: "*".to_string(),
        }
    }

    pub fn with_cors_origin(mut self, origin: &str) -> Self {
        self.cors_origin = origin.to_string();
        self
    }
}

use std::sync::Arc;

use crate::application::DomainManager;
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<DomainManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(manager: DomainManager, config: AppConfig) -> Self {
        Self {
            manager: Arc::new(manager),
            config: Arc::new(config),
        }
    }
}

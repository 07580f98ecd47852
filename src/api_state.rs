use crate::models::config::Config;
use crate::repo::sqlite::SqliteLogRepository;
use crate::service::log_service::LogService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    log_service: Arc<LogService<SqliteLogRepository>>,

    /// Page size used when a request gives none
    default_page_size: usize,

    /// Upper bound applied to requested page sizes
    max_page_size: usize,
}

impl AppState {
    pub fn new(repository: SqliteLogRepository, config: &Config) -> Self {
        Self {
            log_service: Arc::new(LogService::new(repository)),
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }

    pub fn log_service(&self) -> &LogService<SqliteLogRepository> {
        &self.log_service
    }

    /// Resolve the page size for a request, falling back to the default
    /// and capping at the configured maximum
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}

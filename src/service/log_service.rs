use crate::models::current_user::CurrentUser;
use crate::models::error::{DomainError, Result};
use crate::models::log_param::LogParam;
use crate::models::log_record::LogRecord;
use crate::models::log_view::LogView;
use crate::models::page::{PageRequest, PageResult};
use crate::repo::sqlite::LogRepository;
use chrono::Utc;
use log::{debug, info};

const LOG: &str = "log";

/// Create and list logs. Every operation runs in one repository transaction.
pub struct LogService<R: LogRepository> {
    repository: R,
}

impl<R: LogRepository> LogService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Persist a new log attributed to `current_user`
    pub fn create(&self, param: LogParam, current_user: &CurrentUser) -> Result<LogView> {
        let record = log_param_to_record(param, current_user, Utc::now().timestamp());

        let saved = self.repository.transaction(|store| store.save(&record))?;
        info!(
            "Created log {} ({}) for user {}",
            saved.id, saved.action, saved.username
        );

        Ok(LogView::from(saved))
    }

    /// All logs in insertion order. An empty store is an error.
    pub fn list_all(&self) -> Result<Vec<LogView>> {
        self.repository.transaction(|store| {
            let logs = store.find_all()?;
            if logs.is_empty() {
                return Err(DomainError::no_object_exists(LOG));
            }
            debug!("Listing {} logs", logs.len());
            Ok(logs.into_iter().map(LogView::from).collect())
        })
    }

    /// One page of logs. A page without content is an error, including a
    /// page index past the last page of a non-empty store.
    pub fn list_page(&self, request: &PageRequest) -> Result<PageResult<LogView>> {
        self.repository.transaction(|store| {
            let page = store.find_page(request)?;
            if !page.has_content() {
                return Err(DomainError::no_object_exists(LOG));
            }
            Ok(page.map(LogView::from))
        })
    }
}

fn log_param_to_record(param: LogParam, current_user: &CurrentUser, created_at: i64) -> LogRecord {
    LogRecord {
        id: 0,
        user_id: current_user.id,
        username: current_user.usr.clone(),
        ip: param.ip,
        action: param.action,
        message: param.message,
        created_at,
    }
}

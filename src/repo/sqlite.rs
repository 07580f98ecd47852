use crate::models::error::{DomainError, Result};
use crate::models::log_record::LogRecord;
use crate::models::page::{PageRequest, PageResult};
use log::{debug, info, warn};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, Row};
use std::time::Duration;

type DbPool = Pool<SqliteConnectionManager>;

const LOG_COLUMNS: &str = "ID, User_ID, Username, Ip, Action, Message, Created_At";

/// Reads and writes of log records inside one transaction
pub trait LogStore {
    /// Insert `record` and return it with its assigned id
    fn save(&self, record: &LogRecord) -> Result<LogRecord>;

    /// Every record, in insertion order
    fn find_all(&self) -> Result<Vec<LogRecord>>;

    fn find_page(&self, request: &PageRequest) -> Result<PageResult<LogRecord>>;
}

/// Source of transactional log stores.
///
/// `transaction` commits when `work` returns `Ok` and rolls back otherwise.
pub trait LogRepository: Send + Sync {
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn LogStore) -> Result<T>;
}

#[derive(Clone)]
pub struct SqliteLogRepository {
    pool: DbPool,
}

impl SqliteLogRepository {
    /// Open `db_file` behind a connection pool and make sure the schema exists.
    ///
    /// In-memory databases are private to one connection, so they always get
    /// a pool of size 1 that is never reaped.
    pub fn open(db_file: &str, pool_size: usize) -> Result<Self> {
        Self::open_with_timeouts(
            db_file,
            pool_size,
            Some(Duration::from_secs(10 * 60)),
            Some(Duration::from_secs(30 * 60)),
        )
    }

    /// Like `open`, with explicit r2d2 idle timeout and max lifetime for
    /// file databases. In-memory databases ignore both: closing their only
    /// connection would drop the whole database.
    pub fn open_with_timeouts(
        db_file: &str,
        pool_size: usize,
        idle_timeout: Option<Duration>,
        max_lifetime: Option<Duration>,
    ) -> Result<Self> {
        if db_file.is_empty() {
            return Err(DomainError::ConfigInvalid(
                "Database file path cannot be empty. Provide a valid path or use ':memory:' for in-memory database.".to_string()
            ));
        }

        info!("Initializing database connection pool: {}", db_file);

        let is_in_memory = db_file == ":memory:" || db_file.starts_with("file::memory:");
        let use_wal = !is_in_memory;

        let manager = SqliteConnectionManager::file(db_file).with_init(move |conn| {
            let mut pragmas = String::from(
                "PRAGMA busy_timeout = 5000;
                     PRAGMA synchronous = NORMAL;
                     PRAGMA foreign_keys = ON;",
            );

            if use_wal {
                pragmas.push_str(" PRAGMA journal_mode = WAL;");
            }

            conn.execute_batch(&pragmas)
        });

        let (pool_size, idle_timeout, max_lifetime) = if is_in_memory {
            (1, None, None)
        } else {
            (pool_size.max(1), idle_timeout, max_lifetime)
        };
        let pool = r2d2::Pool::builder()
            .max_size(pool_size as u32)
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .build(manager)
            .map_err(|cause| DomainError::DatabaseConnection {
                path: db_file.to_string(),
                cause,
            })?;

        info!("Database pool created with {} connections", pool_size);

        let repository = Self { pool };
        repository.setup_database()?;
        Ok(repository)
    }

    fn get_connection(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    fn setup_database(&self) -> Result<()> {
        info!("Initializing database schema");
        let setup_queries = "BEGIN;
        PRAGMA ENCODING = 'UTF-8';

        CREATE TABLE IF NOT EXISTS Logs(
            ID            integer not null
                constraint Logs_ID_pk
                    primary key autoincrement,
            User_ID       integer not null,
            Username      TEXT    not null,
            Ip            TEXT,
            Action        TEXT    not null,
            Message       TEXT,
            Created_At    integer not null);

        CREATE INDEX IF NOT EXISTS Logs_Created_At_index
                on Logs (Created_At DESC);

        CREATE INDEX IF NOT EXISTS Logs_User_ID_index
                on Logs (User_ID);

        COMMIT;";

        let conn = self.get_connection()?;
        conn.execute_batch(setup_queries)
            .map_err(|cause| DomainError::DatabaseQuery {
                operation: "create tables".to_string(),
                cause,
            })?;
        info!("Database schema initialized successfully");
        Ok(())
    }
}

impl LogRepository for SqliteLogRepository {
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&dyn LogStore) -> Result<T>,
    {
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|cause| DomainError::Transaction {
                operation: "begin".to_string(),
                cause,
            })?;

        let result = work(&SqliteLogStore { conn: &tx });

        match result {
            Ok(value) => {
                tx.commit().map_err(|cause| DomainError::Transaction {
                    operation: "commit".to_string(),
                    cause,
                })?;
                Ok(value)
            }
            Err(error) => {
                if let Err(cause) = tx.rollback() {
                    warn!("Failed to roll back transaction: {}", cause);
                }
                Err(error)
            }
        }
    }
}

struct SqliteLogStore<'a> {
    conn: &'a Connection,
}

fn map_log_row(row: &Row) -> rusqlite::Result<LogRecord> {
    Ok(LogRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        username: row.get(2)?,
        ip: row.get(3)?,
        action: row.get(4)?,
        message: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl SqliteLogStore<'_> {
    fn query_logs(
        &self,
        operation: &str,
        query: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<LogRecord>> {
        let mut stmt = self
            .conn
            .prepare(query)
            .map_err(|cause| DomainError::DatabaseQuery {
                operation: operation.to_string(),
                cause,
            })?;

        let rows = stmt
            .query_map(params, map_log_row)
            .map_err(|cause| DomainError::DatabaseQuery {
                operation: operation.to_string(),
                cause,
            })?;

        rows.collect::<rusqlite::Result<Vec<LogRecord>>>()
            .map_err(|cause| DomainError::DatabaseQuery {
                operation: format!("collect rows for {}", operation),
                cause,
            })
    }
}

impl LogStore for SqliteLogStore<'_> {
    fn save(&self, record: &LogRecord) -> Result<LogRecord> {
        debug!(
            "Inserting log record: {} by {}",
            record.action, record.username
        );

        let id: i64 = self
            .conn
            .query_row(
                "INSERT INTO Logs (User_ID, Username, Ip, Action, Message, Created_At)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING ID",
                (
                    record.user_id,
                    &record.username,
                    &record.ip,
                    &record.action,
                    &record.message,
                    record.created_at,
                ),
                |row| row.get(0),
            )
            .map_err(|cause| DomainError::DatabaseInsert {
                table: "Logs".to_string(),
                cause,
            })?;

        Ok(LogRecord {
            id,
            ..record.clone()
        })
    }

    fn find_all(&self) -> Result<Vec<LogRecord>> {
        let query = format!("SELECT {} FROM Logs ORDER BY ID ASC", LOG_COLUMNS);
        self.query_logs("find all logs", &query, [])
    }

    fn find_page(&self, request: &PageRequest) -> Result<PageResult<LogRecord>> {
        let total: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Logs", [], |row| row.get(0))
            .map_err(|cause| DomainError::DatabaseQuery {
                operation: "count logs".to_string(),
                cause,
            })?;

        // Sort columns come from a whitelist, so formatting them in is safe
        let order_by = match request.sort() {
            Some(sort) => format!(
                "{} {}, ID ASC",
                sort.field.column(),
                sort.direction.as_sql()
            ),
            None => "ID ASC".to_string(),
        };
        let query = format!(
            "SELECT {} FROM Logs ORDER BY {} LIMIT ?1 OFFSET ?2",
            LOG_COLUMNS, order_by
        );

        let limit = i64::try_from(request.size()).unwrap_or(i64::MAX);
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let content = self.query_logs("find log page", &query, (limit, offset))?;

        debug!(
            "Fetched page {} (size {}): {} of {} logs",
            request.page(),
            request.size(),
            content.len(),
            total
        );

        Ok(PageResult::new(content, request, total))
    }
}

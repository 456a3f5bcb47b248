use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr, Schema};

use super::entity;

/// Configuration for the post history database.
#[derive(Debug, Clone)]
pub struct HistoryDbConfig {
    pub url: String,
    pub connect_timeout: Duration,
}

impl Default for HistoryDbConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://posts_history.db?mode=rwc".to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl HistoryDbConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("HISTORY_DATABASE_URL").unwrap_or(defaults.url),
            connect_timeout: defaults.connect_timeout,
        }
    }
}

/// Open the history database and create the `posts` table if missing.
///
/// The pool holds a single connection: SQLite allows one writer at a time
/// and an in-memory database only lives as long as its connection.
pub async fn connect(config: &HistoryDbConfig) -> Result<DbConn, DbErr> {
    let opts = ConnectOptions::new(&config.url)
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(config.connect_timeout)
        .sqlx_logging(false)
        .to_owned();

    let db = Database::connect(opts).await?;
    ensure_schema(&db).await?;
    tracing::info!(url = %config.url, "History database connected");

    Ok(db)
}

async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut table = Schema::new(backend).create_table_from_entity(entity::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;
    Ok(())
}

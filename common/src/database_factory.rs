use crate::database_provider::DbProvider;
use crate::dbprovider_pg::PgDbProvider;
use crate::server_config::DBConfig;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Debug)]
pub enum DatabaseError {
    ConnectionError(String),
    UnsupportedDatabase(String),
}

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            DatabaseError::UnsupportedDatabase(msg) => write!(f, "Unsupported database: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {}

pub async fn create_db_instance(
    dbconfig: &DBConfig,
) -> Result<Arc<dyn DbProvider>, DatabaseError> {
    let db_type = dbconfig.dbtype.to_lowercase();

    match db_type.as_str() {
        "postgresql" => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&dbconfig.url)
                .await
                .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
            Ok(Arc::new(PgDbProvider::new(pool)))
        }
        _ => Err(DatabaseError::UnsupportedDatabase(format!(
            "Unsupported database type: {}",
            db_type
        ))),
    }
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use tokio::fs;

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Poll the database until it answers, bounded at `attempts` tries spaced
/// one second apart. Containers routinely come up before their database
/// does, so startup blocks here instead of crash-looping.
pub async fn wait_for_db(database_url: &str, attempts: u32) -> Result<DatabaseConnection> {
    for attempt in 1..=attempts {
        match Database::connect(database_url).await {
            Ok(conn) => match conn.ping().await {
                Ok(()) => return Ok(conn),
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "database not ready, waiting 1 second");
                }
            },
            Err(err) => {
                tracing::warn!(attempt, error = %err, "database unavailable, waiting 1 second");
            }
        }
        if attempt < attempts {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
    anyhow::bail!("database unavailable after {attempts} attempts")
}

/// Applies every `.sql` file under `migrations/` in filename order. The
/// files are idempotent, so rerunning the full set on startup is safe.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir("migrations").await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in sql.split(';') {
            let stmt = stmt.trim();
            if stmt.is_empty() {
                continue;
            }
            conn.execute(Statement::from_string(backend, format!("{stmt};")))
                .await?;
        }
        tracing::debug!(file = %file.display(), "migration applied");
    }

    Ok(())
}

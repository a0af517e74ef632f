use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::db::connect_with_config;





/// Fresh migrated SQLite database in a temp dir. Keep the `TempDir` alive for the test.
pub(crate) async fn setup_test_db() -> anyhow::Result<(DatabaseConnection, TempDir)> {
    let dir = tempfile::tempdir()?;
    let cfg = configs::DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("models.db").display()),
        max_connections: 4,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok((db, dir))
}

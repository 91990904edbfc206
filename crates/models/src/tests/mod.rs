

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, memory_config};

/// Fresh in-memory database with every migration applied.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&memory_config()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

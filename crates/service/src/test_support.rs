use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use models::db::{connect_with_config, memory_config};

/// A private, migrated in-memory database. Each call gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&memory_config()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Same as [`get_db`] with the sample owners, pets and vets loaded.
pub async fn get_seeded_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = get_db().await?;
    models::seed::populate_sample_data(&db).await?;
    Ok(db)
}

//! Migrator registering the clinic tables in foreign-key order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_types;
mod m20240301_000002_create_owners;
mod m20240301_000003_create_pets;
mod m20240301_000004_create_visits;
mod m20240301_000005_create_vets;
mod m20240301_000006_create_specialties;
mod m20240301_000007_create_vet_specialties;
mod m20240301_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_types::Migration),
            Box::new(m20240301_000002_create_owners::Migration),
            Box::new(m20240301_000003_create_pets::Migration),
            Box::new(m20240301_000004_create_visits::Migration),
            Box::new(m20240301_000005_create_vets::Migration),
            Box::new(m20240301_000006_create_specialties::Migration),
            Box::new(m20240301_000007_create_vet_specialties::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000008_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database, DatabaseConnection};

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(opt).await.expect("sqlite memory db")
    }

    #[tokio::test]
    async fn up_creates_every_table() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.expect("migrate up");
        let manager = SchemaManager::new(&db);
        for table in ["types", "owners", "pets", "visits", "vets", "specialties", "vet_specialties"] {
            assert!(manager.has_table(table).await.unwrap(), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn down_drops_every_table() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.expect("migrate up");
        Migrator::down(&db, None).await.expect("migrate down");
        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("owners").await.unwrap());
        assert!(!manager.has_table("vet_specialties").await.unwrap());
    }
}

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Specialties::Table)
                    .if_not_exists()
                    .col(pk_auto(Specialties::Id))
                    .col(string_len(Specialties::Name, 80))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Specialties::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Specialties { Table, Id, Name }

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Owners: searched by last name prefix
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_owners_last_name")
                    .table(Owners::Table)
                    .col(Owners::LastName)
                    .to_owned(),
            )
            .await?;

        // Vets: listed ordered by last name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vets_last_name")
                    .table(Vets::Table)
                    .col(Vets::LastName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pets_name")
                    .table(Pets::Table)
                    .col(Pets::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_visits_pet_id")
                    .table(Visits::Table)
                    .col(Visits::PetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_visits_pet_id").table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pets_name").table(Pets::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_vets_last_name").table(Vets::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_owners_last_name").table(Owners::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Owners { Table, LastName }

#[derive(DeriveIden)]
enum Vets { Table, LastName }

#[derive(DeriveIden)]
enum Pets { Table, Name }

#[derive(DeriveIden)]
enum Visits { Table, PetId }

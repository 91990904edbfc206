//! Create `vet_specialties`, the many-to-many link between vets and specialties.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VetSpecialties::Table)
                    .if_not_exists()
                    .col(integer(VetSpecialties::VetId))
                    .col(integer(VetSpecialties::SpecialtyId))
                    .primary_key(
                        Index::create()
                            .col(VetSpecialties::VetId)
                            .col(VetSpecialties::SpecialtyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vet_specialties_vet")
                            .from(VetSpecialties::Table, VetSpecialties::VetId)
                            .to(Vets::Table, Vets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vet_specialties_specialty")
                            .from(VetSpecialties::Table, VetSpecialties::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(VetSpecialties::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum VetSpecialties { Table, VetId, SpecialtyId }

#[derive(DeriveIden)]
enum Vets { Table, Id }

#[derive(DeriveIden)]
enum Specialties { Table, Id }

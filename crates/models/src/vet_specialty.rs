use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, specialty, vet};

/// Link row between `vets` and `specialties`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vet_specialties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vet_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub specialty_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vet,
    Specialty,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vet => Entity::belongs_to(vet::Entity).from(Column::VetId).to(vet::Column::Id).into(),
            Relation::Specialty => Entity::belongs_to(specialty::Entity).from(Column::SpecialtyId).to(specialty::Column::Id).into(),
        }
    }
}

impl Related<vet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vet.def() }
}

impl Related<specialty::Entity> for Entity {
    fn to() -> RelationDef { Relation::Specialty.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Specialties of the given vets as `(vet_id, specialty)` pairs.
pub async fn find_specialties_for(
    db: &DatabaseConnection,
    vet_ids: &[i32],
) -> Result<Vec<(i32, specialty::Model)>, errors::ModelError> {
    if vet_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = Entity::find()
        .filter(Column::VetId.is_in(vet_ids.iter().copied()))
        .find_also_related(specialty::Entity)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(link, spec)| spec.map(|s| (link.vet_id, s)))
        .collect())
}

pub async fn link<C: ConnectionTrait>(db: &C, vet_id: i32, specialty_id: i32) -> Result<Model, errors::ModelError> {
    let am = ActiveModel { vet_id: Set(vet_id), specialty_id: Set(specialty_id) };
    Ok(am.insert(db).await?)
}

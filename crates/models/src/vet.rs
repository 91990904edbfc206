use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, specialty, vet_specialty};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    VetSpecialties,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::VetSpecialties => Entity::has_many(vet_specialty::Entity).into() }
    }
}

impl Related<vet_specialty::Entity> for Entity {
    fn to() -> RelationDef { Relation::VetSpecialties.def() }
}

impl Related<specialty::Entity> for Entity {
    fn to() -> RelationDef { vet_specialty::Relation::Specialty.def() }
    fn via() -> Option<RelationDef> { Some(vet_specialty::Relation::Vet.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Every vet ordered by last name, then first name.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let found = Entity::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(found)
}

pub async fn create<C: ConnectionTrait>(db: &C, first_name: &str, last_name: &str) -> Result<Model, errors::ModelError> {
    if last_name.trim().is_empty() { return Err(errors::ModelError::Validation("last name required".into())); }
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
    };
    Ok(am.insert(db).await?)
}

use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::{errors, pet};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pet_id: i32,
    pub visit_date: Date,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Pet => Entity::belongs_to(pet::Entity).from(Column::PetId).to(pet::Column::Id).into() }
    }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pet.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Visits of one pet, most recent first.
pub async fn find_by_pet_id(db: &DatabaseConnection, pet_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    find_by_pet_ids(db, &[pet_id]).await
}

/// Visits of several pets, most recent first.
pub async fn find_by_pet_ids(db: &DatabaseConnection, pet_ids: &[i32]) -> Result<Vec<Model>, errors::ModelError> {
    if pet_ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = Entity::find()
        .filter(Column::PetId.is_in(pet_ids.iter().copied()))
        .order_by_desc(Column::VisitDate)
        .order_by_desc(Column::Id)
        .all(db)
        .await?;
    Ok(found)
}

pub async fn insert<C: ConnectionTrait>(db: &C, m: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        pet_id: Set(m.pet_id),
        visit_date: Set(m.visit_date),
        description: Set(m.description),
    };
    Ok(am.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, m: Model) -> Result<Model, errors::ModelError> {
    let id = m.id;
    let am = ActiveModel {
        id: Unchanged(m.id),
        pet_id: Set(m.pet_id),
        visit_date: Set(m.visit_date),
        description: Set(m.description),
    };
    am.update(db).await.map_err(|e| match errors::ModelError::from(e) {
        errors::ModelError::NotFound(_) => errors::ModelError::NotFound(format!("visit {id}")),
        other => other,
    })
}

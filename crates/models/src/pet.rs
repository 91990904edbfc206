use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::{errors, owner, pet_type, visit};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub birth_date: Date,
    pub type_id: i32,
    pub owner_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    PetType,
    Visits,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(owner::Entity).from(Column::OwnerId).to(owner::Column::Id).into(),
            Relation::PetType => Entity::belongs_to(pet_type::Entity).from(Column::TypeId).to(pet_type::Column::Id).into(),
            Relation::Visits => Entity::has_many(visit::Entity).into(),
        }
    }
}

impl Related<owner::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl Related<pet_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::PetType.def() }
}

impl Related<visit::Entity> for Entity {
    fn to() -> RelationDef { Relation::Visits.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Pets belonging to any of `owner_ids`, ordered by name.
pub async fn find_by_owner_ids(db: &DatabaseConnection, owner_ids: &[i32]) -> Result<Vec<Model>, errors::ModelError> {
    if owner_ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = Entity::find()
        .filter(Column::OwnerId.is_in(owner_ids.iter().copied()))
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(found)
}

/// Insert a new pet; `m.id` is ignored and assigned by the database.
pub async fn insert<C: ConnectionTrait>(db: &C, m: Model) -> Result<Model, errors::ModelError> {
    if m.name.trim().is_empty() { return Err(errors::ModelError::Validation("pet name required".into())); }
    let am = ActiveModel {
        id: NotSet,
        name: Set(m.name),
        birth_date: Set(m.birth_date),
        type_id: Set(m.type_id),
        owner_id: Set(m.owner_id),
    };
    Ok(am.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, m: Model) -> Result<Model, errors::ModelError> {
    if m.name.trim().is_empty() { return Err(errors::ModelError::Validation("pet name required".into())); }
    let id = m.id;
    let am = ActiveModel {
        id: Unchanged(m.id),
        name: Set(m.name),
        birth_date: Set(m.birth_date),
        type_id: Set(m.type_id),
        owner_id: Set(m.owner_id),
    };
    am.update(db).await.map_err(|e| match errors::ModelError::from(e) {
        errors::ModelError::NotFound(_) => errors::ModelError::NotFound(format!("pet {id}")),
        other => other,
    })
}

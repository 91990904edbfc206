use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::{errors, pet};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pets,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Pets => Entity::has_many(pet::Entity).into() }
    }
}

impl Related<pet::Entity> for Entity {
    fn to() -> RelationDef { Relation::Pets.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// `LIKE` pattern matching names that start with `prefix`, with the
/// wildcards `%` and `_` and the escape char itself taken literally.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Owners whose last name starts with `prefix`, ignoring case, ordered by name.
/// Both sides are lowercased so SQLite and Postgres agree.
pub async fn find_by_last_name_prefix(db: &DatabaseConnection, prefix: &str) -> Result<Vec<Model>, errors::ModelError> {
    let lowered = Expr::expr(Func::lower(Expr::col((Entity, Column::LastName))));
    let found = Entity::find()
        .filter(lowered.like(LikeExpr::new(prefix_pattern(prefix)).escape('\\')))
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(found)
}

/// Insert a new owner; `m.id` is ignored and assigned by the database.
pub async fn insert<C: ConnectionTrait>(db: &C, m: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(m.first_name),
        last_name: Set(m.last_name),
        address: Set(m.address),
        city: Set(m.city),
        telephone: Set(m.telephone),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every column of an existing owner.
pub async fn update(db: &DatabaseConnection, m: Model) -> Result<Model, errors::ModelError> {
    let id = m.id;
    let am = ActiveModel {
        id: Unchanged(m.id),
        first_name: Set(m.first_name),
        last_name: Set(m.last_name),
        address: Set(m.address),
        city: Set(m.city),
        telephone: Set(m.telephone),
    };
    am.update(db).await.map_err(|e| match errors::ModelError::from(e) {
        errors::ModelError::NotFound(_) => errors::ModelError::NotFound(format!("owner {id}")),
        other => other,
    })
}

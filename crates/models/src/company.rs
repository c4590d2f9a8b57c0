use sea_orm::{entity::prelude::*, ColumnTrait, ConnectionTrait, NotSet, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, stock_market};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub sector: Option<String>,
    pub country: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { StockMarket }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::StockMarket => Entity::has_many(stock_market::Entity).into(),
        }
    }
}

impl Related<stock_market::Entity> for Entity {
    fn to() -> RelationDef { Relation::StockMarket.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// A name is usable when something other than whitespace remains.
pub fn validate_name(name: Option<&str>) -> Result<&str, errors::ModelError> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n),
        _ => Err(errors::ModelError::Validation("company name is required".into())),
    }
}

/// Exact, case-sensitive name match.
pub async fn exists_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, errors::ModelError> {
    let found = Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await?;
    Ok(found.is_some())
}

/// Insert a company; the id is always assigned by the database.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    sector: Option<String>,
    country: Option<String>,
) -> Result<Model, errors::ModelError> {
    validate_name(Some(name))?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        sector: Set(sector),
        country: Set(country),
    };
    Ok(am.insert(db).await?)
}

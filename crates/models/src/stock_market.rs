use sea_orm::{entity::prelude::*, ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{company, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_market")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    #[sea_orm(column_type = "Double")]
    pub open_value: f64,
    #[sea_orm(column_type = "Double")]
    pub close_value: f64,
    pub volume: i64,
    pub company_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Quotations of one company, oldest id first.
pub async fn find_by_company<C: ConnectionTrait>(db: &C, company_id: i64) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::CompanyId.eq(company_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

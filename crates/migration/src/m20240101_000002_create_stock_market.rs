//! Create `stock_market` table.
//! One row per daily quotation of a company.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockMarket::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockMarket::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(date(StockMarket::Date).not_null())
                    .col(double(StockMarket::OpenValue).not_null())
                    .col(double(StockMarket::CloseValue).not_null())
                    .col(big_integer(StockMarket::Volume).not_null())
                    .col(big_integer(StockMarket::CompanyId).not_null())
                    // Companies with quotations cannot be deleted
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_market_company")
                            .from(StockMarket::Table, StockMarket::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(StockMarket::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum StockMarket {
    Table,
    Id,
    Date,
    OpenValue,
    CloseValue,
    Volume,
    CompanyId,
}

#[derive(DeriveIden)]
enum Company { Table, Id }

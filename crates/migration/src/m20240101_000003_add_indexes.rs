use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // StockMarket: lookups by company
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_market_company_id")
                    .table(StockMarket::Table)
                    .col(StockMarket::CompanyId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // StockMarket: per-company history ordered by date
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_market_company_date")
                    .table(StockMarket::Table)
                    .col(StockMarket::CompanyId)
                    .col(StockMarket::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_stock_market_company_date").table(StockMarket::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_stock_market_company_id").table(StockMarket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StockMarket { Table, CompanyId, Date }

//! Lookup indexes for the listing filters.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_business_approved")
                    .table(Business::Table)
                    .col(Business::Approved)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_business_city")
                    .table(Business::Table)
                    .col(Business::City)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_business_id")
                    .table(Product::Table)
                    .col(Product::BusinessId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_business_id").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_business_city").table(Business::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_business_approved").table(Business::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Business { Table, Approved, City }

#[derive(DeriveIden)]
enum Product { Table, BusinessId }

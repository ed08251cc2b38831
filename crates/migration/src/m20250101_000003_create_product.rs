//! Create `product` table with FK to `business`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(uuid(Product::BusinessId))
                    .col(string_len(Product::Name, 200))
                    .col(double(Product::Price))
                    .col(string_len(Product::Category, 32))
                    .col(text(Product::Description))
                    .col(boolean(Product::Availability).default(true))
                    .col(timestamp_with_time_zone(Product::CreatedAt))
                    .col(timestamp_with_time_zone(Product::UpdatedAt))
                    .check(Expr::col(Product::Price).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_business")
                            .from(Product::Table, Product::BusinessId)
                            .to(Business::Table, Business::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    BusinessId,
    Name,
    Price,
    Category,
    Description,
    Availability,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Business { Table, Id }

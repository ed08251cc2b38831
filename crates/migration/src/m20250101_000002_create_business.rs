//! Create `business` table with FK to `user`.
//!
//! `owner_id` is unique: an owner has at most one storefront. Deleting the
//! owner removes the business.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Business::Table)
                    .if_not_exists()
                    .col(uuid(Business::Id).primary_key())
                    .col(uuid(Business::OwnerId).unique_key())
                    .col(string_len(Business::Name, 200))
                    .col(string_len(Business::Category, 32))
                    .col(string_len(Business::Address, 255))
                    .col(string_len(Business::City, 128))
                    .col(string_len_null(Business::Phone, 32))
                    .col(text_null(Business::Description))
                    .col(boolean(Business::Approved).default(false))
                    .col(timestamp_with_time_zone(Business::CreatedAt))
                    .col(timestamp_with_time_zone(Business::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_business_owner")
                            .from(Business::Table, Business::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Business::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Business {
    Table,
    Id,
    OwnerId,
    Name,
    Category,
    Address,
    City,
    Phone,
    Description,
    Approved,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }

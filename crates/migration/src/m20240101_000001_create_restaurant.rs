//! Create `restaurant` table.
//! Menu items are embedded as a JSONB array on the owning row.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurant::Table)
                    .if_not_exists()
                    .col(uuid(Restaurant::Id).primary_key())
                    .col(uuid(Restaurant::OwnerId).not_null())
                    .col(string_len(Restaurant::Name, 256).not_null())
                    .col(string_len(Restaurant::Image, 2048).not_null())
                    .col(text(Restaurant::Description).not_null())
                    .col(string_len(Restaurant::Category, 16).not_null())
                    .col(json_binary(Restaurant::Menu).not_null())
                    .col(timestamp_with_time_zone(Restaurant::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Restaurant::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Restaurant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    Id,
    OwnerId,
    Name,
    Image,
    Description,
    Category,
    Menu,
    CreatedAt,
    UpdatedAt,
}

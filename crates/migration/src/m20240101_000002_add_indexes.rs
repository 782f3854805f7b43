use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Restaurant: ownership lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_owner")
                    .table(Restaurant::Table)
                    .col(Restaurant::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Restaurant: name existence check on create. Not unique; uniqueness is
        // enforced by the service's lookup.
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_name")
                    .table(Restaurant::Table)
                    .col(Restaurant::Name)
                    .to_owned(),
            )
            .await?;

        // Restaurant: stable paging order
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurant_created")
                    .table(Restaurant::Table)
                    .col(Restaurant::CreatedAt)
                    .col(Restaurant::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_restaurant_created", "idx_restaurant_name", "idx_restaurant_owner"] {
            manager
                .drop_index(Index::drop().name(name).table(Restaurant::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Restaurant {
    Table,
    Id,
    OwnerId,
    Name,
    CreatedAt,
}

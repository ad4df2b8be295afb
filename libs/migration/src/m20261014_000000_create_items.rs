use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create item_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(ItemStatus::Enum)
                    .values([ItemStatus::Active, ItemStatus::Inactive])
                    .to_owned(),
            )
            .await?;

        // Create items table
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Items::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Items::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Items::Description).text().null())
                    .col(
                        ColumnDef::new(Items::Status)
                            .enumeration(ItemStatus::Enum, [ItemStatus::Active, ItemStatus::Inactive])
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        timestamp_with_time_zone(Items::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Items::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is newest first, optionally filtered by status
        manager
            .create_index(
                Index::create()
                    .name("idx_items_created_at")
                    .table(Items::Table)
                    .col(Items::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_status_created_at")
                    .table(Items::Table)
                    .col(Items::Status)
                    .col(Items::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ItemStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    Name,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ItemStatus {
    #[sea_orm(iden = "item_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "inactive")]
    Inactive,
}

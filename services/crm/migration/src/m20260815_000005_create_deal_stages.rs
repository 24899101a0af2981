use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DealStages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DealStages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DealStages::Name).string().not_null())
                    .col(ColumnDef::new(DealStages::OrderIndex).integer().not_null())
                    .col(
                        ColumnDef::new(DealStages::Color)
                            .string()
                            .not_null()
                            .default("#808080"),
                    )
                    .col(
                        ColumnDef::new(DealStages::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DealStages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(DealStages::CompanyOwnerId).uuid().null())
                    .col(
                        ColumnDef::new(DealStages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DealStages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DealStages {
    Table,
    Id,
    Name,
    OrderIndex,
    Color,
    IsDefault,
    IsActive,
    CompanyOwnerId,
    CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BrandingSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BrandingSettings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BrandingSettings::OrgName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BrandingSettings::PrimaryColor)
                            .string()
                            .not_null()
                            .default("#1f2937"),
                    )
                    .col(
                        ColumnDef::new(BrandingSettings::AccentColor)
                            .string()
                            .not_null()
                            .default("#2563eb"),
                    )
                    .col(ColumnDef::new(BrandingSettings::LogoUrl).string().null())
                    .col(
                        ColumnDef::new(BrandingSettings::UpdatedAt)
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
            .drop_table(Table::drop().table(BrandingSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BrandingSettings {
    Table,
    Id,
    OrgName,
    PrimaryColor,
    AccentColor,
    LogoUrl,
    UpdatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::ClientId).string().not_null())
                    .col(ColumnDef::new(Submissions::ErrorMessage).text().not_null())
                    .col(ColumnDef::new(Submissions::Language).string().not_null())
                    .col(ColumnDef::new(Submissions::Explanation).text().not_null())
                    .col(ColumnDef::new(Submissions::Causes).json().not_null())
                    .col(ColumnDef::new(Submissions::Solutions).json().not_null())
                    .col(
                        ColumnDef::new(Submissions::Severity)
                            .string()
                            .not_null()
                            .default("medium"),
                    )
                    .col(
                        ColumnDef::new(Submissions::Category)
                            .string()
                            .not_null()
                            .default("Runtime Error"),
                    )
                    .col(ColumnDef::new(Submissions::ExampleCode).text().null())
                    .col(
                        ColumnDef::new(Submissions::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::IsShared)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Submissions::ShareId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::SharedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_client_created")
                    .table(Submissions::Table)
                    .col(Submissions::ClientId)
                    .col(Submissions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    ClientId,
    ErrorMessage,
    Language,
    Explanation,
    Causes,
    Solutions,
    Severity,
    Category,
    ExampleCode,
    IsPrivate,
    IsShared,
    ShareId,
    SharedAt,
    CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuotaRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuotaRecords::ClientId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuotaRecords::Requests).json().not_null())
                    .col(
                        ColumnDef::new(QuotaRecords::LastReset)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuotaRecords::Version)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(QuotaRecords::UpdatedAt)
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
            .drop_table(Table::drop().table(QuotaRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum QuotaRecords {
    Table,
    ClientId,
    Requests,
    LastReset,
    Version,
    UpdatedAt,
}

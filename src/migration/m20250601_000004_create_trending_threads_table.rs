use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum TrendingThreads {
    Table,
    Id,
    Title,
    Author,
    Category,
    Replies,
    LastActive,
    IsHot,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrendingThreads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrendingThreads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::Author)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::Category)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::Replies)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::LastActive)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::IsHot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TrendingThreads::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrendingThreads::Table).to_owned())
            .await
    }
}

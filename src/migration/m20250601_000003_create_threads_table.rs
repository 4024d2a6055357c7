use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Threads {
    Table,
    Id,
    CategoryId,
    Title,
    Content,
    Author,
    Likes,
    Views,
    Replies,
    Tags,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Threads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Threads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Threads::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Threads::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Threads::Content).text().not_null())
                    .col(ColumnDef::new(Threads::Author).json_binary().not_null())
                    .col(
                        ColumnDef::new(Threads::Likes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Threads::Views)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Threads::Replies).json_binary().not_null())
                    .col(ColumnDef::new(Threads::Tags).json_binary().not_null())
                    .col(
                        ColumnDef::new(Threads::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Threads::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_threads_category")
                            .from(Threads::Table, Threads::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_threads_category_id")
                    .table(Threads::Table)
                    .col(Threads::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Threads::Table).to_owned())
            .await
    }
}

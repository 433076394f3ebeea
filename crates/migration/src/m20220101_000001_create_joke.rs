//! Create `joke` table.
//!
//! The only domain table; `id` is a database-assigned serial key.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Joke::Table)
                    .if_not_exists()
                    .col(pk_auto(Joke::Id))
                    .col(text(Joke::Question).not_null())
                    .col(text(Joke::Answer).not_null())
                    .col(text_null(Joke::Author))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Joke::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Joke { Table, Id, Question, Answer, Author }

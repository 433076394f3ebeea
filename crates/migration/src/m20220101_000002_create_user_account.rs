//! Create `user_account` table.
//!
//! Holds the accounts allowed to create, edit and delete jokes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccount::Table)
                    .if_not_exists()
                    .col(uuid(UserAccount::Id).primary_key())
                    .col(string_len(UserAccount::Email, 256).unique_key().not_null())
                    .col(string_len(UserAccount::Name, 128).not_null())
                    .col(string_len(UserAccount::PasswordHash, 256).not_null())
                    .col(timestamp_with_time_zone(UserAccount::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserAccount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserAccount { Table, Id, Email, Name, PasswordHash, CreatedAt }

//! Create `card` table.
//!
//! Discount/membership cards; linked to products through `card_product`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Card::Table)
                    .if_not_exists()
                    .col(big_integer(Card::Id).primary_key().auto_increment())
                    .col(string_len(Card::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Card::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Card { Table, Id, Name }

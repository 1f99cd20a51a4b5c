//! Create `card_product` association table.
//!
//! One row per (card, product) edge; the composite primary key keeps each
//! pair unique. Both foreign keys cascade so the database never keeps an edge
//! to a deleted row, even outside the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CardProduct::Table)
                    .if_not_exists()
                    .col(big_integer(CardProduct::CardId).not_null())
                    .col(big_integer(CardProduct::ProductId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_card_product")
                            .col(CardProduct::CardId)
                            .col(CardProduct::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_product_card")
                            .from(CardProduct::Table, CardProduct::CardId)
                            .to(Card::Table, Card::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_product_product")
                            .from(CardProduct::Table, CardProduct::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Product -> cards lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_card_product_product")
                    .table(CardProduct::Table)
                    .col(CardProduct::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CardProduct::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CardProduct { Table, CardId, ProductId }

#[derive(DeriveIden)]
enum Card { Table, Id }

#[derive(DeriveIden)]
enum Product { Table, Id }

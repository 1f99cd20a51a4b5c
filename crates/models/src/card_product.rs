//! Association rows between cards and products.
//!
//! A single row serves both directions of the many-to-many relation, so
//! "card C lists product P" and "product P lists card C" cannot disagree.
use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set,
};
use serde::{Deserialize, Serialize};

use crate::{card, errors, product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "card_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub card_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Card,
    Product,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Card => Entity::belongs_to(card::Entity).from(Column::CardId).to(card::Column::Id).into(),
            Relation::Product => Entity::belongs_to(product::Entity).from(Column::ProductId).to(product::Column::Id).into(),
        }
    }
}

impl Related<card::Entity> for Entity {
    fn to() -> RelationDef { Relation::Card.def() }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { Relation::Product.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert the edge; an existing edge is left as is.
pub async fn link<C: ConnectionTrait>(db: &C, card_id: i64, product_id: i64) -> Result<(), errors::ModelError> {
    let am = ActiveModel {
        card_id: Set(card_id),
        product_id: Set(product_id),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::CardId, Column::ProductId])
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

/// Remove the edge if present. Returns whether a row was deleted.
pub async fn unlink<C: ConnectionTrait>(db: &C, card_id: i64, product_id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::CardId.eq(card_id))
        .filter(Column::ProductId.eq(product_id))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

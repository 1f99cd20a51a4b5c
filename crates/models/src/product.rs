use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{card, card_product, errors, validation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CardProduct,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::CardProduct => Entity::has_many(card_product::Entity).into() }
    }
}

impl Related<card_product::Entity> for Entity {
    fn to() -> RelationDef { Relation::CardProduct.def() }
}

impl Related<card::Entity> for Entity {
    fn to() -> RelationDef { card_product::Relation::Card.def() }

    fn via() -> Option<RelationDef> { Some(card_product::Relation::Product.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    validation::validate_name(name)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

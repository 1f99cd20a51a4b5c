use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionError, TransactionTrait,
};

use models::{card, card_product, product};

use crate::cards::domain::{Card, Product};
use crate::cards::repository::{CardRepository, ProductRepository};
use crate::errors::ServiceError;

/// SeaORM-backed implementation of both repositories.
///
/// Writes touching more than one row run inside a single transaction.
#[derive(Clone)]
pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

fn db_err(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Db(e.to_string())
}

fn txn_err(e: TransactionError<ServiceError>) -> ServiceError {
    match e {
        TransactionError::Connection(e) => db_err(e),
        TransactionError::Transaction(e) => e,
    }
}

#[async_trait::async_trait]
impl CardRepository for SeaOrmRepository {
    async fn list_cards(&self) -> Result<Vec<Card>, ServiceError> {
        let rows = card::Entity::find()
            .order_by_asc(card::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    async fn find_card(&self, id: i64) -> Result<Option<Card>, ServiceError> {
        let found = card::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Card::from))
    }

    async fn insert_card(&self, name: &str, product_id: Option<i64>) -> Result<Card, ServiceError> {
        let Some(product_id) = product_id else {
            return Ok(card::create(&self.db, name).await?.into());
        };
        let name = name.to_string();
        let created = self
            .db
            .transaction::<_, card::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let created = card::create(txn, &name).await?;
                    card_product::link(txn, created.id, product_id).await?;
                    Ok(created)
                })
            })
            .await
            .map_err(txn_err)?;
        Ok(created.into())
    }

    async fn rename_card(&self, id: i64, name: &str) -> Result<Card, ServiceError> {
        let mut am: card::ActiveModel = card::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::card_not_found(id))?
            .into();
        am.name = Set(name.to_string());
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(updated.into())
    }

    async fn products_of_card(&self, id: i64) -> Result<Vec<Product>, ServiceError> {
        let found = card::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::card_not_found(id))?;
        let rows = found
            .find_related(product::Entity)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn delete_card_cascade(&self, id: i64) -> Result<Option<u64>, ServiceError> {
        self.db
            .transaction::<_, Option<u64>, ServiceError>(move |txn| {
                Box::pin(async move {
                    let detached = card_product::Entity::delete_many()
                        .filter(card_product::Column::CardId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(db_err)?
                        .rows_affected;
                    let deleted = card::Entity::delete_by_id(id).exec(txn).await.map_err(db_err)?.rows_affected;
                    Ok((deleted > 0).then_some(detached))
                })
            })
            .await
            .map_err(txn_err)
    }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmRepository {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        let found = product::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Product::from))
    }

    async fn insert_product(&self, name: &str) -> Result<Product, ServiceError> {
        Ok(product::create(&self.db, name).await?.into())
    }

    async fn cards_of_product(&self, id: i64) -> Result<Vec<Card>, ServiceError> {
        let found = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::product_not_found(id))?;
        let rows = found
            .find_related(card::Entity)
            .order_by_asc(card::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Card::from).collect())
    }

    async fn link(&self, product_id: i64, card_id: i64) -> Result<(), ServiceError> {
        card_product::link(&self.db, card_id, product_id).await?;
        Ok(())
    }

    async fn unlink(&self, product_id: i64, card_id: i64) -> Result<bool, ServiceError> {
        Ok(card_product::unlink(&self.db, card_id, product_id).await?)
    }

    async fn delete_product_cascade(&self, id: i64) -> Result<Option<u64>, ServiceError> {
        self.db
            .transaction::<_, Option<u64>, ServiceError>(move |txn| {
                Box::pin(async move {
                    let detached = card_product::Entity::delete_many()
                        .filter(card_product::Column::ProductId.eq(id))
                        .exec(txn)
                        .await
                        .map_err(db_err)?
                        .rows_affected;
                    let deleted = product::Entity::delete_by_id(id).exec(txn).await.map_err(db_err)?.rows_affected;
                    Ok((deleted > 0).then_some(detached))
                })
            })
            .await
            .map_err(txn_err)
    }
}

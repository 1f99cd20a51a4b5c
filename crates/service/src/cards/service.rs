use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{AttachCard, Card, Product};
use super::repository::{CardRepository, ProductRepository};
use crate::errors::ServiceError;

/// Card/product relationship rules, independent of web framework.
///
/// Holds no state of its own between calls; both repositories are injected.
pub struct RelationshipService<C: CardRepository, P: ProductRepository> {
    cards: Arc<C>,
    products: Arc<P>,
}

impl<C: CardRepository, P: ProductRepository> RelationshipService<C, P> {
    pub fn new(cards: Arc<C>, products: Arc<P>) -> Self { Self { cards, products } }

    pub async fn list_cards(&self) -> Result<Vec<Card>, ServiceError> {
        self.cards.list_cards().await
    }

    pub async fn get_card(&self, id: i64) -> Result<Card, ServiceError> {
        self.cards.find_card(id).await?.ok_or_else(|| ServiceError::card_not_found(id))
    }

    pub async fn list_products_of_card(&self, id: i64) -> Result<Vec<Product>, ServiceError> {
        self.get_card(id).await?;
        self.cards.products_of_card(id).await
    }

    /// Create a card that is not attached to any product yet.
    #[instrument(skip(self))]
    pub async fn create_card(&self, name: &str) -> Result<Card, ServiceError> {
        models::validation::validate_name(name)?;
        let card = self.cards.insert_card(name, None).await?;
        info!(card_id = card.id, "card_created");
        Ok(card)
    }

    /// Attach an existing card to a product, or create a new card already
    /// attached to it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::cards::{domain::AttachCard, repository::mock::InMemoryRepository, RelationshipService};
    /// let repo = Arc::new(InMemoryRepository::default());
    /// let svc = RelationshipService::new(repo.clone(), repo);
    /// let product = tokio_test::block_on(svc.create_product("Coffee")).unwrap();
    /// let card = tokio_test::block_on(svc.attach_card(product.id, AttachCard::New { name: "Gold".into() })).unwrap();
    /// assert_eq!(card.name, "Gold");
    /// let products = tokio_test::block_on(svc.list_products_of_card(card.id)).unwrap();
    /// assert_eq!(products, vec![product]);
    /// ```
    #[instrument(skip(self))]
    pub async fn attach_card(&self, product_id: i64, payload: AttachCard) -> Result<Card, ServiceError> {
        self.products
            .find_product(product_id)
            .await?
            .ok_or_else(|| ServiceError::product_missing(product_id))?;

        match payload {
            AttachCard::Existing { id } => {
                let card = self.get_card(id).await?;
                self.products.link(product_id, card.id).await?;
                info!(card_id = card.id, product_id, "card_attached");
                Ok(card)
            }
            AttachCard::New { name } => {
                models::validation::validate_name(&name)?;
                let card = self.cards.insert_card(&name, Some(product_id)).await?;
                info!(card_id = card.id, product_id, "card_created_and_attached");
                Ok(card)
            }
        }
    }

    /// Replace the name only; associations are untouched.
    #[instrument(skip(self))]
    pub async fn rename_card(&self, id: i64, name: &str) -> Result<Card, ServiceError> {
        self.get_card(id).await?;
        models::validation::validate_name(name)?;
        let card = self.cards.rename_card(id, name).await?;
        info!(card_id = id, "card_renamed");
        Ok(card)
    }

    /// Delete a card and every association pointing at it.
    #[instrument(skip(self))]
    pub async fn delete_card(&self, id: i64) -> Result<(), ServiceError> {
        let detached = self
            .cards
            .delete_card_cascade(id)
            .await?
            .ok_or_else(|| ServiceError::card_not_found(id))?;
        info!(card_id = id, detached, "card_deleted");
        Ok(())
    }

    /// Remove the card from the product. Detaching a pair that is not
    /// associated succeeds without changes.
    #[instrument(skip(self))]
    pub async fn detach_card_from_product(&self, product_id: i64, card_id: i64) -> Result<(), ServiceError> {
        self.get_card(card_id).await?;
        self.products
            .find_product(product_id)
            .await?
            .ok_or_else(|| ServiceError::product_missing(product_id))?;

        let removed = self.products.unlink(product_id, card_id).await?;
        if removed {
            info!(card_id, product_id, "card_detached");
        } else {
            debug!(card_id, product_id, "card was not attached; nothing to detach");
        }
        Ok(())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.products.list_products().await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ServiceError> {
        self.products.find_product(id).await?.ok_or_else(|| ServiceError::product_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, name: &str) -> Result<Product, ServiceError> {
        models::validation::validate_name(name)?;
        let product = self.products.insert_product(name).await?;
        info!(product_id = product.id, "product_created");
        Ok(product)
    }

    pub async fn list_cards_of_product(&self, id: i64) -> Result<Vec<Card>, ServiceError> {
        self.get_product(id).await?;
        self.products.cards_of_product(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        let detached = self
            .products
            .delete_product_cascade(id)
            .await?
            .ok_or_else(|| ServiceError::product_not_found(id))?;
        info!(product_id = id, detached, "product_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::repository::mock::InMemoryRepository;

    type Svc = RelationshipService<InMemoryRepository, InMemoryRepository>;

    fn svc() -> (Svc, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::default());
        (RelationshipService::new(repo.clone(), repo.clone()), repo)
    }

    #[tokio::test]
    async fn attach_new_card_links_both_sides() -> Result<(), ServiceError> {
        let (svc, _) = svc();
        let p = svc.create_product("Coffee").await?;

        let card = svc.attach_card(p.id, AttachCard::New { name: "Gold".into() }).await?;
        assert_eq!(card.name, "Gold");

        assert_eq!(svc.list_products_of_card(card.id).await?, vec![p.clone()]);
        assert_eq!(svc.list_cards_of_product(p.id).await?, vec![card]);
        Ok(())
    }

    #[tokio::test]
    async fn attach_existing_card_returns_it_unchanged() -> Result<(), ServiceError> {
        let (svc, repo) = svc();
        let p1 = svc.create_product("Coffee").await?;
        let p2 = svc.create_product("Tea").await?;
        let card = svc.create_card("Gold").await?;

        let attached = svc.attach_card(p1.id, AttachCard::Existing { id: card.id }).await?;
        assert_eq!(attached, card);
        svc.attach_card(p2.id, AttachCard::Existing { id: card.id }).await?;
        // second attach to the same product keeps a single edge
        svc.attach_card(p2.id, AttachCard::Existing { id: card.id }).await?;

        assert_eq!(svc.list_products_of_card(card.id).await?, vec![p1, p2]);
        assert_eq!(repo.edge_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn attach_to_missing_product_is_invalid_argument() {
        let (svc, repo) = svc();
        let err = svc.attach_card(4, AttachCard::New { name: "Gold".into() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Product with id 4 not found");
        assert!(svc.list_cards().await.unwrap().is_empty());
        assert_eq!(repo.edge_count(), 0);
    }

    #[tokio::test]
    async fn attach_missing_card_is_not_found() {
        let (svc, _) = svc();
        let p = svc.create_product("Coffee").await.unwrap();
        let err = svc.attach_card(p.id, AttachCard::Existing { id: 42 }).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Card with id 42 not found");
    }

    #[tokio::test]
    async fn attach_new_with_blank_name_is_rejected() {
        let (svc, _) = svc();
        let p = svc.create_product("Coffee").await.unwrap();
        let err = svc.attach_card(p.id, AttachCard::New { name: " ".into() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
        assert!(svc.list_cards().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_keeps_id_and_associations() -> Result<(), ServiceError> {
        let (svc, _) = svc();
        let p = svc.create_product("Coffee").await?;
        let card = svc.attach_card(p.id, AttachCard::New { name: "Gold".into() }).await?;

        let renamed = svc.rename_card(card.id, "Platinum").await?;
        assert_eq!(renamed, Card { id: card.id, name: "Platinum".into() });

        let fetched = svc.get_card(card.id).await?;
        assert_eq!(fetched.name, "Platinum");
        assert_eq!(svc.list_products_of_card(card.id).await?, vec![p]);
        Ok(())
    }

    #[tokio::test]
    async fn rename_missing_card_is_not_found() {
        let (svc, _) = svc();
        let err = svc.rename_card(7, "Platinum").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_cascades_from_every_product() -> Result<(), ServiceError> {
        let (svc, repo) = svc();
        let p1 = svc.create_product("Coffee").await?;
        let p2 = svc.create_product("Tea").await?;
        let gold = svc.attach_card(p1.id, AttachCard::New { name: "Gold".into() }).await?;
        svc.attach_card(p2.id, AttachCard::Existing { id: gold.id }).await?;
        let silver = svc.attach_card(p2.id, AttachCard::New { name: "Silver".into() }).await?;

        svc.delete_card(gold.id).await?;

        assert!(matches!(svc.get_card(gold.id).await, Err(ServiceError::NotFound(_))));
        assert!(svc.list_cards_of_product(p1.id).await?.is_empty());
        assert_eq!(svc.list_cards_of_product(p2.id).await?, vec![silver.clone()]);
        assert_eq!(svc.list_products_of_card(silver.id).await?, vec![p2]);
        assert_eq!(repo.edge_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_card_is_not_found() {
        let (svc, _) = svc();
        assert!(matches!(svc.delete_card(1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found_the_second_time() -> Result<(), ServiceError> {
        let (svc, _) = svc();
        let p = svc.create_product("Coffee").await?;
        let card = svc.attach_card(p.id, AttachCard::New { name: "Gold".into() }).await?;

        svc.delete_card(card.id).await?;
        let err = svc.delete_card(card.id).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Card with id {} not found", card.id));

        svc.delete_product(p.id).await?;
        assert!(matches!(svc.delete_product(p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn detach_is_idempotent() -> Result<(), ServiceError> {
        let (svc, _) = svc();
        let p = svc.create_product("Coffee").await?;
        let card = svc.attach_card(p.id, AttachCard::New { name: "Gold".into() }).await?;

        svc.detach_card_from_product(p.id, card.id).await?;
        svc.detach_card_from_product(p.id, card.id).await?;

        assert!(svc.list_products_of_card(card.id).await?.is_empty());
        // the card itself survives
        assert_eq!(svc.get_card(card.id).await?, card);
        Ok(())
    }

    #[tokio::test]
    async fn detach_checks_card_before_product() {
        let (svc, _) = svc();
        let err = svc.detach_card_from_product(1, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let card = svc.create_card("Gold").await.unwrap();
        let err = svc.detach_card_from_product(9, card.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn delete_product_detaches_its_cards() -> Result<(), ServiceError> {
        let (svc, repo) = svc();
        let p = svc.create_product("Coffee").await?;
        let card = svc.attach_card(p.id, AttachCard::New { name: "Gold".into() }).await?;

        svc.delete_product(p.id).await?;

        assert!(matches!(svc.get_product(p.id).await, Err(ServiceError::NotFound(_))));
        assert!(svc.list_products_of_card(card.id).await?.is_empty());
        assert_eq!(repo.edge_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn list_cards_returns_everything() -> Result<(), ServiceError> {
        let (svc, _) = svc();
        svc.create_card("Gold").await?;
        svc.create_card("Silver").await?;
        let names: Vec<String> = svc.list_cards().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Gold", "Silver"]);
        Ok(())
    }
}

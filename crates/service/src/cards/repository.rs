use async_trait::async_trait;

use super::domain::{Card, Product};
use crate::errors::ServiceError;

/// Card persistence.
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn list_cards(&self) -> Result<Vec<Card>, ServiceError>;
    async fn find_card(&self, id: i64) -> Result<Option<Card>, ServiceError>;
    /// Insert a card; when `product_id` is given the association is written
    /// in the same transaction.
    async fn insert_card(&self, name: &str, product_id: Option<i64>) -> Result<Card, ServiceError>;
    async fn rename_card(&self, id: i64, name: &str) -> Result<Card, ServiceError>;
    async fn products_of_card(&self, id: i64) -> Result<Vec<Product>, ServiceError>;
    /// Drop every association of the card and the card itself, atomically.
    /// Returns how many products were detached, or `None` when no card row
    /// was deleted.
    async fn delete_card_cascade(&self, id: i64) -> Result<Option<u64>, ServiceError>;
}

/// Product persistence, including the association edges.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_product(&self, id: i64) -> Result<Option<Product>, ServiceError>;
    async fn insert_product(&self, name: &str) -> Result<Product, ServiceError>;
    async fn cards_of_product(&self, id: i64) -> Result<Vec<Card>, ServiceError>;
    /// Idempotent.
    async fn link(&self, product_id: i64, card_id: i64) -> Result<(), ServiceError>;
    /// Returns false when the pair was not associated.
    async fn unlink(&self, product_id: i64, card_id: i64) -> Result<bool, ServiceError>;
    /// Same contract as [`CardRepository::delete_card_cascade`].
    async fn delete_product_cascade(&self, id: i64) -> Result<Option<u64>, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        cards: BTreeMap<i64, Card>,
        products: BTreeMap<i64, Product>,
        edges: BTreeSet<(i64, i64)>, // (card_id, product_id)
        last_card_id: i64,
        last_product_id: i64,
    }

    /// Implements both repository traits over one lock, so every write is atomic.
    #[derive(Default)]
    pub struct InMemoryRepository {
        state: Mutex<State>,
    }

    impl InMemoryRepository {
        fn lock(&self) -> std::sync::MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Number of association rows, for assertions.
        pub fn edge_count(&self) -> usize { self.lock().edges.len() }
    }

    #[async_trait]
    impl CardRepository for InMemoryRepository {
        async fn list_cards(&self) -> Result<Vec<Card>, ServiceError> {
            Ok(self.lock().cards.values().cloned().collect())
        }

        async fn find_card(&self, id: i64) -> Result<Option<Card>, ServiceError> {
            Ok(self.lock().cards.get(&id).cloned())
        }

        async fn insert_card(&self, name: &str, product_id: Option<i64>) -> Result<Card, ServiceError> {
            let mut st = self.lock();
            if let Some(pid) = product_id {
                if !st.products.contains_key(&pid) {
                    return Err(ServiceError::Db(format!("foreign key violation: product {}", pid)));
                }
            }
            st.last_card_id += 1;
            let card = Card { id: st.last_card_id, name: name.to_string() };
            st.cards.insert(card.id, card.clone());
            if let Some(pid) = product_id {
                st.edges.insert((card.id, pid));
            }
            Ok(card)
        }

        async fn rename_card(&self, id: i64, name: &str) -> Result<Card, ServiceError> {
            let mut st = self.lock();
            let card = st.cards.get_mut(&id).ok_or_else(|| ServiceError::card_not_found(id))?;
            card.name = name.to_string();
            Ok(card.clone())
        }

        async fn products_of_card(&self, id: i64) -> Result<Vec<Product>, ServiceError> {
            let st = self.lock();
            if !st.cards.contains_key(&id) {
                return Err(ServiceError::card_not_found(id));
            }
            Ok(st
                .edges
                .iter()
                .filter(|(c, _)| *c == id)
                .filter_map(|(_, p)| st.products.get(p).cloned())
                .collect())
        }

        async fn delete_card_cascade(&self, id: i64) -> Result<Option<u64>, ServiceError> {
            let mut st = self.lock();
            if st.cards.remove(&id).is_none() {
                return Ok(None);
            }
            let before = st.edges.len();
            st.edges.retain(|(c, _)| *c != id);
            Ok(Some((before - st.edges.len()) as u64))
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryRepository {
        async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
            Ok(self.lock().products.values().cloned().collect())
        }

        async fn find_product(&self, id: i64) -> Result<Option<Product>, ServiceError> {
            Ok(self.lock().products.get(&id).cloned())
        }

        async fn insert_product(&self, name: &str) -> Result<Product, ServiceError> {
            let mut st = self.lock();
            st.last_product_id += 1;
            let product = Product { id: st.last_product_id, name: name.to_string() };
            st.products.insert(product.id, product.clone());
            Ok(product)
        }

        async fn cards_of_product(&self, id: i64) -> Result<Vec<Card>, ServiceError> {
            let st = self.lock();
            if !st.products.contains_key(&id) {
                return Err(ServiceError::product_not_found(id));
            }
            Ok(st
                .edges
                .iter()
                .filter(|(_, p)| *p == id)
                .filter_map(|(c, _)| st.cards.get(c).cloned())
                .collect())
        }

        async fn link(&self, product_id: i64, card_id: i64) -> Result<(), ServiceError> {
            let mut st = self.lock();
            if !st.cards.contains_key(&card_id) || !st.products.contains_key(&product_id) {
                return Err(ServiceError::Db("foreign key violation".into()));
            }
            st.edges.insert((card_id, product_id));
            Ok(())
        }

        async fn unlink(&self, product_id: i64, card_id: i64) -> Result<bool, ServiceError> {
            Ok(self.lock().edges.remove(&(card_id, product_id)))
        }

        async fn delete_product_cascade(&self, id: i64) -> Result<Option<u64>, ServiceError> {
            let mut st = self.lock();
            if st.products.remove(&id).is_none() {
                return Ok(None);
            }
            let before = st.edges.len();
            st.edges.retain(|(_, p)| *p != id);
            Ok(Some((before - st.edges.len()) as u64))
        }
    }
}

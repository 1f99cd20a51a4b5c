use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::cards::{repo::seaorm::SeaOrmRepository, RelationshipService};

pub type Relationships = RelationshipService<SeaOrmRepository, SeaOrmRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub relationships: Arc<Relationships>,
}

impl ServerState {
    /// Wire the SeaORM repository into the relationship service.
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmRepository { db: db.clone() });
        let relationships = Arc::new(RelationshipService::new(Arc::clone(&repo), repo));
        Self { db, relationships }
    }
}

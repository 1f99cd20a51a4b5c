use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn card_not_found(id: i64) -> Self { Self::NotFound(format!("Card with id {} not found", id)) }

    pub fn product_not_found(id: i64) -> Self { Self::NotFound(format!("Product with id {} not found", id)) }

    /// Product referenced while operating on a card, not the primary target.
    pub fn product_missing(id: i64) -> Self { Self::InvalidArgument(format!("Product with id {} not found", id)) }
}

//! Service layer for cards, products and the associations between them.
//! - Keeps relationship rules out of the HTTP layer.
//! - Persistence sits behind repository traits injected at construction.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
pub mod cards;
#[cfg(test)]
pub mod test_support;

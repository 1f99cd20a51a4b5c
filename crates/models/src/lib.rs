pub mod errors;
pub mod db;
pub mod validation;
pub mod card;
pub mod product;
pub mod card_product;

#[cfg(test)]
mod tests;

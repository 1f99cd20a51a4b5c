use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, Json};
use service::cards::domain::{AttachCard, Card, NameInput, Product};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses((status = 200, description = "All products", body = [crate::openapi::ProductDoc]))
)]
pub async fn list_products(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state.relationships.list_products().await?;
    info!(count = products.len(), "list products");
    Ok(Json(products))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::NameInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_product(
    State(state): State<ServerState>,
    input: Result<Json<NameInput>, JsonRejection>,
) -> Result<Json<Product>, JsonApiError> {
    let Json(input) = input?;
    Ok(Json(state.relationships.create_product(&input.name).await?))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_product(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.relationships.get_product(id).await?))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted, cards detached"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_product(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.relationships.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/products/{id}/cards", tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Cards attached to the product", body = [crate::openapi::CardDoc]),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list_product_cards(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Card>>, JsonApiError> {
    Ok(Json(state.relationships.list_cards_of_product(id).await?))
}

/// `{"id": n}` attaches card n; `{"name": ".."}` creates a card on the product.
#[utoipa::path(
    post, path = "/products/{id}/cards", tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = crate::openapi::AttachCardDoc,
    responses(
        (status = 200, description = "Attached or created", body = crate::openapi::CardDoc),
        (status = 400, description = "Product missing, invalid name or undecodable body"),
        (status = 404, description = "Card missing")
    )
)]
pub async fn attach_card(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
    payload: Result<Json<AttachCard>, JsonRejection>,
) -> Result<Json<Card>, JsonApiError> {
    let Json(payload) = payload?;
    let card = state.relationships.attach_card(product_id, payload).await?;
    Ok(Json(card))
}

#[utoipa::path(
    delete, path = "/products/{id}/cards/{card_id}", tag = "products",
    params(
        ("id" = i64, Path, description = "Product ID"),
        ("card_id" = i64, Path, description = "Card ID")
    ),
    responses(
        (status = 204, description = "Detached (also when not attached)"),
        (status = 400, description = "Product missing"),
        (status = 404, description = "Card missing")
    )
)]
pub async fn detach_card(
    State(state): State<ServerState>,
    Path((product_id, card_id)): Path<(i64, i64)>,
) -> Result<StatusCode, JsonApiError> {
    state.relationships.detach_card_from_product(product_id, card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, Json};
use service::cards::domain::{Card, NameInput, Product};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/cards", tag = "cards",
    responses((status = 200, description = "All cards", body = [crate::openapi::CardDoc]))
)]
pub async fn list_cards(State(state): State<ServerState>) -> Result<Json<Vec<Card>>, JsonApiError> {
    let cards = state.relationships.list_cards().await?;
    info!(count = cards.len(), "list cards");
    Ok(Json(cards))
}

#[utoipa::path(
    post, path = "/cards", tag = "cards",
    request_body = crate::openapi::NameInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CardDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_card(
    State(state): State<ServerState>,
    input: Result<Json<NameInput>, JsonRejection>,
) -> Result<Json<Card>, JsonApiError> {
    let Json(input) = input?;
    let card = state.relationships.create_card(&input.name).await?;
    Ok(Json(card))
}

#[utoipa::path(
    get, path = "/cards/{id}", tag = "cards",
    params(("id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CardDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_card(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Card>, JsonApiError> {
    Ok(Json(state.relationships.get_card(id).await?))
}

#[utoipa::path(
    get, path = "/cards/{id}/products", tag = "cards",
    params(("id" = i64, Path, description = "Card ID")),
    responses(
        (status = 200, description = "Products the card applies to", body = [crate::openapi::ProductDoc]),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list_card_products(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state.relationships.list_products_of_card(id).await?;
    Ok(Json(products))
}

#[utoipa::path(
    put, path = "/cards/{id}", tag = "cards",
    params(("id" = i64, Path, description = "Card ID")),
    request_body = crate::openapi::NameInputDoc,
    responses(
        (status = 200, description = "Renamed", body = crate::openapi::CardDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn rename_card(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    input: Result<Json<NameInput>, JsonRejection>,
) -> Result<Json<Card>, JsonApiError> {
    let Json(input) = input?;
    let card = state.relationships.rename_card(id, &input.name).await?;
    Ok(Json(card))
}

#[utoipa::path(
    delete, path = "/cards/{id}", tag = "cards",
    params(("id" = i64, Path, description = "Card ID")),
    responses(
        (status = 204, description = "Deleted, detached from all products"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_card(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    state.relationships.delete_card(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub database: String }

#[derive(ToSchema)]
pub struct CardDoc { pub id: i64, pub name: String }

#[derive(ToSchema)]
pub struct ProductDoc { pub id: i64, pub name: String }

#[derive(ToSchema)]
pub struct NameInputDoc { pub name: String }

/// Non-zero `id` of an existing card, or `name` of a card to create (id absent, null or 0).
#[derive(ToSchema)]
pub struct AttachCardDoc {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cards::list_cards,
        crate::routes::cards::create_card,
        crate::routes::cards::get_card,
        crate::routes::cards::list_card_products,
        crate::routes::cards::rename_card,
        crate::routes::cards::delete_card,
        crate::routes::products::list_products,
        crate::routes::products::create_product,
        crate::routes::products::get_product,
        crate::routes::products::delete_product,
        crate::routes::products::list_product_cards,
        crate::routes::products::attach_card,
        crate::routes::products::detach_card,
    ),
    components(
        schemas(
            HealthResponse,
            CardDoc,
            ProductDoc,
            NameInputDoc,
            AttachCardDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cards"),
        (name = "products")
    )
)]
pub struct ApiDoc;

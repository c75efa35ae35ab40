//! Product handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{Product, Role};
use crate::errors::AppResult;
use crate::services::UpdateProduct;
use crate::types::{ListQuery, MessageResponse, PageMeta};

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Price must be a positive number or zero."))]
    pub price: f64,
    #[validate(range(min = 0, message = "Stock quantity must be zero or a positive integer."))]
    pub stock_quantity: i32,
}

/// Product update request; only supplied fields are applied
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number or zero."))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Stock quantity must be zero or a positive integer."))]
    pub stock_quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    #[serde(flatten)]
    pub meta: Option<PageMeta>,
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Create a new product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    require_role(&current_user, Role::Admin)?;

    let product = state
        .product_service
        .create(payload.name, payload.price, payload.stock_quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// List products with pagination and sorting (admin only)
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated products", body = ProductListResponse),
        (status = 400, description = "Invalid sort_by field"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_products(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProductListResponse>> {
    require_role(&current_user, Role::Admin)?;

    let page = state.product_service.list(query.into_params()).await?;

    Ok(Json(ProductListResponse {
        products: page.items,
        meta: page.meta,
    }))
}

/// Get a product by id (admin only)
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    require_role(&current_user, Role::Admin)?;

    let product = state.product_service.get_by_id(id).await?;
    Ok(Json(product))
}

/// Update a product (admin only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    require_role(&current_user, Role::Admin)?;

    let product = state
        .product_service
        .update(
            id,
            UpdateProduct {
                name: payload.name,
                price: payload.price,
                stock_quantity: payload.stock_quantity,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, Role::Admin)?;

    state.product_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

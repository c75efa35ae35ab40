//! Order handlers.
//!
//! Creation is open to any authenticated caller (`user` gate); every other
//! operation is admin-gated.

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
use crate::domain::{Order, Role};
use crate::errors::AppResult;
use crate::types::{ListQuery, MessageResponse, PageMeta};

/// Order creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: i32,
}

/// Order update request; only the quantity can change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    #[serde(flatten)]
    pub meta: Option<PageMeta>,
}

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
}

/// Place an order (any authenticated role)
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Validation error or unknown customer/product"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    require_role(&current_user, Role::User)?;

    let order = state
        .order_service
        .create(payload.customer_id, payload.product_id, payload.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders with pagination and sorting (admin only)
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated orders", body = OrderListResponse),
        (status = 400, description = "Invalid sort_by field"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_orders(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrderListResponse>> {
    require_role(&current_user, Role::Admin)?;

    let page = state.order_service.list(query.into_params()).await?;

    Ok(Json(OrderListResponse {
        orders: page.items,
        meta: page.meta,
    }))
}

/// Get an order by id (admin only)
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Order>> {
    require_role(&current_user, Role::Admin)?;

    let order = state.order_service.get_by_id(id).await?;
    Ok(Json(order))
}

/// Update an order's quantity (admin only)
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderRequest>,
) -> AppResult<Json<Order>> {
    require_role(&current_user, Role::Admin)?;

    let order = state.order_service.update(id, payload.quantity).await?;
    Ok(Json(order))
}

/// Delete an order (admin only)
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, Role::Admin)?;

    state.order_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Order deleted successfully")))
}

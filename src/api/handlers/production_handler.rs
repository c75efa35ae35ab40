//! Production record handlers.

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
use crate::domain::{Production, Role};
use crate::errors::AppResult;
use crate::types::{ListQuery, MessageResponse, PageMeta};

/// Production record creation request; the date travels as a string and is
/// parsed against the `YYYY-MM-DD` shape by the service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductionRequest {
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity produced must be at least 1."))]
    pub quantity_produced: i32,
    pub date_produced: String,
}

/// Production record update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductionRequest {
    #[validate(range(min = 1, message = "Quantity produced must be at least 1."))]
    pub quantity_produced: Option<i32>,
    pub date_produced: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductionListResponse {
    pub production: Vec<Production>,
    #[serde(flatten)]
    pub meta: Option<PageMeta>,
}

pub fn production_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_production).post(create_production))
        .route(
            "/:id",
            get(get_production)
                .put(update_production)
                .delete(delete_production),
        )
}

/// Record a production run (admin only)
#[utoipa::path(
    post,
    path = "/production",
    tag = "Production",
    security(("bearer_auth" = [])),
    request_body = CreateProductionRequest,
    responses(
        (status = 201, description = "Production record created", body = Production),
        (status = 400, description = "Validation error, unknown product, or bad date"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_production(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductionRequest>,
) -> AppResult<(StatusCode, Json<Production>)> {
    require_role(&current_user, Role::Admin)?;

    let record = state
        .production_service
        .create(
            payload.product_id,
            payload.quantity_produced,
            payload.date_produced,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// List production records with pagination and sorting (admin only)
#[utoipa::path(
    get,
    path = "/production",
    tag = "Production",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated production records", body = ProductionListResponse),
        (status = 400, description = "Invalid sort_by field"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_production(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProductionListResponse>> {
    require_role(&current_user, Role::Admin)?;

    let page = state.production_service.list(query.into_params()).await?;

    Ok(Json(ProductionListResponse {
        production: page.items,
        meta: page.meta,
    }))
}

/// Get a production record by id (admin only)
#[utoipa::path(
    get,
    path = "/production/{id}",
    tag = "Production",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Production record ID")),
    responses(
        (status = 200, description = "Production record", body = Production),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Production record not found")
    )
)]
pub async fn get_production(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Production>> {
    require_role(&current_user, Role::Admin)?;

    let record = state.production_service.get_by_id(id).await?;
    Ok(Json(record))
}

/// Update a production record (admin only)
#[utoipa::path(
    put,
    path = "/production/{id}",
    tag = "Production",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Production record ID")),
    request_body = UpdateProductionRequest,
    responses(
        (status = 200, description = "Updated production record", body = Production),
        (status = 400, description = "Validation error or bad date"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Production record not found")
    )
)]
pub async fn update_production(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductionRequest>,
) -> AppResult<Json<Production>> {
    require_role(&current_user, Role::Admin)?;

    let record = state
        .production_service
        .update(id, payload.quantity_produced, payload.date_produced)
        .await?;

    Ok(Json(record))
}

/// Delete a production record (admin only)
#[utoipa::path(
    delete,
    path = "/production/{id}",
    tag = "Production",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Production record ID")),
    responses(
        (status = 200, description = "Production record deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Production record not found")
    )
)]
pub async fn delete_production(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, Role::Admin)?;

    state.production_service.delete(id).await?;
    Ok(Json(MessageResponse::new(
        "Production record deleted successfully",
    )))
}

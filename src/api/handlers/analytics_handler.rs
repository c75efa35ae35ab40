//! Analytics handlers - admin-gated aggregate reports.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::middleware::{require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::Role;
use crate::errors::{AppError, AppResult};
use crate::services::{parse_date, CustomerValue, EmployeePerformance, ProductSales, ProductionTotal};
use crate::types::AnalyticsResponse;

const DEFAULT_LIFETIME_VALUE_THRESHOLD: f64 = 1000.0;

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    pub threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct EfficiencyQuery {
    pub date: Option<String>,
}

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/employee-performance", get(employee_performance))
        .route("/top-products", get(top_products))
        .route("/customer-lifetime-value", get(lifetime_value))
        .route("/production-efficiency", get(production_efficiency))
}

/// Total quantity produced per employee (admin only)
#[utoipa::path(
    get,
    path = "/analytics/employee-performance",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregated quantities grouped by employee name"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn employee_performance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AnalyticsResponse<EmployeePerformance>>> {
    require_role(&current_user, Role::Admin)?;

    let data = state.analytics_service.employee_performance().await?;
    Ok(Json(AnalyticsResponse::success(data)))
}

/// Top-selling products by units ordered (admin only)
#[utoipa::path(
    get,
    path = "/analytics/top-products",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Units sold grouped by product, best sellers first"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn top_products(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AnalyticsResponse<ProductSales>>> {
    require_role(&current_user, Role::Admin)?;

    let data = state.analytics_service.top_selling_products().await?;
    Ok(Json(AnalyticsResponse::success(data)))
}

/// Customer lifetime value above a threshold (admin only)
#[utoipa::path(
    get,
    path = "/analytics/customer-lifetime-value",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order totals per customer at or above the threshold"),
        (status = 400, description = "Negative threshold"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn lifetime_value(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ThresholdQuery>,
) -> AppResult<Json<AnalyticsResponse<CustomerValue>>> {
    require_role(&current_user, Role::Admin)?;

    let threshold = query.threshold.unwrap_or(DEFAULT_LIFETIME_VALUE_THRESHOLD);
    if threshold < 0.0 {
        return Err(AppError::validation("Threshold must be a positive value."));
    }

    let data = state
        .analytics_service
        .customer_lifetime_value(threshold)
        .await?;
    Ok(Json(AnalyticsResponse::success(data)))
}

/// Production totals per product for a single date (admin only)
#[utoipa::path(
    get,
    path = "/analytics/production-efficiency",
    tag = "Analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Quantity produced per product on the given date"),
        (status = 400, description = "Missing or malformed date"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn production_efficiency(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<EfficiencyQuery>,
) -> AppResult<Json<AnalyticsResponse<ProductionTotal>>> {
    require_role(&current_user, Role::Admin)?;

    let date = query
        .date
        .as_deref()
        .ok_or_else(|| AppError::validation("Date is required (YYYY-MM-DD)."))?;
    let date = parse_date(date)?;

    let data = state.analytics_service.production_efficiency(date).await?;
    Ok(Json(AnalyticsResponse::success(data)))
}

//! Customer handlers.

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
use crate::domain::{Customer, Role};
use crate::errors::AppResult;
use crate::services::UpdateCustomer;
use crate::types::{ListQuery, MessageResponse, PageMeta};

use super::PHONE_REGEX;

/// Customer creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"), length(max = 100))]
    pub email: String,
    #[validate(
        length(min = 10, max = 20),
        regex(
            path = *PHONE_REGEX,
            message = "Invalid phone number format. Must be 10-15 digits with optional +1."
        )
    )]
    pub phone: String,
}

/// Customer update request; only supplied fields are applied
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"), length(max = 100))]
    pub email: Option<String>,
    #[validate(
        length(min = 10, max = 20),
        regex(
            path = *PHONE_REGEX,
            message = "Invalid phone number format. Must be 10-15 digits with optional +1."
        )
    )]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerListResponse {
    pub customers: Vec<Customer>,
    #[serde(flatten)]
    pub meta: Option<PageMeta>,
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

/// Create a new customer (admin only)
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Validation error or duplicate email/phone"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_customer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    require_role(&current_user, Role::Admin)?;

    let customer = state
        .customer_service
        .create(payload.name, payload.email, payload.phone)
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// List customers with pagination and sorting (admin only)
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated customers", body = CustomerListResponse),
        (status = 400, description = "Invalid sort_by field"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_customers(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<CustomerListResponse>> {
    require_role(&current_user, Role::Admin)?;

    let page = state.customer_service.list(query.into_params()).await?;

    Ok(Json(CustomerListResponse {
        customers: page.items,
        meta: page.meta,
    }))
}

/// Get a customer by id (admin only)
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    require_role(&current_user, Role::Admin)?;

    let customer = state.customer_service.get_by_id(id).await?;
    Ok(Json(customer))
}

/// Update a customer (admin only)
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated customer", body = Customer),
        (status = 400, description = "Validation error or duplicate email/phone"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> AppResult<Json<Customer>> {
    require_role(&current_user, Role::Admin)?;

    let customer = state
        .customer_service
        .update(
            id,
            UpdateCustomer {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await?;

    Ok(Json(customer))
}

/// Delete a customer (admin only)
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, Role::Admin)?;

    state.customer_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Customer deleted successfully")))
}

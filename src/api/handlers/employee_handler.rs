//! Employee handlers.

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
use crate::domain::{Employee, Role};
use crate::errors::AppResult;
use crate::services::UpdateEmployee;
use crate::types::{ListQuery, MessageResponse, PageMeta};

use super::PHONE_REGEX;

/// Employee creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Position must be between 1 and 100 characters"
    ))]
    pub position: String,
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

/// Employee update request; only supplied fields are applied
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Position must be between 1 and 100 characters"
    ))]
    pub position: Option<String>,
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

/// List envelope: employees keyed under `employees`, metadata spliced in
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
    #[serde(flatten)]
    pub meta: Option<PageMeta>,
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// Create a new employee (admin only)
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error or duplicate email/phone"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    require_role(&current_user, Role::Admin)?;

    let employee = state
        .employee_service
        .create(payload.name, payload.position, payload.email, payload.phone)
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// List employees with pagination and sorting (admin only)
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated employees", body = EmployeeListResponse),
        (status = 400, description = "Invalid sort_by field"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_employees(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<EmployeeListResponse>> {
    require_role(&current_user, Role::Admin)?;

    let page = state.employee_service.list(query.into_params()).await?;

    Ok(Json(EmployeeListResponse {
        employees: page.items,
        meta: page.meta,
    }))
}

/// Get an employee by id (admin only)
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Employee>> {
    require_role(&current_user, Role::Admin)?;

    let employee = state.employee_service.get_by_id(id).await?;
    Ok(Json(employee))
}

/// Update an employee (admin only)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated employee", body = Employee),
        (status = 400, description = "Validation error or duplicate email/phone"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<Employee>> {
    require_role(&current_user, Role::Admin)?;

    let employee = state
        .employee_service
        .update(
            id,
            UpdateEmployee {
                name: payload.name,
                position: payload.position,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await?;

    Ok(Json(employee))
}

/// Delete an employee (admin only)
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, Role::Admin)?;

    state.employee_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}

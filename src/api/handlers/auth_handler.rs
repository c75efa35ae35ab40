//! Authentication and user account handlers.
//!
//! `/auth/login` is the only public route; registration and account
//! management sit behind the token guard with super_admin gates (listing
//! is admin-gated).

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, require_role, CurrentUser};
use crate::api::AppState;
use crate::domain::{Role, User};
use crate::errors::{AppError, AppResult};
use crate::services::TokenResponse;
use crate::types::{ListQuery, MessageResponse, PageMeta};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 80,
        message = "Username must be between 3 and 80 characters"
    ))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(custom(
        function = "crate::domain::validate_role",
        message = "Role must be one of: super_admin, admin, user"
    ))]
    pub role: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// User update request; only supplied fields are applied
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(custom(
        function = "crate::domain::validate_role",
        message = "Role must be one of: super_admin, admin, user"
    ))]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
    #[serde(flatten)]
    pub meta: Option<PageMeta>,
}

/// Create authentication routes. Login stays outside the token guard.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/register", post(register))
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().route("/login", post(login)).merge(protected)
}

/// Login and obtain a signed token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::validation(
            "Both username and password are required.",
        ));
    }

    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}

/// Register a new user (super_admin only)
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Validation error or username taken"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn register(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    require_role(&current_user, Role::SuperAdmin)?;

    let role = Role::from_str(&payload.role)
        .map_err(|_| AppError::validation("Role must be one of: super_admin, admin, user"))?;

    let user = state
        .user_service
        .create(payload.username, payload.password, role)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List users with pagination and sorting (admin only)
#[utoipa::path(
    get,
    path = "/auth",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated users", body = UserListResponse),
        (status = 400, description = "Invalid sort_by field"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<UserListResponse>> {
    require_role(&current_user, Role::Admin)?;

    let page = state.user_service.list(query.into_params()).await?;

    Ok(Json(UserListResponse {
        users: page.items,
        meta: page.meta,
    }))
}

/// Get a user by id (super_admin only)
#[utoipa::path(
    get,
    path = "/auth/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    require_role(&current_user, Role::SuperAdmin)?;

    let user = state.user_service.get_by_id(id).await?;
    Ok(Json(user))
}

/// Update a user's password and/or role (super_admin only)
#[utoipa::path(
    put,
    path = "/auth/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    require_role(&current_user, Role::SuperAdmin)?;

    let role = match payload.role {
        Some(ref value) => Some(Role::from_str(value).map_err(|_| {
            AppError::validation("Role must be one of: super_admin, admin, user")
        })?),
        None => None,
    };

    let user = state.user_service.update(id, payload.password, role).await?;
    Ok(Json(user))
}

/// Delete a user (super_admin only)
#[utoipa::path(
    delete,
    path = "/auth/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_role(&current_user, Role::SuperAdmin)?;

    state.user_service.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully.")))
}

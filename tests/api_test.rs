//! Integration tests for the HTTP surface.
//!
//! The router is exercised end to end with `tower::ServiceExt::oneshot`;
//! services are mockall doubles, while the token codec is the real
//! `Authenticator` over a mock database connection so guard behavior is
//! tested against genuine signed tokens.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use mockall::mock;
use mockall::predicate::eq;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use tower::ServiceExt;

use factory_api::api::{create_router, AppState};
use factory_api::config::Config;
use factory_api::domain::{Customer, Employee, Order, Password, Product, Production, Role, User};
use factory_api::errors::AppResult;
use factory_api::infra::entities::user;
use factory_api::infra::Database;
use factory_api::services::{
    AnalyticsService, AuthService, Authenticator, CustomerService, CustomerValue,
    EmployeePerformance, EmployeeService, OrderService, ProductSales, ProductService,
    ProductionService, ProductionTotal, UpdateCustomer, UpdateEmployee, UpdateProduct,
    UserService,
};
use factory_api::types::{ListParams, Page, PageMeta};

// =============================================================================
// Service mocks
// =============================================================================

mock! {
    EmployeeSvc {}

    #[async_trait]
    impl EmployeeService for EmployeeSvc {
        async fn create(
            &self,
            name: String,
            position: String,
            email: String,
            phone: String,
        ) -> AppResult<Employee>;
        async fn get_by_id(&self, id: i32) -> AppResult<Employee>;
        async fn update(&self, id: i32, changes: UpdateEmployee) -> AppResult<Employee>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn list(&self, params: ListParams) -> AppResult<Page<Employee>>;
    }
}

mock! {
    ProductSvc {}

    #[async_trait]
    impl ProductService for ProductSvc {
        async fn create(&self, name: String, price: f64, stock_quantity: i32) -> AppResult<Product>;
        async fn get_by_id(&self, id: i32) -> AppResult<Product>;
        async fn update(&self, id: i32, changes: UpdateProduct) -> AppResult<Product>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn list(&self, params: ListParams) -> AppResult<Page<Product>>;
    }
}

mock! {
    CustomerSvc {}

    #[async_trait]
    impl CustomerService for CustomerSvc {
        async fn create(&self, name: String, email: String, phone: String) -> AppResult<Customer>;
        async fn get_by_id(&self, id: i32) -> AppResult<Customer>;
        async fn update(&self, id: i32, changes: UpdateCustomer) -> AppResult<Customer>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn list(&self, params: ListParams) -> AppResult<Page<Customer>>;
    }
}

mock! {
    OrderSvc {}

    #[async_trait]
    impl OrderService for OrderSvc {
        async fn create(&self, customer_id: i32, product_id: i32, quantity: i32) -> AppResult<Order>;
        async fn get_by_id(&self, id: i32) -> AppResult<Order>;
        async fn update(&self, id: i32, quantity: Option<i32>) -> AppResult<Order>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn list(&self, params: ListParams) -> AppResult<Page<Order>>;
    }
}

mock! {
    ProductionSvc {}

    #[async_trait]
    impl ProductionService for ProductionSvc {
        async fn create(
            &self,
            product_id: i32,
            quantity_produced: i32,
            date_produced: String,
        ) -> AppResult<Production>;
        async fn get_by_id(&self, id: i32) -> AppResult<Production>;
        async fn update(
            &self,
            id: i32,
            quantity_produced: Option<i32>,
            date_produced: Option<String>,
        ) -> AppResult<Production>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn list(&self, params: ListParams) -> AppResult<Page<Production>>;
    }
}

mock! {
    UserSvc {}

    #[async_trait]
    impl UserService for UserSvc {
        async fn create(&self, username: String, password: String, role: Role) -> AppResult<User>;
        async fn get_by_id(&self, id: i32) -> AppResult<User>;
        async fn update(
            &self,
            id: i32,
            password: Option<String>,
            role: Option<Role>,
        ) -> AppResult<User>;
        async fn delete(&self, id: i32) -> AppResult<()>;
        async fn list(&self, params: ListParams) -> AppResult<Page<User>>;
    }
}

mock! {
    AnalyticsSvc {}

    #[async_trait]
    impl AnalyticsService for AnalyticsSvc {
        async fn employee_performance(&self) -> AppResult<Vec<EmployeePerformance>>;
        async fn top_selling_products(&self) -> AppResult<Vec<ProductSales>>;
        async fn customer_lifetime_value(&self, threshold: f64) -> AppResult<Vec<CustomerValue>>;
        async fn production_efficiency(&self, date: NaiveDate) -> AppResult<Vec<ProductionTotal>>;
    }
}

// =============================================================================
// Test helpers
// =============================================================================

fn test_config() -> Config {
    Config::with_secret("integration-test-secret-32-chars!", 24)
}

/// Issue a real signed token for the given role.
fn bearer(role: Role) -> String {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let token = Authenticator::new(db, test_config())
        .issue_token(7, role)
        .unwrap();
    format!("Bearer {}", token)
}

/// Application under test with every service mocked out.
struct TestApp {
    employee: MockEmployeeSvc,
    product: MockProductSvc,
    customer: MockCustomerSvc,
    order: MockOrderSvc,
    production: MockProductionSvc,
    user: MockUserSvc,
    analytics: MockAnalyticsSvc,
    auth_db: DatabaseConnection,
    app_db: DatabaseConnection,
}

impl TestApp {
    fn new() -> Self {
        Self {
            employee: MockEmployeeSvc::new(),
            product: MockProductSvc::new(),
            customer: MockCustomerSvc::new(),
            order: MockOrderSvc::new(),
            production: MockProductionSvc::new(),
            user: MockUserSvc::new(),
            analytics: MockAnalyticsSvc::new(),
            auth_db: MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            app_db: MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        }
    }

    fn into_router(self) -> Router {
        let state = AppState::new(
            Arc::new(Authenticator::new(self.auth_db, test_config())),
            Arc::new(self.employee),
            Arc::new(self.product),
            Arc::new(self.customer),
            Arc::new(self.order),
            Arc::new(self.production),
            Arc::new(self.user),
            Arc::new(self.analytics),
            Arc::new(Database::from_connection(self.app_db)),
        );
        create_router(state)
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get_request(path: &str, auth: Option<String>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(
    method: &str,
    path: &str,
    auth: Option<String>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn sample_employee(id: i32) -> Employee {
    let now = Utc::now();
    Employee {
        id,
        name: format!("Worker {}", id),
        position: "Assembler".to_string(),
        email: format!("worker{}@factory.test", id),
        phone: format!("+1555000{:04}", id),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn sample_user(id: i32, role: Role) -> User {
    let now = Utc::now();
    User {
        id,
        username: "plant_manager".to_string(),
        password_hash: "stored-hash".to_string(),
        role,
        is_active: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn user_row(username: &str, password: &str, role: Role) -> user::Model {
    let now = Utc::now();
    user::Model {
        id: 7,
        username: username.to_string(),
        password: Password::new(password).unwrap().into_string(),
        role: role.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_root_returns_welcome_banner() {
    let router = TestApp::new().into_router();
    let (status, body) = send(router, get_request("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Factory Management System!");
}

#[tokio::test]
async fn test_health_reports_healthy_when_database_answers() {
    let mut app = TestApp::new();
    app.app_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let (status, body) = send(app.into_router(), get_request("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// =============================================================================
// Token guard
// =============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let router = TestApp::new().into_router();
    let (status, body) = send(router, get_request("/employees", None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Token is missing!");
}

#[tokio::test]
async fn test_malformed_token_is_rejected() {
    let router = TestApp::new().into_router();
    let (status, body) = send(
        router,
        get_request("/employees", Some("Bearer not-a-token".to_string())),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid token. Please log in again.");
}

#[tokio::test]
async fn test_user_role_cannot_reach_admin_gated_route() {
    let router = TestApp::new().into_router();
    let (status, body) = send(router, get_request("/employees", Some(bearer(Role::User)))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Unauthorized access!");
}

#[tokio::test]
async fn test_super_admin_passes_admin_gate() {
    let mut app = TestApp::new();
    app.employee.expect_list().returning(|_| {
        Ok(Page {
            items: vec![sample_employee(1)],
            meta: Some(PageMeta::new(1, 1, 10)),
        })
    });

    let (status, _) = send(
        app.into_router(),
        get_request("/employees", Some(bearer(Role::SuperAdmin))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Resource routes
// =============================================================================

#[tokio::test]
async fn test_admin_lists_employees_with_spliced_meta() {
    let mut app = TestApp::new();
    app.employee.expect_list().returning(|_| {
        Ok(Page {
            items: vec![sample_employee(1), sample_employee(2)],
            meta: Some(PageMeta::new(2, 1, 10)),
        })
    });

    let (status, body) = send(
        app.into_router(),
        get_request("/employees", Some(bearer(Role::Admin))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"].as_array().unwrap().len(), 2);
    // metadata lands at the same level as the list key
    assert_eq!(body["total"], 2);
    assert_eq!(body["pages"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 10);
}

#[tokio::test]
async fn test_user_role_can_place_order() {
    let mut app = TestApp::new();
    app.order
        .expect_create()
        .with(eq(1), eq(2), eq(3))
        .returning(|customer_id, product_id, quantity| {
            let now = Utc::now();
            Ok(Order {
                id: 1,
                customer_id,
                product_id,
                quantity,
                total_price: 59.97,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
        });

    let (status, body) = send(
        app.into_router(),
        json_request(
            "POST",
            "/orders",
            Some(bearer(Role::User)),
            serde_json::json!({"customer_id": 1, "product_id": 2, "quantity": 3}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], 3);
    assert_eq!(body["total_price"], 59.97);
}

#[tokio::test]
async fn test_create_employee_with_invalid_email_fails_before_service() {
    // No expectation set: reaching the service would panic the mock
    let router = TestApp::new().into_router();

    let (status, _) = send(
        router,
        json_request(
            "POST",
            "/employees",
            Some(bearer(Role::Admin)),
            serde_json::json!({
                "name": "Ada Wong",
                "position": "Line Supervisor",
                "email": "not-an-email",
                "phone": "+15550001111"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_employee_returns_message() {
    let mut app = TestApp::new();
    app.employee
        .expect_delete()
        .with(eq(5))
        .returning(|_| Ok(()));

    let (status, body) = send(
        app.into_router(),
        Request::builder()
            .method("DELETE")
            .uri("/employees/5")
            .header(header::AUTHORIZATION, bearer(Role::Admin))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");
}

// =============================================================================
// User accounts
// =============================================================================

#[tokio::test]
async fn test_admin_cannot_read_user_account() {
    let router = TestApp::new().into_router();
    let (status, _) = send(router, get_request("/auth/5", Some(bearer(Role::Admin)))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_super_admin_reads_user_without_password_fields() {
    let mut app = TestApp::new();
    app.user
        .expect_get_by_id()
        .with(eq(5))
        .returning(|id| Ok(sample_user(id, Role::Admin)));

    let (status, body) = send(
        app.into_router(),
        get_request("/auth/5", Some(bearer(Role::SuperAdmin))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "plant_manager");
    assert_eq!(body["role"], "admin");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_signed_token() {
    let mut app = TestApp::new();
    app.auth_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row("plant_manager", "secret123", Role::Admin)]])
        .into_connection();

    let (status, body) = send(
        app.into_router(),
        json_request(
            "POST",
            "/auth/login",
            None,
            serde_json::json!({"username": "plant_manager", "password": "secret123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    // The issued token carries the account's role
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let claims = Authenticator::new(db, test_config())
        .verify_token(token)
        .unwrap();
    assert_eq!(claims.sub, 7);
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let mut app = TestApp::new();
    app.auth_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row("plant_manager", "secret123", Role::Admin)]])
        .into_connection();

    let (status, body) = send(
        app.into_router(),
        json_request(
            "POST",
            "/auth/login",
            None,
            serde_json::json!({"username": "plant_manager", "password": "wrong"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials.");
}

#[tokio::test]
async fn test_login_with_unknown_username_is_unauthorized() {
    let mut app = TestApp::new();
    app.auth_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();

    let (status, body) = send(
        app.into_router(),
        json_request(
            "POST",
            "/auth/login",
            None,
            serde_json::json!({"username": "nobody", "password": "secret123"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials.");
}

// =============================================================================
// Analytics
// =============================================================================

#[tokio::test]
async fn test_top_products_wrapped_in_success_envelope() {
    let mut app = TestApp::new();
    app.analytics.expect_top_selling_products().returning(|| {
        Ok(vec![
            ProductSales {
                product: "Widget".to_string(),
                total_sold: 12,
            },
            ProductSales {
                product: "Gadget".to_string(),
                total_sold: 7,
            },
        ])
    });

    let (status, body) = send(
        app.into_router(),
        get_request("/analytics/top-products", Some(bearer(Role::Admin))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"][0]["product"], "Widget");
    assert_eq!(body["data"][0]["total_sold"], 12);
}

#[tokio::test]
async fn test_negative_lifetime_value_threshold_is_rejected() {
    let router = TestApp::new().into_router();
    let (status, body) = send(
        router,
        get_request(
            "/analytics/customer-lifetime-value?threshold=-5",
            Some(bearer(Role::Admin)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Threshold must be a positive value.");
}

#[tokio::test]
async fn test_production_efficiency_requires_date() {
    let router = TestApp::new().into_router();
    let (status, body) = send(
        router,
        get_request(
            "/analytics/production-efficiency",
            Some(bearer(Role::Admin)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date is required (YYYY-MM-DD).");
}

#[tokio::test]
async fn test_production_efficiency_passes_parsed_date_through() {
    let mut app = TestApp::new();
    app.analytics
        .expect_production_efficiency()
        .with(eq(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()))
        .returning(|_| {
            Ok(vec![ProductionTotal {
                product: "Widget".to_string(),
                total_produced: 40,
            }])
        });

    let (status, body) = send(
        app.into_router(),
        get_request(
            "/analytics/production-efficiency?date=2025-06-01",
            Some(bearer(Role::Admin)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["total_produced"], 40);
}

#[tokio::test]
async fn test_analytics_empty_result_is_valid() {
    let mut app = TestApp::new();
    app.analytics
        .expect_employee_performance()
        .returning(|| Ok(vec![]));

    let (status, body) = send(
        app.into_router(),
        get_request(
            "/analytics/employee-performance",
            Some(bearer(Role::Admin)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_analytics_rejects_user_role() {
    let router = TestApp::new().into_router();
    let (status, _) = send(
        router,
        get_request("/analytics/top-products", Some(bearer(Role::User))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

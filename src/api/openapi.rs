//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    analytics_handler, auth_handler, customer_handler, employee_handler, order_handler,
    product_handler, production_handler,
};
use crate::domain::{Customer, Employee, Order, Product, Production, Role, User};
use crate::services::{
    CustomerValue, EmployeePerformance, ProductSales, ProductionTotal, TokenResponse,
};
use crate::types::{MessageResponse, PageMeta};

/// OpenAPI documentation for the Factory Management System
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Factory Management System",
        version = "0.1.0",
        description = "Role-gated CRUD backend for factory operations with aggregate analytics",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Authentication and user management
        auth_handler::login,
        auth_handler::register,
        auth_handler::list_users,
        auth_handler::get_user,
        auth_handler::update_user,
        auth_handler::delete_user,
        // Employees
        employee_handler::create_employee,
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        // Products
        product_handler::create_product,
        product_handler::list_products,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        // Customers
        customer_handler::create_customer,
        customer_handler::list_customers,
        customer_handler::get_customer,
        customer_handler::update_customer,
        customer_handler::delete_customer,
        // Orders
        order_handler::create_order,
        order_handler::list_orders,
        order_handler::get_order,
        order_handler::update_order,
        order_handler::delete_order,
        // Production
        production_handler::create_production,
        production_handler::list_production,
        production_handler::get_production,
        production_handler::update_production,
        production_handler::delete_production,
        // Analytics
        analytics_handler::employee_performance,
        analytics_handler::top_products,
        analytics_handler::lifetime_value,
        analytics_handler::production_efficiency,
    ),
    components(
        schemas(
            // Domain types
            Role,
            User,
            Employee,
            Product,
            Customer,
            Order,
            Production,
            // Shared envelopes
            PageMeta,
            MessageResponse,
            TokenResponse,
            // Analytics rows
            EmployeePerformance,
            ProductSales,
            CustomerValue,
            ProductionTotal,
            // Request bodies
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::UpdateUserRequest,
            auth_handler::UserListResponse,
            employee_handler::CreateEmployeeRequest,
            employee_handler::UpdateEmployeeRequest,
            employee_handler::EmployeeListResponse,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
            product_handler::ProductListResponse,
            customer_handler::CreateCustomerRequest,
            customer_handler::UpdateCustomerRequest,
            customer_handler::CustomerListResponse,
            order_handler::CreateOrderRequest,
            order_handler::UpdateOrderRequest,
            order_handler::OrderListResponse,
            production_handler::CreateProductionRequest,
            production_handler::UpdateProductionRequest,
            production_handler::ProductionListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and user registration"),
        (name = "Users", description = "User account management"),
        (name = "Employees", description = "Employee management"),
        (name = "Products", description = "Product catalog management"),
        (name = "Customers", description = "Customer management"),
        (name = "Orders", description = "Order placement and management"),
        (name = "Production", description = "Production record management"),
        (name = "Analytics", description = "Aggregate reports")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

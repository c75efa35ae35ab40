//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and data access to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion; handlers only see the trait objects.

pub mod analytics_service;
pub mod auth_service;
pub mod customer_service;
pub mod employee_service;
pub mod order_service;
pub mod product_service;
pub mod production_service;
pub mod user_service;

pub use analytics_service::{
    Analytics, AnalyticsService, CustomerValue, EmployeePerformance, ProductSales,
    ProductionTotal,
};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use customer_service::{CustomerManager, CustomerService, UpdateCustomer};
pub use employee_service::{EmployeeManager, EmployeeService, UpdateEmployee};
pub use order_service::{OrderManager, OrderService};
pub use product_service::{ProductManager, ProductService, UpdateProduct};
pub use production_service::{parse_date, ProductionManager, ProductionService};
pub use user_service::{UserManager, UserService};

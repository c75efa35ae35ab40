//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and
//! infrastructure. Constructed once at startup and cloned into handlers;
//! there is no ambient global state.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, RateLimiter};
use crate::services::{
    Analytics, AnalyticsService, AuthService, Authenticator, CustomerManager, CustomerService,
    EmployeeManager, EmployeeService, OrderManager, OrderService, ProductManager, ProductService,
    ProductionManager, ProductionService, UserManager, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub product_service: Arc<dyn ProductService>,
    pub customer_service: Arc<dyn CustomerService>,
    pub order_service: Arc<dyn OrderService>,
    pub production_service: Arc<dyn ProductionService>,
    pub user_service: Arc<dyn UserService>,
    pub analytics_service: Arc<dyn AnalyticsService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let db = database.get_connection();

        Self {
            auth_service: Arc::new(Authenticator::new(db.clone(), config)),
            employee_service: Arc::new(EmployeeManager::new(db.clone())),
            product_service: Arc::new(ProductManager::new(db.clone())),
            customer_service: Arc::new(CustomerManager::new(db.clone())),
            order_service: Arc::new(OrderManager::new(db.clone())),
            production_service: Arc::new(ProductionManager::new(db.clone())),
            user_service: Arc::new(UserManager::new(db.clone())),
            analytics_service: Arc::new(Analytics::new(db)),
            rate_limiter: Arc::new(RateLimiter::new()),
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        employee_service: Arc<dyn EmployeeService>,
        product_service: Arc<dyn ProductService>,
        customer_service: Arc<dyn CustomerService>,
        order_service: Arc<dyn OrderService>,
        production_service: Arc<dyn ProductionService>,
        user_service: Arc<dyn UserService>,
        analytics_service: Arc<dyn AnalyticsService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            employee_service,
            product_service,
            customer_service,
            order_service,
            production_service,
            user_service,
            analytics_service,
            rate_limiter: Arc::new(RateLimiter::new()),
            database,
        }
    }
}

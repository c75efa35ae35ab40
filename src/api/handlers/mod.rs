//! HTTP request handlers.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod analytics_handler;
pub mod auth_handler;
pub mod customer_handler;
pub mod employee_handler;
pub mod order_handler;
pub mod product_handler;
pub mod production_handler;

pub use analytics_handler::analytics_routes;
pub use auth_handler::auth_routes;
pub use customer_handler::customer_routes;
pub use employee_handler::employee_routes;
pub use order_handler::order_routes;
pub use product_handler::product_routes;
pub use production_handler::production_routes;

/// Phone number pattern shared by employee and customer schemas:
/// 9-15 digits with an optional leading `+` and country code `1`.
pub(crate) static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone regex is valid"));

//! Application configuration: environment-backed settings plus the
//! crate-wide constants (roles, pagination bounds, rate-limit ceilings).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;

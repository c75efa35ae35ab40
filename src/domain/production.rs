//! Production record domain entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Record of a production run for a product on a calendar date.
///
/// `date_produced` is a plain date, distinct from the row's creation
/// timestamp; it serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Production {
    pub id: i32,
    pub product_id: i32,
    pub quantity_produced: i32,
    pub date_produced: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

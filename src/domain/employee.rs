//! Employee domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Factory employee.
///
/// `deleted_at` is omitted from JSON output while null, matching the
/// null-dropping serialization contract shared by all entities.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_deleted_at_is_dropped_from_output() {
        let employee = Employee {
            id: 1,
            name: "Ada Wong".to_string(),
            position: "Line Supervisor".to_string(),
            email: "ada@factory.test".to_string(),
            phone: "+15550001111".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("deleted_at").is_none());
        assert_eq!(json["name"], "Ada Wong");

        let deleted = Employee {
            deleted_at: Some(Utc::now()),
            ..employee
        };
        let json = serde_json::to_value(&deleted).unwrap();
        assert!(json.get("deleted_at").is_some());
    }
}

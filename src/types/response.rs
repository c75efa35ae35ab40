//! Shared response envelopes.

use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response, used by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Analytics envelope: `{"data": [...], "status": "success"}`.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse<T: Serialize> {
    pub data: Vec<T>,
    pub status: &'static str,
}

impl<T: Serialize> AnalyticsResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            data,
            status: "success",
        }
    }
}

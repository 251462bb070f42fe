use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::{DomainError, DomainRecord};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";

/// JSON body shared by every non-file endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<DomainRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl ApiResponse {
    fn empty(status: &'static str) -> Self {
        Self {
            status,
            message: None,
            domain: None,
            domains: None,
            error: None,
        }
    }

    pub fn success() -> Self {
        Self::empty(STATUS_SUCCESS)
    }

    pub fn failed(err: &DomainError) -> Self {
        Self {
            message: Some(err.to_string()),
            error: Some(err.kind()),
            ..Self::empty(STATUS_FAILED)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_domain(mut self, domain: DomainRecord) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_domains(mut self, domains: Vec<DomainRecord>) -> Self {
        self.domains = Some(domains);
        self
    }
}

/// Failures are reported in the body; the HTTP status stays 200.
impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match &self {
            DomainError::Storage(_) => tracing::error!(error = %self, "request failed"),
            _ => tracing::warn!(kind = self.kind(), error = %self, "request rejected"),
        }

        (StatusCode::OK, Json(ApiResponse::failed(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_body_shape() {
        let body = serde_json::to_value(ApiResponse::failed(&DomainError::not_found(
            "Domain not found: 1",
        )))
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "status": "failed",
                "message": "Domain not found: 1",
                "error": "not_found_error",
            })
        );
    }

    #[test]
    fn test_success_omits_empty_fields() {
        let body =
            serde_json::to_value(ApiResponse::success().with_message("Domain deleted successfully"))
                .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "status": "success", "message": "Domain deleted successfully" })
        );
    }
}

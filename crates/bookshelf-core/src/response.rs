//! The response envelope shared by every endpoint.
//!
//! Success and failure responses differ only in `success`, `data`, and
//! `message`; the shape is identical, so clients have a single contract
//! regardless of outcome.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Success with no payload (`data: null`).
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_data_and_no_message() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert!(body.get("message").is_none());
    }

    #[test]
    fn failure_envelope_has_null_data_and_message() {
        let body = serde_json::to_value(ApiResponse::failure("nope")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(body["message"], "nope");
    }
}

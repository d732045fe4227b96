/// Shared response helpers for API routes
///
/// Every JSON endpoint answers with the same envelope:
/// `{"success": bool, "data": ..., "error": ..., "message": ...}`.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Uniform API response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 200 response with a data payload
pub fn success_response<T: Serialize>(data: T) -> Response {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        message: None,
    })
    .into_response()
}

/// 200 response with a data payload and a human-readable note
pub fn success_response_with_message<T: Serialize>(data: T, message: &str) -> Response {
    Json(ApiResponse {
        success: true,
        data: Some(data),
        error: None,
        message: Some(message.to_string()),
    })
    .into_response()
}

/// Error response with the given status
pub fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::<serde_json::Value> {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse {
            success: true,
            data: Some(serde_json::json!({"x": 1})),
            error: None,
            message: Some("ok".to_string()),
        };
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["x"], 1);
        assert_eq!(json["message"], "ok");
        assert!(json.get("error").is_none());
    }
}

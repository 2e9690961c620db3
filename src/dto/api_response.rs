use serde::Serialize;

/// Envelope for every successful response; failures use the `AppError` body
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success carrying the human-readable outcome of a registry operation
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_omitted_when_absent() {
        let body = serde_json::to_value(ApiResponse::success(vec!["Kampala"])).unwrap();
        assert_eq!(body["success"], true);
        assert!(body.get("message").is_none());
        assert_eq!(body["data"][0], "Kampala");

        let body =
            serde_json::to_value(ApiResponse::success_with_message(1, "Fuel price set")).unwrap();
        assert_eq!(body["message"], "Fuel price set");
    }
}

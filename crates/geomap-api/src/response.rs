//! Uniform response envelope

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{isSuccess, data, message}` wrapper returned by every object operation.
///
/// Only [`Response::success`] and [`Response::fail`] build one, so a failed
/// envelope never carries data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    is_success: bool,
    data: Option<T>,
    message: String,
}

impl<T> Response<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Response {
            is_success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Response {
            is_success: false,
            data: None,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_camel_case() {
        let json = serde_json::to_value(Response::success(vec![1, 2], "listed")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"isSuccess": true, "data": [1, 2], "message": "listed"})
        );
    }

    #[test]
    fn test_fail_has_null_data() {
        let resp: Response<i32> = Response::fail("not found");
        assert!(!resp.is_success());
        assert!(resp.data().is_none());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["message"], "not found");
    }
}

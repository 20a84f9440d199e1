//! Inbound request models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of a create or update request.
///
/// Both fields are optional on the wire so that a missing field surfaces as a
/// validation message rather than a body decoding error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRequest {
    #[serde(default)]
    #[schema(example = "Home", max_length = 40)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(example = "POINT (30 10)")]
    pub wkt: Option<String>,
}

impl ObjectRequest {
    pub fn new(name: impl Into<String>, wkt: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            wkt: Some(wkt.into()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn wkt(&self) -> &str {
        self.wkt.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let req: ObjectRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, ObjectRequest::default());
        assert_eq!(req.name(), "");

        let req: ObjectRequest =
            serde_json::from_str(r#"{"name":"A","wkt":"POINT (30 10)"}"#).unwrap();
        assert_eq!(req, ObjectRequest::new("A", "POINT (30 10)"));
    }
}

//! Input validation for object requests
//!
//! Every rule is applied independently; a request with several problems reports
//! all of them, name rules first, in a stable order.

use std::borrow::Cow;
use std::sync::LazyLock;

use geomap_common::{NAME_MAX_LENGTH, NAME_MIN_LENGTH};
use regex::Regex;
use validator::ValidationError;

use crate::model::ObjectRequest;

/// Shape pre-check for WKT; the codec does the real parsing later
static WKT_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(POINT|LINESTRING|POLYGON)\s?\(.+\)$").expect("Invalid regex pattern")
});

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Validate an object name: present, 1 to 40 characters
pub fn validate_name(name: Option<&str>) -> Result<(), ValidationError> {
    let Some(name) = name else {
        return Err(error("name_required", "name is required"));
    };
    // Blank names count as missing
    if name.trim().is_empty() {
        return Err(error("name_required", "name is required"));
    }
    let len = name.chars().count();
    if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&len) {
        return Err(error(
            "name_length",
            "name must be between 1 and 40 characters",
        ));
    }
    Ok(())
}

/// Validate the WKT field: present and shaped like a supported literal
pub fn validate_wkt(wkt: Option<&str>) -> Result<(), ValidationError> {
    match wkt {
        None | Some("") => Err(error("wkt_required", "wkt is required")),
        Some(text) if !WKT_SHAPE.is_match(text) => Err(error(
            "wkt_format",
            "invalid WKT format, expected a POINT, LINESTRING or POLYGON literal",
        )),
        Some(_) => Ok(()),
    }
}

fn message_of(err: ValidationError) -> String {
    match err.message {
        Some(message) => message.into_owned(),
        None => err.code.into_owned(),
    }
}

/// Validate one request; an empty list means valid
pub fn validate_object(request: &ObjectRequest) -> Vec<String> {
    [
        validate_name(request.name.as_deref()),
        validate_wkt(request.wkt.as_deref()),
    ]
    .into_iter()
    .filter_map(|r| r.err().map(message_of))
    .collect()
}

/// Validate every element of a batch, prefixing messages with the element index
pub fn validate_batch(requests: &[ObjectRequest]) -> Vec<String> {
    requests
        .iter()
        .enumerate()
        .flat_map(|(i, request)| {
            validate_object(request)
                .into_iter()
                .map(move |message| format!("item {}: {}", i, message))
        })
        .collect()
}

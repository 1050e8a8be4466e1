use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use shelf_types::ItemFields;
use thiserror::Error;

/// Request body for create and update.
///
/// Fields are optional at the parsing stage so that absence is reported as
/// a [`ValidationError`] rather than a deserialization failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    MissingField(&'static str),

    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl ItemPayload {
    /// Check both required fields and produce the storable pair.
    pub fn validate(self) -> Result<ItemFields, ValidationError> {
        let name = required("name", self.name)?;
        let description = required("description", self.description)?;
        Ok(ItemFields { name, description })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if v.is_empty() => Err(ValidationError::EmptyField(field)),
        Some(v) => Ok(v),
    }
}

/// Validate an extracted JSON body, folding extractor rejections into
/// [`ValidationError::MalformedBody`].
pub fn validate_body(
    body: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<ItemFields, ValidationError> {
    let Json(payload) = body.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    payload.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, description: Option<&str>) -> ItemPayload {
        ItemPayload {
            name: name.map(Into::into),
            description: description.map(Into::into),
        }
    }

    #[test]
    fn complete_payload_validates() {
        let fields = payload(Some("Widget"), Some("A thing")).validate().unwrap();
        assert_eq!(fields, ItemFields::new("Widget", "A thing"));
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        assert_eq!(
            payload(None, None).validate().unwrap_err(),
            ValidationError::MissingField("name")
        );
        assert_eq!(
            payload(Some("Widget"), None).validate().unwrap_err(),
            ValidationError::MissingField("description")
        );
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert_eq!(
            payload(Some(""), Some("x")).validate().unwrap_err(),
            ValidationError::EmptyField("name")
        );
        assert_eq!(
            payload(Some("x"), Some("")).validate().unwrap_err(),
            ValidationError::EmptyField("description")
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let p: ItemPayload =
            serde_json::from_str(r#"{"name":"a","description":"b","price":3}"#).unwrap();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn null_counts_as_missing() {
        let p: ItemPayload = serde_json::from_str(r#"{"name":null,"description":"b"}"#).unwrap();
        assert_eq!(p.validate().unwrap_err(), ValidationError::MissingField("name"));
    }
}

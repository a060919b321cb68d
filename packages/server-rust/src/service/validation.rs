//! Request payload validation into typed command arguments.

use once_cell::sync::Lazy;
use products_core::{ProductAttributes, Request};
use regex::Regex;
use serde_json::{Map, Value};

/// Non-negative decimal: digits with an optional fractional part.
static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid regex"));

/// Validated arguments for the create-product command.
///
/// Only [`Validator`] implementations in this module construct it, so a
/// value of this type is never partially valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    name: String,
    description: String,
    price: String,
}

impl CreateArgs {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Converts the arguments into product attributes.
    #[must_use]
    pub fn into_attributes(self) -> ProductAttributes {
        ProductAttributes {
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }

    #[cfg(test)]
    pub(crate) fn new_unchecked(name: &str, description: &str, price: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
        }
    }
}

/// Payload validation failed. Wraps the specific cause.
#[derive(Debug, thiserror::Error)]
#[error("validation failed: {cause}")]
pub struct ValidationError {
    #[source]
    cause: ValidationCause,
}

impl ValidationError {
    #[must_use]
    pub fn new(cause: ValidationCause) -> Self {
        Self { cause }
    }

    /// The specific reason validation failed.
    #[must_use]
    pub fn cause(&self) -> &ValidationCause {
        &self.cause
    }
}

impl From<ValidationCause> for ValidationError {
    fn from(cause: ValidationCause) -> Self {
        Self::new(cause)
    }
}

/// Reasons a create-product payload is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ValidationCause {
    #[error("request body is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] std::str::Utf8Error),
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` must be a string")]
    WrongType { field: &'static str },
    #[error("field `{field}` must not be empty")]
    EmptyField { field: &'static str },
    #[error("price `{value}` is not a non-negative decimal")]
    InvalidPrice { value: String },
}

/// Turns a raw request into typed command arguments.
pub trait Validator: Send + Sync {
    /// Parses and checks the request payload.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` wrapping the first problem found.
    fn validate(&self, request: &Request) -> Result<CreateArgs, ValidationError>;
}

/// JSON validator for the create-product payload.
///
/// Expects an object with string fields `name`, `description`, and `price`.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateArgsValidator;

impl CreateArgsValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Validator for CreateArgsValidator {
    fn validate(&self, request: &Request) -> Result<CreateArgs, ValidationError> {
        let body: Value =
            serde_json::from_str(&request.body).map_err(ValidationCause::MalformedBody)?;
        let Value::Object(fields) = body else {
            return Err(ValidationCause::NotAnObject.into());
        };

        let name = non_empty(&fields, "name")?;
        let description = non_empty(&fields, "description")?;
        let price = required_str(&fields, "price")?;
        if !PRICE_PATTERN.is_match(price) {
            return Err(ValidationCause::InvalidPrice {
                value: price.to_string(),
            }
            .into());
        }

        Ok(CreateArgs {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
        })
    }
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationCause> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(ValidationCause::MissingField { field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationCause::WrongType { field }),
    }
}

fn non_empty<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationCause> {
    let value = required_str(fields, field)?;
    if value.trim().is_empty() {
        return Err(ValidationCause::EmptyField { field });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(body: &str) -> Result<CreateArgs, ValidationError> {
        CreateArgsValidator::new().validate(&Request::new(body, "POST"))
    }

    #[test]
    fn accepts_well_formed_body() {
        let args = validate(r#"{"name":"baz","description":"bar","price":"9.99"}"#).unwrap();
        assert_eq!(args.name(), "baz");
        assert_eq!(args.description(), "bar");
        assert_eq!(args.price(), "9.99");
    }

    #[test]
    fn accepts_integer_price_and_extra_fields() {
        let args =
            validate(r#"{"name":"a","description":"b","price":"10","colour":"red"}"#).unwrap();
        assert_eq!(args.price(), "10");
    }

    #[test]
    fn rejects_non_json_body() {
        let err = validate("foo").unwrap_err();
        assert!(matches!(err.cause(), ValidationCause::MalformedBody(_)));
    }

    #[test]
    fn rejects_non_object_body() {
        let err = validate("[1,2]").unwrap_err();
        assert!(matches!(err.cause(), ValidationCause::NotAnObject));
    }

    #[test]
    fn rejects_missing_field() {
        let err = validate(r#"{"name":"baz","price":"9.99"}"#).unwrap_err();
        assert!(matches!(
            err.cause(),
            ValidationCause::MissingField {
                field: "description"
            }
        ));
    }

    #[test]
    fn rejects_null_as_missing() {
        let err = validate(r#"{"name":null,"description":"bar","price":"1"}"#).unwrap_err();
        assert!(matches!(
            err.cause(),
            ValidationCause::MissingField { field: "name" }
        ));
    }

    #[test]
    fn rejects_wrong_type() {
        let err = validate(r#"{"name":"baz","description":"bar","price":9.99}"#).unwrap_err();
        assert!(matches!(
            err.cause(),
            ValidationCause::WrongType { field: "price" }
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let err = validate(r#"{"name":"  ","description":"bar","price":"1"}"#).unwrap_err();
        assert!(matches!(
            err.cause(),
            ValidationCause::EmptyField { field: "name" }
        ));
    }

    #[test]
    fn rejects_negative_and_non_numeric_prices() {
        for price in ["-1", "abc", "1.", ".5", "1e3", ""] {
            let body = format!(r#"{{"name":"a","description":"b","price":"{price}"}}"#);
            let err = validate(&body).unwrap_err();
            assert!(
                matches!(err.cause(), ValidationCause::InvalidPrice { value } if value == price),
                "price {price:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_message_includes_cause() {
        let err = validate(r#"{"description":"b","price":"1"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation failed: missing required field `name`"
        );
    }

    #[test]
    fn invalid_encoding_message_names_utf8() {
        let bytes: &[u8] = b"\xFF";
        let utf8 = std::str::from_utf8(bytes).unwrap_err();
        let err = ValidationError::from(ValidationCause::InvalidEncoding(utf8));
        assert!(err
            .to_string()
            .starts_with("validation failed: request body is not valid UTF-8"));
    }
}

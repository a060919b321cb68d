//! Product domain record and the inbound request envelope.

use serde::{Deserialize, Serialize};

/// Raw inbound request as handed over by the transport.
///
/// Constructed once per call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Raw request body.
    pub body: String,
    /// Method token (e.g. `"POST"`).
    pub method: String,
}

impl Request {
    /// Creates a request from a body and method token.
    #[must_use]
    pub fn new(body: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            method: method.into(),
        }
    }
}

/// Caller-supplied product attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributes {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative decimal price kept as a string to avoid float rounding.
    pub price: String,
}

/// A persisted product.
///
/// `id` is assigned once at creation and never changes. `created_at` is
/// taken from the injected clock when the product is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Caller-supplied attributes.
    pub attributes: ProductAttributes,
    /// Unique product identifier.
    pub id: String,
    /// Creation time in milliseconds since Unix epoch.
    pub created_at: u64,
}

impl ProductDto {
    /// Creates a product record.
    #[must_use]
    pub fn new(attributes: ProductAttributes, id: impl Into<String>, created_at: u64) -> Self {
        Self {
            attributes,
            id: id.into(),
            created_at,
        }
    }
}

//! Mapping between `ProductDto` and the storage item representation.
//!
//! Items are flat: `id`, `name`, `description`, `price` as strings and
//! `createdAt` as unsigned milliseconds since epoch.

use products_core::{Item, ProductAttributes, ProductDto, Value};

use super::client::KEY_ATTRIBUTE;

/// Item attribute names.
pub mod attributes {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const CREATED_AT: &str = "createdAt";
}

/// A stored item could not be turned back into a product.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapperError {
    #[error("item is missing attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error("attribute `{name}` is {found}, expected {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("attribute `createdAt` is negative: {0}")]
    NegativeTimestamp(i64),
}

/// Converts products to and from storage items.
pub trait ProductMapper: Send + Sync {
    /// Maps a product to its item representation.
    fn to_item(&self, product: &ProductDto) -> Item;

    /// Maps an item back to a product.
    ///
    /// `fallback_created_at` is used only when the item has no `createdAt`
    /// attribute; a stored timestamp is always preserved.
    ///
    /// # Errors
    ///
    /// Returns `MapperError` if a required attribute is missing or mistyped.
    fn from_item(&self, item: &Item, fallback_created_at: u64) -> Result<ProductDto, MapperError>;
}

/// The default flat-item mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductItemMapper;

impl ProductMapper for ProductItemMapper {
    fn to_item(&self, product: &ProductDto) -> Item {
        let mut item = Item::new();
        item.insert(KEY_ATTRIBUTE.to_string(), Value::from(product.id.as_str()));
        item.insert(
            attributes::NAME.to_string(),
            Value::from(product.attributes.name.as_str()),
        );
        item.insert(
            attributes::DESCRIPTION.to_string(),
            Value::from(product.attributes.description.as_str()),
        );
        item.insert(
            attributes::PRICE.to_string(),
            Value::from(product.attributes.price.as_str()),
        );
        item.insert(
            attributes::CREATED_AT.to_string(),
            Value::UInt(product.created_at),
        );
        item
    }

    fn from_item(&self, item: &Item, fallback_created_at: u64) -> Result<ProductDto, MapperError> {
        let created_at = match item.get(attributes::CREATED_AT) {
            None | Some(Value::Null) => fallback_created_at,
            Some(Value::UInt(n)) => *n,
            // Items written by other tools may carry a signed integer.
            Some(Value::Int(n)) => {
                u64::try_from(*n).map_err(|_| MapperError::NegativeTimestamp(*n))?
            }
            Some(other) => {
                return Err(MapperError::WrongType {
                    name: attributes::CREATED_AT,
                    expected: "uint",
                    found: other.kind(),
                })
            }
        };

        Ok(ProductDto {
            attributes: ProductAttributes {
                name: string_attr(item, attributes::NAME)?,
                description: string_attr(item, attributes::DESCRIPTION)?,
                price: string_attr(item, attributes::PRICE)?,
            },
            id: string_attr(item, KEY_ATTRIBUTE)?,
            created_at,
        })
    }
}

fn string_attr(item: &Item, name: &'static str) -> Result<String, MapperError> {
    match item.get(name) {
        None => Err(MapperError::MissingAttribute(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(MapperError::WrongType {
            name,
            expected: "string",
            found: other.kind(),
        }),
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A catalog record as persisted on disk.
///
/// Field order is the on-disk key order: `id` is written last.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: i64,
    pub id: u64,
}

/// Creation input. Every field is optional here so that a missing one can be
/// reported instead of failing deserialization; `into_product` enforces presence.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
}

impl NewProduct {
    /// Input with all six fields present.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        thumbnail: impl Into<String>,
        code: impl Into<String>,
        stock: i64,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            price: Some(price),
            thumbnail: Some(thumbnail.into()),
            code: Some(code.into()),
            stock: Some(stock),
        }
    }

    /// Check that every field is present and build the record with `id`.
    pub fn into_product(self, id: u64) -> Result<Product, ServiceError> {
        Ok(Product {
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            price: finite_price(required(self.price, "price")?)?,
            thumbnail: required(self.thumbnail, "thumbnail")?,
            code: required(self.code, "code")?,
            stock: required(self.stock, "stock")?,
            id,
        })
    }
}

/// Partial update. `None` keeps the current value.
///
/// NOTE: empty strings, a zero price and zero stock are also treated as "not
/// provided", so an update can never clear a text field or set price/stock to 0.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::missing_field(field))
}

/// JSON has no representation for NaN or infinity; such a price would be
/// written as `null` and make the file unreadable.
fn finite_price(price: f64) -> Result<f64, ServiceError> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(ServiceError::Validation(format!("price must be a finite number, got {price}")))
    }
}

fn provided_str(v: &Option<String>) -> Option<&String> {
    v.as_ref().filter(|s| !s.is_empty())
}

fn provided_price(v: Option<f64>) -> Option<f64> {
    v.filter(|p| *p != 0.0 && !p.is_nan())
}

fn provided_stock(v: Option<i64>) -> Option<i64> {
    v.filter(|s| *s != 0)
}

impl ProductPatch {
    /// Whether the patch carries a code that will replace the current one.
    pub fn is_provided_code(&self) -> bool {
        provided_str(&self.code).is_some()
    }

    /// Reject values that cannot be persisted. A NaN price counts as "not
    /// provided" and passes; an infinite one does not.
    pub fn validate(&self) -> Result<(), ServiceError> {
        match provided_price(self.price) {
            Some(price) => finite_price(price).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Merge onto `current`, keeping its id.
    pub fn apply(&self, current: &Product) -> Product {
        Product {
            title: provided_str(&self.title).unwrap_or(&current.title).clone(),
            description: provided_str(&self.description).unwrap_or(&current.description).clone(),
            price: provided_price(self.price).unwrap_or(current.price),
            thumbnail: provided_str(&self.thumbnail).unwrap_or(&current.thumbnail).clone(),
            code: provided_str(&self.code).unwrap_or(&current.code).clone(),
            stock: provided_stock(self.stock).unwrap_or(current.stock),
            id: current.id,
        }
    }
}

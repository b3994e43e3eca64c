//! Catalog products and the admin product form.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as stored in the catalog and returned by the API.
///
/// Field names match the JSON the client renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Price,
    pub product_img: String,
}

/// Form-level validation failures for a [`ProductDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Url must be at least {min} chars")]
    ImageUrlTooShort { min: usize },

    #[error("Url must be less than {max} chars")]
    ImageUrlTooLong { max: usize },

    #[error("Name must be at least {min} chars")]
    NameTooShort { min: usize },

    #[error("Name must be less than {max} chars")]
    NameTooLong { max: usize },

    #[error("Price must be a valid number")]
    PriceNotANumber,

    #[error("Price must be greater than zero")]
    PriceNotPositive,

    #[error("Price must be less than {}", .max.to_fixed())]
    PriceTooHigh { max: Price },
}

impl ValidationError {
    /// The form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field } => *field,
            Self::ImageUrlTooShort { .. } | Self::ImageUrlTooLong { .. } => "imageUrl",
            Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::PriceNotANumber | Self::PriceNotPositive | Self::PriceTooHigh { .. } => "price",
        }
    }
}

/// Raw values of the create/edit product form, as typed by an admin.
///
/// `price` stays a string until [`ProductDraft::validate`] so that a
/// non-numeric entry is reported as a validation error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub image_url: String,
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub image_url: String,
    pub name: String,
    pub price: Price,
}

impl ProductDraft {
    pub const IMAGE_URL_MIN: usize = 10;
    pub const IMAGE_URL_MAX: usize = 200;
    pub const NAME_MIN: usize = 4;
    pub const NAME_MAX: usize = 50;

    /// Highest price the catalog accepts, in cents.
    const PRICE_MAX_CENTS: i64 = 20_000;

    /// Build a draft from form values.
    #[must_use]
    pub fn new(image_url: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            name: name.into(),
            price: price.into(),
        }
    }

    /// Whether every field has some input (the submit button is disabled otherwise).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.image_url.trim().is_empty()
            && !self.name.trim().is_empty()
            && !self.price.trim().is_empty()
    }

    /// Validate the draft, reporting the first failing field in form order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let image_url = self.image_url.trim();
        let name = self.name.trim();
        let price = self.price.trim();

        if image_url.is_empty() {
            return Err(ValidationError::Required { field: "imageUrl" });
        }
        let url_len = image_url.chars().count();
        if url_len < Self::IMAGE_URL_MIN {
            return Err(ValidationError::ImageUrlTooShort {
                min: Self::IMAGE_URL_MIN,
            });
        }
        if url_len > Self::IMAGE_URL_MAX {
            return Err(ValidationError::ImageUrlTooLong {
                max: Self::IMAGE_URL_MAX,
            });
        }

        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }
        let name_len = name.chars().count();
        if name_len < Self::NAME_MIN {
            return Err(ValidationError::NameTooShort {
                min: Self::NAME_MIN,
            });
        }
        if name_len > Self::NAME_MAX {
            return Err(ValidationError::NameTooLong {
                max: Self::NAME_MAX,
            });
        }

        if price.is_empty() {
            return Err(ValidationError::Required { field: "price" });
        }
        let price = Price::parse(price).map_err(|_| ValidationError::PriceNotANumber)?;
        if price <= Price::ZERO {
            return Err(ValidationError::PriceNotPositive);
        }
        let max = Price::from_cents(Self::PRICE_MAX_CENTS);
        if price > max {
            return Err(ValidationError::PriceTooHigh { max });
        }

        Ok(NewProduct {
            image_url: image_url.to_owned(),
            name: name.to_owned(),
            price,
        })
    }
}

/// Accept `"4.50"` as well as `4.5` for a string field.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(url: &str, name: &str, price: &str) -> ProductDraft {
        ProductDraft::new(url, name, price)
    }

    const URL: &str = "https://cdn.frostbites.co/mint.jpg";

    #[test]
    fn test_valid_draft() {
        let product = draft(URL, " Mint Chip ", "4.5").validate().unwrap();
        assert_eq!(product.name, "Mint Chip");
        assert_eq!(product.price, Price::from_cents(450));
    }

    #[test]
    fn test_field_lengths() {
        assert_eq!(
            draft("http://x", "Mint", "1").validate(),
            Err(ValidationError::ImageUrlTooShort { min: 10 })
        );
        assert_eq!(
            draft(&"u".repeat(201), "Mint", "1").validate(),
            Err(ValidationError::ImageUrlTooLong { max: 200 })
        );
        assert_eq!(
            draft(URL, "Ube", "1").validate(),
            Err(ValidationError::NameTooShort { min: 4 })
        );
        assert_eq!(
            draft(URL, &"n".repeat(51), "1").validate(),
            Err(ValidationError::NameTooLong { max: 50 })
        );
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(
            draft(URL, "Mint", "free").validate(),
            Err(ValidationError::PriceNotANumber)
        );
        assert_eq!(
            draft(URL, "Mint", "0").validate(),
            Err(ValidationError::PriceNotPositive)
        );
        assert_eq!(
            draft(URL, "Mint", "-2").validate(),
            Err(ValidationError::PriceNotPositive)
        );
        assert!(draft(URL, "Mint", "200").validate().is_ok());

        let err = draft(URL, "Mint", "200.01").validate().unwrap_err();
        assert_eq!(err.to_string(), "Price must be less than 200.00");
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn test_required_fields_and_completeness() {
        let empty = ProductDraft::default();
        assert!(!empty.is_complete());
        assert_eq!(
            empty.validate(),
            Err(ValidationError::Required { field: "imageUrl" })
        );
        assert_eq!(
            draft(URL, "  ", "1").validate(),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn test_deserialize_camel_case_with_numeric_price() {
        let json = r#"{"imageUrl":"https://cdn.frostbites.co/a.jpg","name":"Vanilla","price":3.5}"#;
        let parsed: ProductDraft = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, "3.5");
        assert_eq!(parsed.image_url, "https://cdn.frostbites.co/a.jpg");
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            product_id: ProductId::new(1),
            product_name: "Vanilla".to_string(),
            product_price: Price::from_cents(350),
            product_img: "https://cdn.frostbites.co/v.jpg".to_string(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["product_id"], 1);
        assert_eq!(value["product_price"], "3.50");
    }
}

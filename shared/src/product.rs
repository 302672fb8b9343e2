//! Product records and the editable draft behind the product form.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategorySelection;

/// Key assigned to a product by the document database.
pub type ProductId = String;

/// A validated product, as stored in the product collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub material: String,
    pub main_category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub child_category: String,
}

impl Product {
    /// Category path for list display, e.g. `living-room / chairs / kids-chair`.
    pub fn category_path(&self) -> String {
        [&self.main_category, &self.sub_category, &self.child_category]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Scalar draft fields that `set_field` can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Price,
    Image,
    Dimensions,
    Material,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::Image => "image",
            ProductField::Dimensions => "dimensions",
            ProductField::Material => "material",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress product. Price is kept as raw input until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub dimensions: String,
    pub material: String,
    pub category: CategorySelection,
}

impl ProductDraft {
    pub fn field(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Description => &self.description,
            ProductField::Price => &self.price,
            ProductField::Image => &self.image,
            ProductField::Dimensions => &self.dimensions,
            ProductField::Material => &self.material,
        }
    }

    pub fn set(&mut self, field: ProductField, value: String) {
        let slot = match field {
            ProductField::Name => &mut self.name,
            ProductField::Description => &mut self.description,
            ProductField::Price => &mut self.price,
            ProductField::Image => &mut self.image,
            ProductField::Dimensions => &mut self.dimensions,
            ProductField::Material => &mut self.material,
        };
        *slot = value;
    }
}

pub mod builtin;
pub mod partners;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use partners::{AffiliatePartner, PartnerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Cleanser,
    Moisturizer,
    Serum,
    Sunscreen,
    Treatment,
    Toner,
    Mask,
    Exfoliant,
}

impl ProductCategory {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "cleanser" | "nettoyant" => Some(ProductCategory::Cleanser),
            "moisturizer" | "hydratant" => Some(ProductCategory::Moisturizer),
            "serum" | "sérum" => Some(ProductCategory::Serum),
            "sunscreen" | "protection solaire" => Some(ProductCategory::Sunscreen),
            "treatment" | "traitement" => Some(ProductCategory::Treatment),
            "toner" | "lotion" => Some(ProductCategory::Toner),
            "mask" | "masque" => Some(ProductCategory::Mask),
            "exfoliant" | "gommage" => Some(ProductCategory::Exfoliant),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Cleanser => "cleanser",
            ProductCategory::Moisturizer => "moisturizer",
            ProductCategory::Serum => "serum",
            ProductCategory::Sunscreen => "sunscreen",
            ProductCategory::Treatment => "treatment",
            ProductCategory::Toner => "toner",
            ProductCategory::Mask => "mask",
            ProductCategory::Exfoliant => "exfoliant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinConcern {
    Acne,
    Aging,
    Dryness,
    Oiliness,
    Sensitivity,
    Pigmentation,
    Pores,
    Redness,
}

impl SkinConcern {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "acne" => Some(SkinConcern::Acne),
            "aging" => Some(SkinConcern::Aging),
            "dryness" => Some(SkinConcern::Dryness),
            "oiliness" => Some(SkinConcern::Oiliness),
            "sensitivity" => Some(SkinConcern::Sensitivity),
            "pigmentation" => Some(SkinConcern::Pigmentation),
            "pores" => Some(SkinConcern::Pores),
            "redness" => Some(SkinConcern::Redness),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkinConcern::Acne => "acne",
            SkinConcern::Aging => "aging",
            SkinConcern::Dryness => "dryness",
            SkinConcern::Oiliness => "oiliness",
            SkinConcern::Sensitivity => "sensitivity",
            SkinConcern::Pigmentation => "pigmentation",
            SkinConcern::Pores => "pores",
            SkinConcern::Redness => "redness",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub category: ProductCategory,
    pub skin_concerns: Vec<SkinConcern>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
    pub affiliate_url: String,
    pub partner_id: String,
    pub commission: f64,
    pub in_stock: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub is_recommended: bool,
}

impl Product {
    pub fn has_concern(&self, concern: SkinConcern) -> bool {
        self.skin_concerns.contains(&concern)
    }

    /// Case-insensitive substring match over the ingredient list.
    pub fn has_ingredient_like(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Read-only product collection handed to the recommendation engine.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn builtin() -> Self {
        Self::new(builtin::products())
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn by_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    pub fn by_concern(&self, concern: SkinConcern) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.has_concern(concern))
            .collect()
    }
}

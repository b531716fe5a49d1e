//! Catalog reference data.
//!
//! Products and variants are owned by the remote catalog. The engine keeps
//! copies of them and never mutates them.

use crate::ids::{ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductImage {
    /// Image URL.
    pub src: String,
}

/// A product as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog-unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Variants in catalog order; ids are unique within the product.
    pub variants: Vec<Variant>,
    /// Thumbnail, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ProductImage>,
}

impl Product {
    /// Create a product with no variants.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            variants: Vec::new(),
            image: None,
        }
    }

    /// Add a variant, ignoring it if a variant with the same id exists.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        if !self.has_variant(&variant.id) {
            self.variants.push(variant);
        }
        self
    }

    /// Set the thumbnail.
    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.image = Some(ProductImage { src: src.into() });
        self
    }

    /// Look up a variant by id.
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// Check whether this product offers a variant with the given id.
    pub fn has_variant(&self, id: &VariantId) -> bool {
        self.variant(id).is_some()
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    /// Identifier, unique within its product.
    pub id: VariantId,
    /// Parent product, when the catalog reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Display title (e.g. "S / White / Cotton").
    pub title: String,
    /// Non-negative unit price.
    pub price: Money,
}

impl Variant {
    /// Create a new variant.
    pub fn new(id: impl Into<VariantId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            product_id: None,
            title: title.into(),
            price,
        }
    }

    /// Record the parent product.
    pub fn of_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }
}

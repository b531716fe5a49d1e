//! Decoding of catalog search responses.
//!
//! The catalog has shipped a few response shapes: a bare array of products, or
//! an object wrapping the array next to a page count. Ids arrive as numbers or
//! strings and prices as decimal strings or numbers. Anything unusable degrades
//! to "no items, page count unknown" instead of an error, so the picker's page
//! controls never see a bogus count.

use picker_core::catalog::{Product, ProductImage, Variant};
use picker_core::money::{Currency, Money};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::SearchPage;

const ITEM_KEYS: [&str; 3] = ["products", "items", "data"];
const TOTAL_PAGES_KEYS: [&str; 2] = ["totalPages", "total_pages"];

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Text(String),
    Number(f64),
}

impl WirePrice {
    fn to_money(&self, currency: Currency) -> Option<Money> {
        match self {
            WirePrice::Text(s) => Money::parse_decimal(s, currency),
            WirePrice::Number(n) if n.is_finite() && *n >= 0.0 => {
                Some(Money::from_decimal(*n, currency))
            }
            WirePrice::Number(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct WireImage {
    src: String,
}

#[derive(Deserialize)]
struct WireVariant {
    id: WireId,
    #[serde(default)]
    product_id: Option<WireId>,
    #[serde(default)]
    title: String,
    price: WirePrice,
}

#[derive(Deserialize)]
struct WireProduct {
    id: WireId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    variants: Vec<Value>,
    #[serde(default)]
    image: Option<WireImage>,
}

/// Decode a raw response body.
pub fn parse_search_body(body: &[u8], currency: Currency) -> SearchPage {
    if body.iter().all(u8::is_ascii_whitespace) {
        return SearchPage::empty();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => parse_search_value(value, currency),
        Err(e) => {
            warn!(error = %e, "catalog response is not JSON");
            SearchPage::empty()
        }
    }
}

/// Decode an already-parsed JSON document.
pub fn parse_search_value(value: Value, currency: Currency) -> SearchPage {
    let (items, total_pages) = match value {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let total_pages = TOTAL_PAGES_KEYS
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_u64))
                .filter(|n| *n >= 1)
                .map(|n| n.min(u32::MAX as u64) as u32);
            let items = ITEM_KEYS
                .iter()
                .find_map(|k| match map.remove(*k) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .unwrap_or_default();
            (items, total_pages)
        }
        Value::Null => (Vec::new(), None),
        other => {
            warn!(kind = value_kind(&other), "unexpected catalog response shape");
            (Vec::new(), None)
        }
    };

    let items = items
        .into_iter()
        .filter_map(|item| decode_product(item, currency))
        .collect();

    SearchPage { items, total_pages }
}

fn decode_product(value: Value, currency: Currency) -> Option<Product> {
    let wire: WireProduct = match serde_json::from_value(value) {
        Ok(wire) => wire,
        Err(e) => {
            warn!(error = %e, "skipping malformed catalog product");
            return None;
        }
    };

    let mut product = Product::new(wire.id.into_string(), wire.title);
    product.image = wire.image.map(|i| ProductImage { src: i.src });

    for raw in wire.variants {
        let Some(variant) = decode_variant(raw, currency) else {
            continue;
        };
        let variant = if variant.product_id.is_some() {
            variant
        } else {
            variant.of_product(product.id.clone())
        };
        product = product.with_variant(variant);
    }
    Some(product)
}

fn decode_variant(value: Value, currency: Currency) -> Option<Variant> {
    let wire: WireVariant = match serde_json::from_value(value) {
        Ok(wire) => wire,
        Err(e) => {
            warn!(error = %e, "skipping malformed catalog variant");
            return None;
        }
    };
    let id = wire.id.into_string();
    let Some(price) = wire.price.to_money(currency) else {
        warn!(variant = %id, "skipping variant with invalid price");
        return None;
    };

    let mut variant = Variant::new(id, wire.title, price);
    variant.product_id = wire.product_id.map(|id| id.into_string().into());
    Some(variant)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

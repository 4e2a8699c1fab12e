//! Normalization from raw sheet rows to [`bsi_core::Product`].
//!
//! Normalization never fails: absent or unparsable cells fall back to
//! literal defaults, so callers must tolerate zeroed prices and stock.
//! Cell-level parsing lives in [`crate::parse`].

use bsi_core::{Product, ProductId, SpecEntry};

use crate::parse::{cell_float, cell_int, cell_text, is_checked, is_truthy, split_list};
use crate::types::RawProduct;

pub const DEFAULT_NAME: &str = "Producto sin nombre";
pub const DEFAULT_BRAND: &str = "Sin marca";
pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_DESCRIPTION: &str = "Sin descripción disponible.";

/// Normalizes one raw sheet row into a [`Product`].
#[must_use]
pub fn normalize_product(raw: RawProduct) -> Product {
    let name = cell_text(&raw.nombre).unwrap_or_else(|| DEFAULT_NAME.to_string());
    let brand = cell_text(&raw.marca).unwrap_or_else(|| DEFAULT_BRAND.to_string());
    let category = cell_text(&raw.categoria)
        .or_else(|| cell_text(&raw.categoria_plain))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let description =
        cell_text(&raw.descripcion).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    let id = ProductId::from_json(&raw.id).unwrap_or_else(|| {
        let derived = ProductId::derived(&name, &brand, &category);
        tracing::debug!(id = %derived, name = %name, "row has no id; derived a stable one");
        derived
    });

    let price = cell_float(&raw.precio).map_or(0.0, |p| p.max(0.0));

    // Any truthy discount cell marks a sale price, even one that fails to
    // parse; that case is dropped rather than carried as NaN.
    let sale_price = if is_truthy(&raw.oferta) {
        cell_float(&raw.oferta).map(|p| p.max(0.0))
    } else {
        None
    };

    let stock = cell_int(&raw.stock)
        .map_or(0, |s| u32::try_from(s.max(0)).unwrap_or(u32::MAX));

    let image_refs = [&raw.image, &raw.image2, &raw.image3, &raw.image4]
        .into_iter()
        .filter_map(cell_text)
        .collect();

    let colors = split_list(&raw.color);

    let specs = [
        ("Material", &raw.material),
        ("Peso", &raw.peso),
        ("Color", &raw.color),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        cell_text(value).map(|value| SpecEntry {
            label: label.to_string(),
            value,
        })
    })
    .collect();

    Product {
        id,
        name,
        brand,
        category,
        description,
        price,
        sale_price,
        stock,
        image_refs,
        colors,
        specs,
        is_featured: is_checked(&raw.grillaprincipal),
    }
}

/// Normalizes a full product list, preserving sheet order.
#[must_use]
pub fn normalize_products(raw: Vec<RawProduct>) -> Vec<Product> {
    raw.into_iter().map(normalize_product).collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

use bsi_core::StockTier;
use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawProduct {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn full_row() -> RawProduct {
    raw(json!({
        "id": 7,
        "nombre": "Cuadro Kink Cloud",
        "marca": "Kink",
        "categoría": "Cuadros",
        "precio": "250000",
        "oferta": "199000",
        "stock": "3",
        "descripcion": "Cuadro cromoly 20.75\"",
        "material": "Cromoly",
        "peso": "2.1 kg",
        "color": "Negro, Rojo",
        "image": "https://drive.google.com/file/d/AAA111/view",
        "image2": "",
        "image3": "https://drive.google.com/uc?export=view&id=CCC333",
        "grillaprincipal": "TRUE"
    }))
}

// -----------------------------------------------------------------------
// defaults
// -----------------------------------------------------------------------

#[test]
fn empty_row_gets_literal_defaults() {
    let product = normalize_product(raw(json!({})));
    assert_eq!(product.name, DEFAULT_NAME);
    assert_eq!(product.brand, DEFAULT_BRAND);
    assert_eq!(product.category, DEFAULT_CATEGORY);
    assert_eq!(product.description, DEFAULT_DESCRIPTION);
    assert!(product.price.abs() < f64::EPSILON);
    assert!(product.sale_price.is_none());
    assert_eq!(product.stock, 0);
    assert!(product.image_refs.is_empty());
    assert!(product.colors.is_empty());
    assert!(product.specs.is_empty());
    assert!(!product.is_featured);
}

#[test]
fn blank_strings_count_as_absent() {
    let product = normalize_product(raw(json!({
        "nombre": "",
        "marca": "  ",
        "precio": "",
        "stock": ""
    })));
    assert_eq!(product.name, DEFAULT_NAME);
    assert_eq!(product.brand, DEFAULT_BRAND);
    assert!(product.price.abs() < f64::EPSILON);
    assert_eq!(product.stock, 0);
}

#[test]
fn unparsable_numbers_default_to_zero() {
    let product = normalize_product(raw(json!({ "precio": "consultar", "stock": "muchos" })));
    assert!(product.price.abs() < f64::EPSILON);
    assert_eq!(product.stock, 0);
}

#[test]
fn negative_numbers_clamp_to_zero() {
    let product = normalize_product(raw(json!({ "precio": -10, "stock": "-4" })));
    assert!(product.price.abs() < f64::EPSILON);
    assert_eq!(product.stock, 0);
}

// -----------------------------------------------------------------------
// field mapping
// -----------------------------------------------------------------------

#[test]
fn full_row_maps_every_field() {
    let product = normalize_product(full_row());
    assert_eq!(product.id.as_str(), "7");
    assert_eq!(product.name, "Cuadro Kink Cloud");
    assert_eq!(product.brand, "Kink");
    assert_eq!(product.category, "Cuadros");
    assert!((product.price - 250_000.0).abs() < f64::EPSILON);
    assert_eq!(product.sale_price, Some(199_000.0));
    assert!(product.is_on_sale());
    assert_eq!(product.stock, 3);
    assert_eq!(product.stock_tier(5), StockTier::Low);
    assert_eq!(product.colors, vec!["Negro", "Rojo"]);
    assert!(product.is_featured);
}

#[test]
fn category_without_accent_is_accepted() {
    let product = normalize_product(raw(json!({ "categoria": "Ruedas" })));
    assert_eq!(product.category, "Ruedas");
}

#[test]
fn rows_with_both_category_spellings_deserialize() {
    let rows: Vec<RawProduct> = serde_json::from_value(json!([
        { "nombre": "A", "categoría": "Cuadros", "categoria": "" },
        { "nombre": "B", "categoría": "", "categoria": "Ruedas" },
        { "nombre": "C", "categoría": "Ruedas" }
    ]))
    .expect("both spellings in one row must not be a duplicate field");

    let categories: Vec<String> = normalize_products(rows)
        .into_iter()
        .map(|p| p.category)
        .collect();
    assert_eq!(categories, vec!["Cuadros", "Ruedas", "Ruedas"]);
}

#[test]
fn oversized_stock_saturates_instead_of_zeroing() {
    let product = normalize_product(raw(json!({ "stock": "99999999999999999999" })));
    assert_eq!(product.stock, u32::MAX);
    assert_eq!(product.stock_tier(5), StockTier::Available);
}

#[test]
fn accented_category_wins_when_both_are_filled() {
    let product = normalize_product(raw(json!({
        "categoría": "Cuadros",
        "categoria": "Ruedas"
    })));
    assert_eq!(product.category, "Cuadros");
}

#[test]
fn image_refs_keep_order_and_drop_blanks() {
    let product = normalize_product(full_row());
    assert_eq!(
        product.image_refs,
        vec![
            "https://drive.google.com/file/d/AAA111/view",
            "https://drive.google.com/uc?export=view&id=CCC333",
        ]
    );
}

#[test]
fn specs_only_include_filled_cells_in_fixed_order() {
    let product = normalize_product(full_row());
    let labels: Vec<&str> = product.specs.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Material", "Peso", "Color"]);

    let sparse = normalize_product(raw(json!({ "peso": "1 kg" })));
    assert_eq!(sparse.specs.len(), 1);
    assert_eq!(sparse.specs[0].label, "Peso");
    assert_eq!(sparse.specs[0].value, "1 kg");
}

#[test]
fn numeric_cells_accept_json_numbers() {
    let product = normalize_product(raw(json!({ "precio": 1500.5, "stock": 12 })));
    assert!((product.price - 1500.5).abs() < f64::EPSILON);
    assert_eq!(product.stock, 12);
    assert_eq!(product.stock_tier(5), StockTier::Available);
}

// -----------------------------------------------------------------------
// sale price
// -----------------------------------------------------------------------

#[test]
fn sale_price_absent_when_discount_cell_empty() {
    let product = normalize_product(raw(json!({ "precio": 100, "oferta": "" })));
    assert!(product.sale_price.is_none());
    assert!(!product.is_on_sale());
}

#[test]
fn sale_price_absent_when_discount_cell_zero() {
    let product = normalize_product(raw(json!({ "precio": 100, "oferta": 0 })));
    assert!(product.sale_price.is_none());
}

#[test]
fn sale_price_equal_to_price_is_not_on_sale() {
    let product = normalize_product(raw(json!({ "precio": 100, "oferta": 100 })));
    assert_eq!(product.sale_price, Some(100.0));
    assert!(!product.is_on_sale());
}

#[test]
fn unparsable_discount_is_dropped() {
    let product = normalize_product(raw(json!({ "precio": 100, "oferta": "pronto" })));
    assert!(product.sale_price.is_none());
}

// -----------------------------------------------------------------------
// featured flag
// -----------------------------------------------------------------------

#[test]
fn featured_accepts_bool_and_text() {
    for value in [json!(true), json!("TRUE"), json!("true")] {
        let product = normalize_product(raw(json!({ "grillaprincipal": value })));
        assert!(product.is_featured);
    }
    for value in [json!(false), json!("FALSE"), json!(""), json!(1)] {
        let product = normalize_product(raw(json!({ "grillaprincipal": value })));
        assert!(!product.is_featured);
    }
}

// -----------------------------------------------------------------------
// identifiers
// -----------------------------------------------------------------------

#[test]
fn string_and_numeric_ids_normalize_identically() {
    let numeric = normalize_product(raw(json!({ "id": 12 })));
    let text = normalize_product(raw(json!({ "id": "12" })));
    assert_eq!(numeric.id, text.id);
}

#[test]
fn missing_id_is_derived_and_stable() {
    let row = json!({ "nombre": "Pedales", "marca": "Odyssey", "categoría": "Pedales" });
    let first = normalize_product(raw(row.clone()));
    let second = normalize_product(raw(row));
    assert_eq!(first.id, second.id);
    assert!(first.id.as_str().starts_with("h-"));
}

#[test]
fn normalize_products_preserves_order() {
    let rows = vec![
        raw(json!({ "id": 3 })),
        raw(json!({ "id": 1 })),
        raw(json!({ "id": 2 })),
    ];
    let ids: Vec<String> = normalize_products(rows)
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(ids, vec!["3", "1", "2"]);
}

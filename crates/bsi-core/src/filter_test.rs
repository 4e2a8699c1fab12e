use super::*;
use crate::products::ProductId;

fn product(id: &str, name: &str, brand: &str, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        description: String::new(),
        price: 1000.0,
        sale_price: None,
        stock: 3,
        image_refs: vec![],
        colors: vec![],
        specs: vec![],
        is_featured: false,
    }
}

fn fixture() -> Vec<Product> {
    vec![
        product("1", "Cuadro Street", "Kink", "Cuadros"),
        product("2", "Manubrio 9.5", "Odyssey", "Manubrios"),
        product("3", "Cuadro Park", "Odyssey", "Cuadros"),
        product("4", "Pedales PC", "Odyssey", "Pedales"),
        product("5", "Puños Grip", "ODI", "Accesorios"),
    ]
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn category_parse_sentinels_map_to_all() {
    assert_eq!(CategoryFilter::parse("todos"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("  "), CategoryFilter::All);
}

#[test]
fn category_parse_lowercases_value() {
    assert_eq!(
        CategoryFilter::parse(" Cuadros "),
        CategoryFilter::Only("cuadros".to_string())
    );
}

#[test]
fn query_term_is_trimmed_and_lowercased() {
    let query = CatalogQuery::new(CategoryFilter::All, "  ODYSSEY ");
    assert_eq!(query.term(), "odyssey");
}

#[test]
fn unrestricted_query_returns_everything_in_order() {
    let products = fixture();
    let query = CatalogQuery::default();
    assert!(query.is_unrestricted());
    let result = filter_products(&products, &query);
    assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn category_match_is_case_insensitive() {
    let products = fixture();
    let query = CatalogQuery::new(CategoryFilter::parse("CUADROS"), "");
    assert_eq!(ids(&filter_products(&products, &query)), vec!["1", "3"]);
}

#[test]
fn term_matches_name_substring() {
    let products = fixture();
    let query = CatalogQuery::new(CategoryFilter::All, "cuadro");
    assert_eq!(ids(&filter_products(&products, &query)), vec!["1", "3"]);
}

#[test]
fn term_matches_brand_substring() {
    let products = fixture();
    let query = CatalogQuery::new(CategoryFilter::All, "odys");
    assert_eq!(ids(&filter_products(&products, &query)), vec!["2", "3", "4"]);
}

#[test]
fn term_and_category_combine() {
    let products = fixture();
    let query = CatalogQuery::new(CategoryFilter::parse("Cuadros"), "odyssey");
    assert_eq!(ids(&filter_products(&products, &query)), vec!["3"]);
}

#[test]
fn term_does_not_search_category_or_description() {
    let products = fixture();
    let query = CatalogQuery::new(CategoryFilter::All, "accesorios");
    assert!(filter_products(&products, &query).is_empty());
}

#[test]
fn no_match_yields_empty_subset() {
    let products = fixture();
    let query = CatalogQuery::new(CategoryFilter::parse("Ruedas"), "");
    assert!(filter_products(&products, &query).is_empty());
}

#[test]
fn predicates_commute_for_every_combination() {
    let products = fixture();
    let categories_to_try = ["todos", "Cuadros", "manubrios", "Ruedas"];
    let terms = ["", "odyssey", "cuadro", "grip", "zzz"];

    for category in categories_to_try {
        for term in terms {
            let query = CatalogQuery::new(CategoryFilter::parse(category), term);

            let category_first: Vec<&Product> = products
                .iter()
                .filter(|p| query.category.accepts(p))
                .filter(|p| query.term_accepts(p))
                .collect();
            let term_first: Vec<&Product> = products
                .iter()
                .filter(|p| query.term_accepts(p))
                .filter(|p| query.category.accepts(p))
                .collect();

            assert_eq!(
                ids(&category_first),
                ids(&term_first),
                "category={category} term={term}"
            );
            assert_eq!(ids(&filter_products(&products, &query)), ids(&term_first));
        }
    }
}

#[test]
fn set_term_and_category_update_query() {
    let products = fixture();
    let mut query = CatalogQuery::default();
    query.set_term("PEDALES");
    assert_eq!(ids(&filter_products(&products, &query)), vec!["4"]);
    query.set_category(CategoryFilter::parse("Cuadros"));
    assert!(filter_products(&products, &query).is_empty());
}

#[test]
fn categories_are_distinct_and_sorted() {
    let products = fixture();
    assert_eq!(
        categories(&products),
        vec!["Accesorios", "Cuadros", "Manubrios", "Pedales"]
    );
}

#[test]
fn categories_of_empty_collection_is_empty() {
    assert!(categories(&[]).is_empty());
}

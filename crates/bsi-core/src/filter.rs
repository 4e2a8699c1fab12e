//! Client-side search and category filtering over a normalized snapshot.
//!
//! Both predicates are evaluated per product in a single pass, so applying
//! them in either order selects the same subset. Source order is preserved.

use std::collections::BTreeSet;

use crate::products::Product;

/// Category selector values that mean "no category restriction".
const ALL_SENTINELS: [&str; 2] = ["todos", "all"];

/// Category half of a [`CatalogQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Lower-cased category name.
    Only(String),
}

impl CategoryFilter {
    /// Parses a selector value. Blank input and the `todos`/`all` sentinels
    /// map to [`CategoryFilter::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().to_lowercase();
        if value.is_empty() || ALL_SENTINELS.contains(&value.as_str()) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }

    #[must_use]
    pub fn accepts(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category.to_lowercase() == *category,
        }
    }
}

/// The current search box text and category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    term: String,
}

impl CatalogQuery {
    #[must_use]
    pub fn new(category: CategoryFilter, term: &str) -> Self {
        Self {
            category,
            term: normalize_term(term),
        }
    }

    /// Replaces the search term; the stored copy is trimmed and lower-cased.
    pub fn set_term(&mut self, term: &str) {
        self.term = normalize_term(term);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// `true` when neither predicate restricts anything.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.term.is_empty() && self.category == CategoryFilter::All
    }

    #[must_use]
    pub fn term_accepts(&self, product: &Product) -> bool {
        self.term.is_empty()
            || product.name.to_lowercase().contains(&self.term)
            || product.brand.to_lowercase().contains(&self.term)
    }

    #[must_use]
    pub fn accepts(&self, product: &Product) -> bool {
        self.category.accepts(product) && self.term_accepts(product)
    }
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Returns the products matching `query`, in their original order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    products.iter().filter(|p| query.accepts(p)).collect()
}

/// Distinct category names, sorted, for the category selector.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;

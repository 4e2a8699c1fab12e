//! Per-view state owned by whoever drives the view.
//!
//! Each session holds the product snapshot it was opened with and
//! re-derives its view model on demand; nothing is shared between views.

use bsi_core::{
    categories, choose_color, contact_link, filter_products, find_product, related_products,
    CatalogQuery, CategoryFilter, CoreError, Product, QuantityStepper,
};

use crate::view::{
    gallery, messages, Availability, CatalogView, DetailView, ProductCard, Stepper, STORE_NAME,
};

/// Lookup failures when opening a detail page.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("no product id was given")]
    MissingId,
    #[error("no product matches id {0:?}")]
    NotFound(String),
}

impl ViewError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ViewError::MissingId => messages::MISSING_ID,
            ViewError::NotFound(_) => messages::NOT_FOUND,
        }
    }
}

/// Catalog page state: the snapshot plus the current search and category.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    products: Vec<Product>,
    categories: Vec<String>,
    query: CatalogQuery,
    low_stock_threshold: u32,
}

impl CatalogSession {
    #[must_use]
    pub fn new(products: Vec<Product>, low_stock_threshold: u32) -> Self {
        let categories = categories(&products);
        Self {
            products,
            categories,
            query: CatalogQuery::default(),
            low_stock_threshold,
        }
    }

    pub fn set_term(&mut self, term: &str) {
        self.query.set_term(term);
    }

    /// Accepts a category name or one of the "all" sentinels.
    pub fn set_category(&mut self, raw: &str) {
        self.query.set_category(CategoryFilter::parse(raw));
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.query)
    }

    /// Cards for every product regardless of the query, used to warm images.
    #[must_use]
    pub fn all_cards(&self) -> Vec<ProductCard> {
        self.products
            .iter()
            .map(|p| ProductCard::from_product(p, self.low_stock_threshold))
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> CatalogView {
        let cards: Vec<ProductCard> = self
            .visible()
            .into_iter()
            .map(|p| ProductCard::from_product(p, self.low_stock_threshold))
            .collect();
        let selected_category = match &self.query.category {
            CategoryFilter::All => None,
            CategoryFilter::Only(name) => Some(name.clone()),
        };
        CatalogView {
            empty_message: cards.is_empty().then_some(messages::CATALOG_EMPTY),
            total: self.products.len(),
            cards,
            categories: self.categories.clone(),
            selected_category,
            term: self.query.term().to_owned(),
        }
    }
}

/// Detail page state: one product, its related items, colour and quantity.
#[derive(Debug, Clone)]
pub struct DetailSession {
    product: Product,
    related: Vec<Product>,
    color: Option<String>,
    stepper: QuantityStepper,
    low_stock_threshold: u32,
}

impl DetailSession {
    /// Opens the product matching `requested` within `products`.
    ///
    /// # Errors
    ///
    /// - [`ViewError::MissingId`] if `requested` is absent or blank.
    /// - [`ViewError::NotFound`] if no product id matches.
    pub fn open(
        products: &[Product],
        requested: Option<&str>,
        related_limit: usize,
        low_stock_threshold: u32,
    ) -> Result<Self, ViewError> {
        let requested = requested
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(ViewError::MissingId)?;
        let product = find_product(products, requested)
            .ok_or_else(|| ViewError::NotFound(requested.to_owned()))?;

        let related = related_products(products, product, related_limit)
            .into_iter()
            .cloned()
            .collect();
        let color = choose_color(product, None).map(str::to_owned);

        Ok(Self {
            stepper: QuantityStepper::new(product.stock),
            product: product.clone(),
            related,
            color,
            low_stock_threshold,
        })
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Selects a colour; unknown colours fall back to the first one offered.
    pub fn select_color(&mut self, requested: Option<&str>) {
        self.color = choose_color(&self.product, requested).map(str::to_owned);
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Sets the quantity, clamped to the stepper bounds.
    pub fn set_quantity(&mut self, quantity: u32) -> u32 {
        self.stepper.set(quantity)
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.stepper.quantity()
    }

    /// Contact deep link for the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidContactNumber`] if `whatsapp_number` is not numeric.
    pub fn contact_link(&self, whatsapp_number: &str) -> Result<String, CoreError> {
        contact_link(
            whatsapp_number,
            &self.product.name,
            self.color.as_deref(),
            self.stepper.quantity(),
        )
    }

    /// Builds the view model for the current selection.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::contact_link`] failures.
    pub fn view(&self, whatsapp_number: &str) -> Result<DetailView, CoreError> {
        let product = &self.product;
        let on_sale = product.is_on_sale();
        let available = product.is_available();
        let related: Vec<ProductCard> = self
            .related
            .iter()
            .map(|p| ProductCard::from_product(p, self.low_stock_threshold))
            .collect();

        Ok(DetailView {
            title: format!("{} - {STORE_NAME}", product.name),
            id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price_label: bsi_core::format_price(product.effective_price()),
            original_price_label: on_sale.then(|| bsi_core::format_price(product.price)),
            on_sale,
            availability: Availability {
                available,
                label: if available { "Disponible" } else { "Agotado" },
            },
            stock_badge: product.stock_tier(self.low_stock_threshold).label(),
            gallery: gallery(product),
            specs: product.specs.clone(),
            colors: product.colors.clone(),
            selected_color: self.color.clone(),
            stepper: Stepper {
                quantity: self.stepper.quantity(),
                min: 1,
                max: self.stepper.max(),
                enabled: available,
            },
            contact_link: self.contact_link(whatsapp_number)?,
            related_message: related.is_empty().then_some(messages::RELATED_EMPTY),
            related,
        })
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

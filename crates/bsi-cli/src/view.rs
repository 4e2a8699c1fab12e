//! Typed view models for the catalog, detail and featured pages.
//!
//! Views are plain data: they are built from normalized products, patched
//! with resolved images, and handed to a [`crate::render::Renderer`].

use serde::Serialize;

use bsi_core::{encode_uri_component, format_price, Product, ProductId, SpecEntry, StockTier};
use bsi_sheets::{ImageOutcome, ImageRequest, ImageSource, ImageStatus};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x600/f0f0f0/333?text=BSI";
pub const SALE_BADGE: &str = "OFERTA";
pub const STORE_NAME: &str = "Bike Stunt Importados";

/// Static user-facing messages. Error detail only goes to the log.
pub mod messages {
    pub const CATALOG_ERROR: &str =
        "Error al cargar productos. Por favor, intenta de nuevo más tarde.";
    pub const CATALOG_EMPTY: &str = "No se encontraron productos.";
    pub const MISSING_ID: &str = "No se especificó un producto.";
    pub const NOT_FOUND: &str = "Producto no encontrado.";
    pub const DETAIL_ERROR: &str = "No se pudo cargar la información del producto.";
    pub const RELATED_EMPTY: &str = "No hay otros productos en esta categoría.";
    pub const FEATURED_ERROR: &str = "No se pudieron cargar las ofertas en este momento.";
    pub const FEATURED_EMPTY: &str = "¡Pronto tendremos nuevas ofertas destacadas!";
}

/// One image position on a card or in a gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSlot {
    pub locator: Option<String>,
    pub source: ImageSource,
    pub src: String,
}

impl ImageSlot {
    pub(crate) fn new(locator: Option<&str>) -> Self {
        Self {
            locator: locator.map(str::to_owned),
            source: ImageSource::Placeholder,
            src: PLACEHOLDER_IMAGE.to_owned(),
        }
    }

    pub(crate) fn fill(&mut self, source: ImageSource) {
        self.src = source.to_src(PLACEHOLDER_IMAGE);
        self.source = source;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Price the customer pays.
    pub price_label: String,
    /// Struck-through list price, present only on sale.
    pub original_price_label: Option<String>,
    pub on_sale: bool,
    pub sale_badge: Option<&'static str>,
    pub stock_tier: StockTier,
    pub stock_badge: &'static str,
    pub image: ImageSlot,
    pub link: String,
}

impl ProductCard {
    #[must_use]
    pub fn from_product(product: &Product, low_stock_threshold: u32) -> Self {
        let on_sale = product.is_on_sale();
        let tier = product.stock_tier(low_stock_threshold);
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price_label: format_price(product.effective_price()),
            original_price_label: on_sale.then(|| format_price(product.price)),
            on_sale,
            sale_badge: on_sale.then_some(SALE_BADGE),
            stock_tier: tier,
            stock_badge: tier.label(),
            image: ImageSlot::new(product.primary_image()),
            link: detail_link(&product.id),
        }
    }

    fn image_request(&self) -> Option<ImageRequest> {
        self.image.locator.as_ref().map(|locator| ImageRequest {
            product_id: self.id.clone(),
            slot: 0,
            locator: locator.clone(),
        })
    }

    fn apply(&mut self, outcome: &ImageOutcome) {
        if outcome.request.product_id == self.id && outcome.request.slot == 0 {
            if let ImageStatus::Resolved(source) = &outcome.status {
                self.image.fill(source.clone());
            }
        }
    }
}

/// Relative link to a product's detail page, with the id escaped.
#[must_use]
pub fn detail_link(id: &ProductId) -> String {
    format!("producto.html?id={}", encode_uri_component(id.as_str()))
}

/// Image requests for every card that has a locator.
#[must_use]
pub fn card_image_requests(cards: &[ProductCard]) -> Vec<ImageRequest> {
    cards.iter().filter_map(ProductCard::image_request).collect()
}

/// Patches resolved images into `cards`. Cancelled outcomes leave the placeholder.
pub fn apply_card_images(cards: &mut [ProductCard], outcomes: &[ImageOutcome]) {
    for outcome in outcomes {
        for card in cards.iter_mut() {
            card.apply(outcome);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub cards: Vec<ProductCard>,
    /// Options for the category selector, sorted.
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    pub term: String,
    pub total: usize,
    /// Set when no card matches.
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    pub available: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stepper {
    pub quantity: u32,
    pub min: u32,
    pub max: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub title: String,
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price_label: String,
    pub original_price_label: Option<String>,
    pub on_sale: bool,
    pub availability: Availability,
    pub stock_badge: &'static str,
    /// Main image first; thumbnails are only meaningful when there are several.
    pub gallery: Vec<ImageSlot>,
    pub specs: Vec<SpecEntry>,
    pub colors: Vec<String>,
    pub selected_color: Option<String>,
    pub stepper: Stepper,
    pub contact_link: String,
    pub related: Vec<ProductCard>,
    pub related_message: Option<&'static str>,
}

impl DetailView {
    /// Gallery slots and related cards that still need resolving.
    #[must_use]
    pub fn image_requests(&self) -> Vec<ImageRequest> {
        let mut requests: Vec<ImageRequest> = self
            .gallery
            .iter()
            .enumerate()
            .filter_map(|(slot, image)| {
                image.locator.as_ref().map(|locator| ImageRequest {
                    product_id: self.id.clone(),
                    slot,
                    locator: locator.clone(),
                })
            })
            .collect();
        requests.extend(card_image_requests(&self.related));
        requests
    }

    pub fn apply_images(&mut self, outcomes: &[ImageOutcome]) {
        for outcome in outcomes {
            if outcome.request.product_id != self.id {
                continue;
            }
            if let (Some(slot), ImageStatus::Resolved(source)) =
                (self.gallery.get_mut(outcome.request.slot), &outcome.status)
            {
                slot.fill(source.clone());
            }
        }
        apply_card_images(&mut self.related, outcomes);
    }
}

/// Builds the gallery for `product`, always with at least the placeholder slot.
#[must_use]
pub fn gallery(product: &Product) -> Vec<ImageSlot> {
    if product.image_refs.is_empty() {
        return vec![ImageSlot::new(None)];
    }
    product
        .image_refs
        .iter()
        .map(|locator| ImageSlot::new(Some(locator)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedView {
    pub cards: Vec<ProductCard>,
    pub empty_message: Option<&'static str>,
}

impl FeaturedView {
    /// Featured products in source order.
    #[must_use]
    pub fn build(products: &[Product], low_stock_threshold: u32) -> Self {
        let cards: Vec<ProductCard> = products
            .iter()
            .filter(|p| p.is_featured)
            .map(|p| ProductCard::from_product(p, low_stock_threshold))
            .collect();
        let empty_message = cards.is_empty().then_some(messages::FEATURED_EMPTY);
        Self {
            cards,
            empty_message,
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

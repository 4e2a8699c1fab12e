//! Helpers behind the product detail page.

use crate::products::Product;

/// Finds the product whose id matches `requested` (see [`crate::ProductId::matches`]).
#[must_use]
pub fn find_product<'a>(products: &'a [Product], requested: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id.matches(requested))
}

/// Up to `limit` other products from the same category, in source order.
#[must_use]
pub fn related_products<'a>(
    products: &'a [Product],
    current: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(limit)
        .collect()
}

/// Picks the colour to quote in the contact message.
///
/// A requested colour is honoured only when the product offers it
/// (case-insensitive); otherwise the first listed colour is preselected.
/// Products without colours yield `None`.
#[must_use]
pub fn choose_color<'a>(product: &'a Product, requested: Option<&str>) -> Option<&'a str> {
    let requested = requested.map(str::trim).filter(|r| !r.is_empty());
    if let Some(wanted) = requested {
        if let Some(found) = product
            .colors
            .iter()
            .find(|c| c.to_lowercase() == wanted.to_lowercase())
        {
            return Some(found.as_str());
        }
    }
    product.colors.first().map(String::as_str)
}

/// Quantity selector bounded to `[1, stock]`.
///
/// Out-of-stock products still get a stepper pinned at 1 so the view can
/// render it disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    quantity: u32,
    max: u32,
}

impl QuantityStepper {
    #[must_use]
    pub fn new(stock: u32) -> Self {
        Self {
            quantity: 1,
            max: stock.max(1),
        }
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Adds one unless already at the stock ceiling. Returns the new quantity.
    pub fn increment(&mut self) -> u32 {
        if self.quantity < self.max {
            self.quantity += 1;
        }
        self.quantity
    }

    /// Removes one unless already at 1. Returns the new quantity.
    pub fn decrement(&mut self) -> u32 {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
        self.quantity
    }

    /// Sets an explicit quantity, clamped into range.
    pub fn set(&mut self, quantity: u32) -> u32 {
        self.quantity = quantity.clamp(1, self.max);
        self.quantity
    }
}

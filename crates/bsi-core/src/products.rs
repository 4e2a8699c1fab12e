use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Stock count at or below which an in-stock product is flagged as running low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Opaque product key, normalized to a string when the row is ingested.
///
/// The spreadsheet may hand back ids as JSON numbers or strings; both forms
/// end up here as the same text (`7`, `7.0` and `"7"` all become `"7"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps an already-textual id, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_owned())
    }

    /// Converts a raw JSON id cell into a `ProductId`.
    ///
    /// Returns `None` for null, booleans, containers and blank strings so the
    /// caller can fall back to [`ProductId::derived`].
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s)),
            serde_json::Value::Number(n) => Some(Self(number_to_id(n))),
            _ => None,
        }
    }

    /// Stable id derived from the product's descriptive fields.
    ///
    /// Used when the source row carries no id. Same inputs always yield the
    /// same id, so deep links survive a reload.
    #[must_use]
    pub fn derived(name: &str, brand: &str, category: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update(b"|");
        hasher.update(brand.as_bytes());
        hasher.update(b"|");
        hasher.update(category.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest
            .iter()
            .take(6)
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(format!("h-{hex}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against an id supplied by a caller (query string, CLI flag).
    ///
    /// Exact text match after trimming, or numeric equality when both sides
    /// parse as finite numbers, so `"7"` matches `"07"` and `"7.0"`.
    #[must_use]
    pub fn matches(&self, requested: &str) -> bool {
        let requested = requested.trim();
        if requested.is_empty() {
            return false;
        }
        if self.0 == requested {
            return true;
        }
        match (parse_finite(&self.0), parse_finite(requested)) {
            (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
            _ => false,
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn number_to_id(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Coarse availability bucket shown as a badge on cards and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTier {
    Out,
    Low,
    Available,
}

impl StockTier {
    /// `Out` at zero, `Low` up to and including `threshold`, `Available` above.
    #[must_use]
    pub fn classify(stock: u32, threshold: u32) -> Self {
        if stock == 0 {
            StockTier::Out
        } else if stock <= threshold {
            StockTier::Low
        } else {
            StockTier::Available
        }
    }

    /// Customer-facing badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StockTier::Out => "Agotado",
            StockTier::Low => "¡Últimas unidades!",
            StockTier::Available => "Disponible",
        }
    }
}

impl std::fmt::Display for StockTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockTier::Out => write!(f, "out"),
            StockTier::Low => write!(f, "low"),
            StockTier::Available => write!(f, "available"),
        }
    }
}

/// One row of the detail page's "Especificaciones" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

/// A catalog item, rebuilt from the spreadsheet on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    /// List price, never negative.
    pub price: f64,
    /// Discounted price, present only when the sheet's discount column is set.
    pub sale_price: Option<f64>,
    pub stock: u32,
    /// Up to four image locators (usually Drive share links), primary first.
    pub image_refs: Vec<String>,
    pub colors: Vec<String>,
    pub specs: Vec<SpecEntry>,
    pub is_featured: bool,
}

impl Product {
    /// `true` only when a sale price exists and undercuts the list price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.price)
    }

    /// Price the customer actually pays.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        match self.sale_price {
            Some(sale) if self.is_on_sale() => sale,
            _ => self.price,
        }
    }

    #[must_use]
    pub fn stock_tier(&self, threshold: u32) -> StockTier {
        StockTier::classify(self.stock, threshold)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_refs.first().map(String::as_str)
    }
}

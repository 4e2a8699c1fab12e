//! Render backends for the view models.
//!
//! Every call returns the complete output for a view; callers replace
//! whatever they showed before rather than appending to it.

use std::fmt::Write as _;

use bsi_sheets::ImageSource;

use crate::view::{CatalogView, DetailView, FeaturedView, ImageSlot, ProductCard};

pub trait Renderer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backend fails to serialize the view.
    fn catalog(&self, view: &CatalogView) -> anyhow::Result<String>;

    /// # Errors
    ///
    /// Returns an error if the backend fails to serialize the view.
    fn detail(&self, view: &DetailView) -> anyhow::Result<String>;

    /// # Errors
    ///
    /// Returns an error if the backend fails to serialize the view.
    fn featured(&self, view: &FeaturedView) -> anyhow::Result<String>;

    /// # Errors
    ///
    /// Returns an error if the backend fails to serialize the slot.
    fn image(&self, slot: &ImageSlot) -> anyhow::Result<String>;

    /// A static message that replaces the whole content region.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to serialize the message.
    fn message(&self, message: &str) -> anyhow::Result<String>;
}

/// Human-readable terminal output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

/// Pretty-printed JSON, one document per render.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

fn image_line(slot: &ImageSlot) -> String {
    match &slot.source {
        ImageSource::DataUri { mime_type, data } => {
            format!("{mime_type} ({} bytes base64)", data.len())
        }
        ImageSource::Placeholder => slot.src.clone(),
    }
}

fn write_card(out: &mut String, card: &ProductCard) -> std::fmt::Result {
    writeln!(out, "[{}] {} · {}", card.id, card.name, card.brand)?;
    let mut pricing = String::new();
    if let Some(badge) = card.sale_badge {
        write!(pricing, "{badge}  ")?;
    }
    if let Some(original) = &card.original_price_label {
        write!(pricing, "{original} → ")?;
    }
    write!(pricing, "{}", card.price_label)?;
    writeln!(out, "    {pricing}   {}", card.stock_badge)?;
    writeln!(out, "    imagen: {}", image_line(&card.image))?;
    writeln!(out, "    {}", card.link)
}

impl Renderer for TextRenderer {
    fn catalog(&self, view: &CatalogView) -> anyhow::Result<String> {
        let mut out = String::new();
        let category = view.selected_category.as_deref().unwrap_or("Todas");
        write!(
            out,
            "Catálogo: {} de {} productos · categoría: {category}",
            view.cards.len(),
            view.total
        )?;
        if !view.term.is_empty() {
            write!(out, " · búsqueda: \"{}\"", view.term)?;
        }
        writeln!(out)?;
        writeln!(out, "Categorías: {}", view.categories.join(", "))?;
        writeln!(out)?;

        if let Some(message) = view.empty_message {
            writeln!(out, "{message}")?;
            return Ok(out);
        }
        for card in &view.cards {
            write_card(&mut out, card)?;
            writeln!(out)?;
        }
        Ok(out)
    }

    fn detail(&self, view: &DetailView) -> anyhow::Result<String> {
        let mut out = String::new();
        writeln!(out, "{}", view.title)?;
        writeln!(out, "{} · {}", view.brand, view.category)?;
        writeln!(out, "{}", view.name)?;
        if let Some(original) = &view.original_price_label {
            writeln!(out, "Antes: {original}")?;
        }
        writeln!(out, "Precio: {}", view.price_label)?;
        writeln!(out, "{} · {}", view.availability.label, view.stock_badge)?;
        writeln!(out)?;
        writeln!(out, "{}", view.description)?;
        writeln!(out)?;

        writeln!(out, "Imágenes:")?;
        for (idx, slot) in view.gallery.iter().enumerate() {
            writeln!(out, "  {}. {}", idx + 1, image_line(slot))?;
        }

        if !view.specs.is_empty() {
            writeln!(out, "Especificaciones:")?;
            for spec in &view.specs {
                writeln!(out, "  {}: {}", spec.label, spec.value)?;
            }
        }

        if !view.colors.is_empty() {
            let colors: Vec<String> = view
                .colors
                .iter()
                .map(|c| {
                    if view.selected_color.as_deref() == Some(c.as_str()) {
                        format!("[{c}]")
                    } else {
                        c.clone()
                    }
                })
                .collect();
            writeln!(out, "Colores: {}", colors.join(" "))?;
        }

        let stepper = &view.stepper;
        if stepper.enabled {
            writeln!(
                out,
                "Cantidad: {} (de {} a {})",
                stepper.quantity, stepper.min, stepper.max
            )?;
        } else {
            writeln!(out, "Cantidad: no disponible")?;
        }
        writeln!(out, "Comprar por WhatsApp: {}", view.contact_link)?;
        writeln!(out)?;

        writeln!(out, "Productos relacionados:")?;
        if let Some(message) = view.related_message {
            writeln!(out, "{message}")?;
        }
        for card in &view.related {
            write_card(&mut out, card)?;
        }
        Ok(out)
    }

    fn featured(&self, view: &FeaturedView) -> anyhow::Result<String> {
        let mut out = String::new();
        writeln!(out, "Ofertas destacadas")?;
        writeln!(out)?;
        if let Some(message) = view.empty_message {
            writeln!(out, "{message}")?;
            return Ok(out);
        }
        for card in &view.cards {
            write_card(&mut out, card)?;
            writeln!(out)?;
        }
        Ok(out)
    }

    fn image(&self, slot: &ImageSlot) -> anyhow::Result<String> {
        let mut out = String::new();
        if slot.source.is_placeholder() {
            writeln!(out, "Imagen no disponible, se usa el marcador: {}", slot.src)?;
        } else {
            writeln!(out, "{}", image_line(slot))?;
            writeln!(out, "{}", slot.src)?;
        }
        Ok(out)
    }

    fn message(&self, message: &str) -> anyhow::Result<String> {
        Ok(format!("{message}\n"))
    }
}

impl Renderer for JsonRenderer {
    fn catalog(&self, view: &CatalogView) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }

    fn detail(&self, view: &DetailView) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }

    fn featured(&self, view: &FeaturedView) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }

    fn image(&self, slot: &ImageSlot) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(slot)?)
    }

    fn message(&self, message: &str) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&serde_json::json!({ "message": message }))?)
    }
}

#[cfg(test)]
mod tests {
    use bsi_core::{Product, ProductId};

    use super::*;
    use crate::session::CatalogSession;
    use crate::view::messages;

    fn product(id: &str, name: &str, price: f64, sale: Option<f64>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            brand: "Odyssey".to_owned(),
            category: "Manubrios".to_owned(),
            description: "Sin descripción disponible.".to_owned(),
            price,
            sale_price: sale,
            stock: 10,
            image_refs: Vec::new(),
            colors: Vec::new(),
            specs: Vec::new(),
            is_featured: false,
        }
    }

    #[test]
    fn text_catalog_shows_sale_pricing() {
        let session = CatalogSession::new(vec![product("1", "Manubrio", 50000.0, Some(42000.0))], 5);
        let out = TextRenderer.catalog(&session.view()).unwrap();
        assert!(out.contains("OFERTA"), "{out}");
        assert!(out.contains("$ 50.000 → $ 42.000"), "{out}");
        assert!(out.contains("producto.html?id=1"), "{out}");
    }

    #[test]
    fn text_catalog_shows_empty_state() {
        let mut session = CatalogSession::new(vec![product("1", "Manubrio", 1.0, None)], 5);
        session.set_term("zzz");
        let out = TextRenderer.catalog(&session.view()).unwrap();
        assert!(out.contains(messages::CATALOG_EMPTY));
        assert!(!out.contains("Manubrio ·"));
    }

    #[test]
    fn json_catalog_is_parseable() {
        let session = CatalogSession::new(vec![product("1", "Manubrio", 1500.0, None)], 5);
        let out = JsonRenderer.catalog(&session.view()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["cards"][0]["price_label"], "$ 1.500");
        assert_eq!(value["cards"][0]["stock_tier"], "available");
        assert_eq!(value["empty_message"], serde_json::Value::Null);
    }

    #[test]
    fn json_message_wraps_text() {
        let out = JsonRenderer.message(messages::NOT_FOUND).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["message"], messages::NOT_FOUND);
    }
}

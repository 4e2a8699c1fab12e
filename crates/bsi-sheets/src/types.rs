//! Response types for the spreadsheet web app.
//!
//! ## Observed shape
//!
//! ### Product list (`GET <endpoint>`)
//! A JSON array with one object per sheet row. Keys are the sheet's column
//! headers, in Spanish: `nombre`, `marca`, `categoría` (sometimes typed
//! without the accent), `precio`, `oferta`, `stock`, `descripcion`,
//! `material`, `peso`, `color`, `image`..`image4`, `grillaprincipal`.
//!
//! Cell types follow whatever the sheet holds: prices arrive as numbers or
//! as strings, blank cells as `""`, checkbox columns as `true`/`false` or the
//! string `"TRUE"`. Every field is therefore kept as a raw
//! [`serde_json::Value`] and interpreted in [`crate::normalize`].
//!
//! ### Image proxy (`GET <endpoint>?action=getImageBase64&id=<fileId>`)
//! `{ "imageData": "<base64>", "mimeType": "image/jpeg" }` on success, or an
//! object with an `error` string when the Drive file cannot be read.

use serde::Deserialize;
use serde_json::Value;

/// One product row as returned by the sheet. All cells are optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawProduct {
    /// Row id; numeric or textual, frequently absent on older sheets.
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub nombre: Value,

    #[serde(default)]
    pub marca: Value,

    #[serde(default, rename = "categoría")]
    pub categoria: Value,

    /// Same column typed without the accent. Some sheets carry both.
    #[serde(default, rename = "categoria")]
    pub categoria_plain: Value,

    /// List price; number or numeric string.
    #[serde(default)]
    pub precio: Value,

    /// Discount price. Any truthy value marks the row as carrying a sale price.
    #[serde(default)]
    pub oferta: Value,

    #[serde(default)]
    pub stock: Value,

    #[serde(default)]
    pub descripcion: Value,

    #[serde(default)]
    pub material: Value,

    #[serde(default)]
    pub peso: Value,

    /// Colour list as a single delimited cell, e.g. `"Negro, Rojo"`.
    #[serde(default)]
    pub color: Value,

    #[serde(default)]
    pub image: Value,

    #[serde(default)]
    pub image2: Value,

    #[serde(default)]
    pub image3: Value,

    #[serde(default)]
    pub image4: Value,

    /// "Show on the home page grid" checkbox.
    #[serde(default)]
    pub grillaprincipal: Value,
}

/// Base64 image body returned by the image proxy action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagePayload {
    #[serde(rename = "imageData")]
    pub image_data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

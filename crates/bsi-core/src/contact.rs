//! WhatsApp "contact to buy" deep links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::CoreError;

const WHATSAPP_BASE: &str = "https://wa.me";

/// Characters left untouched by the browser's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escapes `value` the way `encodeURIComponent` does, for query values.
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Builds the pre-filled purchase message for a product.
#[must_use]
pub fn contact_message(product_name: &str, color: Option<&str>, quantity: u32) -> String {
    let units = if quantity == 1 { "unidad" } else { "unidades" };
    let mut message = format!("¡Hola! Quiero comprar {quantity} {units} de \"{product_name}\"");
    if let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) {
        message.push_str(" en color ");
        message.push_str(color);
    }
    message.push('.');
    message
}

/// Builds `https://wa.me/<number>?text=<message>` for the given selection.
///
/// Spaces, dashes and a leading `+` in `number` are tolerated and stripped.
///
/// # Errors
///
/// - [`CoreError::InvalidContactNumber`] if anything other than digits remains.
/// - [`CoreError::InvalidQuantity`] if `quantity` is zero.
pub fn contact_link(
    number: &str,
    product_name: &str,
    color: Option<&str>,
    quantity: u32,
) -> Result<String, CoreError> {
    let digits = sanitize_number(number)?;
    if quantity == 0 {
        return Err(CoreError::InvalidQuantity(quantity));
    }
    let message = contact_message(product_name, color, quantity);
    let encoded = encode_uri_component(&message);
    Ok(format!("{WHATSAPP_BASE}/{digits}?text={encoded}"))
}

/// Strips formatting from a phone number, rejecting anything non-numeric.
///
/// # Errors
///
/// Returns [`CoreError::InvalidContactNumber`] if the cleaned value is empty
/// or contains non-digit characters.
pub fn sanitize_number(number: &str) -> Result<String, CoreError> {
    let cleaned: String = number
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidContactNumber(number.to_owned()));
    }
    Ok(cleaned)
}

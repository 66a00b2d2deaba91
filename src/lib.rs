//! Wasm core for the attribute profile picker. The domain logic (catalog,
//! selection, share-link encoding) is plain Rust with native tests; `dom`
//! adapts it to the browser and `mount_picker` wires the `www` shell.

use console_error_panic_hook::set_once as set_panic_hook;
use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod controller;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod link;
pub mod selection;

#[cfg(test)]
mod lib_tests;

pub use catalog::{AttributeDefinition, ATTRIBUTES};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    set_panic_hook();
}

/// The fixed attribute catalog, in display order, as a JS array of
/// `{id, title, description}` records.
#[wasm_bindgen]
pub fn attribute_catalog() -> JsValue {
    serde_wasm_bindgen::to_value(ATTRIBUTES).unwrap()
}

/// Decodes the `attrs` parameter out of a raw query string, keeping only ids
/// that exist in the catalog. Absent parameter decodes to an empty list.
#[wasm_bindgen]
pub fn parse_share_query(query: &str) -> Vec<String> {
    link::parse_attrs(query)
        .unwrap_or_default()
        .into_iter()
        .filter(|id| catalog::is_known(id))
        .collect()
}

/// Sets the `attrs` parameter on `existing_query` (other parameters are
/// preserved) and returns the new raw query string.
#[wasm_bindgen]
pub fn build_share_query(existing_query: &str, ids: Vec<String>) -> String {
    link::set_attrs(existing_query, &ids)
}

/// Renders the picker into the current document and wires its triggers.
/// Expects `#cards` and `#toast` to exist.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount_picker() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    dom::mount(&window)
}

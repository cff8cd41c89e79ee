//! WASM bindings for the clauselens browser front end
//!
//! Two independent, stateless page enhancers, each activated once per
//! page load by the host page after the DOM is ready:
//!
//! - `init_upload_page` wires the document drop zone: drag-and-drop
//!   intake, declared-type validation against the upload allow-list, a
//!   name/size/type preview, and the submit gate. Submission itself is a
//!   native multipart form post; no network call originates here.
//! - `init_results_page` enhances the server-rendered results: clause
//!   full-text toggles, risk-term highlighting, and summary counters
//!   annotated with their share of the total.
//!
//! All validation and rendering decisions live in `clauselens-core`;
//! this crate is the DOM adapter.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { init_upload_page } from './pkg/clauselens_wasm.js';
//!
//! await init();
//! document.addEventListener('DOMContentLoaded', () => init_upload_page());
//! ```

pub mod annotator;
pub mod dom;
pub mod upload;

use wasm_bindgen::prelude::*;

pub use annotator::ResultAnnotator;
pub use upload::UploadIntake;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"clauselens WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Wire the upload page: drop zone, file picker, preview, submit gate
#[wasm_bindgen]
pub fn init_upload_page() -> Result<(), JsValue> {
    UploadIntake::mount(&dom::document()?)
}

/// Enhance the server-rendered results page: toggles, highlights,
/// summary percentages
#[wasm_bindgen]
pub fn init_results_page() -> Result<(), JsValue> {
    ResultAnnotator::annotate(&dom::document()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}

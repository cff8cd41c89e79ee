//! Drag-and-drop file intake for the upload page
//!
//! Wires the drop zone, file picker, preview container, and form. Holds
//! no selection state of its own: the file input's FileList is the single
//! source of truth, read fresh on every event. Listeners live for the
//! page session and are handed to the DOM with `forget()`.

use clauselens_core::intake::{self, IntakeError, SelectedFile};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, Element, Event, EventTarget, HtmlInputElement};

use crate::dom;

const DROP_AREA_ID: &str = "drop-area";
const FILE_INPUT_ID: &str = "file-input";
const PREVIEW_ID: &str = "selected-file";
const FORM_ID: &str = "upload-form";

/// Class marking the drop zone as an active drag target
const DRAGOVER_CLASS: &str = "dragover";

const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

pub struct UploadIntake;

impl UploadIntake {
    /// Look up the upload page elements and attach all listeners.
    /// Fails when the host page is missing a required element.
    pub fn mount(document: &Document) -> Result<(), JsValue> {
        let drop_area = dom::require_element(document, DROP_AREA_ID)?;
        let input: HtmlInputElement = dom::require_element(document, FILE_INPUT_ID)?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#file-input is not an <input> element"))?;
        let preview = dom::require_element(document, PREVIEW_ID)?;
        let form = dom::require_element(document, FORM_ID)?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("No document body available"))?;

        input.set_attribute("accept", &intake::accept_attribute())?;

        // Dropping a file anywhere on the page must never make the
        // browser navigate to or open it.
        let suppress = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            event.stop_propagation();
        }) as Box<dyn FnMut(Event)>);
        let targets: [&EventTarget; 2] = [drop_area.as_ref(), body.as_ref()];
        for target in targets {
            for name in DRAG_EVENTS {
                target.add_event_listener_with_callback(name, suppress.as_ref().unchecked_ref())?;
            }
        }
        suppress.forget();

        let zone = drop_area.clone();
        let mark_active = Closure::wrap(Box::new(move |_event: Event| {
            let _ = zone.class_list().add_1(DRAGOVER_CLASS);
        }) as Box<dyn FnMut(Event)>);
        for name in ["dragenter", "dragover"] {
            drop_area
                .add_event_listener_with_callback(name, mark_active.as_ref().unchecked_ref())?;
        }
        mark_active.forget();

        let zone = drop_area.clone();
        let clear_active = Closure::wrap(Box::new(move |_event: Event| {
            let _ = zone.class_list().remove_1(DRAGOVER_CLASS);
        }) as Box<dyn FnMut(Event)>);
        for name in ["dragleave", "drop"] {
            drop_area
                .add_event_listener_with_callback(name, clear_active.as_ref().unchecked_ref())?;
        }
        clear_active.forget();

        let drop_input = input.clone();
        let drop_preview = preview.clone();
        let on_drop = Closure::wrap(Box::new(move |event: DragEvent| {
            let files = event.data_transfer().and_then(|transfer| transfer.files());
            if let Some(files) = files {
                if files.length() > 0 {
                    drop_input.set_files(Some(&files));
                    refresh_preview(&drop_input, &drop_preview);
                }
            }
        }) as Box<dyn FnMut(DragEvent)>);
        drop_area.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref())?;
        on_drop.forget();

        let change_input = input.clone();
        let change_preview = preview.clone();
        let on_change = Closure::wrap(Box::new(move |_event: Event| {
            refresh_preview(&change_input, &change_preview);
        }) as Box<dyn FnMut(Event)>);
        input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();

        let submit_input = input.clone();
        let on_submit = Closure::wrap(Box::new(move |event: Event| {
            if first_file(&submit_input).is_none() {
                event.prevent_default();
                dom::alert(&IntakeError::NoFileSelected.to_string());
            }
        }) as Box<dyn FnMut(Event)>);
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();

        Ok(())
    }
}

/// Snapshot of the picker's current file for host-page scripts.
/// Returns null when nothing is selected.
#[wasm_bindgen(js_name = currentSelection)]
pub fn current_selection() -> Result<JsValue, JsValue> {
    let document = dom::document()?;
    let input: HtmlInputElement = dom::require_element(&document, FILE_INPUT_ID)?
        .dyn_into()
        .map_err(|_| JsValue::from_str("#file-input is not an <input> element"))?;

    match first_file(&input) {
        Some(file) => {
            let selected = SelectedFile::new(&file.name(), file.size(), &file.type_());
            serde_wasm_bindgen::to_value(&selected)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
        }
        None => Ok(JsValue::NULL),
    }
}

/// Re-read the picker and render either the preview or the placeholder.
/// An invalid selection is alerted and cleared.
fn refresh_preview(input: &HtmlInputElement, preview: &Element) {
    match first_file(input) {
        Some(file) => {
            let selected = SelectedFile::new(&file.name(), file.size(), &file.type_());
            match selected.validate() {
                Ok(()) => preview.set_inner_html(&intake::preview_markup(&selected)),
                Err(err) => {
                    web_sys::console::warn_1(
                        &format!("Rejected upload of type {:?}: {}", selected.media_type, err)
                            .into(),
                    );
                    dom::alert(&err.to_string());
                    input.set_value("");
                    preview.set_inner_html(intake::NO_FILE_MARKUP);
                }
            }
        }
        None => preview.set_inner_html(intake::NO_FILE_MARKUP),
    }
}

/// First file currently held by the picker, if any. A multi-file drop or
/// selection keeps only this one; the rest are ignored.
fn first_file(input: &HtmlInputElement) -> Option<web_sys::File> {
    input.files().and_then(|files| files.get(0))
}

// Browser-environment tests; run with wasm-pack test
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const UPLOAD_PAGE: &str = "\
        <div id=\"drop-area\">\
            <input type=\"file\" id=\"file-input\">\
            <div id=\"selected-file\"><p>No file selected</p></div>\
        </div>\
        <form id=\"upload-form\" action=\"/upload\" method=\"post\"></form>";

    fn fixture(html: &str) -> Document {
        let document = web_sys::window().unwrap().document().unwrap();
        document.body().unwrap().set_inner_html(html);
        document
    }

    fn file_input(document: &Document) -> HtmlInputElement {
        document
            .get_element_by_id("file-input")
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    fn pdf_file(name: &str) -> web_sys::File {
        let bits = js_sys::Array::new();
        bits.push(&JsValue::from_str("%PDF-1.7 test"));
        let options = web_sys::FilePropertyBag::new();
        options.set_type("application/pdf");
        web_sys::File::new_with_str_sequence_and_options(bits.as_ref(), name, &options).unwrap()
    }

    #[wasm_bindgen_test]
    fn mount_wires_upload_page() {
        let document = fixture(UPLOAD_PAGE);
        UploadIntake::mount(&document).unwrap();

        // The picker advertises the allow-list
        let input = file_input(&document);
        assert_eq!(
            input.get_attribute("accept").unwrap(),
            "application/pdf,image/png,image/jpeg,image/jpg"
        );
    }

    #[wasm_bindgen_test]
    fn mount_fails_without_drop_zone() {
        let document = fixture("<input type=\"file\" id=\"file-input\">");
        assert!(UploadIntake::mount(&document).is_err());
    }

    #[wasm_bindgen_test]
    fn change_without_file_renders_placeholder() {
        let document = fixture(UPLOAD_PAGE);
        UploadIntake::mount(&document).unwrap();

        let input = file_input(&document);
        input
            .dispatch_event(&Event::new("change").unwrap())
            .unwrap();

        let preview = document.get_element_by_id("selected-file").unwrap();
        assert_eq!(preview.inner_html(), "<p>No file selected</p>");
    }

    #[wasm_bindgen_test]
    fn valid_file_renders_preview() {
        let document = fixture(UPLOAD_PAGE);
        UploadIntake::mount(&document).unwrap();

        let input = file_input(&document);
        let transfer = web_sys::DataTransfer::new().unwrap();
        transfer.items().add_with_file(&pdf_file("contract.pdf")).unwrap();
        input.set_files(transfer.files().as_ref());
        input
            .dispatch_event(&Event::new("change").unwrap())
            .unwrap();

        let preview = document.get_element_by_id("selected-file").unwrap();
        let markup = preview.inner_html();
        assert!(markup.contains("contract.pdf"), "{}", markup);
        assert!(markup.contains("MB"), "{}", markup);
        assert!(markup.contains("application/pdf"), "{}", markup);
    }

    #[wasm_bindgen_test]
    fn current_selection_reads_the_picker() {
        let document = fixture(UPLOAD_PAGE);
        UploadIntake::mount(&document).unwrap();

        assert!(current_selection().unwrap().is_null());

        let input = file_input(&document);
        let transfer = web_sys::DataTransfer::new().unwrap();
        transfer.items().add_with_file(&pdf_file("lease.pdf")).unwrap();
        input.set_files(transfer.files().as_ref());

        let snapshot = current_selection().unwrap();
        assert!(!snapshot.is_null());
    }
}

// Web UI library for the manual seats plugin
//
// Binds the plugin's server-rendered forms to FieldBridge controllers:
// DOM surface, file picker, blob downloads, page configuration and browser
// logging.

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

pub mod dom;
pub mod download;
pub mod errors;
pub mod file_picker;
pub mod messages;
pub mod page;
pub mod telemetry;

pub use dom::DomSurface;
pub use errors::UiError;
pub use page::{bind_bridge, bind_page, load_page_config, DomBridge};

fn document() -> Result<Document, UiError> {
    web_sys::window()
        .ok_or(UiError::NoWindow)?
        .document()
        .ok_or(UiError::NoDocument)
}

/// Load the configuration, start logging and bind all bridges on the page
pub fn mount() -> Result<Vec<Rc<DomBridge>>, UiError> {
    let document = document()?;
    let config = load_page_config(&document);

    let filter = config
        .as_ref()
        .map(|config| config.log_filter.as_str())
        .unwrap_or("info");
    if let Err(e) = telemetry::init_logging(filter) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }

    let config = config.inspect_err(|e| tracing::error!(error = %e, "invalid page configuration"))?;
    Ok(page::bind_page(&document, &config))
}

/// Run [`mount`] now, or once the DOM is parsed if the document is still
/// loading
pub fn mount_when_ready() -> Result<(), UiError> {
    let document = document()?;

    if document.ready_state() != "loading" {
        return mount().map(|_| ());
    }

    let on_ready = Closure::once(move |_: Event| {
        if let Err(e) = mount() {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .map_err(|e| UiError::Listener {
            event: "DOMContentLoaded".to_string(),
            reason: errors::js_error_message(&e),
        })?;
    on_ready.forget();

    Ok(())
}

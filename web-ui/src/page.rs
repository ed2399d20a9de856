// Page-level wiring: configuration lookup and event listeners

use crate::dom::DomSurface;
use crate::errors::{js_error_message, UiError};
use manualseats_core::{BridgeConfig, FieldBridge, PageConfig, PAGE_CONFIG_ELEMENT_ID};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, EventTarget};

pub type DomBridge = FieldBridge<DomSurface>;

/// Read the page's bridge configuration, or the built-in presets when the
/// page does not embed one.
pub fn load_page_config(document: &Document) -> Result<PageConfig, UiError> {
    match document.get_element_by_id(PAGE_CONFIG_ELEMENT_ID) {
        Some(element) => {
            let text = element.text_content().unwrap_or_default();
            Ok(PageConfig::from_json(&text)?)
        }
        None => Ok(PageConfig::default()),
    }
}

/// Bind every configured bridge whose elements exist on the page.
///
/// A bridge that fails to bind is logged and skipped; the others are still
/// bound.
pub fn bind_page(document: &Document, config: &PageConfig) -> Vec<Rc<DomBridge>> {
    let mut bound = Vec::new();

    for bridge_config in &config.bridges {
        let name = bridge_config.name.clone();
        match bind_bridge(document, bridge_config.clone()) {
            Ok(bridge) => bound.push(bridge),
            Err(UiError::MissingElement { id }) => {
                tracing::debug!(bridge = %name, id = %id, "bridge not on this page");
            }
            Err(e) => tracing::error!(bridge = %name, error = %e, "could not bind bridge"),
        }
    }

    tracing::info!(bound = bound.len(), configured = config.bridges.len(), "field bridges bound");
    bound
}

/// Resolve one bridge's elements and attach its listeners
pub fn bind_bridge(document: &Document, config: BridgeConfig) -> Result<Rc<DomBridge>, UiError> {
    let surface = DomSurface::resolve(document, &config)?;
    let bridge = Rc::new(FieldBridge::bind(config, surface)?);

    let surface = bridge.surface();
    listen(surface.field_target(), "change", {
        let bridge = Rc::clone(&bridge);
        move |_| {
            bridge.on_field_changed();
        }
    })?;

    listen(surface.export_button(), "click", {
        let bridge = Rc::clone(&bridge);
        move |event| {
            event.prevent_default();
            // Failures are already reported to the user
            let _ = bridge.export();
        }
    })?;

    if let Some(button) = surface.import_button() {
        listen(button, "click", {
            let bridge = Rc::clone(&bridge);
            move |event| {
                event.prevent_default();
                let bridge = Rc::clone(&bridge);
                spawn_local(async move {
                    let _ = bridge.import().await;
                });
            }
        })?;
    }

    if let Some(button) = surface.clear_button() {
        listen(button, "click", {
            let bridge = Rc::clone(&bridge);
            move |event| {
                event.prevent_default();
                let _ = bridge.clear();
            }
        })?;
    }

    Ok(bridge)
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), UiError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| UiError::Listener {
            event: event.to_string(),
            reason: js_error_message(&e),
        })?;

    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

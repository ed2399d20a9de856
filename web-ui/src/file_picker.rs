// File selection dialog and text reading

use crate::errors::js_error_message;
use futures::channel::oneshot;
use manualseats_core::{PickedFile, SurfaceError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, HtmlInputElement};

/// Open the browser's file dialog for a single file matching `accept` and
/// read the selected file as text.
///
/// Resolves to `Ok(None)` when the dialog is dismissed. Browsers without the
/// `cancel` event never resolve a dismissed dialog: the pending pick and its
/// two listeners stay alive for the rest of the page, one per dismissal. The
/// next pick starts a fresh dialog.
pub async fn pick_text_file(
    document: &Document,
    accept: &str,
) -> Result<Option<PickedFile>, SurfaceError> {
    let input = document
        .create_element("input")
        .map_err(|e| SurfaceError::Picker(js_error_message(&e)))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| SurfaceError::Picker("could not create a file input".to_string()))?;
    input.set_type("file");
    input.set_accept(accept);
    input.set_multiple(false);

    let (sender, receiver) = oneshot::channel::<bool>();
    let sender = Rc::new(RefCell::new(Some(sender)));
    let resolve_with = |selected: bool| {
        let sender = Rc::clone(&sender);
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(selected);
            }
        })
    };
    let on_change = resolve_with(true);
    let on_cancel = resolve_with(false);

    for (event, handler) in [("change", &on_change), ("cancel", &on_cancel)] {
        input
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .map_err(|e| SurfaceError::Picker(js_error_message(&e)))?;
    }
    input.click();

    let selected = receiver.await.unwrap_or(false);
    for (event, handler) in [("change", &on_change), ("cancel", &on_cancel)] {
        let _ = input.remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
    }
    if !selected {
        return Ok(None);
    }

    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let name = file.name();
    let read_error = |reason: String| SurfaceError::FileRead {
        file: name.clone(),
        reason,
    };

    let contents = JsFuture::from(file.text())
        .await
        .map_err(|e| read_error(js_error_message(&e)))?;
    let text = contents
        .as_string()
        .ok_or_else(|| read_error("content is not text".to_string()))?;

    Ok(Some(PickedFile { name, text }))
}

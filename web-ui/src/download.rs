// Blob downloads through a temporary object URL

use crate::errors::js_error_message;
use manualseats_core::{Download, SurfaceError};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

/// `blob:` URL referencing an in-memory file. Must be revoked once the
/// download has been started.
#[derive(Debug)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Wrap the download's bytes in a `Blob` and create a URL for it
    pub fn create(download: &Download) -> Result<Self, SurfaceError> {
        let blob = download_blob(download)?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| SurfaceError::Blob(js_error_message(&e)))?;

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn revoke(self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            tracing::warn!(url = %self.0, error = %js_error_message(&e), "could not revoke object URL");
        }
    }
}

/// `Blob` holding the download's bytes, typed with its MIME type
pub fn download_blob(download: &Download) -> Result<Blob, SurfaceError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(download.bytes.as_slice()));

    let options = BlobPropertyBag::new();
    options.set_type(&download.mime_type);

    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| SurfaceError::Blob(js_error_message(&e)))
}

/// Start a save-as download of `url` through a hidden anchor
pub fn click_download_link(
    document: &Document,
    url: &ObjectUrl,
    filename: &str,
) -> Result<(), SurfaceError> {
    let trigger_error = |e: wasm_bindgen::JsValue| SurfaceError::Trigger(js_error_message(&e));

    let body = document
        .body()
        .ok_or_else(|| SurfaceError::Trigger("document has no body".to_string()))?;
    let anchor = document
        .create_element("a")
        .map_err(trigger_error)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| SurfaceError::Trigger("could not create a link element".to_string()))?;

    anchor.set_hidden(true);
    anchor.set_href(url.as_str());
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(trigger_error)?;
    anchor.click();
    if let Err(e) = body.remove_child(&anchor) {
        tracing::debug!(error = %js_error_message(&e), "download link already detached");
    }

    Ok(())
}

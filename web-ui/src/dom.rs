// DOM implementation of BridgeSurface

use crate::download::{click_download_link, ObjectUrl};
use crate::errors::{js_error_message, UiError};
use crate::file_picker::pick_text_file;
use crate::messages::{fallback_for, format_status, status_class, Fallback};
use manualseats_core::{
    BridgeConfig, BridgeSurface, Download, FieldKind, PickedFile, StatusLevel, SurfaceError,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

/// Element holding a bridge's text
enum FieldElement {
    TextArea(HtmlTextAreaElement),
    Input(HtmlInputElement),
    Text(HtmlElement),
}

impl FieldElement {
    fn resolve(element: Element, id: &str, kind: FieldKind) -> Result<Self, UiError> {
        let unsupported = || UiError::UnsupportedField {
            id: id.to_string(),
            kind,
        };

        match kind {
            FieldKind::FormValue => match element.dyn_into::<HtmlTextAreaElement>() {
                Ok(textarea) => Ok(FieldElement::TextArea(textarea)),
                Err(element) => element
                    .dyn_into::<HtmlInputElement>()
                    .map(FieldElement::Input)
                    .map_err(|_| unsupported()),
            },
            FieldKind::TextContent => element
                .dyn_into::<HtmlElement>()
                .map(FieldElement::Text)
                .map_err(|_| unsupported()),
        }
    }

    fn value(&self) -> String {
        match self {
            FieldElement::TextArea(textarea) => textarea.value(),
            FieldElement::Input(input) => input.value(),
            FieldElement::Text(element) => element.inner_text(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            FieldElement::TextArea(textarea) => textarea.set_value(value),
            FieldElement::Input(input) => input.set_value(value),
            FieldElement::Text(element) => element.set_inner_text(value),
        }
    }

    fn target(&self) -> &EventTarget {
        match self {
            FieldElement::TextArea(textarea) => textarea,
            FieldElement::Input(input) => input,
            FieldElement::Text(element) => element,
        }
    }
}

/// Elements of one bridge, looked up once by id
pub struct DomSurface {
    document: Document,
    field: FieldElement,
    export_button: Element,
    import_button: Option<Element>,
    clear_button: Option<Element>,
    status: Option<HtmlElement>,
}

impl DomSurface {
    /// Look up the bridge's elements. The field and export button are
    /// required; the other elements are optional.
    pub fn resolve(document: &Document, config: &BridgeConfig) -> Result<Self, UiError> {
        let required = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| UiError::MissingElement { id: id.to_string() })
        };
        let optional = |id: Option<&str>| {
            let id = id?;
            let element = document.get_element_by_id(id);
            if element.is_none() {
                tracing::debug!(bridge = %config.name, id, "optional element not on page");
            }
            element
        };

        let field = FieldElement::resolve(required(&config.field_id)?, &config.field_id, config.field_kind)?;
        let export_button = required(&config.export_button_id)?;
        let import_button = optional(config.import.as_ref().map(|import| import.button_id.as_str()));
        let clear_button = optional(config.clear_button_id.as_deref());
        let status = optional(config.status_id.as_deref())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        Ok(Self {
            document: document.clone(),
            field,
            export_button,
            import_button,
            clear_button,
            status,
        })
    }

    pub fn field_target(&self) -> &EventTarget {
        self.field.target()
    }

    pub fn export_button(&self) -> &Element {
        &self.export_button
    }

    pub fn import_button(&self) -> Option<&Element> {
        self.import_button.as_ref()
    }

    pub fn clear_button(&self) -> Option<&Element> {
        self.clear_button.as_ref()
    }
}

impl BridgeSurface for DomSurface {
    type DownloadHandle = ObjectUrl;

    fn field_value(&self) -> String {
        self.field.value()
    }

    fn set_field_value(&self, value: &str) {
        self.field.set_value(value);
    }

    fn set_export_enabled(&self, enabled: bool) {
        if let Err(e) = self
            .export_button
            .toggle_attribute_with_force("disabled", !enabled)
        {
            tracing::warn!(error = %js_error_message(&e), "could not toggle export button");
        }
    }

    async fn pick_file(&self, accept: &str) -> Result<Option<PickedFile>, SurfaceError> {
        pick_text_file(&self.document, accept).await
    }

    fn acquire_download(&self, download: &Download) -> Result<ObjectUrl, SurfaceError> {
        ObjectUrl::create(download)
    }

    fn trigger_download(&self, handle: &ObjectUrl, download: &Download) -> Result<(), SurfaceError> {
        click_download_link(&self.document, handle, &download.filename)
    }

    fn release_download(&self, handle: ObjectUrl) {
        handle.revoke();
    }

    fn report(&self, level: StatusLevel, message: &str) {
        match &self.status {
            Some(status) => {
                status.set_class_name(status_class(level));
                status.set_inner_text(message);
                status.set_hidden(false);
            }
            None => match fallback_for(level) {
                Fallback::Alert => {
                    let shown = web_sys::window()
                        .map(|window| window.alert_with_message(&format_status(level, message)));
                    if let Some(Err(e)) = shown {
                        tracing::debug!(error = %js_error_message(&e), "could not show alert");
                    }
                }
                Fallback::Warn => tracing::warn!(message, "no status element for warning"),
                Fallback::Info => tracing::info!(message, "no status element for message"),
            },
        }
    }

    fn clear_report(&self) {
        if let Some(status) = &self.status {
            status.set_inner_text("");
            status.set_hidden(true);
        }
    }
}

// FieldBridge: binds a text field to Import / Export / Clear actions

use crate::config::BridgeConfig;
use crate::download::{build_download, Download};
use crate::errors::{BridgeError, SurfaceError};
use crate::models::{ExportReceipt, ImportOutcome, PickedFile, StatusLevel};
use std::cell::Cell;

/// UI capabilities a bridge needs from its host.
///
/// All methods run on the UI thread; `pick_file` is the only suspension
/// point.
#[allow(async_fn_in_trait)]
pub trait BridgeSurface {
    /// Reference to an in-memory blob, valid until released
    type DownloadHandle;

    fn field_value(&self) -> String;

    fn set_field_value(&self, value: &str);

    fn set_export_enabled(&self, enabled: bool);

    /// Let the user choose one file matching `accept` and read it as text.
    /// `Ok(None)` when nothing was selected.
    async fn pick_file(&self, accept: &str) -> Result<Option<PickedFile>, SurfaceError>;

    fn acquire_download(&self, download: &Download) -> Result<Self::DownloadHandle, SurfaceError>;

    fn trigger_download(
        &self,
        handle: &Self::DownloadHandle,
        download: &Download,
    ) -> Result<(), SurfaceError>;

    fn release_download(&self, handle: Self::DownloadHandle);

    /// Show a message to the user
    fn report(&self, level: StatusLevel, message: &str);

    /// Remove any message previously shown by `report`
    fn clear_report(&self);
}

/// Releases a download handle when dropped
struct HandleGuard<'a, S: BridgeSurface> {
    surface: &'a S,
    handle: Option<S::DownloadHandle>,
}

impl<'a, S: BridgeSurface> HandleGuard<'a, S> {
    fn new(surface: &'a S, handle: S::DownloadHandle) -> Self {
        Self {
            surface,
            handle: Some(handle),
        }
    }

    fn trigger(&self, download: &Download) -> Result<(), SurfaceError> {
        match &self.handle {
            Some(handle) => self.surface.trigger_download(handle, download),
            None => Ok(()),
        }
    }
}

impl<S: BridgeSurface> Drop for HandleGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.surface.release_download(handle);
        }
    }
}

/// Controller keeping Export availability consistent with the field content
pub struct FieldBridge<S: BridgeSurface> {
    config: BridgeConfig,
    surface: S,
    export_enabled: Cell<bool>,
}

impl<S: BridgeSurface> FieldBridge<S> {
    /// Validate `config`, attach it to `surface` and compute the initial
    /// Export state.
    pub fn bind(config: BridgeConfig, surface: S) -> Result<Self, BridgeError> {
        config.validate()?;

        let bridge = Self {
            config,
            surface,
            export_enabled: Cell::new(false),
        };
        let enabled = bridge.recompute_enabled();
        tracing::debug!(bridge = %bridge.config.name, enabled, "bridge bound");

        Ok(bridge)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Export state as of the last recomputation
    pub fn is_export_enabled(&self) -> bool {
        self.export_enabled.get()
    }

    /// Apply the validity predicate to the current field value
    pub fn recompute_enabled(&self) -> bool {
        let enabled = self.config.validity.holds(&self.surface.field_value());
        self.surface.set_export_enabled(enabled);

        if self.export_enabled.replace(enabled) != enabled {
            tracing::debug!(bridge = %self.config.name, enabled, "export availability changed");
        }
        enabled
    }

    /// Handler for the field's change event
    pub fn on_field_changed(&self) -> bool {
        self.recompute_enabled()
    }

    /// Replace the field with imported text, verbatim
    pub fn apply_import(&self, text: &str) -> bool {
        self.surface.set_field_value(text);
        self.recompute_enabled()
    }

    /// Let the user pick a file and load its text into the field.
    ///
    /// Overlapping imports are not sequenced: whichever read completes last
    /// owns the field.
    pub async fn import(&self) -> Result<ImportOutcome, BridgeError> {
        if self.config.import.is_none() {
            return Err(self.fail(BridgeError::ImportUnavailable(self.config.name.clone())));
        }

        let picked = match self.surface.pick_file(self.config.format.accept()).await {
            Ok(Some(picked)) => picked,
            Ok(None) => {
                tracing::debug!(bridge = %self.config.name, "import cancelled");
                return Ok(ImportOutcome::Cancelled);
            }
            Err(e) => return Err(self.fail(BridgeError::Import(e))),
        };

        let enabled = self.apply_import(&picked.text);
        self.surface.report(
            StatusLevel::Info,
            &format!("Loaded '{}' ({} bytes)", picked.name, picked.text.len()),
        );
        tracing::info!(
            bridge = %self.config.name,
            file = %picked.name,
            bytes = picked.text.len(),
            enabled,
            "file imported"
        );

        Ok(ImportOutcome::Imported {
            file_name: picked.name,
            bytes: picked.text.len(),
        })
    }

    /// Offer the field's current value as a file download
    pub fn export(&self) -> Result<ExportReceipt, BridgeError> {
        let value = self.surface.field_value();

        if !self.config.validity.holds(&value) {
            if self.config.guard_export {
                return Err(self.fail(BridgeError::ExportUnavailable(self.config.name.clone())));
            }
            tracing::warn!(bridge = %self.config.name, "export requested while disabled");
        }

        let filename = self.config.filename.filename_for(&value, self.config.format);
        let download = build_download(value, filename, self.config.format.mime_type());

        let handle = self
            .surface
            .acquire_download(&download)
            .map_err(|e| self.fail(BridgeError::Export(e)))?;
        let guard = HandleGuard::new(&self.surface, handle);
        let triggered = guard.trigger(&download);
        drop(guard);
        triggered.map_err(|e| self.fail(BridgeError::Export(e)))?;

        self.surface.clear_report();
        tracing::info!(
            bridge = %self.config.name,
            filename = %download.filename,
            bytes = download.len(),
            "download triggered"
        );

        Ok(ExportReceipt {
            bytes: download.len(),
            filename: download.filename,
            mime_type: download.mime_type,
        })
    }

    /// Empty the field
    pub fn clear(&self) -> Result<(), BridgeError> {
        if self.config.clear_button_id.is_none() {
            return Err(self.fail(BridgeError::ClearUnavailable(self.config.name.clone())));
        }

        self.surface.set_field_value("");
        self.recompute_enabled();
        self.surface.clear_report();
        tracing::debug!(bridge = %self.config.name, "field cleared");

        Ok(())
    }

    fn fail(&self, error: BridgeError) -> BridgeError {
        let level = error.status_level();
        match level {
            StatusLevel::Error => {
                tracing::error!(bridge = %self.config.name, error = %error, "action failed")
            }
            _ => tracing::warn!(bridge = %self.config.name, error = %error, "action refused"),
        }
        self.surface.report(level, &error.to_string());
        error
    }
}

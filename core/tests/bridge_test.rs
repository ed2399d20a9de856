// Integration tests for FieldBridge against a recording surface

use manualseats_core::*;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use tokio_test::block_on;

// ==================== Test Surface ====================

#[derive(Default)]
struct RecordingSurface {
    field: RefCell<String>,
    export_enabled: Cell<Option<bool>>,
    picks: RefCell<VecDeque<Result<Option<PickedFile>, SurfaceError>>>,
    accepts: RefCell<Vec<String>>,
    next_handle: Cell<u32>,
    live_handles: RefCell<Vec<u32>>,
    acquired: Cell<usize>,
    downloads: RefCell<Vec<Download>>,
    fail_acquire: Cell<bool>,
    fail_trigger: Cell<bool>,
    reports: RefCell<Vec<(StatusLevel, String)>>,
    report_cleared: Cell<usize>,
}

impl RecordingSurface {
    fn with_field(value: &str) -> Self {
        let surface = Self::default();
        surface.field.replace(value.to_string());
        surface
    }

    fn queue_pick(&self, pick: Result<Option<PickedFile>, SurfaceError>) {
        self.picks.borrow_mut().push_back(pick);
    }

    fn value(&self) -> String {
        self.field.borrow().clone()
    }

    fn last_download(&self) -> Option<Download> {
        self.downloads.borrow().last().cloned()
    }
}

impl BridgeSurface for RecordingSurface {
    type DownloadHandle = u32;

    fn field_value(&self) -> String {
        self.field.borrow().clone()
    }

    fn set_field_value(&self, value: &str) {
        self.field.replace(value.to_string());
    }

    fn set_export_enabled(&self, enabled: bool) {
        self.export_enabled.set(Some(enabled));
    }

    async fn pick_file(&self, accept: &str) -> Result<Option<PickedFile>, SurfaceError> {
        self.accepts.borrow_mut().push(accept.to_string());
        self.picks.borrow_mut().pop_front().unwrap_or(Ok(None))
    }

    fn acquire_download(&self, _download: &Download) -> Result<u32, SurfaceError> {
        if self.fail_acquire.get() {
            return Err(SurfaceError::Blob("out of memory".to_string()));
        }
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        self.live_handles.borrow_mut().push(handle);
        self.acquired.set(self.acquired.get() + 1);
        Ok(handle)
    }

    fn trigger_download(&self, handle: &u32, download: &Download) -> Result<(), SurfaceError> {
        assert!(self.live_handles.borrow().contains(handle), "handle used after release");
        if self.fail_trigger.get() {
            return Err(SurfaceError::Trigger("click blocked".to_string()));
        }
        self.downloads.borrow_mut().push(download.clone());
        Ok(())
    }

    fn release_download(&self, handle: u32) {
        self.live_handles.borrow_mut().retain(|live| *live != handle);
    }

    fn report(&self, level: StatusLevel, message: &str) {
        self.reports.borrow_mut().push((level, message.to_string()));
    }

    fn clear_report(&self) {
        self.report_cleared.set(self.report_cleared.get() + 1);
    }
}

fn bind(config: BridgeConfig, value: &str) -> FieldBridge<RecordingSurface> {
    FieldBridge::bind(config, RecordingSurface::with_field(value)).unwrap()
}

const SEATS_CSV: &str = "seat_guid,orderposition_secret\nA,B";

// ==================== Enabled State Tests ====================

#[test]
fn test_initial_state_computed_at_bind() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);
    assert!(bridge.is_export_enabled());
    assert_eq!(bridge.surface().export_enabled.get(), Some(true));

    let bridge = bind(BridgeConfig::assigned_seats(), "");
    assert!(!bridge.is_export_enabled());
    assert_eq!(bridge.surface().export_enabled.get(), Some(false));
}

#[test]
fn test_enabled_tracks_predicate_after_change() {
    let values = [
        SEATS_CSV,
        "x,y\n",
        "",
        "seat_guid,orderposition_secret\r\n",
        "seat_guid;orderposition_secret\n",
    ];

    for config in [BridgeConfig::assigned_seats(), BridgeConfig::seating_layout()] {
        let bridge = bind(config.clone(), "");
        for value in values {
            bridge.surface().set_field_value(value);
            let enabled = bridge.on_field_changed();

            assert_eq!(enabled, config.validity.holds(value), "{} / {:?}", config.name, value);
            assert_eq!(bridge.is_export_enabled(), enabled);
            assert_eq!(bridge.surface().export_enabled.get(), Some(enabled));
        }
    }
}

#[test]
fn test_assigned_seats_csv_examples() {
    let bridge = bind(BridgeConfig::assigned_seats(), "");

    assert!(bridge.apply_import("seat_guid,orderposition_secret\nA,B"));
    assert!(!bridge.apply_import("x,y\n"));
    assert!(!bridge.apply_import(""));
}

#[test]
fn test_export_only_bridge_always_enabled() {
    let bridge = bind(BridgeConfig::seat_export(), "");
    assert!(bridge.is_export_enabled());
}

#[test]
fn test_bind_rejects_invalid_config() {
    let mut config = BridgeConfig::assigned_seats();
    config.field_id = String::new();

    let result = FieldBridge::bind(config, RecordingSurface::default());
    assert!(matches!(
        result,
        Err(BridgeError::Config(ConfigError::EmptyValue { field: "field_id", .. }))
    ));
}

// ==================== Import Tests ====================

#[test]
fn test_import_replaces_field_verbatim() {
    let bridge = bind(BridgeConfig::assigned_seats(), "x,y\n");
    let text = "seat_guid,orderposition_secret\r\nA,B\r\n\u{feff}trailing ";
    bridge.surface().queue_pick(Ok(Some(PickedFile::new("seats.csv", text))));

    let outcome = block_on(bridge.import()).unwrap();

    assert_eq!(
        outcome,
        ImportOutcome::Imported {
            file_name: "seats.csv".to_string(),
            bytes: text.len(),
        }
    );
    assert_eq!(bridge.surface().value(), text);
    assert!(bridge.is_export_enabled());
    assert_eq!(bridge.surface().accepts.borrow().as_slice(), [".csv"]);
}

#[test]
fn test_import_reports_loaded_file_at_info() {
    let bridge = bind(BridgeConfig::seating_layout(), "");
    bridge
        .surface()
        .queue_pick(Ok(Some(PickedFile::new("hall.json", r#"{"name": "Hall"}"#))));

    block_on(bridge.import()).unwrap();

    let reports = bridge.surface().reports.borrow();
    assert_eq!(
        reports.as_slice(),
        [(StatusLevel::Info, "Loaded 'hall.json' (16 bytes)".to_string())]
    );
}

#[test]
fn test_import_recomputes_to_disabled() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);
    bridge.surface().queue_pick(Ok(Some(PickedFile::new("other.csv", "x,y\n"))));

    block_on(bridge.import()).unwrap();

    assert_eq!(bridge.surface().value(), "x,y\n");
    assert!(!bridge.is_export_enabled());
}

#[test]
fn test_import_uses_json_filter_for_layouts() {
    let bridge = bind(BridgeConfig::seating_layout(), "");
    bridge.surface().queue_pick(Ok(Some(PickedFile::new("hall.json", "{}"))));

    block_on(bridge.import()).unwrap();

    assert_eq!(bridge.surface().accepts.borrow().as_slice(), [".json"]);
    assert!(bridge.is_export_enabled());
}

#[test]
fn test_import_without_selection_is_noop() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);
    bridge.surface().queue_pick(Ok(None));

    let outcome = block_on(bridge.import()).unwrap();

    assert_eq!(outcome, ImportOutcome::Cancelled);
    assert_eq!(bridge.surface().value(), SEATS_CSV);
    assert!(bridge.is_export_enabled());
    assert!(bridge.surface().reports.borrow().is_empty());
}

#[test]
fn test_import_read_failure_is_reported() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);
    let failure = SurfaceError::FileRead {
        file: "seats.csv".to_string(),
        reason: "NotReadableError".to_string(),
    };
    bridge.surface().queue_pick(Err(failure.clone()));

    let result = block_on(bridge.import());

    assert_eq!(result, Err(BridgeError::Import(failure)));
    assert_eq!(bridge.surface().value(), SEATS_CSV);
    let reports = bridge.surface().reports.borrow();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, StatusLevel::Error);
    assert!(reports[0].1.contains("seats.csv"));
}

#[test]
fn test_import_unavailable_on_export_only_bridge() {
    let bridge = bind(BridgeConfig::orderposition_export(), "a,b");

    let result = block_on(bridge.import());

    assert_eq!(
        result,
        Err(BridgeError::ImportUnavailable("orderposition_export".to_string()))
    );
    assert!(bridge.surface().accepts.borrow().is_empty());
}

#[test]
fn test_last_completed_import_wins() {
    let bridge = bind(BridgeConfig::seating_layout(), "");
    bridge.surface().queue_pick(Ok(Some(PickedFile::new("a.json", r#"{"name": "A"}"#))));
    bridge.surface().queue_pick(Ok(Some(PickedFile::new("b.json", r#"{"name": "B"}"#))));

    block_on(bridge.import()).unwrap();
    block_on(bridge.import()).unwrap();

    assert_eq!(bridge.surface().value(), r#"{"name": "B"}"#);
}

// ==================== Export Tests ====================

#[test]
fn test_import_export_round_trip() {
    let contents = [SEATS_CSV, "x,y\n", "seat_guid,orderposition_secret\r\nÄ,ß\r\n"];

    for text in contents {
        let bridge = bind(BridgeConfig::assigned_seats(), "");
        bridge.surface().queue_pick(Ok(Some(PickedFile::new("in.csv", text))));
        block_on(bridge.import()).unwrap();

        let receipt = bridge.export().unwrap();
        let download = bridge.surface().last_download().unwrap();

        assert_eq!(download.text(), Some(text));
        assert_eq!(download.filename, "assignedseats.csv");
        assert_eq!(download.mime_type, "text/csv");
        assert_eq!(receipt.bytes, text.len());
    }
}

#[test]
fn test_export_does_not_mutate_field() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);

    bridge.export().unwrap();

    assert_eq!(bridge.surface().value(), SEATS_CSV);
    assert!(bridge.is_export_enabled());
}

#[test]
fn test_layout_filename_from_name_property() {
    let bridge = bind(BridgeConfig::seating_layout(), r#"{"name": "Foo", "zones": []}"#);

    let receipt = bridge.export().unwrap();

    assert_eq!(receipt.filename, "Foo.json");
    assert_eq!(receipt.mime_type, "application/json");
}

#[test]
fn test_layout_filename_fallback() {
    for value in [r#"{"zones": []}"#, "not json at all"] {
        let bridge = bind(BridgeConfig::seating_layout(), value);
        let receipt = bridge.export().unwrap();
        assert_eq!(receipt.filename, "seatingplan.json");
    }
}

#[test]
fn test_text_exports_use_constant_names() {
    let bridge = bind(BridgeConfig::seat_export(), "guid,name\n1,A1\n");
    assert_eq!(bridge.export().unwrap().filename, "event-seats.csv");

    let bridge = bind(BridgeConfig::orderposition_export(), "secret\nabc\n");
    assert_eq!(bridge.export().unwrap().filename, "event-orderpos.csv");
}

#[test]
fn test_unguarded_export_of_empty_field_proceeds() {
    let bridge = bind(BridgeConfig::assigned_seats(), "");

    let receipt = bridge.export().unwrap();

    assert_eq!(receipt.bytes, 0);
    assert_eq!(bridge.surface().last_download().unwrap().text(), Some(""));
}

#[test]
fn test_guarded_export_refuses_invalid_field() {
    let mut config = BridgeConfig::assigned_seats();
    config.guard_export = true;
    let bridge = bind(config, "x,y\n");

    let result = bridge.export();

    assert_eq!(
        result,
        Err(BridgeError::ExportUnavailable("assigned_seats".to_string()))
    );
    assert_eq!(bridge.surface().acquired.get(), 0);
    assert_eq!(bridge.surface().reports.borrow()[0].0, StatusLevel::Warning);
}

#[test]
fn test_handles_released_after_each_export() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);

    for _ in 0..5 {
        bridge.export().unwrap();
    }

    assert_eq!(bridge.surface().acquired.get(), 5);
    assert!(bridge.surface().live_handles.borrow().is_empty());
}

#[test]
fn test_handle_released_when_trigger_fails() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);
    bridge.surface().fail_trigger.set(true);

    for _ in 0..3 {
        let result = bridge.export();
        assert!(matches!(
            result,
            Err(BridgeError::Export(SurfaceError::Trigger(_)))
        ));
    }

    assert_eq!(bridge.surface().acquired.get(), 3);
    assert!(bridge.surface().live_handles.borrow().is_empty());
    assert_eq!(bridge.surface().reports.borrow().len(), 3);
}

#[test]
fn test_acquire_failure_reported() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);
    bridge.surface().fail_acquire.set(true);

    let result = bridge.export();

    assert!(matches!(result, Err(BridgeError::Export(SurfaceError::Blob(_)))));
    assert!(bridge.surface().downloads.borrow().is_empty());
    assert_eq!(bridge.surface().reports.borrow()[0].0, StatusLevel::Error);
}

#[test]
fn test_successful_export_clears_status() {
    let bridge = bind(BridgeConfig::assigned_seats(), SEATS_CSV);

    bridge.export().unwrap();

    assert_eq!(bridge.surface().report_cleared.get(), 1);
}

// ==================== Clear Tests ====================

#[test]
fn test_clear_disables_export() {
    for config in [BridgeConfig::assigned_seats(), BridgeConfig::seating_layout()] {
        let bridge = bind(config, r#"{"name": "x"}"#);
        bridge.apply_import(SEATS_CSV);

        bridge.clear().unwrap();

        assert_eq!(bridge.surface().value(), "");
        assert!(!bridge.is_export_enabled());
        assert_eq!(bridge.surface().export_enabled.get(), Some(false));
    }
}

#[test]
fn test_clear_unavailable_on_export_only_bridge() {
    let bridge = bind(BridgeConfig::seat_export(), "a,b");

    let result = bridge.clear();

    assert_eq!(result, Err(BridgeError::ClearUnavailable("seat_export".to_string())));
    assert_eq!(bridge.surface().value(), "a,b");
}

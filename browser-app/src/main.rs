// Manual seats field bridges - browser entry point

use wasm_bindgen::JsValue;

pub fn run_app() {
    console_error_panic_hook::set_once();

    if let Err(e) = manualseats_web_ui::mount_when_ready() {
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "field bridges not mounted: {}",
            e
        )));
    }
}

fn main() {
    run_app();
}

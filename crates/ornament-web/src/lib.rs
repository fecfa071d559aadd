pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
        f(runner)
    })
}

/// Build the scene. `config_json` may be `"{}"` for defaults; `photos_json`
/// is `{"photos": ["url", ...]}`. Replaces (and disposes) any previous scene.
#[wasm_bindgen]
pub fn scene_init(config_json: &str, photos_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SceneRunner::new(config_json, photos_json)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let previous = RUNNER.with(|cell| cell.borrow_mut().replace(runner));
    if let Some(previous) = previous {
        previous.dispose();
    }
    log::info!("ornament scene: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn scene_set_gesture(code: u32, x: f32, y: f32, present: bool) {
    with_runner(|r| r.set_gesture(code, x, y, present));
}

#[wasm_bindgen]
pub fn scene_tick(time: f32) {
    with_runner(|r| r.tick(time));
}

#[wasm_bindgen]
pub fn scene_photo_requests() -> String {
    with_runner(|r| r.photo_requests_json())
}

/// Returns the texture slot to upload the decoded photo into, or -1 when
/// `request` is stale or no slot is free.
#[wasm_bindgen]
pub fn scene_photo_loaded(request: u32) -> i32 {
    with_runner(|r| r.photo_loaded(request))
}

#[wasm_bindgen]
pub fn scene_photo_failed(request: u32, reason: &str) {
    with_runner(|r| r.photo_failed(request, reason));
}

#[wasm_bindgen]
pub fn scene_replace_photos(photos_json: &str) -> bool {
    with_runner(|r| r.replace_photos(photos_json))
}

#[wasm_bindgen]
pub fn scene_resize(width: u32, height: u32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn scene_dispose() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    if let Some(runner) = runner {
        runner.dispose();
    }
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_report_ptr() -> *const f32 {
    with_runner(|r| r.report_ptr())
}

#[wasm_bindgen]
pub fn get_configuration() -> u32 {
    with_runner(|r| r.configuration())
}

// ---- Layout accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.layout().max_instances as u32)
}

#[wasm_bindgen]
pub fn get_max_lights() -> u32 {
    with_runner(|r| r.layout().max_lights as u32)
}

#[wasm_bindgen]
pub fn get_max_stars() -> u32 {
    with_runner(|r| r.layout().max_stars as u32)
}

// ---- Engine-generated textures (placeholder) ----

#[wasm_bindgen]
pub fn get_upload_count() -> u32 {
    with_runner(|r| r.uploads().len() as u32)
}

#[wasm_bindgen]
pub fn get_upload_slot(index: u32) -> i32 {
    with_runner(|r| r.uploads().get(index as usize).map_or(-1, |u| u.slot as i32))
}

#[wasm_bindgen]
pub fn get_upload_width(index: u32) -> u32 {
    with_runner(|r| r.uploads().get(index as usize).map_or(0, |u| u.width))
}

#[wasm_bindgen]
pub fn get_upload_height(index: u32) -> u32 {
    with_runner(|r| r.uploads().get(index as usize).map_or(0, |u| u.height))
}

/// RGBA8 pixels of one pending upload, copied into a JS typed array.
#[wasm_bindgen]
pub fn get_upload_pixels(index: u32) -> js_sys::Uint8Array {
    with_runner(|r| match r.uploads().get(index as usize) {
        Some(upload) => js_sys::Uint8Array::from(upload.pixels.as_slice()),
        None => js_sys::Uint8Array::new_with_length(0),
    })
}

#[wasm_bindgen]
pub fn clear_uploads() {
    with_runner(|r| r.clear_uploads());
}

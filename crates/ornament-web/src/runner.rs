use std::collections::HashMap;
use serde::Serialize;
use ornament_engine::{
    AssetError, BufferRenderer, FrameInput, FrameReport, PhotoManifest,
    PointerSample, ProtocolLayout, SampleSlot, SceneConfig, SceneController, SceneError,
    TextureTicket, Gesture,
};
use ornament_engine::glam::Vec2;
use ornament_engine::Renderer;

/// Photo request as handed to the browser loader. `request` is never reused,
/// so a load that outlives a photo swap cannot land on the new pool.
#[derive(Debug, Serialize)]
struct PhotoRequest<'a> {
    request: u32,
    particle: u32,
    url: &'a str,
}

/// Engine-generated texture waiting for the browser to upload it.
pub struct PendingUpload {
    pub slot: u32,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Scene runner that wires the controller to the browser.
///
/// `lib.rs` keeps one in a `thread_local!` and exports free functions via
/// `#[wasm_bindgen]`, because wasm-bindgen cannot export generic structs
/// directly.
pub struct SceneRunner {
    scene: SceneController<BufferRenderer>,
    input: SampleSlot,
    /// Tickets handed to the browser, keyed by request id.
    tickets: HashMap<u32, TextureTicket>,
    next_request: u32,
    uploads: Vec<PendingUpload>,
    report: FrameReport,
}

impl SceneRunner {
    /// Build a scene from JSON config and photo manifest.
    pub fn new(config_json: &str, photos_json: &str) -> Result<Self, SceneError> {
        let config = SceneConfig::from_json(config_json)?;
        let manifest = PhotoManifest::from_json(photos_json)?.sanitized();
        let renderer = BufferRenderer::new(ProtocolLayout::from_config(&config));
        let particle_count = config.particle_count;
        let scene = SceneController::construct(renderer, &manifest.photos, particle_count, config)?;

        let mut runner = Self {
            scene,
            input: SampleSlot::new(),
            tickets: HashMap::new(),
            next_request: 0,
            uploads: Vec::new(),
            report: FrameReport::default(),
        };
        runner.collect_uploads();
        Ok(runner)
    }

    fn collect_uploads(&mut self) {
        for (handle, image) in self.scene.renderer_mut().take_uploads() {
            self.uploads.push(PendingUpload {
                slot: handle.0,
                width: image.width(),
                height: image.height(),
                pixels: image.into_raw(),
            });
        }
    }

    /// Store the latest gesture sample. Only the newest sample per frame is used.
    pub fn set_gesture(&mut self, code: u32, x: f32, y: f32, present: bool) {
        let sample = if present {
            PointerSample::new(Gesture::from_code(code), Vec2::new(x, y))
        } else {
            PointerSample::absent()
        };
        self.input.store(sample);
    }

    /// Run one frame at absolute `time` (seconds).
    pub fn tick(&mut self, time: f32) {
        let sample = self.input.latest();
        self.report = self.scene.tick(&FrameInput::new(sample, time));
    }

    /// JSON array of new photo requests:
    /// `[{"request": 3, "particle": 12, "url": "..."}]`.
    pub fn photo_requests_json(&mut self) -> String {
        let requests = self.scene.take_texture_requests();
        let first = self.next_request;
        let json = {
            let wire: Vec<PhotoRequest> = requests
                .iter()
                .zip(first..)
                .map(|(r, request)| PhotoRequest {
                    request,
                    particle: r.particle.0,
                    url: r.source.as_str(),
                })
                .collect();
            serde_json::to_string(&wire)
        };
        let json = match json {
            Ok(json) => json,
            Err(err) => {
                log::error!("photo requests not serializable: {}", err);
                return "[]".to_string();
            }
        };
        for request in requests {
            self.tickets.insert(self.next_request, request.ticket);
            self.next_request += 1;
        }
        json
    }

    /// The browser decoded the photo for `request`. Returns the texture slot
    /// it must upload into, or -1 when the scene no longer wants it.
    pub fn photo_loaded(&mut self, request: u32) -> i32 {
        let Some(ticket) = self.tickets.remove(&request) else {
            log::debug!("photo request {} is stale", request);
            return -1;
        };
        if ticket.is_cancelled() {
            return -1;
        }
        let renderer = self.scene.renderer_mut();
        match renderer.reserve_texture() {
            Ok(handle) => {
                if ticket.resolve(handle) {
                    handle.0 as i32
                } else {
                    renderer.release_texture(handle);
                    -1
                }
            }
            Err(err) => {
                ticket.fail(AssetError::Decode(err.to_string()));
                -1
            }
        }
    }

    /// The browser could not fetch or decode a photo.
    pub fn photo_failed(&mut self, request: u32, reason: &str) {
        if let Some(ticket) = self.tickets.remove(&request) {
            ticket.fail(AssetError::Fetch(reason.to_string()));
        }
    }

    /// Swap the photo list. Returns false if the manifest does not parse.
    pub fn replace_photos(&mut self, photos_json: &str) -> bool {
        match PhotoManifest::from_json(photos_json) {
            Ok(manifest) => {
                self.tickets.clear();
                self.scene.replace_photos(&manifest.sanitized().photos);
                true
            }
            Err(err) => {
                log::warn!("photo manifest rejected: {}", err);
                false
            }
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    /// Tear the scene down, releasing the buffer.
    pub fn dispose(self) {
        self.scene.dispose();
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.scene.renderer().ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.scene.renderer().len() as u32
    }

    pub fn report_ptr(&self) -> *const f32 {
        self.report.as_floats().as_ptr()
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.scene.renderer().layout()
    }

    pub fn configuration(&self) -> u32 {
        self.scene.configuration().as_u8() as u32
    }

    // ---- Engine-generated textures ----

    pub fn uploads(&self) -> &[PendingUpload] {
        &self.uploads
    }

    pub fn clear_uploads(&mut self) {
        self.uploads.clear();
    }
}

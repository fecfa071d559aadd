//! `Renderer` that packs each frame into the shared float buffer described
//! by `ProtocolLayout`. The browser reads the buffer after `draw` returns and
//! issues the actual GPU calls.

use image::RgbaImage;
use crate::api::error::RenderError;
use crate::api::types::TextureHandle;
use crate::components::layer::Layer;
use crate::renderer::traits::{DrawStats, FrameData, PostEffect, Renderer, ResourceRequest};
use super::protocol::*;

/// Texture slots a browser renderer is expected to provide.
pub const DEFAULT_MAX_TEXTURES: u32 = 64;

pub struct BufferRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    max_textures: u32,
    next_texture: u32,
    /// Slots given back through `release_texture`, reused first.
    free_textures: Vec<u32>,
    /// Engine-generated images the host still has to upload.
    uploads: Vec<(TextureHandle, RgbaImage)>,
    viewport: (u32, u32),
    acquired: bool,
    stars_written: bool,
}

impl BufferRenderer {
    /// Renderer bounded by `layout`'s capacities.
    pub fn new(layout: ProtocolLayout) -> Self {
        Self {
            layout,
            buffer: Vec::new(),
            max_textures: DEFAULT_MAX_TEXTURES,
            next_texture: 0,
            free_textures: Vec::new(),
            uploads: Vec::new(),
            viewport: (0, 0),
            acquired: false,
            stars_written: false,
        }
    }

    pub fn with_max_textures(mut self, max_textures: u32) -> Self {
        self.max_textures = max_textures;
        self
    }

    /// Allocate a texture slot for an image the host loads itself (photos).
    pub fn reserve_texture(&mut self) -> Result<TextureHandle, RenderError> {
        if !self.acquired {
            return Err(RenderError::ContextUnavailable("buffer not acquired".into()));
        }
        if let Some(slot) = self.free_textures.pop() {
            return Ok(TextureHandle(slot));
        }
        if self.next_texture >= self.max_textures {
            return Err(RenderError::CapacityExceeded {
                requested: self.next_texture as usize + 1,
                capacity: self.max_textures as usize,
            });
        }
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        Ok(handle)
    }

    /// Drain images uploaded through `upload_texture` since the last call.
    pub fn take_uploads(&mut self) -> Vec<(TextureHandle, RgbaImage)> {
        std::mem::take(&mut self.uploads)
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    pub fn ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Texture slots currently handed out.
    pub fn textures_used(&self) -> u32 {
        self.next_texture - self.free_textures.len() as u32
    }

    fn check(requested: usize, capacity: usize) -> Result<(), RenderError> {
        if requested > capacity {
            Err(RenderError::CapacityExceeded { requested, capacity })
        } else {
            Ok(())
        }
    }
}

impl Renderer for BufferRenderer {
    fn backend(&self) -> &'static str {
        "buffer"
    }

    fn acquire(&mut self, request: &ResourceRequest) -> Result<(), RenderError> {
        Self::check(request.instances, self.layout.max_instances)?;
        Self::check(request.lights, self.layout.max_lights)?;
        Self::check(request.stars, self.layout.max_stars)?;

        self.buffer = vec![0.0; self.layout.buffer_total_floats];
        self.buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.buffer[HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        self.buffer[HEADER_MAX_LIGHTS] = self.layout.max_lights as f32;

        let materials = material_table();
        let start = self.layout.material_data_offset;
        self.buffer[start..start + materials.len()].copy_from_slice(&materials);

        self.acquired = true;
        self.stars_written = false;
        log::debug!(
            "buffer renderer acquired: {} floats ({} instances)",
            self.layout.buffer_total_floats,
            self.layout.max_instances
        );
        Ok(())
    }

    fn upload_texture(&mut self, image: &RgbaImage) -> Result<TextureHandle, RenderError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::TextureUpload("empty image".into()));
        }
        let handle = self.reserve_texture()?;
        self.uploads.push((handle, image.clone()));
        Ok(handle)
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        if handle.0 < self.next_texture && !self.free_textures.contains(&handle.0) {
            self.free_textures.push(handle.0);
        }
    }

    fn draw(&mut self, frame: &FrameData) -> DrawStats {
        if !self.acquired {
            return DrawStats::default();
        }
        let layout = &self.layout;
        let buf = &mut self.buffer;
        buf[HEADER_LOCK] = 1.0;

        buf[layout.camera_offset..layout.camera_offset + CAMERA_FLOATS]
            .copy_from_slice(bytemuck::cast_slice(std::slice::from_ref(&frame.camera)));

        // Bloom instances first, overlay right behind them.
        let mut written = 0;
        let mut counts = [0usize; Layer::COUNT];
        for pass in frame.passes {
            let room = layout.max_instances - written;
            let take = pass.instances.len().min(room);
            if take < pass.instances.len() {
                log::warn!("{:?} pass truncated to {} instances", pass.layer, take);
            }
            let start = layout.instance_data_offset + written * INSTANCE_FLOATS;
            let floats: &[f32] = bytemuck::cast_slice(&pass.instances[..take]);
            buf[start..start + floats.len()].copy_from_slice(floats);
            written += take;
            counts[pass.layer.as_u8() as usize] += take;

            let clear = pass.clear.bits() as f32;
            match pass.layer {
                Layer::Bloom => buf[HEADER_BLOOM_CLEAR] = clear,
                Layer::Overlay => buf[HEADER_OVERLAY_CLEAR] = clear,
            }
            for effect in pass.effects {
                match *effect {
                    PostEffect::BrightPass { threshold } => buf[HEADER_BLOOM_THRESHOLD] = threshold,
                    PostEffect::Bloom { strength, radius } => {
                        buf[HEADER_BLOOM_STRENGTH] = strength;
                        buf[HEADER_BLOOM_RADIUS] = radius;
                    }
                    PostEffect::ToneMap { exposure } => buf[HEADER_EXPOSURE] = exposure,
                }
            }
        }
        buf[HEADER_BLOOM_COUNT] = counts[Layer::Bloom.as_u8() as usize] as f32;
        buf[HEADER_OVERLAY_COUNT] = counts[Layer::Overlay.as_u8() as usize] as f32;

        let lights = frame.lights.len().min(layout.max_lights);
        for (i, light) in frame.lights[..lights].iter().enumerate() {
            let start = layout.light_data_offset + i * LIGHT_FLOATS;
            buf[start..start + LIGHT_FLOATS].copy_from_slice(&light.to_floats());
        }
        buf[HEADER_LIGHT_COUNT] = lights as f32;

        if !self.stars_written {
            let stars = frame.starfield.points.len().min(layout.max_stars * STAR_FLOATS);
            let start = layout.star_data_offset;
            buf[start..start + stars].copy_from_slice(&frame.starfield.points[..stars]);
            self.stars_written = true;
        }
        buf[HEADER_STAR_YAW] = frame.starfield.yaw;
        buf[HEADER_FOG_DENSITY] = frame.fog_density;

        buf[HEADER_FRAME_COUNTER] = frame.frame as f32;
        buf[HEADER_LOCK] = 0.0;

        DrawStats {
            passes: frame.passes.len() as u32,
            instances: written as u32,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn release(&mut self) {
        self.buffer = Vec::new();
        self.uploads.clear();
        self.next_texture = 0;
        self.free_textures.clear();
        self.acquired = false;
        log::debug!("buffer renderer released");
    }
}

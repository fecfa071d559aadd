//! Renderer contract.
//!
//! The engine computes everything a frame needs and hands it over as one
//! borrowed `FrameData`. Backends (the browser renderer through
//! `BufferRenderer`, or a native GPU backend) only draw.

use image::RgbaImage;
use crate::api::error::RenderError;
use crate::api::types::TextureHandle;
use crate::components::layer::Layer;
use super::camera::CameraUniform;
use super::instance::ParticleInstance;
use crate::systems::lighting::Light;

/// Which buffers a pass clears before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearFlags {
    pub color: bool,
    pub depth: bool,
}

impl ClearFlags {
    pub const ALL: ClearFlags = ClearFlags { color: true, depth: true };
    pub const DEPTH_ONLY: ClearFlags = ClearFlags { color: false, depth: true };

    /// Bit 0 color, bit 1 depth.
    pub fn bits(&self) -> u8 {
        (self.color as u8) | ((self.depth as u8) << 1)
    }
}

/// One stage of a pass's post-processing chain, applied in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostEffect {
    /// Keep only luminance above `threshold`.
    BrightPass { threshold: f32 },
    /// Blur the bright pass and add it back.
    Bloom { strength: f32, radius: f32 },
    /// Map HDR to display range.
    ToneMap { exposure: f32 },
}

/// One ordered draw of a render layer.
#[derive(Debug, Clone, Copy)]
pub struct RenderPass<'a> {
    pub layer: Layer,
    pub clear: ClearFlags,
    pub effects: &'a [PostEffect],
    pub instances: &'a [ParticleInstance],
}

/// Background point cloud, drawn first in the bloom pass.
#[derive(Debug, Clone, Copy)]
pub struct Starfield<'a> {
    /// xyz triples.
    pub points: &'a [f32],
    /// Rotation about world Y.
    pub yaw: f32,
}

/// Complete frame: passes in draw order plus shared state.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    pub frame: u64,
    pub camera: CameraUniform,
    pub passes: &'a [RenderPass<'a>],
    pub lights: &'a [Light],
    pub starfield: Starfield<'a>,
    /// Exponential fog density of the bloom pass.
    pub fog_density: f32,
}

impl FrameData<'_> {
    pub fn pass(&self, layer: Layer) -> Option<&RenderPass<'_>> {
        self.passes.iter().find(|p| p.layer == layer)
    }

    pub fn instance_count(&self) -> usize {
        self.passes.iter().map(|p| p.instances.len()).sum()
    }
}

/// Resources a scene needs from its backend, checked once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRequest {
    pub instances: usize,
    pub lights: usize,
    pub stars: usize,
}

/// Counters returned from a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub passes: u32,
    pub instances: u32,
}

/// Renderer trait for GPU backends.
pub trait Renderer {
    /// Backend identifier (e.g., "buffer", "webgpu", "metal").
    fn backend(&self) -> &'static str;

    /// Reserve what the scene needs. A failure here is fatal to the scene.
    fn acquire(&mut self, request: &ResourceRequest) -> Result<(), RenderError>;

    /// Upload an engine-generated texture and return its slot.
    fn upload_texture(&mut self, image: &RgbaImage) -> Result<TextureHandle, RenderError>;

    /// Give a texture slot back for reuse. Unknown handles are ignored.
    fn release_texture(&mut self, handle: TextureHandle);

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData) -> DrawStats;

    /// Handle viewport resize.
    fn resize(&mut self, width: u32, height: u32);

    /// Release everything acquired. The renderer may be reused afterwards.
    fn release(&mut self);
}

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::api::types::TextureHandle;
use crate::components::kind::{Material, MeshKind};

/// Texture slot written for instances that sample nothing.
pub const NO_TEXTURE: f32 = -1.0;

/// Per-instance render data.
/// Wire format: 20 floats = 80 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    pub mesh: f32,
    pub material: f32,
    /// Renderer texture slot, or `NO_TEXTURE` while a photo is unresolved.
    pub texture: f32,
    pub _pad: f32,
}

impl Default for ParticleInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            mesh: 0.0,
            material: 0.0,
            texture: NO_TEXTURE,
            _pad: 0.0,
        }
    }
}

impl ParticleInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: Mat4, mesh: MeshKind, material: Material, texture: Option<TextureHandle>) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            mesh: mesh.id() as f32,
            material: material.id() as f32,
            texture: texture.map_or(NO_TEXTURE, |t| t.0 as f32),
            _pad: 0.0,
        }
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        if self.texture < 0.0 {
            None
        } else {
            Some(TextureHandle(self.texture as u32))
        }
    }

    pub fn translation(&self) -> [f32; 3] {
        [self.model[3][0], self.model[3][1], self.model[3][2]]
    }
}

/// Instances of one render layer, rebuilt every frame.
pub struct InstanceBuffer {
    pub instances: Vec<ParticleInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: ParticleInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn as_slice(&self) -> &[ParticleInstance] {
        &self.instances
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

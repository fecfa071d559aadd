/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Instances: max_instances × 20 floats]   bloom layer first, then overlay
/// [Lights: max_lights × 12 floats]
/// [Materials: material count × 12 floats]  written once at acquire
/// [Stars: max_stars × 3 floats]            written once at acquire
/// ```
///
/// Capacities are written once into the header at acquire.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::SceneConfig;
use crate::components::kind::Material;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::ParticleInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_INSTANCES: usize = 3;
pub const HEADER_BLOOM_COUNT: usize = 4;
pub const HEADER_OVERLAY_COUNT: usize = 5;
pub const HEADER_BLOOM_STRENGTH: usize = 6;
pub const HEADER_BLOOM_RADIUS: usize = 7;
pub const HEADER_BLOOM_THRESHOLD: usize = 8;
pub const HEADER_EXPOSURE: usize = 9;
pub const HEADER_BLOOM_CLEAR: usize = 10;
pub const HEADER_OVERLAY_CLEAR: usize = 11;
pub const HEADER_LIGHT_COUNT: usize = 12;
pub const HEADER_STAR_YAW: usize = 13;
pub const HEADER_FOG_DENSITY: usize = 14;
pub const HEADER_MAX_LIGHTS: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per camera block: view-projection (16), eye (3), pad.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per instance: model matrix (16), mesh, material, texture, pad.
pub const INSTANCE_FLOATS: usize = ParticleInstance::FLOATS;

/// Floats per light: kind, x, y, z, r, g, b, intensity, range, pad×3.
pub const LIGHT_FLOATS: usize = 12;

/// Floats per material: color×3, metalness, roughness, emissive×3,
/// emissive intensity, tone mapped, textured, pad.
pub const MATERIAL_FLOATS: usize = 12;

/// Floats per star: x, y, z.
pub const STAR_FLOATS: usize = 3;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_stars: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where the material table begins.
    pub material_data_offset: usize,
    /// Offset (in floats) where star positions begin.
    pub star_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize, max_stars: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let light_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let material_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let star_data_offset = material_data_offset + Material::COUNT * MATERIAL_FLOATS;

        let buffer_total_floats = star_data_offset + max_stars * STAR_FLOATS;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_lights,
            max_stars,
            camera_offset,
            instance_data_offset,
            light_data_offset,
            material_data_offset,
            star_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Layout sized for a scene built from `config` (apex included).
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.particle_count + 1, config.max_lights, config.starfield.count)
    }
}

/// Flattened material table, indexed by `Material::id`.
pub fn material_table() -> Vec<f32> {
    let mut table = Vec::with_capacity(Material::COUNT * MATERIAL_FLOATS);
    for material in Material::ALL {
        let d = material.desc();
        table.extend_from_slice(&d.color);
        table.push(d.metalness);
        table.push(d.roughness);
        table.extend_from_slice(&d.emissive);
        table.push(d.emissive_intensity);
        table.push(if d.tone_mapped { 1.0 } else { 0.0 });
        table.push(if d.textured { 1.0 } else { 0.0 });
        table.push(0.0);
    }
    table
}

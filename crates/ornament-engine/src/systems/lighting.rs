/// Scene lighting shared by both render passes.
///
/// Lights are persistent: the rig is built once at construction and the
/// renderer receives the same list every frame.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LightKind {
    Ambient = 0,
    Directional = 1,
    Point = 2,
}

/// One light.
///
/// Wire format (12 floats / 48 bytes):
/// `[kind, x, y, z, r, g, b, intensity, range, pad, pad, pad]`
/// `x, y, z` is the position for point and directional lights (directional
/// lights shine from there toward the origin) and unused for ambient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Light {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance for point lights, 0 for infinite.
    pub range: f32,
    pub _pad: [f32; 3],
}

impl Light {
    fn with_kind(kind: LightKind, pos: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            kind: kind as u8 as f32,
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range,
            _pad: [0.0; 3],
        }
    }

    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Self::with_kind(LightKind::Ambient, Vec3::ZERO, color, intensity, 0.0)
    }

    pub fn directional(pos: Vec3, color: [f32; 3], intensity: f32) -> Self {
        Self::with_kind(LightKind::Directional, pos, color, intensity, 0.0)
    }

    pub fn point(pos: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self::with_kind(LightKind::Point, pos, color, intensity, range)
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_floats(&self) -> [f32; 12] {
        [
            self.kind, self.x, self.y, self.z, self.r, self.g, self.b, self.intensity, self.range,
            0.0, 0.0, 0.0,
        ]
    }
}

/// Convert a packed `0xRRGGBB` color to linear-ish [0, 1] components.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Ordered set of lights, capped at a renderer-provided maximum.
pub struct LightRig {
    lights: Vec<Light>,
    max_lights: usize,
}

impl LightRig {
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            max_lights,
        }
    }

    /// Warm ambient + gold key light + orange rim light.
    pub fn festive(max_lights: usize) -> Self {
        let mut rig = Self::with_capacity(max_lights);
        rig.add(Light::ambient([1.0, 1.0, 1.0], 0.1));
        rig.add(Light::directional(Vec3::new(10.0, 20.0, 10.0), rgb(0xFFD700), 2.0));
        rig.add(Light::point(Vec3::new(-10.0, 5.0, -10.0), rgb(0xFF3300), 1.0, 50.0));
        rig
    }

    /// Add a light. Returns false when the rig is full.
    pub fn add(&mut self, light: Light) -> bool {
        if self.lights.len() >= self.max_lights {
            log::warn!("light rig full ({}), dropping light", self.max_lights);
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn as_slice(&self) -> &[Light] {
        &self.lights
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn max_lights(&self) -> usize {
        self.max_lights
    }
}

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for a scene, provided by the host at construction.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes: `{"particle_count": 800, "focus": {"scale": 4.0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of index-placed particles (the apex ornament comes on top).
    pub particle_count: usize,
    /// Seed for the distribution RNG. Same seed, same scene.
    pub seed: u64,
    pub tree: TreeConfig,
    pub scatter: ScatterConfig,
    pub motion: MotionConfig,
    pub focus: FocusConfig,
    pub bloom: BloomConfig,
    pub camera: CameraConfig,
    pub starfield: StarfieldConfig,
    /// Exponential fog density of the bloom pass (black fog).
    pub fog_density: f32,
    /// Maximum lights a renderer has to accept.
    pub max_lights: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            seed: 0x0C0F_FEE5,
            tree: TreeConfig::default(),
            scatter: ScatterConfig::default(),
            motion: MotionConfig::default(),
            focus: FocusConfig::default(),
            bloom: BloomConfig::default(),
            camera: CameraConfig::default(),
            starfield: StarfieldConfig::default(),
            fog_density: 0.02,
            max_lights: 8,
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Conical spiral placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub height: f32,
    pub base_radius: f32,
    /// Relative radius jitter (0.1 = ±10%).
    pub radius_jitter: f32,
    /// Height of the apex ornament above the top of the cone.
    pub apex_lift: f32,
    pub apex_scale: f32,
    pub apex_scatter_position: Vec3,
    pub apex_spin: Vec3,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: 24.0,
            base_radius: 10.0,
            radius_jitter: 0.1,
            apex_lift: 0.8,
            apex_scale: 1.5,
            apex_scatter_position: Vec3::new(0.0, 20.0, 0.0),
            apex_spin: Vec3::new(0.0, 0.05, 0.0),
        }
    }
}

/// Spherical shell placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub min_radius: f32,
    pub radius_range: f32,
    /// Amplitude of the vertical bob applied while scattered.
    pub oscillation: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            min_radius: 5.0,
            radius_range: 90.0,
            oscillation: 0.1,
        }
    }
}

/// Per-frame smoothing factors. All values are fractions per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub position_lerp: f32,
    /// Used instead of `position_lerp` while in `Focus`.
    pub focus_position_lerp: f32,
    pub scale_lerp: f32,
    /// Group yaw added each idle frame (radians).
    pub idle_yaw_rate: f32,
    /// Smoothing of group pitch/yaw toward the hand target.
    pub group_lerp: f32,
    /// Pointer offset to group rotation gain.
    pub rotation_sensitivity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            position_lerp: 0.05,
            focus_position_lerp: 0.08,
            scale_lerp: 0.1,
            idle_yaw_rate: 0.001,
            group_lerp: 0.05,
            rotation_sensitivity: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Distance of the focused photo in front of the camera.
    pub distance: f32,
    pub scale: f32,
    /// Background particles closer than this to the camera shrink to zero.
    pub near_guard: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            distance: 10.0,
            scale: 5.0,
            near_guard: 12.0,
        }
    }
}

/// Bloom chain of the background pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub threshold: f32,
    pub radius: f32,
    pub base_strength: f32,
    pub breathing_amplitude: f32,
    /// Angular frequency of the breathing (radians per second).
    pub breathing_frequency: f32,
    pub strength_lerp: f32,
    pub exposure: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            radius: 0.6,
            base_strength: 1.2,
            breathing_amplitude: 0.2,
            breathing_frequency: 0.5,
            strength_lerp: 0.05,
            exposure: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 40.0),
            target: Vec3::ZERO,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube the stars are spread over.
    pub extent: f32,
    /// Yaw in radians per second of absolute time.
    pub yaw_rate: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            extent: 150.0,
            yaw_rate: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "particle_count": 800,
            "focus": { "scale": 4.0 },
            "camera": { "position": [0.0, 2.0, 30.0] }
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.particle_count, 800);
        assert_eq!(config.focus.scale, 4.0);
        assert_eq!(config.focus.distance, 10.0);
        assert_eq!(config.camera.position, Vec3::new(0.0, 2.0, 30.0));
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.tree, TreeConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneConfig::from_json("{\"particle_count\": \"many\"}").is_err());
    }

    #[test]
    fn focus_lerp_is_faster_than_default() {
        let motion = MotionConfig::default();
        assert!(motion.focus_position_lerp > motion.position_lerp);
    }
}

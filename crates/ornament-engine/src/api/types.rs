use bytemuck::{Pod, Zeroable};

/// Stable identifier of a particle inside one pool.
/// Ids are dense: the particle with id `n` lives at index `n` of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

impl ParticleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Renderer-side texture slot. Slot 0 is reserved for the photo placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Slot uploaded at construction for photos whose image failed to resolve.
    pub const PLACEHOLDER: TextureHandle = TextureHandle(0);
}

/// One of the three global display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneConfiguration {
    /// Compact conical tree.
    #[default]
    Tree,
    /// Scattered cloud on a spherical shell.
    Scatter,
    /// One photo enlarged in front of the camera.
    Focus,
}

impl SceneConfiguration {
    pub fn as_u8(self) -> u8 {
        match self {
            SceneConfiguration::Tree => 0,
            SceneConfiguration::Scatter => 1,
            SceneConfiguration::Focus => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SceneConfiguration::Tree),
            1 => Some(SceneConfiguration::Scatter),
            2 => Some(SceneConfiguration::Focus),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneConfiguration::Tree => "tree",
            SceneConfiguration::Scatter => "scatter",
            SceneConfiguration::Focus => "focus",
        }
    }
}

/// Event recorded when the configuration actually changes.
/// `frame` is the index of the frame that first renders the new configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationTransition {
    pub from: SceneConfiguration,
    pub to: SceneConfiguration,
    pub frame: u64,
}

/// Result of a configuration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationOutcome {
    /// Already in the requested configuration.
    Unchanged,
    /// Focus was requested but no photo particle exists.
    Declined,
    /// The configuration changed; `reparented` particles moved layers.
    Changed {
        transition: ConfigurationTransition,
        reparented: usize,
    },
}

impl ConfigurationOutcome {
    pub fn reparented(&self) -> usize {
        match self {
            ConfigurationOutcome::Changed { reparented, .. } => *reparented,
            _ => 0,
        }
    }
}

/// Per-frame summary returned by `SceneController::tick`.
/// Mirrors the header fields the bridge writes for the browser.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct FrameReport {
    pub frame: f32,
    pub configuration: f32,
    pub bloom_instances: f32,
    pub overlay_instances: f32,
    pub bloom_strength: f32,
    /// 1.0 on the frame a configuration transition became visible.
    pub transitioned: f32,
}

impl FrameReport {
    pub const FLOATS: usize = 6;

    pub fn configuration(&self) -> Option<SceneConfiguration> {
        SceneConfiguration::from_u8(self.configuration as u8)
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

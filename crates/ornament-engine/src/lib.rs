pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::config::{
    SceneConfig, TreeConfig, ScatterConfig, MotionConfig, FocusConfig,
    BloomConfig, CameraConfig, StarfieldConfig,
};
pub use api::controller::SceneController;
pub use api::error::{RenderError, AssetError, SceneError};
pub use api::types::{
    ParticleId, TextureHandle, SceneConfiguration, ConfigurationTransition,
    ConfigurationOutcome, FrameReport,
};
pub use components::kind::{OrnamentKind, Glyph, Material, MeshKind};
pub use components::layer::Layer;
pub use components::particle::Particle;
pub use components::transform::Transform;
pub use core::graph::{SceneGraph, GroupRotation};
pub use core::pool::ParticlePool;
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::instance::{ParticleInstance, InstanceBuffer};
pub use renderer::pipeline::RenderPipeline;
pub use renderer::traits::{Renderer, FrameData, RenderPass, ResourceRequest, DrawStats};
pub use input::sample::{Gesture, PointerSample, FrameInput, SampleSlot};
pub use input::gesture::{classify, GestureThresholds};
pub use input::policy::{ModePolicy, GesturePolicy};
pub use assets::manifest::{PhotoSource, PhotoManifest};
pub use assets::placeholder::placeholder_image;
pub use assets::registry::{TextureRegistry, TextureRequest, TextureTicket};
pub use systems::lighting::{Light, LightRig};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::buffer::BufferRenderer;

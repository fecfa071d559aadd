pub mod camera;
pub mod instance;
pub mod pipeline;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{
    Renderer, FrameData, RenderPass, ClearFlags, PostEffect,
    Starfield, ResourceRequest, DrawStats,
};

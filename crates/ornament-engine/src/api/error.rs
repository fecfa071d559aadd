use thiserror::Error;

/// Failures raised by a `Renderer` backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The graphics context (device, canvas, swap chain) could not be acquired.
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),

    /// The scene needs more instance or texture slots than the backend provides.
    #[error("renderer capacity exceeded: requested {requested}, capacity {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// A texture could not be created on the backend.
    #[error("texture upload failed: {0}")]
    TextureUpload(String),
}

/// Failures resolving a single photo image. Never surfaced past the scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("image fetch failed: {0}")]
    Fetch(String),

    #[error("image decode failed: {0}")]
    Decode(String),

    /// The owning particle or scene was torn down before completion.
    #[error("image request cancelled")]
    Cancelled,
}

/// Scene-level failures. Only construction can produce one.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("resource acquisition failed: {0}")]
    Resource(#[from] RenderError),

    #[error("invalid scene configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A scene with zero particles cannot be constructed.
    #[error("scene has no particles")]
    EmptyScene,
}

pub type Result<T> = std::result::Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_converts_into_scene_error() {
        let err: SceneError = RenderError::ContextUnavailable("no adapter".into()).into();
        assert!(matches!(err, SceneError::Resource(RenderError::ContextUnavailable(_))));
        assert_eq!(
            err.to_string(),
            "resource acquisition failed: graphics context unavailable: no adapter"
        );
    }

    #[test]
    fn capacity_message_names_both_sizes() {
        let err = RenderError::CapacityExceeded { requested: 4000, capacity: 512 };
        assert!(err.to_string().contains("4000"));
        assert!(err.to_string().contains("512"));
    }
}

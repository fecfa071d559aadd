use serde::{Deserialize, Serialize};

/// External image reference of a photo particle (URL, object URL, path).
/// The engine never dereferences it; the host resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoSource(String);

impl PhotoSource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PhotoSource {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// Photo list supplied by the host, e.g. `{"photos": ["a.jpg", "b.jpg"]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoManifest {
    #[serde(default)]
    pub photos: Vec<PhotoSource>,
}

impl PhotoManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Drop blank entries; they can never resolve to an image.
    pub fn sanitized(mut self) -> Self {
        self.photos.retain(|p| !p.as_str().trim().is_empty());
        self
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

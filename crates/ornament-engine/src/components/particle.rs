use glam::Vec3;
use crate::api::types::ParticleId;
use crate::components::kind::{Material, MeshKind, OrnamentKind};
use crate::components::layer::Layer;
use crate::components::transform::Transform;

/// One ornament of the scene.
///
/// Targets, kind and spin are fixed at construction and only readable from
/// outside. The live transform is local to `layer` and is the only state the
/// resolver mutates; `layer` itself is only changed by the scene graph.
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    kind: OrnamentKind,
    material: Material,
    mesh: MeshKind,
    tree_target: Vec3,
    scatter_target: Vec3,
    base_scale: f32,
    /// Per-frame euler increment (x, y, z) used for idle rotation.
    spin: Vec3,
    pub(crate) live: Transform,
    pub(crate) layer: Layer,
}

impl Particle {
    /// Create a particle resting at its tree target in the bloom layer.
    pub fn new(
        id: ParticleId,
        kind: OrnamentKind,
        material: Material,
        mesh: MeshKind,
        tree_target: Vec3,
        scatter_target: Vec3,
        base_scale: f32,
    ) -> Self {
        Self {
            id,
            kind,
            material,
            mesh,
            tree_target,
            scatter_target,
            base_scale,
            spin: Vec3::ZERO,
            live: Transform::from_translation(tree_target).with_scale(base_scale),
            layer: Layer::Bloom,
        }
    }

    // -- Builder pattern --

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_orientation(mut self, rotation: glam::Quat) -> Self {
        self.live.rotation = rotation;
        self
    }

    // -- Accessors --

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn kind(&self) -> OrnamentKind {
        self.kind
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn mesh(&self) -> MeshKind {
        self.mesh
    }

    pub fn tree_target(&self) -> Vec3 {
        self.tree_target
    }

    pub fn scatter_target(&self) -> Vec3 {
        self.scatter_target
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    /// Live transform, relative to `layer()`.
    pub fn live(&self) -> &Transform {
        &self.live
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn is_photo(&self) -> bool {
        self.kind.is_photo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_rests_at_tree_target() {
        let p = Particle::new(
            ParticleId(3),
            OrnamentKind::Bauble,
            Material::Gold,
            MeshKind::Sphere,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(40.0, 0.0, 0.0),
            0.2,
        )
        .with_spin(Vec3::new(0.01, 0.02, 0.0));

        assert_eq!(p.live().translation, p.tree_target());
        assert_eq!(p.live().scale, 0.2);
        assert_eq!(p.layer(), Layer::Bloom);
        assert_eq!(p.spin(), Vec3::new(0.01, 0.02, 0.0));
        assert!(!p.is_photo());
    }
}

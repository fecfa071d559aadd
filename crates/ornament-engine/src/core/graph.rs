use glam::{EulerRot, Quat};
use crate::api::types::ParticleId;
use crate::components::layer::Layer;
use crate::components::particle::Particle;
use crate::components::transform::Transform;

/// Pitch and yaw of the bloom group, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroupRotation {
    pub pitch: f32,
    pub yaw: f32,
}

impl GroupRotation {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Two-layer scene graph.
///
/// The bloom layer hangs off a rotating group node; the overlay layer is
/// rooted at world origin with no inherited transform. Each particle is a
/// child of exactly one layer, and the membership lists here always agree
/// with `Particle::layer`: only `reparent` changes either.
#[derive(Debug, Default)]
pub struct SceneGraph {
    group: GroupRotation,
    members: [Vec<ParticleId>; Layer::COUNT],
}

impl SceneGraph {
    /// Attach every particle to the layer it already records.
    pub fn build(particles: &[Particle]) -> Self {
        let mut graph = Self::default();
        for p in particles {
            graph.members[p.layer().as_u8() as usize].push(p.id());
        }
        graph
    }

    pub fn group(&self) -> GroupRotation {
        self.group
    }

    pub fn set_group(&mut self, group: GroupRotation) {
        self.group = group;
    }

    /// Transform from a layer's local space to world space.
    pub fn layer_transform(&self, layer: Layer) -> Transform {
        match layer {
            Layer::Bloom => Transform::IDENTITY.with_rotation(self.group.quat()),
            Layer::Overlay => Transform::IDENTITY,
        }
    }

    pub fn members(&self, layer: Layer) -> &[ParticleId] {
        &self.members[layer.as_u8() as usize]
    }

    /// World transform of a particle, composed through its layer.
    pub fn world_of(&self, particle: &Particle) -> Transform {
        self.layer_transform(particle.layer()).compose(particle.live())
    }

    /// Express a world transform in the local space of `layer`.
    pub fn local_in(&self, layer: Layer, world: &Transform) -> Transform {
        self.layer_transform(layer).inverse().compose(world)
    }

    /// Move a particle to `dest`, rewriting its live transform so the world
    /// transform (position, orientation and scale) is unchanged.
    /// Returns false when the particle is already in `dest`.
    pub fn reparent(&mut self, particle: &mut Particle, dest: Layer) -> bool {
        let src = particle.layer();
        if src == dest {
            return false;
        }
        let world = self.world_of(particle);
        let local = self.local_in(dest, &world);

        let id = particle.id();
        self.members[src.as_u8() as usize].retain(|&m| m != id);
        self.members[dest.as_u8() as usize].push(id);
        particle.layer = dest;
        if local.is_finite() {
            particle.live = local;
        }
        log::debug!("reparent particle {} {:?} -> {:?}", id.0, src, dest);
        true
    }

    /// Every particle's recorded layer matches its membership list.
    pub fn is_consistent(&self, particles: &[Particle]) -> bool {
        let listed: usize = self.members.iter().map(Vec::len).sum();
        listed == particles.len()
            && particles
                .iter()
                .all(|p| self.members(p.layer()).contains(&p.id()))
    }
}

use crate::assets::registry::TextureRegistry;
use crate::components::layer::Layer;
use crate::core::graph::SceneGraph;
use crate::core::pool::ParticlePool;
use crate::renderer::instance::{InstanceBuffer, ParticleInstance};

/// Fill `buffer` with the world-space instances of every particle in `layer`.
/// Photo particles carry their bound texture slot, or none while unresolved.
/// Particles whose world matrix is not finite are left out.
pub fn build_layer_instances(
    pool: &ParticlePool,
    graph: &SceneGraph,
    textures: &TextureRegistry,
    layer: Layer,
    buffer: &mut InstanceBuffer,
) {
    buffer.clear();
    for id in graph.members(layer) {
        let Some(particle) = pool.get(*id) else {
            continue;
        };
        let world = graph.world_of(particle);
        if !world.is_finite() {
            continue;
        }
        let texture = if particle.is_photo() {
            textures.texture_of(*id)
        } else {
            None
        };
        buffer.push(ParticleInstance::new(world.matrix(), particle.mesh(), particle.material(), texture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::config::SceneConfig;
    use crate::api::types::TextureHandle;
    use crate::core::graph::GroupRotation;
    use crate::core::rng::Rng;

    fn scene() -> (ParticlePool, SceneGraph) {
        let cfg = SceneConfig::default().with_particle_count(40);
        let pool = ParticlePool::build(1, &cfg, &mut Rng::new(8));
        let graph = SceneGraph::build(pool.as_slice());
        (pool, graph)
    }

    #[test]
    fn one_instance_per_member() {
        let (pool, graph) = scene();
        let mut buf = InstanceBuffer::new();
        build_layer_instances(&pool, &graph, &TextureRegistry::default(), Layer::Bloom, &mut buf);
        assert_eq!(buf.len(), pool.len());
        build_layer_instances(&pool, &graph, &TextureRegistry::default(), Layer::Overlay, &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn instances_are_in_world_space() {
        let (pool, mut graph) = scene();
        graph.set_group(GroupRotation { pitch: 0.0, yaw: std::f32::consts::FRAC_PI_2 });
        let mut buf = InstanceBuffer::new();
        build_layer_instances(&pool, &graph, &TextureRegistry::default(), Layer::Bloom, &mut buf);
        let p = pool.get(graph.members(Layer::Bloom)[0]).unwrap();
        let expected = glam::Quat::from_rotation_y(std::f32::consts::FRAC_PI_2) * p.live().translation;
        let got = Vec3::from(buf.as_slice()[0].translation());
        assert!((got - expected).length() < 1e-4);
    }

    #[test]
    fn unresolved_photos_have_no_texture() {
        let (pool, graph) = scene();
        let mut buf = InstanceBuffer::new();
        build_layer_instances(&pool, &graph, &TextureRegistry::default(), Layer::Bloom, &mut buf);
        assert!(buf.as_slice().iter().all(|i| i.texture() != Some(TextureHandle::PLACEHOLDER)));
        assert!(buf.as_slice().iter().all(|i| i.texture().is_none()));
    }
}

//! Per-frame target resolution and blending.
//!
//! Targets are computed in the local space of the particle's current layer,
//! so a bloom-layer particle chases its tree/scatter target inside the
//! rotating group while the focused particle chases a world-space point.

use glam::{EulerRot, Quat, Vec3};
use crate::api::config::{FocusConfig, MotionConfig, ScatterConfig};
use crate::api::types::{ParticleId, SceneConfiguration};
use crate::components::particle::Particle;
use crate::components::transform::{look_at_rotation, Transform};
use crate::core::graph::{GroupRotation, SceneGraph};
use crate::core::pool::ParticlePool;
use crate::input::sample::{Gesture, PointerSample};
use crate::renderer::camera::Camera3D;

/// Read-only inputs of one resolve pass.
pub struct ResolveContext<'a> {
    pub configuration: SceneConfiguration,
    pub focus: Option<ParticleId>,
    pub camera: &'a Camera3D,
    /// Absolute time in seconds.
    pub time: f32,
    pub motion: &'a MotionConfig,
    pub scatter: &'a ScatterConfig,
    pub focus_config: &'a FocusConfig,
}

/// Target of one particle, in its layer's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec3,
    pub scale: f32,
    /// Replaces the rotation outright (and suppresses spin) when set.
    pub facing: Option<Quat>,
}

/// Scatter target with the vertical bob. The phase is seeded by the tree
/// x-coordinate so each particle bobs on its own, stable schedule.
pub fn scatter_with_oscillation(particle: &Particle, time: f32, scatter: &ScatterConfig) -> Vec3 {
    let bob = (time + particle.tree_target().x).sin() * scatter.oscillation;
    particle.scatter_target() + Vec3::Y * bob
}

/// Compute the target of `particle`.
pub fn target_for(particle: &Particle, graph: &SceneGraph, ctx: &ResolveContext) -> Target {
    let base = particle.base_scale();
    match ctx.configuration {
        SceneConfiguration::Tree => Target {
            position: particle.tree_target(),
            scale: base,
            facing: None,
        },
        SceneConfiguration::Scatter => Target {
            position: scatter_with_oscillation(particle, ctx.time, ctx.scatter),
            scale: base,
            facing: None,
        },
        SceneConfiguration::Focus if ctx.focus == Some(particle.id()) => {
            let layer = graph.layer_transform(particle.layer());
            let to_local = layer.inverse();
            let world_pos = ctx.camera.point_ahead(ctx.focus_config.distance);
            let current = graph.world_of(particle).translation;
            let world_rot = look_at_rotation(current, ctx.camera.position, Vec3::Y);
            Target {
                position: to_local.transform_point(world_pos),
                scale: ctx.focus_config.scale / layer.scale,
                facing: Some((to_local.rotation * world_rot).normalize()),
            }
        }
        SceneConfiguration::Focus => {
            let world = graph.world_of(particle).translation;
            let scale = if ctx.camera.distance_to(world) < ctx.focus_config.near_guard {
                0.0
            } else {
                base
            };
            Target {
                position: scatter_with_oscillation(particle, ctx.time, ctx.scatter),
                scale,
                facing: None,
            }
        }
    }
}

/// Blend a live transform one frame toward `target`.
pub fn blend(live: &Transform, target: &Target, spin: Vec3, position_lerp: f32, scale_lerp: f32) -> Transform {
    let rotation = match target.facing {
        Some(facing) => facing,
        None => (live.rotation * Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z)).normalize(),
    };
    Transform {
        translation: live.translation.lerp(target.position, position_lerp),
        rotation,
        scale: live.scale + (target.scale - live.scale) * scale_lerp,
    }
}

/// Resolve and blend every particle. A particle whose result is not finite
/// keeps its previous transform. Returns the number of particles skipped.
pub fn resolve(pool: &mut ParticlePool, graph: &SceneGraph, ctx: &ResolveContext) -> usize {
    let position_lerp = match ctx.configuration {
        SceneConfiguration::Focus => ctx.motion.focus_position_lerp,
        _ => ctx.motion.position_lerp,
    };
    let mut skipped = 0;
    for particle in pool.iter_mut() {
        let target = target_for(particle, graph, ctx);
        let next = blend(particle.live(), &target, particle.spin(), position_lerp, ctx.motion.scale_lerp);
        if next.is_finite() {
            particle.live = next;
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        log::warn!("{} particles produced non-finite transforms this frame", skipped);
    }
    skipped
}

/// Advance the bloom group one frame.
///
/// In `Scatter` with a hand present (and not pinching) pitch and yaw chase
/// the pointer's offset from center. Otherwise yaw drifts and pitch relaxes
/// back to level.
pub fn update_group(
    group: GroupRotation,
    configuration: SceneConfiguration,
    sample: &PointerSample,
    motion: &MotionConfig,
) -> GroupRotation {
    let hand_driven = configuration == SceneConfiguration::Scatter
        && sample.present
        && sample.gesture != Gesture::Pinch;
    if hand_driven {
        let target_pitch = (sample.position.y - 0.5) * motion.rotation_sensitivity;
        let target_yaw = (sample.position.x - 0.5) * motion.rotation_sensitivity * 2.0;
        GroupRotation {
            pitch: group.pitch + (target_pitch - group.pitch) * motion.group_lerp,
            yaw: group.yaw + (target_yaw - group.yaw) * motion.group_lerp,
        }
    } else {
        GroupRotation {
            pitch: group.pitch - group.pitch * motion.group_lerp,
            yaw: group.yaw + motion.idle_yaw_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use crate::api::config::{CameraConfig, SceneConfig};
    use crate::components::kind::{Material, MeshKind, OrnamentKind};
    use crate::components::layer::Layer;

    struct Fixture {
        cfg: SceneConfig,
        camera: Camera3D,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                cfg: SceneConfig::default(),
                camera: Camera3D::from_config(&CameraConfig::default()),
            }
        }

        fn ctx(&self, configuration: SceneConfiguration, focus: Option<ParticleId>, time: f32) -> ResolveContext<'_> {
            ResolveContext {
                configuration,
                focus,
                camera: &self.camera,
                time,
                motion: &self.cfg.motion,
                scatter: &self.cfg.scatter,
                focus_config: &self.cfg.focus,
            }
        }
    }

    fn particle(id: u32, tree: Vec3, scatter: Vec3) -> Particle {
        Particle::new(ParticleId(id), OrnamentKind::Photo { reference: 0 }, Material::Photo, MeshKind::PhotoPlane, tree, scatter, 1.5)
            .with_spin(Vec3::new(0.01, 0.02, 0.0))
    }

    #[test]
    fn tree_target_is_tree_position_and_base_scale() {
        let f = Fixture::new();
        let p = particle(0, Vec3::new(3.0, 1.0, 0.0), Vec3::new(50.0, 0.0, 0.0));
        let graph = SceneGraph::build(std::slice::from_ref(&p));
        let t = target_for(&p, &graph, &f.ctx(SceneConfiguration::Tree, None, 0.0));
        assert_eq!(t.position, p.tree_target());
        assert_eq!(t.scale, 1.5);
        assert!(t.facing.is_none());
    }

    #[test]
    fn scatter_oscillation_is_phase_seeded_by_tree_x() {
        let f = Fixture::new();
        let p = particle(0, Vec3::new(1.2, 0.0, 0.0), Vec3::new(50.0, 3.0, 0.0));
        let graph = SceneGraph::build(std::slice::from_ref(&p));
        let t = target_for(&p, &graph, &f.ctx(SceneConfiguration::Scatter, None, 0.3));
        let expected = 3.0 + (0.3f32 + 1.2).sin() * 0.1;
        assert!((t.position.y - expected).abs() < 1e-5);
        assert_eq!(t.position.x, 50.0);
    }

    #[test]
    fn focused_particle_goes_in_front_of_camera_facing_it() {
        let f = Fixture::new();
        let mut ps = vec![particle(0, Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0))];
        let mut graph = SceneGraph::build(&ps);
        graph.reparent(&mut ps[0], Layer::Overlay);
        let t = target_for(&ps[0], &graph, &f.ctx(SceneConfiguration::Focus, Some(ParticleId(0)), 0.0));
        assert!((t.position - Vec3::new(0.0, 0.0, 30.0)).length() < 1e-4);
        assert_eq!(t.scale, 5.0);
        let facing = t.facing.unwrap();
        let toward_cam = (f.camera.position - graph.world_of(&ps[0]).translation).normalize();
        assert!((facing * Vec3::Z - toward_cam).length() < 1e-4);
    }

    #[test]
    fn near_guard_hides_background_particles_close_to_camera() {
        let f = Fixture::new();
        let near = particle(0, Vec3::ZERO, Vec3::ZERO);
        let mut near = near;
        near.live.translation = Vec3::new(0.0, 0.0, 35.0);
        let far = particle(1, Vec3::ZERO, Vec3::ZERO);
        let graph = SceneGraph::build(&[near.clone(), far.clone()]);
        let ctx = f.ctx(SceneConfiguration::Focus, Some(ParticleId(9)), 0.0);
        assert_eq!(target_for(&near, &graph, &ctx).scale, 0.0);
        assert_eq!(target_for(&far, &graph, &ctx).scale, 1.5);
    }

    #[test]
    fn blend_moves_a_fraction_and_spins() {
        let live = Transform::from_translation(Vec3::ZERO).with_scale(1.0);
        let target = Target { position: Vec3::new(10.0, 0.0, 0.0), scale: 0.0, facing: None };
        let next = blend(&live, &target, Vec3::new(0.0, 0.1, 0.0), 0.05, 0.1);
        assert!((next.translation.x - 0.5).abs() < 1e-6);
        assert!((next.scale - 0.9).abs() < 1e-6);
        assert!((next.rotation.angle_between(Quat::IDENTITY) - 0.1).abs() < 1e-4);
    }

    #[test]
    fn facing_overrides_spin() {
        let live = Transform::IDENTITY;
        let facing = Quat::from_rotation_y(1.0);
        let target = Target { position: Vec3::ZERO, scale: 1.0, facing: Some(facing) };
        let next = blend(&live, &target, Vec3::new(0.5, 0.5, 0.0), 0.08, 0.1);
        assert!(next.rotation.angle_between(facing) < 1e-5);
    }

    #[test]
    fn resolve_uses_faster_lerp_in_focus() {
        let f = Fixture::new();
        let mut pool = ParticlePool::from_particles(vec![particle(0, Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0))], 1);
        let graph = SceneGraph::build(pool.as_slice());
        resolve(&mut pool, &graph, &f.ctx(SceneConfiguration::Focus, None, 0.0));
        let x = pool.get(ParticleId(0)).unwrap().live().translation.x;
        assert!((x - 8.0).abs() < 1e-3);
    }

    #[test]
    fn resolve_never_touches_targets() {
        let f = Fixture::new();
        let mut pool = ParticlePool::from_particles(vec![particle(0, Vec3::ONE, Vec3::new(40.0, 2.0, 1.0))], 1);
        let graph = SceneGraph::build(pool.as_slice());
        for i in 0..50 {
            resolve(&mut pool, &graph, &f.ctx(SceneConfiguration::Scatter, None, i as f32 * 0.016));
        }
        let p = pool.get(ParticleId(0)).unwrap();
        assert_eq!(p.tree_target(), Vec3::ONE);
        assert_eq!(p.scatter_target(), Vec3::new(40.0, 2.0, 1.0));
    }

    #[test]
    fn non_finite_results_are_skipped() {
        let f = Fixture::new();
        let mut pool = ParticlePool::from_particles(vec![particle(0, Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO)], 1);
        let graph = SceneGraph::build(pool.as_slice());
        pool.iter_mut().for_each(|p| p.live = Transform::IDENTITY);
        let skipped = resolve(&mut pool, &graph, &f.ctx(SceneConfiguration::Tree, None, 0.0));
        assert_eq!(skipped, 1);
        assert_eq!(*pool.get(ParticleId(0)).unwrap().live(), Transform::IDENTITY);
    }

    #[test]
    fn group_tracks_hand_only_in_scatter() {
        let motion = MotionConfig::default();
        let hand = PointerSample::new(Gesture::OpenHand, Vec2::new(1.0, 1.0));
        let g = update_group(GroupRotation::default(), SceneConfiguration::Scatter, &hand, &motion);
        assert!((g.pitch - 0.05).abs() < 1e-6);
        assert!((g.yaw - 0.1).abs() < 1e-6);

        let idle = update_group(GroupRotation { pitch: 1.0, yaw: 0.0 }, SceneConfiguration::Tree, &hand, &motion);
        assert!((idle.pitch - 0.95).abs() < 1e-6);
        assert!((idle.yaw - 0.001).abs() < 1e-7);
    }

    #[test]
    fn pinch_stops_hand_rotation() {
        let motion = MotionConfig::default();
        let pinch = PointerSample::new(Gesture::Pinch, Vec2::new(1.0, 1.0));
        let g = update_group(GroupRotation::default(), SceneConfiguration::Scatter, &pinch, &motion);
        assert_eq!(g.pitch, 0.0);
        assert!((g.yaw - 0.001).abs() < 1e-7);
    }
}

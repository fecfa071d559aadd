//! Procedural placement of every particle, run once per pool build.
//!
//! Tree targets follow a golden-angle spiral up a cone; scatter targets sit
//! on a spherical shell biased outward. Kinds come from one uniform draw per
//! particle split into the fixed bands of `components::kind`.

use std::f32::consts::{PI, TAU};
use glam::{EulerRot, Quat, Vec3};
use crate::api::config::{ScatterConfig, SceneConfig, TreeConfig};
use crate::api::types::ParticleId;
use crate::components::kind::{band_for, BandSlot, Glyph, Material, MeshKind, OrnamentKind};
use crate::components::particle::Particle;
use crate::core::rng::Rng;

/// Angular step between successive spiral points: π·(3 − √5).
pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Position of particle `index` of `count` on the cone.
/// `jitter_draw` is a uniform sample in [0, 1) that perturbs the radius.
pub fn tree_position(index: usize, count: usize, tree: &TreeConfig, jitter_draw: f32) -> Vec3 {
    let h = index as f32 / count as f32;
    let y = (h - 0.5) * tree.height;
    let cone_radius = tree.base_radius * (1.0 - h);
    let theta = index as f32 * golden_angle();
    let radius = cone_radius * (1.0 - tree.radius_jitter + jitter_draw * 2.0 * tree.radius_jitter);
    Vec3::new(theta.cos() * radius, y, theta.sin() * radius)
}

/// Apex ornament position, just above the tip of the cone.
pub fn apex_position(tree: &TreeConfig) -> Vec3 {
    Vec3::new(0.0, tree.height / 2.0 + tree.apex_lift, 0.0)
}

/// Point on the scatter shell from three uniform draws.
/// `u` picks the azimuth, `v` the polar angle through acos so the poles are
/// not over-sampled, and `w` the radius (squared to push samples outward).
pub fn scatter_position(u: f32, v: f32, w: f32, scatter: &ScatterConfig) -> Vec3 {
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let radius = scatter.min_radius + w * w * scatter.radius_range;
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Indices forced to photos so every reference appears at least once.
/// Evenly spaced through the spiral; strictly increasing when `photos <= count`.
pub fn guaranteed_photo_indices(photos: usize, count: usize) -> Vec<usize> {
    (0..photos.min(count))
        .map(|k| ((2 * k + 1) * count) / (2 * photos))
        .collect()
}

struct KindChoice {
    kind: OrnamentKind,
    material: Material,
    mesh: MeshKind,
    scale: f32,
}

fn resolve_slot(slot: BandSlot, index: usize, photos: usize, rng: &mut Rng) -> KindChoice {
    match slot {
        BandSlot::Photo => KindChoice {
            kind: OrnamentKind::Photo { reference: index % photos.max(1) },
            material: Material::Photo,
            mesh: MeshKind::PhotoPlane,
            scale: 1.5,
        },
        BandSlot::Star => KindChoice {
            kind: OrnamentKind::Glyph(Glyph::Star),
            material: Material::StarGlyph,
            mesh: MeshKind::GlyphPlane,
            scale: 0.8,
        },
        BandSlot::Bell => KindChoice {
            kind: OrnamentKind::Glyph(Glyph::Bell),
            material: Material::BellGlyph,
            mesh: MeshKind::GlyphPlane,
            scale: 0.7,
        },
        BandSlot::FruitGlyph => KindChoice {
            kind: OrnamentKind::Glyph(Glyph::Fruit),
            material: Material::FruitGlyph,
            mesh: MeshKind::GlyphPlane,
            scale: 0.7,
        },
        BandSlot::GoldBauble => KindChoice {
            kind: OrnamentKind::Bauble,
            material: Material::Gold,
            mesh: MeshKind::Sphere,
            scale: rng.range(0.15, 0.30),
        },
        BandSlot::Berry => KindChoice {
            kind: OrnamentKind::Berry,
            material: Material::Crimson,
            mesh: MeshKind::Sphere,
            scale: rng.range(0.12, 0.27),
        },
        BandSlot::SilverBauble => KindChoice {
            kind: OrnamentKind::Bauble,
            material: Material::Silver,
            mesh: MeshKind::Sphere,
            scale: rng.range(0.10, 0.20),
        },
    }
}

/// Build `config.particle_count` index-placed particles plus the apex ornament.
/// The apex is always last, with id `particle_count`.
pub fn generate(photo_count: usize, config: &SceneConfig, rng: &mut Rng) -> Vec<Particle> {
    let count = config.particle_count;
    let has_photos = photo_count > 0;
    let forced = guaranteed_photo_indices(photo_count, count);
    let mut particles = Vec::with_capacity(count + 1);

    for i in 0..count {
        let draw = rng.next_f32();
        let choice = match forced.binary_search(&i) {
            Ok(k) => KindChoice {
                kind: OrnamentKind::Photo { reference: k },
                material: Material::Photo,
                mesh: MeshKind::PhotoPlane,
                scale: 1.5,
            },
            Err(_) => resolve_slot(band_for(draw, has_photos), i, photo_count, rng),
        };

        let tree = tree_position(i, count, &config.tree, rng.next_f32());
        let scatter = scatter_position(rng.next_f32(), rng.next_f32(), rng.next_f32(), &config.scatter);
        let orientation = Quat::from_euler(EulerRot::XYZ, rng.next_f32() * PI, rng.next_f32() * PI, 0.0);
        let spin = Vec3::new(rng.next_f32() * 0.02, rng.next_f32() * 0.02, 0.0);

        particles.push(
            Particle::new(ParticleId(i as u32), choice.kind, choice.material, choice.mesh, tree, scatter, choice.scale)
                .with_orientation(orientation)
                .with_spin(spin),
        );
    }

    particles.push(
        Particle::new(
            ParticleId(count as u32),
            OrnamentKind::Glyph(Glyph::Star),
            Material::Apex,
            MeshKind::Octahedron,
            apex_position(&config.tree),
            config.tree.apex_scatter_position,
            config.tree.apex_scale,
        )
        .with_spin(config.tree.apex_spin),
    );

    particles
}

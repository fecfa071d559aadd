use crate::api::types::ParticleId;
use crate::components::layer::Layer;
use crate::core::graph::SceneGraph;
use crate::core::pool::ParticlePool;
use crate::core::rng::Rng;

/// Pick a focus target uniformly among photo particles.
pub fn select_focus_target(pool: &ParticlePool, rng: &mut Rng) -> Option<ParticleId> {
    let photos = pool.photo_ids();
    if photos.is_empty() {
        return None;
    }
    let pick = photos[rng.next_int(photos.len() as u32) as usize];
    log::debug!("focus target {} of {} photos", pick.0, photos.len());
    Some(pick)
}

/// Bring layer membership in line with `focus`.
///
/// Anything in the overlay that is not the focus goes back to the bloom
/// layer first, then the focus (if any) moves to the overlay, so the overlay
/// never holds more than one particle. Returns the number of particles moved.
pub fn sync_layers(pool: &mut ParticlePool, graph: &mut SceneGraph, focus: Option<ParticleId>) -> usize {
    let mut moved = 0;

    let demote: Vec<ParticleId> = graph
        .members(Layer::Overlay)
        .iter()
        .copied()
        .filter(|id| Some(*id) != focus)
        .collect();
    for id in demote {
        if let Some(particle) = pool.get_mut(id) {
            if graph.reparent(particle, Layer::Bloom) {
                moved += 1;
            }
        }
    }

    if let Some(id) = focus {
        if let Some(particle) = pool.get_mut(id) {
            if graph.reparent(particle, Layer::Overlay) {
                moved += 1;
            }
        }
    }
    moved
}

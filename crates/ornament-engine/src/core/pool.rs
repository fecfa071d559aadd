use crate::api::config::SceneConfig;
use crate::api::types::ParticleId;
use crate::components::particle::Particle;
use crate::core::distribution;
use crate::core::rng::Rng;

/// Dense particle storage. The particle with id `n` lives at index `n`.
/// Built once; nothing is added or removed until the pool is rebuilt.
pub struct ParticlePool {
    particles: Vec<Particle>,
    photos: Vec<ParticleId>,
    photo_references: usize,
}

impl ParticlePool {
    /// Run the distribution for `photo_references` photos and collect the result.
    pub fn build(photo_references: usize, config: &SceneConfig, rng: &mut Rng) -> Self {
        Self::from_particles(distribution::generate(photo_references, config, rng), photo_references)
    }

    pub fn from_particles(particles: Vec<Particle>, photo_references: usize) -> Self {
        let photos = particles.iter().filter(|p| p.is_photo()).map(|p| p.id()).collect();
        Self {
            particles,
            photos,
            photo_references,
        }
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Ids of every photo particle, in id order.
    pub fn photo_ids(&self) -> &[ParticleId] {
        &self.photos
    }

    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Number of photo references the pool was built for.
    pub fn photo_references(&self) -> usize {
        self.photo_references
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

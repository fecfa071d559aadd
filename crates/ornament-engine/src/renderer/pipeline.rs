use crate::api::config::BloomConfig;
use crate::components::layer::Layer;
use super::instance::ParticleInstance;
use super::traits::{ClearFlags, PostEffect, RenderPass};

/// Two-pass compositor state.
///
/// Pass 1 draws the bloom layer after a full clear and runs it through
/// bright-pass, bloom and tone mapping. Pass 2 clears depth only and draws
/// the overlay layer untouched, on top of pass 1's color.
pub struct RenderPipeline {
    config: BloomConfig,
    strength: f32,
    bloom_effects: [PostEffect; 3],
}

impl RenderPipeline {
    pub fn new(config: BloomConfig) -> Self {
        let strength = config.base_strength;
        let mut pipeline = Self {
            config,
            strength,
            bloom_effects: [PostEffect::ToneMap { exposure: 1.0 }; 3],
        };
        pipeline.rebuild_effects();
        pipeline
    }

    /// Ease the bloom strength toward its sinusoidal breathing target.
    pub fn breathe(&mut self, time: f32) {
        let target = self.config.base_strength
            + (time * self.config.breathing_frequency).sin() * self.config.breathing_amplitude;
        let next = self.strength + (target - self.strength) * self.config.strength_lerp;
        if next.is_finite() {
            self.strength = next;
            self.rebuild_effects();
        }
    }

    fn rebuild_effects(&mut self) {
        self.bloom_effects = [
            PostEffect::BrightPass { threshold: self.config.threshold },
            PostEffect::Bloom { strength: self.strength, radius: self.config.radius },
            PostEffect::ToneMap { exposure: self.config.exposure },
        ];
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn bloom_effects(&self) -> &[PostEffect] {
        &self.bloom_effects
    }

    /// Ordered passes for one frame.
    pub fn passes<'a>(
        &'a self,
        bloom: &'a [ParticleInstance],
        overlay: &'a [ParticleInstance],
    ) -> [RenderPass<'a>; 2] {
        [
            RenderPass {
                layer: Layer::Bloom,
                clear: ClearFlags::ALL,
                effects: &self.bloom_effects,
                instances: bloom,
            },
            RenderPass {
                layer: Layer::Overlay,
                clear: ClearFlags::DEPTH_ONLY,
                effects: &[],
                instances: overlay,
            },
        ]
    }
}

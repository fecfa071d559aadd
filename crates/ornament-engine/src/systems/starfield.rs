use crate::api::config::StarfieldConfig;
use crate::core::rng::Rng;

/// Static background points, spread uniformly through a cube centered on the
/// origin and spun slowly about Y as a whole.
pub struct StarfieldState {
    points: Vec<f32>,
    yaw_rate: f32,
    yaw: f32,
}

impl StarfieldState {
    pub fn generate(config: &StarfieldConfig, rng: &mut Rng) -> Self {
        let half = config.extent / 2.0;
        let mut points = Vec::with_capacity(config.count * 3);
        for _ in 0..config.count * 3 {
            points.push(rng.range(-half, half));
        }
        Self {
            points,
            yaw_rate: config.yaw_rate,
            yaw: 0.0,
        }
    }

    /// Yaw is a function of absolute time, not accumulated.
    pub fn advance(&mut self, time: f32) {
        let yaw = time * self.yaw_rate;
        if yaw.is_finite() {
            self.yaw = yaw;
        }
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}

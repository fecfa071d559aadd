use crate::api::types::SceneConfiguration;
use super::sample::{Gesture, PointerSample};

/// Maps the latest gesture to a desired configuration.
///
/// The controller applies the answer through `set_configuration`, so a
/// `Focus` request may still be declined when no photo exists.
pub trait ModePolicy {
    /// `transitioning` is true on the frame right after a gesture-driven
    /// change, while that transition is still settling.
    fn desired(
        &mut self,
        sample: &PointerSample,
        current: SceneConfiguration,
        transitioning: bool,
    ) -> SceneConfiguration;
}

/// Fist forces `Tree`, open hand forces `Scatter`, pinch in `Scatter`
/// requests `Focus`. Everything else keeps the current configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GesturePolicy;

impl ModePolicy for GesturePolicy {
    fn desired(
        &mut self,
        sample: &PointerSample,
        current: SceneConfiguration,
        transitioning: bool,
    ) -> SceneConfiguration {
        if !sample.present {
            return current;
        }
        match sample.gesture {
            Gesture::Fist => SceneConfiguration::Tree,
            Gesture::OpenHand => SceneConfiguration::Scatter,
            Gesture::Pinch if current == SceneConfiguration::Scatter && !transitioning => {
                SceneConfiguration::Focus
            }
            _ => current,
        }
    }
}

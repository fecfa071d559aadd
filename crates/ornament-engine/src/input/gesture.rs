//! Landmark-based gesture classification.
//!
//! Optional helper for hosts that feed raw hand landmarks (21 points in the
//! MediaPipe hand topology, normalized image coordinates) instead of an
//! already-classified gesture.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use super::sample::{Gesture, PointerSample};

pub const LANDMARK_COUNT: usize = 21;

const WRIST: usize = 0;
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
const MIDDLE_MCP: usize = 9;
const MIDDLE_TIP: usize = 12;
const RING_TIP: usize = 16;
const PINKY_TIP: usize = 20;

/// Distance thresholds in normalized image units. Tuned for a hand at
/// typical webcam distance; adjust per camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Thumb tip to index tip below this is a pinch.
    pub pinch: f32,
    /// Mean fingertip to wrist distance below this is a fist.
    pub fist: f32,
    /// Mean fingertip to wrist distance above this is an open hand.
    pub open: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            pinch: 0.05,
            fist: 0.25,
            open: 0.4,
        }
    }
}

/// Classify one hand. Pinch wins over fist and open hand; anything between
/// the fist and open thresholds is `None`.
pub fn classify(landmarks: &[Vec3], thresholds: &GestureThresholds) -> Gesture {
    if landmarks.len() < LANDMARK_COUNT {
        return Gesture::None;
    }
    if landmarks[THUMB_TIP].distance(landmarks[INDEX_TIP]) < thresholds.pinch {
        return Gesture::Pinch;
    }

    let wrist = landmarks[WRIST];
    let spread = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP]
        .iter()
        .map(|&tip| landmarks[tip].distance(wrist))
        .sum::<f32>()
        / 4.0;

    if spread < thresholds.fist {
        Gesture::Fist
    } else if spread > thresholds.open {
        Gesture::OpenHand
    } else {
        Gesture::None
    }
}

impl PointerSample {
    /// Classify landmarks and derive the pointer from the palm center
    /// (wrist and middle knuckle), mirrored horizontally for a selfie view.
    /// An empty landmark set gives an absent sample.
    pub fn from_landmarks(landmarks: &[Vec3], thresholds: &GestureThresholds) -> Self {
        if landmarks.len() < LANDMARK_COUNT {
            return PointerSample::absent();
        }
        let wrist = landmarks[WRIST];
        let middle = landmarks[MIDDLE_MCP];
        let position = Vec2::new(1.0 - (wrist.x + middle.x) / 2.0, (wrist.y + middle.y) / 2.0);
        PointerSample::new(classify(landmarks, thresholds), position)
    }
}

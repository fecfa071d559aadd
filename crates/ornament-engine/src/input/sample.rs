use glam::Vec2;

/// Discrete hand gesture delivered by the tracking subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    #[default]
    None,
    OpenHand,
    Fist,
    Pinch,
}

impl Gesture {
    /// Wire code used by the web bridge: 0 none, 1 open hand, 2 fist, 3 pinch.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Gesture::OpenHand,
            2 => Gesture::Fist,
            3 => Gesture::Pinch,
            _ => Gesture::None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Gesture::None => 0,
            Gesture::OpenHand => 1,
            Gesture::Fist => 2,
            Gesture::Pinch => 3,
        }
    }
}

/// Latest classified hand state.
/// `position` is normalized to [0, 1] on both axes, already mirrored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub gesture: Gesture,
    pub position: Vec2,
    pub present: bool,
}

impl Default for PointerSample {
    /// No hand in view, pointer at the center.
    fn default() -> Self {
        Self {
            gesture: Gesture::None,
            position: Vec2::splat(0.5),
            present: false,
        }
    }
}

impl PointerSample {
    pub fn new(gesture: Gesture, position: Vec2) -> Self {
        Self {
            gesture,
            position,
            present: true,
        }
    }

    /// Absent hand. The gesture is always `None`.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Non-finite positions fall back to the center.
    pub fn sanitized(mut self) -> Self {
        if !self.position.is_finite() {
            self.position = Vec2::splat(0.5);
        }
        if !self.present {
            self.gesture = Gesture::None;
        }
        self
    }
}

/// Everything one `tick` consumes: the latest sample and absolute time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub sample: PointerSample,
    pub time: f32,
}

impl FrameInput {
    pub fn new(sample: PointerSample, time: f32) -> Self {
        Self { sample, time }
    }

    /// No hand in view.
    pub fn idle(time: f32) -> Self {
        Self::new(PointerSample::absent(), time)
    }
}

/// Single-slot mailbox for pointer samples.
///
/// The producer overwrites at its own cadence; the frame loop reads the most
/// recent value. There is no queue: intermediate samples are dropped.
#[derive(Debug, Default)]
pub struct SampleSlot {
    latest: PointerSample,
}

impl SampleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, sample: PointerSample) {
        self.latest = sample.sanitized();
    }

    /// The most recent sample, repeated until a newer one is stored.
    pub fn latest(&self) -> PointerSample {
        self.latest
    }
}

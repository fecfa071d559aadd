/// Render layer: which subtree of the scene graph owns a particle.
///
/// Layers are drawn in order: `Bloom` first through the bloom chain, then
/// `Overlay` on top after a depth clear. At most one particle is ever in
/// `Overlay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Layer {
    /// Rotating particle group, post-processed with bloom.
    #[default]
    Bloom = 0,
    /// World-rooted layer for the focused photo, drawn crisp.
    Overlay = 1,
}

impl Layer {
    pub const COUNT: usize = 2;
    pub const ALL: [Layer; Layer::COUNT] = [Layer::Bloom, Layer::Overlay];

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Bloom),
            1 => Some(Self::Overlay),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bloom() {
        assert_eq!(Layer::default(), Layer::Bloom);
    }

    #[test]
    fn bloom_draws_before_overlay() {
        assert!(Layer::Bloom < Layer::Overlay);
        assert_eq!(Layer::ALL, [Layer::Bloom, Layer::Overlay]);
    }

    #[test]
    fn round_trip_u8() {
        for val in 0..Layer::COUNT as u8 {
            assert_eq!(Layer::from_u8(val).unwrap().as_u8(), val);
        }
        assert!(Layer::from_u8(2).is_none());
    }
}

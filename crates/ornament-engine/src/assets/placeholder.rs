use image::{Rgba, RgbaImage};

pub const PLACEHOLDER_SIZE: u32 = 64;

const FILL: Rgba<u8> = Rgba([0x2F, 0x4F, 0x4F, 0xFF]);
const GLYPH: Rgba<u8> = Rgba([0xFF, 0xD7, 0x00, 0xFF]);

/// Image bound to photos whose source failed to resolve: matte green with a
/// gold six-armed snowflake in the middle.
pub fn placeholder_image() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, FILL);
    let c = PLACEHOLDER_SIZE as f32 / 2.0;
    let arm = PLACEHOLDER_SIZE as f32 * 0.34;

    for k in 0..6 {
        let angle = k as f32 * std::f32::consts::FRAC_PI_3 + std::f32::consts::FRAC_PI_2;
        let dir = (angle.cos(), angle.sin());
        stroke(&mut img, (c, c), (c + dir.0 * arm, c + dir.1 * arm));

        // Two barbs per arm, at 60% of its length.
        let at = (c + dir.0 * arm * 0.6, c + dir.1 * arm * 0.6);
        for side in [-1.0f32, 1.0] {
            let barb = angle + side * std::f32::consts::FRAC_PI_4 * 1.2;
            let end = (at.0 + barb.cos() * arm * 0.3, at.1 + barb.sin() * arm * 0.3);
            stroke(&mut img, at, end);
        }
    }
    img
}

/// Two-pixel-wide line.
fn stroke(img: &mut RgbaImage, from: (f32, f32), to: (f32, f32)) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32 * 2;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let (x, y) = (from.0 + dx * t, from.1 + dy * t);
        for (ox, oy) in [(0.0, 0.0), (0.5, 0.0), (0.0, 0.5), (-0.5, 0.0), (0.0, -0.5)] {
            let (px, py) = ((x + ox).round(), (y + oy).round());
            if px >= 0.0 && py >= 0.0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, GLYPH);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_filled_with_centered_glyph() {
        let img = placeholder_image();
        assert_eq!(img.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        assert_eq!(*img.get_pixel(0, 0), FILL);
        assert_eq!(*img.get_pixel(63, 63), FILL);
        assert_eq!(*img.get_pixel(32, 32), GLYPH);
    }

    #[test]
    fn glyph_covers_a_small_share_of_the_image() {
        let img = placeholder_image();
        let gold = img.pixels().filter(|p| **p == GLYPH).count();
        assert!(gold > 100, "glyph has {} pixels", gold);
        assert!(gold < (PLACEHOLDER_SIZE * PLACEHOLDER_SIZE / 4) as usize);
    }
}

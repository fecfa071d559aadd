//! Particle kinds, their probability bands, and the material/mesh each maps to.

/// Decorative glyph drawn on a camera-agnostic plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Star,
    Bell,
    Fruit,
}

/// What a particle is. Only `Photo` can be focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrnamentKind {
    /// Sphere variant A: metallic bauble (gold or silver finish).
    Bauble,
    /// Sphere variant B: crimson bauble.
    Berry,
    Glyph(Glyph),
    /// Photo card showing `photos[reference]`.
    Photo { reference: usize },
}

impl OrnamentKind {
    pub fn is_photo(&self) -> bool {
        matches!(self, OrnamentKind::Photo { .. })
    }

    pub fn photo_reference(&self) -> Option<usize> {
        match self {
            OrnamentKind::Photo { reference } => Some(*reference),
            _ => None,
        }
    }
}

/// Surface description a renderer looks up by `Material::id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    /// Photos keep their original colors.
    pub tone_mapped: bool,
    /// Sampled texture: glyph atlas cell, or the photo slot of the instance.
    pub textured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Material {
    Gold = 0,
    Silver = 1,
    Crimson = 2,
    StarGlyph = 3,
    BellGlyph = 4,
    FruitGlyph = 5,
    Photo = 6,
    Apex = 7,
}

pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0];
pub const CRIMSON: [f32; 3] = [0.863, 0.078, 0.235];

impl Material {
    pub const COUNT: usize = 8;
    pub const ALL: [Material; Material::COUNT] = [
        Material::Gold,
        Material::Silver,
        Material::Crimson,
        Material::StarGlyph,
        Material::BellGlyph,
        Material::FruitGlyph,
        Material::Photo,
        Material::Apex,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn desc(self) -> MaterialDesc {
        let glyph = |emissive: [f32; 3]| MaterialDesc {
            color: [1.0, 1.0, 1.0],
            metalness: 0.2,
            roughness: 0.5,
            emissive,
            emissive_intensity: 1.0,
            tone_mapped: true,
            textured: true,
        };
        match self {
            Material::Gold => MaterialDesc {
                color: GOLD,
                metalness: 0.8,
                roughness: 0.3,
                emissive: GOLD,
                emissive_intensity: 0.2,
                tone_mapped: true,
                textured: false,
            },
            Material::Silver => MaterialDesc {
                color: [1.0, 1.0, 1.0],
                metalness: 0.9,
                roughness: 0.1,
                emissive: [0.0, 0.0, 0.0],
                emissive_intensity: 0.0,
                tone_mapped: true,
                textured: false,
            },
            Material::Crimson => MaterialDesc {
                color: CRIMSON,
                metalness: 0.4,
                roughness: 0.2,
                emissive: [0.2, 0.0, 0.0],
                emissive_intensity: 1.0,
                tone_mapped: true,
                textured: false,
            },
            Material::StarGlyph => glyph([0.133, 0.133, 0.0]),
            Material::BellGlyph => glyph([0.0, 0.0, 0.0]),
            Material::FruitGlyph => glyph([0.0, 0.0, 0.0]),
            Material::Photo => MaterialDesc {
                color: [1.0, 1.0, 1.0],
                metalness: 0.0,
                roughness: 1.0,
                emissive: [0.0, 0.0, 0.0],
                emissive_intensity: 0.0,
                tone_mapped: false,
                textured: true,
            },
            Material::Apex => MaterialDesc {
                color: [1.0, 0.867, 0.667],
                metalness: 0.0,
                roughness: 1.0,
                emissive: [1.0, 0.667, 0.0],
                emissive_intensity: 5.0,
                tone_mapped: true,
                textured: false,
            },
        }
    }
}

/// Shared geometry a particle is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MeshKind {
    /// Unit sphere, 8×8 segments.
    Sphere = 0,
    /// 1×1 plane for glyphs.
    GlyphPlane = 1,
    /// 1.2×1.6 plane for photo cards.
    PhotoPlane = 2,
    /// Octahedron of radius 1.5 for the apex ornament.
    Octahedron = 3,
}

impl MeshKind {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// One slice of the unit interval that maps to a kind.
/// A draw `r` falls in the band when `lower <= r < upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f32,
    pub upper: f32,
    pub slot: BandSlot,
}

impl Band {
    pub fn width(&self) -> f32 {
        self.upper - self.lower
    }
}

/// Band payload before photo references and random scales are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandSlot {
    Photo,
    Star,
    Bell,
    FruitGlyph,
    GoldBauble,
    Berry,
    SilverBauble,
}

const BANDS_WITH_PHOTOS: [Band; 7] = [
    Band { lower: 0.99, upper: 1.0, slot: BandSlot::Photo },
    Band { lower: 0.96, upper: 0.99, slot: BandSlot::Star },
    Band { lower: 0.93, upper: 0.96, slot: BandSlot::Bell },
    Band { lower: 0.90, upper: 0.93, slot: BandSlot::FruitGlyph },
    Band { lower: 0.60, upper: 0.90, slot: BandSlot::GoldBauble },
    Band { lower: 0.40, upper: 0.60, slot: BandSlot::Berry },
    Band { lower: 0.0, upper: 0.40, slot: BandSlot::SilverBauble },
];

// Without photos the star band absorbs the photo band.
const BANDS_WITHOUT_PHOTOS: [Band; 6] = [
    Band { lower: 0.96, upper: 1.0, slot: BandSlot::Star },
    Band { lower: 0.93, upper: 0.96, slot: BandSlot::Bell },
    Band { lower: 0.90, upper: 0.93, slot: BandSlot::FruitGlyph },
    Band { lower: 0.60, upper: 0.90, slot: BandSlot::GoldBauble },
    Band { lower: 0.40, upper: 0.60, slot: BandSlot::Berry },
    Band { lower: 0.0, upper: 0.40, slot: BandSlot::SilverBauble },
];

/// The fixed band table, depending only on whether photos exist.
pub fn kind_bands(has_photos: bool) -> &'static [Band] {
    if has_photos {
        &BANDS_WITH_PHOTOS
    } else {
        &BANDS_WITHOUT_PHOTOS
    }
}

/// Map a uniform draw in [0, 1) to its band. Draws at or above 1.0 land in
/// the top band.
pub fn band_for(draw: f32, has_photos: bool) -> BandSlot {
    let bands = kind_bands(has_photos);
    bands
        .iter()
        .find(|b| draw >= b.lower && draw < b.upper)
        .unwrap_or(&bands[0])
        .slot
}

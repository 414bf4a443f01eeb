//=========================================================================
// Appearance
//=========================================================================
//
// Six cosmetic fields, each an index into a fixed three-option list, and
// the mapping from those indices to layered portrait part names.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== AppearanceField =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppearanceField {
    Gender,
    HairType,
    HairColor,
    SkinTone,
    FaceType,
    BodyType,
}

impl AppearanceField {
    pub const ALL: [AppearanceField; 6] = [
        Self::Gender,
        Self::HairType,
        Self::HairColor,
        Self::SkinTone,
        Self::FaceType,
        Self::BodyType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::HairType => "Hair Style",
            Self::HairColor => "Hair Color",
            Self::SkinTone => "Skin Tone",
            Self::FaceType => "Face Type",
            Self::BodyType => "Body Type",
        }
    }

    pub fn options(self) -> &'static [&'static str; 3] {
        match self {
            Self::Gender => &["Male", "Female", "Other"],
            Self::HairType => &["Short", "Long", "Curly"],
            Self::HairColor => &["Black", "Brown", "Blonde"],
            Self::SkinTone => &["Light", "Medium", "Dark"],
            Self::FaceType => &["Round", "Oval", "Square"],
            Self::BodyType => &["Slim", "Athletic", "Heavy"],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

//=== Portrait Parts ======================================================

/// Base layer names, indexed by `gender * 3 + skin_tone`.
pub const BASE_PARTS: [&str; 9] = [
    "male_light",
    "male_medium",
    "male_dark",
    "female_light",
    "female_medium",
    "female_dark",
    "other_light",
    "other_medium",
    "other_dark",
];

/// Hair layer names, indexed by `hair_type * 3 + hair_color`.
pub const HAIR_PARTS: [&str; 9] = [
    "short_black",
    "short_brown",
    "short_blonde",
    "long_black",
    "long_brown",
    "long_blonde",
    "curly_black",
    "curly_brown",
    "curly_blonde",
];

pub const FACE_PARTS: [&str; 3] = ["round", "oval", "square"];

/// Only one eye layer is selectable for now.
pub const EYE_PART: &str = "blue";

//=== Appearance ==========================================================

/// Current index of every appearance field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Appearance {
    indices: [usize; 6],
}

impl Appearance {
    pub fn get(&self, field: AppearanceField) -> usize {
        self.indices[field.slot()]
    }

    /// Display value of `field`.
    pub fn option(&self, field: AppearanceField) -> &'static str {
        field.options()[self.get(field)]
    }

    /// Sets `field`, wrapping out-of-range indices.
    pub fn set(&mut self, field: AppearanceField, index: usize) {
        self.indices[field.slot()] = index % field.options().len();
    }

    pub fn next(&mut self, field: AppearanceField) {
        self.set(field, self.get(field) + 1);
    }

    pub fn prev(&mut self, field: AppearanceField) {
        let len = field.options().len();
        self.set(field, self.get(field) + len - 1);
    }

    /// Picks every field uniformly from its options.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for field in AppearanceField::ALL {
            let index = rng.random_range(0..field.options().len());
            self.set(field, index);
        }
    }

    //--- Portrait Layers --------------------------------------------------

    pub fn base_part(&self) -> &'static str {
        BASE_PARTS[self.get(AppearanceField::Gender) * 3 + self.get(AppearanceField::SkinTone)]
    }

    pub fn hair_part(&self) -> &'static str {
        HAIR_PARTS[self.get(AppearanceField::HairType) * 3 + self.get(AppearanceField::HairColor)]
    }

    pub fn face_part(&self) -> &'static str {
        FACE_PARTS[self.get(AppearanceField::FaceType)]
    }

    /// Layer folders and part names in draw order: base, face, eyes, hair.
    pub fn layers(&self) -> [(&'static str, &'static str); 4] {
        [
            ("base", self.base_part()),
            ("face", self.face_part()),
            ("eyes", EYE_PART),
            ("hair", self.hair_part()),
        ]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn default_is_first_option_everywhere() {
        let appearance = Appearance::default();
        assert_eq!(appearance.option(AppearanceField::Gender), "Male");
        assert_eq!(appearance.option(AppearanceField::BodyType), "Slim");
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut appearance = Appearance::default();

        appearance.prev(AppearanceField::HairColor);
        assert_eq!(appearance.option(AppearanceField::HairColor), "Blonde");

        appearance.next(AppearanceField::HairColor);
        assert_eq!(appearance.get(AppearanceField::HairColor), 0);

        for _ in 0..4 {
            appearance.next(AppearanceField::FaceType);
        }
        assert_eq!(appearance.option(AppearanceField::FaceType), "Oval");
    }

    #[test]
    fn fields_are_independent() {
        let mut appearance = Appearance::default();
        appearance.next(AppearanceField::SkinTone);

        for field in AppearanceField::ALL {
            let expected = if field == AppearanceField::SkinTone { 1 } else { 0 };
            assert_eq!(appearance.get(field), expected, "{:?}", field);
        }
    }

    #[test]
    fn randomize_is_seeded_and_in_range() {
        let mut a = Appearance::default();
        let mut b = Appearance::default();
        a.randomize(&mut ChaCha8Rng::seed_from_u64(99));
        b.randomize(&mut ChaCha8Rng::seed_from_u64(99));

        assert_eq!(a, b);
        for field in AppearanceField::ALL {
            assert!(a.get(field) < 3);
        }
    }

    #[test]
    fn part_indices_combine_fields() {
        let mut appearance = Appearance::default();
        appearance.set(AppearanceField::Gender, 1);
        appearance.set(AppearanceField::SkinTone, 2);
        appearance.set(AppearanceField::HairType, 2);
        appearance.set(AppearanceField::HairColor, 0);
        appearance.set(AppearanceField::FaceType, 1);

        assert_eq!(
            appearance.layers(),
            [("base", "female_dark"), ("face", "oval"), ("eyes", "blue"), ("hair", "curly_black")]
        );
    }
}

use crate::atlas::ATLAS_UNIT;

/// A sub-rectangle of the atlas sheet, in atlas-unit coordinates.
/// Built once per transform from the grid and a tile address, then consumed
/// by the UV-remap step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Submap {
    width: f32,
    height: f32,
    origin_u: f32,
    origin_v: f32,
}

impl Submap {
    pub const fn new(width: f32, height: f32, origin_u: f32, origin_v: f32) -> Submap {
        Submap {
            width,
            height,
            origin_u,
            origin_v,
        }
    }

    /// The whole sheet as one region.
    pub const fn full_unit() -> Submap {
        Submap::new(ATLAS_UNIT, ATLAS_UNIT, 0.0, 0.0)
    }

    pub const fn width(self) -> f32 {
        self.width
    }

    pub const fn height(self) -> f32 {
        self.height
    }

    pub const fn origin_u(self) -> f32 {
        self.origin_u
    }

    pub const fn origin_v(self) -> f32 {
        self.origin_v
    }

    /// The same rectangle expressed as fractions of the sheet.
    pub fn normalized(self) -> Submap {
        Submap::new(
            self.width / ATLAS_UNIT,
            self.height / ATLAS_UNIT,
            self.origin_u / ATLAS_UNIT,
            self.origin_v / ATLAS_UNIT,
        )
    }
}

use bevy::prelude::Vec2;
use serde::Deserialize;

/// UV window of a stitched sprite within the renderer's atlas texture.
/// The mapper only interpolates inside this window; loading and stitching
/// the texture itself is the host's concern.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SpriteWindow {
    pub min_u: f32,
    pub min_v: f32,
    pub max_u: f32,
    pub max_v: f32,
}

impl SpriteWindow {
    /// Window spanning the full texture.
    pub const FULL: SpriteWindow = SpriteWindow {
        min_u: 0.0,
        min_v: 0.0,
        max_u: 1.0,
        max_v: 1.0,
    };

    pub fn new(min_u: f32, min_v: f32, max_u: f32, max_v: f32) -> SpriteWindow {
        SpriteWindow {
            min_u,
            min_v,
            max_u,
            max_v,
        }
    }

    pub fn size(self) -> Vec2 {
        Vec2::new(self.max_u - self.min_u, self.max_v - self.min_v)
    }

    /// Map a window-relative point (0..1 on both axes) into texture UVs.
    pub fn lerp(self, point: Vec2) -> Vec2 {
        Vec2::new(self.min_u, self.min_v) + point * self.size()
    }

    /// Express a texture UV as a window-relative point.
    pub fn unlerp(self, uv: Vec2) -> Vec2 {
        (uv - Vec2::new(self.min_u, self.min_v)) / self.size()
    }
}

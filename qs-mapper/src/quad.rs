use bevy::prelude::{Vec2, Vec3};
use qs_utils::{BlockPos, Face};

use crate::sprite::SpriteWindow;
use crate::submap::Submap;

/// Sub-quads smaller than this are treated as geometrically absent.
const DEGENERATE_AREA: f32 = 1e-7;

/// Renderer-facing primitive: four corners with baked vertex data for one
/// block face. Corner order follows the parametric convention
/// (0,0), (1,0), (1,1), (0,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BakedQuad {
    pub positions: [[f32; 3]; 4],
    pub normals: [[f32; 3]; 4],
    pub uvs: [[f32; 2]; 4],
    pub face: Face,
    pub fullbright: bool,
}

impl BakedQuad {
    /// Build the full face quad of the unit block at `pos`, with UVs
    /// spanning the sprite window.
    pub fn unit_face(face: Face, pos: BlockPos) -> BakedQuad {
        let corners = face_corners(face);
        let origin = pos.min_corner();
        let normal = face.normal().to_array();

        let mut positions = [[0.0; 3]; 4];
        for (slot, corner) in positions.iter_mut().zip(corners) {
            *slot = (origin + corner).to_array();
        }

        BakedQuad {
            positions,
            normals: [normal; 4],
            uvs: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            face,
            fullbright: false,
        }
    }
}

/// Working representation used while remapping. Created per transform call
/// and discarded once rebaked.
#[derive(Clone, Copy, Debug)]
pub struct Quad {
    positions: [Vec3; 4],
    uvs: [Vec2; 4],
    normal: Vec3,
    face: Face,
    fullbright: bool,
}

impl Quad {
    pub fn from_baked(baked: &BakedQuad) -> Quad {
        Quad {
            positions: baked.positions.map(Vec3::from_array),
            uvs: baked.uvs.map(Vec2::from_array),
            normal: Vec3::from_array(baked.normals[0]),
            face: baked.face,
            fullbright: baked.fullbright,
        }
    }

    pub fn with_fullbright(mut self, fullbright: bool) -> Quad {
        self.fullbright = fullbright;
        self
    }

    pub fn face(&self) -> Face {
        self.face
    }

    /// Split into four sub-quads, one per parametric quadrant of the
    /// original, in quadrant order. A slot is `None` when the sub-quad
    /// collapses to zero area.
    pub fn subdivide(&self) -> [Option<Quad>; 4] {
        const QUADRANTS: [(f32, f32); 4] = [(0.0, 0.0), (0.5, 0.0), (0.5, 0.5), (0.0, 0.5)];
        QUADRANTS.map(|(s0, t0)| self.sub_quad(s0, t0, s0 + 0.5, t0 + 0.5))
    }

    /// Remap UVs into the given submap of the given sprite window.
    pub fn transform_uvs(mut self, sprite: &SpriteWindow, submap: &Submap) -> Quad {
        let region = submap.normalized();
        for uv in &mut self.uvs {
            let rel = sprite.unlerp(*uv);
            let mapped = Vec2::new(
                region.origin_u() + rel.x * region.width(),
                region.origin_v() + rel.y * region.height(),
            );
            *uv = sprite.lerp(mapped);
        }
        self
    }

    pub fn rebake(&self) -> BakedQuad {
        BakedQuad {
            positions: self.positions.map(|p| p.to_array()),
            normals: [self.normal.to_array(); 4],
            uvs: self.uvs.map(|uv| uv.to_array()),
            face: self.face,
            fullbright: self.fullbright,
        }
    }

    fn sub_quad(&self, s0: f32, t0: f32, s1: f32, t1: f32) -> Option<Quad> {
        let params = [(s0, t0), (s1, t0), (s1, t1), (s0, t1)];
        let positions = params.map(|(s, t)| bilinear_vec3(&self.positions, s, t));
        let uvs = params.map(|(s, t)| bilinear_vec2(&self.uvs, s, t));

        if quad_area(&positions) < DEGENERATE_AREA {
            return None;
        }
        Some(Quad {
            positions,
            uvs,
            normal: self.normal,
            face: self.face,
            fullbright: self.fullbright,
        })
    }
}

fn bilinear_vec3(corners: &[Vec3; 4], s: f32, t: f32) -> Vec3 {
    let bottom = corners[0].lerp(corners[1], s);
    let top = corners[3].lerp(corners[2], s);
    bottom.lerp(top, t)
}

fn bilinear_vec2(corners: &[Vec2; 4], s: f32, t: f32) -> Vec2 {
    let bottom = corners[0].lerp(corners[1], s);
    let top = corners[3].lerp(corners[2], s);
    bottom.lerp(top, t)
}

fn quad_area(positions: &[Vec3; 4]) -> f32 {
    let a = positions[1] - positions[0];
    let b = positions[2] - positions[0];
    let c = positions[3] - positions[0];
    0.5 * (a.cross(b).length() + b.cross(c).length())
}

fn face_corners(face: Face) -> [Vec3; 4] {
    let corners = match face {
        Face::PosX => [[1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
        Face::NegX => [[0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 1.0]],
        Face::PosY => [[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
        Face::NegY => [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        Face::PosZ => [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
        Face::NegZ => [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    };
    corners.map(Vec3::from_array)
}

use std::hash::{DefaultHasher, Hash, Hasher};

use qs_utils::{BlockPos, Face, TileCoords};

use crate::atlas::AtlasGrid;

/// Positional context handed to a transform. Which variant a mapper
/// produces depends on its kind; all variants are deterministic functions
/// of position, face, and grid.
#[derive(Clone, Copy, Debug)]
pub enum MapContext {
    /// Position-and-face-keyed pseudo-random tile. Coordinates are 1-based
    /// to match the far-corner anchor rule.
    GridRandom { pos: BlockPos, grid: AtlasGrid },
    /// World position wrapped onto the grid along the face's in-plane axes.
    /// Coordinates are 0-based to match the near-corner anchor rule.
    GridPatterned { pos: BlockPos, grid: AtlasGrid },
    /// Plain positional passthrough for downstream consumers; supplies no
    /// tile coordinates.
    Position { pos: BlockPos },
}

impl MapContext {
    pub fn pos(&self) -> BlockPos {
        match *self {
            MapContext::GridRandom { pos, .. } => pos,
            MapContext::GridPatterned { pos, .. } => pos,
            MapContext::Position { pos } => pos,
        }
    }

    pub fn tile_coords(&self, face: Face) -> Option<TileCoords> {
        match *self {
            MapContext::GridRandom { pos, grid } => Some(random_tile(pos, face, grid)),
            MapContext::GridPatterned { pos, grid } => Some(patterned_tile(pos, face, grid)),
            MapContext::Position { .. } => None,
        }
    }
}

fn random_tile(pos: BlockPos, face: Face, grid: AtlasGrid) -> TileCoords {
    let mut hasher = DefaultHasher::new();
    (pos, face.index()).hash(&mut hasher);
    let bits = hasher.finish();
    let col = 1 + (bits as u32) % grid.columns();
    let row = 1 + ((bits >> 32) as u32) % grid.rows();
    TileCoords::new(col, row)
}

fn patterned_tile(pos: BlockPos, face: Face, grid: AtlasGrid) -> TileCoords {
    // Pattern rows advance downward in image space, so world Y is negated
    // on the vertical faces.
    let (u, v) = match face {
        Face::PosY | Face::NegY => (pos.x, pos.z),
        Face::PosZ | Face::NegZ => (pos.x, -pos.y),
        Face::PosX | Face::NegX => (pos.z, -pos.y),
    };
    let col = u.rem_euclid(grid.columns() as i32) as u32;
    let row = v.rem_euclid(grid.rows() as i32) as u32;
    TileCoords::new(col, row)
}

use std::ops;

use bevy::prelude::Vec3;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::NegX => 1,
            Self::PosY => 2,
            Self::NegY => 3,
            Self::PosZ => 4,
            Self::NegZ => 5,
        }
    }

    pub fn from_string(val: &str) -> Option<Face> {
        match val {
            "east" => Some(Face::PosX),
            "west" => Some(Face::NegX),
            "up" => Some(Face::PosY),
            "down" => Some(Face::NegY),
            "south" => Some(Face::PosZ),
            "north" => Some(Face::NegZ),
            _ => None,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::PosX => (1, 0, 0),
            Self::NegX => (-1, 0, 0),
            Self::PosY => (0, 1, 0),
            Self::NegY => (0, -1, 0),
            Self::PosZ => (0, 0, 1),
            Self::NegZ => (0, 0, -1),
        }
    }

    pub fn normal(self) -> Vec3 {
        let (x, y, z) = self.offset();
        Vec3::new(x as f32, y as f32, z as f32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> BlockPos {
        BlockPos { x, y, z }
    }

    pub fn shift(self, face: Face) -> BlockPos {
        let (ox, oy, oz) = face.offset();
        self + (ox, oy, oz)
    }

    pub fn min_corner(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl ops::Add<BlockPos> for BlockPos {
    type Output = BlockPos;

    fn add(self, o: BlockPos) -> BlockPos {
        BlockPos {
            x: self.x + o.x,
            y: self.y + o.y,
            z: self.z + o.z,
        }
    }
}

impl ops::Add<(i32, i32, i32)> for BlockPos {
    type Output = BlockPos;

    fn add(self, (ox, oy, oz): (i32, i32, i32)) -> BlockPos {
        BlockPos {
            x: self.x + ox,
            y: self.y + oy,
            z: self.z + oz,
        }
    }
}

/// A tile address within an atlas grid. Whether coordinates are 0- or
/// 1-based depends on the consumer's anchor convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCoords {
    pub col: u32,
    pub row: u32,
}

impl TileCoords {
    pub const fn new(col: u32, row: u32) -> TileCoords {
        TileCoords { col, row }
    }
}

mod atlas;
mod bake;
mod batch;
mod context;
mod error;
mod map;
mod quad;
mod sprite;
mod submap;

#[cfg(test)]
mod tests;

pub use atlas::{ATLAS_UNIT, AtlasGrid, DEFAULT_GRID_SIZE};
pub use bake::{MeshData, append_quad, apply_mesh_data, bake_quads, build_mesh_from_data};
pub use batch::{BatchResources, TransformJob, TransformResult};
pub use context::MapContext;
pub use error::MapperError;
pub use map::{MapKind, PATTERNED_FALLBACK_TILE, RANDOM_FALLBACK_TILE, TileMapper};
pub use quad::{BakedQuad, Quad};
pub use sprite::SpriteWindow;
pub use submap::Submap;

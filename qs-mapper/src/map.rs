use qs_utils::{BlockPos, Face, TileCoords};
use serde_json::Value;
use tracing::debug;

use crate::atlas::AtlasGrid;
use crate::context::MapContext;
use crate::error::MapperError;
use crate::quad::{BakedQuad, Quad};
use crate::sprite::SpriteWindow;
use crate::submap::Submap;

/// Tiling strategy: how a quad's atlas tile is chosen.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum MapKind {
    Random,
    Patterned,
    Positional,
}

/// Tile used by a random mapper when no context is supplied. 1-based, per
/// the far-corner anchor rule.
pub const RANDOM_FALLBACK_TILE: TileCoords = TileCoords::new(1, 1);

/// Tile used by a patterned mapper when no context is supplied. 0-based,
/// per the near-corner anchor rule.
pub const PATTERNED_FALLBACK_TILE: TileCoords = TileCoords::new(0, 0);

impl MapKind {
    pub fn from_string(val: &str) -> Option<MapKind> {
        match val {
            "random" => Some(MapKind::Random),
            "patterned" => Some(MapKind::Patterned),
            "positional" => Some(MapKind::Positional),
            _ => None,
        }
    }
}

/// Selects an atlas sub-region for each incoming quad and re-bakes the
/// remapped (optionally subdivided) geometry. Stateless per call; safe to
/// share across threads once built.
#[derive(Clone, Copy, Debug)]
pub struct TileMapper {
    grid: AtlasGrid,
    kind: MapKind,
    fullbright: bool,
}

impl TileMapper {
    pub fn new(kind: MapKind, grid: AtlasGrid, fullbright: bool) -> TileMapper {
        TileMapper {
            grid,
            kind,
            fullbright,
        }
    }

    /// Build a mapper from an optional texture-info object. Malformed or
    /// non-positive dimensions fail here, before any transform runs.
    pub fn from_config(
        kind: MapKind,
        info: Option<&Value>,
        fullbright: bool,
    ) -> Result<TileMapper, MapperError> {
        let grid = AtlasGrid::from_config(info)?;
        debug!(
            "tile mapper: {:?} over {}x{} grid",
            kind,
            grid.columns(),
            grid.rows()
        );
        Ok(TileMapper::new(kind, grid, fullbright))
    }

    pub fn grid(&self) -> AtlasGrid {
        self.grid
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn fullbright(&self) -> bool {
        self.fullbright
    }

    /// The context this mapper expects for a block at `pos`.
    pub fn context_for(&self, pos: BlockPos) -> MapContext {
        match self.kind {
            MapKind::Random => MapContext::GridRandom {
                pos,
                grid: self.grid,
            },
            MapKind::Patterned => MapContext::GridPatterned {
                pos,
                grid: self.grid,
            },
            MapKind::Positional => MapContext::Position { pos },
        }
    }

    /// Resolve the atlas sub-region for a quad facing `face` under the
    /// given context (or the strategy fallback when absent).
    pub fn submap_for(&self, face: Face, context: Option<&MapContext>) -> Submap {
        let interval_u = self.grid.interval_u();
        let interval_v = self.grid.interval_v();
        match self.kind {
            MapKind::Random => {
                let coords = self
                    .context_coords(face, context)
                    .unwrap_or(RANDOM_FALLBACK_TILE);
                let max_u = coords.col as f32 * interval_u;
                let max_v = coords.row as f32 * interval_v;
                Submap::new(interval_u, interval_v, max_u - interval_u, max_v - interval_v)
            }
            MapKind::Patterned => {
                let coords = self
                    .context_coords(face, context)
                    .unwrap_or(PATTERNED_FALLBACK_TILE);
                Submap::new(
                    interval_u,
                    interval_v,
                    coords.col as f32 * interval_u,
                    coords.row as f32 * interval_v,
                )
            }
            // A positional mapper does not take part in tile selection;
            // downstream consumers key off the context instead.
            MapKind::Positional => Submap::full_unit(),
        }
    }

    /// Remap one baked quad into its atlas sub-region.
    ///
    /// `quad_goal` must be 1 (keep the quad whole) or 4 (split it into
    /// four finer draws of the same tile). With a goal of 4, sub-quads
    /// that collapse to nothing are dropped from the output, in order.
    pub fn transform(
        &self,
        quad: &BakedQuad,
        sprite: &SpriteWindow,
        context: Option<&MapContext>,
        quad_goal: u32,
    ) -> Result<Vec<BakedQuad>, MapperError> {
        if quad_goal != 1 && quad_goal != 4 {
            return Err(MapperError::UnsupportedQuadGoal(quad_goal));
        }

        let submap = self.submap_for(quad.face, context);
        let working = Quad::from_baked(quad).with_fullbright(self.fullbright);

        if quad_goal != 4 {
            return Ok(vec![working.transform_uvs(sprite, &submap).rebake()]);
        }

        let mut out = Vec::with_capacity(4);
        for sub in working.subdivide() {
            // Absent sub-quads are filtered here, never emitted as
            // placeholder geometry.
            let Some(sub) = sub else {
                continue;
            };
            out.push(sub.transform_uvs(sprite, &submap).rebake());
        }
        Ok(out)
    }

    fn context_coords(&self, face: Face, context: Option<&MapContext>) -> Option<TileCoords> {
        context.and_then(|ctx| ctx.tile_coords(face))
    }
}

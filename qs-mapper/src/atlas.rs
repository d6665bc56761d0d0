use serde_json::Value;

use crate::error::MapperError;

/// Reference size of one full atlas tile in source texture coordinates.
pub const ATLAS_UNIT: f32 = 16.0;

pub const DEFAULT_GRID_SIZE: u32 = 2;

/// Grid dimensions of a tiled atlas texture. Immutable once built; shared
/// by reference across any number of concurrent transforms.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct AtlasGrid {
    columns: u32,
    rows: u32,
}

impl AtlasGrid {
    pub fn new(columns: u32, rows: u32) -> Result<AtlasGrid, MapperError> {
        if columns == 0 || rows == 0 {
            return Err(MapperError::InvalidAtlasConfig {
                reason: format!("cannot have a dimension of 0 (got {columns}x{rows})"),
            });
        }
        Ok(AtlasGrid { columns, rows })
    }

    /// Resolve grid dimensions from an optional texture-info object.
    ///
    /// Accepted shapes: a `width` + `height` pair, or a single `size`
    /// applied to both axes. Anything else present-but-malformed fails;
    /// absence of both shapes falls back to the 2x2 default.
    pub fn from_config(info: Option<&Value>) -> Result<AtlasGrid, MapperError> {
        let Some(value) = info else {
            return AtlasGrid::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE);
        };
        let Some(object) = value.as_object() else {
            return Err(MapperError::InvalidAtlasConfig {
                reason: "texture info must be an object".to_string(),
            });
        };

        if let (Some(width), Some(height)) = (object.get("width"), object.get("height")) {
            let columns = numeric_field("width", width)?;
            let rows = numeric_field("height", height)?;
            AtlasGrid::new(columns, rows)
        } else if let Some(size) = object.get("size") {
            let size = numeric_field("size", size)?;
            AtlasGrid::new(size, size)
        } else {
            AtlasGrid::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
        }
    }

    pub const fn columns(self) -> u32 {
        self.columns
    }

    pub const fn rows(self) -> u32 {
        self.rows
    }

    /// Extent of one tile along U, in atlas-unit coordinates.
    pub fn interval_u(self) -> f32 {
        ATLAS_UNIT / self.columns as f32
    }

    /// Extent of one tile along V, in atlas-unit coordinates.
    pub fn interval_v(self) -> f32 {
        ATLAS_UNIT / self.rows as f32
    }
}

fn numeric_field(key: &str, value: &Value) -> Result<u32, MapperError> {
    let Some(number) = value.as_f64() else {
        return Err(MapperError::InvalidAtlasConfig {
            reason: format!("{key} must be a number"),
        });
    };
    let truncated = number as i64;
    if truncated <= 0 {
        return Err(MapperError::InvalidAtlasConfig {
            reason: format!("{key} must be positive, got {number}"),
        });
    }
    Ok(truncated as u32)
}

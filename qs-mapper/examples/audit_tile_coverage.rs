use std::collections::HashMap;

use qs_mapper::{ATLAS_UNIT, MapKind, TileMapper};
use qs_utils::{BlockPos, Face};
use serde_json::json;

const SLAB_SIZE: i32 = 16;
const SLAB_Y: i32 = 64;

fn main() {
    let info = json!({"width": 4, "height": 4});

    for kind in [MapKind::Random, MapKind::Patterned] {
        let mapper = TileMapper::from_config(kind, Some(&info), false)
            .expect("static audit config is valid");
        let grid = mapper.grid();

        let mut hits: HashMap<(u32, u32), u32> = HashMap::new();
        let mut out_of_sheet = 0u32;

        for z in 0..SLAB_SIZE {
            for x in 0..SLAB_SIZE {
                let pos = BlockPos::new(x, SLAB_Y, z);
                let ctx = mapper.context_for(pos);
                let submap = mapper.submap_for(Face::PosY, Some(&ctx));

                if submap.origin_u() < 0.0
                    || submap.origin_v() < 0.0
                    || submap.origin_u() + submap.width() > ATLAS_UNIT
                    || submap.origin_v() + submap.height() > ATLAS_UNIT
                {
                    out_of_sheet += 1;
                    continue;
                }

                let col = (submap.origin_u() / grid.interval_u()) as u32;
                let row = (submap.origin_v() / grid.interval_v()) as u32;
                *hits.entry((col, row)).or_insert(0) += 1;
            }
        }

        println!(
            "{:?} coverage over a {}x{} slab ({}x{} grid):",
            kind,
            SLAB_SIZE,
            SLAB_SIZE,
            grid.columns(),
            grid.rows()
        );
        for row in 0..grid.rows() {
            let counts: Vec<String> = (0..grid.columns())
                .map(|col| format!("{:>4}", hits.get(&(col, row)).copied().unwrap_or(0)))
                .collect();
            println!("  row {row}: {}", counts.join(" "));
        }

        let never_hit: Vec<(u32, u32)> = (0..grid.rows())
            .flat_map(|row| (0..grid.columns()).map(move |col| (col, row)))
            .filter(|key| !hits.contains_key(key))
            .collect();
        println!("  tiles never selected: {never_hit:?}");
        println!("  regions outside the sheet: {out_of_sheet}");
        println!();
    }
}

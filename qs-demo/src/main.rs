use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use qs_mapper::{
    BakedQuad, BatchResources, MapKind, SpriteWindow, TileMapper, TransformJob, bake_quads,
    build_mesh_from_data,
};
use qs_utils::{BlockPos, Face};
use serde::Deserialize;
use tracing::info;

const DEFAULT_SCENE: &str = include_str!("default_scene.json");

#[derive(Parser)]
#[command(about = "Remap block-face quads onto a tiled atlas texture")]
struct Args {
    /// Scene description file; the built-in sample is used when absent.
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Override the scene's tiling strategy (random, patterned, positional).
    #[arg(long)]
    strategy: Option<String>,
}

#[derive(Deserialize)]
struct SceneConfig {
    strategy: String,
    #[serde(default)]
    atlas: Option<serde_json::Value>,
    #[serde(default)]
    fullbright: bool,
    quad_goal: u32,
    sprite: SpriteWindow,
    blocks: Vec<BlockPos>,
    /// Face names to map ("up", "north", ...); all six when absent.
    #[serde(default)]
    faces: Option<Vec<String>>,
}

fn resolve_faces(names: Option<&[String]>) -> Result<Vec<Face>, String> {
    let Some(names) = names else {
        return Ok(Face::ALL.to_vec());
    };
    names
        .iter()
        .map(|name| Face::from_string(name).ok_or_else(|| format!("unknown face: {name}")))
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().without_time().compact().init();

    let args = Args::parse();
    let raw = match &args.scene {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_SCENE.to_string(),
    };
    let scene: SceneConfig = serde_json::from_str(&raw)?;

    let strategy = args.strategy.as_deref().unwrap_or(&scene.strategy);
    let kind = MapKind::from_string(strategy)
        .ok_or_else(|| format!("unknown strategy: {strategy}"))?;

    let mapper = Arc::new(TileMapper::from_config(
        kind,
        scene.atlas.as_ref(),
        scene.fullbright,
    )?);
    info!(
        "mapping {} blocks with {:?} over a {}x{} atlas grid",
        scene.blocks.len(),
        mapper.kind(),
        mapper.grid().columns(),
        mapper.grid().rows()
    );

    let faces = resolve_faces(scene.faces.as_deref())?;

    let resources = BatchResources::new(mapper.clone());
    for pos in &scene.blocks {
        let quads: Vec<BakedQuad> = faces
            .iter()
            .map(|face| BakedQuad::unit_face(*face, *pos))
            .collect();
        resources
            .job_tx
            .send(TransformJob {
                pos: *pos,
                quads,
                sprite: scene.sprite,
                quad_goal: scene.quad_goal,
            })
            .map_err(|_| "transform worker shut down")?;
    }

    let mut all_quads = Vec::new();
    {
        let mut receiver = resources
            .result_rx
            .lock()
            .expect("transform result receiver lock poisoned");
        for _ in 0..scene.blocks.len() {
            let Some(result) = receiver.blocking_recv() else {
                break;
            };
            info!("block {:?}: {} quads", result.pos, result.quads.len());
            all_quads.extend(result.quads);
        }
    }

    let data = bake_quads(&all_quads);
    info!(
        "baked {} quads into {} vertices / {} indices",
        all_quads.len(),
        data.positions.len(),
        data.indices.len()
    );
    let mesh = build_mesh_from_data(data);
    info!("mesh ready with {} vertices", mesh.count_vertices());

    Ok(())
}

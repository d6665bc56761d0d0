use std::sync::{Arc, Mutex};

use qs_utils::BlockPos;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::warn;

use crate::map::TileMapper;
use crate::quad::BakedQuad;
use crate::sprite::SpriteWindow;

/// Off-thread transform worker. Jobs go in per block position; results come
/// back with the flattened remapped quads. The mapper itself is immutable,
/// so the worker shares it without locking.
pub struct BatchResources {
    pub runtime: Arc<Runtime>,
    pub job_tx: UnboundedSender<TransformJob>,
    pub result_rx: Mutex<UnboundedReceiver<TransformResult>>,
}

impl BatchResources {
    pub fn new(mapper: Arc<TileMapper>) -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create tokio runtime"));
        let (job_tx, mut job_rx) = unbounded_channel::<TransformJob>();
        let (result_tx, result_rx) = unbounded_channel::<TransformResult>();
        let runtime_clone = runtime.clone();

        runtime.spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let result_tx = result_tx.clone();
                let mapper = mapper.clone();
                runtime_clone.spawn_blocking(move || {
                    let result = job.run(&mapper);
                    let _ = result_tx.send(result);
                });
            }
        });

        Self {
            runtime,
            job_tx,
            result_rx: Mutex::new(result_rx),
        }
    }
}

pub struct TransformJob {
    pub pos: BlockPos,
    pub quads: Vec<BakedQuad>,
    pub sprite: SpriteWindow,
    pub quad_goal: u32,
}

impl TransformJob {
    pub fn run(self, mapper: &TileMapper) -> TransformResult {
        let context = mapper.context_for(self.pos);
        let mut quads = Vec::with_capacity(self.quads.len());
        for quad in &self.quads {
            match mapper.transform(quad, &self.sprite, Some(&context), self.quad_goal) {
                Ok(mut remapped) => quads.append(&mut remapped),
                Err(err) => warn!("skipping quad at {:?}: {err}", self.pos),
            }
        }
        TransformResult {
            pos: self.pos,
            quads,
        }
    }
}

pub struct TransformResult {
    pub pos: BlockPos,
    pub quads: Vec<BakedQuad>,
}

use glam::Vec3;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use roomstage_scene::{AssetGeometry, LoadHandle, NodeId, ObjError};
use std::{io::ErrorKind, path::PathBuf, thread};
use tracing::{debug, warn};

use crate::config::AssetConfig;

/// One asset waiting to be measured.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub node: NodeId,
    pub name: String,
    pub model: Option<PathBuf>,
    pub size: Vec3,
    pub scale: f32,
    pub yaw: f32,
}

impl LoadRequest {
    pub fn from_config(node: NodeId, asset: &AssetConfig) -> Self {
        Self {
            node,
            name: asset.name.clone(),
            model: asset.model.clone(),
            size: asset.size,
            scale: asset.scale,
            yaw: asset.yaw,
        }
    }

    /// Measure the model, or fall back to the configured size when there is
    /// no model file.
    pub fn measure(&self) -> Result<AssetGeometry, ObjError> {
        let Some(path) = &self.model else {
            return Ok(AssetGeometry::from_size(self.size));
        };
        match AssetGeometry::from_obj_file(path, self.scale, self.yaw) {
            Err(ObjError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "Model {} for {} not found. Using configured size {}",
                    path.display(),
                    self.name,
                    self.size
                );
                Ok(AssetGeometry::from_size(self.size))
            }
            other => other,
        }
    }
}

/// Measure every request on its own thread and post the completions.
///
/// Without a seed each worker posts as soon as its own measurement
/// finishes, so completions arrive in whatever order the loads finish.
/// With `shuffle_seed` the results are gathered first and posted in an
/// order shuffled by that seed, which reproduces out-of-order arrival.
pub fn run_loads(requests: &[LoadRequest], handle: &LoadHandle, shuffle_seed: Option<u64>) {
    let Some(seed) = shuffle_seed else {
        thread::scope(|scope| {
            for request in requests {
                let handle = handle.clone();
                scope.spawn(move || handle.complete(request.node, request.measure()));
            }
        });
        return;
    };

    let mut results: Vec<(NodeId, Result<AssetGeometry, ObjError>)> = thread::scope(|scope| {
        let workers: Vec<_> = requests
            .iter()
            .map(|request| scope.spawn(move || (request.node, request.measure())))
            .collect();
        workers
            .into_iter()
            .zip(requests)
            .filter_map(|(worker, request)| match worker.join() {
                Ok(result) => Some(result),
                Err(_) => {
                    warn!("Loader thread for {} panicked", request.name);
                    None
                }
            })
            .collect()
    });

    results.shuffle(&mut StdRng::seed_from_u64(seed));
    debug!(seed, "shuffled load completion order");
    for (node, result) in results {
        handle.complete(node, result);
    }
}

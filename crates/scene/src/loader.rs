use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::debug;

use crate::{AssetGeometry, NodeId, ObjError};

/// Completion notice for one asset load.
#[derive(Debug)]
pub struct LoadCompletion {
    /// Node the load was requested for.
    pub node: NodeId,
    /// Measured geometry, or why the load failed.
    pub result: Result<AssetGeometry, ObjError>,
}

/// Sending side of the completion channel; cheap to clone and `Send`, so
/// loader threads can each hold one.
#[derive(Debug, Clone)]
pub struct LoadHandle {
    tx: Sender<LoadCompletion>,
}

impl LoadHandle {
    /// Report that the load for `node` finished.
    pub fn complete(&self, node: NodeId, result: Result<AssetGeometry, ObjError>) {
        if self.tx.send(LoadCompletion { node, result }).is_err() {
            debug!(?node, "load finished after the scene shut down");
        }
    }
}

/// Receiving side of asset-load completions.
///
/// Completions arrive in whatever order loaders finish; the frame loop
/// drains them on the main thread.
#[derive(Debug)]
pub struct LoadQueue {
    tx: Sender<LoadCompletion>,
    rx: Receiver<LoadCompletion>,
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// A handle loaders use to post completions.
    pub fn handle(&self) -> LoadHandle {
        LoadHandle {
            tx: self.tx.clone(),
        }
    }

    /// Take every completion that has arrived so far, in arrival order.
    pub fn drain(&self) -> Vec<LoadCompletion> {
        self.rx.try_iter().collect()
    }
}

use anyhow::Result;
use glam::Vec3;
use roomstage_camera::Camera;
use roomstage_core::RoomShell;
use roomstage_input::PointerEvent;
use roomstage_interaction::{DragContext, DragController, DragOutcome};
use roomstage_layout::LayoutEngine;
use roomstage_scene::{LoadHandle, LoadQueue, NodeId, SceneGraph};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::StageConfig;
use crate::loader::LoadRequest;

/// Where one asset ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetLayout {
    /// Configured asset name.
    pub name: String,
    /// Node origin in world space.
    pub position: Vec3,
    /// Measured bounding box size.
    pub size: Vec3,
    /// Whether this is the asset pointer drags move.
    pub draggable: bool,
}

/// A placement made while draining load completions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Configured asset name.
    pub name: String,
    /// Origin chosen by the layout engine.
    pub position: Vec3,
}

/// Owns the room, the scene and the controllers for one staged room.
///
/// Pointer events and frames are processed on the thread that owns the
/// session; loaders only ever talk to it through [`LoadHandle`].
pub struct StageSession {
    scene: SceneGraph,
    shell: RoomShell,
    camera: Camera,
    layout: LayoutEngine,
    drag: DragController,
    loads: LoadQueue,
    draggable: Option<NodeId>,
    viewport: (u32, u32),
    requests: Vec<LoadRequest>,
    frame: u64,
}

impl StageSession {
    /// Spawn a loading node per configured asset and assign its placement.
    pub fn from_config(config: &StageConfig) -> Result<Self> {
        config.validate()?;

        let mut scene = SceneGraph::new();
        let mut layout = LayoutEngine::new();
        let mut requests = Vec::with_capacity(config.assets.len());
        let mut draggable = None;

        for asset in &config.assets {
            let node = scene.spawn(asset.name.as_str());
            layout.assign(node, asset.placement);
            if asset.draggable {
                draggable = Some(node);
            }
            requests.push(LoadRequest::from_config(node, asset));
        }

        if draggable.is_none() {
            warn!("No draggable asset configured; pointer dragging is disabled");
        }

        let viewport = config.viewport.dimensions();
        info!(
            assets = config.assets.len(),
            draggable = config.draggable_asset().unwrap_or("none"),
            width = viewport.0,
            height = viewport.1,
            "stage session created"
        );

        Ok(Self {
            scene,
            shell: config.room,
            camera: config.camera.build(&config.viewport),
            layout,
            drag: DragController::new(config.drag),
            loads: LoadQueue::new(),
            draggable,
            viewport,
            requests,
            frame: 0,
        })
    }

    /// Loads this session is waiting for.
    pub fn load_requests(&self) -> &[LoadRequest] {
        &self.requests
    }

    /// Handle loaders post completions through.
    pub fn load_handle(&self) -> LoadHandle {
        self.loads.handle()
    }

    /// Advance one frame: place every asset whose load has completed.
    pub fn frame(&mut self) -> Vec<Placement> {
        self.frame += 1;
        let mut placed = Vec::new();
        for completion in self.loads.drain() {
            let node = completion.node;
            if let Some(position) =
                self.layout
                    .on_load_complete(completion, &mut self.scene, &self.shell)
            {
                let name = self
                    .scene
                    .node(node)
                    .map(|n| n.name.clone())
                    .unwrap_or_default();
                placed.push(Placement { name, position });
            }
        }
        if !placed.is_empty() {
            debug!(frame = self.frame, placed = placed.len(), "frame placed assets");
        }
        placed
    }

    /// Route a pointer event to the drag controller.
    pub fn pointer(&mut self, event: &PointerEvent) -> DragOutcome {
        let asset = self.draggable.and_then(|id| self.scene.asset_mut(id));
        self.drag.handle(
            event,
            DragContext {
                camera: &self.camera,
                asset,
                shell: &self.shell,
            },
        )
    }

    /// Follow a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "ignoring resize to an empty viewport");
            return;
        }
        self.viewport = (width, height);
        self.camera.set_viewport(width, height);
    }

    /// Remove the named asset from the scene. Returns whether it existed.
    pub fn remove_asset(&mut self, name: &str) -> bool {
        match self.scene.find(name).and_then(|id| self.scene.remove(id)) {
            Some(_) => {
                info!(%name, "asset removed");
                true
            }
            None => {
                warn!(%name, "cannot remove unknown asset");
                false
            }
        }
    }

    /// Whether a drag is in progress; camera controls stay off meanwhile.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    #[cfg(test)]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current layout of every placed asset, in spawn order.
    pub fn layout_snapshot(&self) -> Vec<AssetLayout> {
        self.scene
            .iter_ready()
            .map(|(id, name, asset)| AssetLayout {
                name: name.to_string(),
                position: asset.position,
                size: asset.size,
                draggable: Some(id) == self.draggable,
            })
            .collect()
    }
}

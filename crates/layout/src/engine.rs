use std::collections::{HashMap, HashSet};

use glam::Vec3;
use roomstage_core::RoomShell;
use roomstage_scene::{LoadCompletion, NodeId, SceneGraph};
use tracing::{info, warn};

use crate::{place_asset, PlacementRule};

/// Runs placement once per asset as load completions arrive.
///
/// Completions may arrive in any order and while another asset is being
/// dragged; each one only touches its own node.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    rules: HashMap<NodeId, PlacementRule>,
    handled: HashSet<NodeId>,
}

impl LayoutEngine {
    /// Create an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule used when `node` finishes loading.
    pub fn assign(&mut self, node: NodeId, rule: PlacementRule) {
        self.rules.insert(node, rule);
    }

    /// Rule for `node`, defaulting to a centered placement.
    pub fn rule_for(&self, node: NodeId) -> PlacementRule {
        self.rules.get(&node).copied().unwrap_or_default()
    }

    /// Whether the completion for `node` has already been handled.
    pub fn is_placed(&self, node: NodeId) -> bool {
        self.handled.contains(&node)
    }

    /// Handle one load completion: measure, place, and publish the asset.
    ///
    /// Returns the placed position, or `None` when the completion was a
    /// duplicate, belonged to a removed node, or carried a failed load.
    pub fn on_load_complete(
        &mut self,
        completion: LoadCompletion,
        scene: &mut SceneGraph,
        shell: &RoomShell,
    ) -> Option<Vec3> {
        let LoadCompletion { node, result } = completion;

        if !self.handled.insert(node) {
            warn!(?node, "Ignoring duplicate load completion");
            return None;
        }

        let name = match scene.node(node) {
            Some(scene_node) => scene_node.name.clone(),
            None => {
                warn!(?node, "Load completed for a node that is no longer in the scene");
                return None;
            }
        };

        let geometry = match result {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!("Failed to load {name}: {err}. It will not be placed");
                return None;
            }
        };

        let rule = self.rule_for(node);
        let mut asset = geometry.into_asset();
        let position = place_asset(&mut asset, shell, &rule);
        scene.mark_ready(node, asset);
        info!(%name, anchor = ?rule.anchor, %position, size = %asset.size, "placed asset");
        Some(position)
    }
}

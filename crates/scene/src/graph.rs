use std::collections::BTreeMap;

use roomstage_core::PlaceableAsset;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Handle to a node in the [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Lifecycle of an asset node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    /// Geometry still loading; no position or size yet.
    Loading,
    /// Geometry measured and placed.
    Ready(PlaceableAsset),
}

/// A named asset node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Human-readable name ("lamp", "sofa", ...).
    pub name: String,
    /// Load state.
    pub state: NodeState,
}

/// Owner of every asset node in the room.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, SceneNode>,
    next_id: u32,
}

impl SceneGraph {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node in the loading state.
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        debug!(?id, %name, "spawned asset node");
        self.nodes.insert(
            id,
            SceneNode {
                name,
                state: NodeState::Loading,
            },
        );
        id
    }

    /// Attach a placed asset to a node. Returns `false` if the node is gone.
    pub fn mark_ready(&mut self, id: NodeId, asset: PlaceableAsset) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.state = NodeState::Ready(asset);
                true
            }
            None => false,
        }
    }

    /// Remove a node from the scene.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let removed = self.nodes.remove(&id);
        if let Some(node) = &removed {
            debug!(?id, name = %node.name, "removed asset node");
        }
        removed
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Ready asset by id; `None` while loading or after removal.
    pub fn asset(&self, id: NodeId) -> Option<&PlaceableAsset> {
        match &self.nodes.get(&id)?.state {
            NodeState::Ready(asset) => Some(asset),
            NodeState::Loading => None,
        }
    }

    /// Mutable ready asset by id; `None` while loading or after removal.
    pub fn asset_mut(&mut self, id: NodeId) -> Option<&mut PlaceableAsset> {
        match &mut self.nodes.get_mut(&id)?.state {
            NodeState::Ready(asset) => Some(asset),
            NodeState::Loading => None,
        }
    }

    /// First node with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| *id)
    }

    /// Ready assets in id order.
    pub fn iter_ready(&self) -> impl Iterator<Item = (NodeId, &str, &PlaceableAsset)> {
        self.nodes.iter().filter_map(|(id, node)| match &node.state {
            NodeState::Ready(asset) => Some((*id, node.name.as_str(), asset)),
            NodeState::Loading => None,
        })
    }

    /// Number of nodes, loading or ready.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn loading_nodes_expose_no_asset() {
        let mut scene = SceneGraph::new();
        let lamp = scene.spawn("lamp");
        assert!(scene.asset(lamp).is_none());
        assert!(scene.asset_mut(lamp).is_none());
        assert_eq!(scene.find("lamp"), Some(lamp));
        assert_eq!(scene.iter_ready().count(), 0);
    }

    #[test]
    fn ready_node_is_mutable_until_removed() {
        let mut scene = SceneGraph::new();
        let lamp = scene.spawn("lamp");
        assert!(scene.mark_ready(lamp, PlaceableAsset::new(Vec3::ONE)));

        scene.asset_mut(lamp).unwrap().position.x = 2.0;
        assert_eq!(scene.asset(lamp).unwrap().position.x, 2.0);

        let removed = scene.remove(lamp).unwrap();
        assert_eq!(removed.name, "lamp");
        assert!(scene.asset_mut(lamp).is_none());
        assert!(!scene.mark_ready(lamp, PlaceableAsset::new(Vec3::ONE)));
        assert!(scene.is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("chair");
        scene.remove(a);
        let b = scene.spawn("chair");
        assert_ne!(a, b);
    }
}

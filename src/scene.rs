//! Scene-graph boundary
//!
//! The host renderer owns the transforms. The simulation only knows them
//! through [`SceneGraph`] handles, resolved once per round by name
//! (`Box_4`, `Cover_4`, `Ghost_4_0`, `Cross_4`, ...). Missing nodes are
//! reported and skipped; gameplay runs the same without them.
//!
//! Attacker nodes are `Cross_N`. Scenes exported with the older
//! `CrossSword_N` naming must be renamed before binding.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_COUNT, LIVES_PER_COFFIN};
use crate::sim::GameState;
use crate::cell_to_row_col;

/// Handle into a scene graph's transform storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Transform access the simulation needs from a host scene
pub trait SceneGraph {
    /// Look up a node by name
    fn find(&self, name: &str) -> Option<NodeId>;

    fn position(&self, id: NodeId) -> Option<Vec3>;
    fn rotation(&self, id: NodeId) -> Option<Quat>;
    fn scale(&self, id: NodeId) -> Option<Vec3>;

    fn set_position(&mut self, id: NodeId, position: Vec3);
    fn set_rotation(&mut self, id: NodeId, rotation: Quat);
    fn set_scale(&mut self, id: NodeId, scale: Vec3);
}

/// Which part of a cell a node animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Box,
    Cover,
    Ghost { slot: usize },
    Cross,
}

impl NodeRole {
    /// Node name for this role in `cell`
    pub fn node_name(self, cell: usize) -> String {
        match self {
            NodeRole::Box => format!("Box_{}", cell),
            NodeRole::Cover => format!("Cover_{}", cell),
            NodeRole::Ghost { slot } => format!("Ghost_{}_{}", cell, slot),
            NodeRole::Cross => format!("Cross_{}", cell),
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Box => write!(f, "box"),
            NodeRole::Cover => write!(f, "cover"),
            NodeRole::Ghost { slot } => write!(f, "ghost slot {}", slot),
            NodeRole::Cross => write!(f, "cross"),
        }
    }
}

/// Problems found while binding a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    MissingNode { role: NodeRole, cell: usize },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::MissingNode { role, cell } => write!(
                f,
                "missing {} node for cell {} (expected \"{}\")",
                role,
                cell,
                role.node_name(*cell)
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Strip an exporter's duplicate suffix (`Box_4.001` -> `box_4`)
pub fn normalize_name(name: &str) -> String {
    let base = name.split('.').next().unwrap_or(name);
    base.to_lowercase()
}

/// A resolved node plus its rest pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundNode {
    pub id: NodeId,
    pub base_position: Vec3,
    pub base_rotation: Quat,
    pub base_scale: Vec3,
}

impl BoundNode {
    fn resolve(graph: &impl SceneGraph, role: NodeRole, cell: usize) -> Result<Self, SceneError> {
        let missing = SceneError::MissingNode { role, cell };
        let id = graph.find(&role.node_name(cell)).ok_or(missing.clone())?;
        Ok(Self {
            id,
            base_position: graph.position(id).ok_or(missing.clone())?,
            base_rotation: graph.rotation(id).ok_or(missing.clone())?,
            base_scale: graph.scale(id).ok_or(missing)?,
        })
    }
}

/// Scene nodes belonging to one cell
#[derive(Debug, Clone, Default)]
pub struct CellNodes {
    pub box_node: Option<BoundNode>,
    pub cover: Option<BoundNode>,
    pub lives: [Option<BoundNode>; LIVES_PER_COFFIN],
    pub cross: Option<BoundNode>,
}

/// Handles for every animated part, resolved once per round
#[derive(Debug, Clone)]
pub struct SceneBinding {
    pub cells: [CellNodes; CELL_COUNT],
    /// Nodes that could not be found
    pub missing: Vec<SceneError>,
}

impl SceneBinding {
    /// Resolve every expected node, logging the ones that are absent
    pub fn resolve(graph: &impl SceneGraph) -> Self {
        let mut missing = Vec::new();
        let mut bind = |role: NodeRole, cell: usize| match BoundNode::resolve(graph, role, cell) {
            Ok(node) => Some(node),
            Err(e) => {
                log::warn!("Scene binding: {}", e);
                missing.push(e);
                None
            }
        };

        let cells = std::array::from_fn(|cell| CellNodes {
            box_node: bind(NodeRole::Box, cell),
            cover: bind(NodeRole::Cover, cell),
            lives: std::array::from_fn(|slot| bind(NodeRole::Ghost { slot }, cell)),
            cross: bind(NodeRole::Cross, cell),
        });

        if missing.is_empty() {
            log::info!("Scene bound: all {} cells complete", CELL_COUNT);
        }
        Self { cells, missing }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Write the simulation's visual state onto the scene
    pub fn apply(&self, state: &GameState, graph: &mut impl SceneGraph) {
        for (cell, nodes) in self.cells.iter().enumerate() {
            let coffin = &state.coffins[cell];
            let cross = &state.crosses[cell];

            if let Some(node) = &nodes.cover {
                let turn = Quat::from_rotation_y(coffin.cover_angle.to_radians());
                graph.set_rotation(node.id, node.base_rotation * turn);
            }
            if let Some(node) = &nodes.box_node {
                let turn = Quat::from_rotation_y(coffin.box_angle.to_radians());
                graph.set_rotation(node.id, node.base_rotation * turn);
            }
            for (node, life) in nodes.lives.iter().zip(coffin.lives.iter()) {
                if let Some(node) = node {
                    let spin = Quat::from_rotation_z(life.spin.to_radians());
                    graph.set_rotation(node.id, node.base_rotation * spin);
                    graph.set_scale(node.id, node.base_scale * life.scale);
                }
            }
            if let Some(node) = &nodes.cross {
                graph.set_position(node.id, node.base_position + Vec3::Z * cross.depth);
            }
        }
    }
}

/// A named transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn at(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Flat in-memory transform list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub transforms: Vec<Transform>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transform: Transform) -> NodeId {
        self.transforms.push(transform);
        NodeId(self.transforms.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Transform> {
        self.transforms.get(id.0)
    }

    /// Full 3x3 layout with every node the binding expects
    pub fn demo() -> Self {
        const SPACING: f32 = 4.0;
        const CROSS_HEIGHT: f32 = 8.0;

        let mut scene = Self::new();
        for cell in 0..CELL_COUNT {
            let (row, col) = cell_to_row_col(cell);
            let origin = Vec3::new(col as f32 * SPACING, row as f32 * -SPACING, 0.0);

            scene.add(Transform::at(NodeRole::Box.node_name(cell), origin));
            scene.add(Transform::at(
                NodeRole::Cover.node_name(cell),
                origin + Vec3::Z * 0.5,
            ));
            for slot in 0..LIVES_PER_COFFIN {
                let offset = Vec3::new(slot as f32 - 1.0, 0.0, 1.5);
                scene.add(Transform::at(
                    NodeRole::Ghost { slot }.node_name(cell),
                    origin + offset,
                ));
            }
            scene.add(Transform::at(
                NodeRole::Cross.node_name(cell),
                origin + Vec3::Z * CROSS_HEIGHT,
            ));
        }
        scene
    }
}

impl SceneGraph for Scene {
    fn find(&self, name: &str) -> Option<NodeId> {
        let wanted = normalize_name(name);
        self.transforms
            .iter()
            .position(|t| normalize_name(&t.name) == wanted)
            .map(NodeId)
    }

    fn position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|t| t.position)
    }

    fn rotation(&self, id: NodeId) -> Option<Quat> {
        self.get(id).map(|t| t.rotation)
    }

    fn scale(&self, id: NodeId) -> Option<Vec3> {
        self.get(id).map(|t| t.scale)
    }

    fn set_position(&mut self, id: NodeId, position: Vec3) {
        if let Some(t) = self.transforms.get_mut(id.0) {
            t.position = position;
        }
    }

    fn set_rotation(&mut self, id: NodeId, rotation: Quat) {
        if let Some(t) = self.transforms.get_mut(id.0) {
            t.rotation = rotation;
        }
    }

    fn set_scale(&mut self, id: NodeId, scale: Vec3) {
        if let Some(t) = self.transforms.get_mut(id.0) {
            t.scale = scale;
        }
    }
}

//! # Transform Hierarchy
//!
//! Parent/child transforms stored in an arena. Nodes refer to their parent by
//! [`NodeId`], so the tree holds no reference cycles and can be cloned freely.
//!
//! ## Change Detection
//!
//! Every node carries a monotonic `version` that increases whenever its local
//! transform or its parent changes. A node's cached world matrix remembers the
//! local version and the parent world version it was computed from; if both
//! still match, the cache is returned without recomputing anything.

use std::cell::Cell;

use cgmath::{Matrix4, One, Quaternion, Vector3, Zero};
use thiserror::Error;

/// Errors raised by [`TransformTree`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a node in this tree.
    #[error("no node with id {0}")]
    UnknownNode(usize),
    /// The requested parent is the node itself or one of its descendants.
    #[error("making {parent} the parent of {child} would create a cycle")]
    ParentCycle {
        /// Node being reparented
        child: usize,
        /// Rejected parent
        parent: usize,
    },
}

/// Index of a node in a [`TransformTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Translation, rotation and non-uniform scale, applied as `T * R * S`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Offset from the parent origin
    pub translation: Vector3<f32>,
    /// Orientation relative to the parent
    pub rotation: Quaternion<f32>,
    /// Per-axis scale
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            translation: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// A pure translation.
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Transform {
            translation,
            ..Transform::default()
        }
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[derive(Copy, Clone, Debug)]
struct WorldCache {
    matrix: Matrix4<f32>,
    /// Node version the cache was computed at.
    local_version: u64,
    /// Parent world version the cache was computed at (0 for roots).
    parent_version: u64,
    /// Bumped every time this cache is recomputed; children compare against it.
    world_version: u64,
}

#[derive(Clone, Debug)]
struct TransformNode {
    parent: Option<NodeId>,
    local: Transform,
    version: u64,
    cache: Cell<Option<WorldCache>>,
}

/// Arena of transform nodes.
#[derive(Clone, Debug, Default)]
pub struct TransformTree {
    nodes: Vec<TransformNode>,
}

impl TransformTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        TransformTree::default()
    }

    /// Adds a node, optionally under `parent`.
    pub fn add_node(&mut self, local: Transform, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(TransformNode {
            parent,
            local,
            version: 1,
            cache: Cell::new(None),
        });
        Ok(id)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Result<&TransformNode, SceneError> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id.0))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut TransformNode, SceneError> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id.0))
    }

    /// Local transform of a node.
    pub fn local(&self, id: NodeId) -> Result<Transform, SceneError> {
        Ok(self.node(id)?.local)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(id)?.parent)
    }

    /// Current version of a node.
    pub fn version(&self, id: NodeId) -> Result<u64, SceneError> {
        Ok(self.node(id)?.version)
    }

    /// Replaces the local transform of a node.
    pub fn set_local(&mut self, id: NodeId, local: Transform) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        node.local = local;
        node.version += 1;
        Ok(())
    }

    /// Replaces the translation of a node.
    pub fn set_translation(&mut self, id: NodeId, translation: Vector3<f32>) -> Result<(), SceneError> {
        let local = Transform {
            translation,
            ..self.local(id)?
        };
        self.set_local(id, local)
    }

    /// Replaces the rotation of a node.
    pub fn set_rotation(&mut self, id: NodeId, rotation: Quaternion<f32>) -> Result<(), SceneError> {
        let local = Transform {
            rotation,
            ..self.local(id)?
        };
        self.set_local(id, local)
    }

    /// Replaces the scale of a node.
    pub fn set_scale(&mut self, id: NodeId, scale: Vector3<f32>) -> Result<(), SceneError> {
        let local = Transform {
            scale,
            ..self.local(id)?
        };
        self.set_local(id, local)
    }

    /// Moves a node under a new parent, or makes it a root with `None`.
    ///
    /// Fails if `parent` is the node itself or one of its descendants.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        self.node(id)?;
        if let Some(parent) = parent {
            let mut cursor = Some(parent);
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    return Err(SceneError::ParentCycle {
                        child: id.0,
                        parent: parent.0,
                    });
                }
                cursor = self.node(ancestor)?.parent;
            }
        }
        let node = self.node_mut(id)?;
        node.parent = parent;
        node.version += 1;
        Ok(())
    }

    /// Local-to-world matrix of a node, recomputed only along stale paths.
    pub fn world_matrix(&self, id: NodeId) -> Result<Matrix4<f32>, SceneError> {
        Ok(self.world_cache(id)?.matrix)
    }

    /// Version of a node's world matrix.
    ///
    /// Changes exactly when the world matrix had to be recomputed, so callers
    /// can compare it to a stored value to detect movement.
    pub fn world_version(&self, id: NodeId) -> Result<u64, SceneError> {
        Ok(self.world_cache(id)?.world_version)
    }

    fn world_cache(&self, id: NodeId) -> Result<WorldCache, SceneError> {
        let node = self.node(id)?;
        let parent = match node.parent {
            Some(parent) => Some(self.world_cache(parent)?),
            None => None,
        };
        let parent_version = parent.map_or(0, |p| p.world_version);

        if let Some(cache) = node.cache.get() {
            if cache.local_version == node.version && cache.parent_version == parent_version {
                return Ok(cache);
            }
        }

        let local = node.local.matrix();
        let matrix = match parent {
            Some(parent) => parent.matrix * local,
            None => local,
        };
        let cache = WorldCache {
            matrix,
            local_version: node.version,
            parent_version,
            world_version: node.cache.get().map_or(1, |c| c.world_version + 1),
        };
        node.cache.set(Some(cache));
        Ok(cache)
    }
}

use glam::Vec3;
use smallvec::SmallVec;

use crate::rig::node::{Node, NodeId};
use crate::rig::roles::Joint;

/// Default visual head radius for a fresh rig.
pub const DEFAULT_HEAD_RADIUS: f32 = 0.12;
/// Default visual stroke/limb width for a fresh rig.
pub const DEFAULT_STROKE_WIDTH: f32 = 0.05;

/// Inline capacity for flattened node lists; the canonical rig has 12
/// joints, so traversal buffers never spill to the heap.
pub const RIG_NODE_HINT: usize = 16;

/// A rooted joint tree plus the two scalar style parameters.
///
/// # Ownership
///
/// A `Skeleton` exclusively owns its entire subtree. Whenever a pose must
/// be captured independently of further live edits (keyframe commit,
/// clip load), it is deep-cloned: the copy preserves every joint id while
/// aliasing nothing, so interpolation can later match joints by id across
/// structurally distinct trees.
///
/// # Mutation
///
/// The posing engine mutates positions in place through
/// [`Skeleton::translate_subtree`]; programmatic replay (interpolation
/// results) uses [`Skeleton::set_node_position`], which bypasses every
/// joint-role constraint.
#[derive(Debug, Clone)]
pub struct Skeleton {
    root: Node,
    /// Visual head radius, > 0.
    pub head_radius: f32,
    /// Visual stroke/limb width, > 0.
    pub stroke_width: f32,
}

impl Skeleton {
    /// Wraps an existing joint tree.
    #[must_use]
    pub fn new(root: Node, head_radius: f32, stroke_width: f32) -> Self {
        Self {
            root,
            head_radius,
            stroke_width,
        }
    }

    /// Builds the canonical rig in its rest pose.
    #[must_use]
    pub fn default_pose() -> Self {
        Self::new(
            build_joint(Joint::Hip),
            DEFAULT_HEAD_RADIUS,
            DEFAULT_STROKE_WIDTH,
        )
    }

    /// The root joint; the renderer reads the whole pose from here.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Depth-first lookup by id. `None` for ids not present in this pose;
    /// callers treat that as a skip, never a fault.
    #[must_use]
    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    /// Mutable variant of [`Skeleton::find_node`].
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.root.find_mut(id)
    }

    /// First joint carrying this display name.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<&Node> {
        self.root.find_named(name)
    }

    /// Canonical-rig convenience for [`Skeleton::find_named`].
    #[must_use]
    pub fn find_joint(&self, joint: Joint) -> Option<&Node> {
        self.root.find_named(joint.name())
    }

    /// Full joint list in deterministic pre-order.
    ///
    /// This order is what pairs joints across two poses positionally when
    /// an id match is unavailable, and what validation walks.
    #[must_use]
    pub fn flatten(&self) -> SmallVec<[&Node; RIG_NODE_HINT]> {
        let mut nodes = SmallVec::new();
        collect(&self.root, &mut nodes);
        nodes
    }

    /// Direct, unconstrained overwrite of a single joint position — the
    /// escape hatch for programmatic replay. Descendants do not follow.
    ///
    /// Returns whether the id matched a joint.
    pub fn set_node_position(&mut self, id: NodeId, position: Vec3) -> bool {
        match self.root.find_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Rigidly translates a joint and all of its descendants.
    ///
    /// Returns whether the id matched a joint.
    pub fn translate_subtree(&mut self, id: NodeId, delta: Vec3) -> bool {
        match self.root.find_mut(id) {
            Some(node) => {
                node.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Visits every joint in pre-order.
    pub fn visit(&self, mut f: impl FnMut(&Node)) {
        self.root.visit(&mut f);
    }

    /// Mutable variant of [`Skeleton::visit`].
    pub fn visit_mut(&mut self, mut f: impl FnMut(&mut Node)) {
        self.root.visit_mut(&mut f);
    }

    /// Number of joints in the pose.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Lowest Y across the pose; used for floor alignment.
    #[must_use]
    pub fn min_y(&self) -> f32 {
        let mut min = f32::INFINITY;
        self.visit(|node| min = min.min(node.position.y));
        min
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::default_pose()
    }
}

fn build_joint(joint: Joint) -> Node {
    let children = joint.children().iter().map(|&c| build_joint(c)).collect();
    Node::with_children(joint.id(), joint.name(), joint.rest_position(), children)
}

fn collect<'a>(node: &'a Node, out: &mut SmallVec<[&'a Node; RIG_NODE_HINT]>) {
    out.push(node);
    for child in &node.children {
        collect(child, out);
    }
}

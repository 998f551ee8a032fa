use glam::Vec3;

/// Stable identifier of a joint.
///
/// `NodeId` is the join key between independently cloned poses: every
/// keyframe of a clip carries the same ids in the same topology, so two
/// snapshots can be matched joint-for-joint without sharing any object
/// identity. Ids survive [`Node::clone`] and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single joint in the rig hierarchy.
///
/// # Design Principles
///
/// - Owns its children exclusively: a child belongs to exactly one parent
///   and the whole pose is one acyclic, single-rooted tree
/// - Child order is stable and significant — it is what allows positional
///   pairing of two poses when an id match is unavailable
/// - `Clone` performs the identifier-preserving deep copy that keyframe
///   snapshots rely on: structurally distinct objects, semantically the
///   same rig
#[derive(Debug, Clone)]
pub struct Node {
    /// Stable joint identifier.
    pub id: NodeId,
    /// Display name, doubling as the semantic role tag (e.g. "hip",
    /// "leftElbow"). May be empty for joints loaded from degraded data.
    pub name: String,
    /// Position in editor/world space, unscaled.
    pub position: Vec3,
    /// Child joints, exclusively owned, in stable order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf joint.
    #[must_use]
    pub fn new(id: NodeId, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            children: Vec::new(),
        }
    }

    /// Creates a joint with children.
    #[must_use]
    pub fn with_children(
        id: NodeId,
        name: impl Into<String>,
        position: Vec3,
        children: Vec<Node>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            children,
        }
    }

    /// Depth-first pre-order search by id. Returns the first structural
    /// match; callers must tolerate `None` for malformed data.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable variant of [`Node::find`].
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Depth-first pre-order search by display name.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_named(name))
    }

    /// Rigidly translates this joint and every descendant.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    /// Visits this joint and every descendant in pre-order.
    pub fn visit(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Mutable variant of [`Node::visit`].
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Number of joints in this subtree, including self.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

use serde::{Deserialize, Serialize};

/// Arena index of a node inside one [`FrameTree`]. Ids from one tree are
/// meaningless in another.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// The `(src, id, name)` triple read off a live frame element.
///
/// `src` is the primary identity key: it dedupes siblings during discovery
/// and re-matches path steps during replay navigation. An empty `src` marks
/// a frame that cannot be tracked.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FrameIdentity {
    pub id: String,
    pub name: String,
    pub src: String,
}

impl FrameIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            src: src.into(),
        }
    }

    pub fn is_trackable(&self) -> bool {
        !self.src.is_empty()
    }
}

/// One discovered embedded-document element. Immutable after creation apart
/// from the children list, which only grows.
#[derive(Clone, Debug)]
pub struct FrameNode {
    identity: FrameIdentity,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl FrameNode {
    pub fn identity(&self) -> &FrameIdentity {
        &self.identity
    }

    pub fn src(&self) -> &str {
        &self.identity.src
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Arena-backed tree of discovered frames. Node 0 is the synthetic root with
/// empty identity fields, standing in for the top-level document.
#[derive(Clone, Debug)]
pub struct FrameTree {
    nodes: Vec<FrameNode>,
}

impl FrameTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![FrameNode {
                identity: FrameIdentity::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &FrameNode {
        &self.nodes[id.0]
    }

    /// Total node count, synthetic root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_child_with_src(&self, parent: NodeId, src: &str) -> bool {
        self.nodes[parent.0]
            .children
            .iter()
            .any(|child| self.nodes[child.0].identity.src == src)
    }

    /// Append a child under `parent`. Returns `None` without inserting when
    /// the identity is untrackable (empty `src`) or a sibling already
    /// carries the same `src`.
    pub fn insert_child(&mut self, parent: NodeId, identity: FrameIdentity) -> Option<NodeId> {
        if !identity.is_trackable() || self.has_child_with_src(parent, &identity.src) {
            return None;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(FrameNode {
            identity,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    /// Parent back-references walked up to (but not including) the synthetic
    /// root, reversed to root-to-node order. Empty for the root itself.
    pub fn path_to(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            path.push(current);
            current = parent;
        }
        path.reverse();
        path
    }

    /// All tracked nodes in depth-first pre-order, synthetic root excluded.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len() - 1);
        let mut stack: Vec<NodeId> = self.nodes[0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            order.push(node);
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        order
    }

    /// Slash-joined `src` path from the root to `node`; `/` for the root.
    pub fn src_path(&self, node: NodeId) -> String {
        let steps = self.path_to(node);
        if steps.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for step in steps {
            path.push('/');
            path.push_str(self.node(step).src());
        }
        path
    }
}

impl Default for FrameTree {
    fn default() -> Self {
        Self::new()
    }
}

//! Arena backed binary tree skeletons.
//!
//! A `Tree` holds the bare structure of an expression: which positions are
//! operator applications and which are operands. Nodes live in a single
//! vector and refer to each other by index, so copying a tree is one vector
//! clone and the parent link never owns anything.

use fasthash::xx;

/// Index of a node in its tree's arena.
pub type NodeId = usize;

/// Maximum depth of a tree. The route to a node is stored in a `u64`, one bit
/// per level below the root.
pub const MAX_LEVEL: u32 = 64;

/// Seed mixed into the fingerprint of every leaf, so that an empty slot can
/// never hash like an operator node at the same position.
const LEAF_TAG: u64 = 0x6c65_6166;
/// Seed mixed into the fingerprint of every operator node.
const NODE_TAG: u64 = 0x6e6f_6465;

/// Direction taken when descending from a node to one of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side
{
    Left,
    Right
}

impl Side
{
    /// The path bit for this direction.
    fn bit(self) -> u64
    {
        match self
        {
            Side::Left  => 0,
            Side::Right => 1
        }
    }
}

/// A single position in a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node
{
    /// Depth of the node, the root is at level 1.
    pub level: u32,
    /// Route from the root. The lowest `level - 1` bits are the directions
    /// taken, most significant first; 0 means left and 1 means right.
    pub path: u64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// Non-owning link back up the tree.
    pub parent: Option<NodeId>
}

impl Node
{
    fn root() -> Self
    {
        Node { level: 1, path: 0, left: None, right: None, parent: None }
    }

    /// Whether this position holds an operand.
    pub fn is_leaf(&self) -> bool
    {
        self.left.is_none() && self.right.is_none()
    }

    /// The child on side `side`, if any.
    pub fn child(&self, side: Side) -> Option<NodeId>
    {
        match side
        {
            Side::Left  => self.left,
            Side::Right => self.right
        }
    }
}

/// A full binary tree: every node has either zero or two children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree
{
    nodes: Vec<Node>
}

impl Default for Tree
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Tree
{
    /// Create a tree consisting of a single, unexpanded root.
    pub fn new() -> Self
    {
        Tree { nodes: vec![Node::root()] }
    }

    /// The index of the root node. The root is always stored first.
    pub fn root(&self) -> NodeId
    {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node
    {
        &self.nodes[id]
    }

    /// Total number of nodes, operands and operators alike. Never zero: a
    /// tree always holds its root.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize
    {
        self.nodes.len()
    }

    /// Number of operand positions.
    pub fn leaves(&self) -> usize
    {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of operator positions.
    pub fn internal_nodes(&self) -> usize
    {
        self.nodes.len() - self.leaves()
    }

    /// Number of levels in the tree.
    pub fn depth(&self) -> u32
    {
        self.nodes.iter().map(|node| node.level).max().unwrap_or(0)
    }

    /// Find the root of the tree by following parent links up from `id`.
    pub fn root_of(&self, mut id: NodeId) -> NodeId
    {
        while let Some(parent) = self.nodes[id].parent
        {
            id = parent;
        }
        id
    }

    /// Turn the leaf `id` into an operator node with two fresh leaves.
    ///
    /// Panics when `id` already has children, or when the new leaves would
    /// be deeper than `MAX_LEVEL`.
    pub fn expand(&mut self, id: NodeId)
    {
        let (level, path) = {
            let node = &self.nodes[id];
            assert!(node.is_leaf(), "expanding non-empty slot {}", id);
            (node.level, node.path)
        };
        assert!(level < MAX_LEVEL, "tree deeper than {} levels", MAX_LEVEL);

        let left = self.push_child(id, level, path, Side::Left);
        let right = self.push_child(id, level, path, Side::Right);
        let node = &mut self.nodes[id];
        node.left = Some(left);
        node.right = Some(right);
    }

    fn push_child(&mut self, parent: NodeId, level: u32, path: u64, side: Side) -> NodeId
    {
        let id = self.nodes.len();
        self.nodes.push(Node {
            level: level + 1,
            path: (path << 1) | side.bit(),
            left: None,
            right: None,
            parent: Some(parent)
        });
        id
    }

    /// Walk from the root to the node at `path` on level `level`.
    ///
    /// Panics when the route leaves the tree.
    pub fn navigate(&self, path: u64, level: u32) -> NodeId
    {
        assert!(level >= 1 && level <= MAX_LEVEL, "invalid level {}", level);

        let mut id = self.root();
        for step in (0..level - 1).rev()
        {
            let side = if (path >> step) & 1 == 1 { Side::Right } else { Side::Left };
            id = match self.nodes[id].child(side)
            {
                Some(child) => child,
                None        => panic!("path {:#b} leaves the tree at level {}",
                    path, self.nodes[id].level)
            };
        }
        id
    }

    /// Compute the structural fingerprint of the tree.
    ///
    /// The fingerprint of a node is the xxHash64 of its level and path
    /// together with the fingerprints of its children, so two trees built in
    /// a different order but with the same shape hash identically.
    pub fn fingerprint(&self) -> u64
    {
        self.fingerprint_of(self.root())
    }

    fn fingerprint_of(&self, id: NodeId) -> u64
    {
        let node = &self.nodes[id];
        let (tag, left, right) = match (node.left, node.right)
        {
            (Some(left), Some(right)) => {
                (NODE_TAG, self.fingerprint_of(left), self.fingerprint_of(right))
            },
            _ => (LEAF_TAG, 0, 0)
        };

        let mut bytes = [0u8; 36];
        bytes[0..4].copy_from_slice(&node.level.to_le_bytes());
        bytes[4..12].copy_from_slice(&node.path.to_le_bytes());
        bytes[12..20].copy_from_slice(&left.to_le_bytes());
        bytes[20..28].copy_from_slice(&right.to_le_bytes());
        bytes[28..36].copy_from_slice(&tag.to_le_bytes());
        xx::hash64(&bytes[..])
    }

    /// Visit the nodes in post-order: left subtree, right subtree, node.
    pub fn post_order(&self) -> Vec<NodeId>
    {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.post_order_from(self.root(), &mut order);
        order
    }

    fn post_order_from(&self, id: NodeId, order: &mut Vec<NodeId>)
    {
        let node = &self.nodes[id];
        if let Some(left) = node.left
        {
            self.post_order_from(left, order);
        }
        if let Some(right) = node.right
        {
            self.post_order_from(right, order);
        }
        order.push(id);
    }
}

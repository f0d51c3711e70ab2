//! Index-based node arena.
//!
//! The tree topology is stored as a flat array of [`Node`] link records,
//! parallel to a [`NodeData`] array holding per-node content. Nodes are
//! never removed individually; a document is rebuilt whole when its shape
//! changes, which keeps every `NodeId` dense and stable for the lifetime
//! of one tree generation.
//!
//! # Canonical traversal
//!
//! `Node` stores no `first_child` link. The first child of a parent is
//! found by following `last_child` and walking `previous_sibling` back to
//! the start of the sibling list; child iteration then proceeds forward
//! via `next_sibling`. [`NodeArena::children_of`] implements exactly this
//! and is the canonical document-order traversal.

use std::fmt;
use std::num::NonZeroUsize;

use static_assertions::const_assert_eq;

use crate::error::{CoreError, InvalidNodeId, Result};
use crate::node::NodeData;

/// A node identifier within a particular [`NodeArena`].
///
/// Internally stored as `index + 1` in a `NonZeroUsize` so that
/// `Option<NodeId>` is pointer-sized.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: NonZeroUsize,
}

impl NodeId {
    /// The root node of any arena.
    pub const ZERO: NodeId = NodeId {
        index: NonZeroUsize::new(1).unwrap(),
    };

    /// Create a `NodeId` from a zero-based array index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        NodeId {
            index: NonZeroUsize::new(index.saturating_add(1)).unwrap(),
        }
    }

    /// The zero-based array index of this node.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.index.get() - 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.index())
    }
}

/// Hierarchical link record of a single node.
///
/// All links are indices into the same arena. There is deliberately no
/// `first_child` field; see the module docs for the canonical traversal.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub previous_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub last_child: Option<NodeId>,
}

// Option<NodeId> is niche-optimized, so the whole record packs into
// four machine words.
const_assert_eq!(
    std::mem::size_of::<Node>(),
    4 * std::mem::size_of::<usize>()
);

impl Node {
    /// The link record of a detached root node.
    pub const ROOT: Node = Node {
        parent: None,
        previous_sibling: None,
        next_sibling: None,
        last_child: None,
    };

    #[inline]
    pub const fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    #[inline]
    pub const fn has_children(&self) -> bool {
        self.last_child.is_some()
    }
}

/// Owns the tree topology (`Node` array) and the per-node content
/// (`NodeData` array), sharing one index space.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeArena {
    hierarchy: Vec<Node>,
    data: Vec<NodeData>,
}

impl NodeArena {
    /// Create an arena containing only a root node.
    pub fn with_root(root: NodeData) -> Self {
        Self {
            hierarchy: vec![Node::ROOT],
            data: vec![root],
        }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.hierarchy.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hierarchy.is_empty()
    }

    /// The root node id.
    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId::ZERO
    }

    /// Validate a node id against this arena.
    #[inline]
    pub fn check(&self, id: NodeId) -> Result<()> {
        if id.index() < self.hierarchy.len() {
            Ok(())
        } else {
            Err(CoreError::InvalidNodeId(InvalidNodeId {
                index: id.index(),
                len: self.hierarchy.len(),
            }))
        }
    }

    /// Get the link record of a node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.check(id)?;
        Ok(&self.hierarchy[id.index()])
    }

    /// Get the content of a node.
    pub fn data(&self, id: NodeId) -> Result<&NodeData> {
        self.check(id)?;
        Ok(&self.data[id.index()])
    }

    /// Get mutable access to the content of a node.
    pub fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.check(id)?;
        Ok(&mut self.data[id.index()])
    }

    /// The whole hierarchy array, indexed by `NodeId::index()`.
    #[inline]
    pub fn hierarchy(&self) -> &[Node] {
        &self.hierarchy
    }

    /// The whole content array, indexed by `NodeId::index()`.
    #[inline]
    pub fn node_data(&self) -> &[NodeData] {
        &self.data
    }

    /// Append a new node as the last child of `parent`.
    ///
    /// Node ids are handed out in strictly increasing order, so every
    /// link of the new node refers to an earlier position. This is what
    /// keeps the arena a valid forest without cycle checks.
    pub fn insert(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId> {
        self.check(parent)?;

        let new_id = NodeId::new(self.hierarchy.len());
        let previous_sibling = self.hierarchy[parent.index()].last_child;

        self.hierarchy.push(Node {
            parent: Some(parent),
            previous_sibling,
            next_sibling: None,
            last_child: None,
        });
        self.data.push(data);

        if let Some(prev) = previous_sibling {
            self.hierarchy[prev.index()].next_sibling = Some(new_id);
        }
        self.hierarchy[parent.index()].last_child = Some(new_id);

        Ok(new_id)
    }

    /// The first child of a node, found via the canonical traversal
    /// (backwalk from `last_child`).
    pub fn first_child(&self, id: NodeId) -> Result<Option<NodeId>> {
        let mut current = self.node(id)?.last_child;
        let mut first = None;
        while let Some(child) = current {
            first = Some(child);
            current = self.hierarchy[child.index()].previous_sibling;
        }
        Ok(first)
    }

    /// Iterate the children of a node in document order.
    ///
    /// The iterator is lazy and restartable (it is `Clone`); cloning it
    /// restarts iteration from the current position.
    pub fn children_of(&self, id: NodeId) -> Result<Children<'_>> {
        let first = self.first_child(id)?;
        Ok(Children {
            arena: self,
            next: first,
        })
    }

    /// Iterate the ancestors of a node, innermost first. The node itself
    /// is not included; the sequence is finite because parent links always
    /// point to strictly earlier positions.
    pub fn ancestors_of(&self, id: NodeId) -> Result<Ancestors<'_>> {
        let parent = self.node(id)?.parent;
        Ok(Ancestors {
            arena: self,
            next: parent,
        })
    }

    /// All non-leaf nodes as `(depth, id)`, sorted parent-before-children
    /// (breadth-first, so a parent always precedes its descendants).
    ///
    /// Runtime: O(n).
    pub fn parents_sorted_by_depth(&self) -> Vec<(usize, NodeId)> {
        let mut non_leaf_nodes = Vec::new();
        let mut current = vec![(0, self.root())];
        let mut next = Vec::new();
        let mut depth = 1_usize;

        loop {
            for &(_, id) in &current {
                let mut child = self.first_child(id).unwrap_or(None);
                while let Some(c) = child {
                    if self.hierarchy[c.index()].has_children() {
                        next.push((depth, c));
                    }
                    child = self.hierarchy[c.index()].next_sibling;
                }
            }

            non_leaf_nodes.append(&mut current);

            if next.is_empty() {
                break;
            }
            current.append(&mut next);
            depth += 1;
        }

        non_leaf_nodes.retain(|&(_, id)| self.hierarchy[id.index()].has_children());
        non_leaf_nodes
    }
}

/// Lazy document-order child iterator. See [`NodeArena::children_of`].
#[derive(Debug, Clone)]
pub struct Children<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.hierarchy[current.index()].next_sibling;
        Some(current)
    }
}

/// Innermost-first ancestor iterator. See [`NodeArena::ancestors_of`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.hierarchy[current.index()].parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeData, NodeType};

    fn div() -> NodeData {
        NodeData::new(NodeType::Div)
    }

    #[test]
    fn insert_links_siblings() {
        let mut arena = NodeArena::with_root(NodeData::body());
        let a = arena.insert(arena.root(), div()).unwrap();
        let b = arena.insert(arena.root(), div()).unwrap();
        let c = arena.insert(arena.root(), div()).unwrap();

        assert_eq!(arena.node(arena.root()).unwrap().last_child, Some(c));
        assert_eq!(arena.node(a).unwrap().next_sibling, Some(b));
        assert_eq!(arena.node(b).unwrap().previous_sibling, Some(a));
        assert_eq!(arena.node(c).unwrap().previous_sibling, Some(b));
        assert_eq!(arena.node(c).unwrap().next_sibling, None);
    }

    #[test]
    fn children_in_document_order() {
        let mut arena = NodeArena::with_root(NodeData::body());
        let a = arena.insert(arena.root(), div()).unwrap();
        let b = arena.insert(arena.root(), div()).unwrap();
        let c = arena.insert(arena.root(), div()).unwrap();

        let children: Vec<_> = arena.children_of(arena.root()).unwrap().collect();
        assert_eq!(children, vec![a, b, c]);

        // restartable: a fresh iterator starts over
        let again: Vec<_> = arena.children_of(arena.root()).unwrap().collect();
        assert_eq!(again, children);
    }

    #[test]
    fn ancestors_innermost_first() {
        let mut arena = NodeArena::with_root(NodeData::body());
        let a = arena.insert(arena.root(), div()).unwrap();
        let b = arena.insert(a, div()).unwrap();
        let c = arena.insert(b, div()).unwrap();

        let ancestors: Vec<_> = arena.ancestors_of(c).unwrap().collect();
        assert_eq!(ancestors, vec![b, a, arena.root()]);
    }

    #[test]
    fn invalid_node_id_is_an_error() {
        let arena = NodeArena::with_root(NodeData::body());
        let stale = NodeId::new(99);

        assert!(matches!(
            arena.node(stale),
            Err(CoreError::InvalidNodeId(InvalidNodeId { index: 99, len: 1 }))
        ));
        assert!(arena.children_of(stale).is_err());
        assert!(arena.ancestors_of(stale).is_err());
    }

    #[test]
    fn parents_sorted_by_depth_is_parent_before_children() {
        let mut arena = NodeArena::with_root(NodeData::body());
        let a = arena.insert(arena.root(), div()).unwrap();
        let _leaf = arena.insert(arena.root(), div()).unwrap();
        let b = arena.insert(a, div()).unwrap();
        let _inner_leaf = arena.insert(b, div()).unwrap();

        let parents = arena.parents_sorted_by_depth();
        assert_eq!(parents, vec![(0, arena.root()), (1, a), (2, b)]);
    }

    #[test]
    fn first_child_via_backwalk() {
        let mut arena = NodeArena::with_root(NodeData::body());
        let a = arena.insert(arena.root(), div()).unwrap();
        let _b = arena.insert(arena.root(), div()).unwrap();

        assert_eq!(arena.first_child(arena.root()).unwrap(), Some(a));
        assert_eq!(arena.first_child(a).unwrap(), None);
    }
}

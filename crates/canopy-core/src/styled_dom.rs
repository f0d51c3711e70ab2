//! The styled document: arena + resolved properties + hit-test tags.

use std::sync::atomic::{AtomicU64, Ordering};

use canopy_css::{Css, CssProperty, CssPropertyType, DynamicOverrides};
use tracing::debug;

use crate::arena::{NodeArena, NodeId};
use crate::dom::Dom;
use crate::error::Result;
use crate::node::TabIndex;
use crate::prop_cache::{self, CssPropertyCache};
use crate::style::{self, CascadeInfo};

/// Interactive state flags of a node. Non-exclusive; `normal` is always
/// set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeState {
    pub normal: bool,
    pub hover: bool,
    pub active: bool,
    pub focused: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            normal: true,
            hover: false,
            active: false,
            focused: false,
        }
    }
}

/// Per-node styling output: current state plus the optional hit-test tag.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct StyledNode {
    pub state: NodeState,
    pub tag_id: Option<TagId>,
}

/// Identifies one document among those a window may host.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomId(pub usize);

impl DomId {
    pub const ROOT: DomId = DomId(0);
}

/// A node address that is unambiguous across documents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomNodeId {
    pub dom: DomId,
    pub node: NodeId,
}

static TAG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A process-unique hit-test identifier.
///
/// Renderers attach this to display-list items; hits come back as tag
/// ids and are translated to nodes via [`StyledDom::node_for_tag`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub u64);

impl TagId {
    /// The next unused tag id. Never reused within the process.
    pub fn unique() -> Self {
        TagId(TAG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// One entry of the hit-test index.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TagIdToNodeIdMapping {
    pub tag_id: TagId,
    pub node_id: NodeId,
    pub tab_index: Option<TabIndex>,
}

/// A non-leaf node and its depth; sorted parents-before-children.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParentWithNodeDepth {
    pub depth: usize,
    pub node_id: NodeId,
}

/// Kinds of properties that changed on a node during a restyle.
pub type RestyledNodes = Vec<(NodeId, Vec<CssPropertyType>)>;

/// A fully resolved, queryable styled tree.
///
/// Owns the arena and everything derived from it. Rebuilt whole when the
/// tree shape changes; interactive state changes go through the
/// `restyle_nodes_*` methods, which re-resolve only the touched nodes.
#[derive(Debug)]
pub struct StyledDom {
    pub dom_id: DomId,
    pub arena: NodeArena,
    pub styled_nodes: Vec<StyledNode>,
    pub cascade_info: Vec<CascadeInfo>,
    pub tag_ids_to_node_ids: Vec<TagIdToNodeIdMapping>,
    pub non_leaf_nodes: Vec<ParentWithNodeDepth>,
    pub css_property_cache: CssPropertyCache,
    css: Css,
    overrides: DynamicOverrides,
}

impl StyledDom {
    /// Resolve a document against its CSS.
    pub fn style(dom: Dom, css: Css, overrides: DynamicOverrides) -> Self {
        let arena = dom.build();
        Self::style_arena(arena, css, overrides)
    }

    /// Like [`StyledDom::style`], for an already-built arena.
    pub fn style_arena(arena: NodeArena, css: Css, overrides: DynamicOverrides) -> Self {
        let cascade_info = style::build_cascade_info(&arena);

        let mut styled_nodes = vec![StyledNode::default(); arena.len()];
        let mut tag_ids_to_node_ids = Vec::new();
        for (index, data) in arena.node_data().iter().enumerate() {
            if data.requires_hit_test_tag() {
                let tag_id = TagId::unique();
                let node_id = NodeId::new(index);
                styled_nodes[index].tag_id = Some(tag_id);
                tag_ids_to_node_ids.push(TagIdToNodeIdMapping {
                    tag_id,
                    node_id,
                    tab_index: data.tab_index(),
                });
            }
        }
        // tag ids are handed out in ascending order, so the mapping is
        // already sorted for binary search

        let states: Vec<NodeState> = styled_nodes.iter().map(|n| n.state).collect();
        let css_property_cache =
            prop_cache::build_property_cache(&arena, &cascade_info, &states, &css, &overrides)
                .unwrap_or_else(|_| unreachable!("all node ids come from this arena"));

        let non_leaf_nodes = arena
            .parents_sorted_by_depth()
            .into_iter()
            .map(|(depth, node_id)| ParentWithNodeDepth { depth, node_id })
            .collect::<Vec<_>>();

        debug!(
            nodes = arena.len(),
            tags = tag_ids_to_node_ids.len(),
            parents = non_leaf_nodes.len(),
            "styled document"
        );

        StyledDom {
            dom_id: DomId::ROOT,
            arena,
            styled_nodes,
            cascade_info,
            tag_ids_to_node_ids,
            non_leaf_nodes,
            css_property_cache,
            css,
            overrides,
        }
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn root(&self) -> NodeId {
        self.arena.root()
    }

    /// Translate a hit-test tag back to its node.
    pub fn node_for_tag(&self, tag: TagId) -> Option<&TagIdToNodeIdMapping> {
        self.tag_ids_to_node_ids
            .binary_search_by_key(&tag, |mapping| mapping.tag_id)
            .ok()
            .map(|i| &self.tag_ids_to_node_ids[i])
    }

    /// The resolved value of a property under the node's current state.
    pub fn get_property(&self, node_id: NodeId, ty: CssPropertyType) -> Result<Option<&CssProperty>> {
        self.arena.check(node_id)?;
        let state = self.styled_nodes[node_id.index()].state;
        Ok(self.css_property_cache.get(node_id, &state, ty))
    }

    /// Set or clear the hover flag on the given nodes and re-resolve
    /// them. Returns, per node whose flag actually flipped, the property
    /// kinds whose effective value changed.
    pub fn restyle_nodes_hover(&mut self, nodes: &[NodeId], enabled: bool) -> Result<RestyledNodes> {
        self.restyle_nodes(nodes, enabled, |state| &mut state.hover)
    }

    /// Hover's counterpart for the active (pressed) flag.
    pub fn restyle_nodes_active(&mut self, nodes: &[NodeId], enabled: bool) -> Result<RestyledNodes> {
        self.restyle_nodes(nodes, enabled, |state| &mut state.active)
    }

    /// Hover's counterpart for the focus flag.
    pub fn restyle_nodes_focus(&mut self, nodes: &[NodeId], enabled: bool) -> Result<RestyledNodes> {
        self.restyle_nodes(nodes, enabled, |state| &mut state.focused)
    }

    fn restyle_nodes(
        &mut self,
        nodes: &[NodeId],
        enabled: bool,
        flag: impl Fn(&mut NodeState) -> &mut bool,
    ) -> Result<RestyledNodes> {
        let mut restyled = Vec::new();
        for &node_id in nodes {
            self.arena.check(node_id)?;
            let index = node_id.index();

            let old_state = self.styled_nodes[index].state;
            let mut new_state = old_state;
            if *flag(&mut new_state) == enabled {
                continue;
            }
            *flag(&mut new_state) = enabled;

            let before = self.css_property_cache.effective_map(node_id, &old_state);
            self.styled_nodes[index].state = new_state;
            self.css_property_cache.restyle_node(
                node_id,
                &new_state,
                &self.arena,
                &self.cascade_info,
                &self.css,
                &self.overrides,
            )?;
            let after = self.css_property_cache.effective_map(node_id, &new_state);

            let changed = diff_property_kinds(&before, &after);
            if !changed.is_empty() {
                restyled.push((node_id, changed));
            }
        }
        debug!(restyled = restyled.len(), "interactive restyle");
        Ok(restyled)
    }
}

/// Property kinds present in only one map or with differing values.
fn diff_property_kinds(
    before: &[(CssPropertyType, CssProperty)],
    after: &[(CssPropertyType, CssProperty)],
) -> Vec<CssPropertyType> {
    let mut changed = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < before.len() || j < after.len() {
        match (before.get(i), after.get(j)) {
            (Some((bt, bp)), Some((at, ap))) => {
                if bt == at {
                    if bp != ap {
                        changed.push(*bt);
                    }
                    i += 1;
                    j += 1;
                } else if bt < at {
                    changed.push(*bt);
                    i += 1;
                } else {
                    changed.push(*at);
                    j += 1;
                }
            }
            (Some((bt, _)), None) => {
                changed.push(*bt);
                i += 1;
            }
            (None, Some((at, _))) => {
                changed.push(*at);
                j += 1;
            }
            (None, None) => break,
        }
    }
    changed
}

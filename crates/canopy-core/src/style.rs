//! Selector matching against the document tree.
//!
//! Paths are matched right to left: the rightmost selector group must
//! match the candidate node itself, and each group further left must
//! match an ancestor, as dictated by the combinator between the groups.

use canopy_css::{CssPath, CssPathPseudoSelector, CssPathSelector};

use crate::arena::{NodeArena, NodeId};
use crate::error::Result;
use crate::styled_dom::NodeState;

/// Precomputed sibling-position facts for one node.
///
/// Rebuilt whenever the tree shape changes; positional pseudo-selectors
/// (`:first`, `:last`, `:nth-child`) read from this instead of walking
/// sibling links during matching.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CascadeInfo {
    /// Zero-based position among the node's siblings.
    pub index_in_parent: u32,
    pub is_last_child: bool,
}

/// Compute [`CascadeInfo`] for every node in the arena.
///
/// The root counts as a first and last child.
pub fn build_cascade_info(arena: &NodeArena) -> Vec<CascadeInfo> {
    let mut info = vec![CascadeInfo::default(); arena.len()];
    info[arena.root().index()] = CascadeInfo {
        index_in_parent: 0,
        is_last_child: true,
    };
    for (_depth, parent) in arena.parents_sorted_by_depth() {
        let children = arena
            .children_of(parent)
            .unwrap_or_else(|_| unreachable!("parent id came from this arena"));
        let mut last = None;
        for (index, child) in children.enumerate() {
            info[child.index()] = CascadeInfo {
                index_in_parent: index as u32,
                is_last_child: false,
            };
            last = Some(child);
        }
        if let Some(last) = last {
            info[last.index()].is_last_child = true;
        }
    }
    info
}

/// A run of simple selectors between two combinators, yielded right to
/// left together with the combinator that connects the group to the
/// group on its right.
struct CssGroupIterator<'a> {
    selectors: &'a [CssPathSelector],
    /// Exclusive end of the unvisited prefix.
    end: usize,
}

/// How a selector group relates to the group matched before it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum GroupLink {
    /// This is the rightmost group; it must match the candidate itself.
    Target,
    /// Separated by `>`: must match the immediate parent.
    DirectParent,
    /// Separated by whitespace: must match some remaining ancestor.
    Ancestor,
}

impl<'a> CssGroupIterator<'a> {
    fn new(selectors: &'a [CssPathSelector]) -> Self {
        Self {
            selectors,
            end: selectors.len(),
        }
    }
}

impl<'a> Iterator for CssGroupIterator<'a> {
    type Item = (GroupLink, &'a [CssPathSelector]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.end == 0 {
            return None;
        }
        let link = if self.end == self.selectors.len() {
            GroupLink::Target
        } else {
            match self.selectors[self.end] {
                CssPathSelector::DirectChildren => GroupLink::DirectParent,
                CssPathSelector::Children => GroupLink::Ancestor,
                _ => unreachable!("end always rests on a combinator"),
            }
        };
        let mut start = self.end;
        while start > 0 {
            match self.selectors[start - 1] {
                CssPathSelector::DirectChildren | CssPathSelector::Children => break,
                _ => start -= 1,
            }
        }
        let group = &self.selectors[start..self.end];
        // leave `end` resting on the combinator left of this group
        self.end = start.saturating_sub(1);
        Some((link, group))
    }
}

/// Whether every simple selector in the group holds for the node.
fn selector_group_matches(
    group: &[CssPathSelector],
    node_id: NodeId,
    arena: &NodeArena,
    cascade_info: &[CascadeInfo],
    state: &NodeState,
) -> Result<bool> {
    let data = arena.data(node_id)?;
    let info = cascade_info[node_id.index()];
    for selector in group {
        let holds = match selector {
            CssPathSelector::Global => true,
            CssPathSelector::Type(tag) => data.node_type().tag() == *tag,
            CssPathSelector::Class(class) => data.has_class(class),
            CssPathSelector::Id(id) => data.has_id(id),
            CssPathSelector::PseudoSelector(pseudo) => match pseudo {
                CssPathPseudoSelector::First => info.index_in_parent == 0,
                CssPathPseudoSelector::Last => info.is_last_child,
                CssPathPseudoSelector::NthChild(nth) => nth.matches(info.index_in_parent),
                CssPathPseudoSelector::Hover => state.hover,
                CssPathPseudoSelector::Active => state.active,
                CssPathPseudoSelector::Focus => state.focused,
            },
            // combinators never appear inside a group
            CssPathSelector::DirectChildren | CssPathSelector::Children => false,
        };
        if !holds {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether the path matches the node under the given state vector.
///
/// The state vector applies to every segment of the path. An empty path
/// matches nothing.
pub fn matches_node(
    path: &CssPath,
    node_id: NodeId,
    arena: &NodeArena,
    cascade_info: &[CascadeInfo],
    state: &NodeState,
) -> Result<bool> {
    if path.selectors.is_empty() {
        return Ok(false);
    }
    arena.check(node_id)?;

    let mut current = node_id;
    for (link, group) in CssGroupIterator::new(&path.selectors) {
        match link {
            GroupLink::Target => {
                if !selector_group_matches(group, current, arena, cascade_info, state)? {
                    return Ok(false);
                }
            }
            GroupLink::DirectParent => {
                let Some(parent) = arena.node(current)?.parent else {
                    // the chain ran past the root; only a bare `*`
                    // group is still satisfiable
                    return Ok(*group == [CssPathSelector::Global]);
                };
                if !selector_group_matches(group, parent, arena, cascade_info, state)? {
                    return Ok(false);
                }
                current = parent;
            }
            GroupLink::Ancestor => {
                if arena.node(current)?.parent.is_none() {
                    return Ok(*group == [CssPathSelector::Global]);
                }
                let mut found = None;
                for ancestor in arena.ancestors_of(current)? {
                    if selector_group_matches(group, ancestor, arena, cascade_info, state)? {
                        found = Some(ancestor);
                        break;
                    }
                }
                let Some(ancestor) = found else {
                    return Ok(false);
                };
                current = ancestor;
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use canopy_css::{NodeTypeTag, NthChildSelector};

    fn three_deep() -> NodeArena {
        // body > div.a > div.b > p
        Dom::body()
            .with_child(
                Dom::div()
                    .with_class("a")
                    .with_child(Dom::div().with_class("b").with_child(Dom::label("x"))),
            )
            .build()
    }

    #[test]
    fn cascade_info_positions() {
        let arena = Dom::body()
            .with_child(Dom::div())
            .with_child(Dom::div())
            .with_child(Dom::div())
            .build();
        let info = build_cascade_info(&arena);

        assert_eq!(info[0], CascadeInfo { index_in_parent: 0, is_last_child: true });
        assert_eq!(info[1], CascadeInfo { index_in_parent: 0, is_last_child: false });
        assert_eq!(info[2], CascadeInfo { index_in_parent: 1, is_last_child: false });
        assert_eq!(info[3], CascadeInfo { index_in_parent: 2, is_last_child: true });
    }

    #[test]
    fn direct_child_requires_immediate_parent() {
        let arena = three_deep();
        let info = build_cascade_info(&arena);
        let state = NodeState::default();
        let p = NodeId::new(3);

        // .b > p matches, .a > p does not (b sits in between)
        let direct_b = CssPath::new().class("b").direct_children().node_type(NodeTypeTag::P);
        let direct_a = CssPath::new().class("a").direct_children().node_type(NodeTypeTag::P);
        assert!(matches_node(&direct_b, p, &arena, &info, &state).unwrap());
        assert!(!matches_node(&direct_a, p, &arena, &info, &state).unwrap());

        // the descendant combinator reaches past b
        let loose_a = CssPath::new().class("a").children().node_type(NodeTypeTag::P);
        assert!(matches_node(&loose_a, p, &arena, &info, &state).unwrap());
    }

    #[test]
    fn multi_level_combinators() {
        let arena = three_deep();
        let info = build_cascade_info(&arena);
        let state = NodeState::default();
        let p = NodeId::new(3);

        let path = CssPath::new()
            .node_type(NodeTypeTag::Body)
            .children()
            .class("b")
            .direct_children()
            .node_type(NodeTypeTag::P);
        assert!(matches_node(&path, p, &arena, &info, &state).unwrap());
    }

    #[test]
    fn nth_child_even_equals_pattern_2_0() {
        let arena = Dom::body()
            .with_children((0..5).map(|_| Dom::div()).collect())
            .build();
        let info = build_cascade_info(&arena);
        let state = NodeState::default();

        let even = CssPath::new().pseudo(CssPathPseudoSelector::NthChild(NthChildSelector::Even));
        let pattern = CssPath::new().pseudo(CssPathPseudoSelector::NthChild(
            NthChildSelector::Pattern { repeat: 2, offset: 0 },
        ));

        let matched = |path: &CssPath| -> Vec<usize> {
            (1..arena.len())
                .filter(|&i| matches_node(path, NodeId::new(i), &arena, &info, &state).unwrap())
                .map(|i| info[i].index_in_parent as usize)
                .collect()
        };
        assert_eq!(matched(&even), vec![0, 2, 4]);
        assert_eq!(matched(&even), matched(&pattern));
    }

    #[test]
    fn interactive_pseudo_consults_state_vector() {
        let arena = Dom::body().with_child(Dom::div()).build();
        let info = build_cascade_info(&arena);
        let hover_path = CssPath::new().global().pseudo(CssPathPseudoSelector::Hover);
        let node = NodeId::new(1);

        let normal = NodeState::default();
        assert!(!matches_node(&hover_path, node, &arena, &info, &normal).unwrap());

        let hovered = NodeState { hover: true, ..NodeState::default() };
        assert!(matches_node(&hover_path, node, &arena, &info, &hovered).unwrap());
    }

    #[test]
    fn global_group_satisfiable_past_the_root() {
        let arena = Dom::body().with_child(Dom::div()).build();
        let info = build_cascade_info(&arena);
        let state = NodeState::default();

        // the chain runs past the root, but a bare `*` group still holds
        let star_over_body = CssPath::new()
            .global()
            .direct_children()
            .node_type(NodeTypeTag::Body);
        assert!(matches_node(&star_over_body, arena.root(), &arena, &info, &state).unwrap());

        let star_above_body = CssPath::new().global().children().node_type(NodeTypeTag::Body);
        assert!(matches_node(&star_above_body, arena.root(), &arena, &info, &state).unwrap());

        // anything more specific than `*` cannot match above the root
        let class_over_body = CssPath::new()
            .class("missing")
            .direct_children()
            .node_type(NodeTypeTag::Body);
        assert!(!matches_node(&class_over_body, arena.root(), &arena, &info, &state).unwrap());
    }

    #[test]
    fn empty_path_matches_nothing() {
        let arena = Dom::body().build();
        let info = build_cascade_info(&arena);
        let state = NodeState::default();
        assert!(!matches_node(&CssPath::new(), arena.root(), &arena, &info, &state).unwrap());
    }
}

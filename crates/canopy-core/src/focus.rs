//! Keyboard focus resolution.
//!
//! Focus requests come in as [`FocusTarget`]s and resolve against a
//! [`StyledDom`] to the node that should hold focus next. Relative
//! targets (`Previous`/`Next`) walk the focus chain and wrap around at
//! its ends.

use std::fmt;

use canopy_css::CssPath;
use tracing::debug;

use crate::arena::NodeId;
use crate::node::TabIndex;
use crate::style;
use crate::styled_dom::{DomId, DomNodeId, NodeState, StyledDom};

/// Where the application wants focus to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// A specific node, validated against the document.
    Id(DomNodeId),
    /// The first document-order node matching a selector path.
    Path(FocusTargetPath),
    /// The previous entry in the focus chain, wrapping at the front.
    Previous,
    /// The next entry in the focus chain, wrapping at the back.
    Next,
    /// The first entry of the focus chain.
    First,
    /// The last entry of the focus chain.
    Last,
    /// Clear focus entirely.
    NoFocus,
}

/// Selector-addressed focus target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTargetPath {
    pub dom: DomId,
    pub css_path: CssPath,
}

/// Why a focus request could not be honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusWarning {
    /// The request named a document this window does not host.
    InvalidDomId(DomId),
    /// The request named a node outside the document.
    InvalidNodeId(DomNodeId),
    /// No node matched the requested selector path.
    CouldNotFindFocusNode(CssPath),
}

impl fmt::Display for FocusWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomId(dom) => write!(f, "focus request for unknown document {:?}", dom),
            Self::InvalidNodeId(id) => write!(f, "focus request for invalid node {:?}", id),
            Self::CouldNotFindFocusNode(path) => {
                write!(f, "no node matches focus path {:?}", path.to_string())
            }
        }
    }
}

impl std::error::Error for FocusWarning {}

/// The keyboard focus chain of a document.
///
/// `OverrideInParent(n)` entries come first, ascending by `n` with
/// document order breaking ties, followed by `Auto` entries in document
/// order. Nodes without a tab index or with `NoKeyboardFocus` do not
/// appear.
pub fn focus_chain(styled_dom: &StyledDom) -> Vec<NodeId> {
    let mut overridden: Vec<(u32, NodeId)> = Vec::new();
    let mut auto: Vec<NodeId> = Vec::new();
    for (index, data) in styled_dom.arena.node_data().iter().enumerate() {
        let node_id = NodeId::new(index);
        match data.tab_index() {
            Some(TabIndex::OverrideInParent(n)) => overridden.push((n, node_id)),
            Some(TabIndex::Auto) => auto.push(node_id),
            Some(TabIndex::NoKeyboardFocus) | None => {}
        }
    }
    // stable sort keeps document order within equal override indices
    overridden.sort_by_key(|(n, _)| *n);
    overridden
        .into_iter()
        .map(|(_, id)| id)
        .chain(auto)
        .collect()
}

/// Resolve a focus target to the node that should hold focus next.
///
/// Returns `Ok(None)` for an explicit focus clear. Relative targets on
/// an empty focus chain leave focus unchanged rather than failing.
pub fn resolve_focus_target(
    target: &FocusTarget,
    styled_dom: &StyledDom,
    current_focus: Option<DomNodeId>,
) -> Result<Option<DomNodeId>, FocusWarning> {
    let dom_id = styled_dom.dom_id;
    let wrap = |node: NodeId| DomNodeId {
        dom: dom_id,
        node,
    };

    let resolved = match target {
        FocusTarget::NoFocus => None,

        FocusTarget::Id(id) => {
            if id.dom != dom_id {
                return Err(FocusWarning::InvalidDomId(id.dom));
            }
            // existence is the only requirement: programmatic focus may
            // land on nodes outside the keyboard focus chain
            styled_dom
                .arena
                .check(id.node)
                .map_err(|_| FocusWarning::InvalidNodeId(*id))?;
            Some(*id)
        }

        FocusTarget::Path(path) => {
            if path.dom != dom_id {
                return Err(FocusWarning::InvalidDomId(path.dom));
            }
            let state = NodeState::default();
            let mut found = None;
            for index in 0..styled_dom.arena.len() {
                let node_id = NodeId::new(index);
                let matched = style::matches_node(
                    &path.css_path,
                    node_id,
                    &styled_dom.arena,
                    &styled_dom.cascade_info,
                    &state,
                )
                .unwrap_or(false);
                if matched {
                    found = Some(node_id);
                    break;
                }
            }
            match found {
                Some(node) => Some(wrap(node)),
                None => {
                    return Err(FocusWarning::CouldNotFindFocusNode(path.css_path.clone()));
                }
            }
        }

        FocusTarget::First | FocusTarget::Last | FocusTarget::Previous | FocusTarget::Next => {
            let chain = focus_chain(styled_dom);
            if chain.is_empty() {
                debug!("focus chain is empty, keeping current focus");
                return Ok(current_focus);
            }
            let node = match target {
                FocusTarget::First => chain[0],
                FocusTarget::Last => chain[chain.len() - 1],
                FocusTarget::Next | FocusTarget::Previous => {
                    let current = current_focus
                        .filter(|c| c.dom == dom_id)
                        .and_then(|c| chain.iter().position(|&n| n == c.node));
                    match (target, current) {
                        (FocusTarget::Next, Some(pos)) => chain[(pos + 1) % chain.len()],
                        (FocusTarget::Previous, Some(pos)) => {
                            chain[(pos + chain.len() - 1) % chain.len()]
                        }
                        // nothing focused yet: enter the chain at its ends
                        (FocusTarget::Next, None) => chain[0],
                        (FocusTarget::Previous, None) => chain[chain.len() - 1],
                        _ => unreachable!("outer match narrowed the target"),
                    }
                }
                _ => unreachable!("outer match narrowed the target"),
            };
            Some(wrap(node))
        }
    };

    Ok(resolved)
}

//! Selector paths.
//!
//! A [`CssPath`] is the left-hand side of a rule block: an ordered list
//! of [`CssPathSelector`]s, read left to right, where `DirectChildren`
//! and `Children` act as combinators between selector groups.

use std::fmt;

/// The element name part of a selector (`div`, `body`, ...).
///
/// Mirrors the node types of the document tree without depending on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTypeTag {
    Body,
    Div,
    Br,
    P,
    Img,
    IFrame,
    Texture,
}

impl NodeTypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeTypeTag::Body => "body",
            NodeTypeTag::Div => "div",
            NodeTypeTag::Br => "br",
            NodeTypeTag::P => "p",
            NodeTypeTag::Img => "img",
            NodeTypeTag::IFrame => "iframe",
            NodeTypeTag::Texture => "texture",
        }
    }

    pub fn from_str(tag: &str) -> Option<Self> {
        match tag {
            "body" => Some(NodeTypeTag::Body),
            "div" => Some(NodeTypeTag::Div),
            "br" => Some(NodeTypeTag::Br),
            "p" => Some(NodeTypeTag::P),
            "img" => Some(NodeTypeTag::Img),
            "iframe" => Some(NodeTypeTag::IFrame),
            "texture" => Some(NodeTypeTag::Texture),
            _ => None,
        }
    }
}

impl TryFrom<&str> for NodeTypeTag {
    type Error = crate::error::CssError;

    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        Self::from_str(tag).ok_or_else(|| crate::error::CssError::UnknownNodeType(tag.to_string()))
    }
}

impl fmt::Display for NodeTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Argument of an `:nth-child(..)` selector.
///
/// Child positions are zero-based: the first child of a parent has
/// index 0, so `Even` matches indices 0, 2, 4, ...
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NthChildSelector {
    /// Matches exactly the child at this index.
    Number(u32),
    Even,
    Odd,
    /// `An+B` form: matches indices `offset`, `offset + repeat`,
    /// `offset + 2 * repeat`, ... A `repeat` of 0 matches only `offset`.
    Pattern { repeat: u32, offset: u32 },
}

impl NthChildSelector {
    /// Whether the zero-based child index matches this selector.
    pub fn matches(&self, index_in_parent: u32) -> bool {
        match *self {
            NthChildSelector::Number(n) => index_in_parent == n,
            NthChildSelector::Even => index_in_parent % 2 == 0,
            NthChildSelector::Odd => index_in_parent % 2 == 1,
            NthChildSelector::Pattern { repeat, offset } => {
                if index_in_parent < offset {
                    false
                } else if repeat == 0 {
                    index_in_parent == offset
                } else {
                    (index_in_parent - offset) % repeat == 0
                }
            }
        }
    }
}

impl fmt::Display for NthChildSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NthChildSelector::Number(n) => write!(f, "{n}"),
            NthChildSelector::Even => write!(f, "even"),
            NthChildSelector::Odd => write!(f, "odd"),
            NthChildSelector::Pattern { repeat, offset } => write!(f, "{repeat}n+{offset}"),
        }
    }
}

/// A pseudo-selector: structural position or interactive state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CssPathPseudoSelector {
    /// `:first` — index 0 among its siblings.
    First,
    /// `:last` — the last child of its parent.
    Last,
    /// `:nth-child(..)`.
    NthChild(NthChildSelector),
    /// `:hover` — the pointer is over the node.
    Hover,
    /// `:active` — the node is being clicked.
    Active,
    /// `:focus` — the node holds keyboard focus.
    Focus,
}

impl fmt::Display for CssPathPseudoSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssPathPseudoSelector::First => write!(f, ":first"),
            CssPathPseudoSelector::Last => write!(f, ":last"),
            CssPathPseudoSelector::NthChild(n) => write!(f, ":nth-child({n})"),
            CssPathPseudoSelector::Hover => write!(f, ":hover"),
            CssPathPseudoSelector::Active => write!(f, ":active"),
            CssPathPseudoSelector::Focus => write!(f, ":focus"),
        }
    }
}

/// One step of a selector path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CssPathSelector {
    /// `*` — matches every node.
    Global,
    /// Element name, e.g. `div`.
    Type(NodeTypeTag),
    /// `.class`.
    Class(String),
    /// `#id`.
    Id(String),
    /// `:hover`, `:first`, ...
    PseudoSelector(CssPathPseudoSelector),
    /// The `>` combinator.
    DirectChildren,
    /// The descendant (whitespace) combinator.
    Children,
}

impl fmt::Display for CssPathSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssPathSelector::Global => write!(f, "*"),
            CssPathSelector::Type(t) => write!(f, "{t}"),
            CssPathSelector::Class(c) => write!(f, ".{c}"),
            CssPathSelector::Id(i) => write!(f, "#{i}"),
            CssPathSelector::PseudoSelector(p) => write!(f, "{p}"),
            CssPathSelector::DirectChildren => write!(f, " > "),
            CssPathSelector::Children => write!(f, " "),
        }
    }
}

/// A full selector path, e.g. `div.sidebar > *:hover`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CssPath {
    pub selectors: Vec<CssPathSelector>,
}

impl CssPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `*` selector.
    pub fn global(mut self) -> Self {
        self.selectors.push(CssPathSelector::Global);
        self
    }

    /// Append an element-name selector.
    pub fn node_type(mut self, tag: NodeTypeTag) -> Self {
        self.selectors.push(CssPathSelector::Type(tag));
        self
    }

    /// Append a `.class` selector.
    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.selectors.push(CssPathSelector::Class(name.into()));
        self
    }

    /// Append an `#id` selector.
    pub fn id(mut self, name: impl Into<String>) -> Self {
        self.selectors.push(CssPathSelector::Id(name.into()));
        self
    }

    /// Append a pseudo-selector.
    pub fn pseudo(mut self, pseudo: CssPathPseudoSelector) -> Self {
        self.selectors.push(CssPathSelector::PseudoSelector(pseudo));
        self
    }

    /// Append the `>` combinator.
    pub fn direct_children(mut self) -> Self {
        self.selectors.push(CssPathSelector::DirectChildren);
        self
    }

    /// Append the descendant combinator.
    pub fn children(mut self) -> Self {
        self.selectors.push(CssPathSelector::Children);
        self
    }

    /// Whether any selector in the path is an interactive pseudo-selector.
    pub fn has_interactive_state(&self) -> bool {
        self.selectors.iter().any(|s| {
            matches!(
                s,
                CssPathSelector::PseudoSelector(
                    CssPathPseudoSelector::Hover
                        | CssPathPseudoSelector::Active
                        | CssPathPseudoSelector::Focus
                )
            )
        })
    }
}

impl fmt::Display for CssPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for selector in &self.selectors {
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_child_zero_based() {
        assert!(NthChildSelector::Even.matches(0));
        assert!(!NthChildSelector::Even.matches(1));
        assert!(NthChildSelector::Odd.matches(3));
        assert!(NthChildSelector::Number(2).matches(2));
        assert!(!NthChildSelector::Number(2).matches(3));
    }

    #[test]
    fn nth_child_pattern() {
        let p = NthChildSelector::Pattern { repeat: 3, offset: 1 };
        assert!(p.matches(1));
        assert!(p.matches(4));
        assert!(p.matches(7));
        assert!(!p.matches(0));
        assert!(!p.matches(3));

        let only = NthChildSelector::Pattern { repeat: 0, offset: 5 };
        assert!(only.matches(5));
        assert!(!only.matches(6));
    }

    #[test]
    fn path_display() {
        let path = CssPath::new()
            .node_type(NodeTypeTag::Div)
            .class("sidebar")
            .direct_children()
            .global()
            .pseudo(CssPathPseudoSelector::Hover);
        assert_eq!(path.to_string(), "div.sidebar > *:hover");
        assert!(path.has_interactive_state());
    }
}

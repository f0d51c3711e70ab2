//! Retained document tree and cascade engine for the Canopy toolkit.
//!
//! The pipeline: build a tree with the fluent [`Dom`] builder, resolve
//! it against a [`canopy_css::Css`] document with [`StyledDom::style`],
//! then query resolved properties, translate hit-test tags back to
//! nodes, flip interactive states with the `restyle_nodes_*` methods,
//! and move keyboard focus through [`focus::resolve_focus_target`].
//!
//! ```
//! use canopy_core::{Dom, StyledDom};
//! use canopy_css::{
//!     ColorU, Css, CssPath, CssProperty, CssPropertyType, CssRuleBlock, DynamicOverrides,
//!     Stylesheet,
//! };
//!
//! let dom = Dom::body().with_child(Dom::div().with_class("panel"));
//! let css = Css::from(Stylesheet::new(vec![CssRuleBlock::new(
//!     CssPath::new().class("panel"),
//!     vec![CssProperty::background_color(ColorU::WHITE).into()],
//! )]));
//!
//! let styled = StyledDom::style(dom, css, DynamicOverrides::new());
//! let panel = canopy_core::NodeId::new(1);
//! assert_eq!(
//!     styled.get_property(panel, CssPropertyType::BackgroundColor).unwrap(),
//!     Some(&CssProperty::background_color(ColorU::WHITE)),
//! );
//! ```
//!
//! Styling is single-threaded and rebuild-oriented: a tree-shape change
//! rebuilds the whole [`StyledDom`]; interactive state changes
//! re-resolve only the touched nodes.

pub mod arena;
pub mod dom;
pub mod error;
pub mod focus;
pub mod node;
pub mod payload;
pub mod prop_cache;
pub mod style;
pub mod styled_dom;

pub use arena::{NodeArena, NodeId};
pub use dom::Dom;
pub use error::{CoreError, InvalidNodeId, Result};
pub use focus::{FocusTarget, FocusTargetPath, FocusWarning};
pub use node::{
    Callback, CallbackData, ClipMask, EventFilter, IdOrClass, InlineCssProperty, NodeData,
    NodeType, TabIndex, Update,
};
pub use payload::SharedPayload;
pub use prop_cache::CssPropertyCache;
pub use style::CascadeInfo;
pub use styled_dom::{
    DomId, DomNodeId, NodeState, ParentWithNodeDepth, StyledDom, StyledNode, TagId,
    TagIdToNodeIdMapping,
};

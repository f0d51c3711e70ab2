//! CSS data model for the Canopy toolkit.
//!
//! This crate defines the value side of styling: selector paths
//! ([`CssPath`]), typed properties ([`CssProperty`]), rule blocks and
//! stylesheets ([`Css`]), and runtime overrides for dynamic declarations
//! ([`DynamicOverrides`]). It contains no tree and no cascade; those live
//! in `canopy-core`, which consumes these types.
//!
//! There is intentionally no text parser here. CSS documents are built
//! programmatically:
//!
//! ```
//! use canopy_css::{
//!     Css, CssPath, CssProperty, CssRuleBlock, NodeTypeTag, PixelValue, Stylesheet,
//! };
//!
//! let rule = CssRuleBlock::new(
//!     CssPath::new().node_type(NodeTypeTag::Div).class("sidebar"),
//!     vec![CssProperty::width(PixelValue::px(200.0)).into()],
//! );
//! let css = Css::from(Stylesheet::new(vec![rule]));
//! assert!(!css.is_empty());
//! ```

pub mod error;
pub mod path;
pub mod property;
pub mod stylesheet;
pub mod value;

pub use error::{CssError, Result};
pub use path::{CssPath, CssPathPseudoSelector, CssPathSelector, NodeTypeTag, NthChildSelector};
pub use property::{CssProperty, CssPropertyType};
pub use stylesheet::{
    Css, CssDeclaration, CssRuleBlock, DynamicCssProperty, DynamicOverrides, Stylesheet,
};
pub use value::{
    AngleValue, BorderStyle, ColorU, FloatValue, FontFamilyVec, LayoutAlignContent,
    LayoutAlignItems, LayoutBoxSizing, LayoutDisplay, LayoutFlexDirection, LayoutFlexWrap,
    LayoutJustifyContent, LayoutOverflow, LayoutPosition, PercentageValue, PixelValue,
    PropertyValue, SizeMetric, StyleCursor, StyleTextAlign, StyleTransform, StyleTransformVec,
};

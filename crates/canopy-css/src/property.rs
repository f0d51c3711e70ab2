//! Typed CSS properties.
//!
//! [`CssProperty`] is the single value type flowing through the cascade:
//! one variant per supported property, each carrying its payload wrapped
//! in [`PropertyValue`]. [`CssPropertyType`] is the payload-free key used
//! to sort and deduplicate resolved declarations.

use std::fmt;

use crate::value::{
    BorderStyle, ColorU, FloatValue, FontFamilyVec, LayoutAlignContent, LayoutAlignItems,
    LayoutBoxSizing, LayoutDisplay, LayoutFlexDirection, LayoutFlexWrap, LayoutJustifyContent,
    LayoutOverflow, LayoutPosition, PercentageValue, PixelValue, PropertyValue, StyleCursor,
    StyleTextAlign, StyleTransformVec,
};

macro_rules! css_properties {
    ($($variant:ident, $ctor:ident, $css:literal, $payload:ty;)+) => {
        /// The key of a CSS property, without its value.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CssPropertyType {
            $($variant),+
        }

        impl CssPropertyType {
            /// All property types, in declaration-key order.
            pub const ALL: &'static [CssPropertyType] = &[
                $(CssPropertyType::$variant),+
            ];

            /// The CSS name of the property (`"flex-direction"` etc.).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(CssPropertyType::$variant => $css),+
                }
            }

            /// Parse a CSS property name.
            pub fn from_str(key: &str) -> Option<Self> {
                match key {
                    $($css => Some(CssPropertyType::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for CssPropertyType {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// A typed CSS property with its value.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CssProperty {
            $($variant(PropertyValue<$payload>)),+
        }

        impl CssProperty {
            /// The payload-free key of this property.
            pub fn get_type(&self) -> CssPropertyType {
                match self {
                    $(CssProperty::$variant(_) => CssPropertyType::$variant),+
                }
            }

            $(
                #[doc = concat!("Exact `", $css, "` value.")]
                pub fn $ctor(value: $payload) -> Self {
                    CssProperty::$variant(PropertyValue::Exact(value))
                }
            )+

            /// The `auto` keyword for the given property type.
            pub fn auto(property_type: CssPropertyType) -> Self {
                match property_type {
                    $(CssPropertyType::$variant => CssProperty::$variant(PropertyValue::Auto)),+
                }
            }

            /// The `none` keyword for the given property type.
            pub fn none(property_type: CssPropertyType) -> Self {
                match property_type {
                    $(CssPropertyType::$variant => CssProperty::$variant(PropertyValue::None)),+
                }
            }

            /// The `initial` keyword for the given property type.
            pub fn initial(property_type: CssPropertyType) -> Self {
                match property_type {
                    $(CssPropertyType::$variant => CssProperty::$variant(PropertyValue::Initial)),+
                }
            }

            /// The `inherit` keyword for the given property type.
            pub fn inherit(property_type: CssPropertyType) -> Self {
                match property_type {
                    $(CssPropertyType::$variant => CssProperty::$variant(PropertyValue::Inherit)),+
                }
            }
        }

        impl fmt::Display for CssProperty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(CssProperty::$variant(v) => write!(f, "{}: {v};", $css)),+
                }
            }
        }
    };
}

css_properties! {
    Display, display, "display", LayoutDisplay;
    Position, position, "position", LayoutPosition;
    BoxSizing, box_sizing, "box-sizing", LayoutBoxSizing;

    Width, width, "width", PixelValue;
    Height, height, "height", PixelValue;
    MinWidth, min_width, "min-width", PixelValue;
    MinHeight, min_height, "min-height", PixelValue;
    MaxWidth, max_width, "max-width", PixelValue;
    MaxHeight, max_height, "max-height", PixelValue;

    PaddingTop, padding_top, "padding-top", PixelValue;
    PaddingRight, padding_right, "padding-right", PixelValue;
    PaddingBottom, padding_bottom, "padding-bottom", PixelValue;
    PaddingLeft, padding_left, "padding-left", PixelValue;

    MarginTop, margin_top, "margin-top", PixelValue;
    MarginRight, margin_right, "margin-right", PixelValue;
    MarginBottom, margin_bottom, "margin-bottom", PixelValue;
    MarginLeft, margin_left, "margin-left", PixelValue;

    Top, top, "top", PixelValue;
    Right, right, "right", PixelValue;
    Bottom, bottom, "bottom", PixelValue;
    Left, left, "left", PixelValue;

    FlexDirection, flex_direction, "flex-direction", LayoutFlexDirection;
    FlexWrap, flex_wrap, "flex-wrap", LayoutFlexWrap;
    FlexGrow, flex_grow, "flex-grow", FloatValue;
    FlexShrink, flex_shrink, "flex-shrink", FloatValue;
    FlexBasis, flex_basis, "flex-basis", PixelValue;
    JustifyContent, justify_content, "justify-content", LayoutJustifyContent;
    AlignItems, align_items, "align-items", LayoutAlignItems;
    AlignContent, align_content, "align-content", LayoutAlignContent;

    OverflowX, overflow_x, "overflow-x", LayoutOverflow;
    OverflowY, overflow_y, "overflow-y", LayoutOverflow;

    BackgroundColor, background_color, "background-color", ColorU;
    TextColor, text_color, "color", ColorU;
    FontSize, font_size, "font-size", PixelValue;
    FontFamily, font_family, "font-family", FontFamilyVec;
    LineHeight, line_height, "line-height", PercentageValue;
    LetterSpacing, letter_spacing, "letter-spacing", PixelValue;
    WordSpacing, word_spacing, "word-spacing", PixelValue;
    TextAlign, text_align, "text-align", StyleTextAlign;
    Opacity, opacity, "opacity", PercentageValue;

    BorderTopWidth, border_top_width, "border-top-width", PixelValue;
    BorderRightWidth, border_right_width, "border-right-width", PixelValue;
    BorderBottomWidth, border_bottom_width, "border-bottom-width", PixelValue;
    BorderLeftWidth, border_left_width, "border-left-width", PixelValue;

    BorderTopStyle, border_top_style, "border-top-style", BorderStyle;
    BorderRightStyle, border_right_style, "border-right-style", BorderStyle;
    BorderBottomStyle, border_bottom_style, "border-bottom-style", BorderStyle;
    BorderLeftStyle, border_left_style, "border-left-style", BorderStyle;

    BorderTopColor, border_top_color, "border-top-color", ColorU;
    BorderRightColor, border_right_color, "border-right-color", ColorU;
    BorderBottomColor, border_bottom_color, "border-bottom-color", ColorU;
    BorderLeftColor, border_left_color, "border-left-color", ColorU;

    BorderTopLeftRadius, border_top_left_radius, "border-top-left-radius", PixelValue;
    BorderTopRightRadius, border_top_right_radius, "border-top-right-radius", PixelValue;
    BorderBottomLeftRadius, border_bottom_left_radius, "border-bottom-left-radius", PixelValue;
    BorderBottomRightRadius, border_bottom_right_radius, "border-bottom-right-radius", PixelValue;

    Cursor, cursor, "cursor", StyleCursor;
    Transform, transform, "transform", StyleTransformVec;
}

impl TryFrom<&str> for CssPropertyType {
    type Error = crate::error::CssError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        Self::from_str(key).ok_or_else(|| crate::error::CssError::UnknownProperty(key.to_string()))
    }
}

impl CssProperty {
    /// Whether the property affects layout (as opposed to paint only).
    ///
    /// Restyle passes use this to decide between a relayout and a repaint.
    pub fn is_layout_property(&self) -> bool {
        use CssPropertyType::*;
        !matches!(
            self.get_type(),
            BackgroundColor
                | TextColor
                | BorderTopColor
                | BorderRightColor
                | BorderBottomColor
                | BorderLeftColor
                | BorderTopLeftRadius
                | BorderTopRightRadius
                | BorderBottomLeftRadius
                | BorderBottomRightRadius
                | Cursor
                | Opacity
                | Transform
        )
    }
}

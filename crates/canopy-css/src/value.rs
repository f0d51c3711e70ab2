//! Property value primitives.
//!
//! Every CSS property payload in this crate is `Eq + Ord + Hash` so that
//! declarations can be deduplicated, sorted and used as map keys. Floating
//! point inputs are therefore stored as fixed-point [`FloatValue`]s
//! (scaled by 1000) rather than raw `f32`s.

use std::fmt;

/// The resolved-or-deferred state of a single property.
///
/// Wraps an exact payload with the CSS-wide keywords. `Inherit` is stored
/// as-is by the cascade; expanding it against an ancestor's cache is a
/// layout-time concern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyValue<T> {
    /// `auto` — the consumer picks a context-dependent value.
    Auto,
    /// `none` — the property is disabled.
    None,
    /// `initial` — reset to the property's initial value.
    Initial,
    /// `inherit` — take the parent's value (resolved downstream).
    Inherit,
    /// An exact value.
    Exact(T),
}

impl<T> PropertyValue<T> {
    /// Map the exact payload, keeping keywords untouched.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> PropertyValue<U> {
        match self {
            PropertyValue::Exact(t) => PropertyValue::Exact(f(t)),
            PropertyValue::Auto => PropertyValue::Auto,
            PropertyValue::None => PropertyValue::None,
            PropertyValue::Initial => PropertyValue::Initial,
            PropertyValue::Inherit => PropertyValue::Inherit,
        }
    }

    /// The exact payload, if any.
    #[inline]
    pub fn get_exact(&self) -> Option<&T> {
        match self {
            PropertyValue::Exact(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, PropertyValue::Exact(_))
    }

    #[inline]
    pub fn is_inherit(&self) -> bool {
        matches!(self, PropertyValue::Inherit)
    }
}

impl<T> From<T> for PropertyValue<T> {
    fn from(t: T) -> Self {
        PropertyValue::Exact(t)
    }
}

impl<T: fmt::Display> fmt::Display for PropertyValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Auto => write!(f, "auto"),
            PropertyValue::None => write!(f, "none"),
            PropertyValue::Initial => write!(f, "initial"),
            PropertyValue::Inherit => write!(f, "inherit"),
            PropertyValue::Exact(t) => write!(f, "{t}"),
        }
    }
}

/// Fixed-point float, scaled by 1000.
///
/// `FloatValue::from(1.5)` stores `1500`; this keeps property payloads
/// totally ordered and hashable.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloatValue {
    /// `value * 1000`.
    pub number: i64,
}

const FLOAT_SCALE: f32 = 1000.0;

impl FloatValue {
    pub const ZERO: FloatValue = FloatValue { number: 0 };

    #[inline]
    pub fn new(value: f32) -> Self {
        Self {
            number: (value * FLOAT_SCALE) as i64,
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.number as f32 / FLOAT_SCALE
    }
}

impl From<f32> for FloatValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Unit of a [`PixelValue`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeMetric {
    Px,
    Pt,
    Em,
    Percent,
}

impl fmt::Display for SizeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeMetric::Px => write!(f, "px"),
            SizeMetric::Pt => write!(f, "pt"),
            SizeMetric::Em => write!(f, "em"),
            SizeMetric::Percent => write!(f, "%"),
        }
    }
}

/// A length with a unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelValue {
    pub metric: SizeMetric,
    pub number: FloatValue,
}

impl PixelValue {
    pub const fn zero() -> Self {
        Self {
            metric: SizeMetric::Px,
            number: FloatValue::ZERO,
        }
    }

    #[inline]
    pub fn px(value: f32) -> Self {
        Self {
            metric: SizeMetric::Px,
            number: FloatValue::new(value),
        }
    }

    #[inline]
    pub fn pt(value: f32) -> Self {
        Self {
            metric: SizeMetric::Pt,
            number: FloatValue::new(value),
        }
    }

    #[inline]
    pub fn em(value: f32) -> Self {
        Self {
            metric: SizeMetric::Em,
            number: FloatValue::new(value),
        }
    }

    #[inline]
    pub fn percent(value: f32) -> Self {
        Self {
            metric: SizeMetric::Percent,
            number: FloatValue::new(value),
        }
    }
}

impl fmt::Display for PixelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.metric)
    }
}

/// A percentage (stored fixed-point, `50.0` = 50%).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PercentageValue {
    pub number: FloatValue,
}

impl PercentageValue {
    #[inline]
    pub fn new(value: f32) -> Self {
        Self {
            number: FloatValue::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.number.get()
    }
}

impl fmt::Display for PercentageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.number)
    }
}

/// An angle in degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AngleValue {
    pub degrees: FloatValue,
}

impl AngleValue {
    #[inline]
    pub fn deg(value: f32) -> Self {
        Self {
            degrees: FloatValue::new(value),
        }
    }
}

impl fmt::Display for AngleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.degrees)
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorU {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorU {
    pub const TRANSPARENT: ColorU = ColorU { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: ColorU = ColorU { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: ColorU = ColorU { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: ColorU = ColorU { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: ColorU = ColorU { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: ColorU = ColorU { r: 0, g: 0, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl fmt::Display for ColorU {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

macro_rules! keyword_enum {
    ($(#[$attr:meta])* $name:ident { $($(#[$vattr:meta])* $variant:ident => $css:literal),+ $(,)? }) => {
        $(#[$attr])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vattr])* $variant),+
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $css)),+
                }
            }
        }
    };
}

keyword_enum!(
    /// `display` keyword.
    LayoutDisplay {
        #[default]
        Flex => "flex",
        Block => "block",
        InlineBlock => "inline-block",
        None => "none",
    }
);

keyword_enum!(
    /// `position` keyword.
    LayoutPosition {
        #[default]
        Static => "static",
        Relative => "relative",
        Absolute => "absolute",
        Fixed => "fixed",
    }
);

keyword_enum!(
    /// `flex-direction` keyword.
    LayoutFlexDirection {
        Row => "row",
        RowReverse => "row-reverse",
        #[default]
        Column => "column",
        ColumnReverse => "column-reverse",
    }
);

keyword_enum!(
    /// `flex-wrap` keyword.
    LayoutFlexWrap {
        #[default]
        Wrap => "wrap",
        NoWrap => "nowrap",
    }
);

keyword_enum!(
    /// `justify-content` keyword.
    LayoutJustifyContent {
        #[default]
        Start => "flex-start",
        End => "flex-end",
        Center => "center",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
        SpaceEvenly => "space-evenly",
    }
);

keyword_enum!(
    /// `align-items` keyword.
    LayoutAlignItems {
        #[default]
        Stretch => "stretch",
        Center => "center",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
    }
);

keyword_enum!(
    /// `align-content` keyword.
    LayoutAlignContent {
        #[default]
        Stretch => "stretch",
        Center => "center",
        Start => "flex-start",
        End => "flex-end",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
    }
);

keyword_enum!(
    /// `box-sizing` keyword.
    LayoutBoxSizing {
        #[default]
        ContentBox => "content-box",
        BorderBox => "border-box",
    }
);

keyword_enum!(
    /// `overflow-x` / `overflow-y` keyword.
    LayoutOverflow {
        #[default]
        Auto => "auto",
        Visible => "visible",
        Hidden => "hidden",
        Scroll => "scroll",
    }
);

keyword_enum!(
    /// Border line style.
    BorderStyle {
        #[default]
        None => "none",
        Solid => "solid",
        Dotted => "dotted",
        Dashed => "dashed",
        Double => "double",
    }
);

keyword_enum!(
    /// Mouse cursor shown while hovering the node.
    StyleCursor {
        #[default]
        Default => "default",
        Pointer => "pointer",
        Text => "text",
        Crosshair => "crosshair",
        Grab => "grab",
        NotAllowed => "not-allowed",
    }
);

keyword_enum!(
    /// `text-align` keyword.
    StyleTextAlign {
        #[default]
        Left => "left",
        Center => "center",
        Right => "right",
        Justify => "justify",
    }
);

/// A single transform function.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTransform {
    Translate { x: PixelValue, y: PixelValue },
    Scale { x: FloatValue, y: FloatValue },
    Rotate(AngleValue),
}

impl fmt::Display for StyleTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleTransform::Translate { x, y } => write!(f, "translate({x}, {y})"),
            StyleTransform::Scale { x, y } => write!(f, "scale({x}, {y})"),
            StyleTransform::Rotate(a) => write!(f, "rotate({a})"),
        }
    }
}

/// Ordered list of transform functions (`transform: ...`).
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleTransformVec {
    pub transforms: Vec<StyleTransform>,
}

impl From<Vec<StyleTransform>> for StyleTransformVec {
    fn from(transforms: Vec<StyleTransform>) -> Self {
        Self { transforms }
    }
}

impl fmt::Display for StyleTransformVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.transforms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

/// Font family stack (`font-family: ...`), ordered by preference.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontFamilyVec {
    pub families: Vec<String>,
}

impl From<Vec<String>> for FontFamilyVec {
    fn from(families: Vec<String>) -> Self {
        Self { families }
    }
}

impl fmt::Display for FontFamilyVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, family) in self.families.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{family}")?;
        }
        Ok(())
    }
}

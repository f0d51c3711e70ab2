//! Per-node content: node type, ids and classes, callbacks, inline CSS.

use std::fmt;

use canopy_css::{CssProperty, NodeTypeTag};

use crate::payload::SharedPayload;

/// What a node renders as. Closed set; there are no custom elements.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// Container, the default node type.
    Div,
    /// The document root.
    Body,
    /// Line break.
    Br,
    /// A text run.
    Label(String),
    /// A decoded image, owned externally.
    Image(SharedPayload),
    /// A nested document produced by an external callback.
    IFrame(SharedPayload),
    /// An externally rendered GPU texture.
    GlTexture(SharedPayload),
}

impl NodeType {
    /// The element name this node type answers to in selectors.
    pub fn tag(&self) -> NodeTypeTag {
        match self {
            NodeType::Div => NodeTypeTag::Div,
            NodeType::Body => NodeTypeTag::Body,
            NodeType::Br => NodeTypeTag::Br,
            NodeType::Label(_) => NodeTypeTag::P,
            NodeType::Image(_) => NodeTypeTag::Img,
            NodeType::IFrame(_) => NodeTypeTag::IFrame,
            NodeType::GlTexture(_) => NodeTypeTag::Texture,
        }
    }
}

/// An `#id` or `.class` annotation on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdOrClass {
    Id(String),
    Class(String),
}

/// Keyboard-focus behavior of a node.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TabIndex {
    /// Focusable, ordered by document position.
    #[default]
    Auto,
    /// Focusable, ordered before all `Auto` siblings by the given index.
    OverrideInParent(u32),
    /// Never receives keyboard focus (but can still be clicked).
    NoKeyboardFocus,
}

/// Event classes a callback can subscribe to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventFilter {
    MouseDown,
    MouseUp,
    MouseOver,
    MouseOut,
    Click,
    Scroll,
    FocusReceived,
    FocusLost,
    TextInput,
    VirtualKeyDown,
    VirtualKeyUp,
}

/// Return value of an event callback.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Update {
    #[default]
    DoNothing,
    RefreshDom,
}

/// An event callback. Dispatch itself lives outside this crate; the
/// styling engine only cares that the callback exists, because its
/// presence makes the node hit-testable.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Callback {
    pub cb: fn(&mut SharedPayload) -> Update,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", self.cb as *const ())
    }
}

/// A callback registration on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackData {
    pub event: EventFilter,
    pub callback: Callback,
    pub data: SharedPayload,
}

/// An inline declaration, tagged with the pseudo-state it applies to.
///
/// Inline declarations participate in the cascade after all stylesheet
/// declarations, in the order they were added to the node.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineCssProperty {
    Normal(CssProperty),
    Hover(CssProperty),
    Active(CssProperty),
    Focus(CssProperty),
}

impl InlineCssProperty {
    pub fn property(&self) -> &CssProperty {
        match self {
            InlineCssProperty::Normal(p)
            | InlineCssProperty::Hover(p)
            | InlineCssProperty::Active(p)
            | InlineCssProperty::Focus(p) => p,
        }
    }
}

/// A clip mask applied to a node. The image is decoded externally; this
/// crate only retains the handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipMask {
    pub image: SharedPayload,
}

/// Everything a node carries besides its position in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    node_type: NodeType,
    dataset: Option<SharedPayload>,
    ids_and_classes: Vec<IdOrClass>,
    callbacks: Vec<CallbackData>,
    inline_css_props: Vec<InlineCssProperty>,
    clip_mask: Option<ClipMask>,
    tab_index: Option<TabIndex>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self::new(NodeType::Div)
    }
}

impl NodeData {
    pub const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            dataset: None,
            ids_and_classes: Vec::new(),
            callbacks: Vec::new(),
            inline_css_props: Vec::new(),
            clip_mask: None,
            tab_index: None,
        }
    }

    pub const fn div() -> Self {
        Self::new(NodeType::Div)
    }

    pub const fn body() -> Self {
        Self::new(NodeType::Body)
    }

    pub const fn br() -> Self {
        Self::new(NodeType::Br)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(NodeType::Label(text.into()))
    }

    pub fn image(image: SharedPayload) -> Self {
        Self::new(NodeType::Image(image))
    }

    pub fn iframe(iframe: SharedPayload) -> Self {
        Self::new(NodeType::IFrame(iframe))
    }

    pub fn gl_texture(texture: SharedPayload) -> Self {
        Self::new(NodeType::GlTexture(texture))
    }

    // builder methods

    pub fn with_dataset(mut self, dataset: SharedPayload) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids_and_classes.push(IdOrClass::Id(id.into()));
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.ids_and_classes.push(IdOrClass::Class(class.into()));
        self
    }

    pub fn with_ids_and_classes(mut self, ids_and_classes: Vec<IdOrClass>) -> Self {
        self.ids_and_classes = ids_and_classes;
        self
    }

    pub fn with_callback(
        mut self,
        event: EventFilter,
        callback: Callback,
        data: SharedPayload,
    ) -> Self {
        self.callbacks.push(CallbackData {
            event,
            callback,
            data,
        });
        self
    }

    pub fn with_inline_css(mut self, prop: InlineCssProperty) -> Self {
        self.inline_css_props.push(prop);
        self
    }

    pub fn with_inline_css_props(mut self, props: Vec<InlineCssProperty>) -> Self {
        self.inline_css_props = props;
        self
    }

    pub fn with_clip_mask(mut self, clip_mask: ClipMask) -> Self {
        self.clip_mask = Some(clip_mask);
        self
    }

    pub fn with_tab_index(mut self, tab_index: TabIndex) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    // accessors

    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    pub fn dataset(&self) -> Option<&SharedPayload> {
        self.dataset.as_ref()
    }

    pub fn ids_and_classes(&self) -> &[IdOrClass] {
        &self.ids_and_classes
    }

    pub fn callbacks(&self) -> &[CallbackData] {
        &self.callbacks
    }

    pub fn inline_css_props(&self) -> &[InlineCssProperty] {
        &self.inline_css_props
    }

    pub fn clip_mask(&self) -> Option<&ClipMask> {
        self.clip_mask.as_ref()
    }

    pub fn tab_index(&self) -> Option<TabIndex> {
        self.tab_index
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.ids_and_classes
            .iter()
            .any(|ioc| matches!(ioc, IdOrClass::Id(i) if i == id))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.ids_and_classes
            .iter()
            .any(|ioc| matches!(ioc, IdOrClass::Class(c) if c == class))
    }

    /// Whether the node takes part in keyboard focus traversal.
    pub fn is_keyboard_focusable(&self) -> bool {
        matches!(
            self.tab_index,
            Some(TabIndex::Auto) | Some(TabIndex::OverrideInParent(_))
        )
    }

    /// Whether the node needs a hit-test tag: it carries at least one
    /// callback or is keyboard-focusable.
    pub fn requires_hit_test_tag(&self) -> bool {
        !self.callbacks.is_empty() || self.is_keyboard_focusable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut SharedPayload) -> Update {
        Update::DoNothing
    }

    #[test]
    fn ids_and_classes_lookup() {
        let data = NodeData::div().with_id("main").with_class("wide");
        assert!(data.has_id("main"));
        assert!(!data.has_id("wide"));
        assert!(data.has_class("wide"));
        assert!(!data.has_class("main"));
    }

    #[test]
    fn hit_test_tag_requirement() {
        assert!(!NodeData::div().requires_hit_test_tag());

        let with_cb = NodeData::div().with_callback(
            EventFilter::Click,
            Callback { cb: noop },
            SharedPayload::new(()),
        );
        assert!(with_cb.requires_hit_test_tag());

        let focusable = NodeData::div().with_tab_index(TabIndex::Auto);
        assert!(focusable.requires_hit_test_tag());

        let opted_out = NodeData::div().with_tab_index(TabIndex::NoKeyboardFocus);
        assert!(!opted_out.requires_hit_test_tag());
    }

    #[test]
    fn node_type_tags() {
        assert_eq!(NodeType::Div.tag(), NodeTypeTag::Div);
        assert_eq!(NodeType::Label("hi".into()).tag(), NodeTypeTag::P);
    }
}

//! Fluent tree builder.
//!
//! A [`Dom`] is a nested value describing a subtree; [`Dom::build`]
//! flattens it into a [`NodeArena`] in document order (depth-first,
//! parents before children, siblings left to right).

use crate::arena::{NodeArena, NodeId};
use crate::node::{Callback, EventFilter, InlineCssProperty, NodeData, NodeType, TabIndex};
use crate::payload::SharedPayload;

/// A subtree under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dom {
    pub root: NodeData,
    pub children: Vec<Dom>,
}

impl Dom {
    pub fn new(node_type: NodeType) -> Self {
        Self {
            root: NodeData::new(node_type),
            children: Vec::new(),
        }
    }

    pub fn from_data(data: NodeData) -> Self {
        Self {
            root: data,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new(NodeType::Div)
    }

    pub fn body() -> Self {
        Self::new(NodeType::Body)
    }

    pub fn br() -> Self {
        Self::new(NodeType::Br)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(NodeType::Label(text.into()))
    }

    pub fn image(image: SharedPayload) -> Self {
        Self::new(NodeType::Image(image))
    }

    pub fn with_child(mut self, child: Dom) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Dom>) -> Self {
        self.children = children;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.root = self.root.with_id(id);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.root = self.root.with_class(class);
        self
    }

    pub fn with_dataset(mut self, dataset: SharedPayload) -> Self {
        self.root = self.root.with_dataset(dataset);
        self
    }

    pub fn with_inline_css(mut self, prop: InlineCssProperty) -> Self {
        self.root = self.root.with_inline_css(prop);
        self
    }

    pub fn with_tab_index(mut self, tab_index: TabIndex) -> Self {
        self.root = self.root.with_tab_index(tab_index);
        self
    }

    pub fn with_callback(
        mut self,
        event: EventFilter,
        callback: Callback,
        data: SharedPayload,
    ) -> Self {
        self.root = self.root.with_callback(event, callback, data);
        self
    }

    /// Total number of nodes in this subtree, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Dom::node_count).sum::<usize>()
    }

    /// Flatten into an arena in document order.
    pub fn build(self) -> NodeArena {
        let mut arena = NodeArena::with_root(self.root);
        let root = arena.root();
        for child in self.children {
            // children of the freshly built root always insert cleanly
            append_subtree(&mut arena, root, child);
        }
        arena
    }
}

fn append_subtree(arena: &mut NodeArena, parent: NodeId, dom: Dom) {
    let id = arena
        .insert(parent, dom.root)
        .unwrap_or_else(|_| unreachable!("parent id was produced by this arena"));
    for child in dom.children {
        append_subtree(arena, id, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn build_is_document_order() {
        //       body
        //      /    \
        //     a      d
        //    / \
        //   b   c
        let dom = Dom::body()
            .with_child(
                Dom::div()
                    .with_id("a")
                    .with_child(Dom::div().with_id("b"))
                    .with_child(Dom::div().with_id("c")),
            )
            .with_child(Dom::div().with_id("d"));

        assert_eq!(dom.node_count(), 5);

        let arena = dom.build();
        assert_eq!(arena.len(), 5);

        let ids: Vec<_> = (0..arena.len())
            .map(|i| {
                arena
                    .data(NodeId::new(i))
                    .unwrap()
                    .ids_and_classes()
                    .first()
                    .cloned()
            })
            .collect();
        use crate::node::IdOrClass::Id;
        assert_eq!(
            ids,
            vec![
                None,
                Some(Id("a".into())),
                Some(Id("b".into())),
                Some(Id("c".into())),
                Some(Id("d".into())),
            ]
        );

        // sibling structure survives the flattening
        let root_children: Vec<_> = arena.children_of(arena.root()).unwrap().collect();
        assert_eq!(root_children, vec![NodeId::new(1), NodeId::new(4)]);
        let a_children: Vec<_> = arena.children_of(NodeId::new(1)).unwrap().collect();
        assert_eq!(a_children, vec![NodeId::new(2), NodeId::new(3)]);
    }

    #[test]
    fn label_node_type() {
        let dom = Dom::label("hello");
        assert_eq!(
            dom.root.node_type(),
            &NodeType::Label("hello".to_string())
        );
    }
}

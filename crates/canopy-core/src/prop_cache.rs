//! Resolved property storage.
//!
//! The cascade runs one pass per active pseudo-state of a node and
//! stores, per pass, the complete resolved `(CssPropertyType, CssProperty)`
//! map. Lookups pick the bucket for the strongest active state
//! (Active > Focus > Hover > Normal) and fall through to the normal
//! bucket for properties the stronger bucket does not set.

use std::collections::BTreeMap;

use canopy_css::{Css, CssProperty, CssPropertyType, DynamicOverrides};
use tracing::trace;

use crate::arena::{NodeArena, NodeId};
use crate::error::Result;
use crate::node::InlineCssProperty;
use crate::style::{self, CascadeInfo};
use crate::styled_dom::NodeState;

/// A complete resolved property map for one node in one state, sorted
/// by property type.
pub type PropertyMap = Vec<(CssPropertyType, CssProperty)>;

/// Look up a property type in a sorted [`PropertyMap`].
fn map_get(map: &PropertyMap, ty: CssPropertyType) -> Option<&CssProperty> {
    map.binary_search_by_key(&ty, |(t, _)| *t)
        .ok()
        .map(|i| &map[i].1)
}

/// Resolved properties for every node, per pseudo-state pass.
///
/// Rebuilt whole; identical inputs produce an identical cache.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CssPropertyCache {
    normal: Vec<PropertyMap>,
    hover: BTreeMap<usize, PropertyMap>,
    active: BTreeMap<usize, PropertyMap>,
    focused: BTreeMap<usize, PropertyMap>,
}

impl CssPropertyCache {
    pub fn empty(node_count: usize) -> Self {
        Self {
            normal: vec![Vec::new(); node_count],
            hover: BTreeMap::new(),
            active: BTreeMap::new(),
            focused: BTreeMap::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.normal.len()
    }

    /// The resolved value of a property for a node in the given state.
    ///
    /// Checks the strongest active state's bucket first, then falls back
    /// to the normal bucket.
    pub fn get(
        &self,
        node_id: NodeId,
        state: &NodeState,
        ty: CssPropertyType,
    ) -> Option<&CssProperty> {
        let index = node_id.index();
        let stronger = if state.active {
            self.active.get(&index)
        } else if state.focused {
            self.focused.get(&index)
        } else if state.hover {
            self.hover.get(&index)
        } else {
            None
        };
        stronger
            .and_then(|map| map_get(map, ty))
            .or_else(|| self.normal.get(index).and_then(|map| map_get(map, ty)))
    }

    /// The effective map for a node in the given state: the normal
    /// bucket overlaid with the strongest active state's bucket.
    pub fn effective_map(&self, node_id: NodeId, state: &NodeState) -> PropertyMap {
        let index = node_id.index();
        let mut merged: BTreeMap<CssPropertyType, CssProperty> = self
            .normal
            .get(index)
            .map(|map| map.iter().cloned().collect())
            .unwrap_or_default();
        let stronger = if state.active {
            self.active.get(&index)
        } else if state.focused {
            self.focused.get(&index)
        } else if state.hover {
            self.hover.get(&index)
        } else {
            None
        };
        if let Some(map) = stronger {
            for (ty, prop) in map {
                merged.insert(*ty, prop.clone());
            }
        }
        merged.into_iter().collect()
    }

    pub fn normal_map(&self, node_id: NodeId) -> Option<&PropertyMap> {
        self.normal.get(node_id.index())
    }

    /// Re-resolve every bucket of a single node for its current state.
    ///
    /// Buckets for states no longer set on the node are dropped, so the
    /// cache never answers from a stale interactive bucket.
    pub fn restyle_node(
        &mut self,
        node_id: NodeId,
        state: &NodeState,
        arena: &NodeArena,
        cascade_info: &[CascadeInfo],
        css: &Css,
        overrides: &DynamicOverrides,
    ) -> Result<()> {
        let index = node_id.index();

        let normal_state = NodeState::default();
        self.normal[index] = resolve_pass(node_id, &normal_state, arena, cascade_info, css, overrides)?;

        self.hover.remove(&index);
        self.active.remove(&index);
        self.focused.remove(&index);
        if state.hover {
            let pass = NodeState { hover: true, ..NodeState::default() };
            let map = resolve_pass(node_id, &pass, arena, cascade_info, css, overrides)?;
            self.hover.insert(index, map);
        }
        if state.active {
            let pass = NodeState { active: true, ..NodeState::default() };
            let map = resolve_pass(node_id, &pass, arena, cascade_info, css, overrides)?;
            self.active.insert(index, map);
        }
        if state.focused {
            let pass = NodeState { focused: true, ..NodeState::default() };
            let map = resolve_pass(node_id, &pass, arena, cascade_info, css, overrides)?;
            self.focused.insert(index, map);
        }
        Ok(())
    }
}

/// One cascade pass: collect matching declarations for the node under
/// the given state vector, last write per property kind wins.
///
/// Order: stylesheet, then rule, then declaration position; inline
/// declarations come last, gated on the pass's state.
fn resolve_pass(
    node_id: NodeId,
    pass_state: &NodeState,
    arena: &NodeArena,
    cascade_info: &[CascadeInfo],
    css: &Css,
    overrides: &DynamicOverrides,
) -> Result<PropertyMap> {
    let mut merged: BTreeMap<CssPropertyType, CssProperty> = BTreeMap::new();

    for rule in css.rules() {
        if style::matches_node(&rule.path, node_id, arena, cascade_info, pass_state)? {
            for declaration in &rule.declarations {
                let prop = declaration.resolve(overrides);
                merged.insert(prop.get_type(), prop.clone());
            }
        }
    }

    for inline in arena.data(node_id)?.inline_css_props() {
        let applies = match inline {
            InlineCssProperty::Normal(_) => true,
            InlineCssProperty::Hover(_) => pass_state.hover,
            InlineCssProperty::Active(_) => pass_state.active,
            InlineCssProperty::Focus(_) => pass_state.focused,
        };
        if applies {
            let prop = inline.property();
            merged.insert(prop.get_type(), prop.clone());
        }
    }

    trace!(node = %node_id, properties = merged.len(), "cascade pass resolved");
    Ok(merged.into_iter().collect())
}

/// Build the full property cache for a document.
pub fn build_property_cache(
    arena: &NodeArena,
    cascade_info: &[CascadeInfo],
    states: &[NodeState],
    css: &Css,
    overrides: &DynamicOverrides,
) -> Result<CssPropertyCache> {
    let mut cache = CssPropertyCache::empty(arena.len());
    for index in 0..arena.len() {
        let node_id = NodeId::new(index);
        cache.restyle_node(node_id, &states[index], arena, cascade_info, css, overrides)?;
    }
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use crate::style::build_cascade_info;
    use canopy_css::{
        ColorU, CssPath, CssPathPseudoSelector, CssRuleBlock, DynamicCssProperty, PixelValue,
        Stylesheet,
    };

    fn normal_states(n: usize) -> Vec<NodeState> {
        vec![NodeState::default(); n]
    }

    #[test]
    fn later_rules_override_per_property() {
        let arena = Dom::body().with_child(Dom::div().with_class("x")).build();
        let info = build_cascade_info(&arena);

        let css = Css::from(Stylesheet::new(vec![
            CssRuleBlock::new(
                CssPath::new().class("x"),
                vec![
                    CssProperty::width(PixelValue::px(10.0)).into(),
                    CssProperty::height(PixelValue::px(20.0)).into(),
                ],
            ),
            CssRuleBlock::new(
                CssPath::new().class("x"),
                vec![CssProperty::width(PixelValue::px(99.0)).into()],
            ),
        ]));

        let cache = build_property_cache(
            &arena,
            &info,
            &normal_states(arena.len()),
            &css,
            &DynamicOverrides::new(),
        )
        .unwrap();

        let node = NodeId::new(1);
        let state = NodeState::default();
        // width taken from the later rule, height survives from the earlier
        assert_eq!(
            cache.get(node, &state, CssPropertyType::Width),
            Some(&CssProperty::width(PixelValue::px(99.0)))
        );
        assert_eq!(
            cache.get(node, &state, CssPropertyType::Height),
            Some(&CssProperty::height(PixelValue::px(20.0)))
        );
    }

    #[test]
    fn cache_rebuild_is_bit_identical() {
        let arena = Dom::body()
            .with_child(Dom::div().with_class("x"))
            .with_child(Dom::div())
            .build();
        let info = build_cascade_info(&arena);
        let css = Css::from(Stylesheet::new(vec![CssRuleBlock::new(
            CssPath::new().global(),
            vec![CssProperty::background_color(ColorU::RED).into()],
        )]));

        let states = normal_states(arena.len());
        let overrides = DynamicOverrides::new();
        let first = build_property_cache(&arena, &info, &states, &css, &overrides).unwrap();
        let second = build_property_cache(&arena, &info, &states, &css, &overrides).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hover_pass_only_runs_when_flag_set() {
        let arena = Dom::body().with_child(Dom::div()).build();
        let info = build_cascade_info(&arena);
        let css = Css::from(Stylesheet::new(vec![CssRuleBlock::new(
            CssPath::new().global().pseudo(CssPathPseudoSelector::Hover),
            vec![CssProperty::background_color(ColorU::BLUE).into()],
        )]));

        let node = NodeId::new(1);
        let overrides = DynamicOverrides::new();

        let plain = build_property_cache(&arena, &info, &normal_states(2), &css, &overrides).unwrap();
        let hovered_state = NodeState { hover: true, ..NodeState::default() };
        assert_eq!(plain.get(node, &hovered_state, CssPropertyType::BackgroundColor), None);

        let mut states = normal_states(2);
        states[1] = hovered_state;
        let hovered = build_property_cache(&arena, &info, &states, &css, &overrides).unwrap();
        assert_eq!(
            hovered.get(node, &hovered_state, CssPropertyType::BackgroundColor),
            Some(&CssProperty::background_color(ColorU::BLUE))
        );
        // the normal bucket stays clean
        assert_eq!(
            hovered.get(node, &NodeState::default(), CssPropertyType::BackgroundColor),
            None
        );
    }

    #[test]
    fn rule_requiring_two_interactive_states_never_matches() {
        let arena = Dom::body().with_child(Dom::div()).build();
        let info = build_cascade_info(&arena);
        // `*:hover:focus` demands two simultaneous interactive states;
        // passes carry normal plus exactly one, so it can never apply
        let css = Css::from(Stylesheet::new(vec![CssRuleBlock::new(
            CssPath::new()
                .global()
                .pseudo(CssPathPseudoSelector::Hover)
                .pseudo(CssPathPseudoSelector::Focus),
            vec![CssProperty::background_color(ColorU::RED).into()],
        )]));

        let node = NodeId::new(1);
        let both = NodeState {
            hover: true,
            focused: true,
            ..NodeState::default()
        };
        let mut states = normal_states(2);
        states[1] = both;

        let cache =
            build_property_cache(&arena, &info, &states, &css, &DynamicOverrides::new()).unwrap();
        assert_eq!(cache.get(node, &both, CssPropertyType::BackgroundColor), None);
        assert!(cache.effective_map(node, &both).is_empty());

        // the same holds when the flags arrive through a restyle
        let dom = Dom::body().with_child(Dom::div());
        let mut styled = crate::styled_dom::StyledDom::style(dom, css, DynamicOverrides::new());
        styled.restyle_nodes_hover(&[node], true).unwrap();
        assert!(styled.restyle_nodes_focus(&[node], true).unwrap().is_empty());
        assert_eq!(
            styled
                .get_property(node, CssPropertyType::BackgroundColor)
                .unwrap(),
            None
        );
    }

    #[test]
    fn dynamic_override_applied_at_merge_time() {
        let arena = Dom::body().build();
        let info = build_cascade_info(&arena);
        let css = Css::from(Stylesheet::new(vec![CssRuleBlock::new(
            CssPath::new().global(),
            vec![canopy_css::CssDeclaration::Dynamic(DynamicCssProperty {
                dynamic_id: "accent".to_string(),
                default_value: CssProperty::background_color(ColorU::BLUE),
            })],
        )]));

        let states = normal_states(1);
        let node = arena.root();
        let state = NodeState::default();

        let defaulted =
            build_property_cache(&arena, &info, &states, &css, &DynamicOverrides::new()).unwrap();
        assert_eq!(
            defaulted.get(node, &state, CssPropertyType::BackgroundColor),
            Some(&CssProperty::background_color(ColorU::BLUE))
        );

        let overrides =
            DynamicOverrides::new().with("accent", CssProperty::background_color(ColorU::GREEN));
        let overridden =
            build_property_cache(&arena, &info, &states, &css, &overrides).unwrap();
        assert_eq!(
            overridden.get(node, &state, CssPropertyType::BackgroundColor),
            Some(&CssProperty::background_color(ColorU::GREEN))
        );
    }

    #[test]
    fn inline_beats_stylesheet() {
        let arena = Dom::body()
            .with_child(
                Dom::div()
                    .with_class("x")
                    .with_inline_css(InlineCssProperty::Normal(CssProperty::width(
                        PixelValue::px(5.0),
                    ))),
            )
            .build();
        let info = build_cascade_info(&arena);
        let css = Css::from(Stylesheet::new(vec![CssRuleBlock::new(
            CssPath::new().class("x"),
            vec![CssProperty::width(PixelValue::px(500.0)).into()],
        )]));

        let cache = build_property_cache(
            &arena,
            &info,
            &normal_states(2),
            &css,
            &DynamicOverrides::new(),
        )
        .unwrap();
        assert_eq!(
            cache.get(NodeId::new(1), &NodeState::default(), CssPropertyType::Width),
            Some(&CssProperty::width(PixelValue::px(5.0)))
        );
    }
}

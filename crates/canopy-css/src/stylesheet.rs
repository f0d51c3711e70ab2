//! Rule blocks, stylesheets and dynamic property overrides.

use std::collections::BTreeMap;
use std::fmt;

use crate::path::CssPath;
use crate::property::CssProperty;

/// A property that can be swapped at runtime without re-parsing CSS.
///
/// The `dynamic_id` names the slot; if no override for the id is
/// registered, `default_value` applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DynamicCssProperty {
    pub dynamic_id: String,
    pub default_value: CssProperty,
}

/// A single declaration inside a rule block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CssDeclaration {
    Static(CssProperty),
    Dynamic(DynamicCssProperty),
}

impl CssDeclaration {
    /// The property key this declaration sets.
    pub fn get_type(&self) -> crate::property::CssPropertyType {
        match self {
            CssDeclaration::Static(prop) => prop.get_type(),
            CssDeclaration::Dynamic(dynamic) => dynamic.default_value.get_type(),
        }
    }

    /// Resolve against the registered overrides.
    ///
    /// Static declarations ignore the overrides. A dynamic declaration
    /// takes the override registered under its id, falling back to its
    /// default; an override of a different property kind than the
    /// default is ignored.
    pub fn resolve<'a>(&'a self, overrides: &'a DynamicOverrides) -> &'a CssProperty {
        match self {
            CssDeclaration::Static(prop) => prop,
            CssDeclaration::Dynamic(dynamic) => match overrides.get(&dynamic.dynamic_id) {
                Some(prop) if prop.get_type() == dynamic.default_value.get_type() => prop,
                _ => &dynamic.default_value,
            },
        }
    }
}

impl From<CssProperty> for CssDeclaration {
    fn from(prop: CssProperty) -> Self {
        CssDeclaration::Static(prop)
    }
}

/// Runtime values for dynamic declarations, keyed by dynamic id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DynamicOverrides {
    overrides: BTreeMap<String, CssProperty>,
}

impl DynamicOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dynamic_id: impl Into<String>, value: CssProperty) {
        self.overrides.insert(dynamic_id.into(), value);
    }

    pub fn get(&self, dynamic_id: &str) -> Option<&CssProperty> {
        self.overrides.get(dynamic_id)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Builder-style insert.
    pub fn with(mut self, dynamic_id: impl Into<String>, value: CssProperty) -> Self {
        self.insert(dynamic_id, value);
        self
    }
}

/// A selector path plus its declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CssRuleBlock {
    pub path: CssPath,
    pub declarations: Vec<CssDeclaration>,
}

impl CssRuleBlock {
    pub fn new(path: CssPath, declarations: Vec<CssDeclaration>) -> Self {
        Self { path, declarations }
    }
}

impl fmt::Display for CssRuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.path)?;
        for declaration in &self.declarations {
            match declaration {
                CssDeclaration::Static(prop) => writeln!(f, "    {prop}")?,
                CssDeclaration::Dynamic(dynamic) => writeln!(
                    f,
                    "    {}: [[ {} | {} ]];",
                    dynamic.default_value.get_type(),
                    dynamic.dynamic_id,
                    dynamic.default_value,
                )?,
            }
        }
        write!(f, "}}")
    }
}

/// An ordered list of rule blocks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<CssRuleBlock>,
}

impl Stylesheet {
    pub fn new(rules: Vec<CssRuleBlock>) -> Self {
        Self { rules }
    }
}

impl From<Vec<CssRuleBlock>> for Stylesheet {
    fn from(rules: Vec<CssRuleBlock>) -> Self {
        Self { rules }
    }
}

/// The complete CSS of a document: stylesheets in application order.
///
/// Within the cascade, later stylesheets win over earlier ones, and
/// within a stylesheet later rules win. There is no specificity
/// weighting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Css {
    pub stylesheets: Vec<Stylesheet>,
}

impl Css {
    /// A CSS document with no rules at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(stylesheets: Vec<Stylesheet>) -> Self {
        Self { stylesheets }
    }

    pub fn append(&mut self, stylesheet: Stylesheet) {
        self.stylesheets.push(stylesheet);
    }

    /// All rule blocks, in cascade order.
    pub fn rules(&self) -> impl Iterator<Item = &CssRuleBlock> {
        self.stylesheets.iter().flat_map(|s| s.rules.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.stylesheets.iter().all(|s| s.rules.is_empty())
    }
}

impl From<Stylesheet> for Css {
    fn from(stylesheet: Stylesheet) -> Self {
        Self {
            stylesheets: vec![stylesheet],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::CssPropertyType;
    use crate::value::{ColorU, PixelValue};

    #[test]
    fn dynamic_declaration_resolution() {
        let decl = CssDeclaration::Dynamic(DynamicCssProperty {
            dynamic_id: "accent".to_string(),
            default_value: CssProperty::background_color(ColorU::BLUE),
        });

        let empty = DynamicOverrides::new();
        assert_eq!(
            decl.resolve(&empty),
            &CssProperty::background_color(ColorU::BLUE)
        );

        let overrides =
            DynamicOverrides::new().with("accent", CssProperty::background_color(ColorU::RED));
        assert_eq!(
            decl.resolve(&overrides),
            &CssProperty::background_color(ColorU::RED)
        );
    }

    #[test]
    fn mismatched_override_kind_falls_back_to_default() {
        let decl = CssDeclaration::Dynamic(DynamicCssProperty {
            dynamic_id: "accent".to_string(),
            default_value: CssProperty::background_color(ColorU::BLUE),
        });
        let overrides =
            DynamicOverrides::new().with("accent", CssProperty::width(PixelValue::px(10.0)));
        assert_eq!(
            decl.resolve(&overrides),
            &CssProperty::background_color(ColorU::BLUE)
        );
    }

    #[test]
    fn rules_iterate_in_cascade_order() {
        let first = CssRuleBlock::new(
            CssPath::new().global(),
            vec![CssProperty::width(PixelValue::px(1.0)).into()],
        );
        let second = CssRuleBlock::new(
            CssPath::new().global(),
            vec![CssProperty::width(PixelValue::px(2.0)).into()],
        );
        let css = Css::new(vec![
            Stylesheet::new(vec![first.clone()]),
            Stylesheet::new(vec![second.clone()]),
        ]);
        let collected: Vec<_> = css.rules().collect();
        assert_eq!(collected, vec![&first, &second]);
        assert_eq!(collected[0].declarations[0].get_type(), CssPropertyType::Width);
    }
}

use std::collections::BTreeMap;

use crate::entity::EntityVariant;

/// What to do with one key of the config tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Descend into the sub-mapping with a nested schema.
    Recurse(Schema),
    /// Build one entity of this variant per `(name, attributes)` entry.
    Construct(EntityVariant),
}

/// Maps config keys to composition directives.
///
/// A key with neither an exact directive nor a `default` is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    directives: BTreeMap<String, SchemaNode>,
    default: Option<Box<SchemaNode>>,
}

impl Schema {
    /// An empty schema that matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema used for game files:
    /// `items.weapon` → Weapon, `items.wearable` → Wearable, any other
    /// `items.*` → Item.
    pub fn standard() -> Self {
        Self::new().recurse(
            "items",
            Self::new()
                .construct("weapon", EntityVariant::Weapon)
                .construct("wearable", EntityVariant::Wearable)
                .default_to(SchemaNode::Construct(EntityVariant::Item)),
        )
    }

    /// Add a nested schema under `key`.
    pub fn recurse(mut self, key: impl Into<String>, schema: Schema) -> Self {
        self.directives
            .insert(key.into(), SchemaNode::Recurse(schema));
        self
    }

    /// Build entities of `variant` for everything under `key`.
    pub fn construct(mut self, key: impl Into<String>, variant: EntityVariant) -> Self {
        self.directives
            .insert(key.into(), SchemaNode::Construct(variant));
        self
    }

    /// Directive for keys without an exact match.
    pub fn default_to(mut self, node: SchemaNode) -> Self {
        self.default = Some(Box::new(node));
        self
    }

    /// The directive for `key`: the exact match, else the default.
    pub fn directive(&self, key: &str) -> Option<&SchemaNode> {
        self.directives.get(key).or(self.default.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins_over_default() {
        let schema = Schema::new()
            .construct("weapon", EntityVariant::Weapon)
            .default_to(SchemaNode::Construct(EntityVariant::Item));
        assert_eq!(
            schema.directive("weapon"),
            Some(&SchemaNode::Construct(EntityVariant::Weapon))
        );
        assert_eq!(
            schema.directive("potion"),
            Some(&SchemaNode::Construct(EntityVariant::Item))
        );
    }

    #[test]
    fn no_default_means_no_directive() {
        let schema = Schema::new().construct("weapon", EntityVariant::Weapon);
        assert!(schema.directive("potion").is_none());
    }

    #[test]
    fn standard_schema_shape() {
        let schema = Schema::standard();
        let Some(SchemaNode::Recurse(items)) = schema.directive("items") else {
            panic!("items should recurse");
        };
        assert_eq!(
            items.directive("wearable"),
            Some(&SchemaNode::Construct(EntityVariant::Wearable))
        );
        assert_eq!(
            items.directive("scroll"),
            Some(&SchemaNode::Construct(EntityVariant::Item))
        );
        assert!(schema.directive("monsters").is_none());
    }
}

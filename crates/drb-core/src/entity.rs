use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::condition::{self, EvalContext};
use crate::error::{DrbError, DrbResult};
use crate::value::Value;
use crate::world::WorldState;

/// Description used when the game file gives none.
pub const DEFAULT_DESCRIPTION: &str = "Nothing interesting";

/// Attribute keys that map onto fixed entity fields.
const FIXED_ATTRIBUTES: [&str; 2] = ["description", "conditions"];

/// Unique identifier for every constructed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generate a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The closed set of entity variants a schema can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityVariant {
    /// Something to fight with.
    Weapon,
    /// Something to put on.
    Wearable,
    /// Anything else.
    Item,
}

impl EntityVariant {
    /// Lowercase name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Wearable => "wearable",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for EntityVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened when an entity was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// A weapon was taken in hand.
    Wielded,
    /// A wearable was put on.
    Equipped,
}

/// A game object built from one leaf of the config tree.
///
/// Entities never change after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// Which constructor built it.
    pub variant: EntityVariant,
    /// Name, unique among its siblings.
    pub name: String,
    /// The config key it was constructed under (e.g. `"weapon"`).
    pub kind: String,
    /// Free-text description.
    pub description: String,
    /// Whether all conditions held at construction time.
    pub available: bool,
    /// The raw attribute mapping from the game file.
    pub attributes: BTreeMap<String, Value>,
    /// Attributes that are not fixed fields.
    pub extra: BTreeMap<String, Value>,
}

impl Entity {
    /// Build an entity and evaluate its conditions against `world`.
    ///
    /// Never fails: a malformed condition counts as `false`. While the
    /// conditions run, `$self` refers to this entity.
    pub fn construct(
        variant: EntityVariant,
        name: impl Into<String>,
        attributes: &BTreeMap<String, Value>,
        kind: impl Into<String>,
        world: &WorldState,
    ) -> Self {
        let description = attributes
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string();
        let extra = attributes
            .iter()
            .filter(|(k, _)| !FIXED_ATTRIBUTES.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut entity = Self {
            id: EntityId::new(),
            variant,
            name: name.into(),
            kind: kind.into(),
            description,
            available: true,
            attributes: attributes.clone(),
            extra,
        };

        if let Some(conditions) = attributes.get("conditions") {
            let ctx = EvalContext::new(world).with_self(&entity);
            let available = match conditions {
                Value::String(raw) => condition::evaluate_str(raw, &ctx),
                Value::List(items) => items.iter().all(|item| match item.as_str() {
                    Some(raw) => condition::evaluate_str(raw, &ctx),
                    None => {
                        tracing::warn!(entity = %entity.name, %item, "condition is not a string");
                        false
                    }
                }),
                other => {
                    tracing::warn!(entity = %entity.name, %other, "conditions must be a list");
                    false
                }
            };
            entity.available = available;
        }

        tracing::debug!(
            kind = %entity.kind,
            name = %entity.name,
            available = entity.available,
            "constructed entity"
        );
        entity
    }

    /// One-line rendering: `<kind>.<name> (Equippable: <available>): <description>`.
    pub fn describe(&self) -> String {
        format!(
            "{}.{} (Equippable: {}): {}",
            self.kind, self.name, self.available, self.description
        )
    }

    /// Use the entity. Behaviour depends on the variant.
    pub fn use_in(&self, world: &mut WorldState) -> DrbResult<UseOutcome> {
        if !self.available {
            return Err(DrbError::Unavailable(self.name.clone()));
        }
        match self.variant {
            EntityVariant::Weapon => Ok(UseOutcome::Wielded),
            EntityVariant::Wearable => {
                if world.player.carries(&self.name) {
                    world.equip(&self.name)?;
                } else if !world.player.has_equipped(&self.name) {
                    world.player.equipped.push(self.clone());
                }
                Ok(UseOutcome::Equipped)
            }
            EntityVariant::Item => Err(DrbError::NotUsable(self.name.clone())),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

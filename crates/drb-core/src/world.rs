use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::error::{DrbError, DrbResult};
use crate::value::Value;

/// Starting values for the player.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// The player's alliance (e.g. `"good"`).
    pub alliance: String,
    /// The player's level.
    pub level: i64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            alliance: "good".to_string(),
            level: 10,
        }
    }
}

impl PlayerConfig {
    /// Set the player's alliance.
    pub fn with_alliance(mut self, alliance: impl Into<String>) -> Self {
        self.alliance = alliance.into();
        self
    }

    /// Set the player's level.
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }
}

/// The player as seen by conditions (`$player.*`).
#[derive(Debug, Clone)]
pub struct Player {
    /// Alliance name.
    pub alliance: String,
    /// Current level.
    pub level: i64,
    /// Carried entities, in pickup order.
    pub backpack: Vec<Entity>,
    /// Equipped entities, in equip order.
    pub equipped: Vec<Entity>,
}

impl Player {
    /// Whether the backpack holds an entity with this name.
    pub fn carries(&self, name: &str) -> bool {
        self.backpack.iter().any(|e| e.name == name)
    }

    /// Whether an entity with this name is equipped.
    pub fn has_equipped(&self, name: &str) -> bool {
        self.equipped.iter().any(|e| e.name == name)
    }
}

/// All player and game facts that conditions can read.
///
/// Readers borrow `&WorldState`; anything that changes it needs
/// `&mut WorldState`. Composition only reads, so a single owner can run
/// many compositions and apply gameplay mutations in between.
#[derive(Debug, Clone)]
pub struct WorldState {
    /// The player.
    pub player: Player,
    /// Entities that conditions can reference by name (`$entities.<name>`).
    entities: BTreeMap<String, Entity>,
    /// Free-form variables reachable by their top-level key.
    vars: BTreeMap<String, Value>,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl WorldState {
    /// Create a world holding only a player built from `config`.
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            player: Player {
                alliance: config.alliance,
                level: config.level,
                backpack: Vec::new(),
                equipped: Vec::new(),
            },
            entities: BTreeMap::new(),
            vars: BTreeMap::new(),
        }
    }

    /// Make an entity referenceable by name. Replaces any entity of the same name.
    ///
    /// Library API for embedders that track entities across compositions;
    /// the `drb` binary starts every run with an empty registry.
    pub fn register(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.name.clone(), entity)
    }

    /// Look up a registered entity.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Set a free-form variable.
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Read a free-form variable.
    pub fn var(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Put an entity into the player's backpack.
    pub fn pick_up(&mut self, entity: Entity) {
        tracing::debug!(name = %entity.name, "picked up");
        self.player.backpack.push(entity);
    }

    /// Move an entity from the backpack to the equipped list.
    pub fn equip(&mut self, name: &str) -> DrbResult<()> {
        let pos = self
            .player
            .backpack
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| DrbError::EntityNotFound(name.to_string()))?;
        let entity = self.player.backpack.remove(pos);
        self.player.equipped.push(entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityVariant;

    fn dagger(world: &WorldState) -> Entity {
        Entity::construct(
            EntityVariant::Weapon,
            "dagger",
            &BTreeMap::new(),
            "weapon",
            world,
        )
    }

    #[test]
    fn default_player_matches_starting_world() {
        let world = WorldState::default();
        assert_eq!(world.player.alliance, "good");
        assert_eq!(world.player.level, 10);
        assert!(world.player.backpack.is_empty());
        assert!(world.player.equipped.is_empty());
    }

    #[test]
    fn config_builder_chain() {
        let world = WorldState::new(PlayerConfig::default().with_alliance("evil").with_level(3));
        assert_eq!(world.player.alliance, "evil");
        assert_eq!(world.player.level, 3);
    }

    #[test]
    fn equip_moves_from_backpack() {
        let mut world = WorldState::default();
        let item = dagger(&world);
        world.pick_up(item);
        assert!(world.player.carries("dagger"));

        world.equip("dagger").unwrap();
        assert!(!world.player.carries("dagger"));
        assert!(world.player.has_equipped("dagger"));
    }

    #[test]
    fn equip_missing_fails() {
        let mut world = WorldState::default();
        assert!(matches!(
            world.equip("nothing"),
            Err(DrbError::EntityNotFound(name)) if name == "nothing"
        ));
    }

    #[test]
    fn register_replaces_same_name() {
        let mut world = WorldState::default();
        let first = dagger(&world);
        assert!(world.register(first).is_none());
        let second = dagger(&world);
        assert!(world.register(second).is_some());
        assert_eq!(world.entity("dagger").unwrap().kind, "weapon");
    }
}

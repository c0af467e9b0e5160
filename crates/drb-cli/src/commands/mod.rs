pub mod eval;
pub mod inspect;
pub mod list;

use drb_core::{Composition, PlayerConfig, Schema, Value, WorldState, compose, load_config};

use crate::GameArgs;

/// Build the starting world from the command-line overrides.
fn world(args: &GameArgs) -> WorldState {
    let mut config = PlayerConfig::default();
    if let Some(level) = args.level {
        config = config.with_level(level);
    }
    if let Some(alliance) = &args.alliance {
        config = config.with_alliance(alliance.clone());
    }
    let mut world = WorldState::new(config);
    for (key, raw) in &args.vars {
        world.set_var(key.clone(), Value::parse_scalar(raw));
    }
    world
}

/// Load the game file and compose it with the standard schema.
fn compose_game(args: &GameArgs) -> Result<Composition, String> {
    let tree = load_config(&args.file).map_err(|e| e.to_string())?;
    compose(&tree, &Schema::standard(), &world(args)).map_err(|e| e.to_string())
}

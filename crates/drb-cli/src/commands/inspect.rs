use colored::Colorize;
use drb_core::Entity;

use crate::GameArgs;

pub fn run(args: &GameArgs, name: &str) -> Result<(), String> {
    let composition = super::compose_game(args)?;

    let entity: &Entity = match composition.entities.find(name) {
        Some(entity) => entity,
        None => {
            let matches = composition.entities.find_by_name(name);
            match matches.as_slice() {
                [] => return Err(format!("entity not found: \"{name}\"")),
                [only] => *only,
                _ => {
                    return Err(format!(
                        "\"{name}\" is ambiguous ({} matches); use a dotted path",
                        matches.len()
                    ));
                }
            }
        }
    };

    println!("  {} [{}]", entity.name.bold(), entity.kind.dimmed());
    println!();
    println!("  {}", entity.description);
    println!();
    println!("  variant:    {}", entity.variant);
    let available = if entity.available {
        "yes".green()
    } else {
        "no".red()
    };
    println!("  equippable: {available}");

    if let Some(conditions) = entity.attributes.get("conditions") {
        println!("  conditions: {conditions}");
    }

    for (key, value) in &entity.extra {
        println!("  {key}: {value}");
    }

    Ok(())
}

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::GameArgs;

pub fn run(args: &GameArgs, kind: Option<&str>) -> Result<(), String> {
    let composition = super::compose_game(args)?;

    let entities: Vec<_> = composition
        .entities
        .entities()
        .into_iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .collect();

    if entities.is_empty() {
        println!("  No entities found.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "Kind", "Equippable", "Description"]);

        for entity in &entities {
            let desc = if entity.description.chars().count() > 60 {
                let head: String = entity.description.chars().take(57).collect();
                format!("{head}...")
            } else {
                entity.description.clone()
            };
            table.add_row(vec![
                entity.name.clone(),
                entity.kind.clone(),
                entity.available.to_string(),
                desc,
            ]);
        }

        println!("{table}");
        println!();
        println!("  {} entities", entities.len());
    }

    if !composition.skipped.is_empty() {
        println!(
            "  {} skipped (no schema entry): {}",
            composition.skipped.len(),
            composition.skipped.join(", ").dimmed()
        );
    }

    Ok(())
}

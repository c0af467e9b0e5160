use drb_core::{Condition, EvalContext};

use crate::GameArgs;

pub fn run(args: &GameArgs, source: &str) -> Result<(), String> {
    let world = super::world(args);
    let condition = Condition::parse(source).map_err(|e| e.to_string())?;
    let result = condition.evaluate(&EvalContext::new(&world));
    println!("  {condition} => {result}");
    Ok(())
}

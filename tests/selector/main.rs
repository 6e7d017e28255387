//! Integration tests for entity selectors
//!
//! Parses selectors with the standard option set and resolves them against
//! the sample demo world: Alex, Steve, two pigs, a cow and a zombie in the
//! overworld, Notch and a ghast in the nether.

mod arguments;
mod parsing;
mod resolution;

use std::sync::Arc;

use sigil_arguments::{EntityRef, EntitySelector, EntitySelectorParser, Vec3};
use sigil_foundation::{CommandResult, StringReader};
use sigil_runtime::{DemoSource, DemoWorld};

/// Parses `input` with selectors allowed.
pub fn parse(input: &str) -> CommandResult<EntitySelector> {
    let mut reader = StringReader::new(input);
    EntitySelectorParser::new(&mut reader, true).parse()
}

/// A fresh sample world.
pub fn world() -> Arc<DemoWorld> {
    Arc::new(DemoWorld::sample().unwrap())
}

/// The console standing where Alex spawns.
pub fn console(world: Arc<DemoWorld>) -> DemoSource {
    DemoSource::console(world).with_position(Vec3::new(0.0, 64.0, 0.0))
}

/// Names of the found entities, in result order.
pub fn names(found: &[EntityRef]) -> Vec<String> {
    found.iter().map(|entity| entity.name()).collect()
}

/// Parses `input` and resolves it for `source`.
pub fn select(source: &DemoSource, input: &str) -> Vec<String> {
    names(&parse(input).unwrap().find_entities(source).unwrap())
}

//! Integration tests for coordinate arguments
//!
//! Parses positions, block positions, columns and rotations through a real
//! dispatcher and resolves them against demo sources at various places and
//! facings.

mod local;
mod resolution;
mod world;

use std::sync::Arc;

use sigil_arguments::{Vec2, Vec3};
use sigil_runtime::{DemoSource, DemoWorld};

/// A console source standing at `position` and facing `rotation`.
pub fn source_at(position: Vec3, rotation: Vec2) -> DemoSource {
    let world = Arc::new(DemoWorld::sample().unwrap());
    DemoSource::console(world)
        .with_position(position)
        .with_rotation(rotation)
}

/// Asserts two positions agree to within float rounding.
pub fn assert_close(actual: Vec3, expected: Vec3) {
    let delta = (actual.x - expected.x).abs()
        + (actual.y - expected.y).abs()
        + (actual.z - expected.z).abs();
    assert!(delta < 1e-4, "expected {expected:?}, got {actual:?}");
}

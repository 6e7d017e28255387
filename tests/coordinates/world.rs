//! Absolute and `~` coordinates

use sigil_arguments::coordinates::{POS_MISSING_INT, POS_MIXED, POS3D_INCOMPLETE};
use sigil_arguments::{
    BlockPos, Coordinates, Vec2, Vec3, WorldCoordinate, WorldCoordinates, block_pos, vec3,
};
use sigil_dispatch::ArgumentType;
use sigil_foundation::StringReader;

use crate::source_at;

fn parse<T: ArgumentType>(argument: &T, input: &str) -> sigil_foundation::CommandResult<T::Value> {
    argument.parse(&mut StringReader::new(input))
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn absolute_block_pos() {
    let coordinates = parse(&block_pos(), "0 0 0").unwrap();
    let absolute = WorldCoordinate::new(false, 0.0);
    assert_eq!(
        coordinates,
        Coordinates::World(WorldCoordinates::new(absolute, absolute, absolute))
    );
    assert!(!coordinates.is_x_relative());
}

#[test]
fn relative_components() {
    let coordinates = parse(&vec3(), "~ ~1.5 ~-2").unwrap();
    assert!(coordinates.is_x_relative());
    assert!(coordinates.is_y_relative());
    assert!(coordinates.is_z_relative());
    let Coordinates::World(world) = coordinates else {
        panic!("expected world coordinates");
    };
    assert_eq!(world.x, WorldCoordinate::current());
    assert_eq!(world.y.value(), 1.5);
    assert_eq!(world.z.value(), -2.0);
}

#[test]
fn mixed_absolute_and_relative() {
    let coordinates = parse(&vec3(), "~ 64 ~").unwrap();
    assert!(coordinates.is_x_relative());
    assert!(!coordinates.is_y_relative());
}

#[test]
fn reader_stops_after_third_component() {
    let mut reader = StringReader::new("1 2 3 rest");
    vec3().parse(&mut reader).unwrap();
    assert_eq!(reader.remaining(), " rest");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn caret_after_world_component_is_mixed() {
    let err = parse(&vec3(), "~ ^ ~").unwrap_err();
    assert!(err.is(&POS_MIXED));
}

#[test]
fn too_few_components() {
    let err = parse(&vec3(), "1 2").unwrap_err();
    assert!(err.is(&POS3D_INCOMPLETE));
    assert_eq!(err.cursor(), Some(0));
}

#[test]
fn block_pos_rejects_fraction() {
    assert!(parse(&block_pos(), "1.5 2 3").is_err());
    assert!(parse(&block_pos(), "~1.5 2 3").is_ok());
}

#[test]
fn empty_block_pos() {
    let err = parse(&block_pos(), "").unwrap_err();
    assert!(err.is(&POS_MISSING_INT));
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn relative_resolves_against_source() {
    let source = source_at(Vec3::new(10.0, 64.0, 10.0), Vec2::ZERO);
    let coordinates = parse(&block_pos(), "~ ~ ~").unwrap();
    assert_eq!(coordinates.block_pos(&source), BlockPos::new(10, 64, 10));

    let coordinates = parse(&vec3(), "~1 ~-1 ~0.5").unwrap();
    assert_eq!(coordinates.position(&source), Vec3::new(11.0, 63.0, 10.5));
}

#[test]
fn absolute_ignores_source() {
    let here = source_at(Vec3::new(10.0, 64.0, 10.0), Vec2::ZERO);
    let there = source_at(Vec3::new(-500.0, 3.0, 77.0), Vec2::new(30.0, 60.0));
    let coordinates = parse(&vec3(), "1 2 3").unwrap();
    assert_eq!(coordinates.position(&here), coordinates.position(&there));
    assert_eq!(coordinates.position(&here), Vec3::new(1.5, 2.0, 3.5));
}

#[test]
fn block_pos_floors_negative_positions() {
    let source = source_at(Vec3::new(-0.5, 64.9, -10.1), Vec2::ZERO);
    let coordinates = parse(&block_pos(), "~ ~ ~").unwrap();
    assert_eq!(coordinates.block_pos(&source), BlockPos::new(-1, 64, -11));
}

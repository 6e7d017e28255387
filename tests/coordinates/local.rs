//! `^` coordinates in the source's frame

use sigil_arguments::coordinates::POS_MIXED;
use sigil_arguments::{Coordinates, LocalCoordinates, Vec2, Vec3, vec3};
use sigil_dispatch::ArgumentType;
use sigil_foundation::StringReader;

use crate::{assert_close, source_at};

fn local(input: &str) -> Coordinates {
    vec3().parse(&mut StringReader::new(input)).unwrap()
}

#[test]
fn parses_all_caret_components() {
    assert_eq!(
        local("^1 ^ ^-5"),
        Coordinates::Local(LocalCoordinates::new(1.0, 0.0, -5.0))
    );
    assert!(local("^ ^ ^").is_x_relative());
}

#[test]
fn caret_mixed_with_tilde_is_rejected() {
    for input in ["^ ~ ^", "^1 2 ^3", "^ ^ ~"] {
        let err = vec3().parse(&mut StringReader::new(input)).unwrap_err();
        assert!(err.is(&POS_MIXED), "{input}");
        assert_eq!(err.cursor(), Some(0), "{input}");
    }
}

// =============================================================================
// Facings
// =============================================================================

#[test]
fn facing_south() {
    let origin = Vec3::new(3.0, 70.0, -4.0);
    let source = source_at(origin, Vec2::ZERO);
    assert_close(
        local("^1 ^ ^-5").position(&source),
        Vec3::new(4.0, 70.0, -9.0),
    );
}

#[test]
fn facing_west() {
    let source = source_at(Vec3::ZERO, Vec2::new(0.0, 90.0));
    assert_close(local("^ ^ ^2").position(&source), Vec3::new(-2.0, 0.0, 0.0));
    assert_close(local("^1 ^ ^").position(&source), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn looking_straight_up() {
    let source = source_at(Vec3::ZERO, Vec2::new(-90.0, 0.0));
    assert_close(local("^ ^ ^3").position(&source), Vec3::new(0.0, 3.0, 0.0));
}

#[test]
fn up_follows_pitch() {
    let source = source_at(Vec3::ZERO, Vec2::ZERO);
    assert_close(local("^ ^2 ^").position(&source), Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn local_rotation_is_zero() {
    let source = source_at(Vec3::ZERO, Vec2::new(20.0, 45.0));
    assert_eq!(local("^ ^ ^").rotation(&source), Vec2::ZERO);
}

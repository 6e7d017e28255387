//! Resolving selectors against the demo world

use sigil_arguments::selector::SELECTORS_NOT_ALLOWED;
use sigil_arguments::{EntityProvider, Vec3};
use uuid::Uuid;

use crate::{console, names, parse, select, world};

// =============================================================================
// Selector Types
// =============================================================================

#[test]
fn all_entities_in_world_order() {
    let source = console(world());
    assert_eq!(
        select(&source, "@e"),
        ["Alex", "Steve", "pig", "pig", "cow", "zombie", "Notch", "ghast"]
    );
}

#[test]
fn all_players() {
    let source = console(world());
    assert_eq!(select(&source, "@a"), ["Alex", "Steve", "Notch"]);
}

#[test]
fn nearest_player_depends_on_position() {
    let source = console(world());
    assert_eq!(select(&source, "@p"), ["Alex"]);
    let near_steve = source.with_position(Vec3::new(9.0, 64.0, -3.0));
    assert_eq!(select(&near_steve, "@p"), ["Steve"]);
}

#[test]
fn random_player_is_reproducible() {
    let source = console(world());
    let first = select(&source, "@r");
    assert_eq!(first.len(), 1);
    assert_eq!(select(&source, "@r"), first);
}

#[test]
fn self_selector() {
    let world = world();
    let source = console(world.clone());
    assert!(select(&source, "@s").is_empty());

    let steve = world.get(Uuid::from_u128(2)).unwrap();
    let as_steve = source.with_entity(steve);
    assert_eq!(select(&as_steve, "@s"), ["Steve"]);
    assert!(select(&as_steve, "@s[type=pig]").is_empty());
}

#[test]
fn name_and_uuid_forms() {
    let source = console(world());
    assert_eq!(select(&source, "Steve"), ["Steve"]);
    assert!(select(&source, "Herobrine").is_empty());
    assert_eq!(select(&source, "00000000-0000-0000-0000-000000000006"), ["cow"]);
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn sort_and_limit_across_worlds() {
    let source = console(world());
    assert_eq!(
        select(&source, "@e[type=!minecraft:pig,limit=5,sort=nearest]"),
        ["Alex", "Steve", "Notch", "cow", "ghast"]
    );
    assert_eq!(select(&source, "@e[sort=furthest,limit=1]"), ["zombie"]);
}

#[test]
fn type_filters() {
    let source = console(world());
    assert_eq!(select(&source, "@e[type=pig]"), ["pig", "pig"]);
    assert_eq!(select(&source, "@e[type=!pig,type=!player]"), ["cow", "zombie", "ghast"]);
    assert_eq!(select(&source, "@e[type=#minecraft:undead]"), ["zombie"]);
}

#[test]
fn distance_limits_to_source_world() {
    let source = console(world());
    assert_eq!(
        select(&source, "@e[distance=..10]"),
        ["Alex", "Steve", "pig", "pig"]
    );
    assert_eq!(select(&source, "@e[distance=6..10]"), ["Steve", "pig"]);
}

#[test]
fn volume_from_overridden_origin() {
    let source = console(world());
    assert_eq!(
        select(&source, "@e[x=0,y=60,z=0,dx=10,dy=10,dz=10]"),
        ["Alex", "pig"]
    );
}

#[test]
fn player_only_filters() {
    let source = console(world());
    assert_eq!(select(&source, "@a[gamemode=creative]"), ["Steve"]);
    assert_eq!(select(&source, "@a[gamemode=!creative]"), ["Alex", "Notch"]);
    assert_eq!(select(&source, "@e[level=0]"), ["Alex", "Steve", "Notch"]);
}

#[test]
fn name_and_tag_filters() {
    let source = console(world());
    assert_eq!(select(&source, "@e[name=Alex]"), ["Alex"]);
    assert_eq!(select(&source, "@a[name=!Alex]"), ["Steve", "Notch"]);
    assert_eq!(select(&source, "@e[tag=builder]"), ["Steve"]);
    assert_eq!(select(&source, "@e[tag=]").len(), 7);
}

#[test]
fn filter_order_does_not_matter() {
    let source = console(world());
    let inputs = [
        "@e[type=pig,distance=..6,tag=!builder]",
        "@e[distance=..6,type=pig,tag=!builder]",
        "@e[tag=!builder,distance=..6,type=pig]",
    ];
    for input in inputs {
        let found = parse(input).unwrap().find_entities(&source).unwrap();
        assert_eq!(names(&found), ["pig"], "{input}");
        assert_eq!(found[0].uuid(), Uuid::from_u128(4), "{input}");
    }
}

// =============================================================================
// Live State
// =============================================================================

#[test]
fn selectors_see_current_entities() {
    let world = world();
    let source = console(world.clone());
    let selector = parse("@e[type=pig]").unwrap();
    assert_eq!(selector.find_entities(&source).unwrap().len(), 2);

    assert!(world.remove(Uuid::from_u128(4)));
    assert_eq!(selector.find_entities(&source).unwrap().len(), 1);

    let pig = world.get(Uuid::from_u128(5)).unwrap();
    pig.teleport(world.worlds()[1].clone(), Vec3::ZERO);
    assert_eq!(select(&source, "@e[type=pig,distance=..100]").len(), 0);
    assert_eq!(select(&source, "@e[type=pig]").len(), 1);
}

#[test]
fn permission_gates_at_selectors_only() {
    let source = console(world()).with_operator(false);
    let err = parse("@e").unwrap().find_entities(&source).unwrap_err();
    assert!(err.is(&SELECTORS_NOT_ALLOWED));
    assert_eq!(select(&source, "Alex"), ["Alex"]);
}

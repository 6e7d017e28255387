//! Entity and player arguments inside a dispatcher

use futures::executor::block_on;
use sigil_arguments::selector::{
    NO_ENTITY_FOUND, NO_PLAYER_FOUND, ONLY_PLAYERS_ALLOWED, SELECTORS_NOT_ALLOWED, TOO_MANY_ENTITIES,
    TOO_MANY_PLAYERS,
};
use sigil_arguments::{EntityArgument, entities, entity, player, players};
use sigil_dispatch::{CommandContext, CommandDispatcher, argument, literal};
use sigil_runtime::DemoSource;

use crate::{console, names, world};

type DemoContext = CommandContext<DemoSource>;

fn dispatcher() -> CommandDispatcher<DemoSource> {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(
        literal("one").then(argument("target", entity()).executes(|ctx: &DemoContext| {
            let found = EntityArgument::get_entity(ctx, "target")?;
            ctx.source().send(found.name());
            Ok(1)
        })),
    );
    dispatcher.register(
        literal("many").then(argument("targets", entities()).executes(|ctx: &DemoContext| {
            let found = EntityArgument::get_entities(ctx, "targets")?;
            ctx.source().send(names(&found).join(","));
            Ok(i32::try_from(found.len()).unwrap_or(i32::MAX))
        })),
    );
    dispatcher.register(
        literal("maybe").then(argument("targets", entities()).executes(|ctx: &DemoContext| {
            let found = EntityArgument::get_optional_entities(ctx, "targets")?;
            Ok(i32::try_from(found.len()).unwrap_or(i32::MAX))
        })),
    );
    dispatcher.register(
        literal("who").then(argument("player", player()).executes(|ctx: &DemoContext| {
            let found = EntityArgument::get_player(ctx, "player")?;
            ctx.source().send(found.name());
            Ok(1)
        })),
    );
    dispatcher.register(
        literal("crowd").then(argument("players", players()).executes(|ctx: &DemoContext| {
            let found = EntityArgument::get_players(ctx, "players")?;
            Ok(i32::try_from(found.len()).unwrap_or(i32::MAX))
        })),
    );
    dispatcher
}

// =============================================================================
// Parse-Time Validation
// =============================================================================

#[test]
fn single_entity_rejects_unbounded_selector() {
    let source = console(world());
    let err = dispatcher().execute_command("one @e", source.clone()).unwrap_err();
    assert!(err.is(&TOO_MANY_ENTITIES));
    assert_eq!(err.cursor(), Some(4));
    assert_eq!(dispatcher().execute_command("one @e[limit=1,sort=nearest]", source.clone()).unwrap(), 1);
    assert_eq!(source.take_feedback(), ["Alex"]);
}

#[test]
fn player_arguments_reject_entity_selectors() {
    let source = console(world());
    let err = dispatcher().execute_command("crowd @e", source.clone()).unwrap_err();
    assert!(err.is(&ONLY_PLAYERS_ALLOWED));
    let err = dispatcher().execute_command("who @a", source.clone()).unwrap_err();
    assert!(err.is(&TOO_MANY_PLAYERS));
    assert_eq!(dispatcher().execute_command("crowd @e[type=player]", source).unwrap(), 3);
}

#[test]
fn self_selector_passes_player_check() {
    let source = console(world());
    assert!(dispatcher().parse("who @s", source).is_complete());
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn empty_results() {
    let source = console(world());
    let err = dispatcher()
        .execute_command("many @e[type=cat]", source.clone())
        .unwrap_err();
    assert!(err.is(&NO_ENTITY_FOUND));
    assert_eq!(dispatcher().execute_command("maybe @e[type=cat]", source.clone()).unwrap(), 0);
    let err = dispatcher().execute_command("who Herobrine", source).unwrap_err();
    assert!(err.is(&NO_PLAYER_FOUND));
}

#[test]
fn resolves_per_execution() {
    let world = world();
    let source = console(world.clone());
    let dispatcher = dispatcher();
    let parse = dispatcher.parse("many @e[type=pig]", source.clone());

    assert_eq!(dispatcher.execute(&parse).unwrap(), 2);
    assert!(world.remove(uuid::Uuid::from_u128(5)));
    assert_eq!(dispatcher.execute(&parse).unwrap(), 1);
    assert_eq!(source.take_feedback(), ["pig,pig", "pig"]);
}

// =============================================================================
// Permissions
// =============================================================================

#[test]
fn selectors_need_permission_at_execution() {
    let source = console(world()).with_operator(false);
    let dispatcher = dispatcher();
    let parse = dispatcher.parse("many @e", source.clone());
    assert!(parse.errors().is_empty());
    assert!(!parse.reader().can_read());

    let err = dispatcher.execute(&parse).unwrap_err();
    assert!(err.is(&SELECTORS_NOT_ALLOWED));
    assert!(source.take_feedback().is_empty());
}

#[test]
fn names_resolve_without_permission() {
    let source = console(world()).with_operator(false);
    assert_eq!(dispatcher().execute_command("who Alex", source.clone()).unwrap(), 1);
    assert_eq!(source.take_feedback(), ["Alex"]);

    let err = dispatcher().execute_command("who @p", source).unwrap_err();
    assert!(err.is(&SELECTORS_NOT_ALLOWED));
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn completes_player_names_and_selectors() {
    let source = console(world());
    let dispatcher = dispatcher();
    let parse = dispatcher.parse("who ", source);
    let suggestions = block_on(dispatcher.get_completion_suggestions(&parse));
    let texts = suggestions.texts();
    for expected in ["@a", "@p", "@s", "Alex", "Notch", "Steve"] {
        assert!(texts.contains(&expected), "missing {expected} in {texts:?}");
    }
}

#[test]
fn completes_option_keys() {
    let source = console(world());
    let dispatcher = dispatcher();
    let parse = dispatcher.parse("many @e[li", source);
    let suggestions = block_on(dispatcher.get_completion_suggestions(&parse));
    assert_eq!(suggestions.texts(), ["limit="]);
    assert_eq!(suggestions.range().start, 8);
}

//! Integration tests for completion

use futures::executor::block_on;
use sigil_dispatch::{CommandDispatcher, Suggestions, argument, boolean, integer, literal, word};

fn dispatcher() -> CommandDispatcher<bool> {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(literal("foo").executes(|_| Ok(1)));
    dispatcher.register(literal("bar").then(argument("flag", boolean()).executes(|_| Ok(1))));
    dispatcher.register(literal("baz").then(
        argument("colour", word())
            .suggests(|_, mut builder| {
                for colour in ["red", "green", "blue"] {
                    if colour.starts_with(builder.remaining_lowercase()) {
                        builder.suggest(colour);
                    }
                }
                builder.build_future()
            })
            .executes(|_| Ok(1)),
    ));
    dispatcher.register(literal("admin").requires(|admin| *admin).executes(|_| Ok(1)));
    dispatcher
}

fn complete(dispatcher: &CommandDispatcher<bool>, input: &str) -> Suggestions {
    let parse = dispatcher.parse(input, false);
    block_on(dispatcher.get_completion_suggestions(&parse))
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn root_literals_sorted() {
    let dispatcher = dispatcher();
    let suggestions = complete(&dispatcher, "");
    assert_eq!(suggestions.texts(), ["bar", "baz", "foo"]);
    assert_eq!(suggestions.range().start, 0);
}

#[test]
fn literals_filtered_by_prefix() {
    let dispatcher = dispatcher();
    let suggestions = complete(&dispatcher, "ba");
    assert_eq!(suggestions.texts(), ["bar", "baz"]);
    assert_eq!(suggestions.range().end, 2);
}

#[test]
fn requirement_hides_suggestions() {
    let dispatcher = dispatcher();
    let parse = dispatcher.parse("ad", true);
    let admin = block_on(dispatcher.get_completion_suggestions(&parse));
    assert_eq!(admin.texts(), ["admin"]);
    assert!(complete(&dispatcher, "ad").is_empty());
}

// =============================================================================
// Arguments
// =============================================================================

#[test]
fn argument_type_suggestions() {
    let dispatcher = dispatcher();
    let suggestions = complete(&dispatcher, "bar ");
    assert_eq!(suggestions.texts(), ["false", "true"]);
    assert_eq!(suggestions.range().start, 4);
    assert_eq!(complete(&dispatcher, "bar t").texts(), ["true"]);
}

#[test]
fn custom_provider_overrides_type() {
    let dispatcher = dispatcher();
    assert_eq!(complete(&dispatcher, "baz ").texts(), ["blue", "green", "red"]);
    assert_eq!(complete(&dispatcher, "baz g").texts(), ["green"]);
}

#[test]
fn no_suggestions_for_plain_integer() {
    let mut dispatcher = CommandDispatcher::<bool>::new();
    dispatcher.register(literal("n").then(argument("value", integer()).executes(|_| Ok(1))));
    assert!(complete(&dispatcher, "n ").is_empty());
}

#[test]
fn completion_at_cursor_truncates_input() {
    let dispatcher = dispatcher();
    let parse = dispatcher.parse("bar true", false);
    let suggestions = block_on(dispatcher.get_completion_suggestions_at(&parse, 5));
    assert_eq!(suggestions.texts(), ["true"]);
    assert_eq!(suggestions.range().start, 4);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn suggestions_are_idempotent() {
    let dispatcher = dispatcher();
    for input in ["", "b", "bar ", "baz ", "foo", "unknown "] {
        assert_eq!(complete(&dispatcher, input), complete(&dispatcher, input));
    }
}

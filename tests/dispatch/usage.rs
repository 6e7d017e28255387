//! Integration tests for usage strings, paths and ambiguity detection

use sigil_dispatch::{
    CommandDispatcher, NodeId, argument, flag, greedy_string, integer, literal, option, word,
};

fn dispatcher() -> CommandDispatcher<()> {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(literal("msg").then(
        argument("target", word()).then(argument("text", greedy_string()).executes(|_| Ok(1))),
    ));
    dispatcher.register(literal("give").then(
        argument("item", word())
            .executes(|_| Ok(1))
            .then(argument("count", integer()).executes(|_| Ok(1))),
    ));
    dispatcher.register(
        literal("time")
            .then(literal("set").then(argument("value", integer()).executes(|_| Ok(1))))
            .then(literal("query").executes(|_| Ok(1))),
    );
    let search = dispatcher.register(literal("search").then(
        argument("term", word())
            .executes(|_| Ok(1))
            .then(option("limit", integer()).executes(|_| Ok(1)))
            .then(flag("exact").executes(|_| Ok(1))),
    ));
    dispatcher.register(literal("s").redirect(search));
    dispatcher.register(literal("stop").requires(|_| false).executes(|_| Ok(1)));
    dispatcher
}

fn smart(dispatcher: &CommandDispatcher<()>, node: NodeId) -> Vec<String> {
    dispatcher
        .get_smart_usage(node, &())
        .into_iter()
        .map(|(_, usage)| usage)
        .collect()
}

// =============================================================================
// All Usage
// =============================================================================

#[test]
fn all_usage_lists_every_runnable_path() {
    let dispatcher = dispatcher();
    assert_eq!(
        dispatcher.get_all_usage(NodeId::ROOT, &(), true),
        vec![
            "msg <target> <text>",
            "give <item>",
            "give <item> <count>",
            "time set <value>",
            "time query",
            "search <term>",
            "search <term> --limit <limit>",
            "search <term> --exact",
            "s -> search",
        ]
    );
}

#[test]
fn unrestricted_usage_includes_hidden_commands() {
    let dispatcher = dispatcher();
    let usage = dispatcher.get_all_usage(NodeId::ROOT, &(), false);
    assert_eq!(usage.last().map(String::as_str), Some("stop"));
}

// =============================================================================
// Smart Usage
// =============================================================================

#[test]
fn smart_usage_folds_subtrees() {
    let dispatcher = dispatcher();
    assert_eq!(
        smart(&dispatcher, NodeId::ROOT),
        vec![
            "msg <target> <text>",
            "give <item> [<count>]",
            "time (set|query)",
            "search <term> [--limit|--exact]",
            "s -> search",
        ]
    );
}

#[test]
fn smart_usage_below_a_literal() {
    let dispatcher = dispatcher();
    let give = dispatcher.find_node(["give"]).unwrap();
    let item = dispatcher.find_node(["give", "item"]).unwrap();
    assert_eq!(
        dispatcher.get_smart_usage(give, &()),
        vec![(item, "<item> [<count>]".to_string())]
    );
}

#[test]
fn smart_usage_of_leaf_is_empty() {
    let dispatcher = dispatcher();
    let query = dispatcher.find_node(["time", "query"]).unwrap();
    assert!(dispatcher.get_smart_usage(query, &()).is_empty());
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn path_names_each_node() {
    let dispatcher = dispatcher();
    let count = dispatcher.find_node(["give", "item", "count"]).unwrap();
    assert_eq!(dispatcher.get_path(count), ["give", "item", "count"]);
    assert!(dispatcher.get_path(NodeId::ROOT).is_empty());
}

// =============================================================================
// Ambiguities
// =============================================================================

#[test]
fn literal_shadowed_by_word_is_ambiguous() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    let parent = dispatcher.register(
        literal("pick")
            .then(argument("name", word()).executes(|_| Ok(1)))
            .then(literal("random").executes(|_| Ok(2))),
    );
    let mut found = Vec::new();
    dispatcher.find_ambiguities(|p, child, sibling, inputs| {
        found.push((p, child, sibling, inputs.to_vec()));
    });

    let name = dispatcher.find_node(["pick", "name"]).unwrap();
    let random = dispatcher.find_node(["pick", "random"]).unwrap();
    assert_eq!(found, vec![(parent, random, name, vec!["random".to_string()])]);
}

#[test]
fn distinct_literals_are_not_ambiguous() {
    let dispatcher = dispatcher();
    let mut count = 0;
    dispatcher.find_ambiguities(|_, _, _, _| count += 1);
    assert_eq!(count, 0);
}

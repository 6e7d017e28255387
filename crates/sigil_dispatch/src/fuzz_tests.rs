//! Property tests for parser crash resistance.
//!
//! Arbitrary input must never panic the parser, the executor or the
//! completion engine, and completion must not depend on how often it runs.

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use proptest::prelude::*;

    use crate::arguments::{double, greedy_string, integer, string, word};
    use crate::builder::{argument, flag, literal, option};
    use crate::dispatcher::CommandDispatcher;
    use crate::tree::NodeId;

    /// A small tree exercising every node kind (helper function).
    fn sample_dispatcher() -> CommandDispatcher<()> {
        let mut d = CommandDispatcher::new();
        let root = d.register(
            literal("tp")
                .then(argument("x", double()).then(argument("y", double()).executes(|_| Ok(1))))
                .then(argument("target", word()).executes(|_| Ok(2))),
        );
        d.register(literal("say").then(argument("message", greedy_string()).executes(|_| Ok(3))));
        d.register(
            literal("give")
                .then(argument("item", string()).then(option("count", integer()).executes(|_| Ok(4))))
                .then(flag("all").executes(|_| Ok(5))),
        );
        d.register(literal("again").redirect(root));
        d.register(literal("loop").redirect(NodeId::ROOT));
        d
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn parse_and_execute_never_panic(input in "\\PC{0,40}") {
            let d = sample_dispatcher();
            let parse = d.parse(&input, ());
            prop_assert!(parse.reader().cursor() <= input.len());
            let _ = d.execute(&parse);
        }

        #[test]
        fn structured_input_never_panics(
            words in prop::collection::vec("(tp|say|give|again|loop|--count|--all|[0-9.-]{1,4}|\"[a-z ]{0,4}\"?|[a-z]{1,3})", 0..6)
        ) {
            let d = sample_dispatcher();
            let input = words.join(" ");
            let parse = d.parse(&input, ());
            let _ = d.execute(&parse);
        }

        #[test]
        fn completion_never_panics_and_is_stable(input in "[a-z0-9 .\"-]{0,20}", cursor in 0usize..24) {
            let d = sample_dispatcher();
            let parse = d.parse(&input, ());
            let first = block_on(d.get_completion_suggestions_at(&parse, cursor));
            let second = block_on(d.get_completion_suggestions_at(&parse, cursor));
            prop_assert_eq!(first, second);
        }
    }
}

//! Integration tests for parsing and execution

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sigil_dispatch::{
    ArgumentType, CommandContext, CommandDispatcher, IntegerArgumentType, argument, flag,
    greedy_string, integer, literal, option, word,
};
use sigil_foundation::{CommandResult, StringReader, builtin};

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn counting(
    hits: &Arc<AtomicUsize>,
    value: i32,
) -> impl Fn(&CommandContext<()>) -> CommandResult<i32> + Send + Sync + 'static {
    let hits = Arc::clone(hits);
    move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[test]
fn full_command_runs_exactly_one_handler() {
    let (base, sub, arg) = (counter(), counter(), counter());
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(
        literal("base")
            .executes(counting(&base, 1))
            .then(literal("sub").executes(counting(&sub, 2)))
            .then(argument("n", integer()).executes(counting(&arg, 3))),
    );

    assert_eq!(dispatcher.execute_command("base sub", ()).unwrap(), 2);
    assert_eq!(dispatcher.execute_command("base 7", ()).unwrap(), 3);
    assert_eq!(dispatcher.execute_command("base", ()).unwrap(), 1);
    assert_eq!(base.load(Ordering::SeqCst), 1);
    assert_eq!(sub.load(Ordering::SeqCst), 1);
    assert_eq!(arg.load(Ordering::SeqCst), 1);
}

#[test]
fn incomplete_input_runs_nothing() {
    let hits = counter();
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(literal("a").then(literal("b").executes(counting(&hits, 1))));

    let error = dispatcher.execute_command("a", ()).unwrap_err();
    assert!(error.is(&builtin::DISPATCHER_INCOMPLETE_COMMAND));
    let error = dispatcher.execute_command("a c", ()).unwrap_err();
    assert!(error.is(&builtin::DISPATCHER_UNKNOWN_ARGUMENT));
    assert_eq!(error.cursor(), Some(2));
    let error = dispatcher.execute_command("z", ()).unwrap_err();
    assert!(error.is(&builtin::DISPATCHER_UNKNOWN_COMMAND));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn trailing_space_is_incomplete() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    dispatcher.register(literal("a").executes(|_| Ok(1)));
    assert!(dispatcher.execute_command("a ", ()).is_err());
}

// =============================================================================
// Backtracking
// =============================================================================

#[test]
fn failed_argument_leaves_cursor() {
    let mut reader = StringReader::new("foo");
    assert!(integer().parse(&mut reader).is_err());
    assert_eq!(reader.cursor(), 0);

    let mut reader = StringReader::new("50");
    let error = IntegerArgumentType::new(0, 10).parse(&mut reader).unwrap_err();
    assert!(error.is(&builtin::INTEGER_TOO_HIGH));
    assert_eq!(reader.cursor(), 0);
}

#[test]
fn falls_back_to_next_sibling() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    dispatcher.register(
        literal("set")
            .then(argument("n", integer()).executes(|ctx| ctx.get_argument::<i32>("n")))
            .then(argument("w", word()).executes(|ctx| {
                Ok(i32::try_from(ctx.get_argument::<String>("w")?.len()).unwrap_or(0))
            })),
    );
    assert_eq!(dispatcher.execute_command("set 12", ()).unwrap(), 12);
    assert_eq!(dispatcher.execute_command("set hello", ()).unwrap(), 5);
}

#[test]
fn deepest_error_is_reported() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    dispatcher.register(
        literal("give").then(
            argument("count", IntegerArgumentType::new(1, 64)).executes(|_| Ok(1)),
        ),
    );
    let error = dispatcher.execute_command("give 100", ()).unwrap_err();
    assert!(error.is(&builtin::INTEGER_TOO_HIGH));
    assert_eq!(error.raw_message(), "Integer must not be more than 64, found 100");
    assert_eq!(error.cursor(), Some(5));
}

// =============================================================================
// Redirects
// =============================================================================

#[test]
fn redirect_to_root_runs_target() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    dispatcher.register(literal("ping").executes(|_| Ok(42)));
    let root = dispatcher.root();
    dispatcher.register(literal("run").redirect(root));
    assert_eq!(dispatcher.execute_command("run run ping", ()).unwrap(), 42);
}

#[test]
fn modifier_fans_out_sources() {
    let mut dispatcher = CommandDispatcher::<i32>::new();
    dispatcher.register(literal("value").executes(|ctx| Ok(*ctx.source())));
    let root = dispatcher.root();
    dispatcher.register(literal("each").redirect_with(root, |ctx| {
        let base = *ctx.source();
        Ok(vec![base, base + 1, base + 2])
    }));
    assert_eq!(dispatcher.execute_command("each value", 10).unwrap(), 33);
}

#[test]
fn fork_counts_successes_and_survives_failures() {
    let mut dispatcher = CommandDispatcher::<i32>::new();
    dispatcher.register(literal("check").executes(|ctx| {
        if *ctx.source() % 2 == 0 {
            Ok(100)
        } else {
            Err(builtin::DISPATCHER_UNKNOWN_ARGUMENT.create())
        }
    }));
    let root = dispatcher.root();
    dispatcher.register(literal("all").fork(root, |_| Ok(vec![1, 2, 3, 4])));
    assert_eq!(dispatcher.execute_command("all check", 0).unwrap(), 2);
}

#[test]
fn consumer_sees_every_result() {
    let results = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut dispatcher = CommandDispatcher::<i32>::new();
    dispatcher.register(literal("value").executes(|ctx| Ok(*ctx.source())));
    let root = dispatcher.root();
    dispatcher.register(literal("each").redirect_with(root, |_| Ok(vec![1, 2])));
    let sink = Arc::clone(&results);
    dispatcher.set_consumer(move |_, success, value| {
        sink.lock().unwrap().push((success, value));
    });
    dispatcher.execute_command("each value", 0).unwrap();
    assert_eq!(*results.lock().unwrap(), [(true, 1), (true, 2)]);
}

// =============================================================================
// Options and Flags
// =============================================================================

#[test]
fn options_and_flags_land_in_options_map() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    dispatcher.register(
        literal("spawn")
            .executes(|ctx| Ok(i32::from(ctx.has_option("quiet"))))
            .then(option("count", integer()).executes(|ctx| {
                Ok(ctx.get_option::<i32>("count")?.unwrap_or(1))
            }))
            .then(flag("quiet").executes(|ctx| {
                Ok(if ctx.get_option::<bool>("quiet")?.unwrap_or(false) { -1 } else { 0 })
            })),
    );
    assert_eq!(dispatcher.execute_command("spawn", ()).unwrap(), 0);
    assert_eq!(dispatcher.execute_command("spawn --count 5", ()).unwrap(), 5);
    assert_eq!(dispatcher.execute_command("spawn --quiet", ()).unwrap(), -1);
}

#[test]
fn greedy_string_takes_the_rest() {
    let mut dispatcher = CommandDispatcher::<()>::new();
    dispatcher.register(literal("echo").then(argument("text", greedy_string()).executes(|ctx| {
        Ok(i32::try_from(ctx.get_argument::<String>("text")?.len()).unwrap_or(0))
    })));
    assert_eq!(dispatcher.execute_command("echo a b  c", ()).unwrap(), 6);
}

// =============================================================================
// Requirements
// =============================================================================

#[test]
fn requirement_hides_nodes() {
    let mut dispatcher = CommandDispatcher::<bool>::new();
    dispatcher.register(literal("secret").requires(|admin| *admin).executes(|_| Ok(1)));
    assert_eq!(dispatcher.execute_command("secret", true).unwrap(), 1);
    let error = dispatcher.execute_command("secret", false).unwrap_err();
    assert!(error.is(&builtin::DISPATCHER_UNKNOWN_COMMAND));
}

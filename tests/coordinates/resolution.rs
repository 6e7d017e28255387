//! Coordinates read back from command contexts

use sigil_arguments::coordinates::{POS_OUT_OF_BOUNDS, POS_OUT_OF_WORLD};
use sigil_arguments::{
    BlockPosArgument, ColumnPosArgument, RotationArgument, Vec2, Vec2Argument, Vec3,
    Vec3Argument, block_pos, column_pos, rotation, vec2, vec3,
};
use sigil_dispatch::{CommandContext, CommandDispatcher, argument, literal};
use sigil_runtime::DemoSource;

use crate::source_at;

type DemoContext = CommandContext<DemoSource>;

fn dispatcher() -> CommandDispatcher<DemoSource> {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(literal("pos").then(argument("pos", vec3()).executes(|ctx: &DemoContext| {
        let pos = Vec3Argument::get_vec3(ctx, "pos")?;
        ctx.source().send(format!("{} {} {}", pos.x, pos.y, pos.z));
        Ok(1)
    })));
    dispatcher.register(literal("raw").then(
        argument("pos", Vec3Argument::new(false)).executes(|ctx: &DemoContext| {
            let pos = Vec3Argument::get_vec3(ctx, "pos")?;
            ctx.source().send(format!("{} {} {}", pos.x, pos.y, pos.z));
            Ok(1)
        }),
    ));
    dispatcher.register(
        literal("block").then(argument("pos", block_pos()).executes(|ctx: &DemoContext| {
            let pos = BlockPosArgument::get_loaded_block_pos(ctx, "pos")?;
            ctx.source().send(format!("{} {} {}", pos.x, pos.y, pos.z));
            Ok(1)
        })),
    );
    dispatcher.register(
        literal("spawn").then(argument("pos", block_pos()).executes(|ctx: &DemoContext| {
            BlockPosArgument::get_spawnable_block_pos(ctx, "pos")?;
            Ok(1)
        })),
    );
    dispatcher.register(
        literal("column").then(argument("pos", column_pos()).executes(|ctx: &DemoContext| {
            let pos = ColumnPosArgument::get_column_pos(ctx, "pos")?;
            ctx.source().send(format!("{} {}", pos.x, pos.z));
            Ok(1)
        })),
    );
    dispatcher.register(literal("flat").then(argument("pos", vec2()).executes(|ctx: &DemoContext| {
        let pos = Vec2Argument::get_vec2(ctx, "pos")?;
        ctx.source().send(format!("{} {}", pos.x, pos.y));
        Ok(1)
    })));
    dispatcher.register(
        literal("face").then(argument("rot", rotation()).executes(|ctx: &DemoContext| {
            let rot = RotationArgument::get_rotation(ctx, "rot")?;
            ctx.source().send(format!("{} {}", rot.x, rot.y));
            Ok(1)
        })),
    );
    dispatcher
}

fn run(source: &DemoSource, input: &str) -> Vec<String> {
    dispatcher().execute_command(input, source.clone()).unwrap();
    source.take_feedback()
}

#[test]
fn vec3_centre_corrects_whole_numbers() {
    let source = source_at(Vec3::ZERO, Vec2::ZERO);
    assert_eq!(run(&source, "pos 1 2 3"), ["1.5 2 3.5"]);
    assert_eq!(run(&source, "pos 1.0 2 3.25"), ["1 2 3.25"]);
}

#[test]
fn centre_correction_can_be_disabled() {
    let source = source_at(Vec3::ZERO, Vec2::ZERO);
    assert_eq!(run(&source, "raw 1 2 3"), ["1 2 3"]);
}

#[test]
fn same_input_resolves_per_source() {
    let here = source_at(Vec3::new(10.0, 64.0, 10.0), Vec2::ZERO);
    let there = source_at(Vec3::new(-20.0, 5.0, 0.0), Vec2::ZERO);
    assert_eq!(run(&here, "pos ~ ~1 ~"), ["10 65 10"]);
    assert_eq!(run(&there, "pos ~ ~1 ~"), ["-20 6 0"]);
}

#[test]
fn relative_block_pos_resolves_at_source() {
    let source = source_at(Vec3::new(10.0, 64.0, 10.0), Vec2::ZERO);
    assert_eq!(run(&source, "block ~ ~ ~"), ["10 64 10"]);
    assert_eq!(run(&source, "block ~-1 ~ ~2"), ["9 64 12"]);
}

#[test]
fn loaded_block_pos_checks_build_height() {
    let source = source_at(Vec3::new(0.0, 300.0, 0.0), Vec2::ZERO);
    assert_eq!(run(&source, "block ~ ~ ~"), ["0 300 0"]);

    let err = dispatcher()
        .execute_command("block ~ ~50 ~", source.clone())
        .unwrap_err();
    assert!(err.is(&POS_OUT_OF_WORLD));
}

#[test]
fn spawnable_block_pos_checks_world_border() {
    let source = source_at(Vec3::ZERO, Vec2::ZERO);
    assert!(dispatcher().execute_command("spawn 100 64 100", source.clone()).is_ok());
    let err = dispatcher()
        .execute_command("spawn 40000000 64 0", source)
        .unwrap_err();
    assert!(err.is(&POS_OUT_OF_BOUNDS));
}

#[test]
fn column_pos_resolves_x_and_z() {
    let source = source_at(Vec3::new(7.5, 64.0, -3.5), Vec2::ZERO);
    assert_eq!(run(&source, "column ~1 ~"), ["8 -4"]);
}

#[test]
fn vec2_resolves_x_and_z() {
    let source = source_at(Vec3::new(7.5, 64.0, -3.5), Vec2::ZERO);
    assert_eq!(run(&source, "flat 1 ~2"), ["1.5 -1.5"]);
}

#[test]
fn rotation_is_relative_to_source() {
    let source = source_at(Vec3::ZERO, Vec2::new(10.0, 90.0));
    assert_eq!(run(&source, "face ~45 ~-5"), ["5 135"]);
    assert_eq!(run(&source, "face 0 0"), ["0 0"]);
}

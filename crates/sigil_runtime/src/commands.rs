//! Demo commands for the REPL.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `say <message>` | Broadcasts a chat line from the source |
//! | `teleport`/`tp [<targets>] <location>` | Moves entities |
//! | `tp <targets> <destination>` | Moves entities to another entity |
//! | `kill [<targets>]` | Removes entities from the world |
//! | `list [uuids]` | Lists online players |
//! | `execute as\|at <targets> ...` | Runs the rest once per matched entity |
//! | `execute positioned <pos> ...` | Runs the rest at another position |
//! | `execute run <command>` | Runs a command with the modified source |

use sigil_arguments::{
    CommandSource, EntityArgument, EntityRef, ResourceLocation, Vec3, Vec3Argument,
    entities, entity, vec3,
};
use sigil_dispatch::{CommandContext, CommandDispatcher, argument, greedy_string, literal};
use sigil_foundation::{CommandResult, SimpleErrorType};
use tracing::debug;

use crate::world::DemoSource;

type DemoContext = CommandContext<DemoSource>;

/// Players `list` reports as the server capacity.
pub const MAX_PLAYERS: usize = 20;

/// The source has no entity but the command acts on it.
pub static ENTITY_REQUIRED: SimpleErrorType = SimpleErrorType::new(
    "permissions.requires.entity",
    "An entity is required to run this command here",
);

/// Registers every demo command.
pub fn register_demo_commands(dispatcher: &mut CommandDispatcher<DemoSource>) {
    register_say(dispatcher);
    register_teleport(dispatcher);
    register_kill(dispatcher);
    register_list(dispatcher);
    register_execute(dispatcher);
    debug!(nodes = dispatcher.node_count(), "registered demo commands");
}

fn register_say(dispatcher: &mut CommandDispatcher<DemoSource>) {
    dispatcher.register(
        literal("say").then(argument("message", greedy_string()).executes(|ctx: &DemoContext| {
            let message: String = ctx.get_argument("message")?;
            let source = ctx.source();
            source.send(format!("[{}] {message}", source.display_name()));
            Ok(1)
        })),
    );
}

fn register_teleport(dispatcher: &mut CommandDispatcher<DemoSource>) {
    let teleport = dispatcher.register(
        literal("teleport")
            .requires(DemoSource::is_operator)
            .then(argument("location", vec3()).executes(|ctx: &DemoContext| {
                let target = source_entity(ctx.source())?;
                let location = Vec3Argument::get_vec3(ctx, "location")?;
                teleport_to(ctx.source(), &[target], &ctx.source().world(), location)
            }))
            .then(
                argument("targets", entities())
                    .then(argument("location", vec3()).executes(|ctx: &DemoContext| {
                        let targets = EntityArgument::get_entities(ctx, "targets")?;
                        let location = Vec3Argument::get_vec3(ctx, "location")?;
                        teleport_to(ctx.source(), &targets, &ctx.source().world(), location)
                    }))
                    .then(argument("destination", entity()).executes(|ctx: &DemoContext| {
                        let targets = EntityArgument::get_entities(ctx, "targets")?;
                        let destination = EntityArgument::get_entity(ctx, "destination")?;
                        teleport_to(
                            ctx.source(),
                            &targets,
                            &destination.world(),
                            destination.position(),
                        )
                    })),
            ),
    );
    dispatcher.register(
        literal("tp")
            .requires(DemoSource::is_operator)
            .redirect(teleport),
    );
}

fn teleport_to(
    source: &DemoSource,
    targets: &[EntityRef],
    world: &ResourceLocation,
    location: Vec3,
) -> CommandResult<i32> {
    let mut moved = 0;
    for target in targets {
        if let Some(entity) = source.demo_world().get(target.uuid()) {
            entity.teleport(world.clone(), location);
            moved += 1;
        }
    }
    let Vec3 { x, y, z } = location;
    match targets {
        [single] => source.send(format!(
            "Teleported {} to {x:.2}, {y:.2}, {z:.2}",
            single.name()
        )),
        _ => source.send(format!("Teleported {moved} entities to {x:.2}, {y:.2}, {z:.2}")),
    }
    Ok(moved)
}

fn register_kill(dispatcher: &mut CommandDispatcher<DemoSource>) {
    dispatcher.register(
        literal("kill")
            .requires(DemoSource::is_operator)
            .executes(|ctx: &DemoContext| kill(ctx.source(), &[source_entity(ctx.source())?]))
            .then(argument("targets", entities()).executes(|ctx: &DemoContext| {
                kill(ctx.source(), &EntityArgument::get_entities(ctx, "targets")?)
            })),
    );
}

fn kill(source: &DemoSource, targets: &[EntityRef]) -> CommandResult<i32> {
    let mut killed = 0;
    for target in targets {
        if source.demo_world().remove(target.uuid()) {
            killed += 1;
        }
    }
    match targets {
        [single] => source.send(format!("Killed {}", single.name())),
        _ => source.send(format!("Killed {killed} entities")),
    }
    Ok(killed)
}

fn register_list(dispatcher: &mut CommandDispatcher<DemoSource>) {
    dispatcher.register(
        literal("list")
            .executes(|ctx: &DemoContext| list(ctx.source(), false))
            .then(literal("uuids").executes(|ctx: &DemoContext| list(ctx.source(), true))),
    );
}

fn list(source: &DemoSource, uuids: bool) -> CommandResult<i32> {
    let players = source.entity_provider().players();
    let names: Vec<String> = players
        .iter()
        .map(|player| {
            if uuids {
                format!("{} ({})", player.name(), player.uuid())
            } else {
                player.name()
            }
        })
        .collect();
    source.send(format!(
        "There are {} of a max of {MAX_PLAYERS} players online: {}",
        names.len(),
        names.join(", ")
    ));
    Ok(i32::try_from(names.len()).unwrap_or(i32::MAX))
}

fn register_execute(dispatcher: &mut CommandDispatcher<DemoSource>) {
    let root = dispatcher.root();
    let execute = dispatcher.register(literal("execute").requires(DemoSource::is_operator));
    dispatcher.register(
        literal("execute")
            .requires(DemoSource::is_operator)
            .then(literal("run").redirect(root))
            .then(literal("as").then(argument("targets", entities()).fork(
                execute,
                |ctx: &DemoContext| {
                    let targets = EntityArgument::get_optional_entities(ctx, "targets")?;
                    Ok(targets
                        .into_iter()
                        .map(|target| ctx.source().with_entity(target))
                        .collect())
                },
            )))
            .then(literal("at").then(argument("targets", entities()).fork(
                execute,
                |ctx: &DemoContext| {
                    let targets = EntityArgument::get_optional_entities(ctx, "targets")?;
                    Ok(targets
                        .iter()
                        .map(|target| ctx.source().at_entity(target))
                        .collect())
                },
            )))
            .then(literal("positioned").then(argument("pos", vec3()).redirect_with(
                execute,
                |ctx: &DemoContext| {
                    let position = Vec3Argument::get_vec3(ctx, "pos")?;
                    Ok(vec![ctx.source().with_position(position)])
                },
            ))),
    );
}

fn source_entity(source: &DemoSource) -> CommandResult<EntityRef> {
    source.entity().ok_or_else(|| ENTITY_REQUIRED.create())
}

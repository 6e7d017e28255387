//! Argument types producing [`Coordinates`].

use sigil_dispatch::{
    ArgumentSuggestions, ArgumentType, CommandContext, SuggestionFuture, SuggestionsBuilder,
};
use sigil_foundation::{CommandResult, StringReader};

use super::{
    Coordinates, LocalCoordinates, POS2D_INCOMPLETE, POS_OUT_OF_BOUNDS, POS_OUT_OF_WORLD,
    POS_UNLOADED, ROTATION_INCOMPLETE, WorldCoordinate, WorldCoordinates,
    expect_component_separator,
};
use crate::math::{BlockPos, ColumnPos, Vec2, Vec3};
use crate::source::{CommandSource, TextCoordinates, is_in_spawnable_bounds};
use crate::suggest::{suggest_2d_coordinates, suggest_coordinates};

fn parses<T: ArgumentType>(argument: &T, text: &str) -> bool {
    argument.parse(&mut StringReader::new(text)).is_ok()
}

fn local_or(remaining: &str, hints: Vec<TextCoordinates>) -> Vec<TextCoordinates> {
    if remaining.starts_with('^') {
        vec![TextCoordinates::local()]
    } else {
        hints
    }
}

fn parse_world_or_local(
    reader: &mut StringReader,
    world: impl FnOnce(&mut StringReader) -> CommandResult<WorldCoordinates>,
) -> CommandResult<Coordinates> {
    if reader.peek() == Some('^') {
        LocalCoordinates::parse(reader).map(Coordinates::Local)
    } else {
        world(reader).map(Coordinates::World)
    }
}

/// A precise position: `x y z`, each absolute, `~` or all `^`.
#[derive(Clone, Copy, Debug)]
pub struct Vec3Argument {
    center_correct: bool,
}

/// Creates a position argument that moves whole absolute x and z values to
/// the centre of their block.
#[must_use]
pub fn vec3() -> Vec3Argument {
    Vec3Argument::new(true)
}

impl Vec3Argument {
    /// Creates a position argument.
    #[must_use]
    pub const fn new(center_correct: bool) -> Self {
        Self { center_correct }
    }

    /// Returns the parsed coordinates.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_coordinates<S>(context: &CommandContext<S>, name: &str) -> CommandResult<Coordinates> {
        context.get_argument(name)
    }

    /// Returns the position for the context's source.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_vec3<S: CommandSource>(context: &CommandContext<S>, name: &str) -> CommandResult<Vec3> {
        Ok(Self::get_coordinates(context, name)?.position(context.source()))
    }
}

impl ArgumentType for Vec3Argument {
    type Value = Coordinates;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<Coordinates> {
        parse_world_or_local(reader, |reader| {
            WorldCoordinates::parse_double(reader, self.center_correct)
        })
    }

    fn examples(&self) -> Vec<String> {
        ["0 0 0", "~ ~ ~", "^ ^ ^", "^1 ^ ^-5", "0.1 -0.5 .9", "~0.5 ~1 ~-5"]
            .map(String::from)
            .to_vec()
    }
}

impl<S: CommandSource> ArgumentSuggestions<S> for Vec3Argument {
    fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        let remaining = builder.remaining().to_string();
        let hints = local_or(&remaining, context.source().absolute_coordinates());
        suggest_coordinates(&remaining, &hints, &mut builder, |text| parses(self, text));
        builder.build_future()
    }
}

/// A block position: three integers, `~` offsets or all `^`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockPosArgument;

/// Creates a block position argument.
#[must_use]
pub fn block_pos() -> BlockPosArgument {
    BlockPosArgument
}

impl BlockPosArgument {
    /// Returns the block for the context's source, without any checks.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_block_pos<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<BlockPos> {
        let coordinates: Coordinates = context.get_argument(name)?;
        Ok(coordinates.block_pos(context.source()))
    }

    /// Returns the block for the context's source if it is loaded and
    /// inside the world.
    ///
    /// # Errors
    ///
    /// Fails with [`POS_UNLOADED`] or [`POS_OUT_OF_WORLD`].
    pub fn get_loaded_block_pos<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<BlockPos> {
        let pos = Self::get_block_pos(context, name)?;
        let source = context.source();
        if !source.is_loaded(pos) {
            Err(POS_UNLOADED.create())
        } else if !source.is_in_world_bounds(pos) {
            Err(POS_OUT_OF_WORLD.create())
        } else {
            Ok(pos)
        }
    }

    /// Returns the block for the context's source if entities may spawn
    /// there.
    ///
    /// # Errors
    ///
    /// Fails with [`POS_OUT_OF_BOUNDS`].
    pub fn get_spawnable_block_pos<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<BlockPos> {
        let pos = Self::get_block_pos(context, name)?;
        if is_in_spawnable_bounds(pos) {
            Ok(pos)
        } else {
            Err(POS_OUT_OF_BOUNDS.create())
        }
    }
}

impl ArgumentType for BlockPosArgument {
    type Value = Coordinates;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<Coordinates> {
        parse_world_or_local(reader, WorldCoordinates::parse_int)
    }

    fn examples(&self) -> Vec<String> {
        ["0 0 0", "~ ~ ~", "^ ^ ^", "^1 ^ ^-5", "~0.5 ~1 ~-5"]
            .map(String::from)
            .to_vec()
    }
}

impl<S: CommandSource> ArgumentSuggestions<S> for BlockPosArgument {
    fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        let remaining = builder.remaining().to_string();
        let hints = local_or(&remaining, context.source().relevant_coordinates());
        suggest_coordinates(&remaining, &hints, &mut builder, |text| parses(self, text));
        builder.build_future()
    }
}

/// Reads `x z`, filling in a relative `~` for y.
fn parse_column(
    reader: &mut StringReader,
    incomplete: &sigil_foundation::SimpleErrorType,
    component: impl Fn(&mut StringReader) -> CommandResult<WorldCoordinate>,
) -> CommandResult<Coordinates> {
    let start = reader.cursor();
    if !reader.can_read() {
        return Err(incomplete.create_with_context(reader));
    }
    let x = component(reader)?;
    expect_component_separator(reader, start, incomplete)?;
    let z = component(reader)?;
    Ok(Coordinates::World(WorldCoordinates::new(
        x,
        WorldCoordinate::current(),
        z,
    )))
}

/// A horizontal position: `x z`.
#[derive(Clone, Copy, Debug)]
pub struct Vec2Argument {
    center_correct: bool,
}

/// Creates a horizontal position argument that centre-corrects both
/// components.
#[must_use]
pub fn vec2() -> Vec2Argument {
    Vec2Argument::new(true)
}

impl Vec2Argument {
    /// Creates a horizontal position argument.
    #[must_use]
    pub const fn new(center_correct: bool) -> Self {
        Self { center_correct }
    }

    /// Returns the position for the context's source, as `(x, z)`.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_vec2<S: CommandSource>(context: &CommandContext<S>, name: &str) -> CommandResult<Vec2> {
        let coordinates: Coordinates = context.get_argument(name)?;
        let pos = coordinates.position(context.source());
        Ok(Vec2::new(pos.x as f32, pos.z as f32))
    }
}

impl ArgumentType for Vec2Argument {
    type Value = Coordinates;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<Coordinates> {
        parse_column(reader, &POS2D_INCOMPLETE, |reader| {
            WorldCoordinate::parse_double(reader, self.center_correct)
        })
    }

    fn examples(&self) -> Vec<String> {
        ["0 0", "~ ~", "0.1 -0.5", "~1 ~-2"].map(String::from).to_vec()
    }
}

impl<S: CommandSource> ArgumentSuggestions<S> for Vec2Argument {
    fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        let remaining = builder.remaining().to_string();
        let hints = context.source().absolute_coordinates();
        suggest_2d_coordinates(&remaining, &hints, &mut builder, |text| parses(self, text));
        builder.build_future()
    }
}

/// A block column: integer `x z`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColumnPosArgument;

/// Creates a block column argument.
#[must_use]
pub fn column_pos() -> ColumnPosArgument {
    ColumnPosArgument
}

impl ColumnPosArgument {
    /// Returns the column for the context's source.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_column_pos<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<ColumnPos> {
        let coordinates: Coordinates = context.get_argument(name)?;
        let pos = coordinates.block_pos(context.source());
        Ok(ColumnPos::new(pos.x, pos.z))
    }
}

impl ArgumentType for ColumnPosArgument {
    type Value = Coordinates;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<Coordinates> {
        parse_column(reader, &POS2D_INCOMPLETE, WorldCoordinate::parse_int)
    }

    fn examples(&self) -> Vec<String> {
        ["0 0", "~ ~", "~1 ~-2"].map(String::from).to_vec()
    }
}

impl<S: CommandSource> ArgumentSuggestions<S> for ColumnPosArgument {
    fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        let remaining = builder.remaining().to_string();
        let hints = context.source().relevant_coordinates();
        suggest_2d_coordinates(&remaining, &hints, &mut builder, |text| parses(self, text));
        builder.build_future()
    }
}

/// A rotation: `yaw pitch`, each absolute or `~`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotationArgument;

/// Creates a rotation argument.
#[must_use]
pub fn rotation() -> RotationArgument {
    RotationArgument
}

impl RotationArgument {
    /// Returns the rotation for the context's source, pitch in `x` and yaw
    /// in `y`.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_rotation<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<Vec2> {
        let coordinates: Coordinates = context.get_argument(name)?;
        Ok(coordinates.rotation(context.source()))
    }
}

impl ArgumentType for RotationArgument {
    type Value = Coordinates;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<Coordinates> {
        let start = reader.cursor();
        if !reader.can_read() {
            return Err(ROTATION_INCOMPLETE.create_with_context(reader));
        }
        let yaw = WorldCoordinate::parse_double(reader, false)?;
        expect_component_separator(reader, start, &ROTATION_INCOMPLETE)?;
        let pitch = WorldCoordinate::parse_double(reader, false)?;
        Ok(Coordinates::World(WorldCoordinates::new(
            pitch,
            yaw,
            WorldCoordinate::current(),
        )))
    }

    fn examples(&self) -> Vec<String> {
        ["0 0", "~ ~", "~-5 ~5"].map(String::from).to_vec()
    }
}

impl<S> ArgumentSuggestions<S> for RotationArgument {}

//! Absolute, relative (`~`) and local (`^`) coordinates.
//!
//! Parsing keeps coordinates symbolic. They only become absolute when
//! resolved against a [`CommandSource`], so the same parsed value means
//! different places for different callers and at different times.
//!
//! Local coordinates are `^left ^up ^forwards` in the frame given by the
//! source's rotation:
//!
//! ```text
//! forwards = (cos(yaw+90)·cos(-pitch), sin(-pitch), sin(yaw+90)·cos(-pitch))
//! up       = (cos(yaw+90)·cos(90-pitch), sin(90-pitch), sin(yaw+90)·cos(90-pitch))
//! left     = -(forwards × up)
//! ```

mod arguments;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sigil_foundation::{CommandResult, SimpleErrorType, StringReader};

use crate::math::{BlockPos, Vec2, Vec3};
use crate::source::CommandSource;

pub use arguments::{
    BlockPosArgument, ColumnPosArgument, RotationArgument, Vec2Argument, Vec3Argument, block_pos,
    column_pos, rotation, vec2, vec3,
};

/// A coordinate component was expected.
pub static POS_MISSING_DOUBLE: SimpleErrorType =
    SimpleErrorType::new("argument.pos.missing.double", "Expected a coordinate");

/// A block coordinate component was expected.
pub static POS_MISSING_INT: SimpleErrorType =
    SimpleErrorType::new("argument.pos.missing.int", "Expected a block position");

/// `^` was mixed with `~` or absolute components.
pub static POS_MIXED: SimpleErrorType = SimpleErrorType::new(
    "argument.pos.mixed",
    "Cannot mix world & local coordinates (everything must either use ^ or not)",
);

/// Fewer than three components were given.
pub static POS3D_INCOMPLETE: SimpleErrorType =
    SimpleErrorType::new("argument.pos3d.incomplete", "Incomplete (expected 3 coordinates)");

/// Fewer than two components were given.
pub static POS2D_INCOMPLETE: SimpleErrorType =
    SimpleErrorType::new("argument.pos2d.incomplete", "Incomplete (expected 2 coordinates)");

/// Fewer than two rotation components were given.
pub static ROTATION_INCOMPLETE: SimpleErrorType =
    SimpleErrorType::new("argument.rotation.incomplete", "Incomplete (expected 2 coordinates)");

/// The position's chunk is not loaded.
pub static POS_UNLOADED: SimpleErrorType =
    SimpleErrorType::new("argument.pos.unloaded", "That position is not loaded");

/// The position is above or below the world.
pub static POS_OUT_OF_WORLD: SimpleErrorType =
    SimpleErrorType::new("argument.pos.outofworld", "That position is out of this world!");

/// The position is outside the spawnable area.
pub static POS_OUT_OF_BOUNDS: SimpleErrorType = SimpleErrorType::new(
    "argument.pos.outofbounds",
    "That position is outside the allowed boundaries.",
);

/// One component of world coordinates: an absolute value, or an offset from
/// the source's value when `relative`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldCoordinate {
    relative: bool,
    value: f64,
}

impl WorldCoordinate {
    /// Creates a component.
    #[must_use]
    pub const fn new(relative: bool, value: f64) -> Self {
        Self { relative, value }
    }

    /// A relative component with no offset (`~`).
    #[must_use]
    pub const fn current() -> Self {
        Self::new(true, 0.0)
    }

    /// Returns true for `~` components.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.relative
    }

    /// Returns the absolute value or the offset.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Resolves the component against `base`.
    #[must_use]
    pub fn get(&self, base: f64) -> f64 {
        if self.relative {
            self.value + base
        } else {
            self.value
        }
    }

    /// Reads a component with a fractional value.
    ///
    /// With `center_correct`, an absolute value written without a `.` is
    /// moved to the centre of its block (`+0.5`).
    ///
    /// # Errors
    ///
    /// Fails on `^`, at end of input, or on a malformed number.
    pub fn parse_double(reader: &mut StringReader, center_correct: bool) -> CommandResult<Self> {
        if reader.peek() == Some('^') {
            return Err(POS_MIXED.create_with_context(reader));
        }
        if !reader.can_read() {
            return Err(POS_MISSING_DOUBLE.create_with_context(reader));
        }
        let relative = read_relative(reader);
        let start = reader.cursor();
        let mut value = if reader.peek().is_some_and(|c| c != ' ') {
            reader.read_double()?
        } else {
            0.0
        };
        let text = reader.substring(start, reader.cursor());
        if relative && text.is_empty() {
            return Ok(Self::current());
        }
        if !text.contains('.') && !relative && center_correct {
            value += 0.5;
        }
        Ok(Self::new(relative, value))
    }

    /// Reads a block component: an integer, or any offset when relative.
    ///
    /// # Errors
    ///
    /// Fails on `^`, at end of input, or on a malformed number.
    pub fn parse_int(reader: &mut StringReader) -> CommandResult<Self> {
        if reader.peek() == Some('^') {
            return Err(POS_MIXED.create_with_context(reader));
        }
        if !reader.can_read() {
            return Err(POS_MISSING_INT.create_with_context(reader));
        }
        let relative = read_relative(reader);
        let value = if reader.peek().is_some_and(|c| c != ' ') {
            if relative {
                reader.read_double()?
            } else {
                f64::from(reader.read_int()?)
            }
        } else {
            0.0
        };
        Ok(Self::new(relative, value))
    }
}

fn read_relative(reader: &mut StringReader) -> bool {
    if reader.peek() == Some('~') {
        reader.skip();
        true
    } else {
        false
    }
}

/// Three world components, each absolute or relative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldCoordinates {
    /// First component.
    pub x: WorldCoordinate,
    /// Second component.
    pub y: WorldCoordinate,
    /// Third component.
    pub z: WorldCoordinate,
}

impl WorldCoordinates {
    /// Creates coordinates from components.
    #[must_use]
    pub const fn new(x: WorldCoordinate, y: WorldCoordinate, z: WorldCoordinate) -> Self {
        Self { x, y, z }
    }

    /// `~ ~ ~`.
    #[must_use]
    pub const fn current() -> Self {
        Self::new(
            WorldCoordinate::current(),
            WorldCoordinate::current(),
            WorldCoordinate::current(),
        )
    }

    /// Fixed coordinates at `pos`.
    #[must_use]
    pub const fn absolute(pos: Vec3) -> Self {
        Self::new(
            WorldCoordinate::new(false, pos.x),
            WorldCoordinate::new(false, pos.y),
            WorldCoordinate::new(false, pos.z),
        )
    }

    /// Fixed rotation `rot`, with no third component.
    #[must_use]
    pub fn absolute_rotation(rot: Vec2) -> Self {
        Self::new(
            WorldCoordinate::new(false, f64::from(rot.x)),
            WorldCoordinate::new(false, f64::from(rot.y)),
            WorldCoordinate::current(),
        )
    }

    /// Reads three block components.
    ///
    /// # Errors
    ///
    /// Fails on a malformed component; fewer than three components fail with
    /// the cursor reset to the first.
    pub fn parse_int(reader: &mut StringReader) -> CommandResult<Self> {
        let start = reader.cursor();
        let x = WorldCoordinate::parse_int(reader)?;
        expect_component_separator(reader, start, &POS3D_INCOMPLETE)?;
        let y = WorldCoordinate::parse_int(reader)?;
        expect_component_separator(reader, start, &POS3D_INCOMPLETE)?;
        let z = WorldCoordinate::parse_int(reader)?;
        Ok(Self::new(x, y, z))
    }

    /// Reads three fractional components. `y` is never centre-corrected.
    ///
    /// # Errors
    ///
    /// Fails on a malformed component; fewer than three components fail with
    /// the cursor reset to the first.
    pub fn parse_double(reader: &mut StringReader, center_correct: bool) -> CommandResult<Self> {
        let start = reader.cursor();
        let x = WorldCoordinate::parse_double(reader, center_correct)?;
        expect_component_separator(reader, start, &POS3D_INCOMPLETE)?;
        let y = WorldCoordinate::parse_double(reader, false)?;
        expect_component_separator(reader, start, &POS3D_INCOMPLETE)?;
        let z = WorldCoordinate::parse_double(reader, center_correct)?;
        Ok(Self::new(x, y, z))
    }
}

/// Consumes the space between two components, or fails with `incomplete`
/// after moving the cursor back to `start`.
pub(crate) fn expect_component_separator(
    reader: &mut StringReader,
    start: usize,
    incomplete: &SimpleErrorType,
) -> CommandResult<()> {
    if reader.peek() == Some(' ') {
        reader.skip();
        Ok(())
    } else {
        reader.set_cursor(start);
        Err(incomplete.create_with_context(reader))
    }
}

/// `^left ^up ^forwards` relative to the source's facing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalCoordinates {
    /// Offset to the left.
    pub left: f64,
    /// Offset upwards.
    pub up: f64,
    /// Offset forwards.
    pub forwards: f64,
}

impl LocalCoordinates {
    /// Creates local coordinates.
    #[must_use]
    pub const fn new(left: f64, up: f64, forwards: f64) -> Self {
        Self { left, up, forwards }
    }

    /// Reads three `^` components.
    ///
    /// # Errors
    ///
    /// A component without `^` is a mixed-type error, and a missing one is
    /// an incomplete error; both reset the cursor to the first component.
    pub fn parse(reader: &mut StringReader) -> CommandResult<Self> {
        let start = reader.cursor();
        let left = read_local(reader, start)?;
        expect_component_separator(reader, start, &POS3D_INCOMPLETE)?;
        let up = read_local(reader, start)?;
        expect_component_separator(reader, start, &POS3D_INCOMPLETE)?;
        let forwards = read_local(reader, start)?;
        Ok(Self::new(left, up, forwards))
    }

    /// Resolves against a position and a rotation (pitch in `x`, yaw in `y`).
    #[must_use]
    pub fn resolve(&self, origin: Vec3, rotation: Vec2) -> Vec3 {
        let radians = std::f32::consts::PI / 180.0;
        let f = ((rotation.y + 90.0) * radians).cos();
        let f1 = ((rotation.y + 90.0) * radians).sin();
        let f2 = (-rotation.x * radians).cos();
        let f3 = (-rotation.x * radians).sin();
        let f4 = ((-rotation.x + 90.0) * radians).cos();
        let f5 = ((-rotation.x + 90.0) * radians).sin();
        let forwards = Vec3::new(
            f64::from(f * f2),
            f64::from(f3),
            f64::from(f1 * f2),
        );
        let up = Vec3::new(
            f64::from(f * f4),
            f64::from(f5),
            f64::from(f1 * f4),
        );
        let left = forwards.cross(up).scale(-1.0);
        origin
            .add(forwards.scale(self.forwards))
            .add(up.scale(self.up))
            .add(left.scale(self.left))
    }
}

fn read_local(reader: &mut StringReader, start: usize) -> CommandResult<f64> {
    match reader.peek() {
        None => Err(POS_MISSING_DOUBLE.create_with_context(reader)),
        Some('^') => {
            reader.skip();
            if reader.peek().is_some_and(|c| c != ' ') {
                reader.read_double()
            } else {
                Ok(0.0)
            }
        }
        Some(_) => {
            reader.set_cursor(start);
            Err(POS_MIXED.create_with_context(reader))
        }
    }
}

/// Parsed coordinates of either kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Coordinates {
    /// Absolute or `~` components.
    World(WorldCoordinates),
    /// `^` components.
    Local(LocalCoordinates),
}

impl Coordinates {
    /// Resolves to a position for `source`.
    #[must_use]
    pub fn position<S: CommandSource>(&self, source: &S) -> Vec3 {
        match self {
            Coordinates::World(world) => {
                let base = source.position();
                Vec3::new(world.x.get(base.x), world.y.get(base.y), world.z.get(base.z))
            }
            Coordinates::Local(local) => local.resolve(source.position(), source.rotation()),
        }
    }

    /// Resolves the first two components as a rotation for `source`.
    /// Local coordinates carry no rotation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rotation<S: CommandSource>(&self, source: &S) -> Vec2 {
        match self {
            Coordinates::World(world) => {
                let base = source.rotation();
                Vec2::new(
                    world.x.get(f64::from(base.x)) as f32,
                    world.y.get(f64::from(base.y)) as f32,
                )
            }
            Coordinates::Local(_) => Vec2::ZERO,
        }
    }

    /// Resolves to the block containing [`Self::position`].
    #[must_use]
    pub fn block_pos<S: CommandSource>(&self, source: &S) -> BlockPos {
        BlockPos::containing(self.position(source))
    }

    /// Returns true if the first component depends on the source.
    #[must_use]
    pub fn is_x_relative(&self) -> bool {
        match self {
            Coordinates::World(world) => world.x.is_relative(),
            Coordinates::Local(_) => true,
        }
    }

    /// Returns true if the second component depends on the source.
    #[must_use]
    pub fn is_y_relative(&self) -> bool {
        match self {
            Coordinates::World(world) => world.y.is_relative(),
            Coordinates::Local(_) => true,
        }
    }

    /// Returns true if the third component depends on the source.
    #[must_use]
    pub fn is_z_relative(&self) -> bool {
        match self {
            Coordinates::World(world) => world.z.is_relative(),
            Coordinates::Local(_) => true,
        }
    }
}

impl From<WorldCoordinates> for Coordinates {
    fn from(world: WorldCoordinates) -> Self {
        Coordinates::World(world)
    }
}

impl From<LocalCoordinates> for Coordinates {
    fn from(local: LocalCoordinates) -> Self {
        Coordinates::Local(local)
    }
}

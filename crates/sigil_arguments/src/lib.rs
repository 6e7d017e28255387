//! Coordinate arguments, resource ids and the entity selector language for
//! Sigil.
//!
//! This crate provides:
//! - [`coordinates`] - `x y z` positions in world (`~`) and local (`^`) form
//! - [`selector`] - `@p`, `@e[type=pig,limit=3]` and friends, resolved
//!   against a host's entities
//! - [`source`] - The traits a host implements to expose its world
//! - [`bounds`] - `min..max` ranges used by selector options
//!
//! Arguments plug into a [`sigil_dispatch::CommandDispatcher`] whose source
//! type implements [`CommandSource`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bounds;
pub mod coordinates;
pub mod entity_type;
pub mod game_mode;
pub mod math;
pub mod resource;
pub mod selector;
pub mod source;
pub mod suggest;

pub use bounds::{DoubleBounds, IntBounds, WrappedBounds};
pub use coordinates::{
    BlockPosArgument, ColumnPosArgument, Coordinates, LocalCoordinates, RotationArgument,
    Vec2Argument, Vec3Argument, WorldCoordinate, WorldCoordinates, block_pos, column_pos, rotation,
    vec2, vec3,
};
pub use entity_type::EntityTypeRegistry;
pub use game_mode::{GameMode, GameModeArgument, game_mode};
pub use math::{Aabb, BlockPos, ChunkPos, ColumnPos, Vec2, Vec3};
pub use resource::{ResourceLocation, ResourceLocationArgument, id};
pub use selector::{
    EntityArgument, EntitySelector, EntitySelectorParser, SelectorOptions, SelectorOrder,
    entities, entity, player, players,
};
pub use source::{CommandSource, Entity, EntityProvider, EntityRef, TextCoordinates, USE_SELECTORS};

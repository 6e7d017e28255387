//! What arguments in this crate need from the command source and the world.
//!
//! The crate never owns game state. A host implements [`CommandSource`] for
//! its source type, [`EntityProvider`] for its world access and [`Entity`]
//! for whatever lives in the world; coordinates and selectors are resolved
//! against those traits at execution time.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game_mode::GameMode;
use crate::math::{Aabb, BlockPos, Vec2, Vec3};
use crate::resource::ResourceLocation;

/// Capability required to use `@` selectors.
pub const USE_SELECTORS: &str = "selectors";

/// Horizontal extent of the spawnable area, in blocks from the origin.
pub const MAX_HORIZONTAL_SPAWN: i32 = 30_000_000;

/// Vertical extent of the spawnable area, in blocks from the origin.
pub const MAX_VERTICAL_SPAWN: i32 = 20_000_000;

/// A textual coordinate hint offered as a completion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextCoordinates {
    /// First component.
    pub x: String,
    /// Second component.
    pub y: String,
    /// Third component.
    pub z: String,
}

impl TextCoordinates {
    /// Creates a hint.
    #[must_use]
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// `~ ~ ~`, the source's own position.
    #[must_use]
    pub fn global() -> Self {
        Self::new("~", "~", "~")
    }

    /// `^ ^ ^`, the source's own position in local space.
    #[must_use]
    pub fn local() -> Self {
        Self::new("^", "^", "^")
    }
}

/// Shared handle to an entity.
pub type EntityRef = Arc<dyn Entity>;

/// Anything a selector can pick.
///
/// Players are entities whose [`Entity::is_player`] is true; the
/// player-only accessors return `None` for everything else.
pub trait Entity: Send + Sync + fmt::Debug {
    /// Stable unique id.
    fn uuid(&self) -> Uuid;

    /// Display name; for players, the account name.
    fn name(&self) -> String;

    /// Registry id of the entity's type.
    fn entity_type(&self) -> ResourceLocation;

    /// Returns true for players.
    fn is_player(&self) -> bool;

    /// Returns false once the entity has died or been removed.
    fn is_alive(&self) -> bool {
        true
    }

    /// Returns true for living entities, the only ones that can join teams.
    fn is_living(&self) -> bool {
        true
    }

    /// Feet position.
    fn position(&self) -> Vec3;

    /// Pitch and yaw, in degrees.
    fn rotation(&self) -> Vec2;

    /// Collision box in world space.
    fn bounding_box(&self) -> Aabb {
        Aabb::around_feet(self.position(), 0.6, 1.8)
    }

    /// Id of the world the entity is in.
    fn world(&self) -> ResourceLocation;

    /// Scoreboard tags.
    fn tags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Name of the entity's team, if any.
    fn team(&self) -> Option<String> {
        None
    }

    /// Game mode, for players.
    fn game_mode(&self) -> Option<GameMode> {
        None
    }

    /// Experience level, for players.
    fn experience_level(&self) -> Option<i32> {
        None
    }

    /// Score on `objective`, if the objective exists and the entity has one.
    fn score(&self, _objective: &str) -> Option<i32> {
        None
    }

    /// Whether an advancement is done, or `None` if it does not exist.
    fn advancement_done(&self, _advancement: &ResourceLocation) -> Option<bool> {
        None
    }

    /// Whether one criterion of an advancement is done, or `None` if either
    /// does not exist.
    fn criterion_done(&self, _advancement: &ResourceLocation, _criterion: &str) -> Option<bool> {
        None
    }

    /// Evaluates a named host predicate; unknown predicates never match.
    fn matches_predicate(&self, _predicate: &ResourceLocation) -> bool {
        false
    }

    /// Squared distance from the feet to `pos`.
    fn distance_to_sqr(&self, pos: Vec3) -> f64 {
        self.position().distance_sqr(pos)
    }
}

/// Read access to live entities across worlds.
pub trait EntityProvider: Send + Sync {
    /// Ids of every loaded world.
    fn worlds(&self) -> Vec<ResourceLocation>;

    /// Every entity in `world`.
    fn entities_in(&self, world: &ResourceLocation) -> Vec<EntityRef>;

    /// Every online player, across worlds.
    fn players(&self) -> Vec<EntityRef>;

    /// The online player with exactly this name.
    fn player_by_name(&self, name: &str) -> Option<EntityRef> {
        self.players().into_iter().find(|player| player.name() == name)
    }

    /// The entity with this id, in any world.
    fn entity_by_uuid(&self, uuid: Uuid) -> Option<EntityRef> {
        self.worlds()
            .iter()
            .find_map(|world| self.entities_in(world).into_iter().find(|e| e.uuid() == uuid))
    }

    /// The online player with this id.
    fn player_by_uuid(&self, uuid: Uuid) -> Option<EntityRef> {
        self.players().into_iter().find(|player| player.uuid() == uuid)
    }
}

/// The caller of a command, as seen by coordinate and selector arguments.
pub trait CommandSource: Clone + Send + Sync + 'static {
    /// Returns true if the source holds `capability`.
    fn has_permission(&self, capability: &str) -> bool;

    /// Position commands execute at.
    fn position(&self) -> Vec3;

    /// Rotation commands execute with: pitch in `x`, yaw in `y`.
    fn rotation(&self) -> Vec2;

    /// Id of the world commands execute in.
    fn world(&self) -> ResourceLocation;

    /// The entity executing, if any.
    fn entity(&self) -> Option<EntityRef>;

    /// Access to live entities.
    fn entity_provider(&self) -> &dyn EntityProvider;

    /// Names of online players, for completion.
    fn online_player_names(&self) -> Vec<String> {
        self.entity_provider()
            .players()
            .iter()
            .map(|player| player.name())
            .collect()
    }

    /// Ids of entities the user is pointing at, for completion.
    fn selected_entities(&self) -> Vec<String> {
        Vec::new()
    }

    /// Block coordinate hints for completion.
    fn relevant_coordinates(&self) -> Vec<TextCoordinates> {
        vec![TextCoordinates::global()]
    }

    /// Precise coordinate hints for completion.
    fn absolute_coordinates(&self) -> Vec<TextCoordinates> {
        vec![TextCoordinates::global()]
    }

    /// Seed for `sort=random`.
    fn random_seed(&self) -> u64 {
        0
    }

    /// Returns true if the chunk holding `pos` is loaded.
    fn is_loaded(&self, _pos: BlockPos) -> bool {
        true
    }

    /// Returns true if `pos` is within the build height of the world.
    fn is_in_world_bounds(&self, pos: BlockPos) -> bool {
        (-64..320).contains(&pos.y)
    }
}

/// Returns true if `pos` lies in the area entities may spawn in.
#[must_use]
pub fn is_in_spawnable_bounds(pos: BlockPos) -> bool {
    pos.x.abs() < MAX_HORIZONTAL_SPAWN
        && pos.z.abs() < MAX_HORIZONTAL_SPAWN
        && pos.y.abs() < MAX_VERTICAL_SPAWN
}

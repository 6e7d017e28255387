//! Parsed selectors and their resolution against live entities.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use sigil_foundation::CommandResult;
use tracing::{debug, trace};
use uuid::Uuid;

use super::{NO_ENTITY_FOUND, NO_PLAYER_FOUND, SELECTORS_NOT_ALLOWED, TOO_MANY_ENTITIES};
use crate::bounds::DoubleBounds;
use crate::math::{Aabb, Vec3};
use crate::resource::ResourceLocation;
use crate::source::{CommandSource, Entity, EntityRef, USE_SELECTORS};

/// One term of a selector's filter.
pub type EntityPredicate = Arc<dyn Fn(&dyn Entity) -> bool + Send + Sync>;

/// How matched entities are ordered before the result limit is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectorOrder {
    /// World order; collection stops once the limit is reached.
    #[default]
    Arbitrary,
    /// Closest to the origin first.
    Nearest,
    /// Farthest from the origin first.
    Furthest,
    /// Shuffled with the source's random seed.
    Random,
}

impl SelectorOrder {
    /// Every order, in the sequence they are suggested.
    pub const ALL: [SelectorOrder; 4] = [
        SelectorOrder::Nearest,
        SelectorOrder::Furthest,
        SelectorOrder::Random,
        SelectorOrder::Arbitrary,
    ];

    /// Returns the value written after `sort=`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SelectorOrder::Arbitrary => "arbitrary",
            SelectorOrder::Nearest => "nearest",
            SelectorOrder::Furthest => "furthest",
            SelectorOrder::Random => "random",
        }
    }

    /// Looks up an order by its `sort=` value.
    #[must_use]
    pub fn by_name(name: &str) -> Option<SelectorOrder> {
        Self::ALL.into_iter().find(|order| order.name() == name)
    }
}

/// Replacement for some components of the source position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionOverride {
    /// Replaces the x component.
    pub x: Option<f64>,
    /// Replaces the y component.
    pub y: Option<f64>,
    /// Replaces the z component.
    pub z: Option<f64>,
}

impl PositionOverride {
    /// Returns true if no component is replaced.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Applies the override to `pos`.
    #[must_use]
    pub fn apply(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            self.x.unwrap_or(pos.x),
            self.y.unwrap_or(pos.y),
            self.z.unwrap_or(pos.z),
        )
    }
}

/// A parsed selector.
///
/// Selectors hold no entity references. Every `find_*` call enumerates the
/// provider's current entities again.
#[derive(Clone)]
pub struct EntitySelector {
    pub(crate) max_results: usize,
    pub(crate) includes_entities: bool,
    pub(crate) world_limited: bool,
    pub(crate) predicates: Vec<EntityPredicate>,
    pub(crate) distance: DoubleBounds,
    pub(crate) position: PositionOverride,
    pub(crate) aabb: Option<Aabb>,
    pub(crate) order: SelectorOrder,
    pub(crate) current_entity: bool,
    pub(crate) player_name: Option<String>,
    pub(crate) entity_uuid: Option<Uuid>,
    pub(crate) type_limit: Option<ResourceLocation>,
    pub(crate) uses_selector: bool,
}

impl EntitySelector {
    /// Maximum number of results.
    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Returns false if only players can match.
    #[must_use]
    pub const fn includes_entities(&self) -> bool {
        self.includes_entities
    }

    /// Returns true for `@s`.
    #[must_use]
    pub const fn is_self_selector(&self) -> bool {
        self.current_entity
    }

    /// Returns true if only the source's world is searched.
    #[must_use]
    pub const fn is_world_limited(&self) -> bool {
        self.world_limited
    }

    /// Returns true if the selector was written with `@`.
    #[must_use]
    pub const fn uses_selector(&self) -> bool {
        self.uses_selector
    }

    /// Result ordering.
    #[must_use]
    pub const fn order(&self) -> SelectorOrder {
        self.order
    }

    /// Distance range from the origin.
    #[must_use]
    pub const fn distance(&self) -> DoubleBounds {
        self.distance
    }

    /// Search volume relative to the origin.
    #[must_use]
    pub const fn bounding_box(&self) -> Option<Aabb> {
        self.aabb
    }

    /// Components replacing the source position.
    #[must_use]
    pub const fn position_override(&self) -> PositionOverride {
        self.position
    }

    /// The player name, for the name form.
    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    /// The UUID, for the UUID form.
    #[must_use]
    pub const fn entity_uuid(&self) -> Option<Uuid> {
        self.entity_uuid
    }

    /// The single entity type candidates must have, if any.
    #[must_use]
    pub fn type_limit(&self) -> Option<&ResourceLocation> {
        self.type_limit.as_ref()
    }

    /// Number of filter terms.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Returns true if `entity` passes every filter when searched from
    /// `origin`.
    #[must_use]
    pub fn matches(&self, entity: &dyn Entity, origin: Vec3) -> bool {
        if self
            .type_limit
            .as_ref()
            .is_some_and(|kind| entity.entity_type() != *kind)
        {
            return false;
        }
        if let Some(aabb) = self.aabb {
            if !aabb.moved(origin).intersects(&entity.bounding_box()) {
                return false;
            }
        }
        if !self.distance.is_any() && !self.distance.matches_sqr(entity.distance_to_sqr(origin)) {
            return false;
        }
        self.predicates.iter().all(|predicate| predicate(entity))
    }

    fn check_permissions<S: CommandSource>(&self, source: &S) -> CommandResult<()> {
        if self.uses_selector && !source.has_permission(USE_SELECTORS) {
            return Err(SELECTORS_NOT_ALLOWED.create());
        }
        Ok(())
    }

    fn result_limit(&self) -> usize {
        if self.order == SelectorOrder::Arbitrary {
            self.max_results
        } else {
            usize::MAX
        }
    }

    /// Resolves the selector to every matching entity.
    ///
    /// # Errors
    ///
    /// Returns [`SELECTORS_NOT_ALLOWED`] if the selector uses `@` and the
    /// source lacks the capability.
    pub fn find_entities<S: CommandSource>(&self, source: &S) -> CommandResult<Vec<EntityRef>> {
        self.check_permissions(source)?;
        if !self.includes_entities {
            return self.find_players(source);
        }
        let provider = source.entity_provider();
        if let Some(name) = &self.player_name {
            return Ok(provider.player_by_name(name).into_iter().collect());
        }
        if let Some(uuid) = self.entity_uuid {
            return Ok(provider.entity_by_uuid(uuid).into_iter().collect());
        }

        let origin = self.position.apply(source.position());
        if self.current_entity {
            return Ok(source
                .entity()
                .filter(|entity| self.matches(entity.as_ref(), origin))
                .into_iter()
                .collect());
        }

        let worlds = if self.world_limited {
            vec![source.world()]
        } else {
            provider.worlds()
        };
        let limit = self.result_limit();
        let mut found = Vec::new();
        for world in worlds {
            if found.len() >= limit {
                break;
            }
            for entity in provider.entities_in(&world) {
                if found.len() >= limit {
                    break;
                }
                if self.matches(entity.as_ref(), origin) {
                    found.push(entity);
                }
            }
        }
        trace!(matched = found.len(), "selector enumerated entities");
        Ok(self.sort_and_limit(origin, found, source))
    }

    /// Resolves the selector to matching players only.
    ///
    /// # Errors
    ///
    /// Returns [`SELECTORS_NOT_ALLOWED`] if the selector uses `@` and the
    /// source lacks the capability.
    pub fn find_players<S: CommandSource>(&self, source: &S) -> CommandResult<Vec<EntityRef>> {
        self.check_permissions(source)?;
        let provider = source.entity_provider();
        if let Some(name) = &self.player_name {
            return Ok(provider.player_by_name(name).into_iter().collect());
        }
        if let Some(uuid) = self.entity_uuid {
            return Ok(provider.player_by_uuid(uuid).into_iter().collect());
        }

        let origin = self.position.apply(source.position());
        if self.current_entity {
            return Ok(source
                .entity()
                .filter(|entity| entity.is_player() && self.matches(entity.as_ref(), origin))
                .into_iter()
                .collect());
        }

        let world = source.world();
        let found: Vec<EntityRef> = provider
            .players()
            .into_iter()
            .filter(|player| !self.world_limited || player.world() == world)
            .filter(|player| self.matches(player.as_ref(), origin))
            .take(self.result_limit())
            .collect();
        trace!(matched = found.len(), "selector enumerated players");
        Ok(self.sort_and_limit(origin, found, source))
    }

    /// Resolves the selector to exactly one entity.
    ///
    /// # Errors
    ///
    /// Returns [`NO_ENTITY_FOUND`] for no match, [`TOO_MANY_ENTITIES`] for
    /// several, or a permission error.
    pub fn find_single_entity<S: CommandSource>(&self, source: &S) -> CommandResult<EntityRef> {
        let mut found = self.find_entities(source)?;
        match found.len() {
            0 => Err(NO_ENTITY_FOUND.create()),
            1 => Ok(found.remove(0)),
            _ => Err(TOO_MANY_ENTITIES.create()),
        }
    }

    /// Resolves the selector to exactly one player.
    ///
    /// # Errors
    ///
    /// Returns [`NO_PLAYER_FOUND`] unless exactly one player matches, or a
    /// permission error.
    pub fn find_single_player<S: CommandSource>(&self, source: &S) -> CommandResult<EntityRef> {
        let mut found = self.find_players(source)?;
        if found.len() == 1 {
            Ok(found.remove(0))
        } else {
            Err(NO_PLAYER_FOUND.create())
        }
    }

    fn sort_and_limit<S: CommandSource>(
        &self,
        origin: Vec3,
        mut found: Vec<EntityRef>,
        source: &S,
    ) -> Vec<EntityRef> {
        if found.len() > 1 {
            match self.order {
                SelectorOrder::Arbitrary => {}
                SelectorOrder::Nearest => found.sort_by(|a, b| compare_distance(a, b, origin)),
                SelectorOrder::Furthest => found.sort_by(|a, b| compare_distance(b, a, origin)),
                SelectorOrder::Random => {
                    let mut rng = ChaCha8Rng::seed_from_u64(source.random_seed());
                    found.shuffle(&mut rng);
                }
            }
        }
        if found.len() > self.max_results {
            debug!(
                matched = found.len(),
                limit = self.max_results,
                "truncating selector results"
            );
            found.truncate(self.max_results);
        }
        found
    }
}

fn compare_distance(a: &EntityRef, b: &EntityRef, origin: Vec3) -> Ordering {
    a.distance_to_sqr(origin)
        .total_cmp(&b.distance_to_sqr(origin))
}

impl fmt::Debug for EntitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySelector")
            .field("max_results", &self.max_results)
            .field("includes_entities", &self.includes_entities)
            .field("world_limited", &self.world_limited)
            .field("predicates", &self.predicates.len())
            .field("distance", &self.distance)
            .field("position", &self.position)
            .field("aabb", &self.aabb)
            .field("order", &self.order)
            .field("current_entity", &self.current_entity)
            .field("player_name", &self.player_name)
            .field("entity_uuid", &self.entity_uuid)
            .field("type_limit", &self.type_limit)
            .field("uses_selector", &self.uses_selector)
            .finish()
    }
}

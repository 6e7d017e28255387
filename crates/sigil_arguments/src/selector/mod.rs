//! The entity selector language.
//!
//! A selector is either a literal player name, an entity UUID, or `@` followed
//! by a selector type and an optional options block:
//!
//! ```text
//! Steve
//! dd12be42-52a9-4a91-a8a1-11c01849e498
//! @p
//! @e[type=!minecraft:pig,limit=5,sort=nearest]
//! ```
//!
//! [`EntitySelectorParser`] turns the text into an [`EntitySelector`], which
//! is resolved against live state by the `find_*` methods each time a command
//! runs. Option keys are looked up in a [`SelectorOptions`] registry, which
//! hosts can extend.

mod argument;
mod entity_selector;
mod options;
mod parser;
#[cfg(test)]
mod testing;

pub use argument::{EntityArgument, entities, entity, player, players};
pub use entity_selector::{EntityPredicate, EntitySelector, PositionOverride, SelectorOrder};
pub use options::{OptionGuard, OptionHandler, SelectorOption, SelectorOptions};
pub use parser::{EntitySelectorParser, SelectorSuggestions};

use sigil_foundation::{DynamicErrorType, SimpleErrorType};

/// Largest number of results a selector can return.
pub const MAX_RESULTS: usize = usize::MAX;

/// Longest player name accepted by the name form.
pub const MAX_NAME_LENGTH: usize = 16;

// ==================== Parser errors ====================

/// The token is neither a valid player name nor a UUID.
pub static INVALID_NAME_OR_UUID: SimpleErrorType =
    SimpleErrorType::new("argument.entity.invalid", "Invalid name or UUID");

/// `@` was not followed by anything.
pub static MISSING_SELECTOR_TYPE: SimpleErrorType =
    SimpleErrorType::new("argument.entity.selector.missing", "Missing selector type");

/// `@` was followed by an unknown character. Operand: the selector.
pub static UNKNOWN_SELECTOR_TYPE: DynamicErrorType =
    DynamicErrorType::new("argument.entity.selector.unknown", "Unknown selector type '{}'");

/// The source may not use `@` selectors.
pub static SELECTORS_NOT_ALLOWED: SimpleErrorType =
    SimpleErrorType::new("argument.entity.selector.not_allowed", "Selector not allowed");

/// The options block is not closed, or an option is followed by junk.
pub static EXPECTED_END_OF_OPTIONS: SimpleErrorType =
    SimpleErrorType::new("argument.entity.options.unterminated", "Expected end of options");

/// An option key with no `=`. Operand: the key.
pub static EXPECTED_OPTION_VALUE: DynamicErrorType = DynamicErrorType::new(
    "argument.entity.options.valueless",
    "Expected value for option '{}'",
);

// ==================== Option errors ====================

/// The option key is not registered. Operand: the key.
pub static UNKNOWN_OPTION: DynamicErrorType =
    DynamicErrorType::new("argument.entity.options.unknown", "Unknown option '{}'");

/// The option's guard rejected it. Operand: the key.
pub static INAPPLICABLE_OPTION: DynamicErrorType = DynamicErrorType::new(
    "argument.entity.options.inapplicable",
    "Option '{}' isn't applicable here",
);

/// `distance` has a negative bound.
pub static DISTANCE_NEGATIVE: SimpleErrorType = SimpleErrorType::new(
    "argument.entity.options.distance.negative",
    "Distance cannot be negative",
);

/// `level` has a negative bound.
pub static LEVEL_NEGATIVE: SimpleErrorType = SimpleErrorType::new(
    "argument.entity.options.level.negative",
    "Level shouldn't be negative",
);

/// `limit` is zero or negative.
pub static LIMIT_TOO_SMALL: SimpleErrorType = SimpleErrorType::new(
    "argument.entity.options.limit.toosmall",
    "Limit must be at least 1",
);

/// `sort` has an unknown value. Operand: the value.
pub static SORT_UNKNOWN: DynamicErrorType = DynamicErrorType::new(
    "argument.entity.options.sort.irreversible",
    "Invalid or unknown sort type '{}'",
);

/// `gamemode` has an unknown value. Operand: the value.
pub static GAME_MODE_UNKNOWN: DynamicErrorType = DynamicErrorType::new(
    "argument.entity.options.mode.invalid",
    "Invalid or unknown game mode '{}'",
);

/// `type` names an unknown entity type. Operand: the id.
pub static ENTITY_TYPE_INVALID: DynamicErrorType = DynamicErrorType::new(
    "argument.entity.options.type.invalid",
    "Invalid or unknown entity type '{}'",
);

// ==================== Resolution errors ====================

/// A single-entity argument matched several entities.
pub static TOO_MANY_ENTITIES: SimpleErrorType = SimpleErrorType::new(
    "argument.entity.toomany",
    "Only one entity is allowed, but the provided selector allows more than one",
);

/// A single-player argument matched several players.
pub static TOO_MANY_PLAYERS: SimpleErrorType = SimpleErrorType::new(
    "argument.player.toomany",
    "Only one player is allowed, but the provided selector allows more than one",
);

/// A player argument was given a selector that can match non-players.
pub static ONLY_PLAYERS_ALLOWED: SimpleErrorType = SimpleErrorType::new(
    "argument.player.entities",
    "Only players may be affected by this command, but the provided selector includes entities",
);

/// Nothing matched an entity selector.
pub static NO_ENTITY_FOUND: SimpleErrorType =
    SimpleErrorType::new("argument.entity.notfound.entity", "No entity was found");

/// Nothing matched a player selector.
pub static NO_PLAYER_FOUND: SimpleErrorType =
    SimpleErrorType::new("argument.entity.notfound.player", "No player was found");


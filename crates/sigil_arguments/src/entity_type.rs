//! Known entity types and entity type tags.

use std::sync::{Arc, LazyLock};

use indexmap::{IndexMap, IndexSet};

use crate::resource::ResourceLocation;

const VANILLA_TYPES: &[&str] = &[
    "allay", "armor_stand", "arrow", "axolotl", "bat", "bee", "blaze", "boat", "camel", "cat",
    "cave_spider", "chicken", "cod", "cow", "creeper", "dolphin", "donkey", "drowned",
    "elder_guardian", "ender_dragon", "enderman", "endermite", "evoker", "experience_orb",
    "falling_block", "fireball", "fox", "frog", "ghast", "giant", "glow_squid", "goat",
    "guardian", "hoglin", "horse", "husk", "illusioner", "iron_golem", "item", "item_frame",
    "llama", "magma_cube", "minecart", "mooshroom", "mule", "ocelot", "painting", "panda",
    "parrot", "phantom", "pig", "piglin", "piglin_brute", "pillager", "player", "polar_bear",
    "pufferfish", "rabbit", "ravager", "salmon", "sheep", "shulker", "silverfish", "skeleton",
    "skeleton_horse", "slime", "snow_golem", "spectral_arrow", "spider", "squid", "stray",
    "strider", "tadpole", "tnt", "trader_llama", "trident", "tropical_fish", "turtle", "vex",
    "villager", "vindicator", "wandering_trader", "warden", "witch", "wither",
    "wither_skeleton", "wolf", "zoglin", "zombie", "zombie_horse", "zombie_villager",
    "zombified_piglin",
];

const VANILLA_TAGS: &[(&str, &[&str])] = &[
    ("arrows", &["arrow", "spectral_arrow"]),
    ("axolotl_hunt_targets", &["tropical_fish", "pufferfish", "salmon", "cod", "squid", "glow_squid", "tadpole"]),
    ("beehive_inhabitors", &["bee"]),
    ("impact_projectiles", &["arrow", "spectral_arrow", "trident", "fireball"]),
    ("raiders", &["evoker", "pillager", "ravager", "vindicator", "illusioner", "witch"]),
    ("skeletons", &["skeleton", "stray", "wither_skeleton"]),
    ("undead", &[
        "drowned", "husk", "phantom", "skeleton", "skeleton_horse", "stray", "wither",
        "wither_skeleton", "zoglin", "zombie", "zombie_horse", "zombie_villager",
        "zombified_piglin",
    ]),
    ("zombies", &["zombie", "husk", "drowned", "zombie_villager", "zombified_piglin"]),
];

static VANILLA: LazyLock<Arc<EntityTypeRegistry>> =
    LazyLock::new(|| Arc::new(EntityTypeRegistry::vanilla()));

/// The set of entity type ids `type=` accepts, and the tags grouping them.
#[derive(Clone, Debug, Default)]
pub struct EntityTypeRegistry {
    types: IndexSet<ResourceLocation>,
    tags: IndexMap<ResourceLocation, IndexSet<ResourceLocation>>,
}

impl EntityTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the vanilla types and tags.
    #[must_use]
    pub fn vanilla() -> Self {
        let mut registry = Self::new();
        for name in VANILLA_TYPES {
            registry.register_default(name);
        }
        for (tag, members) in VANILLA_TAGS {
            let tag = vanilla_id(tag);
            for member in *members {
                registry.add_to_tag(tag.clone(), vanilla_id(member));
            }
        }
        registry
    }

    /// Returns a shared handle to the vanilla registry.
    #[must_use]
    pub fn shared_vanilla() -> Arc<Self> {
        Arc::clone(&VANILLA)
    }

    /// Returns the vanilla registry by reference.
    #[must_use]
    pub fn vanilla_ref() -> &'static Self {
        &VANILLA
    }

    fn register_default(&mut self, name: &str) {
        self.types.insert(vanilla_id(name));
    }

    /// Adds an entity type.
    pub fn register(&mut self, id: ResourceLocation) -> &mut Self {
        self.types.insert(id);
        self
    }

    /// Adds `member` to `tag`, creating the tag if needed.
    pub fn add_to_tag(&mut self, tag: ResourceLocation, member: ResourceLocation) -> &mut Self {
        self.tags.entry(tag).or_default().insert(member);
        self
    }

    /// Returns true if `id` is a known type.
    #[must_use]
    pub fn contains(&self, id: &ResourceLocation) -> bool {
        self.types.contains(id)
    }

    /// Returns the members of `tag`, or `None` for an unknown tag.
    #[must_use]
    pub fn tag(&self, tag: &ResourceLocation) -> Option<&IndexSet<ResourceLocation>> {
        self.tags.get(tag)
    }

    /// Iterates the known types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &ResourceLocation> {
        self.types.iter()
    }

    /// Iterates the known tag names in registration order.
    pub fn tag_names(&self) -> impl Iterator<Item = &ResourceLocation> {
        self.tags.keys()
    }
}

fn vanilla_id(path: &str) -> ResourceLocation {
    ResourceLocation::minecraft(path)
}

/// Returns the id of the player entity type.
#[must_use]
pub fn player_type() -> ResourceLocation {
    vanilla_id("player")
}

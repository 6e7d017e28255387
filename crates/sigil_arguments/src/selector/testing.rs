//! A small in-memory world for selector tests.

use std::sync::Arc;

use uuid::Uuid;

use crate::game_mode::GameMode;
use crate::math::{Vec2, Vec3};
use crate::resource::ResourceLocation;
use crate::source::{CommandSource, Entity, EntityProvider, EntityRef, USE_SELECTORS};

#[derive(Clone, Debug)]
pub(crate) struct TestEntity {
    pub uuid: Uuid,
    pub name: String,
    pub kind: ResourceLocation,
    pub player: bool,
    pub alive: bool,
    pub position: Vec3,
    pub rotation: Vec2,
    pub world: ResourceLocation,
    pub tags: Vec<String>,
    pub team: Option<String>,
    pub game_mode: Option<GameMode>,
    pub level: Option<i32>,
    pub scores: Vec<(String, i32)>,
}

impl TestEntity {
    pub fn player(id: u128, name: &str, position: Vec3) -> Self {
        Self {
            uuid: Uuid::from_u128(id),
            name: name.to_string(),
            kind: ResourceLocation::minecraft("player"),
            player: true,
            alive: true,
            position,
            rotation: Vec2::ZERO,
            world: ResourceLocation::minecraft("overworld"),
            tags: Vec::new(),
            team: None,
            game_mode: Some(GameMode::Survival),
            level: Some(0),
            scores: Vec::new(),
        }
    }

    pub fn mob(id: u128, kind: &str, position: Vec3) -> Self {
        Self {
            name: kind.to_string(),
            kind: ResourceLocation::minecraft(kind),
            player: false,
            game_mode: None,
            level: None,
            ..Self::player(id, kind, position)
        }
    }

    pub fn in_world(mut self, world: &str) -> Self {
        self.world = ResourceLocation::minecraft(world);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    pub fn with_game_mode(mut self, mode: GameMode) -> Self {
        self.game_mode = Some(mode);
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_score(mut self, objective: &str, value: i32) -> Self {
        self.scores.push((objective.to_string(), value));
        self
    }

    pub fn with_rotation(mut self, pitch: f32, yaw: f32) -> Self {
        self.rotation = Vec2::new(pitch, yaw);
        self
    }

    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }
}

impl Entity for TestEntity {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn entity_type(&self) -> ResourceLocation {
        self.kind.clone()
    }

    fn is_player(&self) -> bool {
        self.player
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Vec2 {
        self.rotation
    }

    fn world(&self) -> ResourceLocation {
        self.world.clone()
    }

    fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn team(&self) -> Option<String> {
        self.team.clone()
    }

    fn game_mode(&self) -> Option<GameMode> {
        self.game_mode
    }

    fn experience_level(&self) -> Option<i32> {
        self.level
    }

    fn score(&self, objective: &str) -> Option<i32> {
        self.scores
            .iter()
            .find(|(name, _)| name == objective)
            .map(|(_, value)| *value)
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestWorld {
    pub entities: Vec<EntityRef>,
}

impl TestWorld {
    pub fn new(entities: Vec<TestEntity>) -> Self {
        Self {
            entities: entities
                .into_iter()
                .map(|entity| Arc::new(entity) as EntityRef)
                .collect(),
        }
    }
}

impl EntityProvider for TestWorld {
    fn worlds(&self) -> Vec<ResourceLocation> {
        let mut worlds: Vec<ResourceLocation> = Vec::new();
        for entity in &self.entities {
            if !worlds.contains(&entity.world()) {
                worlds.push(entity.world());
            }
        }
        worlds
    }

    fn entities_in(&self, world: &ResourceLocation) -> Vec<EntityRef> {
        self.entities
            .iter()
            .filter(|entity| &entity.world() == world)
            .cloned()
            .collect()
    }

    fn players(&self) -> Vec<EntityRef> {
        self.entities
            .iter()
            .filter(|entity| entity.is_player())
            .cloned()
            .collect()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TestSource {
    pub world: Arc<TestWorld>,
    pub position: Vec3,
    pub entity: Option<EntityRef>,
    pub can_select: bool,
}

impl TestSource {
    pub fn new(world: TestWorld, position: Vec3) -> Self {
        Self {
            world: Arc::new(world),
            position,
            entity: None,
            can_select: true,
        }
    }

    pub fn as_entity(mut self, index: usize) -> Self {
        self.entity = self.world.entities.get(index).cloned();
        self
    }

    pub fn without_selectors(mut self) -> Self {
        self.can_select = false;
        self
    }
}

impl CommandSource for TestSource {
    fn has_permission(&self, capability: &str) -> bool {
        capability != USE_SELECTORS || self.can_select
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn world(&self) -> ResourceLocation {
        ResourceLocation::minecraft("overworld")
    }

    fn entity(&self) -> Option<EntityRef> {
        self.entity.clone()
    }

    fn entity_provider(&self) -> &dyn EntityProvider {
        self.world.as_ref()
    }
}

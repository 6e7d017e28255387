//! An in-memory world for running commands against.
//!
//! [`DemoWorld`] holds a flat list of [`DemoEntity`] values spread over a
//! handful of dimensions. Entities keep their mutable state behind a lock so
//! commands can move or remove them through shared handles.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use sigil_arguments::entity_type::player_type;
use sigil_arguments::{
    CommandSource, Entity, EntityProvider, EntityRef, GameMode, ResourceLocation, Vec2, Vec3,
};
use sigil_foundation::CommandResult;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug)]
struct EntityState {
    position: Vec3,
    rotation: Vec2,
    world: ResourceLocation,
    alive: bool,
    tags: Vec<String>,
    game_mode: Option<GameMode>,
}

/// An entity living in a [`DemoWorld`].
#[derive(Debug)]
pub struct DemoEntity {
    uuid: Uuid,
    name: String,
    kind: ResourceLocation,
    state: RwLock<EntityState>,
}

impl DemoEntity {
    /// Creates a player in survival mode.
    #[must_use]
    pub fn player(
        uuid: Uuid,
        name: impl Into<String>,
        world: ResourceLocation,
        position: Vec3,
    ) -> Self {
        Self::new(
            uuid,
            name.into(),
            player_type(),
            world,
            position,
            Some(GameMode::Survival),
        )
    }

    /// Creates a non-player entity named after its type.
    #[must_use]
    pub fn mob(uuid: Uuid, kind: ResourceLocation, world: ResourceLocation, position: Vec3) -> Self {
        let name = kind.path().to_string();
        Self::new(uuid, name, kind, world, position, None)
    }

    fn new(
        uuid: Uuid,
        name: String,
        kind: ResourceLocation,
        world: ResourceLocation,
        position: Vec3,
        game_mode: Option<GameMode>,
    ) -> Self {
        Self {
            uuid,
            name,
            kind,
            state: RwLock::new(EntityState {
                position,
                rotation: Vec2::ZERO,
                world,
                alive: true,
                tags: Vec::new(),
                game_mode,
            }),
        }
    }

    /// Builder method to set the game mode.
    #[must_use]
    pub fn with_game_mode(self, mode: GameMode) -> Self {
        self.write().game_mode = Some(mode);
        self
    }

    /// Builder method to add a scoreboard tag.
    #[must_use]
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        self.write().tags.push(tag.into());
        self
    }

    /// Moves the entity, possibly into another world.
    pub fn teleport(&self, world: ResourceLocation, position: Vec3) {
        let mut state = self.write();
        state.world = world;
        state.position = position;
    }

    /// Marks the entity dead.
    pub fn kill(&self) {
        self.write().alive = false;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, EntityState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, EntityState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Entity for DemoEntity {
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
        self.kind == player_type()
    }

    fn is_alive(&self) -> bool {
        self.read().alive
    }

    fn position(&self) -> Vec3 {
        self.read().position
    }

    fn rotation(&self) -> Vec2 {
        self.read().rotation
    }

    fn world(&self) -> ResourceLocation {
        self.read().world.clone()
    }

    fn tags(&self) -> Vec<String> {
        self.read().tags.clone()
    }

    fn game_mode(&self) -> Option<GameMode> {
        self.read().game_mode
    }

    fn experience_level(&self) -> Option<i32> {
        self.is_player().then_some(0)
    }
}

/// A set of worlds and the entities in them.
#[derive(Debug)]
pub struct DemoWorld {
    spawn_world: ResourceLocation,
    worlds: Vec<ResourceLocation>,
    entities: RwLock<Vec<Arc<DemoEntity>>>,
}

impl DemoWorld {
    /// Creates an empty world. `spawn_world` comes first in
    /// [`EntityProvider::worlds`] and is where the console executes.
    #[must_use]
    pub fn new(
        spawn_world: ResourceLocation,
        others: impl IntoIterator<Item = ResourceLocation>,
    ) -> Self {
        let mut worlds = vec![spawn_world.clone()];
        worlds.extend(others.into_iter().filter(|world| *world != spawn_world));
        Self {
            spawn_world,
            worlds,
            entities: RwLock::new(Vec::new()),
        }
    }

    /// Creates the world the REPL starts with: two players and a few
    /// animals in the overworld, and one player in the nether.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in id is malformed.
    pub fn sample() -> CommandResult<Self> {
        let overworld = ResourceLocation::with_default_namespace("overworld")?;
        let nether = ResourceLocation::with_default_namespace("the_nether")?;
        let world = Self::new(overworld.clone(), [nether.clone()]);

        let mut next = 0_u128;
        let mut uuid = || {
            next += 1;
            Uuid::from_u128(next)
        };
        let origin = Vec3::new(0.0, 64.0, 0.0);
        world.spawn(DemoEntity::player(uuid(), "Alex", overworld.clone(), origin));
        world.spawn(
            DemoEntity::player(uuid(), "Steve", overworld.clone(), Vec3::new(8.0, 64.0, -3.0))
                .with_game_mode(GameMode::Creative)
                .with_tag("builder"),
        );
        let portal = Vec3::new(12.0, 70.0, 12.0);
        world.spawn(DemoEntity::player(uuid(), "Notch", nether.clone(), portal));
        for (kind, position) in [
            ("pig", Vec3::new(4.0, 64.0, 4.0)),
            ("pig", Vec3::new(-6.0, 64.0, 2.0)),
            ("cow", Vec3::new(20.0, 65.0, 10.0)),
            ("zombie", Vec3::new(-30.0, 63.0, -30.0)),
        ] {
            let kind = ResourceLocation::with_default_namespace(kind)?;
            world.spawn(DemoEntity::mob(uuid(), kind, overworld.clone(), position));
        }
        world.spawn(DemoEntity::mob(
            uuid(),
            ResourceLocation::with_default_namespace("ghast")?,
            nether,
            Vec3::new(0.0, 90.0, 0.0),
        ));
        Ok(world)
    }

    /// Adds an entity and returns its handle.
    pub fn spawn(&self, entity: DemoEntity) -> Arc<DemoEntity> {
        let entity = Arc::new(entity);
        debug!(name = %entity.name, uuid = %entity.uuid, "spawned entity");
        self.write().push(Arc::clone(&entity));
        entity
    }

    /// Kills and removes the entity with `uuid`. Returns false if absent.
    pub fn remove(&self, uuid: Uuid) -> bool {
        let mut entities = self.write();
        match entities.iter().position(|entity| entity.uuid == uuid) {
            Some(index) => {
                let entity = entities.remove(index);
                entity.kill();
                debug!(name = %entity.name, %uuid, "removed entity");
                true
            }
            None => false,
        }
    }

    /// Returns the live entity with `uuid`.
    #[must_use]
    pub fn get(&self, uuid: Uuid) -> Option<Arc<DemoEntity>> {
        self.read().iter().find(|entity| entity.uuid == uuid).cloned()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no entities are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<DemoEntity>>> {
        self.entities.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<DemoEntity>>> {
        self.entities.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntityProvider for DemoWorld {
    fn worlds(&self) -> Vec<ResourceLocation> {
        self.worlds.clone()
    }

    fn entities_in(&self, world: &ResourceLocation) -> Vec<EntityRef> {
        self.read()
            .iter()
            .filter(|entity| entity.world() == *world)
            .map(|entity| Arc::clone(entity) as EntityRef)
            .collect()
    }

    fn players(&self) -> Vec<EntityRef> {
        self.read()
            .iter()
            .filter(|entity| entity.is_player())
            .map(|entity| Arc::clone(entity) as EntityRef)
            .collect()
    }
}

/// A command source in a [`DemoWorld`].
///
/// Clones share the world and the feedback buffer; everything else is a
/// value so redirects can derive new sources freely.
#[derive(Clone, Debug)]
pub struct DemoSource {
    world: Arc<DemoWorld>,
    feedback: Arc<Mutex<Vec<String>>>,
    name: String,
    position: Vec3,
    rotation: Vec2,
    dimension: ResourceLocation,
    entity: Option<EntityRef>,
    operator: bool,
}

impl DemoSource {
    /// Creates the server console source: an operator at the world origin
    /// of the first dimension.
    #[must_use]
    pub fn console(world: Arc<DemoWorld>) -> Self {
        let dimension = world.spawn_world.clone();
        Self {
            world,
            feedback: Arc::new(Mutex::new(Vec::new())),
            name: "Server".to_string(),
            position: Vec3::ZERO,
            rotation: Vec2::ZERO,
            dimension,
            entity: None,
            operator: true,
        }
    }

    /// Returns a source executing as `entity`, keeping position and world.
    #[must_use]
    pub fn with_entity(&self, entity: EntityRef) -> Self {
        Self {
            name: entity.name(),
            entity: Some(entity),
            ..self.clone()
        }
    }

    /// Returns a source at `entity`'s position, rotation and world.
    #[must_use]
    pub fn at_entity(&self, entity: &EntityRef) -> Self {
        Self {
            position: entity.position(),
            rotation: entity.rotation(),
            dimension: entity.world(),
            ..self.clone()
        }
    }

    /// Returns a source at `position`.
    #[must_use]
    pub fn with_position(&self, position: Vec3) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Returns a source facing `rotation` (pitch in `x`, yaw in `y`).
    #[must_use]
    pub fn with_rotation(&self, rotation: Vec2) -> Self {
        Self {
            rotation,
            ..self.clone()
        }
    }

    /// Returns a source with operator rights granted or revoked.
    #[must_use]
    pub fn with_operator(&self, operator: bool) -> Self {
        Self {
            operator,
            ..self.clone()
        }
    }

    /// Returns true for operators.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        self.operator
    }

    /// Returns the name shown in chat.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Returns the world.
    #[must_use]
    pub fn demo_world(&self) -> &Arc<DemoWorld> {
        &self.world
    }

    /// Appends a line of command feedback.
    pub fn send(&self, message: impl Into<String>) {
        self.feedback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.into());
    }

    /// Removes and returns the feedback collected so far.
    pub fn take_feedback(&self) -> Vec<String> {
        std::mem::take(&mut *self.feedback.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl CommandSource for DemoSource {
    fn has_permission(&self, _capability: &str) -> bool {
        self.operator
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Vec2 {
        self.rotation
    }

    fn world(&self) -> ResourceLocation {
        self.dimension.clone()
    }

    fn entity(&self) -> Option<EntityRef> {
        self.entity.clone()
    }

    fn entity_provider(&self) -> &dyn EntityProvider {
        self.world.as_ref()
    }
}

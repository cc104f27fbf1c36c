// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene lifecycle, scene switching and the physics demo scene.
//!
//! A driver calls [`Scene::load`] once, then [`Scene::update`] and
//! [`Scene::draw`] every frame. Everything a frame needs arrives through the
//! [`FrameContext`]; scenes keep no global camera or input state.
//!
//! A [`SceneDirector`] owns several scenes and forwards the frame to the
//! active one. Switching loads the newly selected scene from scratch.

use crate::arena::ShapeHandle;
use crate::config::{ConfigError, Settings};
use crate::entity::{Behavior, Entity};
use crate::frame::FrameContext;
use crate::input::Action;
use crate::render::{DrawItem, FrameLighting, RenderPass, Renderer};
use crate::shape::{RigidShape, ShapeKind};
use crate::water::Water;
use crate::world::PhysicsWorld;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;

/// Damage dealt by one interact press
const INTERACT_DAMAGE: f32 = 25.0;
/// Entities within this distance of the eye can be hit
const INTERACT_RANGE: f32 = 2.5;

/// Scene errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// Settings could not be reloaded
    #[error("Settings error: {0}")]
    Config(#[from] ConfigError),

    /// `update` was called before `load`
    #[error("Scene '{0}' has not been loaded")]
    NotLoaded(&'static str),

    /// A director was asked for a scene it does not have
    #[error("No scene at index {0}")]
    NoScene(usize),
}

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Load / update / draw lifecycle driven by the frame loop
pub trait Scene {
    /// Scene name for logs
    fn name(&self) -> &'static str;

    /// Build (or rebuild) the scene from scratch
    fn load(&mut self) -> SceneResult<()>;

    /// Advance one frame. Scenes with a player write the eye position
    /// into `ctx.camera`.
    fn update(&mut self, ctx: &mut FrameContext) -> SceneResult<()>;

    /// Submit the frame's draw passes
    fn draw(&self, renderer: &mut dyn Renderer);

    /// Log end-of-run state
    fn log_summary(&self) {}
}

/// Owns a list of scenes and runs the active one
#[derive(Default)]
pub struct SceneDirector {
    scenes: Vec<Box<dyn Scene>>,
    active: usize,
}

impl SceneDirector {
    /// Director with no scenes
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a scene. The first one added starts active.
    pub fn with_scene(mut self, scene: impl Scene + 'static) -> Self {
        self.scenes.push(Box::new(scene));
        self
    }

    /// Number of scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True if no scenes were added
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Index of the active scene
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active scene
    pub fn active(&self) -> Option<&dyn Scene> {
        self.scenes.get(self.active).map(Box::as_ref)
    }

    /// Load the active scene
    pub fn start(&mut self) -> SceneResult<()> {
        self.switch_to(self.active)
    }

    /// Make `index` active and load it
    pub fn switch_to(&mut self, index: usize) -> SceneResult<()> {
        let scene = self
            .scenes
            .get_mut(index)
            .ok_or(SceneError::NoScene(index))?;

        tracing::info!("Switching to scene '{}'", scene.name());
        scene.load()?;
        self.active = index;
        Ok(())
    }

    /// Switch to the scene after the active one, wrapping around
    pub fn next_scene(&mut self) -> SceneResult<()> {
        if self.scenes.is_empty() {
            return Err(SceneError::NoScene(0));
        }
        self.switch_to((self.active + 1) % self.scenes.len())
    }

    /// Handle the scene switch action, otherwise update the active scene
    pub fn update(&mut self, ctx: &mut FrameContext) -> SceneResult<()> {
        if ctx.input.is_pressed(Action::NextScene) {
            return self.next_scene();
        }

        match self.scenes.get_mut(self.active) {
            Some(scene) => scene.update(ctx),
            None => Err(SceneError::NoScene(self.active)),
        }
    }

    /// Draw the active scene
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if let Some(scene) = self.active() {
            scene.draw(renderer);
        }
    }

    /// Log the active scene's end-of-run state
    pub fn log_summary(&self) {
        if let Some(scene) = self.active() {
            scene.log_summary();
        }
    }
}

/// Handles of the fixed props, valid until the next load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoProps {
    /// Static ground plane
    pub floor: ShapeHandle,
    /// Cube dropped from above
    pub falling_cube: ShapeHandle,
    /// Gravity-free cube
    pub floating_cube: ShapeHandle,
    /// Gravity-free sphere
    pub floating_sphere: ShapeHandle,
}

/// Water pond and the shape that draws it
#[derive(Debug, Clone)]
pub struct Pond {
    /// Wave simulation
    pub water: Water,
    /// Render shape in the arena
    pub shape: ShapeHandle,
}

/// Floor, a few props, a player, optional entities and a pond
pub struct PhysicsDemoScene {
    settings: Settings,
    settings_path: Option<PathBuf>,
    world: PhysicsWorld,
    entities: Vec<Entity>,
    pond: Option<Pond>,
    props: Option<DemoProps>,
    rng: StdRng,
    lamp: RigidShape,
    camera_position: Vec3,
    post_processing: bool,
}

impl PhysicsDemoScene {
    /// Create an unloaded scene
    pub fn new(settings: Settings) -> Self {
        let lamp = RigidShape::cube()
            .with_position(Vec3::new(40.0, 5.0, -5.0))
            .with_scale(Vec3::splat(0.5))
            .with_collision(false)
            .with_static(true);

        Self {
            rng: StdRng::seed_from_u64(settings.demo.seed),
            world: PhysicsWorld::new(settings.world.clone()),
            settings,
            settings_path: None,
            entities: Vec::new(),
            pond: None,
            props: None,
            lamp,
            camera_position: Vec3::ZERO,
            post_processing: false,
        }
    }

    /// Builder: re-read settings from this file on every reload
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Active settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The physics world
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// The physics world, mutably
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Live entities
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Water pond, if spawned
    pub fn pond(&self) -> Option<&Pond> {
        self.pond.as_ref()
    }

    /// Prop handles, `None` before the first load
    pub fn props(&self) -> Option<DemoProps> {
        self.props
    }

    /// Light source position
    pub fn light_position(&self) -> Vec3 {
        self.lamp.position
    }

    /// Whether the lit pass goes through post-processing
    pub fn post_processing(&self) -> bool {
        self.post_processing
    }

    /// Eye position from the last update
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Re-read the settings file, if any, then rebuild
    pub fn reload(&mut self) -> SceneResult<()> {
        if let Some(path) = &self.settings_path {
            self.settings = Settings::load(path)?;
        }
        tracing::info!("Reloading scene '{}'", self.name());
        self.load()
    }

    fn spawn_entities(&mut self) {
        let friendly_visual = self.world.insert(
            RigidShape::cube()
                .with_position(Vec3::new(-3.0, -2.3, 5.0))
                .with_scale(Vec3::splat(0.3))
                .with_color(Vec3::new(0.2, 0.8, 0.2))
                .with_collision(false),
        );
        let enemy_visual = self.world.insert(
            RigidShape::cube()
                .with_position(Vec3::new(3.0, -2.25, -3.0))
                .with_scale(Vec3::splat(0.4))
                .with_color(Vec3::new(0.8, 0.2, 0.2))
                .with_collision(false),
        );

        let friendly = Entity::friendly(Vec3::new(-3.0, -2.3, 5.0), &mut self.rng);
        self.entities.push(friendly.with_visual(friendly_visual));
        self.entities
            .push(Entity::enemy(Vec3::new(3.0, -2.25, -3.0)).with_visual(enemy_visual));
    }

    fn spawn_pond(&mut self) {
        let water = Water::new(6.0, 6.0, 32).with_position(Vec3::new(-8.0, -2.4, -6.0));
        let shape = self.world.insert(
            RigidShape::new(ShapeKind::Water {
                width: water.width,
                depth: water.depth,
                resolution: water.resolution,
            })
            .with_position(water.position)
            .with_color(water.color)
            .with_collision(false)
            .with_static(true),
        );

        self.pond = Some(Pond { water, shape });
    }

    fn interact(&mut self) {
        let eye = self.camera_position;
        let shapes = self.world.shapes_mut();

        for entity in &mut self.entities {
            if entity.is_alive() && entity.position.distance(eye) <= INTERACT_RANGE {
                entity.take_damage(INTERACT_DAMAGE, shapes);
            }
        }
    }

    fn update_pond(&mut self, dt: f32) {
        let Some(pond) = self.pond.as_mut() else {
            return;
        };
        pond.water.update(dt);

        for (_, shape) in self.world.shapes().iter() {
            if shape.is_dynamic() && shape.has_collision {
                pond.water
                    .check_object_interaction(shape.position, shape.scale.y * 0.5);
            }
        }

        if let Some(player) = self.world.player() {
            pond.water
                .check_object_interaction(player.position(), player.body.scale.y * 0.5);
        }
    }
}

impl Scene for PhysicsDemoScene {
    fn name(&self) -> &'static str {
        "physics_demo"
    }

    fn load(&mut self) -> SceneResult<()> {
        self.world.clear();
        self.world.set_settings(self.settings.world.clone());
        self.entities.clear();
        self.pond = None;
        self.rng = StdRng::seed_from_u64(self.settings.demo.seed);

        let floor = self.world.insert(
            RigidShape::plane()
                .with_position(Vec3::new(0.0, -2.5, 0.0))
                .with_scale(Vec3::new(40.0, 0.1, 40.0))
                .with_color(Vec3::splat(0.5))
                .with_material("grass")
                .with_static(true),
        );
        let falling_cube = self.world.insert(
            RigidShape::cube()
                .with_position(Vec3::new(0.5, 5.0, 0.0))
                .with_color(Vec3::new(1.0, 0.5, 0.0))
                .with_material("wood")
                .with_gravity(true),
        );
        let floating_cube = self.world.insert(
            RigidShape::cube()
                .with_position(Vec3::new(-2.5, 1.0, 2.0))
                .with_color(Vec3::new(0.0, 1.0, 1.0))
                .with_material("bricks"),
        );
        let floating_sphere = self.world.insert(
            RigidShape::sphere(1.0)
                .with_position(Vec3::new(2.5, 1.0, 2.0))
                .with_color(Vec3::new(1.0, 0.0, 0.0)),
        );
        self.props = Some(DemoProps {
            floor,
            falling_cube,
            floating_cube,
            floating_sphere,
        });

        if self.settings.demo.spawn_entities {
            self.spawn_entities();
        }
        if self.settings.demo.spawn_water {
            self.spawn_pond();
        }

        let player = self.world.spawn_player(self.settings.player.clone());
        player.set_grounded(true);
        self.camera_position = player.camera_position();

        tracing::info!(
            "Loaded scene '{}' with {} shapes and {} entities",
            self.name(),
            self.world.shapes().len(),
            self.entities.len()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameContext) -> SceneResult<()> {
        if self.props.is_none() {
            return Err(SceneError::NotLoaded(self.name()));
        }

        if ctx.input.is_pressed(Action::ReloadScene) {
            self.reload()?;
            ctx.camera.position = self.camera_position;
            return Ok(());
        }

        if ctx.input.is_pressed(Action::TogglePostProcess) {
            self.post_processing = !self.post_processing;
            tracing::info!(
                "Post-processing: {}",
                if self.post_processing { "ON" } else { "OFF" }
            );
        }

        self.world.step(ctx.dt);

        if let Some(eye) = self.world.drive_player(ctx) {
            self.camera_position = eye;
        }
        ctx.camera.position = self.camera_position;

        if ctx.input.is_pressed(Action::Interact) {
            self.interact();
        }

        let shapes = self.world.shapes_mut();
        for entity in &mut self.entities {
            entity.update(ctx.dt, shapes, &mut self.rng);
            if entity.is_alive() && matches!(entity.behavior, Behavior::Enemy(_)) {
                entity.set_target(self.camera_position);
            }
        }

        self.update_pond(ctx.dt);
        Ok(())
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        let items: Vec<DrawItem<'_>> = self
            .world
            .shapes()
            .iter()
            .map(|(handle, shape)| DrawItem::from_shape(Some(handle), shape))
            .collect();

        renderer.begin_frame(&FrameLighting {
            light_position: self.light_position(),
            view_position: self.camera_position,
            post_processing: self.post_processing,
        });
        renderer.draw(RenderPass::Shadow, &items);
        renderer.draw(RenderPass::Lit, &items);
        renderer.draw(RenderPass::Lamp, &[DrawItem::from_shape(None, &self.lamp)]);
        renderer.end_frame();
    }

    fn log_summary(&self) {
        if let Some(player) = self.world.player() {
            tracing::info!(
                "Player finished at {:?} ({:?}), camera {:?}",
                player.position(),
                player.state(),
                self.camera_position
            );
        }
        for entity in &self.entities {
            tracing::info!(
                "{} entity at {:?}, health {}/{}",
                entity.behavior.name(),
                entity.position,
                entity.health,
                entity.max_health
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;
    use crate::input::{ActionSet, ActionState, InputSnapshot};
    use crate::showcase::ShowcaseScene;

    const DT: f32 = 1.0 / 60.0;

    struct Frames {
        actions: ActionState,
    }

    impl Frames {
        fn new() -> Self {
            Self {
                actions: ActionState::new(),
            }
        }

        fn advance(&mut self, held: &[Action]) -> FrameContext {
            self.actions.update(held.iter().copied().collect::<ActionSet>());
            FrameContext::new(
                DT,
                CameraState::default(),
                InputSnapshot {
                    actions: self.actions,
                },
            )
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        passes: Vec<(RenderPass, usize)>,
        post_processing: bool,
    }

    impl Renderer for CountingRenderer {
        fn begin_frame(&mut self, lighting: &FrameLighting) {
            self.frames += 1;
            self.post_processing = lighting.post_processing;
        }

        fn draw(&mut self, pass: RenderPass, items: &[DrawItem<'_>]) {
            self.passes.push((pass, items.len()));
        }
    }

    fn bare_settings() -> Settings {
        let mut settings = Settings::default();
        settings.demo.spawn_entities = false;
        settings.demo.spawn_water = false;
        settings
    }

    fn loaded(settings: Settings) -> PhysicsDemoScene {
        let mut scene = PhysicsDemoScene::new(settings);
        assert!(scene.load().is_ok());
        scene
    }

    #[test]
    fn test_update_before_load_fails() {
        let mut scene = PhysicsDemoScene::new(bare_settings());
        let mut ctx = Frames::new().advance(&[]);
        assert!(matches!(
            scene.update(&mut ctx),
            Err(SceneError::NotLoaded(_))
        ));
    }

    #[test]
    fn test_load_builds_props_and_grounded_player() {
        let scene = loaded(bare_settings());
        assert_eq!(scene.world().shapes().len(), 4);
        assert!(scene.world().player().map(|p| p.is_grounded()).unwrap_or(false));
        assert_eq!(scene.light_position(), Vec3::new(40.0, 5.0, -5.0));
    }

    #[test]
    fn test_full_load_adds_entities_and_pond() {
        let scene = loaded(Settings::default());
        assert_eq!(scene.entities().len(), 2);
        assert!(scene.pond().is_some());
        assert_eq!(scene.world().shapes().len(), 7);
    }

    #[test]
    fn test_reload_invalidates_old_handles() {
        let mut scene = loaded(bare_settings());
        let old = scene.props().map(|p| p.falling_cube);

        let mut frames = Frames::new();
        let mut ctx = frames.advance(&[Action::ReloadScene]);
        assert!(scene.update(&mut ctx).is_ok());

        let Some(old) = old else {
            panic!("props missing after load");
        };
        assert!(scene.world().get(old).is_none());
        assert_eq!(scene.world().shapes().len(), 4);
    }

    #[test]
    fn test_falling_cube_lands_and_static_floor_stays() {
        let mut scene = loaded(bare_settings());
        let Some(props) = scene.props() else {
            panic!("props missing after load");
        };

        let mut frames = Frames::new();
        for _ in 0..240 {
            let mut ctx = frames.advance(&[]);
            assert!(scene.update(&mut ctx).is_ok());
        }

        let world = scene.world();
        let floor = world.get(props.floor).map(|s| s.position);
        assert_eq!(floor, Some(Vec3::new(0.0, -2.5, 0.0)));

        let cube_bottom = world.get(props.falling_cube).map(|s| s.aabb().min().y);
        assert!(cube_bottom.is_some_and(|y| y > -2.45 && y < -2.0));

        let player = world.player().map(|p| (p.is_grounded(), p.position().y));
        assert!(player.is_some_and(|(grounded, y)| grounded && y > -1.45 && y <= -1.4));
    }

    #[test]
    fn test_camera_follows_player_and_crouch_lowers_it() {
        let mut scene = loaded(bare_settings());
        let mut frames = Frames::new();

        let mut ctx = frames.advance(&[]);
        assert!(scene.update(&mut ctx).is_ok());
        let standing = ctx.camera.position.y;

        let mut ctx = frames.advance(&[Action::Crouch]);
        assert!(scene.update(&mut ctx).is_ok());
        assert!(ctx.camera.position.y < standing);
        assert_eq!(ctx.camera.position, scene.camera_position());
    }

    #[test]
    fn test_post_processing_toggles_on_press_only() {
        let mut scene = loaded(bare_settings());
        let mut frames = Frames::new();

        for _ in 0..3 {
            let mut ctx = frames.advance(&[Action::TogglePostProcess]);
            assert!(scene.update(&mut ctx).is_ok());
        }
        assert!(scene.post_processing());

        let mut ctx = frames.advance(&[]);
        assert!(scene.update(&mut ctx).is_ok());
        let mut ctx = frames.advance(&[Action::TogglePostProcess]);
        assert!(scene.update(&mut ctx).is_ok());
        assert!(!scene.post_processing());
    }

    #[test]
    fn test_draw_passes() {
        let mut scene = loaded(bare_settings());
        let mut ctx = Frames::new().advance(&[Action::TogglePostProcess]);
        assert!(scene.update(&mut ctx).is_ok());

        let mut renderer = CountingRenderer::default();
        scene.draw(&mut renderer);

        assert_eq!(renderer.frames, 1);
        assert!(renderer.post_processing);
        assert_eq!(
            renderer.passes,
            vec![
                (RenderPass::Shadow, 4),
                (RenderPass::Lit, 4),
                (RenderPass::Lamp, 1)
            ]
        );
    }

    #[test]
    fn test_enemy_targets_camera() {
        let mut scene = loaded(Settings::default());
        let mut frames = Frames::new();
        let mut ctx = frames.advance(&[]);
        assert!(scene.update(&mut ctx).is_ok());

        let eye = scene.camera_position();
        let enemy = scene
            .entities()
            .iter()
            .find_map(|e| match &e.behavior {
                Behavior::Enemy(pursuit) => Some(pursuit.clone()),
                Behavior::Friendly(_) => None,
            });
        assert!(enemy.is_some_and(|p| p.hostile && p.target == eye));
    }

    #[test]
    fn test_director_switches_and_loads() {
        let mut director = SceneDirector::new()
            .with_scene(PhysicsDemoScene::new(bare_settings()))
            .with_scene(ShowcaseScene::new());
        let mut frames = Frames::new();

        // Nothing loaded yet
        let mut ctx = frames.advance(&[]);
        assert!(matches!(
            director.update(&mut ctx),
            Err(SceneError::NotLoaded("physics_demo"))
        ));

        assert!(director.start().is_ok());
        let mut ctx = frames.advance(&[]);
        assert!(director.update(&mut ctx).is_ok());

        let mut ctx = frames.advance(&[Action::NextScene]);
        assert!(director.update(&mut ctx).is_ok());
        assert_eq!(director.active_index(), 1);
        assert_eq!(director.active().map(|s| s.name()), Some("showcase"));

        // Held key does not switch again; the showcase was loaded on switch
        let mut ctx = frames.advance(&[Action::NextScene]);
        assert!(director.update(&mut ctx).is_ok());
        assert_eq!(director.active_index(), 1);

        let mut ctx = frames.advance(&[]);
        assert!(director.update(&mut ctx).is_ok());
        let mut ctx = frames.advance(&[Action::NextScene]);
        assert!(director.update(&mut ctx).is_ok());
        assert_eq!(director.active().map(|s| s.name()), Some("physics_demo"));

        let mut renderer = CountingRenderer::default();
        director.draw(&mut renderer);
        assert_eq!(renderer.passes.len(), 3);
    }

    #[test]
    fn test_empty_director() {
        let mut director = SceneDirector::new();
        assert!(director.is_empty());
        assert!(matches!(director.start(), Err(SceneError::NoScene(0))));
        assert!(matches!(director.next_scene(), Err(SceneError::NoScene(0))));

        let mut ctx = Frames::new().advance(&[]);
        assert!(matches!(
            director.update(&mut ctx),
            Err(SceneError::NoScene(0))
        ));

        let mut renderer = CountingRenderer::default();
        director.draw(&mut renderer);
        assert_eq!(renderer.frames, 0);
    }
}

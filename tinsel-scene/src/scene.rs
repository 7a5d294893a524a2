//! This module handles the [`Scene`], the per-session context that owns every particle and
//! advances the animation one tick at a time.

use crate::{
    command::{SceneCommand, SceneHandle},
    config::SceneConfig,
    photo::{placeholder_photo, PhotoPayload},
    pointer::{ClickTracker, PointerState},
};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use tinsel_formations::{
    compute_target, FormationContext, ModeController, SceneMode, TransitionTable,
};
use tinsel_particles::ParticleStore;
use tinsel_renderer_trait::{OverlayState, Renderer, SceneFrame, Viewport};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace};

/// A running scene session.
///
/// Nothing outside the scene ever touches the particles directly. Everything from the outside
/// world arrives as a [`SceneCommand`] through a [`SceneHandle`] and gets applied at the start of
/// the next [`tick`](Self::tick).
#[derive(Debug)]
pub struct Scene {
    /// The config that this scene was built with.
    config: SceneConfig,

    /// Every particle in the scene.
    store: ParticleStore,

    /// Owns the current mode.
    controller: ModeController,

    /// The eased pointer position.
    pointer: PointerState,

    /// Tells clicks apart from drags.
    clicks: ClickTracker,

    /// The number of ticks completed so far.
    frame: u64,

    /// The current viewport size.
    viewport: Viewport,

    /// The current overlay state.
    overlay: OverlayState,

    /// The RNG used to place new particles.
    rng: StdRng,

    /// The receiving half of the command inbox.
    inbox: mpsc::UnboundedReceiver<SceneCommand>,

    /// A handle to our own inbox, to give out to anyone who asks.
    handle: SceneHandle,
}

impl Scene {
    /// Create and populate a new scene, and return it with a handle to send it commands.
    ///
    /// The placeholder photo is already queued, so it will appear on the first tick.
    #[instrument(skip_all, fields(main_count = config.main_count, dust_count = config.dust_count))]
    pub fn new(config: SceneConfig) -> (Self, SceneHandle) {
        let (tx, inbox) = mpsc::unbounded_channel();
        let handle = SceneHandle::new(tx);

        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => crate::rng!(),
        };

        let mut store = ParticleStore::new();
        store.create_main(config.main_count, &mut rng);
        store.create_dust(config.dust_count, &mut rng);

        let scene = Self {
            controller: ModeController::new(config.initial_mode, TransitionTable::default()),
            config,
            store,
            pointer: PointerState::default(),
            clicks: ClickTracker::default(),
            frame: 0,
            viewport: Viewport::default(),
            overlay: OverlayState {
                hidden: false,
                loading: true,
            },
            rng,
            inbox,
            handle: handle.clone(),
        };

        handle.add_photo_to_scene(PhotoPayload::Decoded(placeholder_photo()));

        info!(particles = scene.store.len(), "Scene ready");
        (scene, handle)
    }

    /// Get another handle to this scene's inbox.
    pub fn handle(&self) -> SceneHandle {
        self.handle.clone()
    }

    /// The config that this scene was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Every particle in the scene.
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// The current mode.
    pub fn mode(&self) -> SceneMode {
        self.controller.current()
    }

    /// The number of ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current overlay state.
    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    /// The current pointer state.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// The parallax rotation of the whole scene group for the current pointer position.
    pub fn group_rotation(&self) -> Vec3 {
        self.pointer.group_rotation(&self.config.parallax)
    }

    /// Apply a single command.
    fn apply_command<R: Renderer + ?Sized>(&mut self, command: SceneCommand, renderer: &mut R) {
        trace!(?command, "Applying command");

        match command {
            SceneCommand::PointerMoved { x, y } => {
                self.pointer.set_target_from_screen(x, y, self.viewport);
                self.clicks.moved(x, y);
            }
            SceneCommand::PointerPressed => self.clicks.pressed(),
            SceneCommand::PointerReleased => {
                if self.clicks.released(self.config.click_drag_threshold) {
                    self.controller.advance();
                }
            }
            SceneCommand::Click => {
                self.controller.advance();
            }
            SceneCommand::SetMode(mode) => self.controller.set_mode(mode),
            SceneCommand::AppendPhoto(photo) => {
                let index = self.store.create_photo(photo, &mut self.rng);
                self.overlay.loading = false;
                info!(index, "Appended photo");
            }
            SceneCommand::Resize(viewport) => {
                self.viewport = viewport;
                renderer.resize(viewport);
            }
            SceneCommand::ToggleOverlay => {
                self.overlay.hidden = !self.overlay.hidden;
                debug!(hidden = self.overlay.hidden, "Toggled overlay");
            }
        }
    }

    /// Advance the animation by one frame and render it.
    ///
    /// This drains the inbox, eases the pointer, recomputes every particle's target for the
    /// current mode, eases every particle towards its target, and then renders exactly once.
    #[instrument(skip_all, fields(frame = self.frame))]
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        while let Ok(command) = self.inbox.try_recv() {
            self.apply_command(command, renderer);
        }

        self.pointer.ease(self.config.pointer_easing);
        let group_rotation = self.group_rotation();

        let ctx = FormationContext::snapshot(&self.store, self.controller.current(), self.frame);
        let easing = self.config.transform_easing;

        for (index, particle) in self.store.iter_mut().enumerate() {
            compute_target(particle, index, &ctx).apply_to(particle);
            particle.ease_towards_target(easing);
        }

        renderer.render_frame(&SceneFrame {
            frame: self.frame,
            mode: ctx.mode,
            group_rotation,
            particles: self.store.as_slice(),
            viewport: self.viewport,
            overlay: self.overlay,
        });

        self.frame += 1;
    }
}

//! The owned simulation context.
//!
//! One [`Simulation`] exists per rendering context. It owns the cube, the turn
//! engine, proximity bookkeeping, theme state and the orbit camera, and it is
//! driven entirely by method calls from whichever thread hosts it.

use glam::{Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::breathe::{self, Proximity};
use crate::camera::Camera;
use crate::color::Gradient;
use crate::cube::{Cube, Cubelet, Move};
use crate::error::PulseError;
use crate::grid::{grid_size_for_width, MAX_GRID, STEP};
use crate::host::{HeadlessHost, Host, ThemeOrigin};
use crate::instance::CubeletInstance;
use crate::options::Options;
use crate::orbit::{default_radius, Orbit};
use crate::palette::{LayerMaterial, Palette};
use crate::theme::{ThemeCycle, ThemeName, ThemeState, AUTO_CYCLE_INTERVAL};
use crate::turn::TurnEngine;

/// Largest device pixel ratio honoured by [`Simulation::resize`].
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Vertical bob amplitude of the cube root.
pub const BOB_AMPLITUDE: f32 = 0.18;

/// Bob speed in radians per second.
pub const BOB_RATE: f64 = 0.7;

/// Pick sphere radius as a fraction of the cube's half-diagonal span.
pub const PICK_SPHERE_SCALE: f32 = 0.85;

/// Radius of the proximity pick sphere for an `n`-grid.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pick_radius(n: usize) -> f32 {
    n as f32 * STEP * PICK_SPHERE_SCALE
}

/// Vertical offset of the cube root at time `now` (seconds).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn bob_offset(now: f64) -> f32 {
    ((now * BOB_RATE).sin() as f32) * BOB_AMPLITUDE
}

/// Size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
    /// Device pixel ratio, at most [`MAX_PIXEL_RATIO`].
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Width over height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    fn sanitize(width: f32, height: f32, dpr: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return None;
        }
        let pixel_ratio = if dpr.is_finite() && dpr > 0.0 {
            dpr.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Some(Self {
            width,
            height,
            pixel_ratio,
        })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            pixel_ratio: 1.0,
        }
    }
}

/// The animated cube and everything that drives it.
pub struct Simulation<H: Host = HeadlessHost> {
    options: Options,
    host: H,
    rng: StdRng,
    cube: Cube,
    turns: TurnEngine,
    proximity: Proximity,
    theme: ThemeState,
    cycle: ThemeCycle,
    orbit: Orbit,
    camera: Camera,
    viewport: Viewport,
    root: Vec3,
    paused: bool,
    generation: u64,
}

impl<H: Host> Simulation<H> {
    /// Creates a simulation sized for the configured viewport.
    ///
    /// The starting theme is `options.theme`, else the host's persisted theme,
    /// else dusk. It is applied without a transition.
    pub fn new(options: Options, mut host: H) -> Self {
        let mut rng = options
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let theme = options
            .theme
            .or_else(|| {
                let stored = host.load_theme()?;
                match stored.parse::<ThemeName>() {
                    Ok(theme) => Some(theme),
                    Err(err) => {
                        log::warn!("ignoring persisted theme: {err}");
                        None
                    }
                }
            })
            .unwrap_or_default();

        let viewport = Viewport::sanitize(
            options.initial_width,
            options.initial_height,
            options.device_pixel_ratio,
        )
        .unwrap_or_else(|| {
            log::warn!(
                "invalid initial viewport {}x{}; using defaults",
                options.initial_width,
                options.initial_height
            );
            Viewport::default()
        });

        let n = grid_size_for_width(viewport.width);
        let mut theme_state = ThemeState::new(theme);
        let palette = theme_state.init(theme, n);
        let cube = Cube::build(n, &theme.preset().gradient(), palette, 1, &mut rng);

        let mut orbit = Orbit::default();
        orbit.radius = default_radius(n);
        let mut camera = Camera::new(viewport.aspect_ratio());
        camera.look_from(orbit.position(), Vec3::ZERO);

        let interval = options.auto_cycle_interval;
        let cycle = if interval.is_finite() && interval > 0.0 {
            ThemeCycle::new(interval)
        } else {
            log::warn!("invalid auto-cycle interval {interval}; using {AUTO_CYCLE_INTERVAL}s");
            ThemeCycle::default()
        };

        log::info!(
            "simulation ready: {n}x{n}x{n} grid, theme {theme}, worker: {}",
            host.is_worker()
        );

        Self {
            cycle,
            options,
            host,
            rng,
            proximity: Proximity::new(cube.cubelets().len(), pick_radius(n)),
            cube,
            turns: TurnEngine::new(),
            theme: theme_state,
            orbit,
            camera,
            viewport,
            root: Vec3::ZERO,
            paused: false,
            generation: 1,
        }
    }

    /// Rebuilds the cube as an `n`³ grid with layer colors from `bottom` to `top`
    /// (sRGB hex).
    ///
    /// Any running turn is completed first. Invalid sizes are logged and ignored.
    pub fn build(&mut self, n: usize, bottom: u32, top: u32) {
        self.rebuild(n, &Gradient::from_hex(bottom, top));
    }

    fn rebuild(&mut self, n: usize, gradient: &Gradient) {
        if n == 0 || n > MAX_GRID {
            log::warn!("ignoring build: {}", PulseError::InvalidGridSize(n));
            return;
        }
        self.turns.force_complete(&mut self.cube);
        self.generation += 1;

        let palette = self.cube.palette().clone();
        self.cube = Cube::build(n, gradient, palette, self.generation, &mut self.rng);
        self.theme.regrid(n);
        self.orbit.radius = default_radius(n);
        self.proximity.rebuild(self.cube.cubelets().len(), pick_radius(n));
        self.turns.reset();

        log::debug!("built {n}x{n}x{n} cube (generation {})", self.generation);
    }

    /// Advances the simulation by `dt` seconds at absolute time `now` (seconds).
    ///
    /// Callers clamp `dt`; negative or non-finite values count as zero. A
    /// non-finite `now` leaves the bob offset where it was.
    pub fn tick(&mut self, dt: f32, now: f64) {
        if self.paused {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.options.auto_cycle && self.cycle.advance(dt) {
            let next = self.theme.current().next();
            self.change_theme(next, ThemeOrigin::AutoCycle);
        }
        if let Some(palette) = self.theme.tick(dt) {
            self.cube.set_palette(palette);
        }

        self.orbit.tick(dt);
        if now.is_finite() {
            self.root = Vec3::new(0.0, bob_offset(now), 0.0);
        }
        self.camera.look_from(self.orbit.position(), Vec3::ZERO);

        if self.proximity.is_dirty() {
            let cube = &self.cube;
            let root = self.root;
            self.proximity.update(
                &self.camera,
                root,
                cube.cubelets()
                    .iter()
                    .map(|c| (c.index, cube.world_position(c, root))),
            );
        }

        if !self.options.reduced_motion {
            self.turns.tick(&mut self.cube, dt, &mut self.rng);
            self.breathe(now);
        }
    }

    fn breathe(&mut self, now: f64) {
        let global = breathe::global_phase(now);
        let root = self.root;
        let scales: Vec<f32> = self
            .cube
            .cubelets()
            .iter()
            .map(|c| {
                let world = self.cube.world_position(c, root);
                let np = breathe::phase(global, world, c.phase_offset);
                c.base_scale * breathe::wave(np) * self.proximity.multiplier(c.index)
            })
            .collect();
        for (cubelet, scale) in self.cube.cubelets_mut().iter_mut().zip(scales) {
            cubelet.scale = scale;
        }
    }

    /// Starts a face turn on the next tick unless one is already running.
    pub fn request_turn(&mut self) {
        self.turns.request();
    }

    /// Starts an orbit drag.
    pub fn begin_drag(&mut self) {
        self.orbit.begin_drag();
    }

    /// Rotates the orbit by the given angle deltas during a drag.
    pub fn drag_by(&mut self, d_theta: f32, d_phi: f32) {
        self.orbit.drag_by(d_theta, d_phi);
    }

    /// Ends an orbit drag.
    pub fn end_drag(&mut self) {
        self.orbit.end_drag();
    }

    /// Starts a pinch gesture.
    pub fn begin_pinch(&mut self) {
        self.orbit.begin_pinch();
    }

    /// Zooms to `ratio` times the radius at pinch start, within the grid's bounds.
    pub fn set_zoom_ratio(&mut self, ratio: f32) {
        self.orbit.set_zoom_ratio(ratio, self.cube.grid_size());
    }

    /// Ends a pinch gesture.
    pub fn end_pinch(&mut self) {
        self.orbit.end_pinch();
    }

    /// Moves the pointer to normalized device coordinates.
    ///
    /// Values outside `[-1, 1]` mean the pointer left the surface. Ignored when
    /// the device cannot hover.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if !self.options.has_hover {
            return;
        }
        self.proximity.set_pointer(Vec2::new(x, y));
    }

    /// Removes the pointer.
    pub fn clear_pointer(&mut self) {
        self.proximity.clear_pointer();
    }

    /// Cross-fades to the named theme. Unknown names are logged and ignored.
    pub fn set_theme(&mut self, name: &str) {
        match name.parse::<ThemeName>() {
            Ok(theme) => self.select_theme(theme),
            Err(err) => log::warn!("ignoring theme request: {err}"),
        }
    }

    /// Cross-fades to `theme` as an explicit user choice and persists it.
    pub fn select_theme(&mut self, theme: ThemeName) {
        if self.change_theme(theme, ThemeOrigin::User) {
            self.host.store_theme(theme);
        }
    }

    /// Switches to `theme` immediately, cancelling any transition.
    pub fn init_theme(&mut self, theme: ThemeName) {
        let palette = self.theme.init(theme, self.cube.grid_size());
        self.cube.set_palette(palette);
    }

    fn change_theme(&mut self, theme: ThemeName, origin: ThemeOrigin) -> bool {
        if !self
            .theme
            .begin(theme, self.cube.palette(), self.cube.grid_size())
        {
            return false;
        }
        log::debug!("theme -> {theme} ({origin:?})");
        self.host.theme_changed(theme, origin);
        true
    }

    /// Applies a new viewport. Rebuilds only when the grid size changes.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        let Some(viewport) = Viewport::sanitize(width, height, dpr) else {
            log::warn!(
                "ignoring resize: {}",
                PulseError::InvalidViewport { width, height }
            );
            return;
        };
        self.viewport = viewport;
        self.camera.set_aspect_ratio(viewport.aspect_ratio());

        let n = grid_size_for_width(width);
        if n == self.cube.grid_size() {
            self.proximity.reset();
        } else {
            let gradient = self.theme.current().preset().gradient();
            self.rebuild(n, &gradient);
        }
    }

    /// Pauses or resumes ticking.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            log::debug!("simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    /// Whether ticking is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current grid size N.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.cube.grid_size()
    }

    /// Rebuild counter; changes whenever the cubelet set is replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.cube.generation()
    }

    /// The cube.
    #[must_use]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// All cubelets in index order.
    #[must_use]
    pub fn cubelets(&self) -> &[Cubelet] {
        self.cube.cubelets()
    }

    /// The move table.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        self.cube.moves()
    }

    /// One material per Y layer, bottom first.
    #[must_use]
    pub fn layer_materials(&self) -> &[LayerMaterial] {
        self.cube.layer_materials()
    }

    /// The palette currently shown.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        self.cube.palette()
    }

    /// The most recently selected theme.
    #[must_use]
    pub fn current_theme(&self) -> ThemeName {
        self.theme.current()
    }

    /// Theme and transition state.
    #[must_use]
    pub fn theme_state(&self) -> &ThemeState {
        &self.theme
    }

    /// The face-turn engine.
    #[must_use]
    pub fn turn_engine(&self) -> &TurnEngine {
        &self.turns
    }

    /// Whether a face turn is running.
    #[must_use]
    pub fn is_turning(&self) -> bool {
        self.turns.is_turning()
    }

    /// Cubelet indices taking part in the running turn.
    #[must_use]
    pub fn turn_group(&self) -> Option<&[usize]> {
        self.turns.animation().map(|anim| anim.group.as_slice())
    }

    /// Proximity state.
    #[must_use]
    pub fn proximity(&self) -> &Proximity {
        &self.proximity
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The orbit state.
    #[must_use]
    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The cube root's offset from the origin.
    #[must_use]
    pub fn root_offset(&self) -> Vec3 {
        self.root
    }

    /// World position of cubelet `index`.
    #[must_use]
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.cube
            .cubelets()
            .get(index)
            .map(|c| self.cube.world_position(c, self.root))
    }

    /// World orientation of cubelet `index`.
    #[must_use]
    pub fn world_orientation(&self, index: usize) -> Option<Quat> {
        self.cube
            .cubelets()
            .get(index)
            .map(|c| self.cube.local_orientation(c))
    }

    /// Per-cubelet instance records for the current frame.
    #[must_use]
    pub fn instances(&self) -> Vec<CubeletInstance> {
        let materials = self.cube.layer_materials();
        self.cube
            .cubelets()
            .iter()
            .map(|c| {
                let color = materials.get(c.layer).map_or(Vec3::ONE, |m| m.color);
                CubeletInstance::new(
                    self.cube.world_position(c, self.root),
                    self.cube.local_orientation(c),
                    c.scale,
                    color,
                )
            })
            .collect()
    }

    /// Options this simulation was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::on_lattice;
    use crate::orbit::zoom_bounds;
    use crate::turn::TURN_DURATION;

    fn options() -> Options {
        Options::new().with_seed(7).with_auto_cycle(false)
    }

    fn simulation() -> Simulation {
        Simulation::new(options(), HeadlessHost::new())
    }

    #[test]
    fn test_new_sizes_grid_from_viewport() {
        let sim = Simulation::new(options().with_viewport(500.0, 800.0, 1.0), HeadlessHost::new());
        assert_eq!(sim.grid_size(), 3);
        assert_eq!(sim.cubelets().len(), 27);
        assert_eq!(sim.moves().len(), 18);
        assert_eq!(sim.current_theme(), ThemeName::Dusk);
        assert!(!sim.theme_state().is_transitioning());
    }

    #[test]
    fn test_new_uses_persisted_theme() {
        let sim = Simulation::new(options(), HeadlessHost::with_stored(ThemeName::Moss));
        assert_eq!(sim.current_theme(), ThemeName::Moss);

        let sim = Simulation::new(
            options().with_theme(ThemeName::Void),
            HeadlessHost::with_stored(ThemeName::Moss),
        );
        assert_eq!(sim.current_theme(), ThemeName::Void);
    }

    #[test]
    fn test_build_counts() {
        let mut sim = simulation();
        for n in 2..=5 {
            sim.build(n, 0xbe7858, 0xf2e2d8);
            assert_eq!(sim.cubelets().len(), n * n * n);
            assert_eq!(sim.moves().len(), 6 * n);
            assert_eq!(sim.layer_materials().len(), n);
            assert_eq!(sim.proximity().multipliers().len(), n * n * n);
        }
    }

    #[test]
    fn test_invalid_build_is_ignored() {
        let mut sim = simulation();
        let generation = sim.generation();
        sim.build(0, 0x000000, 0xffffff);
        sim.build(6, 0x000000, 0xffffff);
        assert_eq!(sim.generation(), generation);
        assert_eq!(sim.grid_size(), 5);
    }

    #[test]
    fn test_requested_turn_completes_in_one_tick() {
        let mut sim = simulation();
        sim.build(3, 0xbe7858, 0xf2e2d8);
        sim.request_turn();
        sim.tick(TURN_DURATION, 10.0);

        assert_eq!(sim.turn_engine().completed_turns(), 1);
        assert!(!sim.is_turning());
        for c in sim.cubelets() {
            assert!(on_lattice(c.position.x, 3, 1e-4));
            assert!(on_lattice(c.position.y, 3, 1e-4));
            assert!(on_lattice(c.position.z, 3, 1e-4));
        }
    }

    #[test]
    fn test_turn_group_is_frozen() {
        let mut sim = simulation();
        sim.build(4, 0xbe7858, 0xf2e2d8);
        sim.request_turn();
        sim.tick(0.1, 0.0);
        let group = sim.turn_group().map(<[usize]>::to_vec).unwrap_or_default();
        assert_eq!(group.len(), 16);
        for step in 1..5 {
            sim.tick(0.1, f64::from(step) * 0.1);
            assert_eq!(sim.turn_group(), Some(group.as_slice()));
        }
    }

    #[test]
    fn test_rebuild_completes_running_turn() {
        let mut sim = simulation();
        sim.build(3, 0xbe7858, 0xf2e2d8);
        sim.request_turn();
        sim.tick(0.2, 0.0);
        assert!(sim.is_turning());

        sim.build(3, 0xbe7858, 0xf2e2d8);
        assert!(!sim.is_turning());
        assert_eq!(sim.turn_engine().wait_timer(), Some(crate::turn::TURN_GAP));
        assert!(sim.cube().pivot().is_none());
    }

    #[test]
    fn test_zoom_clamps_to_min_radius() {
        let mut sim = simulation();
        sim.build(3, 0xbe7858, 0xf2e2d8);
        let (min_r, max_r) = zoom_bounds(3);
        sim.begin_pinch();
        sim.set_zoom_ratio(0.01);
        assert_eq!(sim.orbit().radius, min_r);
        sim.set_zoom_ratio(100.0);
        assert_eq!(sim.orbit().radius, max_r);
        sim.end_pinch();
    }

    #[test]
    fn test_pointer_proximity_peaks_at_nearest_cubelet() {
        let mut sim = simulation();
        sim.build(3, 0xbe7858, 0xf2e2d8);
        sim.set_pointer(0.0, 0.0);
        sim.tick(0.0, 0.0);

        let hit = sim.proximity().hit_point();
        assert!(hit.is_some());
        let hit = hit.unwrap_or_default();

        let mut nearest = 0;
        let mut nearest_d = f32::MAX;
        for i in 0..sim.cubelets().len() {
            let d = sim.world_position(i).unwrap_or_default().distance(hit);
            if d < nearest_d {
                nearest = i;
                nearest_d = d;
            }
            if d >= breathe::INFLUENCE_RADIUS {
                assert_eq!(sim.proximity().multiplier(i), 1.0);
            }
        }

        let peak = sim
            .proximity()
            .multipliers()
            .iter()
            .copied()
            .fold(0.0f32, f32::max);
        assert_eq!(sim.proximity().multiplier(nearest), peak);
        assert!(peak > 1.0 && peak <= 1.0 + breathe::PROXIMITY_BOOST);
    }

    #[test]
    fn test_pointer_ignored_without_hover() {
        let mut sim = Simulation::new(options().with_hover(false), HeadlessHost::new());
        sim.set_pointer(0.0, 0.0);
        assert!(sim.proximity().pointer().is_none());
    }

    #[test]
    fn test_pointer_sentinel_resets_multipliers() {
        let mut sim = simulation();
        sim.set_pointer(0.0, 0.0);
        sim.tick(0.0, 0.0);
        sim.set_pointer(999.0, 999.0);
        sim.tick(0.0, 0.0);
        assert!(sim.proximity().multipliers().iter().all(|&m| m == 1.0));
    }

    #[test]
    fn test_same_theme_is_noop() {
        let mut sim = simulation();
        sim.set_theme("tide");
        sim.tick(2.0, 2.0);
        assert!(!sim.theme_state().is_transitioning());
        let palette = sim.palette().clone();

        sim.set_theme("tide");
        assert!(!sim.theme_state().is_transitioning());
        assert_eq!(sim.palette(), &palette);
        assert_eq!(sim.host().changes.len(), 1);
    }

    #[test]
    fn test_unknown_theme_is_noop() {
        let mut sim = simulation();
        sim.set_theme("sunset");
        assert_eq!(sim.current_theme(), ThemeName::Dusk);
        assert!(!sim.theme_state().is_transitioning());
        assert!(sim.host().stored.is_none());
    }

    #[test]
    fn test_interrupted_transition_starts_from_shown_values() {
        let mut sim = simulation();
        sim.set_theme("tide");
        sim.tick(0.5, 0.5);
        let shown = sim.palette().clone();

        sim.set_theme("moss");
        let transition = sim.theme_state().transition().cloned();
        assert_eq!(transition.map(|t| t.from), Some(shown));
        assert_eq!(sim.current_theme(), ThemeName::Moss);
    }

    #[test]
    fn test_transition_finishes_on_preset() {
        let mut sim = simulation();
        sim.set_theme("void");
        for i in 0..20 {
            sim.tick(0.1, f64::from(i) * 0.1);
        }
        assert!(!sim.theme_state().is_transitioning());
        let expected = ThemeName::Void.preset().palette(sim.grid_size());
        assert_eq!(sim.palette(), &expected);
    }

    #[test]
    fn test_only_user_picks_persist() {
        let mut options = options().with_auto_cycle(true);
        options.auto_cycle_interval = 1.0;
        let mut sim = Simulation::new(options, HeadlessHost::new());

        sim.tick(1.0, 1.0);
        assert_eq!(sim.current_theme(), ThemeName::Tide);
        assert!(sim.host().stored.is_none());

        sim.set_theme("void");
        assert_eq!(sim.host().stored, Some(ThemeName::Void));

        sim.tick(1.0, 2.0);
        assert_eq!(sim.current_theme(), ThemeName::Dusk);
        assert_eq!(sim.host().stored, Some(ThemeName::Void));
        assert_eq!(
            sim.host().changes,
            vec![
                (ThemeName::Tide, ThemeOrigin::AutoCycle),
                (ThemeName::Void, ThemeOrigin::User),
                (ThemeName::Dusk, ThemeOrigin::AutoCycle),
            ]
        );
    }

    #[test]
    fn test_resize_rebuilds_only_on_grid_change() {
        let mut sim = simulation();
        let generation = sim.generation();

        sim.resize(1000.0, 700.0, 1.0);
        assert_eq!(sim.generation(), generation);
        assert_eq!(sim.grid_size(), 5);

        sim.resize(500.0, 700.0, 3.0);
        assert_eq!(sim.generation(), generation + 1);
        assert_eq!(sim.grid_size(), 3);
        assert_eq!(sim.viewport().pixel_ratio, MAX_PIXEL_RATIO);
        assert_eq!(sim.orbit().radius, default_radius(3));
    }

    #[test]
    fn test_invalid_resize_is_ignored() {
        let mut sim = simulation();
        let viewport = sim.viewport();
        sim.resize(0.0, 700.0, 1.0);
        sim.resize(f32::NAN, 700.0, 1.0);
        assert_eq!(sim.viewport(), viewport);
    }

    #[test]
    fn test_rebuild_mid_transition_keeps_layer_count() {
        let mut sim = simulation();
        sim.set_theme("moss");
        sim.tick(0.3, 0.3);
        sim.resize(400.0, 700.0, 1.0);
        assert_eq!(sim.grid_size(), 3);
        sim.tick(0.3, 0.6);
        assert_eq!(sim.layer_materials().len(), 3);
        for _ in 0..10 {
            sim.tick(0.2, 1.0);
        }
        let expected = ThemeName::Moss.preset().palette(3);
        assert_eq!(sim.palette(), &expected);
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut sim = simulation();
        sim.request_turn();
        sim.set_paused(true);
        sim.tick(1.0, 1.0);
        assert!(!sim.is_turning());
        assert_eq!(sim.turn_engine().completed_turns(), 0);
        sim.set_paused(false);
        sim.tick(0.1, 1.1);
        assert!(sim.is_turning());
    }

    #[test]
    fn test_reduced_motion_freezes_cubelets() {
        let mut sim = Simulation::new(options().with_reduced_motion(true), HeadlessHost::new());
        sim.request_turn();
        for i in 0..50 {
            sim.tick(0.05, f64::from(i) * 0.05);
        }
        assert!(!sim.is_turning());
        assert!(sim.cubelets().iter().all(|c| c.scale == 1.0));
    }

    #[test]
    fn test_breathing_scales_stay_bounded() {
        let mut sim = simulation();
        sim.set_pointer(0.1, -0.1);
        for i in 0..200 {
            sim.tick(1.0 / 60.0, f64::from(i) / 60.0);
            for c in sim.cubelets() {
                assert!((0.0..=1.0 + breathe::PROXIMITY_BOOST).contains(&c.scale));
            }
        }
    }

    #[test]
    fn test_bob_moves_root() {
        let mut sim = simulation();
        sim.tick(0.0, std::f64::consts::FRAC_PI_2 / BOB_RATE);
        assert!((sim.root_offset().y - BOB_AMPLITUDE).abs() < 1e-5);
    }

    #[test]
    fn test_zero_cycle_interval_uses_default() {
        let options = Options::from_json(r#"{"seed":1,"auto_cycle_interval":0}"#).unwrap();
        assert!(options.auto_cycle);
        let mut sim = Simulation::new(options, HeadlessHost::new());
        for i in 0..8 {
            sim.tick(1.0 / 60.0, f64::from(i) / 60.0);
        }
        assert!(sim.host().changes.is_empty());
        assert_eq!(sim.current_theme(), ThemeName::Dusk);

        sim.tick(AUTO_CYCLE_INTERVAL, 20.0);
        assert_eq!(sim.host().changes, vec![(ThemeName::Tide, ThemeOrigin::AutoCycle)]);
    }

    #[test]
    fn test_non_finite_time_keeps_bob() {
        let mut sim = simulation();
        sim.tick(0.0, std::f64::consts::FRAC_PI_2 / BOB_RATE);
        let root = sim.root_offset();

        sim.tick(1.0 / 60.0, f64::NAN);
        sim.tick(1.0 / 60.0, f64::INFINITY);
        assert_eq!(sim.root_offset(), root);
        for instance in sim.instances() {
            assert!(instance.model.iter().flatten().all(|v| v.is_finite()));
        }

        sim.tick(1.0 / 60.0, 0.0);
        assert_eq!(sim.root_offset(), Vec3::ZERO);
    }

    #[test]
    fn test_instances_match_cubelets() {
        let mut sim = simulation();
        sim.tick(0.016, 0.5);
        let instances = sim.instances();
        assert_eq!(instances.len(), sim.cubelets().len());
        let first = sim.world_position(0).unwrap_or_default();
        assert!((instances[0].translation() - first).length() < 1e-5);
    }
}

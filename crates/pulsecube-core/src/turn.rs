//! Face-turn engine.
//!
//! The engine alternates between waiting (`Idle`) and rotating one layer of
//! cubelets by a quarter turn (`Turning`). While turning, the group hangs from
//! the cube's [`Pivot`]; on completion every member is baked back into root
//! space and snapped onto the grid lattice.

use rand::Rng;

use crate::cube::{Attachment, Cube, Move, Pivot};
use crate::ease;
use crate::grid::{snap_vec, STEP};

/// Duration of one face turn in seconds.
pub const TURN_DURATION: f32 = 0.72;

/// Idle gap between face turns in seconds.
pub const TURN_GAP: f32 = 1.8;

/// Layer membership tolerance: above snapping error, below half the layer spacing.
pub const GROUP_TOLERANCE: f32 = STEP * 0.45;

/// An in-progress face turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnAnimation {
    /// The move being performed.
    pub mv: Move,
    /// Cubelet indices captured when the turn started.
    pub group: Vec<usize>,
    /// Seconds since the turn started.
    pub elapsed: f32,
    /// Rotation applied to the pivot so far, in radians.
    pub applied: f32,
}

/// State of the face-turn engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    /// Waiting; a turn starts once `wait` drops to zero.
    Idle { wait: f32 },
    /// Rotating a layer.
    Turning(TurnAnimation),
}

/// Drives random face turns on a [`Cube`].
#[derive(Debug, Clone)]
pub struct TurnEngine {
    state: TurnState,
    completed: u64,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self {
            state: TurnState::Idle { wait: TURN_GAP },
            completed: 0,
        }
    }
}

impl TurnEngine {
    /// Creates an idle engine with a full gap before the first turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Whether a turn is in progress.
    #[must_use]
    pub fn is_turning(&self) -> bool {
        matches!(self.state, TurnState::Turning(_))
    }

    /// The in-progress turn, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&TurnAnimation> {
        match &self.state {
            TurnState::Turning(anim) => Some(anim),
            TurnState::Idle { .. } => None,
        }
    }

    /// Remaining idle countdown, `None` while turning.
    #[must_use]
    pub fn wait_timer(&self) -> Option<f32> {
        match self.state {
            TurnState::Idle { wait } => Some(wait),
            TurnState::Turning(_) => None,
        }
    }

    /// Number of turns committed since creation.
    #[must_use]
    pub fn completed_turns(&self) -> u64 {
        self.completed
    }

    /// Resets to idle with a full gap. Does not touch the cube.
    pub fn reset(&mut self) {
        self.state = TurnState::Idle { wait: TURN_GAP };
    }

    /// Makes the next tick start a turn. No-op while turning.
    pub fn request(&mut self) {
        if let TurnState::Idle { wait } = &mut self.state {
            *wait = 0.0;
        }
    }

    /// Advances the countdown or the running turn by `dt` seconds.
    ///
    /// When the countdown expires inside this tick, the overshoot is applied to
    /// the new turn so no time is lost.
    pub fn tick<R: Rng>(&mut self, cube: &mut Cube, dt: f32, rng: &mut R) {
        if let TurnState::Idle { wait } = &mut self.state {
            *wait -= dt;
            if *wait > 0.0 {
                return;
            }
            let overshoot = (-*wait).min(dt);
            if self.start(cube, rng) {
                self.advance(cube, overshoot);
            }
        } else {
            self.advance(cube, dt);
        }
    }

    /// Completes any running turn immediately: full rotation, snap, reattach.
    pub fn force_complete(&mut self, cube: &mut Cube) {
        if let TurnState::Turning(anim) =
            std::mem::replace(&mut self.state, TurnState::Idle { wait: TURN_GAP })
        {
            log::trace!("forcing turn about {} to completion", anim.mv.axis.name());
            self.commit(cube, &anim);
        }
    }

    fn start<R: Rng>(&mut self, cube: &mut Cube, rng: &mut R) -> bool {
        if cube.grid_size() < 2 || cube.moves().is_empty() {
            return false;
        }
        let mv = cube.moves()[rng.gen_range(0..cube.moves().len())];
        let group = cube.layer_members(mv.axis, mv.layer, GROUP_TOLERANCE);
        if group.is_empty() {
            log::trace!("no cubelets on {} layer {:.3}; skipping turn", mv.axis.name(), mv.layer);
            return false;
        }

        let cubelets = cube.cubelets_mut();
        for &i in &group {
            cubelets[i].attachment = Attachment::Pivot;
        }
        cube.set_pivot(Some(Pivot {
            axis: mv.axis,
            angle: 0.0,
        }));
        log::trace!(
            "turn started: {} layer {:.3}, {} cubelets",
            mv.axis.name(),
            mv.layer,
            group.len()
        );
        self.state = TurnState::Turning(TurnAnimation {
            mv,
            group,
            elapsed: 0.0,
            applied: 0.0,
        });
        true
    }

    fn advance(&mut self, cube: &mut Cube, dt: f32) {
        let TurnState::Turning(anim) = &mut self.state else {
            return;
        };
        anim.elapsed += dt;
        let t = (anim.elapsed / TURN_DURATION).min(1.0);
        let eased = ease::turn(t) * anim.mv.angle;
        if let Some(mut pivot) = cube.pivot() {
            pivot.angle += eased - anim.applied;
            cube.set_pivot(Some(pivot));
        }
        anim.applied = eased;

        if t >= 1.0 {
            self.force_complete(cube);
        }
    }

    fn commit(&mut self, cube: &mut Cube, anim: &TurnAnimation) {
        let rotation = Pivot {
            axis: anim.mv.axis,
            angle: anim.mv.angle,
        }
        .rotation();
        let n = cube.grid_size();
        let cubelets = cube.cubelets_mut();
        for &i in &anim.group {
            let Some(c) = cubelets.get_mut(i) else {
                continue;
            };
            c.position = snap_vec(rotation * c.position, n);
            c.orientation = (rotation * c.orientation).normalize();
            c.base_scale = 1.0;
            c.attachment = Attachment::Root;
        }
        cube.set_pivot(None);
        self.completed += 1;
        log::trace!("turn committed ({} total)", self.completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{on_lattice, Axis};
    use crate::theme::ThemeName;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(n: usize) -> (Cube, StdRng) {
        let preset = ThemeName::Dusk.preset();
        let mut rng = StdRng::seed_from_u64(42);
        let cube = Cube::build(n, &preset.gradient(), preset.palette(n), 1, &mut rng);
        (cube, rng)
    }

    #[test]
    fn test_idle_countdown() {
        let (mut cube, mut rng) = setup(3);
        let mut engine = TurnEngine::new();
        engine.tick(&mut cube, 1.0, &mut rng);
        assert!(!engine.is_turning());
        assert!((engine.wait_timer().unwrap() - 0.8).abs() < 1e-6);
        engine.tick(&mut cube, 0.9, &mut rng);
        assert!(engine.is_turning());
    }

    #[test]
    fn test_request_then_full_tick_completes_turn() {
        let (mut cube, mut rng) = setup(3);
        let mut engine = TurnEngine::new();
        engine.request();
        engine.tick(&mut cube, TURN_DURATION, &mut rng);
        assert!(!engine.is_turning());
        assert_eq!(engine.completed_turns(), 1);
        assert_eq!(engine.wait_timer(), Some(TURN_GAP));
        assert!(cube.pivot().is_none());
        assert!(cube
            .cubelets()
            .iter()
            .all(|c| c.attachment == Attachment::Root));
    }

    #[test]
    fn test_request_ignored_while_turning() {
        let (mut cube, mut rng) = setup(2);
        let mut engine = TurnEngine::new();
        engine.request();
        engine.tick(&mut cube, 0.1, &mut rng);
        assert!(engine.is_turning());
        let before = engine.animation().cloned();
        engine.request();
        assert_eq!(engine.animation().cloned(), before);
    }

    #[test]
    fn test_group_matches_layer_and_is_frozen() {
        let (mut cube, mut rng) = setup(4);
        let mut engine = TurnEngine::new();
        engine.request();
        engine.tick(&mut cube, 0.0, &mut rng);
        let anim = engine.animation().unwrap().clone();
        assert_eq!(anim.group.len(), 16);
        for step in 0..5 {
            engine.tick(&mut cube, 0.1, &mut rng);
            assert_eq!(engine.animation().unwrap().group, anim.group, "step {step}");
        }
    }

    #[test]
    fn test_incremental_rotation_tracks_ease() {
        let (mut cube, mut rng) = setup(3);
        let mut engine = TurnEngine::new();
        engine.request();
        engine.tick(&mut cube, 0.0, &mut rng);
        for _ in 0..3 {
            engine.tick(&mut cube, 0.1, &mut rng);
            let anim = engine.animation().unwrap();
            let expected = ease::turn(anim.elapsed / TURN_DURATION) * anim.mv.angle;
            assert!((cube.pivot().unwrap().angle - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_positions_stay_on_lattice_after_many_turns() {
        let (mut cube, mut rng) = setup(5);
        let mut engine = TurnEngine::new();
        for _ in 0..2000 {
            engine.tick(&mut cube, 1.0 / 60.0, &mut rng);
        }
        engine.force_complete(&mut cube);
        assert!(engine.completed_turns() > 10);
        for c in cube.cubelets() {
            for axis in Axis::ALL {
                assert!(on_lattice(axis.component(c.position), 5, 1e-4));
            }
        }
    }

    #[test]
    fn test_force_complete_reattaches() {
        let (mut cube, mut rng) = setup(3);
        let mut engine = TurnEngine::new();
        engine.request();
        engine.tick(&mut cube, 0.2, &mut rng);
        assert!(engine.is_turning());
        engine.force_complete(&mut cube);
        assert!(!engine.is_turning());
        assert!(cube.pivot().is_none());
        assert_eq!(engine.completed_turns(), 1);
    }

    #[test]
    fn test_single_cubelet_grid_never_turns() {
        let (mut cube, mut rng) = setup(1);
        let mut engine = TurnEngine::new();
        engine.request();
        engine.tick(&mut cube, 1.0, &mut rng);
        assert!(!engine.is_turning());
    }
}

//! Drives a simulation from messages and a frame clock.
//!
//! [`Runner`] is the single loop body used on the main thread and inside the
//! worker, so both contexts behave identically.

use std::time::Instant;

use glam::{Mat4, Vec3};
use pulsecube_core::{CubeletInstance, Host, Palette, Simulation, ThemeName, Viewport};

use crate::clock::{FrameClock, FrameTime};
use crate::message::{Control, Message};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Rebuild counter of the cube; GPU buffers must be recreated when it changes.
    pub generation: u64,
    /// Cubelets per edge.
    pub grid_size: usize,
    /// Current theme; the palette may still be blending toward it.
    pub theme: ThemeName,
    /// One instance per cubelet, in cubelet index order.
    pub instances: Vec<CubeletInstance>,
    /// Colors shown this frame.
    pub palette: Palette,
    /// Combined view-projection matrix of the orbit camera.
    pub view_projection: Mat4,
    /// Camera eye position in world space.
    pub camera_position: Vec3,
    /// Drawing surface size and pixel ratio.
    pub viewport: Viewport,
    /// Whether a layer turn is in progress.
    pub turning: bool,
}

impl FrameSnapshot {
    /// Captures the current state of `sim`.
    #[must_use]
    pub fn capture<H: Host>(sim: &Simulation<H>) -> Self {
        Self {
            generation: sim.generation(),
            grid_size: sim.grid_size(),
            theme: sim.current_theme(),
            instances: sim.instances(),
            palette: sim.palette().clone(),
            view_projection: sim.camera().view_projection_matrix(),
            camera_position: sim.camera().position,
            viewport: sim.viewport(),
            turning: sim.is_turning(),
        }
    }

    /// Instance records as raw bytes for a vertex buffer upload.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// A simulation plus the clock that feeds it.
pub struct Runner<H: Host> {
    sim: Simulation<H>,
    clock: FrameClock,
}

impl<H: Host> Runner<H> {
    /// Wraps `sim` with a fresh clock.
    pub fn new(sim: Simulation<H>) -> Self {
        Self {
            sim,
            clock: FrameClock::new(),
        }
    }

    /// Applies one input message. Resuming from a pause resets the clock.
    pub fn handle(&mut self, message: &Message) -> Control {
        let was_paused = self.sim.is_paused();
        let control = message.apply(&mut self.sim);
        if was_paused && !self.sim.is_paused() {
            self.clock.reset();
        }
        control
    }

    /// Ticks the simulation for a frame happening now.
    pub fn frame(&mut self) -> Option<FrameTime> {
        self.frame_at(Instant::now())
    }

    /// Ticks the simulation for a frame at `at`. Returns `None` while paused.
    pub fn frame_at(&mut self, at: Instant) -> Option<FrameTime> {
        if self.sim.is_paused() {
            return None;
        }
        let time = self.clock.tick_at(at);
        self.sim.tick(time.dt, time.now);
        Some(time)
    }

    /// Snapshot of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.sim)
    }

    /// The driven simulation.
    #[must_use]
    pub fn simulation(&self) -> &Simulation<H> {
        &self.sim
    }

    /// Mutable access to the driven simulation.
    pub fn simulation_mut(&mut self) -> &mut Simulation<H> {
        &mut self.sim
    }

    /// Unwraps the simulation.
    pub fn into_simulation(self) -> Simulation<H> {
        self.sim
    }
}

//! Input messages shared by the main-thread and worker execution paths.
//!
//! Messages arrive already sanitized from the input layer and are applied
//! between frames. None of them expects a reply.

use pulsecube_core::{Host, Simulation};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkerError};

/// One discrete input event.
///
/// The JSON form is tagged by `"type"`, e.g. `{"type":"orbitMove","dTheta":0.1,"dPhi":0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// A drag started.
    OrbitStart,
    /// Drag delta in radians.
    OrbitMove {
        #[serde(rename = "dTheta")]
        d_theta: f32,
        #[serde(rename = "dPhi")]
        d_phi: f32,
    },
    /// A drag ended.
    OrbitEnd,
    /// Tap or click without a drag.
    Tap,
    /// Pointer position in normalized device coordinates.
    #[serde(rename = "mouseNDC")]
    MouseNdc { x: f32, y: f32 },
    /// Pointer left the surface.
    #[serde(rename = "mouseleave")]
    MouseLeave,
    /// A two-finger pinch started.
    PinchStart,
    /// Pinch distance ratio relative to the start of the gesture.
    PinchMove { ratio: f32 },
    /// The pinch ended.
    PinchEnd,
    /// Viewport changed.
    Resize { width: f32, height: f32, dpr: f32 },
    /// Theme picked by the user.
    Theme { name: String },
    /// Page visibility changed.
    Visibility { hidden: bool },
    /// Stop the worker.
    Shutdown,
}

/// What the caller should do after applying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Stop processing.
    Shutdown,
}

impl Message {
    /// Parses a message from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| WorkerError::Core(e.into()))
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| WorkerError::Core(e.into()))
    }

    /// Applies the message to `sim`.
    pub fn apply<H: Host>(&self, sim: &mut Simulation<H>) -> Control {
        match self {
            Message::OrbitStart => sim.begin_drag(),
            Message::OrbitMove { d_theta, d_phi } => sim.drag_by(*d_theta, *d_phi),
            Message::OrbitEnd => sim.end_drag(),
            Message::Tap => sim.request_turn(),
            Message::MouseNdc { x, y } => sim.set_pointer(*x, *y),
            Message::MouseLeave => sim.clear_pointer(),
            Message::PinchStart => sim.begin_pinch(),
            Message::PinchMove { ratio } => sim.set_zoom_ratio(*ratio),
            Message::PinchEnd => sim.end_pinch(),
            Message::Resize { width, height, dpr } => sim.resize(*width, *height, *dpr),
            Message::Theme { name } => sim.set_theme(name),
            Message::Visibility { hidden } => sim.set_paused(*hidden),
            Message::Shutdown => return Control::Shutdown,
        }
        Control::Continue
    }
}

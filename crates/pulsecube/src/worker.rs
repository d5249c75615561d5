//! Background worker host.
//!
//! The worker thread owns its [`Simulation`] outright. The main thread talks to
//! it only through channels: input [`Message`]s go in, [`Event`]s come out.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use pulsecube_core::{Host, Options, Simulation, ThemeName, ThemeOrigin};

use crate::error::{Result, WorkerError};
use crate::message::{Control, Message};
use crate::runner::{FrameSnapshot, Runner};

/// Capacity of the event channel.
pub const EVENT_CAPACITY: usize = 16;

/// Frames are skipped while this many events are still unread.
pub const FRAME_BACKLOG: usize = 2;

/// Notifications published by the worker.
#[derive(Debug, Clone)]
pub enum Event {
    /// The current theme changed, so the main thread can mirror it.
    ThemeChanged { theme: ThemeName, origin: ThemeOrigin },
    /// A frame was simulated.
    Frame(Box<FrameSnapshot>),
}

/// Host adapter used inside the worker: forwards theme changes as events.
pub struct WorkerHost<H> {
    inner: H,
    events: Sender<Event>,
}

impl<H: Host> WorkerHost<H> {
    /// Wraps `inner`, publishing on `events`.
    pub fn new(inner: H, events: Sender<Event>) -> Self {
        Self { inner, events }
    }

    /// The wrapped host.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Host> Host for WorkerHost<H> {
    fn is_worker(&self) -> bool {
        true
    }

    fn load_theme(&mut self) -> Option<String> {
        self.inner.load_theme()
    }

    fn store_theme(&mut self, theme: ThemeName) {
        self.inner.store_theme(theme);
    }

    fn theme_changed(&mut self, theme: ThemeName, origin: ThemeOrigin) {
        self.inner.theme_changed(theme, origin);
        match self.events.try_send(Event::ThemeChanged { theme, origin }) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => log::warn!("event channel full, theme change to {theme} not published"),
        }
    }
}

/// Handle to a simulation running on its own thread.
///
/// Dropping the handle stops the thread and waits for it.
pub struct Worker {
    tx: Option<Sender<Message>>,
    events: Receiver<Event>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Starts a worker thread that owns a simulation built from `options` and `host`.
    pub fn spawn<H>(options: Options, host: H) -> Result<Self>
    where
        H: Host + Send + 'static,
    {
        if options.frame_rate == 0 {
            return Err(WorkerError::InvalidFrameRate);
        }
        let period = Duration::from_secs_f64(1.0 / f64::from(options.frame_rate));
        let (tx, rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::bounded(EVENT_CAPACITY);

        let handle = thread::Builder::new()
            .name("pulsecube-worker".to_string())
            .spawn(move || {
                let host = WorkerHost::new(host, event_tx.clone());
                let runner = Runner::new(Simulation::new(options, host));
                run(runner, &rx, &event_tx, period);
            })
            .map_err(WorkerError::Spawn)?;

        Ok(Self {
            tx: Some(tx),
            events: event_rx,
            handle: Some(handle),
        })
    }

    /// Queues a message for the worker. Never blocks.
    pub fn send(&self, message: Message) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(WorkerError::Disconnected)?;
        tx.send(message).map_err(|_| WorkerError::Disconnected)
    }

    /// Events published by the worker.
    #[must_use]
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Whether the worker thread is still running.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            // Already-exited workers have dropped the receiver
            let _ = tx.send(Message::Shutdown);
        }
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked)?;
            log::debug!("worker joined");
        }
        Ok(())
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::warn!("worker shutdown failed: {err}");
        }
    }
}

fn run<H: Host>(mut runner: Runner<H>, rx: &Receiver<Message>, events: &Sender<Event>, period: Duration) {
    log::info!("worker running, frame period {period:?}");
    let ticker = crossbeam_channel::tick(period);

    'frames: loop {
        if runner.simulation().is_paused() {
            // Hidden: no frames until a message resumes us
            let Ok(message) = rx.recv() else {
                break;
            };
            if runner.handle(&message) == Control::Shutdown {
                break;
            }
            continue;
        }

        let Ok(at) = ticker.recv() else {
            break;
        };
        loop {
            match rx.try_recv() {
                Ok(message) => {
                    if runner.handle(&message) == Control::Shutdown {
                        break 'frames;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'frames,
            }
        }

        if runner.frame_at(at).is_none() || events.len() >= FRAME_BACKLOG {
            continue;
        }
        if let Err(TrySendError::Full(_)) = events.try_send(Event::Frame(Box::new(runner.snapshot()))) {
            log::trace!("event channel full, dropping frame");
        }
    }

    log::info!("worker stopped");
}

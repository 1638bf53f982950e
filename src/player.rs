//! Tick-driven route playback.
//!
//! `PathPlayer` owns a decoded route and replays it as a sequence of
//! marker updates: one consumed coordinate per tick, with the heading
//! recomputed from the previous marker position at each step. The queue
//! of remaining points only ever shrinks while running, so a playback
//! always terminates.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::bearing::bearing;
use crate::polyline::Coordinate;
use crate::traits::{CancelHandle, TickFlow, TickScheduler};

/// Playback tuning.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Time between marker updates.
    pub tick_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Lifecycle of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Finished,
}

/// Errors reported synchronously from [`PathPlayer::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    /// The supplied path had no coordinates.
    EmptyPath,
    /// A playback is already running; stop it first.
    AlreadyRunning,
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::EmptyPath => write!(f, "path has no coordinates"),
            PlaybackError::AlreadyRunning => write!(f, "a playback is already running"),
        }
    }
}

impl std::error::Error for PlaybackError {}

type UpdateFn = Box<dyn FnMut(Coordinate, f64) + Send>;

struct PlayerCore {
    state: PlaybackState,
    remaining: VecDeque<Coordinate>,
    position: Option<Coordinate>,
    bearing: f64,
    on_update: Option<UpdateFn>,
}

impl PlayerCore {
    fn settle(&mut self, state: PlaybackState) {
        self.state = state;
        self.remaining.clear();
        self.on_update = None;
    }
}

/// Replays a route as timed position/heading updates.
///
/// Generic over the scheduler seam so hosts can use the thread-backed
/// timer or drive ticks themselves (see [`crate::scheduler`]).
pub struct PathPlayer<S: TickScheduler> {
    scheduler: S,
    config: PlayerConfig,
    core: Arc<Mutex<PlayerCore>>,
    handle: Option<S::Handle>,
}

impl<S: TickScheduler> PathPlayer<S> {
    pub fn new(scheduler: S, config: PlayerConfig) -> Self {
        Self {
            scheduler,
            config,
            core: Arc::new(Mutex::new(PlayerCore {
                state: PlaybackState::Idle,
                remaining: VecDeque::new(),
                position: None,
                bearing: 0.0,
                on_update: None,
            })),
            handle: None,
        }
    }

    /// Starts replaying `path` with the marker at `marker`.
    ///
    /// The player takes ownership of the path and consumes it
    /// front-to-back, invoking `on_update` once per tick with the new
    /// marker position and heading. The callback runs on the scheduler
    /// tick and must not call back into the player.
    ///
    /// A single-point path finishes immediately without an update. An
    /// empty path and a start during a running playback are rejected;
    /// a running playback stays undisturbed by the rejected call.
    pub fn start<F>(
        &mut self,
        marker: Coordinate,
        path: Vec<Coordinate>,
        on_update: F,
    ) -> Result<(), PlaybackError>
    where
        F: FnMut(Coordinate, f64) + Send + 'static,
    {
        let mut core = self.core.lock().unwrap_or_else(PoisonError::into_inner);

        if core.state == PlaybackState::Running {
            return Err(PlaybackError::AlreadyRunning);
        }
        if path.is_empty() {
            return Err(PlaybackError::EmptyPath);
        }

        core.position = Some(marker);
        core.bearing = 0.0;

        if path.len() == 1 {
            // Nothing to travel; the marker is already at the only point.
            core.settle(PlaybackState::Finished);
            debug!("single-point path, playback finished immediately");
            return Ok(());
        }

        core.state = PlaybackState::Running;
        core.remaining = VecDeque::from(path);
        core.on_update = Some(Box::new(on_update));
        let points = core.remaining.len();
        drop(core);

        let tick_core = Arc::clone(&self.core);
        let handle = self.scheduler.schedule_repeating(
            self.config.tick_interval,
            Box::new(move || step(&tick_core)),
        );
        self.handle = Some(handle);

        debug!(points, "playback started");
        Ok(())
    }

    /// Cancels playback.
    ///
    /// A running playback returns to idle and its remaining path is
    /// discarded; once this returns, no further update fires, even for
    /// a tick already queued. Stopping an idle or finished player does
    /// nothing.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }

        let mut core = self.core.lock().unwrap_or_else(PoisonError::into_inner);
        if core.state == PlaybackState::Running {
            core.settle(PlaybackState::Idle);
            core.position = None;
            core.bearing = 0.0;
            debug!("playback cancelled");
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
    }

    /// Current marker position; `None` while idle.
    pub fn position(&self) -> Option<Coordinate> {
        self.core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .position
    }

    /// Heading of the last emitted update, in degrees.
    pub fn bearing(&self) -> f64 {
        self.core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .bearing
    }

    pub fn remaining_len(&self) -> usize {
        self.core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remaining
            .len()
    }
}

impl<S: TickScheduler> Drop for PathPlayer<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

/// Advances the playback by one tick.
fn step(core: &Arc<Mutex<PlayerCore>>) -> TickFlow {
    let mut core = core.lock().unwrap_or_else(PoisonError::into_inner);

    if core.state != PlaybackState::Running {
        // Cancelled between scheduling and delivery.
        return TickFlow::Stop;
    }
    if core.remaining.len() <= 1 {
        core.settle(PlaybackState::Finished);
        return TickFlow::Stop;
    }

    core.remaining.pop_front();
    let Some(&next) = core.remaining.front() else {
        core.settle(PlaybackState::Finished);
        return TickFlow::Stop;
    };

    let from = core.position.unwrap_or(next);
    let heading = bearing(from, next);
    core.position = Some(next);
    core.bearing = heading;

    if let Some(on_update) = core.on_update.as_mut() {
        on_update(next, heading);
    }

    if core.remaining.len() <= 1 {
        core.settle(PlaybackState::Finished);
        debug!("playback finished");
        return TickFlow::Stop;
    }

    TickFlow::Continue
}

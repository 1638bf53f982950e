//! Tick scheduler providers.
//!
//! `ThreadScheduler` delivers ticks in real time from a dedicated
//! thread. `ManualScheduler` delivers them only when the caller asks,
//! for hosts that own their event loop and for deterministic tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::traits::{CancelHandle, TickFlow, TickFn, TickScheduler};

/// Spawns one thread per scheduled task and sleeps out the interval
/// between ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

#[derive(Debug)]
pub struct ThreadHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle for ThreadHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl TickScheduler for ThreadScheduler {
    type Handle = ThreadHandle;

    fn schedule_repeating(&self, interval: Duration, mut tick: TickFn) -> ThreadHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if tick() == TickFlow::Stop {
                    break;
                }
            }
        });

        ThreadHandle { cancelled }
    }
}

struct ManualTask {
    interval: Duration,
    tick: TickFn,
    alive: Arc<AtomicBool>,
}

/// Caller-driven scheduler: nothing runs until [`ManualScheduler::fire`]
/// is called.
///
/// Clones share the same task list, so a clone can be handed to a player
/// while the original keeps driving the ticks.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Arc<Mutex<Vec<ManualTask>>>,
}

#[derive(Debug)]
pub struct ManualHandle {
    alive: Arc<AtomicBool>,
}

impl CancelHandle for ManualHandle {
    fn cancel(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl TickScheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_repeating(&self, interval: Duration, tick: TickFn) -> ManualHandle {
        let alive = Arc::new(AtomicBool::new(true));
        let task = ManualTask {
            interval,
            tick,
            alive: Arc::clone(&alive),
        };

        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task);

        ManualHandle { alive }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every live task once and retires those that return
    /// [`TickFlow::Stop`]. Returns how many ticks ran.
    pub fn fire(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);

        let mut fired = 0;
        for task in tasks.iter_mut() {
            if !task.alive.load(Ordering::SeqCst) {
                continue;
            }
            fired += 1;
            if (task.tick)() == TickFlow::Stop {
                task.alive.store(false, Ordering::SeqCst);
            }
        }
        tasks.retain(|task| task.alive.load(Ordering::SeqCst));

        fired
    }

    /// Intervals of the tasks still armed, in scheduling order.
    pub fn intervals(&self) -> Vec<Duration> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|task| task.interval)
            .collect()
    }
}

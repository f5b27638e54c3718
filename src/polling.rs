//! Live trace polling.
//!
//! A single slot: at most one `(project, trace)` pair is polled at a time.
//! Subscribing fires one tick immediately and then installs a repeating
//! timer; replacing or clearing the subscription drops the previous timer
//! before anything new is scheduled.

use std::cell::RefCell;

use gloo_timers::callback::Interval;

use crate::constants::POLL_INTERVAL_MS;
use crate::debug_log;
use crate::messages::Command;

/// Source of repeating timers.  Dropping the returned handle cancels it.
pub trait Scheduler {
    type Handle;

    fn every(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Browser timers via `setInterval`.
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = Interval;

    fn every(&self, interval_ms: u32, tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(interval_ms, tick)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollKey {
    pub project_id: String,
    pub trace_id: String,
}

pub struct TracePoller<S: Scheduler> {
    scheduler: S,
    active: Option<(PollKey, S::Handle)>,
}

impl<S: Scheduler> TracePoller<S> {
    pub fn new(scheduler: S) -> Self {
        Self { scheduler, active: None }
    }

    pub fn active_key(&self) -> Option<&PollKey> {
        self.active.as_ref().map(|(key, _)| key)
    }

    /// Replace the current subscription with `key`.
    pub fn subscribe<F>(&mut self, key: PollKey, mut tick: F)
    where
        F: FnMut() + 'static,
    {
        self.unsubscribe();
        debug_log!("Polling {}/{} every {}ms", key.project_id, key.trace_id, POLL_INTERVAL_MS);
        tick();
        let handle = self.scheduler.every(POLL_INTERVAL_MS, Box::new(tick));
        self.active = Some((key, handle));
    }

    pub fn unsubscribe(&mut self) {
        if let Some((key, handle)) = self.active.take() {
            debug_log!("Stopped polling {}/{}", key.project_id, key.trace_id);
            drop(handle);
        }
    }
}

thread_local! {
    static POLLER: RefCell<TracePoller<GlooScheduler>> = RefCell::new(TracePoller::new(GlooScheduler));
}

pub fn execute_polling_command(cmd: Command) {
    match cmd {
        Command::StartPolling { project_id, trace_id } => {
            let key = PollKey { project_id: project_id.clone(), trace_id: trace_id.clone() };
            POLLER.with(|poller| {
                let mut poller = poller.borrow_mut();
                if let Some(previous) = poller.active_key() {
                    debug_log!("Replacing live trace {}", previous.trace_id);
                }
                poller.subscribe(key, move || {
                    crate::command_executors::poll_trace_once(&project_id, &trace_id)
                })
            });
        }
        Command::StopPolling => POLLER.with(|poller| poller.borrow_mut().unsubscribe()),
        other => crate::warn_log!("execute_polling_command got {:?}", other),
    }
}

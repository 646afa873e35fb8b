// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous-update scheduling.
//!
//! The [`UpdateScheduler`] is a two-state machine, [`Idle`] and
//! [`Watching`]. Callers request a transition; [`transition`] is the pure
//! transition function, and its [`Effects`] tell the caller what to do with
//! its subscription (the set of listeners that re-run the solve pass) and its
//! style effects.
//!
//! Each start hands out a fresh [`Epoch`]. Callbacks of a subscription carry
//! the epoch it was created with, so a trigger that was already queued when
//! its subscription was torn down is recognized and dropped.
//!
//! [`Idle`]: SchedulerState::Idle
//! [`Watching`]: SchedulerState::Watching

/// Scheduler state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// No subscription is live.
    #[default]
    Idle,
    /// A subscription is live and re-runs the solve pass on every trigger.
    Watching,
}

/// A requested transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Request {
    /// The popup became active with a resolved anchor, or its anchor changed
    /// while active.
    Start,
    /// The popup became inactive, lost its anchor, or was disconnected.
    Stop,
}

/// Generation number of a subscription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(pub u64);

/// Side effects of a transition, performed in field order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Effects {
    /// Drop the live subscription.
    pub teardown: bool,
    /// Revert every style effect the pipeline produced.
    pub clear_styles: bool,
    /// Create a subscription for the new epoch.
    pub subscribe: bool,
    /// Run one solve pass immediately.
    pub solve: bool,
}

/// The pure transition function.
#[must_use]
pub const fn transition(state: SchedulerState, request: Request) -> (SchedulerState, Effects) {
    match (state, request) {
        (SchedulerState::Idle, Request::Start) => (
            SchedulerState::Watching,
            Effects {
                teardown: false,
                clear_styles: false,
                subscribe: true,
                solve: true,
            },
        ),
        (SchedulerState::Watching, Request::Start) => (
            SchedulerState::Watching,
            Effects {
                teardown: true,
                clear_styles: false,
                subscribe: true,
                solve: true,
            },
        ),
        (SchedulerState::Watching, Request::Stop) => (
            SchedulerState::Idle,
            Effects {
                teardown: true,
                clear_styles: true,
                subscribe: false,
                solve: false,
            },
        ),
        // Nothing is live, but deactivation still guarantees a clean host.
        (SchedulerState::Idle, Request::Stop) => (
            SchedulerState::Idle,
            Effects {
                teardown: false,
                clear_styles: true,
                subscribe: false,
                solve: false,
            },
        ),
    }
}

/// Tracks the scheduler state and the live epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateScheduler {
    state: SchedulerState,
    epoch: Epoch,
}

impl UpdateScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `request` and returns the effects the caller must perform.
    ///
    /// Every [`Request::Start`] advances the epoch, so the subscription
    /// created for it is the only one [`accepts`](Self::accepts) recognizes.
    pub fn request(&mut self, request: Request) -> Effects {
        let (state, effects) = transition(self.state, request);
        self.state = state;
        if effects.subscribe {
            self.epoch = Epoch(self.epoch.0 + 1);
        }
        effects
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Returns `true` while a subscription is live.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.state == SchedulerState::Watching
    }

    /// Returns the epoch of the live (or most recent) subscription.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Returns `true` if a trigger tagged with `epoch` comes from the live
    /// subscription.
    #[must_use]
    pub fn accepts(&self, epoch: Epoch) -> bool {
        self.is_watching() && epoch == self.epoch
    }
}

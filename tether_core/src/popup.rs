// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popup controller.
//!
//! [`Popup`] owns everything one floating element needs: its configuration,
//! the anchor reference and its cached resolution, the `active` and
//! `connected` flags, the [`UpdateScheduler`], the live subscription, and the
//! record of applied style effects.
//!
//! Property setters only record state and request scheduler transitions;
//! performing the resulting [`Effects`] is centralized in one place.
//!
//! # Solve pass
//!
//! ```text
//!   trigger ──► accepts(epoch)? ──► measure() ──► compute_layout()
//!                                                      │
//!                 ┌────────────────────────────────────┘
//!                 ▼
//!   AppliedStyle::patch_for() ──► PositionApplier::apply()
//! ```
//!
//! [`Effects`]: crate::scheduler::Effects

use alloc::boxed::Box;

use crate::anchor::{AnchorRef, AnchorScope, resolve};
use crate::backend::{Anchor, Environment, PositionApplier};
use crate::config::PopupConfig;
use crate::middleware::{Layout, compute_layout};
use crate::patch::AppliedStyle;
use crate::scheduler::{Epoch, Request, SchedulerState, UpdateScheduler};
use crate::trace::{
    AnchorResolvedEvent, PopupId, SchedulerEvent, SkipEvent, SkipReason, SolveEvent, TraceSink,
    Tracer,
};

/// The anchor reference type of an [`Environment`].
pub type AnchorRefOf<E> = AnchorRef<<E as AnchorScope>::Element, <E as AnchorScope>::Virtual>;

/// Positioning controller for one floating element.
pub struct Popup<E: Environment + PositionApplier> {
    env: E,
    id: PopupId,
    config: PopupConfig,
    anchor_ref: Option<AnchorRefOf<E>>,
    anchor: Option<Anchor<E>>,
    active: bool,
    connected: bool,
    scheduler: UpdateScheduler,
    subscription: Option<E::Subscription>,
    applied: AppliedStyle,
    layout: Option<Layout>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<E: Environment + PositionApplier> core::fmt::Debug for Popup<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Popup")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("anchor_kind", &self.anchor_ref.as_ref().map(AnchorRef::kind))
            .field("resolved", &self.anchor.is_some())
            .field("active", &self.active)
            .field("connected", &self.connected)
            .field("scheduler", &self.scheduler)
            .field("applied", &self.applied)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<E: Environment + PositionApplier> Popup<E> {
    /// Creates an inactive, disconnected popup anchored to its slot.
    #[must_use]
    pub fn new(env: E, id: PopupId, config: PopupConfig) -> Self {
        Self {
            env,
            id,
            config,
            anchor_ref: Some(AnchorRef::Slotted),
            anchor: None,
            active: false,
            connected: false,
            scheduler: UpdateScheduler::new(),
            subscription: None,
            applied: AppliedStyle::default(),
            layout: None,
            sink: None,
        }
    }

    /// Routes trace events to `sink`.
    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.sink = sink;
    }

    /// Returns the identifier used in trace events.
    #[must_use]
    pub fn id(&self) -> PopupId {
        self.id
    }

    /// Returns the environment.
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Returns the environment mutably.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Returns the anchor reference, or `None` if it was cleared.
    #[must_use]
    pub fn anchor_ref(&self) -> Option<&AnchorRefOf<E>> {
        self.anchor_ref.as_ref()
    }

    /// Returns the cached resolved anchor.
    #[must_use]
    pub fn anchor(&self) -> Option<&Anchor<E>> {
        self.anchor.as_ref()
    }

    /// Returns the `active` flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns whether the host is in the document.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns the scheduler state.
    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Returns the epoch of the live subscription.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.scheduler.epoch()
    }

    /// Returns the layout of the last completed solve pass while watching.
    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    // -- Lifecycle --

    /// The host was inserted into the document.
    pub fn connect(&mut self) {
        self.connected = true;
        self.resolve_anchor();
    }

    /// The host was removed from the document.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.request(Request::Stop);
    }

    // -- Properties --

    /// Replaces the anchor reference and resolves it again.
    pub fn set_anchor(&mut self, anchor: AnchorRefOf<E>) {
        self.anchor_ref = Some(anchor);
        if self.connected {
            self.resolve_anchor();
        }
    }

    /// Drops the anchor reference. Nothing resolves until the next
    /// [`set_anchor`](Self::set_anchor).
    pub fn clear_anchor(&mut self) {
        self.anchor_ref = None;
        if self.connected {
            self.resolve_anchor();
        }
    }

    /// The content of the anchor slot changed.
    pub fn slot_changed(&mut self) {
        if self.connected && matches!(self.anchor_ref, Some(AnchorRef::Slotted)) {
            self.resolve_anchor();
        }
    }

    /// Sets the `active` flag, starting or stopping the scheduler.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        self.sync();
    }

    /// Replaces the configuration and re-solves if watching.
    pub fn set_config(&mut self, config: PopupConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        self.reposition();
    }

    /// Edits the configuration in place and re-solves if watching.
    pub fn update_config(&mut self, f: impl FnOnce(&mut PopupConfig)) {
        let mut config = self.config;
        f(&mut config);
        self.set_config(config);
    }

    // -- Solving --

    /// Runs one solve pass now. Does nothing unless watching.
    pub fn reposition(&mut self) {
        if !self.scheduler.is_watching() {
            self.skip(SkipReason::Inactive);
            return;
        }
        self.solve();
    }

    /// Called by a subscription when the anchor could have moved.
    pub fn handle_trigger(&mut self, epoch: Epoch) {
        if !self.scheduler.accepts(epoch) {
            self.skip(SkipReason::StaleTrigger);
            return;
        }
        self.solve();
    }

    // -- Internals --

    fn tracer(&mut self) -> Tracer<'_> {
        match self.sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }

    fn skip(&mut self, reason: SkipReason) {
        let e = SkipEvent {
            popup: self.id,
            reason,
        };
        self.tracer().skip(&e);
    }

    fn resolve_anchor(&mut self) {
        self.anchor = self
            .anchor_ref
            .as_ref()
            .and_then(|anchor| resolve(anchor, &self.env));
        let e = AnchorResolvedEvent {
            popup: self.id,
            kind: self.anchor_ref.as_ref().map(AnchorRef::kind),
            resolved: self.anchor.is_some(),
        };
        self.tracer().anchor_resolved(&e);

        // A new anchor identity restarts a live subscription.
        if self.wants_watching() {
            self.request(Request::Start);
        } else {
            self.sync();
        }
    }

    fn wants_watching(&self) -> bool {
        self.active && self.connected && self.anchor.is_some()
    }

    /// Brings the scheduler in line with the flags without restarting a
    /// live subscription.
    fn sync(&mut self) {
        if self.wants_watching() {
            if !self.scheduler.is_watching() {
                self.request(Request::Start);
            }
        } else {
            self.request(Request::Stop);
        }
    }

    fn request(&mut self, request: Request) {
        let from = self.scheduler.state();
        let effects = self.scheduler.request(request);
        let e = SchedulerEvent {
            popup: self.id,
            from,
            to: self.scheduler.state(),
            epoch: self.scheduler.epoch(),
        };
        self.tracer().scheduler(&e);

        if effects.teardown {
            self.subscription = None;
        }
        if effects.clear_styles {
            self.layout = None;
            let patch = self.applied.clear();
            if !patch.is_empty() {
                self.env.apply(&patch);
            }
        }
        if effects.subscribe {
            let Some(anchor) = self.anchor.as_ref() else {
                self.skip(SkipReason::NoAnchor);
                self.request(Request::Stop);
                return;
            };
            self.subscription = Some(self.env.watch(anchor, self.scheduler.epoch()));
        }
        if effects.solve {
            self.solve();
        }
    }

    fn solve(&mut self) {
        let Some(anchor) = self.anchor.as_ref() else {
            self.skip(SkipReason::NoAnchor);
            self.request(Request::Stop);
            return;
        };
        let release = self.applied.release_pins(self.config.match_size);
        if !release.is_empty() {
            self.env.apply(&release);
        }
        let Some(m) = self.env.measure(anchor, self.config.strategy) else {
            self.skip(SkipReason::Detached);
            return;
        };

        let layout = compute_layout(&m, &self.config);
        let patch = self.applied.patch_for(&layout, &m, &self.config);
        self.env.apply(&patch);
        self.layout = Some(layout);

        let e = SolveEvent::new(self.id, self.scheduler.epoch(), self.config.placement, &layout);
        self.tracer().solve(&e);
    }
}

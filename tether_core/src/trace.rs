// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for popups.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! [`Popup`](crate::popup::Popup) controller emits. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use core::fmt;

use crate::anchor::AnchorKind;
use crate::middleware::Layout;
use crate::placement::Placement;
use crate::scheduler::{Epoch, SchedulerState};

/// Identifies one popup in trace output.
///
/// Backends assign these; core passes them through without interpreting the
/// value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PopupId(pub u32);

impl fmt::Debug for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PopupId({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Emitted after every anchor resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorResolvedEvent {
    /// Which popup.
    pub popup: PopupId,
    /// How the anchor was referenced, `None` if the reference was cleared.
    pub kind: Option<AnchorKind>,
    /// Whether a concrete anchor was found.
    pub resolved: bool,
}

/// Emitted on every scheduler transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerEvent {
    /// Which popup.
    pub popup: PopupId,
    /// State before the transition.
    pub from: SchedulerState,
    /// State after the transition.
    pub to: SchedulerState,
    /// Epoch after the transition.
    pub epoch: Epoch,
}

/// Emitted after a completed solve pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveEvent {
    /// Which popup.
    pub popup: PopupId,
    /// Epoch of the subscription that ran the pass.
    pub epoch: Epoch,
    /// Placement from the configuration.
    pub requested: Placement,
    /// Placement the pipeline committed to.
    pub placement: Placement,
    /// Left edge in viewport coordinates.
    pub x: f64,
    /// Top edge in viewport coordinates.
    pub y: f64,
    /// Whether flip changed the side.
    pub flipped: bool,
    /// Whether shift moved the element.
    pub shifted: bool,
    /// Published available width.
    pub available_width: Option<f64>,
    /// Published available height.
    pub available_height: Option<f64>,
}

impl SolveEvent {
    /// Creates a `SolveEvent` from a computed [`Layout`].
    #[must_use]
    pub fn new(popup: PopupId, epoch: Epoch, requested: Placement, layout: &Layout) -> Self {
        Self {
            popup,
            epoch,
            requested,
            placement: layout.placement,
            x: layout.coords.x,
            y: layout.coords.y,
            flipped: layout.flipped,
            shifted: layout.shifted,
            available_width: layout.available_width,
            available_height: layout.available_height,
        }
    }
}

/// Why a solve pass did not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The scheduler is idle.
    Inactive,
    /// The anchor did not resolve.
    NoAnchor,
    /// The anchor or floating element is not in the document.
    Detached,
    /// The trigger came from a torn-down subscription.
    StaleTrigger,
}

/// Emitted when a solve pass is skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipEvent {
    /// Which popup.
    pub popup: PopupId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from popups.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after anchor resolution.
    fn on_anchor_resolved(&mut self, e: &AnchorResolvedEvent) {
        _ = e;
    }

    /// Called on every scheduler transition.
    fn on_scheduler(&mut self, e: &SchedulerEvent) {
        _ = e;
    }

    /// Called after a solve pass.
    fn on_solve(&mut self, e: &SolveEvent) {
        _ = e;
    }

    /// Called when a solve pass is skipped.
    fn on_skip(&mut self, e: &SkipEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self::from_option(Some(sink))
    }

    /// Creates a tracer from an optional sink.
    #[inline]
    #[must_use]
    pub fn from_option(sink: Option<&'a mut dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::from_option(None)
    }

    /// Emits an [`AnchorResolvedEvent`].
    #[inline]
    pub fn anchor_resolved(&mut self, e: &AnchorResolvedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_anchor_resolved(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SchedulerEvent`].
    #[inline]
    pub fn scheduler(&mut self, e: &SchedulerEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_scheduler(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SolveEvent`].
    #[inline]
    pub fn solve(&mut self, e: &SolveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_solve(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SkipEvent`].
    #[inline]
    pub fn skip(&mut self, e: &SkipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_skip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_skip(&SkipEvent {
            popup: PopupId(0),
            reason: SkipReason::Inactive,
        });
        sink.on_scheduler(&SchedulerEvent {
            popup: PopupId(0),
            from: SchedulerState::Idle,
            to: SchedulerState::Watching,
            epoch: Epoch(1),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.skip(&SkipEvent {
            popup: PopupId(3),
            reason: SkipReason::Detached,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            reasons: Vec<SkipReason>,
        }
        impl TraceSink for RecordingSink {
            fn on_skip(&mut self, e: &SkipEvent) {
                self.reasons.push(e.reason);
            }
        }

        let mut sink = RecordingSink {
            reasons: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.skip(&SkipEvent {
            popup: PopupId(1),
            reason: SkipReason::StaleTrigger,
        });
        drop(tracer);
        assert_eq!(sink.reasons, &[SkipReason::StaleTrigger]);
    }
}

// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event to a
//! `Vec<RecordedEvent>`. A popup takes ownership of its sink, so
//! [`SharedRecorder`] keeps the log behind an `Rc` that can still be read
//! after a clone has been handed over.

use std::cell::RefCell;
use std::rc::Rc;

use tether_core::trace::{AnchorResolvedEvent, SchedulerEvent, SkipEvent, SolveEvent, TraceSink};

/// One recorded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_anchor_resolved`].
    AnchorResolved(AnchorResolvedEvent),
    /// See [`TraceSink::on_scheduler`].
    Scheduler(SchedulerEvent),
    /// See [`TraceSink::on_solve`].
    Solve(SolveEvent),
    /// See [`TraceSink::on_skip`].
    Skip(SkipEvent),
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Iterates over the recorded solve passes.
    pub fn solves(&self) -> impl Iterator<Item = &SolveEvent> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::Solve(s) => Some(s),
            _ => None,
        })
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_anchor_resolved(&mut self, e: &AnchorResolvedEvent) {
        self.events.push(RecordedEvent::AnchorResolved(*e));
    }

    fn on_scheduler(&mut self, e: &SchedulerEvent) {
        self.events.push(RecordedEvent::Scheduler(*e));
    }

    fn on_solve(&mut self, e: &SolveEvent) {
        self.events.push(RecordedEvent::Solve(*e));
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.events.push(RecordedEvent::Skip(*e));
    }
}

// ---------------------------------------------------------------------------
// SharedRecorder
// ---------------------------------------------------------------------------

/// A cloneable handle to one [`RecorderSink`].
///
/// Every clone records into and reads from the same log.
#[derive(Clone, Debug, Default)]
pub struct SharedRecorder {
    inner: Rc<RefCell<RecorderSink>>,
}

impl SharedRecorder {
    /// Creates an empty shared recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.inner.borrow().events().to_vec()
    }

    /// Removes and returns the recorded events.
    #[must_use]
    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.inner.borrow_mut().events)
    }
}

impl TraceSink for SharedRecorder {
    fn on_anchor_resolved(&mut self, e: &AnchorResolvedEvent) {
        self.inner.borrow_mut().on_anchor_resolved(e);
    }

    fn on_scheduler(&mut self, e: &SchedulerEvent) {
        self.inner.borrow_mut().on_scheduler(e);
    }

    fn on_solve(&mut self, e: &SolveEvent) {
        self.inner.borrow_mut().on_solve(e);
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.inner.borrow_mut().on_skip(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::anchor::AnchorKind;
    use tether_core::placement::Placement;
    use tether_core::scheduler::{Epoch, SchedulerState};
    use tether_core::trace::{PopupId, SkipReason};

    fn solve(epoch: u64, y: f64) -> SolveEvent {
        SolveEvent {
            popup: PopupId(0),
            epoch: Epoch(epoch),
            requested: Placement::BOTTOM,
            placement: Placement::BOTTOM,
            x: 0.0,
            y,
            flipped: false,
            shifted: false,
            available_width: None,
            available_height: None,
        }
    }

    #[test]
    fn events_keep_their_order() {
        let mut rec = RecorderSink::new();
        rec.on_anchor_resolved(&AnchorResolvedEvent {
            popup: PopupId(0),
            kind: Some(AnchorKind::Slotted),
            resolved: true,
        });
        rec.on_scheduler(&SchedulerEvent {
            popup: PopupId(0),
            from: SchedulerState::Idle,
            to: SchedulerState::Watching,
            epoch: Epoch(1),
        });
        rec.on_solve(&solve(1, 40.0));
        rec.on_skip(&SkipEvent {
            popup: PopupId(0),
            reason: SkipReason::Detached,
        });

        let events = rec.events();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RecordedEvent::AnchorResolved(_)));
        assert!(matches!(events[1], RecordedEvent::Scheduler(_)));
        assert_eq!(events[2], RecordedEvent::Solve(solve(1, 40.0)));
        assert!(matches!(
            events[3],
            RecordedEvent::Skip(SkipEvent {
                reason: SkipReason::Detached,
                ..
            })
        ));
    }

    #[test]
    fn solves_filters_other_events() {
        let mut rec = RecorderSink::new();
        rec.on_solve(&solve(1, 10.0));
        rec.on_skip(&SkipEvent {
            popup: PopupId(0),
            reason: SkipReason::Inactive,
        });
        rec.on_solve(&solve(1, 20.0));
        let ys: Vec<f64> = rec.solves().map(|s| s.y).collect();
        assert_eq!(ys, [10.0, 20.0]);

        rec.clear();
        assert!(rec.events().is_empty());
    }

    #[test]
    fn shared_recorder_clones_see_the_same_log() {
        let shared = SharedRecorder::new();
        let mut handed_over: Box<dyn TraceSink> = Box::new(shared.clone());
        handed_over.on_solve(&solve(2, 5.0));
        assert_eq!(shared.events(), [RecordedEvent::Solve(solve(2, 5.0))]);

        let taken = shared.take();
        assert_eq!(taken.len(), 1);
        assert!(shared.events().is_empty(), "take empties the log");
    }
}

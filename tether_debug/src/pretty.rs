// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tether_core::trace::{AnchorResolvedEvent, SchedulerEvent, SkipEvent, SolveEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn fmt_available(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"))
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_anchor_resolved(&mut self, e: &AnchorResolvedEvent) {
        let kind = e.kind.map_or_else(|| "cleared".to_owned(), |k| format!("{k:?}"));
        let _ = writeln!(
            self.writer,
            "[anchor] popup={} kind={kind} resolved={}",
            e.popup.0, e.resolved,
        );
    }

    fn on_scheduler(&mut self, e: &SchedulerEvent) {
        let _ = writeln!(
            self.writer,
            "[scheduler] popup={} {:?} -> {:?} epoch={}",
            e.popup.0, e.from, e.to, e.epoch.0,
        );
    }

    fn on_solve(&mut self, e: &SolveEvent) {
        let mut flags = String::new();
        if e.flipped {
            flags.push_str(" flipped");
        }
        if e.shifted {
            flags.push_str(" shifted");
        }
        let _ = writeln!(
            self.writer,
            "[solve] popup={} epoch={} {} -> {} at ({:.1}, {:.1}){flags} available=({}, {})",
            e.popup.0,
            e.epoch.0,
            e.requested,
            e.placement,
            e.x,
            e.y,
            fmt_available(e.available_width),
            fmt_available(e.available_height),
        );
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        let _ = writeln!(
            self.writer,
            "[skip] popup={} reason={:?}",
            e.popup.0, e.reason,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::placement::Placement;
    use tether_core::scheduler::{Epoch, SchedulerState};
    use tether_core::trace::{PopupId, SkipReason};

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_solve() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_solve(&SolveEvent {
            popup: PopupId(2),
            epoch: Epoch(1),
            requested: Placement::BOTTOM,
            placement: Placement::TOP,
            x: -50.0,
            y: 580.0,
            flipped: true,
            shifted: false,
            available_width: None,
            available_height: Some(572.0),
        });
        let output = output(sink);
        assert!(output.starts_with("[solve] popup=2"), "got: {output}");
        assert!(output.contains("bottom -> top"), "got: {output}");
        assert!(output.contains("(-50.0, 580.0) flipped"), "got: {output}");
        assert!(!output.contains("shifted"), "got: {output}");
        assert!(output.contains("available=(-, 572.0)"), "got: {output}");
    }

    #[test]
    fn pretty_print_scheduler_and_skip() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_scheduler(&SchedulerEvent {
            popup: PopupId(0),
            from: SchedulerState::Idle,
            to: SchedulerState::Watching,
            epoch: Epoch(3),
        });
        sink.on_skip(&SkipEvent {
            popup: PopupId(0),
            reason: SkipReason::StaleTrigger,
        });
        let output = output(sink);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[scheduler] popup=0 Idle -> Watching epoch=3");
        assert_eq!(lines[1], "[skip] popup=0 reason=StaleTrigger");
    }

    #[test]
    fn pretty_print_cleared_anchor() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_anchor_resolved(&AnchorResolvedEvent {
            popup: PopupId(1),
            kind: None,
            resolved: false,
        });
        let output = output(sink);
        assert_eq!(output, "[anchor] popup=1 kind=cleared resolved=false\n");
    }
}

// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and JSON export for tether diagnostics.
//!
//! This crate provides [`TraceSink`](tether_core::trace::TraceSink)
//! implementations for development and test assertions:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory event log, with
//!   [`recorder::SharedRecorder`] for reading it back after handing the sink
//!   to a popup.
//! - [`json::export`]: writes recorded events as a JSON array.

pub mod json;
pub mod pretty;
pub mod recorder;

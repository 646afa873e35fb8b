// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] writes events from a [`RecorderSink`](crate::recorder::RecorderSink)
//! as a JSON array with one object per event. Every object has a `type`
//! field (`anchor`, `scheduler`, `solve` or `skip`) and a `popup` field.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events.iter().map(to_value).collect();
    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

fn to_value(event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::AnchorResolved(e) => json!({
            "type": "anchor",
            "popup": e.popup.0,
            "kind": e.kind.map(|k| format!("{k:?}")),
            "resolved": e.resolved,
        }),
        RecordedEvent::Scheduler(e) => json!({
            "type": "scheduler",
            "popup": e.popup.0,
            "from": format!("{:?}", e.from),
            "to": format!("{:?}", e.to),
            "epoch": e.epoch.0,
        }),
        RecordedEvent::Solve(e) => json!({
            "type": "solve",
            "popup": e.popup.0,
            "epoch": e.epoch.0,
            "requested": e.requested.to_string(),
            "placement": e.placement.to_string(),
            "x": e.x,
            "y": e.y,
            "flipped": e.flipped,
            "shifted": e.shifted,
            "available_width": e.available_width,
            "available_height": e.available_height,
        }),
        RecordedEvent::Skip(e) => json!({
            "type": "skip",
            "popup": e.popup.0,
            "reason": format!("{:?}", e.reason),
        }),
    }
}

// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement geometry.
//!
//! [`compute_coords`] places a floating box flush against one side of an
//! anchor rectangle. It knows nothing about the viewport; overflow handling
//! is the job of the [`middleware`](crate::middleware) stages.

use kurbo::{Point, Rect, Size};

use crate::placement::{Alignment, Placement, Side};

/// Returns the top-left corner of a `floating` box attached to `anchor` at
/// `placement`, in the anchor's coordinate space.
#[must_use]
pub fn compute_coords(anchor: Rect, floating: Size, placement: Placement) -> Point {
    let center_x = anchor.x0 + anchor.width() / 2.0 - floating.width / 2.0;
    let center_y = anchor.y0 + anchor.height() / 2.0 - floating.height / 2.0;

    let mut coords = match placement.side {
        Side::Top => Point::new(center_x, anchor.y0 - floating.height),
        Side::Bottom => Point::new(center_x, anchor.y1),
        Side::Left => Point::new(anchor.x0 - floating.width, center_y),
        Side::Right => Point::new(anchor.x1, center_y),
    };

    // Cross-axis alignment: offset from the centered position by half the
    // difference in extent.
    let (cross_anchor, cross_floating) = match placement.side {
        Side::Top | Side::Bottom => (anchor.width(), floating.width),
        Side::Left | Side::Right => (anchor.height(), floating.height),
    };
    let delta = match placement.alignment {
        Alignment::Start => -(cross_anchor / 2.0 - cross_floating / 2.0),
        Alignment::Center => 0.0,
        Alignment::End => cross_anchor / 2.0 - cross_floating / 2.0,
    };
    match placement.side {
        Side::Top | Side::Bottom => coords.x += delta,
        Side::Left | Side::Right => coords.y += delta,
    }

    coords
}

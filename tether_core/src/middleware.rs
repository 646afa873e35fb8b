// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The constraint pipeline.
//!
//! [`compute_layout`] threads a [`MiddlewareState`] through a fixed sequence
//! of stages, each enabled by a [`PopupConfig`] flag:
//!
//! 1. **match-size** pins the floating size to the anchor's layout size.
//! 2. **place** solves the requested placement and applies `distance` and
//!    `skidding`.
//! 3. **flip** moves to the opposite side when the requested side overflows
//!    and the opposite one does not.
//! 4. **shift** clamps the cross-axis coordinate into the viewport.
//! 5. **auto-size** computes the space available on the committed side.
//!
//! The order is load-bearing: flip reacts to the matched size, shift to the
//! side flip committed, and auto-size to the position shift settled on.
//!
//! Every stage is a pure function of its inputs, so running the pipeline
//! twice over the same [`Measurements`] yields the same [`Layout`].

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::PopupConfig;
use crate::placement::{Alignment, Axis, Placement, Side, SizeAxis};
use crate::solve::compute_coords;

/// Every layout read a solve pass needs, taken in one batch before any
/// style is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurements {
    /// Anchor bounding box in viewport coordinates.
    pub anchor: Rect,
    /// Anchor layout size (`offsetWidth`/`offsetHeight`), used by
    /// match-size. Equal to the bounding box size for virtual anchors.
    pub anchor_size: Size,
    /// Natural size of the floating element.
    pub floating: Size,
    /// The visible viewport in viewport coordinates.
    pub viewport: Rect,
    /// Origin of the floating element's containing block in viewport
    /// coordinates. Zero for fixed positioning.
    pub origin: Vec2,
}

/// Intermediate state shared by the pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiddlewareState {
    /// Anchor bounding box.
    pub anchor: Rect,
    /// Floating size, possibly pinned by match-size.
    pub floating: Size,
    /// Placement currently in effect, possibly flipped.
    pub placement: Placement,
    /// Top-left corner of the floating element in viewport coordinates.
    pub coords: Point,
    /// Width pinned by match-size.
    pub pinned_width: Option<f64>,
    /// Height pinned by match-size.
    pub pinned_height: Option<f64>,
    /// Width available to the floating element, from auto-size.
    pub available_width: Option<f64>,
    /// Height available to the floating element, from auto-size.
    pub available_height: Option<f64>,
    /// Whether flip committed the opposite side.
    pub flipped: bool,
    /// Whether shift moved the floating element.
    pub shifted: bool,
}

impl MiddlewareState {
    /// Starts a pass from fresh measurements and the requested placement.
    #[must_use]
    pub fn new(m: &Measurements, placement: Placement) -> Self {
        Self {
            anchor: m.anchor,
            floating: m.floating,
            placement,
            coords: Point::ZERO,
            pinned_width: None,
            pinned_height: None,
            available_width: None,
            available_height: None,
            flipped: false,
            shifted: false,
        }
    }
}

/// Result of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Committed placement.
    pub placement: Placement,
    /// Top-left corner of the floating element in viewport coordinates.
    pub coords: Point,
    /// Final floating size.
    pub floating: Size,
    /// Width pinned by match-size, if any.
    pub pinned_width: Option<f64>,
    /// Height pinned by match-size, if any.
    pub pinned_height: Option<f64>,
    /// Available width published by auto-size, if enabled for that axis.
    pub available_width: Option<f64>,
    /// Available height published by auto-size, if enabled for that axis.
    pub available_height: Option<f64>,
    /// Whether flip committed the opposite side.
    pub flipped: bool,
    /// Whether shift moved the floating element.
    pub shifted: bool,
}

impl Layout {
    /// Returns the floating element's final box in viewport coordinates.
    #[must_use]
    pub fn floating_rect(&self) -> Rect {
        Rect::from_origin_size(self.coords, self.floating)
    }
}

impl From<MiddlewareState> for Layout {
    fn from(s: MiddlewareState) -> Self {
        Self {
            placement: s.placement,
            coords: s.coords,
            floating: s.floating,
            pinned_width: s.pinned_width,
            pinned_height: s.pinned_height,
            available_width: s.available_width,
            available_height: s.available_height,
            flipped: s.flipped,
            shifted: s.shifted,
        }
    }
}

/// Runs the full pipeline.
#[must_use]
pub fn compute_layout(m: &Measurements, config: &PopupConfig) -> Layout {
    let mut state = MiddlewareState::new(m, config.placement);
    if let Some(axis) = config.match_size {
        match_size(&mut state, m.anchor_size, axis);
    }
    place(&mut state, config);
    if config.flip {
        flip(&mut state, m.viewport, config);
    }
    if config.shift {
        shift(&mut state, m.viewport, config.shift_padding);
    }
    if let Some(axis) = config.auto_size {
        auto_size(&mut state, m.viewport, axis, config);
    }
    state.into()
}

/// Pins the floating width and/or height to the anchor's layout size.
pub fn match_size(state: &mut MiddlewareState, anchor_size: Size, axis: SizeAxis) {
    if axis.has_width() {
        state.floating.width = anchor_size.width;
        state.pinned_width = Some(anchor_size.width);
    }
    if axis.has_height() {
        state.floating.height = anchor_size.height;
        state.pinned_height = Some(anchor_size.height);
    }
}

/// Solves `state.placement` and applies the configured offsets.
pub fn place(state: &mut MiddlewareState, config: &PopupConfig) {
    state.coords = offset_coords(state, state.placement, config);
}

/// Moves to the opposite side when the current one overflows the viewport
/// and the opposite one does not.
///
/// The decision only depends on the placement the pass started with, so
/// repeated passes cannot oscillate. When both sides overflow, the current
/// side is kept.
pub fn flip(state: &mut MiddlewareState, viewport: Rect, config: &PopupConfig) {
    let padding = config.flip_padding.max(0.0);
    let side = state.placement.side;
    if overflow(side, state.coords, state.floating, viewport, padding) <= 0.0 {
        return;
    }
    let alternative = state.placement.flipped();
    let coords = offset_coords(state, alternative, config);
    if overflow(alternative.side, coords, state.floating, viewport, padding) <= 0.0 {
        state.placement = alternative;
        state.coords = coords;
        state.flipped = true;
    }
}

/// Clamps the cross-axis coordinate so the floating element stays within
/// the viewport minus `padding`.
///
/// A floating element larger than the clamped range is pinned to its
/// leading bound.
pub fn shift(state: &mut MiddlewareState, viewport: Rect, padding: f64) {
    let padding = padding.max(0.0);
    let before = state.coords;
    match state.placement.side.main_axis().cross() {
        Axis::X => {
            let min = viewport.x0 + padding;
            let max = viewport.x1 - state.floating.width - padding;
            state.coords.x = min.max(state.coords.x.min(max));
        }
        Axis::Y => {
            let min = viewport.y0 + padding;
            let max = viewport.y1 - state.floating.height - padding;
            state.coords.y = min.max(state.coords.y.min(max));
        }
    }
    state.shifted |= state.coords != before;
}

/// Computes the space available on the committed side, clamped to zero.
pub fn auto_size(state: &mut MiddlewareState, viewport: Rect, axis: SizeAxis, config: &PopupConfig) {
    let padding = config.auto_size_padding.max(0.0);
    let Point { x, y } = state.coords;
    let Size { width, height } = state.floating;

    let main = match state.placement.side {
        Side::Bottom => viewport.y1 - padding - y,
        Side::Top => y + height - (viewport.y0 + padding),
        Side::Right => viewport.x1 - padding - x,
        Side::Left => x + width - (viewport.x0 + padding),
    };

    let (lo, hi, pos, extent) = match state.placement.side.main_axis() {
        Axis::Y => (viewport.x0 + padding, viewport.x1 - padding, x, width),
        Axis::X => (viewport.y0 + padding, viewport.y1 - padding, y, height),
    };
    let cross = if config.shift {
        hi - lo
    } else {
        match state.placement.alignment {
            Alignment::Start => hi - pos,
            Alignment::End => pos + extent - lo,
            Alignment::Center => {
                let mid = pos + extent / 2.0;
                2.0 * (mid - lo).min(hi - mid)
            }
        }
    };

    let (avail_width, avail_height) = match state.placement.side.main_axis() {
        Axis::Y => (cross, main),
        Axis::X => (main, cross),
    };
    state.available_width = axis.has_width().then_some(avail_width.max(0.0));
    state.available_height = axis.has_height().then_some(avail_height.max(0.0));
}

/// Solves `placement` for the state's anchor and floating size, then applies
/// `distance` along the main axis and `skidding` along the cross axis.
fn offset_coords(state: &MiddlewareState, placement: Placement, config: &PopupConfig) -> Point {
    let mut p = compute_coords(state.anchor, state.floating, placement);
    match placement.side {
        Side::Top => p.y -= config.distance,
        Side::Bottom => p.y += config.distance,
        Side::Left => p.x -= config.distance,
        Side::Right => p.x += config.distance,
    }
    match placement.side.main_axis() {
        Axis::Y => p.x += config.skidding,
        Axis::X => p.y += config.skidding,
    }
    p
}

/// How far a floating box at `coords` crosses the padded viewport edge on
/// `side`. Positive means overflow.
fn overflow(side: Side, coords: Point, floating: Size, viewport: Rect, padding: f64) -> f64 {
    match side {
        Side::Bottom => coords.y + floating.height - (viewport.y1 - padding),
        Side::Top => viewport.y0 + padding - coords.y,
        Side::Right => coords.x + floating.width - (viewport.x1 - padding),
        Side::Left => viewport.x0 + padding - coords.x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 800.0);

    fn measure(anchor: Rect, floating: Size) -> Measurements {
        Measurements {
            anchor,
            anchor_size: anchor.size(),
            floating,
            viewport: VIEWPORT,
            origin: Vec2::ZERO,
        }
    }

    #[test]
    fn flips_to_top_near_bottom_edge() {
        let m = measure(
            Rect::from_origin_size((0.0, 780.0), (100.0, 40.0)),
            Size::new(200.0, 200.0),
        );
        let config = PopupConfig {
            flip: true,
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.placement, Placement::TOP);
        assert!(layout.flipped, "flip should be reported");
        assert_eq!(layout.coords.y, 580.0);
    }

    #[test]
    fn shift_clamps_to_right_edge() {
        let m = measure(
            Rect::from_origin_size((750.0, 780.0), (100.0, 40.0)),
            Size::new(300.0, 200.0),
        );
        let config = PopupConfig {
            placement: Placement::BOTTOM_START,
            shift: true,
            shift_padding: 8.0,
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.coords.x, 492.0);
        assert!(layout.shifted, "shift should be reported");
        assert_eq!(layout.placement, Placement::BOTTOM_START, "shift never changes side");
    }

    #[test]
    fn no_flip_when_both_sides_are_short() {
        let m = measure(
            Rect::from_origin_size((300.0, 350.0), (100.0, 100.0)),
            Size::new(100.0, 500.0),
        );
        let config = PopupConfig {
            flip: true,
            ..PopupConfig::new()
        };
        for _ in 0..3 {
            let layout = compute_layout(&m, &config);
            assert_eq!(layout.placement, Placement::BOTTOM);
            assert!(!layout.flipped, "neither side fits, keep the requested one");
        }

        let top = PopupConfig {
            placement: Placement::TOP,
            ..config
        };
        assert_eq!(compute_layout(&m, &top).placement, Placement::TOP);
    }

    #[test]
    fn flip_is_single_axis() {
        // Overflows on the right; left would fit, but a top/bottom request
        // never turns into left/right.
        let m = measure(
            Rect::from_origin_size((700.0, 100.0), (100.0, 40.0)),
            Size::new(300.0, 100.0),
        );
        let config = PopupConfig {
            placement: Placement::BOTTOM_START,
            flip: true,
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.placement, Placement::BOTTOM_START);
    }

    #[test]
    fn flip_respects_padding() {
        // Bottom fits exactly with no padding but not with 10px padding.
        let m = measure(
            Rect::from_origin_size((0.0, 500.0), (100.0, 100.0)),
            Size::new(100.0, 200.0),
        );
        let mut config = PopupConfig {
            flip: true,
            ..PopupConfig::new()
        };
        assert_eq!(compute_layout(&m, &config).placement, Placement::BOTTOM);
        config.flip_padding = 10.0;
        assert_eq!(compute_layout(&m, &config).placement, Placement::TOP);
    }

    #[test]
    fn shift_containment_across_placements() {
        let floating = Size::new(120.0, 80.0);
        let padding = 5.0;
        for vp_size in [300.0, 500.0, 1024.0] {
            let viewport = Rect::new(0.0, 0.0, vp_size, vp_size);
            for anchor_x in [-50.0, 0.0, 10.0, vp_size / 2.0, vp_size - 20.0, vp_size + 40.0] {
                for placement in Placement::ALL {
                    let anchor = Rect::from_origin_size((anchor_x, anchor_x), (60.0, 30.0));
                    let m = Measurements {
                        viewport,
                        ..measure(anchor, floating)
                    };
                    let config = PopupConfig {
                        placement,
                        shift: true,
                        shift_padding: padding,
                        ..PopupConfig::new()
                    };
                    let rect = compute_layout(&m, &config).floating_rect();
                    let (lo, hi) = match placement.side.main_axis() {
                        Axis::Y => (rect.x0, rect.x1),
                        Axis::X => (rect.y0, rect.y1),
                    };
                    assert!(
                        lo >= padding && hi <= vp_size - padding,
                        "{placement} at {anchor_x} escaped a {vp_size}px viewport: {lo}..{hi}"
                    );
                }
            }
        }
    }

    #[test]
    fn oversized_floating_pins_to_leading_edge() {
        let m = measure(
            Rect::from_origin_size((400.0, 100.0), (50.0, 20.0)),
            Size::new(900.0, 50.0),
        );
        let config = PopupConfig {
            shift: true,
            shift_padding: 8.0,
            ..PopupConfig::new()
        };
        assert_eq!(compute_layout(&m, &config).coords.x, 8.0);
    }

    #[test]
    fn match_width_uses_anchor_layout_width() {
        let anchor = Rect::from_origin_size((10.0, 10.0), (240.0, 32.0));
        let m = Measurements {
            anchor_size: Size::new(240.0, 32.0),
            ..measure(anchor, Size::new(90.0, 150.0))
        };
        let config = PopupConfig {
            match_size: Some(SizeAxis::Width),
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.floating, Size::new(240.0, 150.0));
        assert_eq!(layout.pinned_width, Some(240.0));
        assert_eq!(layout.pinned_height, None);
        // Centered under the anchor with the matched width.
        assert_eq!(layout.coords.x, 10.0);
    }

    #[test]
    fn flip_sees_matched_height() {
        // Natural height fits below; the matched height does not.
        let anchor = Rect::from_origin_size((0.0, 400.0), (100.0, 300.0));
        let m = measure(anchor, Size::new(100.0, 50.0));
        let config = PopupConfig {
            flip: true,
            match_size: Some(SizeAxis::Height),
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.placement, Placement::TOP);
        assert_eq!(layout.coords.y, 100.0);
    }

    #[test]
    fn offsets_move_along_both_axes() {
        let anchor = Rect::from_origin_size((100.0, 100.0), (100.0, 40.0));
        let m = measure(anchor, Size::new(100.0, 50.0));
        let config = PopupConfig {
            distance: 4.0,
            skidding: 10.0,
            ..PopupConfig::new()
        };
        assert_eq!(compute_layout(&m, &config).coords, Point::new(110.0, 144.0));
        let top = PopupConfig {
            placement: Placement::TOP,
            ..config
        };
        assert_eq!(compute_layout(&m, &top).coords, Point::new(110.0, 46.0));
    }

    #[test]
    fn auto_size_reports_space_on_committed_side() {
        let anchor = Rect::from_origin_size((100.0, 600.0), (100.0, 40.0));
        let m = measure(anchor, Size::new(100.0, 300.0));
        let config = PopupConfig {
            placement: Placement::BOTTOM_START,
            flip: true,
            auto_size: Some(SizeAxis::Both),
            auto_size_padding: 10.0,
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.placement, Placement::TOP_START);
        // Above the anchor: 600 - 10.
        assert_eq!(layout.available_height, Some(590.0));
        // From the leading edge to the right viewport edge: 800 - 10 - 100.
        assert_eq!(layout.available_width, Some(690.0));
    }

    #[test]
    fn auto_size_with_shift_uses_full_cross_extent() {
        let anchor = Rect::from_origin_size((100.0, 100.0), (100.0, 40.0));
        let m = measure(anchor, Size::new(100.0, 300.0));
        let config = PopupConfig {
            shift: true,
            auto_size: Some(SizeAxis::Width),
            auto_size_padding: 20.0,
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.available_width, Some(760.0));
        assert_eq!(layout.available_height, None);
    }

    #[test]
    fn auto_size_never_negative() {
        let anchor = Rect::from_origin_size((100.0, 100.0), (100.0, 40.0));
        let m = measure(anchor, Size::new(100.0, 300.0));
        let config = PopupConfig {
            auto_size: Some(SizeAxis::Both),
            auto_size_padding: 5_000.0,
            ..PopupConfig::new()
        };
        let layout = compute_layout(&m, &config);
        assert_eq!(layout.available_width, Some(0.0));
        assert_eq!(layout.available_height, Some(0.0));
    }

    #[test]
    fn pipeline_is_idempotent() {
        let anchor = Rect::from_origin_size((720.0, 760.0), (60.0, 30.0));
        let m = measure(anchor, Size::new(250.0, 180.0));
        let config = PopupConfig {
            auto_size: Some(SizeAxis::Both),
            ..PopupConfig::select()
        };
        let first = compute_layout(&m, &config);
        let second = compute_layout(&m, &config);
        assert_eq!(first, second);
        assert_eq!(first.coords.x.to_bits(), second.coords.x.to_bits());
        assert_eq!(first.coords.y.to_bits(), second.coords.y.to_bits());
    }
}

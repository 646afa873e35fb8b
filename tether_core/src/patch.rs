// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style patches.
//!
//! A [`StylePatch`] lists every style write one solve pass wants to make, so
//! the pipeline itself never touches the DOM. A
//! [`PositionApplier`](crate::backend::PositionApplier) writes the patch in
//! one go.
//!
//! [`AppliedStyle`] remembers which optional properties the previous patches
//! set, so a stage that has been switched off produces a [`Update::Clear`]
//! for exactly the properties it left behind and nothing else.

use kurbo::Point;

use crate::config::{PopupConfig, Strategy};
use crate::middleware::{Layout, Measurements};
use crate::placement::{Placement, SizeAxis};

/// Host custom property carrying the auto-size width.
pub const AVAILABLE_WIDTH_PROPERTY: &str = "--auto-size-available-width";

/// Host custom property carrying the auto-size height.
pub const AVAILABLE_HEIGHT_PROPERTY: &str = "--auto-size-available-height";

/// Floating element attribute reflecting the committed placement.
pub const PLACEMENT_ATTRIBUTE: &str = "data-current-placement";

/// A change to one optional pixel-valued property.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Update {
    /// Leave the property as it is.
    #[default]
    Unchanged,
    /// Set the property to the given number of pixels.
    Set(f64),
    /// Remove the property.
    Clear,
}

/// Position of the floating element within its containing block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// CSS positioning scheme.
    pub strategy: Strategy,
    /// `left` and `top` in pixels.
    pub offset: Point,
}

/// Every style write of one solve pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StylePatch {
    /// New position of the floating element, if it moves.
    pub position: Option<Position>,
    /// Inline width of the floating element.
    pub width: Update,
    /// Inline height of the floating element.
    pub height: Update,
    /// [`AVAILABLE_WIDTH_PROPERTY`] on the host.
    pub available_width: Update,
    /// [`AVAILABLE_HEIGHT_PROPERTY`] on the host.
    pub available_height: Update,
    /// Committed placement to reflect on the floating element.
    pub placement: Option<Placement>,
}

impl StylePatch {
    /// Returns `true` if applying this patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Which optional properties earlier patches left set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppliedStyle {
    /// Floating width was pinned.
    pub width: bool,
    /// Floating height was pinned.
    pub height: bool,
    /// Available width token is present on the host.
    pub available_width: bool,
    /// Available height token is present on the host.
    pub available_height: bool,
}

impl AppliedStyle {
    /// Builds the patch for a freshly computed layout and records what it
    /// sets.
    ///
    /// Auto-size tokens are only published for positive values; a zero or
    /// missing value clears a previously published token.
    pub fn patch_for(&mut self, layout: &Layout, m: &Measurements, config: &PopupConfig) -> StylePatch {
        let origin = m.origin.to_point();
        let offset = Point::new(layout.coords.x - origin.x, layout.coords.y - origin.y);
        StylePatch {
            position: Some(Position {
                strategy: config.strategy,
                offset,
            }),
            width: track(&mut self.width, layout.pinned_width),
            height: track(&mut self.height, layout.pinned_height),
            available_width: track(
                &mut self.available_width,
                layout.available_width.filter(|w| *w > 0.0),
            ),
            available_height: track(
                &mut self.available_height,
                layout.available_height.filter(|h| *h > 0.0),
            ),
            placement: Some(layout.placement),
        }
    }

    /// Builds the patch that drops pinned sizes `match_size` no longer
    /// covers.
    ///
    /// Applied before measuring, so the pass sees the natural size instead
    /// of a pin it is about to remove.
    pub fn release_pins(&mut self, match_size: Option<SizeAxis>) -> StylePatch {
        let keep_width = match_size.is_some_and(SizeAxis::has_width);
        let keep_height = match_size.is_some_and(SizeAxis::has_height);
        StylePatch {
            width: if keep_width {
                Update::Unchanged
            } else {
                track(&mut self.width, None)
            },
            height: if keep_height {
                Update::Unchanged
            } else {
                track(&mut self.height, None)
            },
            ..StylePatch::default()
        }
    }

    /// Builds the patch that removes everything earlier patches set,
    /// leaving the position alone.
    pub fn clear(&mut self) -> StylePatch {
        StylePatch {
            width: track(&mut self.width, None),
            height: track(&mut self.height, None),
            available_width: track(&mut self.available_width, None),
            available_height: track(&mut self.available_height, None),
            ..StylePatch::default()
        }
    }
}

fn track(applied: &mut bool, value: Option<f64>) -> Update {
    match value {
        Some(v) => {
            *applied = true;
            Update::Set(v)
        }
        None if *applied => {
            *applied = false;
            Update::Clear
        }
        None => Update::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size, Vec2};

    use super::*;
    use crate::middleware::compute_layout;
    use crate::placement::SizeAxis;

    fn measurements() -> Measurements {
        Measurements {
            anchor: Rect::from_origin_size((100.0, 100.0), (200.0, 40.0)),
            anchor_size: Size::new(200.0, 40.0),
            floating: Size::new(150.0, 300.0),
            viewport: Rect::new(0.0, 0.0, 800.0, 800.0),
            origin: Vec2::new(20.0, 30.0),
        }
    }

    #[test]
    fn position_is_relative_to_containing_block() {
        let m = measurements();
        let config = PopupConfig::new();
        let layout = compute_layout(&m, &config);
        let patch = AppliedStyle::default().patch_for(&layout, &m, &config);
        let position = patch.position.expect("solve always positions");
        assert_eq!(position.offset, Point::new(105.0, 110.0));
        assert_eq!(position.strategy, Strategy::Absolute);
        assert_eq!(patch.placement, Some(Placement::BOTTOM));
    }

    #[test]
    fn disabled_stage_reverts_only_its_own_effects() {
        let m = measurements();
        let mut applied = AppliedStyle::default();
        let mut config = PopupConfig {
            match_size: Some(SizeAxis::Width),
            auto_size: Some(SizeAxis::Height),
            ..PopupConfig::new()
        };
        let patch = applied.patch_for(&compute_layout(&m, &config), &m, &config);
        assert_eq!(patch.width, Update::Set(200.0));
        assert_eq!(patch.height, Update::Unchanged);
        assert_eq!(patch.available_height, Update::Set(660.0));
        assert_eq!(patch.available_width, Update::Unchanged);

        config.match_size = None;
        let patch = applied.patch_for(&compute_layout(&m, &config), &m, &config);
        assert_eq!(patch.width, Update::Clear);
        assert_eq!(patch.available_height, Update::Set(660.0));

        // A second pass has nothing left to clear.
        let patch = applied.patch_for(&compute_layout(&m, &config), &m, &config);
        assert_eq!(patch.width, Update::Unchanged);
    }

    #[test]
    fn zero_available_space_clears_token() {
        let m = measurements();
        let mut applied = AppliedStyle::default();
        let mut config = PopupConfig {
            auto_size: Some(SizeAxis::Height),
            ..PopupConfig::new()
        };
        applied.patch_for(&compute_layout(&m, &config), &m, &config);
        config.auto_size_padding = 10_000.0;
        let patch = applied.patch_for(&compute_layout(&m, &config), &m, &config);
        assert_eq!(patch.available_height, Update::Clear);
        assert!(!applied.available_height, "token should be forgotten");
    }

    #[test]
    fn release_pins_drops_only_uncovered_axes() {
        let m = measurements();
        let mut applied = AppliedStyle::default();
        let config = PopupConfig {
            match_size: Some(SizeAxis::Both),
            auto_size: Some(SizeAxis::Height),
            ..PopupConfig::new()
        };
        applied.patch_for(&compute_layout(&m, &config), &m, &config);

        assert!(
            applied.release_pins(Some(SizeAxis::Both)).is_empty(),
            "covered pins stay"
        );
        let patch = applied.release_pins(Some(SizeAxis::Height));
        assert_eq!(patch.width, Update::Clear);
        assert_eq!(patch.height, Update::Unchanged);
        assert_eq!(patch.available_height, Update::Unchanged, "tokens are not pins");
        assert_eq!(patch.position, None);

        let patch = applied.release_pins(None);
        assert_eq!(patch.width, Update::Unchanged, "width was already released");
        assert_eq!(patch.height, Update::Clear);
        assert!(applied.available_height, "auto-size token is untouched");
    }

    #[test]
    fn clear_removes_everything_once() {
        let m = measurements();
        let mut applied = AppliedStyle::default();
        let config = PopupConfig {
            match_size: Some(SizeAxis::Both),
            auto_size: Some(SizeAxis::Both),
            ..PopupConfig::new()
        };
        applied.patch_for(&compute_layout(&m, &config), &m, &config);
        let patch = applied.clear();
        assert_eq!(patch.width, Update::Clear);
        assert_eq!(patch.height, Update::Clear);
        assert_eq!(patch.available_width, Update::Clear);
        assert_eq!(patch.available_height, Update::Clear);
        assert_eq!(patch.position, None);
        assert!(applied.clear().is_empty(), "second clear should be a no-op");
    }
}

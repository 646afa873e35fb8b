// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup configuration.
//!
//! [`PopupConfig`] holds every input the positioning pipeline reads apart
//! from the anchor itself and the `active` flag. It is owned by the host and
//! only ever read by the middleware.

use core::fmt;
use core::str::FromStr;

use crate::placement::{Placement, SizeAxis};

/// CSS positioning scheme used for the floating element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `position: absolute`, relative to the containing block.
    #[default]
    Absolute,
    /// `position: fixed`, relative to the viewport.
    Fixed,
}

impl Strategy {
    /// Returns the CSS `position` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

/// Error returned when a string is not `absolute` or `fixed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseStrategyError;

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid strategy: expected absolute or fixed")
    }
}

impl core::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ParseStrategyError),
        }
    }
}

/// Positioning inputs for one popup.
///
/// Paddings and offsets are in CSS pixels. Negative paddings are treated as
/// zero by the middleware.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupConfig {
    /// Requested placement. Flip may commit the opposite side.
    pub placement: Placement,
    /// CSS positioning scheme.
    pub strategy: Strategy,
    /// Gap between anchor and floating element along the main axis.
    pub distance: f64,
    /// Offset along the cross axis.
    pub skidding: f64,
    /// Enables the flip stage.
    pub flip: bool,
    /// Viewport padding used by flip's overflow test.
    pub flip_padding: f64,
    /// Enables the shift stage.
    pub shift: bool,
    /// Viewport padding kept clear by shift.
    pub shift_padding: f64,
    /// Pins the floating element's size to the anchor's.
    pub match_size: Option<SizeAxis>,
    /// Publishes the available space on the committed side.
    pub auto_size: Option<SizeAxis>,
    /// Viewport padding subtracted from the available space.
    pub auto_size_padding: f64,
}

impl PopupConfig {
    /// Plain `bottom` placement with every middleware disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            placement: Placement::BOTTOM,
            strategy: Strategy::Absolute,
            distance: 0.0,
            skidding: 0.0,
            flip: false,
            flip_padding: 0.0,
            shift: false,
            shift_padding: 0.0,
            match_size: None,
            auto_size: None,
            auto_size_padding: 0.0,
        }
    }

    /// Dropdown menus: start-aligned below the anchor, flipping and
    /// shifting to stay on screen.
    #[must_use]
    pub const fn dropdown() -> Self {
        Self {
            placement: Placement::BOTTOM_START,
            flip: true,
            shift: true,
            shift_padding: 8.0,
            ..Self::new()
        }
    }

    /// Select listboxes: a dropdown as wide as its anchor whose height is
    /// bounded by the space left on screen.
    #[must_use]
    pub const fn select() -> Self {
        Self {
            match_size: Some(SizeAxis::Width),
            auto_size: Some(SizeAxis::Height),
            auto_size_padding: 8.0,
            ..Self::dropdown()
        }
    }

    /// Breadcrumb overflow menus: end-aligned below the anchor.
    #[must_use]
    pub const fn overflow_menu() -> Self {
        Self {
            placement: Placement::BOTTOM_END,
            flip: true,
            shift: true,
            shift_padding: 8.0,
            ..Self::new()
        }
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_build_on_each_other() {
        let select = PopupConfig::select();
        assert_eq!(select.placement, Placement::BOTTOM_START);
        assert!(select.flip && select.shift, "select should inherit dropdown flags");
        assert_eq!(select.match_size, Some(SizeAxis::Width));
        assert_eq!(PopupConfig::default(), PopupConfig::new());
    }

    #[test]
    fn strategy_parse() {
        assert_eq!("fixed".parse::<Strategy>(), Ok(Strategy::Fixed));
        assert_eq!("sticky".parse::<Strategy>(), Err(ParseStrategyError));
        assert_eq!(Strategy::default().as_str(), "absolute");
    }
}

// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbolic placement values.
//!
//! A [`Placement`] names the [`Side`] of the anchor the floating element is
//! attached to and its [`Alignment`] along the cross axis. The twelve valid
//! combinations have the string forms `"top"`, `"top-start"`, `"top-end"`,
//! and so on for `bottom`, `left` and `right`.

use core::fmt;
use core::str::FromStr;

/// A layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// The side of the anchor a floating element attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    Bottom,
    /// Left of the anchor.
    Left,
    /// Right of the anchor.
    Right,
}

impl Side {
    /// Returns the side across the anchor from this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the axis along which the floating element is pushed away from
    /// the anchor.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// Returns the lowercase name used in placement strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Cross-axis alignment of the floating element relative to the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Leading edges line up.
    Start,
    /// Midpoints line up.
    #[default]
    Center,
    /// Trailing edges line up.
    End,
}

/// Where a floating element attaches relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Side of the anchor.
    pub side: Side,
    /// Cross-axis alignment.
    pub alignment: Alignment,
}

impl Placement {
    /// `top`
    pub const TOP: Self = Self::new(Side::Top, Alignment::Center);
    /// `top-start`
    pub const TOP_START: Self = Self::new(Side::Top, Alignment::Start);
    /// `top-end`
    pub const TOP_END: Self = Self::new(Side::Top, Alignment::End);
    /// `bottom`
    pub const BOTTOM: Self = Self::new(Side::Bottom, Alignment::Center);
    /// `bottom-start`
    pub const BOTTOM_START: Self = Self::new(Side::Bottom, Alignment::Start);
    /// `bottom-end`
    pub const BOTTOM_END: Self = Self::new(Side::Bottom, Alignment::End);
    /// `left`
    pub const LEFT: Self = Self::new(Side::Left, Alignment::Center);
    /// `left-start`
    pub const LEFT_START: Self = Self::new(Side::Left, Alignment::Start);
    /// `left-end`
    pub const LEFT_END: Self = Self::new(Side::Left, Alignment::End);
    /// `right`
    pub const RIGHT: Self = Self::new(Side::Right, Alignment::Center);
    /// `right-start`
    pub const RIGHT_START: Self = Self::new(Side::Right, Alignment::Start);
    /// `right-end`
    pub const RIGHT_END: Self = Self::new(Side::Right, Alignment::End);

    /// All twelve placements, side-major.
    pub const ALL: [Self; 12] = [
        Self::TOP,
        Self::TOP_START,
        Self::TOP_END,
        Self::BOTTOM,
        Self::BOTTOM_START,
        Self::BOTTOM_END,
        Self::LEFT,
        Self::LEFT_START,
        Self::LEFT_END,
        Self::RIGHT,
        Self::RIGHT_START,
        Self::RIGHT_END,
    ];

    /// Creates a placement from its parts.
    #[must_use]
    pub const fn new(side: Side, alignment: Alignment) -> Self {
        Self { side, alignment }
    }

    /// Returns this placement attached to the opposite side, keeping the
    /// alignment.
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.side.opposite(), self.alignment)
    }

    /// Parses a placement string, falling back to the default on invalid
    /// input.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::BOTTOM
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.side.as_str())?;
        match self.alignment {
            Alignment::Start => f.write_str("-start"),
            Alignment::Center => Ok(()),
            Alignment::End => f.write_str("-end"),
        }
    }
}

/// Error returned when a string is not one of the twelve placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsePlacementError;

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid placement: expected a side (top, bottom, left, right) with an optional -start or -end suffix")
    }
}

impl core::error::Error for ParsePlacementError {}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, alignment) = match s.split_once('-') {
            Some((side, "start")) => (side, Alignment::Start),
            Some((side, "end")) => (side, Alignment::End),
            Some(_) => return Err(ParsePlacementError),
            None => (s, Alignment::Center),
        };
        let side = match side {
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return Err(ParsePlacementError),
        };
        Ok(Self::new(side, alignment))
    }
}

/// Which dimensions a size-related middleware acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeAxis {
    /// Width only.
    Width,
    /// Height only.
    Height,
    /// Width and height.
    Both,
}

impl SizeAxis {
    /// Returns `true` if the width is included.
    #[must_use]
    pub const fn has_width(self) -> bool {
        matches!(self, Self::Width | Self::Both)
    }

    /// Returns `true` if the height is included.
    #[must_use]
    pub const fn has_height(self) -> bool {
        matches!(self, Self::Height | Self::Both)
    }
}

/// Error returned when a string is not `width`, `height` or `both`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseSizeAxisError;

impl fmt::Display for ParseSizeAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid size axis: expected width, height or both")
    }
}

impl core::error::Error for ParseSizeAxisError {}

impl FromStr for SizeAxis {
    type Err = ParseSizeAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "both" => Ok(Self::Both),
            _ => Err(ParseSizeAxisError),
        }
    }
}

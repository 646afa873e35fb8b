// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM style application.
//!
//! Writes [`StylePatch`] values to the floating element and the host.

use alloc::format;
use alloc::string::{String, ToString as _};

use tether_core::backend::PositionApplier;
use tether_core::patch::{
    AVAILABLE_HEIGHT_PROPERTY, AVAILABLE_WIDTH_PROPERTY, PLACEMENT_ATTRIBUTE, StylePatch, Update,
};
use web_sys::{CssStyleDeclaration, HtmlElement};

/// Applies style patches to a floating element and its host.
///
/// Position, size and the placement attribute go on the floating element;
/// the auto-size custom properties go on the host so that descendants of the
/// host can consume them.
pub struct DomApplier {
    floating: HtmlElement,
    host: HtmlElement,
}

impl core::fmt::Debug for DomApplier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomApplier")
            .field("floating", &"HtmlElement")
            .field("host", &"HtmlElement")
            .finish()
    }
}

impl DomApplier {
    /// Creates an applier for `floating`, publishing tokens on `host`.
    #[must_use]
    pub fn new(floating: HtmlElement, host: HtmlElement) -> Self {
        Self { floating, host }
    }

    /// Returns the floating element.
    #[must_use]
    pub fn floating(&self) -> &HtmlElement {
        &self.floating
    }
}

impl PositionApplier for DomApplier {
    fn apply(&mut self, patch: &StylePatch) {
        let s = self.floating.style();
        if let Some(position) = patch.position {
            let _ = s.set_property("position", position.strategy.as_str());
            let _ = s.set_property("left", &px(position.offset.x));
            let _ = s.set_property("top", &px(position.offset.y));
        }
        write_update(&s, "width", patch.width);
        write_update(&s, "height", patch.height);

        let host = self.host.style();
        write_update(&host, AVAILABLE_WIDTH_PROPERTY, patch.available_width);
        write_update(&host, AVAILABLE_HEIGHT_PROPERTY, patch.available_height);

        if let Some(placement) = patch.placement {
            let _ = self
                .floating
                .set_attribute(PLACEMENT_ATTRIBUTE, &placement.to_string());
        }
    }
}

fn write_update(style: &CssStyleDeclaration, property: &str, update: Update) {
    match update {
        Update::Unchanged => {}
        Update::Set(value) => {
            let _ = style.set_property(property, &px(value));
        }
        Update::Clear => {
            let _ = style.remove_property(property);
        }
    }
}

/// Formats a CSS pixel length.
fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formats_whole_and_fractional_lengths() {
        assert_eq!(px(580.0), "580px");
        assert_eq!(px(-50.0), "-50px");
        assert_eq!(px(12.5), "12.5px");
    }
}

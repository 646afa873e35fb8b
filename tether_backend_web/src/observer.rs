// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The auto-update observer set.
//!
//! [`AutoUpdate`] registers one callback everywhere a change could move the
//! anchor relative to the floating element:
//!
//! - a `ResizeObserver` on the anchor element and the floating element,
//! - a capture-phase, passive `scroll` listener on `window`, plus one on
//!   every scroll container above either of them that lives in a shadow
//!   tree,
//! - a `resize` listener on `window`.
//!
//! `scroll` is not composed, so the `window` listener sees every scroll in
//! the document tree but none inside shadow trees. Scroll containers in the
//! document tree get no listener of their own; a scroll there would
//! otherwise solve twice. Scrolling an unrelated pane still triggers a solve,
//! which is harmless since a pass over unchanged geometry writes the same
//! styles.
//!
//! Dropping the `AutoUpdate` removes every listener and disconnects the
//! observer.

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::Function;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, EventTarget, ResizeObserver, ShadowRoot, Window};

/// Overflow values that make an element a scroll container, or clip it.
const OVERFLOW_VALUES: [&str; 5] = ["auto", "scroll", "overlay", "hidden", "clip"];

/// A live set of listeners that calls back on every possible anchor move.
pub struct AutoUpdate {
    callback: Closure<dyn FnMut()>,
    resize_observer: Option<ResizeObserver>,
    scroll_targets: Vec<EventTarget>,
    window: Option<Window>,
}

impl AutoUpdate {
    /// Starts observing `anchor` (if it is an element) and `floating`.
    ///
    /// Registration failures are ignored individually; the remaining
    /// listeners still work.
    pub fn start(
        anchor: Option<&Element>,
        floating: &Element,
        on_change: impl FnMut() + 'static,
    ) -> Self {
        let callback = Closure::wrap(Box::new(on_change) as Box<dyn FnMut()>);
        let window = web_sys::window();

        let resize_observer = ResizeObserver::new(callback.as_ref().unchecked_ref()).ok();
        if let Some(observer) = &resize_observer {
            if let Some(anchor) = anchor {
                observer.observe(anchor);
            }
            observer.observe(floating);
        }

        let mut scroll_targets = Vec::new();
        if let Some(window) = &window {
            if let Some(anchor) = anchor {
                collect_overflow_ancestors(anchor, window, &mut scroll_targets);
            }
            collect_overflow_ancestors(floating, window, &mut scroll_targets);
            push_unique(&mut scroll_targets, window.clone().into());
        }

        let function: &Function = callback.as_ref().unchecked_ref();
        let options = AddEventListenerOptions::new();
        options.set_capture(true);
        options.set_passive(true);
        for target in &scroll_targets {
            let _ = target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    "scroll", function, &options,
                );
        }
        if let Some(window) = &window {
            let _ = window.add_event_listener_with_callback("resize", function);
        }

        Self {
            callback,
            resize_observer,
            scroll_targets,
            window,
        }
    }

    /// Returns the number of `scroll` listeners, `window` included.
    #[must_use]
    pub fn scroll_target_count(&self) -> usize {
        self.scroll_targets.len()
    }
}

impl Drop for AutoUpdate {
    fn drop(&mut self) {
        let function: &Function = self.callback.as_ref().unchecked_ref();
        if let Some(observer) = &self.resize_observer {
            observer.disconnect();
        }
        for target in &self.scroll_targets {
            let _ = target.remove_event_listener_with_callback_and_bool("scroll", function, true);
        }
        if let Some(window) = &self.window {
            let _ = window.remove_event_listener_with_callback("resize", function);
        }
    }
}

impl core::fmt::Debug for AutoUpdate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AutoUpdate")
            .field("resize_observer", &self.resize_observer.is_some())
            .field("scroll_targets", &self.scroll_targets.len())
            .finish_non_exhaustive()
    }
}

/// Appends every scroll container between `element` and the document root
/// that the `window` capture listener cannot see.
fn collect_overflow_ancestors(element: &Element, window: &Window, out: &mut Vec<EventTarget>) {
    let mut current = composed_parent(element);
    while let Some(node) = current {
        if matches!(node.local_name().as_str(), "html" | "body") {
            break;
        }
        if is_in_shadow_tree(&node) && is_scroll_container(window, &node) {
            push_unique(out, node.clone().into());
        }
        current = composed_parent(&node);
    }
}

/// The parent element, stepping from a shadow root to its host.
fn composed_parent(element: &Element) -> Option<Element> {
    let parent = element.parent_node()?;
    if let Some(shadow) = parent.dyn_ref::<ShadowRoot>() {
        return Some(shadow.host());
    }
    parent.dyn_into::<Element>().ok()
}

fn is_in_shadow_tree(element: &Element) -> bool {
    element.get_root_node().dyn_ref::<ShadowRoot>().is_some()
}

fn is_scroll_container(window: &Window, element: &Element) -> bool {
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return false;
    };
    ["overflow", "overflow-x", "overflow-y"].iter().any(|property| {
        style
            .get_property_value(property)
            .is_ok_and(|value| is_overflow_value(&value))
    })
}

/// Returns `true` if a computed `overflow` value can scroll or clip.
pub(crate) fn is_overflow_value(value: &str) -> bool {
    value
        .split_whitespace()
        .any(|token| OVERFLOW_VALUES.contains(&token))
}

fn push_unique(targets: &mut Vec<EventTarget>, target: EventTarget) {
    if !targets.contains(&target) {
        targets.push(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_and_clipping_values_are_recognized() {
        for value in ["auto", "scroll", "hidden", "clip", "overlay", "visible auto"] {
            assert!(is_overflow_value(value), "{value} should count");
        }
    }

    #[test]
    fn visible_is_not_a_scroll_container() {
        assert!(!is_overflow_value("visible"));
        assert!(!is_overflow_value("visible visible"));
        assert!(!is_overflow_value(""));
    }
}

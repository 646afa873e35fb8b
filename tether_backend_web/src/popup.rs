// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing popup handle.
//!
//! [`DomPopup`] owns a [`Popup`] controller behind `Rc<RefCell<..>>`. Every
//! listener closure holds a `Weak` back-reference; a trigger that finds the
//! controller dropped or already borrowed is skipped.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use tether_core::anchor::{AnchorScope, ResolvedAnchor, SlotContent};
use tether_core::backend::{Anchor, Environment, PositionApplier};
use tether_core::config::{PopupConfig, Strategy};
use tether_core::middleware::{Layout, Measurements};
use tether_core::patch::StylePatch;
use tether_core::placement::{Placement, SizeAxis};
use tether_core::popup::Popup;
use tether_core::scheduler::{Epoch, SchedulerState};
use tether_core::trace::{PopupId, TraceSink};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, HtmlSlotElement};

use crate::anchor::{DomScope, VirtualElement, classify_anchor};
use crate::measure;
use crate::observer::AutoUpdate;
use crate::presenter::DomApplier;

type Handle = Weak<RefCell<Popup<DomEnvironment>>>;

/// The DOM [`Environment`] of one popup.
pub struct DomEnvironment {
    scope: DomScope,
    applier: DomApplier,
    floating: HtmlElement,
    handle: Handle,
}

impl core::fmt::Debug for DomEnvironment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomEnvironment")
            .field("scope", &self.scope)
            .field("applier", &self.applier)
            .finish_non_exhaustive()
    }
}

impl AnchorScope for DomEnvironment {
    type Element = Element;
    type Virtual = VirtualElement;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.scope.element_by_id(id)
    }

    fn slotted_anchor(&self) -> Option<SlotContent<Element>> {
        self.scope.slotted_anchor()
    }
}

impl Environment for DomEnvironment {
    type Subscription = AutoUpdate;

    fn measure(&self, anchor: &Anchor<Self>, strategy: Strategy) -> Option<Measurements> {
        measure::measure(&self.floating, anchor, strategy)
    }

    fn watch(&mut self, anchor: &Anchor<Self>, epoch: Epoch) -> AutoUpdate {
        let element = match anchor {
            ResolvedAnchor::Element(element) => Some(element.clone()),
            ResolvedAnchor::Virtual(virtual_element) => virtual_element.context_element(),
        };
        let handle = self.handle.clone();
        AutoUpdate::start(element.as_ref(), &self.floating, move || {
            if let Some(popup) = handle.upgrade()
                && let Ok(mut popup) = popup.try_borrow_mut()
            {
                popup.handle_trigger(epoch);
            }
        })
    }
}

impl PositionApplier for DomEnvironment {
    fn apply(&mut self, patch: &StylePatch) {
        self.applier.apply(patch);
    }
}

/// Listens for `slotchange` on the anchor slot.
struct SlotListener {
    slot: HtmlSlotElement,
    callback: Closure<dyn FnMut()>,
}

impl SlotListener {
    fn attach(slot: HtmlSlotElement, handle: Handle) -> Self {
        let callback = Closure::wrap(Box::new(move || {
            if let Some(popup) = handle.upgrade()
                && let Ok(mut popup) = popup.try_borrow_mut()
            {
                popup.slot_changed();
            }
        }) as Box<dyn FnMut()>);
        let _ = slot.add_event_listener_with_callback("slotchange", callback.as_ref().unchecked_ref());
        Self { slot, callback }
    }
}

impl Drop for SlotListener {
    fn drop(&mut self) {
        let _ = self
            .slot
            .remove_event_listener_with_callback("slotchange", self.callback.as_ref().unchecked_ref());
    }
}

/// A popup bound to a host element, a floating element and an optional
/// anchor slot.
///
/// The host calls [`connected`](Self::connected) and
/// [`disconnected`](Self::disconnected) from its lifecycle callbacks and
/// forwards property changes to the setters. Invalid values never surface
/// as errors: an unknown placement falls back to the default, and an
/// unusable anchor value leaves the popup without an anchor.
///
/// Setters called while the controller is busy (from inside a trace sink,
/// for instance) are ignored.
pub struct DomPopup {
    popup: Rc<RefCell<Popup<DomEnvironment>>>,
    slot_listener: Option<SlotListener>,
}

impl core::fmt::Debug for DomPopup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPopup")
            .field("popup", &self.popup)
            .field("slot_listener", &self.slot_listener.is_some())
            .finish()
    }
}

impl DomPopup {
    /// Creates an inactive popup. Nothing is read or written until the host
    /// is connected and the popup is activated.
    #[must_use]
    pub fn new(
        host: HtmlElement,
        floating: HtmlElement,
        anchor_slot: Option<HtmlSlotElement>,
        id: PopupId,
        config: PopupConfig,
    ) -> Self {
        let scope = DomScope::new(host.clone(), anchor_slot.clone());
        let applier = DomApplier::new(floating.clone(), host);
        let popup = Rc::new_cyclic(|handle: &Handle| {
            let env = DomEnvironment {
                scope,
                applier,
                floating,
                handle: handle.clone(),
            };
            RefCell::new(Popup::new(env, id, config))
        });
        let slot_listener = anchor_slot.map(|slot| SlotListener::attach(slot, Rc::downgrade(&popup)));
        Self {
            popup,
            slot_listener,
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Popup<DomEnvironment>) -> R) -> Option<R> {
        let mut popup = self.popup.try_borrow_mut().ok()?;
        Some(f(&mut popup))
    }

    fn update(&self, f: impl FnOnce(&mut PopupConfig)) {
        self.with(|popup| popup.update_config(f));
    }

    // -- Lifecycle --

    /// The host was inserted into the document.
    pub fn connected(&self) {
        self.with(Popup::connect);
    }

    /// The host was removed from the document.
    pub fn disconnected(&self) {
        self.with(Popup::disconnect);
    }

    // -- Properties --

    /// Sets the anchor from a JavaScript value: `undefined`/`null` for the
    /// slotted anchor, an id string, an element, or a virtual element.
    pub fn set_anchor(&self, value: &JsValue) {
        let anchor = classify_anchor(value);
        self.with(|popup| match anchor {
            Ok(anchor) => popup.set_anchor(anchor),
            Err(_) => popup.clear_anchor(),
        });
    }

    /// Activates or deactivates positioning.
    pub fn set_active(&self, active: bool) {
        self.with(|popup| popup.set_active(active));
    }

    /// Sets the placement; unknown values select the default.
    pub fn set_placement(&self, value: &str) {
        let placement = Placement::parse_or_default(value);
        self.update(|c| c.placement = placement);
    }

    /// Sets the positioning strategy, `absolute` or `fixed`; unknown values
    /// select `absolute`.
    pub fn set_strategy(&self, value: &str) {
        let strategy: Strategy = value.parse().unwrap_or_default();
        self.update(|c| c.strategy = strategy);
    }

    /// Sets the main-axis gap between anchor and floating element.
    pub fn set_distance(&self, distance: f64) {
        self.update(|c| c.distance = distance);
    }

    /// Sets the cross-axis offset of the floating element.
    pub fn set_skidding(&self, skidding: f64) {
        self.update(|c| c.skidding = skidding);
    }

    /// Enables or disables flipping.
    pub fn set_flip(&self, flip: bool) {
        self.update(|c| c.flip = flip);
    }

    /// Sets the viewport padding used by flip.
    pub fn set_flip_padding(&self, padding: f64) {
        self.update(|c| c.flip_padding = padding);
    }

    /// Enables or disables shifting.
    pub fn set_shift(&self, shift: bool) {
        self.update(|c| c.shift = shift);
    }

    /// Sets the viewport padding used by shift.
    pub fn set_shift_padding(&self, padding: f64) {
        self.update(|c| c.shift_padding = padding);
    }

    /// Sets the matched axis, `width`, `height` or `both`. `None` or an
    /// unknown value disables size matching.
    pub fn set_match_size(&self, value: Option<&str>) {
        let axis: Option<SizeAxis> = value.and_then(|v| v.parse().ok());
        self.update(|c| c.match_size = axis);
    }

    /// Sets the auto-size axis, `width`, `height` or `both`. `None` or an
    /// unknown value disables auto-size.
    pub fn set_auto_size(&self, value: Option<&str>) {
        let axis: Option<SizeAxis> = value.and_then(|v| v.parse().ok());
        self.update(|c| c.auto_size = axis);
    }

    /// Sets the viewport padding used by auto-size.
    pub fn set_auto_size_padding(&self, padding: f64) {
        self.update(|c| c.auto_size_padding = padding);
    }

    /// Replaces the whole configuration.
    pub fn set_config(&self, config: PopupConfig) {
        self.with(|popup| popup.set_config(config));
    }

    /// Routes trace events of this popup to `sink`.
    pub fn set_trace_sink(&self, sink: Option<Box<dyn TraceSink>>) {
        self.with(|popup| popup.set_trace_sink(sink));
    }

    // -- Queries --

    /// Runs one solve pass now. Does nothing unless watching.
    pub fn reposition(&self) {
        self.with(Popup::reposition);
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> Option<PopupConfig> {
        self.with(|popup| *popup.config())
    }

    /// Returns the scheduler state.
    #[must_use]
    pub fn scheduler_state(&self) -> Option<SchedulerState> {
        self.with(|popup| popup.scheduler_state())
    }

    /// Returns the layout of the last solve pass while watching.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.with(|popup| popup.layout().copied()).flatten()
    }
}

impl Drop for DomPopup {
    fn drop(&mut self) {
        self.slot_listener = None;
        self.with(Popup::disconnect);
    }
}

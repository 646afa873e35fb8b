// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM anchor scope and virtual elements.
//!
//! [`DomScope`] looks up anchors relative to the host: ids in the host's root
//! node (a `Document` or a `ShadowRoot`), and slotted anchors through the
//! host's `anchor` slot. [`classify_anchor`] decides once how a JavaScript
//! value refers to an anchor.

use core::fmt;

use js_sys::{Function, Reflect};
use kurbo::Rect;
use tether_core::anchor::{AnchorRef, AnchorScope, SlotContent};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlSlotElement, ShadowRoot};

/// An anchor reference in DOM terms.
pub type DomAnchorRef = AnchorRef<Element, VirtualElement>;

/// Why a JavaScript value cannot be used as an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidAnchor {
    /// Not a string, element, or object.
    NotAnObject,
    /// An object without a callable `getBoundingClientRect`.
    MissingBoundingClientRect,
    /// A `contextElement` that is not an `Element`.
    BadContextElement,
}

impl fmt::Display for InvalidAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("anchor must be an id, an element, or a virtual element"),
            Self::MissingBoundingClientRect => {
                f.write_str("virtual element has no callable getBoundingClientRect")
            }
            Self::BadContextElement => f.write_str("virtual element contextElement is not an Element"),
        }
    }
}

impl core::error::Error for InvalidAnchor {}

/// Classifies a JavaScript anchor value.
///
/// `undefined` and `null` select the slotted anchor, a string is an element
/// id, an `Element` is used as is, and any other object must look like a
/// virtual element.
pub fn classify_anchor(value: &JsValue) -> Result<DomAnchorRef, InvalidAnchor> {
    if value.is_undefined() || value.is_null() {
        return Ok(AnchorRef::Slotted);
    }
    if let Some(id) = value.as_string() {
        return Ok(AnchorRef::Id(id));
    }
    if let Some(element) = value.dyn_ref::<Element>() {
        return Ok(AnchorRef::Element(element.clone()));
    }
    VirtualElement::from_js(value).map(AnchorRef::Virtual)
}

/// A user-supplied object with a `getBoundingClientRect()` method, such as a
/// cursor position.
#[derive(Clone, Debug)]
pub struct VirtualElement {
    object: JsValue,
}

impl VirtualElement {
    /// Wraps `value` if it has a callable `getBoundingClientRect` and its
    /// optional `contextElement` is an `Element`.
    pub fn from_js(value: &JsValue) -> Result<Self, InvalidAnchor> {
        if !value.is_object() {
            return Err(InvalidAnchor::NotAnObject);
        }
        let method = Reflect::get(value, &JsValue::from_str("getBoundingClientRect"))
            .map_err(|_| InvalidAnchor::MissingBoundingClientRect)?;
        if !method.is_function() {
            return Err(InvalidAnchor::MissingBoundingClientRect);
        }
        let context = Reflect::get(value, &JsValue::from_str("contextElement"))
            .map_err(|_| InvalidAnchor::BadContextElement)?;
        if !context.is_undefined() && !context.is_null() && !context.is_instance_of::<Element>() {
            return Err(InvalidAnchor::BadContextElement);
        }
        Ok(Self {
            object: value.clone(),
        })
    }

    /// Calls `getBoundingClientRect()` and reads the result.
    ///
    /// Accepts `DOMRect`s and plain objects with either `x`/`y` or
    /// `left`/`top`. Returns `None` if the call throws or a field is not a
    /// number.
    #[must_use]
    pub fn bounding_client_rect(&self) -> Option<Rect> {
        let method = Reflect::get(&self.object, &JsValue::from_str("getBoundingClientRect")).ok()?;
        let method = method.dyn_ref::<Function>()?;
        let rect = method.call0(&self.object).ok()?;
        let x = number(&rect, "x").or_else(|| number(&rect, "left"))?;
        let y = number(&rect, "y").or_else(|| number(&rect, "top"))?;
        let width = number(&rect, "width")?;
        let height = number(&rect, "height")?;
        Some(Rect::from_origin_size((x, y), (width, height)))
    }

    /// Returns the element whose scroll ancestors move this virtual element.
    #[must_use]
    pub fn context_element(&self) -> Option<Element> {
        Reflect::get(&self.object, &JsValue::from_str("contextElement"))
            .ok()?
            .dyn_into::<Element>()
            .ok()
    }
}

fn number(object: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(object, &JsValue::from_str(key)).ok()?.as_f64()
}

/// Anchor lookups relative to one host element.
#[derive(Clone, Debug)]
pub struct DomScope {
    host: HtmlElement,
    slot: Option<HtmlSlotElement>,
}

impl DomScope {
    /// Creates a scope for `host`, whose anchor slot is `slot`.
    #[must_use]
    pub fn new(host: HtmlElement, slot: Option<HtmlSlotElement>) -> Self {
        Self { host, slot }
    }

    /// Returns the host element.
    #[must_use]
    pub fn host(&self) -> &HtmlElement {
        &self.host
    }
}

impl AnchorScope for DomScope {
    type Element = Element;
    type Virtual = VirtualElement;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        let root = self.host.get_root_node();
        if let Some(shadow) = root.dyn_ref::<ShadowRoot>() {
            return shadow.get_element_by_id(id);
        }
        // A detached host has itself as the root; nothing to find there.
        root.dyn_ref::<Document>()?.get_element_by_id(id)
    }

    fn slotted_anchor(&self) -> Option<SlotContent<Element>> {
        let first = first_assigned(self.slot.as_ref()?)?;
        match first.dyn_into::<HtmlSlotElement>() {
            Ok(inner) => Some(SlotContent::Slot(first_assigned(&inner))),
            Err(element) => Some(SlotContent::Element(element)),
        }
    }
}

fn first_assigned(slot: &HtmlSlotElement) -> Option<Element> {
    slot.assigned_elements().get(0).dyn_into::<Element>().ok()
}

// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout reads.
//!
//! Everything one solve pass reads from the DOM is read here, in one batch,
//! before the applier writes anything.

use kurbo::{Point, Rect, Size, Vec2};
use tether_core::anchor::ResolvedAnchor;
use tether_core::config::Strategy;
use tether_core::middleware::Measurements;
use wasm_bindgen::JsCast as _;
use web_sys::{Element, HtmlElement, Window};

use crate::anchor::VirtualElement;

/// Measures `anchor` and `floating` for one solve pass.
///
/// Returns `None` if the floating element, an element anchor, or a virtual
/// anchor's context element is not in the document.
pub(crate) fn measure(
    floating: &HtmlElement,
    anchor: &ResolvedAnchor<Element, VirtualElement>,
    strategy: Strategy,
) -> Option<Measurements> {
    if !floating.is_connected() {
        return None;
    }
    let window = web_sys::window()?;
    let (anchor_rect, anchor_size) = match anchor {
        ResolvedAnchor::Element(element) => {
            if !element.is_connected() {
                return None;
            }
            (client_rect(element), layout_size(element))
        }
        ResolvedAnchor::Virtual(virtual_element) => {
            if virtual_element
                .context_element()
                .is_some_and(|context| !context.is_connected())
            {
                return None;
            }
            let rect = virtual_element.bounding_client_rect()?;
            (rect, rect.size())
        }
    };
    Some(Measurements {
        anchor: anchor_rect,
        anchor_size,
        floating: client_rect(floating).size(),
        viewport: viewport(&window),
        origin: containing_block_origin(floating, &window, strategy),
    })
}

/// Bounding client rect in viewport coordinates.
pub(crate) fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::from_origin_size((r.x(), r.y()), (r.width(), r.height()))
}

/// `offsetWidth`/`offsetHeight`, ignoring transforms. Non-HTML elements fall
/// back to their bounding box.
fn layout_size(element: &Element) -> Size {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => Size::new(f64::from(html.offset_width()), f64::from(html.offset_height())),
        None => client_rect(element).size(),
    }
}

/// The layout viewport without scrollbars.
fn viewport(window: &Window) -> Rect {
    let root = window
        .document()
        .and_then(|document| document.document_element())
        .map(|root| Size::new(f64::from(root.client_width()), f64::from(root.client_height())))
        .filter(|size| size.width > 0.0 && size.height > 0.0);
    let size = root
        .or_else(|| {
            let width = window.inner_width().ok()?.as_f64()?;
            let height = window.inner_height().ok()?.as_f64()?;
            Some(Size::new(width, height))
        })
        .unwrap_or(Size::ZERO);
    Rect::from_origin_size(Point::ORIGIN, size)
}

/// Origin of the box `left`/`top` are relative to, in viewport coordinates.
fn containing_block_origin(floating: &HtmlElement, window: &Window, strategy: Strategy) -> Vec2 {
    match strategy {
        Strategy::Fixed => Vec2::ZERO,
        Strategy::Absolute => match floating.offset_parent() {
            Some(parent) if !is_document_root(&parent) => {
                let rect = client_rect(&parent);
                Vec2::new(
                    rect.x0 + f64::from(parent.client_left()) - f64::from(parent.scroll_left()),
                    rect.y0 + f64::from(parent.client_top()) - f64::from(parent.scroll_top()),
                )
            }
            // The initial containing block scrolls with the document.
            _ => Vec2::new(
                -window.scroll_x().unwrap_or(0.0),
                -window.scroll_y().unwrap_or(0.0),
            ),
        },
    }
}

fn is_document_root(element: &Element) -> bool {
    matches!(element.local_name().as_str(), "html" | "body")
}

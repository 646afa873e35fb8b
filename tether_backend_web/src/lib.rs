// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for tether.
//!
//! This crate connects [`tether_core`] to the browser:
//!
//! - [`DomPopup`]: the handle a custom element host drives from its
//!   lifecycle callbacks and property setters
//! - [`DomScope`]: anchor lookup by id and through the `anchor` slot
//! - [`classify_anchor`]: turns a JavaScript anchor value into an
//!   [`AnchorRef`](tether_core::anchor::AnchorRef)
//! - [`AutoUpdate`]: the `ResizeObserver`, `scroll` and `resize` listeners of
//!   one active popup
//! - [`DomApplier`]: style application
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables trace events in `tether_core`.

#![no_std]

extern crate alloc;

mod anchor;
mod measure;
mod observer;
mod popup;
mod presenter;

pub use anchor::{DomAnchorRef, DomScope, InvalidAnchor, VirtualElement, classify_anchor};
pub use observer::AutoUpdate;
pub use popup::{DomEnvironment, DomPopup};
pub use presenter::DomApplier;
pub use tether_core::backend::PositionApplier;

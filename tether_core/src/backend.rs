// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Tether splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Anchor scope**: implements [`AnchorScope`] so references by id and
//!   slotted anchors can be found in the host's tree.
//!
//! - **Measurement**: [`Environment::measure`] takes every layout read of a
//!   solve pass in one batch and reports a detached anchor or floating
//!   element as `None`.
//!
//! - **Observation**: [`Environment::watch`] creates the subscription that
//!   calls back into [`Popup::handle_trigger`] whenever the anchor could have
//!   moved. Dropping the subscription removes every listener it registered.
//!
//! - **Application**: implements [`PositionApplier`] to write a
//!   [`StylePatch`] to the floating element and its host.
//!
//! # Crate boundaries
//!
//! `tether_core` owns the data model, geometry, middleware, scheduling, and
//! this contract module. Backend crates depend on `tether_core` and provide
//! platform glue.
//!
//! [`Popup::handle_trigger`]: crate::popup::Popup::handle_trigger

use crate::anchor::{AnchorScope, ResolvedAnchor};
use crate::config::Strategy;
use crate::middleware::Measurements;
use crate::patch::StylePatch;
use crate::scheduler::Epoch;

/// A resolved anchor in the terms of an [`AnchorScope`].
pub type Anchor<S> = ResolvedAnchor<<S as AnchorScope>::Element, <S as AnchorScope>::Virtual>;

/// Everything a [`Popup`](crate::popup::Popup) needs from its surroundings
/// besides writing styles.
pub trait Environment: AnchorScope {
    /// A live set of listeners. Dropping it tears all of them down.
    type Subscription;

    /// Reads the anchor rect, the floating element's size, the viewport and
    /// the containing block origin for `strategy`.
    ///
    /// Returns `None` if the anchor or the floating element is not attached
    /// to the document; the pass is skipped and retried on the next trigger.
    fn measure(&self, anchor: &Anchor<Self>, strategy: Strategy) -> Option<Measurements>;

    /// Starts observing everything that could move `anchor` or the floating
    /// element. Triggers must be reported with `epoch`.
    fn watch(&mut self, anchor: &Anchor<Self>, epoch: Epoch) -> Self::Subscription;
}

/// Writes a [`StylePatch`] to a platform-native presentation tree.
///
/// The DOM applier and test doubles implement this trait.
pub trait PositionApplier {
    /// Applies every update in `patch`.
    fn apply(&mut self, patch: &StylePatch);
}

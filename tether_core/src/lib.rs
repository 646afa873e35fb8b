// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for anchored overlay positioning.
//!
//! `tether_core` computes where a floating element (a dropdown menu, a select
//! listbox, an overflow menu) goes relative to its anchor and keeps that
//! position current while the page scrolls, resizes or mutates. It is
//! `no_std` compatible (with `alloc`) and never touches a DOM itself: reads
//! and writes go through the [`backend`] traits.
//!
//! # Architecture
//!
//! ```text
//!   AnchorRef ──► anchor::resolve() ──► ResolvedAnchor
//!                                            │
//!   set_active(true) ──► UpdateScheduler ──► Environment::watch()
//!                                            │ (trigger, epoch)
//!                 ┌──────────────────────────┘
//!                 ▼
//!   Environment::measure() ──► compute_layout() ──► StylePatch
//!                                                      │
//!                 ┌────────────────────────────────────┘
//!                 ▼
//!   PositionApplier::apply()
//! ```
//!
//! **[`placement`]**: the twelve [`Placement`](placement::Placement) values
//! and size axes.
//!
//! **[`solve`]**: pure placement geometry with no viewport knowledge.
//!
//! **[`middleware`]**: the fixed match-size → place → flip → shift →
//! auto-size pipeline.
//!
//! **[`patch`]**: [`StylePatch`](patch::StylePatch) values and the
//! bookkeeping that reverts switched-off stages.
//!
//! **[`anchor`]**: anchor references and their resolution.
//!
//! **[`scheduler`]**: the `Idle`/`Watching` state machine with epochs.
//!
//! **[`popup`]**: the [`Popup`](popup::Popup) controller that ties it all
//! together.
//!
//! **[`config`]**: [`PopupConfig`](config::PopupConfig) and its presets.
//!
//! **[`backend`]**: the traits platform backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod anchor;
pub mod backend;
pub mod config;
pub mod middleware;
pub mod patch;
pub mod placement;
pub mod popup;
pub mod scheduler;
pub mod solve;
pub mod trace;

pub use kurbo;

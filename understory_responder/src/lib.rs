// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_responder --heading-base-level=0

//! Understory Responder: a deterministic, headless DOM-style event host.
//!
//! ## Overview
//!
//! This crate routes UI events over an [`understory_dom::Document`] the way a browser does:
//! capture → target → bubble, with listeners registered per node and event kind.
//! It does not hit test; the embedding application reports which node is under the pointer
//! and which keys are pressed, and the host turns that into events.
//!
//! ## Layers
//!
//! - [`router`] computes the propagation sequence for a target from its root → target path.
//!   Non-bubbling kinds (`focus`, `blur`, `mouseenter`, `mouseleave`) get no bubble steps.
//! - [`dispatcher`] walks a sequence and honors [`Outcome::Stop`](types::Outcome::Stop).
//! - [`host::Dom`] owns the document and listeners and runs handlers with `&mut Dom`, so
//!   handlers can mutate attributes, move focus, or dispatch further events.
//! - [`hover::HoverState`] derives `mouseenter`/`mouseleave` from successive pointer paths.
//! - [`click::ClickTracker`] recognizes clicks from press/release pairs.
//!
//! ## Focus
//!
//! [`Dom::focus`](host::Dom::focus) dispatches `blur` and `focusout` at the node losing focus
//! and `focus` and `focusin` at the node gaining it. Each carries the other node as
//! `related_target`, which is what "close when focus leaves" behaviors inspect.
//! Keyboard events route to the focused node.
//!
//! ## Listener order
//!
//! At each step, listeners run in registration order. At the target, capturing listeners run
//! before non-capturing ones. Stopping propagation lets the remaining listeners of the current
//! node finish and then skips later steps.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` floating-point support for `kurbo` via `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod click;
pub mod dispatcher;
pub mod host;
pub mod hover;
pub mod listeners;
pub mod router;
pub mod types;

pub use host::Dom;

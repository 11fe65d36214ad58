// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dom --heading-base-level=0

//! Understory DOM: a headless element tree.
//!
//! Understory DOM is the structural half of a headless UI host: it stores elements with a tag,
//! a class list, string attributes, and focus flags, and answers the tree queries that
//! behaviors attached to markup need (first descendant with a class, descendant checks,
//! document-order traversal).
//!
//! It does not route events, track focus, lay out, or render.
//! Event routing and focus live in `understory_responder`, which owns a [`Document`].
//!
//! ## API overview
//!
//! - [`Document`]: container managing elements and their parent/child links.
//! - [`Element`]: per-element data (tag, classes, attributes, flags).
//! - [`ElementFlags`]: focusable/disabled controls.
//! - [`NodeId`]: generational handle of an element.
//!
//! Key operations:
//! - [`Document::insert`] → [`NodeId`], [`Document::remove`] (whole subtree).
//! - [`Document::descendants`] and [`Document::next_depth_first`] for document-order traversal.
//! - [`Document::first_by_class`] and [`Document::is_descendant`] for behavior wiring.
//! - [`Document::set_attribute`] / [`Document::attribute`] for ARIA state.
//!
//! ```rust
//! use understory_dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let wrapper = doc.insert(None, Element::new("div"));
//! let menu = doc.insert(Some(wrapper), Element::new("ul").with_class("js-dropdown-menu"));
//! doc.set_attribute(menu, "aria-hidden", true);
//!
//! assert_eq!(doc.first_by_class(wrapper, "js-dropdown-menu"), Some(menu));
//! assert_eq!(doc.attribute(menu, "aria-hidden"), Some("true"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::{Descendants, Document};
pub use types::{Element, ElementFlags, NodeId};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dropdown --heading-base-level=0

//! Understory Dropdown: accessible dropdown-menu behavior.
//!
//! Attach a [`Dropdown`] to a wrapper element that contains a toggle control and a menu panel,
//! identified by class (`js-dropdown-toggle` and `js-dropdown-menu` unless configured
//! otherwise). The controller keeps one bit of state, hidden or visible, and mirrors it into the
//! menu's `aria-hidden` attribute. The toggle gets `aria-has-popup="true"`.
//!
//! ## Behavior
//!
//! - [`Trigger::Click`] (default): a primary-button click on the toggle toggles the menu and
//!   prevents the click's default action.
//! - [`Trigger::Hover`]: the pointer entering the wrapper, or focus landing on the toggle, shows
//!   the menu; the pointer leaving the wrapper hides it.
//! - In both modes, focus moving to anything outside the wrapper hides the menu, and `Escape`
//!   pressed inside the wrapper returns focus to the toggle and hides the menu.
//!
//! [`Dropdown::show`], [`Dropdown::hide`] and [`Dropdown::toggle`] drive the same state
//! programmatically. Showing a visible menu or hiding a hidden one does nothing and notifies
//! no one.
//!
//! ## Notifications
//!
//! Each change is delivered to [`Dropdown::subscribe`] callbacks as a [`DropdownEvent`] and
//! dispatched at the wrapper as a bubbling `dropdown:show` / `dropdown:hide` custom event whose
//! detail is a [`DropdownDetail`].
//!
//! ## Example
//!
//! ```
//! use understory_dom::Element;
//! use understory_dropdown::{Dropdown, DropdownOptions, Trigger};
//! use understory_responder::Dom;
//! use understory_responder::types::{Key, PRIMARY_BUTTON};
//!
//! let mut dom = Dom::new();
//! let nav = dom.insert(None, Element::new("nav"));
//! let toggle = dom.insert(
//!     Some(nav),
//!     Element::new("button").with_class("js-dropdown-toggle").focusable(),
//! );
//! let menu = dom.insert(Some(nav), Element::new("ul").with_class("js-dropdown-menu"));
//! let link = dom.insert(Some(menu), Element::new("a").focusable());
//!
//! let dropdown = Dropdown::attach(&mut dom, nav, DropdownOptions::default().trigger(Trigger::Click))?;
//! assert_eq!(dom.document().attribute(menu, "aria-hidden"), Some("true"));
//!
//! dom.click(toggle, PRIMARY_BUTTON);
//! assert!(!dropdown.is_hidden());
//! assert_eq!(dom.document().attribute(menu, "aria-hidden"), Some("false"));
//!
//! dom.focus(link);
//! dom.key_down(Key::Escape);
//! assert!(dropdown.is_hidden());
//! assert_eq!(dom.focused(), Some(toggle));
//!
//! dropdown.destroy(&mut dom);
//! assert_eq!(dom.listener_count(), 0);
//! # Ok::<(), understory_dropdown::AttachError>(())
//! ```
//!
//! ## Lifetime
//!
//! Listeners live in the [`Dom`](understory_responder::Dom) and keep working after the
//! [`Dropdown`] handle is dropped. Call [`Dropdown::destroy`] to detach the behavior.
//! Removing the wrapper from the host also drops its listeners.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dropdown;
mod error;
pub mod events;
mod options;

pub use dropdown::{ARIA_HAS_POPUP, ARIA_HIDDEN, Dropdown};
pub use error::AttachError;
pub use events::{
    DropdownDetail, DropdownEvent, DropdownEventKind, HIDE_EVENT, SHOW_EVENT, SubscriptionId,
};
pub use options::{DEFAULT_MENU_CLASS, DEFAULT_TOGGLE_CLASS, DropdownOptions, FocusLoss, Trigger};

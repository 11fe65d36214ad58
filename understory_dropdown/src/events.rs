// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show/hide notifications.
//!
//! Every state change is reported twice: to typed subscribers registered with
//! [`Dropdown::subscribe`](crate::Dropdown::subscribe), and as a bubbling
//! custom event ([`SHOW_EVENT`] / [`HIDE_EVENT`]) dispatched at the wrapper
//! with a [`DropdownDetail`] payload, for listeners elsewhere in the tree.

use alloc::boxed::Box;
use alloc::vec::Vec;

use understory_dom::NodeId;

/// Custom event name dispatched when the menu is shown.
pub const SHOW_EVENT: &str = "dropdown:show";

/// Custom event name dispatched when the menu is hidden.
pub const HIDE_EVENT: &str = "dropdown:hide";

/// Direction of a visibility change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropdownEventKind {
    /// The menu became visible.
    Show,
    /// The menu became hidden.
    Hide,
}

impl DropdownEventKind {
    /// Name of the custom event dispatched at the wrapper.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Show => SHOW_EVENT,
            Self::Hide => HIDE_EVENT,
        }
    }
}

/// Typed notification delivered to subscribers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropdownEvent {
    /// What happened.
    pub kind: DropdownEventKind,
    /// The toggle element.
    pub toggle: NodeId,
    /// The menu element.
    pub menu: NodeId,
}

/// Detail attached to the `dropdown:show` / `dropdown:hide` custom events.
///
/// Read it with [`Event::detail`](understory_responder::types::Event::detail).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DropdownDetail {
    /// The toggle element.
    pub toggle: NodeId,
    /// The menu element.
    pub menu: NodeId,
}

/// Handle of a subscription, returned by [`Dropdown::subscribe`](crate::Dropdown::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&DropdownEvent)>;

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, callback: Callback) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, event: &DropdownEvent) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event host: a [`Document`] plus listeners, focus, hover and click state.
//!
//! [`Dom`] is the headless stand-in for a browser window. Behaviors register
//! listeners on nodes; the embedding application feeds raw input
//! ([`Dom::pointer_move`], [`Dom::pointer_down`], [`Dom::pointer_up`],
//! [`Dom::key_down`], [`Dom::focus`]) and the host turns it into routed
//! events.
//!
//! ## Re-entrancy
//!
//! Handlers receive `&mut Dom` and may dispatch, move focus, or add and remove
//! listeners while running. A listener removed mid-dispatch is not invoked
//! afterwards. A handler is never re-entered: if an event it triggers would
//! route back to it, that nested invocation is skipped.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_dom::Element;
//! use understory_responder::host::Dom;
//! use understory_responder::listeners::ListenerOptions;
//! use understory_responder::types::{EventKind, PRIMARY_BUTTON};
//!
//! let mut dom = Dom::new();
//! let list = dom.insert(None, Element::new("ul"));
//! let item = dom.insert(Some(list), Element::new("li"));
//!
//! let clicks = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&clicks);
//! dom.add_listener(list, EventKind::Click, ListenerOptions::BUBBLE, move |_, ev| {
//!     assert_eq!(ev.target, item);
//!     seen.set(seen.get() + 1);
//! });
//!
//! dom.click(item, PRIMARY_BUTTON);
//! assert_eq!(clicks.get(), 1);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use understory_dom::{Document, Element, NodeId};

use crate::click::ClickTracker;
use crate::dispatcher;
use crate::hover::{HoverEvent, HoverState};
use crate::listeners::{ListenerId, ListenerOptions, Listeners};
use crate::router;
use crate::types::{Button, Event, EventKind, Key, Outcome};

/// Shared, mutable listener callback.
pub type Handler = Rc<RefCell<dyn FnMut(&mut Dom, &mut Event)>>;

/// Headless event host.
#[derive(Debug, Default)]
pub struct Dom {
    document: Document,
    listeners: Listeners,
    focused: Option<NodeId>,
    hover: HoverState<NodeId>,
    clicks: ClickTracker<NodeId>,
}

impl Dom {
    /// Host with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host over an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document.
    ///
    /// Prefer [`Dom::remove`] over [`Document::remove`] so listeners, focus and
    /// hover state are cleaned up with the nodes.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Click recognition settings.
    pub fn click_tracker_mut(&mut self) -> &mut ClickTracker<NodeId> {
        &mut self.clicks
    }

    /// Insert an element (see [`Document::insert`]).
    pub fn insert(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        self.document.insert(parent, element)
    }

    /// Remove a subtree together with its listeners.
    ///
    /// If focus was inside the subtree it is dropped without blur events, as a
    /// browser does when the focused element is detached.
    pub fn remove(&mut self, id: NodeId) {
        let removed = self.document.remove(id);
        if removed.is_empty() {
            return;
        }
        let mut dropped = 0;
        for &n in &removed {
            dropped += self.listeners.remove_node(n);
        }
        if self.focused.is_some_and(|f| removed.contains(&f)) {
            log::debug!("[focus] focused node {:?} detached", self.focused);
            self.focused = None;
        }
        let doc = &self.document;
        self.hover.prune(|n| doc.is_alive(n));
        self.clicks.cancel_if(|n| doc.is_alive(*n));
        log::trace!(
            "[dom] removed {} node(s) and {dropped} listener(s) under {id:?}",
            removed.len()
        );
    }

    /// Register `handler` for `kind` events at `node`.
    ///
    /// A stale `node` registers nothing; the returned id is never live.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        handler: impl FnMut(&mut Self, &mut Event) + 'static,
    ) -> ListenerId {
        if !self.document.is_alive(node) {
            log::warn!("[dom] listener for {kind:?} on stale {node:?} ignored");
            return self.listeners.next_id();
        }
        let handler: Handler = Rc::new(RefCell::new(handler));
        self.listeners.add(node, kind, options, handler)
    }

    /// Unregister a listener. Returns false if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Whether a listener is still registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners registered on `node`.
    pub fn listeners_on(&self, node: NodeId) -> usize {
        self.listeners.count_on(node)
    }

    /// Route `event` to the listeners along its target's path.
    ///
    /// Returns false if a listener prevented the default action, true
    /// otherwise. Events aimed at stale nodes are dropped and return true.
    pub fn dispatch(&mut self, event: &mut Event) -> bool {
        if !self.document.is_alive(event.target) {
            log::trace!(
                "[dispatch] {} dropped: target {:?} is stale",
                event.kind.name(),
                event.target
            );
            return true;
        }
        let seq = router::route(&self.document, event.target, event.kind.bubbles());
        dispatcher::run(&seq, event, |step, ev| {
            ev.phase = step.phase;
            ev.current_target = Some(step.node);
            for (id, handler) in self.listeners.matching(step.node, &ev.kind, step.phase) {
                if !self.listeners.contains(id) {
                    continue;
                }
                let Ok(mut f) = handler.try_borrow_mut() else {
                    log::warn!(
                        "[dispatch] skipping re-entrant {} listener {id:?}",
                        ev.kind.name()
                    );
                    continue;
                };
                log::trace!(
                    "[dispatch] {} {:?} at {:?}",
                    ev.kind.name(),
                    step.phase,
                    step.node
                );
                (&mut *f)(self, ev);
            }
            if ev.propagation_stopped() {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        event.current_target = None;
        !event.default_prevented()
    }

    /// Build and dispatch an event in one go.
    pub fn dispatch_kind(&mut self, kind: EventKind, target: NodeId) -> bool {
        self.dispatch(&mut Event::new(kind, target))
    }

    /// Currently focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to `id`.
    ///
    /// Returns false (and changes nothing) if `id` is stale or not focusable.
    /// Focusing the already focused node returns true without events.
    /// Otherwise dispatches `blur` and `focusout` at the old node, then
    /// `focus` and `focusin` at the new one, each carrying the other side as
    /// related target.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.document.is_focusable(id) {
            return false;
        }
        if self.focused == Some(id) {
            return true;
        }
        self.move_focus(Some(id));
        true
    }

    /// Drop focus, dispatching `blur`/`focusout` with no related target.
    pub fn blur(&mut self) {
        if self.focused.is_some() {
            self.move_focus(None);
        }
    }

    fn move_focus(&mut self, new: Option<NodeId>) {
        let old = self.focused;
        log::debug!("[focus] {old:?} -> {new:?}");
        if let Some(old) = old {
            self.focused = None;
            self.dispatch(&mut Event::new(EventKind::Blur, old).with_related(new));
            self.dispatch(&mut Event::new(EventKind::FocusOut, old).with_related(new));
            if self.focused.is_some() {
                // A blur handler moved focus somewhere else; that move wins.
                return;
            }
        }
        let Some(new) = new.filter(|&n| self.document.is_focusable(n)) else {
            return;
        };
        self.focused = Some(new);
        self.dispatch(&mut Event::new(EventKind::Focus, new).with_related(old));
        if self.focused == Some(new) {
            self.dispatch(&mut Event::new(EventKind::FocusIn, new).with_related(old));
        }
    }

    /// Node currently under the pointer.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hover.target()
    }

    /// Report the node under the pointer (`None` when over nothing).
    ///
    /// Dispatches `mouseleave` at every node the pointer left (innermost first)
    /// and `mouseenter` at every node it entered (outermost first).
    pub fn pointer_move(&mut self, target: Option<NodeId>, position: Point) {
        self.clicks.on_move(position);
        let previous = self.hover.target();
        let path: Vec<NodeId> = target.map(|t| self.document.path_to(t)).unwrap_or_default();
        for transition in self.hover.update_path(&path) {
            let mut ev = match transition {
                HoverEvent::Leave(n) => Event::new(EventKind::MouseLeave, n).with_related(target),
                HoverEvent::Enter(n) => Event::new(EventKind::MouseEnter, n).with_related(previous),
            };
            ev.position = Some(position);
            self.dispatch(&mut ev);
        }
    }

    /// Report a button press over `target`.
    ///
    /// Like a browser's mousedown default, the press moves focus to the
    /// nearest focusable ancestor-or-self of `target`, or drops focus when
    /// there is none.
    pub fn pointer_down(&mut self, target: NodeId, button: Button, position: Point, time: u64) {
        if !self.document.is_alive(target) {
            return;
        }
        let focus_target = self
            .document
            .path_to(target)
            .into_iter()
            .rev()
            .find(|&n| self.document.is_focusable(n));
        match focus_target {
            Some(n) => {
                self.focus(n);
            }
            None => self.blur(),
        }
        // Handlers may have removed the pressed node.
        if self.document.is_alive(target) {
            self.clicks.on_down(target, button, position, time);
        }
    }

    /// Report a button release over `target`.
    ///
    /// Returns true if the release completed a click and a `click` event was
    /// dispatched at the pressed node.
    pub fn pointer_up(&mut self, target: NodeId, button: Button, position: Point, time: u64) -> bool {
        let Some((pressed, button)) = self.clicks.on_up(&target, button, position, time) else {
            return false;
        };
        let mut ev = Event::new(EventKind::Click, pressed)
            .with_button(button)
            .with_position(position);
        self.dispatch(&mut ev);
        true
    }

    /// Dispatch a click at `target` without press tracking.
    ///
    /// Returns false if a listener prevented the default action.
    pub fn click(&mut self, target: NodeId, button: Button) -> bool {
        self.dispatch(&mut Event::new(EventKind::Click, target).with_button(button))
    }

    /// Dispatch a `keydown` at the focused node.
    ///
    /// With nothing focused there is no target and nothing is dispatched.
    /// Returns false if a listener prevented the default action.
    pub fn key_down(&mut self, key: Key) -> bool {
        let Some(target) = self.focused else {
            log::trace!("[dispatch] keydown {key:?} with no focused node");
            return true;
        };
        self.dispatch(&mut Event::new(EventKind::KeyDown, target).with_key(key))
    }
}

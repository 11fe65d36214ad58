// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown controller.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use core::cell::{Cell, RefCell};

use smallvec::SmallVec;
use understory_dom::NodeId;
use understory_responder::Dom;
use understory_responder::listeners::{ListenerId, ListenerOptions};
use understory_responder::types::{Event, EventKind, Key, PRIMARY_BUTTON};

use crate::error::AttachError;
use crate::events::{DropdownDetail, DropdownEvent, DropdownEventKind, Subscribers, SubscriptionId};
use crate::options::{DropdownOptions, Trigger};

/// Attribute mirroring the hidden state on the menu.
pub const ARIA_HIDDEN: &str = "aria-hidden";

/// Attribute marking the toggle as opening a popup.
pub const ARIA_HAS_POPUP: &str = "aria-has-popup";

/// State shared between the controller handle and its listeners.
struct Shared {
    wrapper: NodeId,
    toggle: NodeId,
    menu: NodeId,
    hidden: Cell<bool>,
    subscribers: RefCell<Subscribers>,
}

impl Shared {
    fn show(&self, dom: &mut Dom) {
        if !self.hidden.get() {
            return;
        }
        dom.document_mut().set_attribute(self.menu, ARIA_HIDDEN, false);
        self.hidden.set(false);
        log::debug!("[dropdown] show {:?}", self.wrapper);
        self.notify(dom, DropdownEventKind::Show);
    }

    fn hide(&self, dom: &mut Dom) {
        if self.hidden.get() {
            return;
        }
        dom.document_mut().set_attribute(self.menu, ARIA_HIDDEN, true);
        self.hidden.set(true);
        log::debug!("[dropdown] hide {:?}", self.wrapper);
        self.notify(dom, DropdownEventKind::Hide);
    }

    fn toggle(&self, dom: &mut Dom) {
        if self.hidden.get() {
            self.show(dom);
        } else {
            self.hide(dom);
        }
    }

    fn notify(&self, dom: &mut Dom, kind: DropdownEventKind) {
        let event = DropdownEvent {
            kind,
            toggle: self.toggle,
            menu: self.menu,
        };
        match self.subscribers.try_borrow_mut() {
            Ok(mut subs) => subs.notify(&event),
            Err(_) => log::warn!("[dropdown] {kind:?} raised from inside a subscriber; subscribers skipped"),
        }
        let mut custom = Event::new(EventKind::custom(kind.event_name()), self.wrapper).with_detail(
            DropdownDetail {
                toggle: self.toggle,
                menu: self.menu,
            },
        );
        dom.dispatch(&mut custom);
    }
}

/// An accessible dropdown attached to a wrapper element.
///
/// The menu's `aria-hidden` attribute always mirrors [`Dropdown::is_hidden`].
/// Listeners stay registered until [`Dropdown::destroy`]; dropping the handle
/// leaves the behavior wired.
pub struct Dropdown {
    shared: Rc<Shared>,
    options: DropdownOptions,
    listeners: SmallVec<[ListenerId; 4]>,
}

impl core::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dropdown")
            .field("wrapper", &self.shared.wrapper)
            .field("toggle", &self.shared.toggle)
            .field("menu", &self.shared.menu)
            .field("hidden", &self.shared.hidden.get())
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Dropdown {
    /// Attach with [`DropdownOptions::default`].
    pub fn new(dom: &mut Dom, wrapper: NodeId) -> Result<Self, AttachError> {
        Self::attach(dom, wrapper, DropdownOptions::default())
    }

    /// Attach to `wrapper`.
    ///
    /// Resolves the first descendants carrying the toggle and menu classes,
    /// marks the toggle with `aria-has-popup="true"`, the menu with
    /// `aria-hidden="true"`, and registers the listeners for the trigger mode
    /// plus the focus-loss and escape listeners.
    pub fn attach(
        dom: &mut Dom,
        wrapper: NodeId,
        options: DropdownOptions,
    ) -> Result<Self, AttachError> {
        let doc = dom.document();
        if !doc.is_alive(wrapper) {
            return Err(AttachError::StaleContainer);
        }
        let toggle = doc
            .first_by_class(wrapper, &options.toggle_class)
            .ok_or_else(|| AttachError::MissingToggle {
                class: options.toggle_class.to_string(),
            })?;
        let menu = doc
            .first_by_class(wrapper, &options.menu_class)
            .ok_or_else(|| AttachError::MissingMenu {
                class: options.menu_class.to_string(),
            })?;

        let doc = dom.document_mut();
        doc.set_attribute(toggle, ARIA_HAS_POPUP, true);
        doc.set_attribute(menu, ARIA_HIDDEN, true);

        let shared = Rc::new(Shared {
            wrapper,
            toggle,
            menu,
            hidden: Cell::new(true),
            subscribers: RefCell::default(),
        });
        let mut listeners = SmallVec::new();

        match options.trigger {
            Trigger::Hover => {
                let s = Rc::clone(&shared);
                listeners.push(dom.add_listener(
                    wrapper,
                    EventKind::MouseEnter,
                    ListenerOptions::BUBBLE,
                    move |dom, _| s.show(dom),
                ));
                let s = Rc::clone(&shared);
                listeners.push(dom.add_listener(
                    wrapper,
                    EventKind::MouseLeave,
                    ListenerOptions::BUBBLE,
                    move |dom, _| s.hide(dom),
                ));
                let s = Rc::clone(&shared);
                listeners.push(dom.add_listener(
                    toggle,
                    EventKind::Focus,
                    ListenerOptions::BUBBLE,
                    move |dom, _| s.show(dom),
                ));
            }
            Trigger::Click => {
                let s = Rc::clone(&shared);
                listeners.push(dom.add_listener(
                    toggle,
                    EventKind::Click,
                    ListenerOptions::BUBBLE,
                    move |dom, ev| {
                        if ev.button == Some(PRIMARY_BUTTON) {
                            ev.prevent_default();
                            s.toggle(dom);
                        }
                    },
                ));
            }
        }

        let s = Rc::clone(&shared);
        listeners.push(dom.add_listener(
            wrapper,
            options.focus_loss.event_kind(),
            ListenerOptions::CAPTURE,
            move |dom, ev| {
                let inside = ev
                    .related_target
                    .is_some_and(|next| dom.document().is_descendant(s.wrapper, next));
                if !inside {
                    s.hide(dom);
                }
            },
        ));

        let s = Rc::clone(&shared);
        listeners.push(dom.add_listener(
            wrapper,
            EventKind::KeyDown,
            ListenerOptions::CAPTURE,
            move |dom, ev| {
                if ev.key == Some(Key::Escape) {
                    dom.focus(s.toggle);
                    s.hide(dom);
                }
            },
        ));

        log::debug!(
            "[dropdown] attached to {wrapper:?} ({:?}, toggle {toggle:?}, menu {menu:?})",
            options.trigger
        );
        Ok(Self {
            shared,
            options,
            listeners,
        })
    }

    /// Show the menu. No-op if already visible.
    pub fn show(&self, dom: &mut Dom) {
        self.shared.show(dom);
    }

    /// Hide the menu. No-op if already hidden.
    pub fn hide(&self, dom: &mut Dom) {
        self.shared.hide(dom);
    }

    /// Show if hidden, hide if visible.
    pub fn toggle(&self, dom: &mut Dom) {
        self.shared.toggle(dom);
    }

    /// Whether the menu is hidden.
    pub fn is_hidden(&self) -> bool {
        self.shared.hidden.get()
    }

    /// The wrapper element.
    pub fn wrapper(&self) -> NodeId {
        self.shared.wrapper
    }

    /// The toggle element.
    pub fn toggle_element(&self) -> NodeId {
        self.shared.toggle
    }

    /// The menu element.
    pub fn menu_element(&self) -> NodeId {
        self.shared.menu
    }

    /// Options this dropdown was attached with.
    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    /// Listeners registered by this dropdown.
    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Call `callback` on every show and hide.
    pub fn subscribe(&self, callback: impl FnMut(&DropdownEvent) + 'static) -> SubscriptionId {
        self.shared.subscribers.borrow_mut().add(Box::new(callback))
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.borrow_mut().remove(id)
    }

    /// Unregister every listener and subscriber.
    ///
    /// Attributes are left as they are.
    pub fn destroy(self, dom: &mut Dom) {
        let mut removed = 0;
        for id in self.listeners {
            if dom.remove_listener(id) {
                removed += 1;
            }
        }
        self.shared.subscribers.borrow_mut().clear();
        log::debug!(
            "[dropdown] destroyed {:?}, {removed} listener(s) removed",
            self.shared.wrapper
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{HIDE_EVENT, SHOW_EVENT};
    use crate::options::FocusLoss;
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::Point;
    use understory_dom::Element;
    use understory_responder::types::Phase;

    struct Page {
        dom: Dom,
        wrapper: NodeId,
        toggle: NodeId,
        menu: NodeId,
        item: NodeId,
        outside: NodeId,
    }

    /// body > [div.wrapper > [button.js-dropdown-toggle, ul.js-dropdown-menu > li > a], input]
    fn page() -> Page {
        let mut dom = Dom::new();
        let body = dom.insert(None, Element::new("body"));
        let wrapper = dom.insert(Some(body), Element::new("div"));
        let toggle = dom.insert(
            Some(wrapper),
            Element::new("button").with_class("js-dropdown-toggle").focusable(),
        );
        let menu = dom.insert(Some(wrapper), Element::new("ul").with_class("js-dropdown-menu"));
        let li = dom.insert(Some(menu), Element::new("li"));
        let item = dom.insert(Some(li), Element::new("a").focusable());
        let outside = dom.insert(Some(body), Element::new("input").focusable());
        Page {
            dom,
            wrapper,
            toggle,
            menu,
            item,
            outside,
        }
    }

    fn aria_hidden(p: &Page) -> Option<&str> {
        p.dom.document().attribute(p.menu, ARIA_HIDDEN)
    }

    fn recorded(dd: &Dropdown) -> Rc<RefCell<Vec<DropdownEventKind>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        dd.subscribe(move |ev| l.borrow_mut().push(ev.kind));
        log
    }

    #[test]
    fn attach_sets_aria_state() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        assert!(dd.is_hidden());
        assert_eq!(aria_hidden(&p), Some("true"));
        assert_eq!(
            p.dom.document().attribute(p.toggle, ARIA_HAS_POPUP),
            Some("true")
        );
        assert_eq!(dd.toggle_element(), p.toggle);
        assert_eq!(dd.menu_element(), p.menu);
        assert_eq!(dd.wrapper(), p.wrapper);
    }

    #[test]
    fn attach_reports_missing_parts_without_mutating() {
        let mut p = page();
        let err = Dropdown::attach(
            &mut p.dom,
            p.wrapper,
            DropdownOptions::default().toggle_class("nope"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AttachError::MissingToggle {
                class: "nope".into()
            }
        );
        let err = Dropdown::attach(
            &mut p.dom,
            p.wrapper,
            DropdownOptions::default().menu_class("nada"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AttachError::MissingMenu {
                class: "nada".into()
            }
        );
        assert_eq!(aria_hidden(&p), None);
        assert_eq!(p.dom.document().attribute(p.toggle, ARIA_HAS_POPUP), None);
        assert_eq!(p.dom.listener_count(), 0);

        let stale = p.wrapper;
        p.dom.remove(stale);
        assert_eq!(
            Dropdown::new(&mut p.dom, stale).unwrap_err(),
            AttachError::StaleContainer
        );
    }

    #[test]
    fn show_is_idempotent_and_notifies_once() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let log = recorded(&dd);

        dd.show(&mut p.dom);
        assert!(!dd.is_hidden());
        assert_eq!(aria_hidden(&p), Some("false"));
        dd.show(&mut p.dom);
        assert_eq!(*log.borrow(), vec![DropdownEventKind::Show]);
    }

    #[test]
    fn hide_is_idempotent_and_notifies_once() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let log = recorded(&dd);

        dd.hide(&mut p.dom);
        assert!(log.borrow().is_empty());

        dd.show(&mut p.dom);
        dd.hide(&mut p.dom);
        dd.hide(&mut p.dom);
        assert!(dd.is_hidden());
        assert_eq!(aria_hidden(&p), Some("true"));
        assert_eq!(
            *log.borrow(),
            vec![DropdownEventKind::Show, DropdownEventKind::Hide]
        );
    }

    #[test]
    fn toggle_alternates() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let mut states = Vec::new();
        for _ in 0..4 {
            dd.toggle(&mut p.dom);
            states.push(dd.is_hidden());
        }
        assert_eq!(states, vec![false, true, false, true]);
    }

    #[test]
    fn custom_events_bubble_with_detail() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let body = p.dom.document().parent_of(p.wrapper).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for name in [SHOW_EVENT, HIDE_EVENT] {
            let seen = Rc::clone(&seen);
            p.dom.add_listener(
                body,
                EventKind::custom(name),
                ListenerOptions::BUBBLE,
                move |_, ev| {
                    let detail = *ev.detail::<DropdownDetail>().unwrap();
                    seen.borrow_mut()
                        .push((ev.kind.name().to_string(), ev.target, ev.phase, detail));
                },
            );
        }

        dd.toggle(&mut p.dom);
        dd.toggle(&mut p.dom);
        let detail = DropdownDetail {
            toggle: p.toggle,
            menu: p.menu,
        };
        assert_eq!(
            *seen.borrow(),
            vec![
                ("dropdown:show".to_string(), p.wrapper, Phase::Bubble, detail),
                ("dropdown:hide".to_string(), p.wrapper, Phase::Bubble, detail),
            ]
        );
    }

    #[test]
    fn primary_click_toggles_and_prevents_default() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();

        assert!(!p.dom.click(p.toggle, PRIMARY_BUTTON));
        assert!(!dd.is_hidden());
        assert!(!p.dom.click(p.toggle, PRIMARY_BUTTON));
        assert!(dd.is_hidden());

        // Secondary button: ignored, default untouched.
        assert!(p.dom.click(p.toggle, 2));
        assert!(dd.is_hidden());
    }

    #[test]
    fn press_and_release_on_toggle_opens() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        p.dom
            .pointer_down(p.toggle, PRIMARY_BUTTON, Point::new(4.0, 4.0), 0);
        assert!(
            p.dom
                .pointer_up(p.toggle, PRIMARY_BUTTON, Point::new(4.0, 4.0), 30)
        );
        assert!(!dd.is_hidden());
    }

    fn press_and_release(p: &mut Page, node: NodeId, time: u64) {
        let at = Point::new(4.0, 4.0);
        p.dom.pointer_down(node, PRIMARY_BUTTON, at, time);
        p.dom.pointer_up(node, PRIMARY_BUTTON, at, time + 20);
    }

    #[test]
    fn click_outside_hides() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        { let n = p.toggle; press_and_release(&mut p, n, 0); }
        assert!(!dd.is_hidden());
        assert_eq!(p.dom.focused(), Some(p.toggle));

        { let n = p.outside; press_and_release(&mut p, n, 100); }
        assert_eq!(p.dom.focused(), Some(p.outside));
        assert!(dd.is_hidden());
        assert_eq!(aria_hidden(&p), Some("true"));
    }

    #[test]
    fn click_inside_menu_keeps_open() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        { let n = p.toggle; press_and_release(&mut p, n, 0); }
        let events = recorded(&dd);

        { let n = p.item; press_and_release(&mut p, n, 100); }
        assert_eq!(p.dom.focused(), Some(p.item));
        assert!(!dd.is_hidden());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn click_mode_ignores_hover() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        p.dom.pointer_move(Some(p.toggle), Point::ZERO);
        assert!(dd.is_hidden());
    }

    #[test]
    fn escape_hides_and_returns_focus_to_toggle() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        dd.show(&mut p.dom);
        assert!(p.dom.focus(p.item));
        assert!(!dd.is_hidden());

        p.dom.key_down(Key::Escape);
        assert!(dd.is_hidden());
        assert_eq!(p.dom.focused(), Some(p.toggle));
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        dd.show(&mut p.dom);
        p.dom.focus(p.item);
        p.dom.key_down(Key::Enter);
        assert!(!dd.is_hidden());
        assert_eq!(p.dom.focused(), Some(p.item));
    }

    #[test]
    fn focus_moving_inside_keeps_menu_open() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        p.dom.focus(p.toggle);
        dd.show(&mut p.dom);
        p.dom.focus(p.item);
        assert!(!dd.is_hidden());
        p.dom.focus(p.toggle);
        assert!(!dd.is_hidden());
    }

    #[test]
    fn focus_moving_outside_hides() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        p.dom.focus(p.item);
        dd.show(&mut p.dom);
        p.dom.focus(p.outside);
        assert!(dd.is_hidden());
    }

    #[test]
    fn focus_dropped_entirely_hides() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        p.dom.focus(p.toggle);
        dd.show(&mut p.dom);
        p.dom.blur();
        assert!(dd.is_hidden());
    }

    #[test]
    fn blur_variant_behaves_like_focusout() {
        let mut p = page();
        let dd = Dropdown::attach(
            &mut p.dom,
            p.wrapper,
            DropdownOptions::default().focus_loss(FocusLoss::Blur),
        )
        .unwrap();
        p.dom.focus(p.toggle);
        dd.show(&mut p.dom);
        p.dom.focus(p.item);
        assert!(!dd.is_hidden());
        p.dom.focus(p.outside);
        assert!(dd.is_hidden());
    }

    #[test]
    fn hover_mode_follows_pointer_and_toggle_focus() {
        let mut p = page();
        let dd = Dropdown::attach(
            &mut p.dom,
            p.wrapper,
            DropdownOptions::default().trigger(Trigger::Hover),
        )
        .unwrap();
        let log = recorded(&dd);

        p.dom.pointer_move(Some(p.toggle), Point::new(1.0, 1.0));
        assert!(!dd.is_hidden());
        // Moving within the wrapper keeps it open.
        p.dom.pointer_move(Some(p.item), Point::new(1.0, 30.0));
        assert!(!dd.is_hidden());
        p.dom.pointer_move(Some(p.outside), Point::new(1.0, 300.0));
        assert!(dd.is_hidden());
        assert_eq!(
            *log.borrow(),
            vec![DropdownEventKind::Show, DropdownEventKind::Hide]
        );

        p.dom.focus(p.toggle);
        assert!(!dd.is_hidden());

        // Clicks do nothing in hover mode.
        assert!(p.dom.click(p.toggle, PRIMARY_BUTTON));
        assert!(!dd.is_hidden());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = dd.subscribe(move |_| h.set(h.get() + 1));
        dd.toggle(&mut p.dom);
        assert!(dd.unsubscribe(id));
        dd.toggle(&mut p.dom);
        assert_eq!(hits.get(), 1);
        assert!(!dd.unsubscribe(id));
    }

    #[test]
    fn destroy_unregisters_everything() {
        let mut p = page();
        let dd = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let ids: Vec<ListenerId> = dd.listener_ids().to_vec();
        assert_eq!(ids.len(), 3);
        assert_eq!(p.dom.listener_count(), 3);

        dd.show(&mut p.dom);
        dd.destroy(&mut p.dom);
        assert_eq!(p.dom.listener_count(), 0);
        assert!(ids.iter().all(|id| !p.dom.has_listener(*id)));

        // State and attributes stay as they were; input no longer reaches the behavior.
        assert_eq!(aria_hidden(&p), Some("false"));
        p.dom.click(p.toggle, PRIMARY_BUTTON);
        assert_eq!(aria_hidden(&p), Some("false"));
    }

    #[test]
    fn hover_mode_registers_five_listeners() {
        let mut p = page();
        let dd = Dropdown::attach(
            &mut p.dom,
            p.wrapper,
            DropdownOptions::default().trigger(Trigger::Hover),
        )
        .unwrap();
        assert_eq!(dd.listener_ids().len(), 5);
        assert_eq!(p.dom.listeners_on(p.wrapper), 4);
        assert_eq!(p.dom.listeners_on(p.toggle), 1);
    }

    #[test]
    fn instances_do_not_interact() {
        let mut p = page();
        let body = p.dom.document().parent_of(p.wrapper).unwrap();
        let other = p.dom.insert(Some(body), Element::new("div"));
        let other_toggle = p.dom.insert(
            Some(other),
            Element::new("button").with_class("js-dropdown-toggle").focusable(),
        );
        p.dom
            .insert(Some(other), Element::new("ul").with_class("js-dropdown-menu"));

        let a = Dropdown::new(&mut p.dom, p.wrapper).unwrap();
        let b = Dropdown::new(&mut p.dom, other).unwrap();

        p.dom.click(p.toggle, PRIMARY_BUTTON);
        assert!(!a.is_hidden());
        assert!(b.is_hidden());

        // Focus moving into the other dropdown closes the first one.
        p.dom.focus(p.toggle);
        p.dom.focus(other_toggle);
        assert!(a.is_hidden());
        assert!(b.is_hidden());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, and element data.

use alloc::string::{String, ToString};
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Identifier for an element in the document (generational).
///
/// The first field is the slot index, the second the slot generation. A slot
/// freed by [`Document::remove`](crate::Document::remove) is reused with a
/// higher generation, so a stale id never refers to a newer element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling focus participation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element can receive keyboard focus.
        const FOCUSABLE = 0b0000_0001;
        /// Element is disabled; disabled elements never take focus.
        const DISABLED  = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Data carried by a single element.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Tag name, e.g. `div` or `button`.
    pub tag: String,
    /// Class list in insertion order, without duplicates.
    pub classes: SmallVec<[String; 2]>,
    /// Attribute map.
    pub attributes: HashMap<String, String>,
    /// Focus flags.
    pub flags: ElementFlags,
}

impl Element {
    /// Create an element with the given tag and no classes or attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add a class (no-op if already present).
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Mark the element as focusable.
    pub fn focusable(mut self) -> Self {
        self.flags |= ElementFlags::FOCUSABLE;
        self
    }

    /// Returns true if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.into());
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        match self.classes.iter().position(|c| c == class) {
            Some(pos) => {
                self.classes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Attribute value, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns true if the element may take focus right now.
    pub fn is_focusable(&self) -> bool {
        self.flags.contains(ElementFlags::FOCUSABLE) && !self.flags.contains(ElementFlags::DISABLED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_has_no_duplicates() {
        let mut el = Element::new("ul").with_class("menu").with_class("menu");
        assert_eq!(el.classes.len(), 1);
        assert!(!el.add_class("menu"));
        assert!(el.add_class("open"));
        assert!(el.remove_class("menu"));
        assert!(!el.remove_class("menu"));
        assert_eq!(el.classes.as_slice(), ["open"]);
    }

    #[test]
    fn attributes_are_stringified() {
        let el = Element::new("button").with_attribute("aria-has-popup", true);
        assert_eq!(el.attribute("aria-has-popup"), Some("true"));
        assert_eq!(el.attribute("aria-hidden"), None);
    }

    #[test]
    fn disabled_elements_are_not_focusable() {
        let mut el = Element::new("button").focusable();
        assert!(el.is_focusable());
        el.flags |= ElementFlags::DISABLED;
        assert!(!el.is_focusable());
        assert!(!Element::new("div").is_focusable());
    }
}

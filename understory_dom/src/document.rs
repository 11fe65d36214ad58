// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, mutation, queries.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::types::{Element, ElementFlags, NodeId};

/// An element tree.
///
/// Nodes live in generational slots. Any number of roots may exist; a node
/// inserted with no parent becomes a root.
///
/// ## Example
///
/// ```rust
/// use understory_dom::{Document, Element};
///
/// let mut doc = Document::new();
/// let nav = doc.insert(None, Element::new("nav"));
/// let button = doc.insert(Some(nav), Element::new("button").with_class("js-dropdown-toggle"));
///
/// assert_eq!(doc.first_by_class(nav, "js-dropdown-toggle"), Some(button));
/// assert!(doc.is_descendant(nav, button));
/// ```
#[derive(Default)]
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the element as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let node = |generation| Node {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.node_mut(p).children.push(id);
            self.node_mut(id).parent = Some(p);
        }
        id
    }

    /// Remove an element and its subtree.
    ///
    /// Returns the removed ids in pre-order (root of the subtree first), or an
    /// empty list if `id` is stale.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        let mut removed = Vec::new();
        removed.push(id);
        removed.extend(self.descendants(id));
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        for &n in &removed {
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
        }
        removed
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Element data of a live node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Mutable element data of a live node.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_opt_mut(id).map(|n| &mut n.element)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Path from the root to `id` (inclusive), or empty if `id` is stale.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut cur = Some(id);
        while let Some(n) = cur {
            out.push(n);
            cur = self.parent_of(n);
        }
        out.reverse();
        out
    }

    /// Get the next node in depth-first (document) order, crossing out of
    /// subtrees as needed. Does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next) = self.next_sibling(node) {
                return Some(next);
            }
            node = parent;
        }
        None
    }

    /// Iterate over every descendant of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root,
            next: self.children_of(root).first().copied(),
        }
    }

    /// Returns true if `node` is a strict descendant of `root`.
    ///
    /// Walks all descendants of `root` on every call.
    pub fn is_descendant(&self, root: NodeId, node: NodeId) -> bool {
        self.descendants(root).any(|d| d == node)
    }

    /// First descendant of `root` (document order, excluding `root`) carrying `class`.
    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .find(|&d| self.element(d).is_some_and(|e| e.has_class(class)))
    }

    /// Attribute value of a live node.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    /// Set an attribute; values are stored in their string form. No-op on stale ids.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl ToString) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.insert(name.into(), value.to_string());
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<alloc::string::String> {
        self.element_mut(id).and_then(|e| e.attributes.remove(name))
    }

    /// Returns true if the live node carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class to a live node.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.add_class(class))
    }

    /// Remove a class from a live node.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.remove_class(class))
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<ElementFlags> {
        self.element(id).map(|e| e.flags)
    }

    /// Replace the flags of a live node.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags) {
        if let Some(el) = self.element_mut(id) {
            el.flags = flags;
        }
    }

    /// Returns true if the node is live and may take focus.
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(Element::is_focusable)
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }
}

/// Pre-order iterator over the descendants of a node.
///
/// Created by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = if let Some(&child) = self.doc.children_of(current).first() {
            Some(child)
        } else {
            // Climb until a next sibling exists, stopping at the subtree root.
            let mut node = current;
            loop {
                if node == self.root {
                    break None;
                }
                if let Some(sibling) = self.doc.next_sibling(node) {
                    break Some(sibling);
                }
                match self.doc.parent_of(node) {
                    Some(p) if p != self.root => node = p,
                    _ => break None,
                }
            }
        };
        Some(current)
    }
}

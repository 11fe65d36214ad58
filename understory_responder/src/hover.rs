// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions between successive pointer paths.
//!
//! [`HoverState`] remembers the root → target path under the pointer. Feeding
//! it a new path yields the minimal set of leave and enter notifications:
//! nodes only in the old path leave (innermost first), nodes only in the new
//! path enter (outermost first). Nodes in the shared prefix see nothing, which
//! is what gives `mouseenter`/`mouseleave` their subtree semantics.

use alloc::vec::Vec;

/// A single hover notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer entered this node's subtree.
    Enter(K),
    /// The pointer left this node's subtree.
    Leave(K),
}

/// Current hover path.
#[derive(Clone, Debug)]
pub struct HoverState<K> {
    path: Vec<K>,
}

impl<K> Default for HoverState<K> {
    fn default() -> Self {
        Self { path: Vec::new() }
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state (pointer over nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Current root → target path.
    pub fn current_path(&self) -> &[K] {
        &self.path
    }

    /// Innermost hovered node.
    pub fn target(&self) -> Option<K> {
        self.path.last().copied()
    }

    /// Replace the hover path and return the transitions, leaves before enters.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let common = self
            .path
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();
        let mut out = Vec::new();
        for &n in self.path[common..].iter().rev() {
            out.push(HoverEvent::Leave(n));
        }
        for &n in &new_path[common..] {
            out.push(HoverEvent::Enter(n));
        }
        self.path.clear();
        self.path.extend_from_slice(new_path);
        out
    }

    /// Cut the path at the first node rejected by `alive`, without emitting
    /// transitions. Used when nodes disappear from under the pointer.
    pub fn prune(&mut self, mut alive: impl FnMut(K) -> bool) {
        if let Some(pos) = self.path.iter().position(|&n| !alive(n)) {
            self.path.truncate(pos);
        }
    }

    /// Forget the path.
    pub fn clear(&mut self) {
        self.path.clear();
    }
}

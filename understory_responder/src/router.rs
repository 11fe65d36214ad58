// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root → target path of a node and emits the DOM propagation
//! sequence for it: capture (root first, target excluded), target, then bubble
//! (innermost ancestor first). Events that do not bubble get no bubble steps.
//!
//! The router does not look at listeners; see [`Dom`](crate::host::Dom) for
//! the layer that runs them.

use alloc::vec::Vec;

use crate::types::{Dispatch, ParentLookup};

/// Emit the propagation sequence for `target`.
///
/// The path is rebuilt through `parents`; the caller ensures acyclic ancestry.
///
/// ```
/// use understory_dom::{Document, Element};
/// use understory_responder::router::route;
/// use understory_responder::types::Phase;
///
/// let mut doc = Document::new();
/// let root = doc.insert(None, Element::new("div"));
/// let leaf = doc.insert(Some(root), Element::new("button"));
///
/// let seq = route(&doc, leaf, true);
/// let phases: Vec<Phase> = seq.iter().map(|d| d.phase).collect();
/// assert_eq!(phases, [Phase::Capture, Phase::Target, Phase::Bubble]);
///
/// // Non-bubbling events stop at the target.
/// assert_eq!(route(&doc, leaf, false).len(), 2);
/// ```
pub fn route<K: Copy>(parents: &impl ParentLookup<K>, target: K, bubbles: bool) -> Vec<Dispatch<K>> {
    let path = reconstruct_path(target, parents);
    emit_path(&path, bubbles)
}

/// Root → target path (inclusive) for `target`.
pub fn reconstruct_path<K: Copy>(target: K, parents: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut cur = target;
    loop {
        out.push(cur);
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

fn emit_path<K: Copy>(path: &[K], bubbles: bool) -> Vec<Dispatch<K>> {
    let mut out = Vec::with_capacity(path.len() * 2);
    let Some((target, ancestors)) = path.split_last() else {
        return out;
    };

    for &n in ancestors {
        out.push(Dispatch::capture(n));
    }

    out.push(Dispatch::target(*target));

    if bubbles {
        for &n in ancestors.iter().rev() {
            out.push(Dispatch::bubble(n));
        }
    }
    out
}

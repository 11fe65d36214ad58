// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry keyed by node and event kind.

use alloc::rc::Rc;
use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_dom::NodeId;

use crate::host::Handler;
use crate::types::{EventKind, Phase};

/// Handle of a registered listener, returned by
/// [`Dom::add_listener`](crate::host::Dom::add_listener).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Registration options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Run during the capture phase instead of the bubble phase.
    /// Capture listeners also run first at the target.
    pub capture: bool,
}

impl ListenerOptions {
    /// Options for a capturing listener.
    pub const CAPTURE: Self = Self { capture: true };
    /// Options for a bubbling listener.
    pub const BUBBLE: Self = Self { capture: false };
}

struct Entry {
    node: NodeId,
    kind: EventKind,
    capture: bool,
    handler: Handler,
}

/// Listeners in registration order per node.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: HashMap<ListenerId, Entry>,
    by_node: HashMap<NodeId, SmallVec<[ListenerId; 4]>>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("nodes", &self.by_node.len())
            .finish_non_exhaustive()
    }
}

/// Handlers selected for one dispatch step.
pub(crate) type Matched = SmallVec<[(ListenerId, Handler); 4]>;

impl Listeners {
    pub(crate) fn add(
        &mut self,
        node: NodeId,
        kind: EventKind,
        options: ListenerOptions,
        handler: Handler,
    ) -> ListenerId {
        let id = self.next_id();
        self.entries.insert(
            id,
            Entry {
                node,
                kind,
                capture: options.capture,
                handler,
            },
        );
        self.by_node.entry(node).or_default().push(id);
        id
    }

    /// Allocate an id without registering anything under it.
    pub(crate) fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let Some(entry) = self.entries.remove(&id) else {
            return false;
        };
        if let Some(ids) = self.by_node.get_mut(&entry.node) {
            ids.retain(|i| *i != id);
            if ids.is_empty() {
                self.by_node.remove(&entry.node);
            }
        }
        true
    }

    /// Drop every listener registered on `node`.
    pub(crate) fn remove_node(&mut self, node: NodeId) -> usize {
        let Some(ids) = self.by_node.remove(&node) else {
            return 0;
        };
        for id in &ids {
            self.entries.remove(id);
        }
        ids.len()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn count_on(&self, node: NodeId) -> usize {
        self.by_node.get(&node).map_or(0, SmallVec::len)
    }

    /// Handlers that run at `node` for `kind` during `phase`, in invocation order.
    pub(crate) fn matching(&self, node: NodeId, kind: &EventKind, phase: Phase) -> Matched {
        let mut out = Matched::new();
        let Some(ids) = self.by_node.get(&node) else {
            return out;
        };
        let mut pick = |capture: bool| {
            for id in ids {
                let e = &self.entries[id];
                if e.capture == capture && e.kind == *kind {
                    out.push((*id, Rc::clone(&e.handler)));
                }
            }
        };
        match phase {
            Phase::Capture => pick(true),
            Phase::Bubble => pick(false),
            Phase::Target => {
                pick(true);
                pick(false);
            }
        }
        out
    }
}

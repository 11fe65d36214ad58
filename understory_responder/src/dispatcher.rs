// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence and honor stop outcomes.
//!
//! [`Outcome`] only controls propagation. "Default prevented" and similar
//! flags live on the event payload you pass to [`run`]; the host in
//! [`crate::host`] uses [`Event`](crate::types::Event) for that.
//!
//! ## Minimal example
//!
//! ```
//! use understory_responder::dispatcher;
//! use understory_responder::types::{Dispatch, Outcome, Phase};
//!
//! let seq = vec![
//!     Dispatch::capture(1_u32),
//!     Dispatch::target(2_u32),
//!     Dispatch::bubble(1_u32),
//! ];
//!
//! let mut seen = Vec::new();
//! let stop_at = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push((d.phase, d.node));
//!     if d.phase == Phase::Target { Outcome::Stop } else { Outcome::Continue }
//! });
//!
//! assert_eq!(stop_at, Some(&Dispatch::target(2)));
//! assert_eq!(seen, [(Phase::Capture, 1), (Phase::Target, 2)]);
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// Returns `None` if the full sequence was visited, or the entry at which a
/// handler returned [`Outcome::Stop`].
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    seq.iter().find(|&d| handler(d, event) == Outcome::Stop)
}

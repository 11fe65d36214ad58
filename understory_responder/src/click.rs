// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click recognition from raw press/release pairs.
//!
//! A release on the pressed node always produces a click. A release somewhere
//! else still counts when the pointer stayed within the configured distance of
//! the press position and the release came within the configured time; this
//! keeps clicks working on controls that move or restyle while pressed.
//!
//! ```
//! use kurbo::Point;
//! use understory_responder::click::ClickTracker;
//!
//! let mut clicks: ClickTracker<u32> = ClickTracker::new();
//! clicks.on_down(7, 0, Point::new(10.0, 10.0), 1_000);
//! assert_eq!(clicks.on_up(&7, 0, Point::new(50.0, 50.0), 1_500), Some((7, 0)));
//!
//! // A different button never completes the press.
//! clicks.on_down(7, 0, Point::new(10.0, 10.0), 2_000);
//! assert_eq!(clicks.on_up(&7, 2, Point::new(10.0, 10.0), 2_010), None);
//! ```

use kurbo::Point;

use crate::types::Button;

/// Press/release tracker for a single pointer.
#[derive(Clone, Debug)]
pub struct ClickTracker<K> {
    press: Option<Press<K>>,
    /// Maximum pointer travel (press → release) for a click on a different node.
    /// `None` disables the spatial check.
    pub distance_threshold: Option<f64>,
    /// Maximum press duration in milliseconds for a click on a different node.
    /// `None` disables the temporal check.
    pub time_threshold: Option<u64>,
}

#[derive(Clone, Debug)]
struct Press<K> {
    target: K,
    button: Button,
    position: Point,
    time: u64,
    moved_too_far: bool,
}

impl<K: PartialEq + Clone> Default for ClickTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq + Clone> ClickTracker<K> {
    /// Tracker with a 5px / 100ms tolerance for releases off the pressed node.
    pub fn new() -> Self {
        Self::with_thresholds(Some(5.0), Some(100))
    }

    /// Tracker with explicit tolerances.
    ///
    /// With both set to `None` only same-node releases click.
    pub fn with_thresholds(distance_threshold: Option<f64>, time_threshold: Option<u64>) -> Self {
        Self {
            press: None,
            distance_threshold,
            time_threshold,
        }
    }

    /// Record a press. Replaces any press still in flight.
    pub fn on_down(&mut self, target: K, button: Button, position: Point, time: u64) {
        self.press = Some(Press {
            target,
            button,
            position,
            time,
            moved_too_far: false,
        });
    }

    /// Record pointer travel while pressed.
    pub fn on_move(&mut self, position: Point) {
        let Some(threshold) = self.distance_threshold else {
            return;
        };
        if let Some(press) = &mut self.press
            && press.position.distance(position) > threshold
        {
            press.moved_too_far = true;
        }
    }

    /// Record a release. Returns the pressed node and button if this completes a click.
    pub fn on_up(&mut self, target: &K, button: Button, position: Point, time: u64) -> Option<(K, Button)> {
        let press = self.press.take()?;
        if press.button != button {
            return None;
        }
        if press.target == *target {
            return Some((press.target, button));
        }
        if press.moved_too_far {
            return None;
        }
        if self.distance_threshold.is_none() && self.time_threshold.is_none() {
            return None;
        }
        let near = self
            .distance_threshold
            .is_none_or(|t| press.position.distance(position) <= t);
        let quick = self
            .time_threshold
            .is_none_or(|t| time.saturating_sub(press.time) <= t);
        (near && quick).then_some((press.target, button))
    }

    /// Whether a press is in flight.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Drop the press in flight if its node is rejected by `keep`.
    pub fn cancel_if(&mut self, keep: impl FnOnce(&K) -> bool) {
        if self.press.as_ref().is_some_and(|p| !keep(&p.target)) {
            self.press = None;
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported when attaching a dropdown.

use alloc::string::String;
use core::fmt;

/// Why a dropdown could not be attached.
///
/// Attaching never mutates the document when it fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// The wrapper id does not refer to a live element.
    StaleContainer,
    /// No descendant of the wrapper carries the toggle class.
    MissingToggle {
        /// The class that was searched for.
        class: String,
    },
    /// No descendant of the wrapper carries the menu class.
    MissingMenu {
        /// The class that was searched for.
        class: String,
    },
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleContainer => f.write_str("dropdown wrapper is not a live element"),
            Self::MissingToggle { class } => {
                write!(f, "no toggle element with class `{class}` inside the wrapper")
            }
            Self::MissingMenu { class } => {
                write!(f, "no menu element with class `{class}` inside the wrapper")
            }
        }
    }
}

impl core::error::Error for AttachError {}

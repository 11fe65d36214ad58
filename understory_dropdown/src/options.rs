// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options.

use alloc::borrow::Cow;

use understory_responder::types::EventKind;

/// Class identifying the toggle element when none is configured.
pub const DEFAULT_TOGGLE_CLASS: &str = "js-dropdown-toggle";

/// Class identifying the menu element when none is configured.
pub const DEFAULT_MENU_CLASS: &str = "js-dropdown-menu";

/// What reveals the menu.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Trigger {
    /// A primary-button click on the toggle toggles the menu.
    #[default]
    Click,
    /// Pointer over the wrapper, or focus on the toggle, shows the menu;
    /// pointer leaving the wrapper hides it.
    Hover,
}

impl From<bool> for Trigger {
    /// `true` means expand on hover.
    fn from(expand_on_hover: bool) -> Self {
        if expand_on_hover { Self::Hover } else { Self::Click }
    }
}

/// Which focus-loss event closes the menu.
///
/// Both carry the element receiving focus as related target; `FocusOut` is
/// the bubbling variant and the one hosts are expected to support.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FocusLoss {
    /// `focusout`.
    #[default]
    FocusOut,
    /// `blur`, for hosts without `focusout`.
    Blur,
}

impl FocusLoss {
    pub(crate) fn event_kind(self) -> EventKind {
        match self {
            Self::FocusOut => EventKind::FocusOut,
            Self::Blur => EventKind::Blur,
        }
    }
}

/// Options for [`Dropdown::attach`](crate::Dropdown::attach).
///
/// ```
/// use understory_dropdown::{DropdownOptions, Trigger};
///
/// let options = DropdownOptions::default()
///     .trigger(Trigger::Hover)
///     .menu_class("site-nav__menu");
/// assert_eq!(options.toggle_class, "js-dropdown-toggle");
/// assert_eq!(options.menu_class, "site-nav__menu");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownOptions {
    /// Trigger mode.
    pub trigger: Trigger,
    /// Class of the toggle element.
    pub toggle_class: Cow<'static, str>,
    /// Class of the menu element.
    pub menu_class: Cow<'static, str>,
    /// Focus-loss event kind.
    pub focus_loss: FocusLoss,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            trigger: Trigger::default(),
            toggle_class: Cow::Borrowed(DEFAULT_TOGGLE_CLASS),
            menu_class: Cow::Borrowed(DEFAULT_MENU_CLASS),
            focus_loss: FocusLoss::default(),
        }
    }
}

impl DropdownOptions {
    /// Set the trigger mode.
    pub fn trigger(mut self, trigger: impl Into<Trigger>) -> Self {
        self.trigger = trigger.into();
        self
    }

    /// Set the toggle class.
    pub fn toggle_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.toggle_class = class.into();
        self
    }

    /// Set the menu class.
    pub fn menu_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.menu_class = class.into();
        self
    }

    /// Set the focus-loss event kind.
    pub fn focus_loss(mut self, focus_loss: FocusLoss) -> Self {
        self.focus_loss = focus_loss;
        self
    }
}

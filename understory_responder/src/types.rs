// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event vocabulary shared by the router, dispatcher and host.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::any::Any;

use kurbo::Point;
use understory_dom::NodeId;

/// Propagation phase of a dispatch step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root → parent of target.
    Capture,
    /// The target itself.
    Target,
    /// Parent of target → root.
    Bubble,
}

/// Handler result controlling propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep walking the sequence.
    Continue,
    /// Abort propagation after this step.
    Stop,
}

/// One step of a responder sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node whose listeners run at this step.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// Capture step at `node`.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// Target step at `node`.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// Bubble step at `node`.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Parent lookup used to reconstruct root → target paths.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` for roots and unknown nodes.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl ParentLookup<NodeId> for understory_dom::Document {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        understory_dom::Document::parent_of(self, *node)
    }
}

/// Pointer button index, DOM numbering (0 = primary, 1 = auxiliary, 2 = secondary).
pub type Button = u8;

/// Primary (usually left) pointer button.
pub const PRIMARY_BUTTON: Button = 0;

/// Kind of an event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Recognized click.
    Click,
    /// Pointer entered a node's subtree. Does not bubble.
    MouseEnter,
    /// Pointer left a node's subtree. Does not bubble.
    MouseLeave,
    /// Node received focus. Does not bubble.
    Focus,
    /// Node lost focus. Does not bubble.
    Blur,
    /// Node received focus (bubbling variant).
    FocusIn,
    /// Node lost focus (bubbling variant).
    FocusOut,
    /// Key pressed while a node had focus.
    KeyDown,
    /// Application-defined event, e.g. `dropdown:show`.
    Custom(Cow<'static, str>),
}

impl EventKind {
    /// Application-defined event kind.
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(name.into())
    }

    /// Whether events of this kind have a bubble phase.
    pub fn bubbles(&self) -> bool {
        !matches!(
            self,
            Self::MouseEnter | Self::MouseLeave | Self::Focus | Self::Blur
        )
    }

    /// Whether `prevent_default` has an effect on events of this kind.
    pub fn cancelable(&self) -> bool {
        matches!(self, Self::Click | Self::KeyDown | Self::Custom(_))
    }

    /// DOM event name.
    pub fn name(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::KeyDown => "keydown",
            Self::Custom(name) => name.as_ref(),
        }
    }
}

/// Logical key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Space bar.
    Space,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any printable character.
    Char(char),
}

impl Key {
    /// Map a legacy `keyCode` to a [`Key`].
    ///
    /// Letters map to their lowercase character. Unknown codes return `None`.
    pub fn from_key_code(code: u32) -> Option<Self> {
        Some(match code {
            9 => Self::Tab,
            13 => Self::Enter,
            27 => Self::Escape,
            32 => Self::Space,
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            48..=57 => Self::Char(char::from_digit(code - 48, 10)?),
            65..=90 => Self::Char(char::from_u32(code + 32)?),
            _ => return None,
        })
    }
}

/// An event travelling through the host.
///
/// Handlers receive `&mut Event`; `phase` and `current_target` are updated by
/// the host before each listener runs.
#[derive(Clone, Debug)]
pub struct Event {
    /// Kind of event.
    pub kind: EventKind,
    /// Node the event is dispatched at.
    pub target: NodeId,
    /// Node whose listener is currently running.
    pub current_target: Option<NodeId>,
    /// Current propagation phase.
    pub phase: Phase,
    /// Secondary node: the other side of a focus move or hover transition.
    pub related_target: Option<NodeId>,
    /// Pointer button for click events.
    pub button: Option<Button>,
    /// Pointer position for pointer-driven events.
    pub position: Option<Point>,
    /// Key for keyboard events.
    pub key: Option<Key>,
    detail: Option<Rc<dyn Any>>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event of `kind` aimed at `target`.
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            phase: Phase::Target,
            related_target: None,
            button: None,
            position: None,
            key: None,
            detail: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Set the related target.
    pub fn with_related(mut self, related: Option<NodeId>) -> Self {
        self.related_target = related;
        self
    }

    /// Set the pointer button.
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = Some(button);
        self
    }

    /// Set the pointer position.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the key.
    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Attach a typed detail payload.
    pub fn with_detail<T: Any>(mut self, detail: T) -> Self {
        self.detail = Some(Rc::new(detail));
        self
    }

    /// Typed detail payload, if one of type `T` is attached.
    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.detail.as_deref()?.downcast_ref()
    }

    /// Suppress the default action. Ignored for non-cancelable kinds.
    pub fn prevent_default(&mut self) {
        if self.kind.cancelable() {
            self.default_prevented = true;
        }
    }

    /// Whether the default action was suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop propagation once the listeners of the current node have run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether propagation was stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

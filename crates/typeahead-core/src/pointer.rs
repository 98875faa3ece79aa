//! Process-wide pointer events.
//!
//! Some control behavior depends on pointer activity outside the control's
//! own regions, most notably closing a dropdown when the user presses the
//! mouse anywhere else. Rather than hooking a global singleton, a control is
//! handed a [`PointerEventSource`] at construction, subscribes once, and
//! unsubscribes when it is dropped.
//!
//! [`PointerEventBus`] is the in-process implementation: the host forwards
//! every pointer event it receives to [`PointerEventBus::dispatch`].
//!
//! # Example
//!
//! ```
//! use typeahead_core::{MouseButton, Point, PointerEvent, PointerEventBus, PointerEventSource};
//!
//! let bus = PointerEventBus::new();
//! let id = bus.subscribe(Box::new(|event| {
//!     println!("pointer {:?} at {:?}", event.kind, event.position);
//! }));
//!
//! bus.dispatch(&PointerEvent::down(Point::new(10.0, 20.0), MouseButton::Left));
//! bus.unsubscribe(id).unwrap();
//! ```

use crate::error::{Result, SignalError};
use crate::logging::targets;
use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Geometry
// ============================================================================

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.right()
            && point.y >= self.origin.y
            && point.y < self.bottom()
    }
}

// ============================================================================
// Events
// ============================================================================

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// A button was pressed.
    Down,
    /// A button was released.
    Up,
    /// The pointer moved.
    Move,
}

/// A pointer event in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The kind of event.
    pub kind: PointerEventKind,
    /// Position in window coordinates.
    pub position: Point,
    /// The button involved, if any.
    pub button: Option<MouseButton>,
}

impl PointerEvent {
    /// A button press at `position`.
    pub fn down(position: Point, button: MouseButton) -> Self {
        Self {
            kind: PointerEventKind::Down,
            position,
            button: Some(button),
        }
    }

    /// A button release at `position`.
    pub fn up(position: Point, button: MouseButton) -> Self {
        Self {
            kind: PointerEventKind::Up,
            position,
            button: Some(button),
        }
    }

    /// A pointer move to `position`.
    pub fn moved(position: Point) -> Self {
        Self {
            kind: PointerEventKind::Move,
            position,
            button: None,
        }
    }

    /// Whether this is a button press.
    pub fn is_down(&self) -> bool {
        self.kind == PointerEventKind::Down
    }
}

/// Handler invoked for every pointer event delivered by a source.
pub type PointerHandler = Box<dyn Fn(&PointerEvent) + Send + Sync>;

/// A subscribable source of window-wide pointer events.
pub trait PointerEventSource: Send + Sync {
    /// Register a handler. Returns an ID for [`unsubscribe`](Self::unsubscribe).
    fn subscribe(&self, handler: PointerHandler) -> ConnectionId;

    /// Remove a previously registered handler.
    fn unsubscribe(&self, id: ConnectionId) -> Result<()>;
}

/// An in-process pointer event source backed by a [`Signal`].
#[derive(Default)]
pub struct PointerEventBus {
    events: Signal<PointerEvent>,
}

impl PointerEventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            events: Signal::new(),
        }
    }

    /// Deliver an event to every subscriber.
    pub fn dispatch(&self, event: &PointerEvent) {
        tracing::trace!(target: targets::POINTER, kind = ?event.kind, "dispatching pointer event");
        self.events.emit(*event);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.events.connection_count()
    }
}

impl PointerEventSource for PointerEventBus {
    fn subscribe(&self, handler: PointerHandler) -> ConnectionId {
        self.events.connect(handler)
    }

    fn unsubscribe(&self, id: ConnectionId) -> Result<()> {
        if self.events.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection.into())
        }
    }
}

impl std::fmt::Debug for PointerEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerEventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

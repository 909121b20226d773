//! Interaction state
//!
//! The widget has a single zoom slot. Its lifecycle is the explicit
//! [`ZoomState`] machine below; `shown`, `locked` and `released` are derived
//! from it rather than stored, so no other combination can exist.
//!
//! ```text
//!            open                 transition-end
//!  Closed ─────────▶ Opening ───────────────────▶ Open ◀──────────────┐
//!    ▲                                           │  │ grab/move       │
//!    │ transition-end                      close │  ▼                 │ transition-end
//!    └──────────── Closing ◀───────────────────────Grabbed ──────▶ Releasing
//!                                                       release
//! ```

use crate::math::Vec2;
use crate::types::TimerId;

/// Lifecycle of the zoom slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomState {
    /// Nothing zoomed
    #[default]
    Closed,
    /// Zoom-in transition running
    Opening,
    /// Zoomed and at rest (a pending press may be about to grab)
    Open,
    /// Held by the pointer with extra zoom
    Grabbed,
    /// Transition back from a grab to the open position
    Releasing,
    /// Zoom-out transition running
    Closing,
}

impl ZoomState {
    /// A target is attached (from `open` until the close transition ends)
    pub fn is_shown(&self) -> bool {
        !matches!(self, ZoomState::Closed)
    }

    /// A locking transition is running; open/close/grab/move/release are refused
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            ZoomState::Opening | ZoomState::Releasing | ZoomState::Closing
        )
    }

    /// Not being held by the pointer
    pub fn is_released(&self) -> bool {
        !matches!(self, ZoomState::Grabbed | ZoomState::Releasing)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZoomState::Closed => "closed",
            ZoomState::Opening => "opening",
            ZoomState::Open => "open",
            ZoomState::Grabbed => "grabbed",
            ZoomState::Releasing => "releasing",
            ZoomState::Closing => "closing",
        }
    }
}

/// A press waiting for the press delay before it becomes a grab
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingPress {
    pub timer: TimerId,
    pub position: Vec2,
}

/// Mutable per-instance interaction state
#[derive(Clone, Debug, Default)]
pub struct ZoomSession {
    pub state: ZoomState,
    /// Scroll offset when scroll tracking started
    pub last_scroll_position: Option<Vec2>,
    pub press: Option<PendingPress>,
    /// Whether the resize listener was attached by the current open
    pub resize_listener: bool,
    /// Whether press/drag listeners are attached
    pub grab_listeners: bool,
}

impl ZoomSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressing(&self) -> bool {
        self.press.is_some()
    }
}

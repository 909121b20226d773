//! Core type definitions shared across the crate

/// Delay before a press turns into a grab, in milliseconds
pub const PRESS_DELAY_MS: u32 = 200;

/// Delay between warming the original image and swapping it in, in milliseconds
pub const SOURCE_SWAP_DELAY_MS: u32 = 50;

/// Slack added to the transition duration before the fallback timer completes
/// a transition whose end signal never arrived, in milliseconds
pub const TRANSITION_FALLBACK_GRACE_MS: u32 = 100;

/// Identifier for a one-shot timer scheduled through the host
///
/// Timer IDs are allocated by the core and are unique for the lifetime of a
/// `Zooming` instance. The host reports expiry with `ZoomEvent::TimerFired`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Cursor values applied to the target and the document body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    ZoomIn,
    ZoomOut,
    Grab,
    Move,
}

impl Cursor {
    /// CSS keyword for this cursor
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Default => "auto",
            Cursor::ZoomIn => "zoom-in",
            Cursor::ZoomOut => "zoom-out",
            Cursor::Grab => "grab",
            Cursor::Move => "move",
        }
    }
}

/// Keyboard/mouse modifier state carried by pointer events
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub meta: bool,
    pub ctrl: bool,
}

impl Modifiers {
    /// Meta (Cmd) or Ctrl held: the platform "open in new tab" gesture
    pub fn is_new_tab_gesture(&self) -> bool {
        self.meta || self.ctrl
    }
}

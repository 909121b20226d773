//! Events delivered by the host and the result of handling them

use crate::math::Vec2;
use crate::types::{Modifiers, TimerId};

/// Left mouse button (`MouseEvent.button`)
pub const BUTTON_LEFT: i16 = 0;

/// Key code of Escape for browsers that do not fill `key`
pub const KEY_CODE_ESCAPE: u32 = 27;

/// Something that happened in the document
#[derive(Clone, Debug, PartialEq)]
pub enum ZoomEvent<E> {
    /// Click on a listened image or on the overlay
    Click { target: E, modifiers: Modifiers },
    MouseDown {
        button: i16,
        position: Vec2,
        modifiers: Modifiers,
    },
    MouseMove { position: Vec2 },
    MouseUp { button: i16, modifiers: Modifiers },
    /// Position of the first touch point
    TouchStart { position: Vec2 },
    TouchMove { position: Vec2 },
    /// `remaining` is the number of touch points still on the target
    TouchEnd { remaining: u32 },
    KeyDown { key: String, key_code: u32 },
    Scroll,
    Resize,
    /// `transitionend` reached a listener on `target`
    TransitionEnd { target: E },
    TimerFired(TimerId),
    /// An image requested with a notify target finished loading
    ImageLoaded { target: E },
}

impl<E> ZoomEvent<E> {
    pub fn name(&self) -> &'static str {
        match self {
            ZoomEvent::Click { .. } => "click",
            ZoomEvent::MouseDown { .. } => "mousedown",
            ZoomEvent::MouseMove { .. } => "mousemove",
            ZoomEvent::MouseUp { .. } => "mouseup",
            ZoomEvent::TouchStart { .. } => "touchstart",
            ZoomEvent::TouchMove { .. } => "touchmove",
            ZoomEvent::TouchEnd { .. } => "touchend",
            ZoomEvent::KeyDown { .. } => "keydown",
            ZoomEvent::Scroll => "scroll",
            ZoomEvent::Resize => "resize",
            ZoomEvent::TransitionEnd { .. } => "transitionend",
            ZoomEvent::TimerFired(_) => "timer",
            ZoomEvent::ImageLoaded { .. } => "imageloaded",
        }
    }
}

/// Whether `key`/`key_code` identify the Escape key
pub fn is_escape(key: &str, key_code: u32) -> bool {
    key == "Escape" || key == "Esc" || key_code == KEY_CODE_ESCAPE
}

/// Outcome of handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// The event did not concern the widget
    Ignored,
    /// Handled; the default browser action may proceed
    Handled,
    /// Handled; the host must call `preventDefault()`
    PreventDefault,
}

impl InputResult {
    pub fn prevents_default(&self) -> bool {
        matches!(self, InputResult::PreventDefault)
    }
}

/// Element argument of `listen`/`open`: a CSS selector or an element
#[derive(Clone, Debug, PartialEq)]
pub enum TargetRef<E> {
    Selector(String),
    Element(E),
}

impl<E> From<&str> for TargetRef<E> {
    fn from(selector: &str) -> Self {
        TargetRef::Selector(selector.to_string())
    }
}

impl<E> From<String> for TargetRef<E> {
    fn from(selector: String) -> Self {
        TargetRef::Selector(selector)
    }
}

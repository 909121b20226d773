//! Platform abstraction for the DOM
//!
//! The zoom core never touches `document` or `window` directly. Everything it
//! needs from the browser goes through [`DomHost`], which lets the state
//! machine run natively against [`MemoryDom`](crate::MemoryDom) in tests and
//! against `web-sys` in the browser crate.
//!
//! Hosts are passive: they perform the mutation they are asked for and later
//! report what happened (clicks, timer expiry, transition end) by feeding
//! [`ZoomEvent`](crate::ZoomEvent)s to `Zooming::handle_event`.

use crate::math::{Rect, Size, Vec2};
use crate::style::StyleProp;
use crate::types::TimerId;

/// Where a listener is attached
#[derive(Clone, Debug, PartialEq)]
pub enum ListenTarget<E> {
    /// `document`
    Document,
    /// `window`
    Window,
    /// A specific element
    Element(E),
}

/// DOM event types the core subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    Scroll,
    KeyDown,
    Resize,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TransitionEnd,
}

impl EventKind {
    /// Press/drag listeners attached to the document while a target is open
    pub const GRAB: [EventKind; 6] = [
        EventKind::MouseDown,
        EventKind::MouseMove,
        EventKind::MouseUp,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
    ];

    /// DOM event type name
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::KeyDown => "keydown",
            EventKind::Resize => "resize",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::TransitionEnd => "transitionend",
        }
    }
}

/// Capabilities the zoom core requires from the document it runs in.
///
/// `Element` is an opaque handle. Equality must mean "same DOM node".
pub trait DomHost {
    /// Handle to a DOM element
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// The document body
    fn body(&self) -> Self::Element;

    /// `document.createElement(tag)`, detached
    fn create_element(&mut self, tag: &str) -> Self::Element;

    /// First element matching `selector`
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Upper-case tag name (`IMG`, `A`, `DIV`)
    fn tag_name(&self, el: &Self::Element) -> String;

    /// Parent element, if attached
    fn parent(&self, el: &Self::Element) -> Option<Self::Element>;

    /// `parent.appendChild(child)`
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// `parent.removeChild(child)`; a no-op if `child` is not a child of `parent`
    fn remove_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Shallow clone (`cloneNode(false)`), detached
    fn clone_node(&mut self, el: &Self::Element) -> Self::Element;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, el: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, el: &Self::Element, name: &str);

    /// Inline style value, empty string when unset
    fn style(&self, el: &Self::Element, prop: StyleProp) -> String;

    fn set_style(&mut self, el: &Self::Element, prop: StyleProp, value: &str);

    /// Force a synchronous layout (reading `offsetWidth`) so the next style
    /// change starts a transition instead of being folded into this frame
    fn force_layout(&mut self, el: &Self::Element);

    /// `getBoundingClientRect()`
    fn bounding_rect(&self, el: &Self::Element) -> Rect;

    /// Intrinsic image size (`naturalWidth`/`naturalHeight`), zero if unknown
    fn natural_size(&self, el: &Self::Element) -> Size;

    /// Visible viewport: `min(documentElement.client*, window.inner*)`
    fn viewport_size(&self) -> Size;

    /// Current page scroll offset
    fn scroll_position(&self) -> Vec2;

    /// Add (`active = true`) or remove a non-passive listener. Adding twice is
    /// a no-op, as with `addEventListener` and the same handler.
    fn set_listener(&mut self, target: ListenTarget<Self::Element>, kind: EventKind, active: bool);

    /// Schedule `TimerFired(id)` after `delay_ms`
    fn set_timeout(&mut self, id: TimerId, delay_ms: u32);

    /// Cancel a scheduled timer; unknown or already fired IDs are ignored
    fn clear_timeout(&mut self, id: TimerId);

    /// Start loading `src` into the browser cache. When `notify` is given the
    /// host reports completion with `ImageLoaded { target: notify }`.
    fn load_image(&mut self, src: &str, notify: Option<&Self::Element>);

    /// Open `url` in a new browsing context
    fn open_in_new_context(&mut self, url: &str);
}

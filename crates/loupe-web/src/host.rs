//! `DomHost` over `web-sys`
//!
//! Listener closures are created once per target and event type and kept for
//! the lifetime of the host; detaching only calls `removeEventListener`, so a
//! closure is never freed while it may be running.

use std::collections::HashMap;
use std::rc::Weak;

use loupe_core::{DomHost, EventKind, ListenTarget, Rect, Size, StyleProp, TimerId, Vec2, ZoomEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement,
    Window,
};

use crate::dispatch::Shared;
use crate::events::to_zoom_event;
use crate::log;

struct Listener {
    target: ListenTarget<Element>,
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
    attached: bool,
}

/// The browser document the widget runs in
pub struct WebHost {
    window: Window,
    document: Document,
    body: Element,
    shared: Weak<Shared>,
    listeners: Vec<Listener>,
    timers: HashMap<TimerId, i32>,
}

impl WebHost {
    pub(crate) fn new(shared: Weak<Shared>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("window has no document")?;
        let body: Element = document.body().ok_or("document has no body")?.into();
        Ok(Self {
            window,
            document,
            body,
            shared,
            listeners: Vec::new(),
            timers: HashMap::new(),
        })
    }

    /// Drop the handle of a timer that has fired
    pub(crate) fn forget_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    /// Number of listeners currently attached
    pub fn attached_listeners(&self) -> usize {
        self.listeners.iter().filter(|l| l.attached).count()
    }

    fn event_target(&self, target: &ListenTarget<Element>) -> EventTarget {
        match target {
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Element(el) => el.clone().into(),
        }
    }

    fn make_listener(&self, target: &ListenTarget<Element>, kind: EventKind) -> Closure<dyn FnMut(Event)> {
        let shared = self.shared.clone();
        let bound = match target {
            ListenTarget::Element(el) => Some(el.clone()),
            _ => None,
        };
        Closure::new(move |event: Event| {
            let Some(zoom_event) = to_zoom_event(kind, &event, bound.as_ref()) else {
                return;
            };
            let Some(shared) = shared.upgrade() else {
                return;
            };
            if shared.dispatch(zoom_event) {
                event.prevent_default();
            }
        })
    }
}

impl DomHost for WebHost {
    type Element = Element;

    fn body(&self) -> Element {
        self.body.clone()
    }

    fn create_element(&mut self, tag: &str) -> Element {
        self.document
            .create_element(tag)
            .expect_throw("createElement rejected a tag name")
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            log(&format!("[loupe] invalid selector '{}'", selector));
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn tag_name(&self, el: &Element) -> String {
        el.tag_name()
    }

    fn parent(&self, el: &Element) -> Option<Element> {
        el.parent_element()
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log(&format!("[loupe] appendChild failed: {:?}", err));
        }
    }

    fn remove_child(&mut self, parent: &Element, child: &Element) {
        if child.parent_element().as_ref() != Some(parent) {
            return;
        }
        if let Err(err) = parent.remove_child(child) {
            log(&format!("[loupe] removeChild failed: {:?}", err));
        }
    }

    fn clone_node(&mut self, el: &Element) -> Element {
        match el.clone_node().map(|node| node.dyn_into::<Element>()) {
            Ok(Ok(copy)) => copy,
            _ => {
                let tag = el.tag_name();
                self.create_element(&tag)
            }
        }
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&mut self, el: &Element, name: &str, value: &str) {
        if let Err(err) = el.set_attribute(name, value) {
            log(&format!("[loupe] setAttribute({}) failed: {:?}", name, err));
        }
    }

    fn remove_attribute(&mut self, el: &Element, name: &str) {
        let _ = el.remove_attribute(name);
    }

    fn style(&self, el: &Element, prop: StyleProp) -> String {
        el.dyn_ref::<HtmlElement>()
            .and_then(|html| html.style().get_property_value(prop.css_name()).ok())
            .unwrap_or_default()
    }

    fn set_style(&mut self, el: &Element, prop: StyleProp, value: &str) {
        let Some(html) = el.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = html.style();
        let result = if value.is_empty() {
            style.remove_property(prop.css_name()).map(|_| ())
        } else {
            style.set_property(prop.css_name(), value)
        };
        if let Err(err) = result {
            log(&format!("[loupe] style {} failed: {:?}", prop.css_name(), err));
        }
    }

    fn force_layout(&mut self, el: &Element) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            // Reading offsetWidth flushes pending style changes
            let _ = html.offset_width();
        }
    }

    fn bounding_rect(&self, el: &Element) -> Rect {
        let rect = el.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn natural_size(&self, el: &Element) -> Size {
        el.dyn_ref::<HtmlImageElement>()
            .map(|img| Size::new(f64::from(img.natural_width()), f64::from(img.natural_height())))
            .unwrap_or_default()
    }

    fn viewport_size(&self) -> Size {
        let inner = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
        let inner_width = inner(self.window.inner_width()).unwrap_or(f64::INFINITY);
        let inner_height = inner(self.window.inner_height()).unwrap_or(f64::INFINITY);
        let (client_width, client_height) = self
            .document
            .document_element()
            .map(|root| (f64::from(root.client_width()), f64::from(root.client_height())))
            .unwrap_or((inner_width, inner_height));
        Size::new(client_width.min(inner_width), client_height.min(inner_height))
    }

    fn scroll_position(&self) -> Vec2 {
        Vec2::new(
            self.window.page_x_offset().unwrap_or(0.0),
            self.window.page_y_offset().unwrap_or(0.0),
        )
    }

    fn set_listener(&mut self, target: ListenTarget<Element>, kind: EventKind, active: bool) {
        let existing = self
            .listeners
            .iter()
            .position(|l| l.kind == kind && l.target == target);
        let index = match existing {
            Some(index) => index,
            None if !active => return,
            None => {
                let closure = self.make_listener(&target, kind);
                self.listeners.push(Listener {
                    target,
                    kind,
                    closure,
                    attached: false,
                });
                self.listeners.len() - 1
            }
        };

        if self.listeners[index].attached == active {
            return;
        }
        let event_target = self.event_target(&self.listeners[index].target);
        let listener = &mut self.listeners[index];
        let callback = listener.closure.as_ref().unchecked_ref();
        let result = if active {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            event_target.add_event_listener_with_callback_and_add_event_listener_options(
                kind.dom_name(),
                callback,
                &options,
            )
        } else {
            event_target.remove_event_listener_with_callback(kind.dom_name(), callback)
        };
        match result {
            Ok(()) => listener.attached = active,
            Err(err) => log(&format!("[loupe] {} listener: {:?}", kind.dom_name(), err)),
        }
    }

    fn set_timeout(&mut self, id: TimerId, delay_ms: u32) {
        let shared = self.shared.clone();
        let callback = Closure::once_into_js(move || {
            if let Some(shared) = shared.upgrade() {
                shared.timer_fired(id);
            }
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => {
                self.timers.insert(id, handle);
            }
            Err(err) => log(&format!("[loupe] setTimeout failed: {:?}", err)),
        }
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if let Some(handle) = self.timers.remove(&id) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn load_image(&mut self, src: &str, notify: Option<&Element>) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                log(&format!("[loupe] cannot preload {}: {:?}", src, err));
                return;
            }
        };
        if let Some(target) = notify.cloned() {
            let shared = self.shared.clone();
            let onload = Closure::once_into_js(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.dispatch(ZoomEvent::ImageLoaded { target });
                }
            });
            image.set_onload(Some(onload.unchecked_ref()));
        }
        image.set_src(src);
    }

    fn open_in_new_context(&mut self, url: &str) {
        if let Err(err) = self.window.open_with_url_and_target(url, "_blank") {
            log(&format!("[loupe] window.open failed: {:?}", err));
        }
    }
}

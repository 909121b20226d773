//! DOM event conversion

use loupe_core::{EventKind, Modifiers, Vec2, ZoomEvent};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent, TouchEvent};

/// Translate a DOM event caught by a `kind` listener. `bound` is the element
/// the listener is attached to (the `currentTarget`), if any.
pub fn to_zoom_event(kind: EventKind, event: &Event, bound: Option<&Element>) -> Option<ZoomEvent<Element>> {
    let zoom_event = match kind {
        EventKind::Click => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            ZoomEvent::Click {
                target: bound?.clone(),
                modifiers: mouse_modifiers(mouse),
            }
        }
        EventKind::MouseDown => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            ZoomEvent::MouseDown {
                button: mouse.button(),
                position: client_position(mouse),
                modifiers: mouse_modifiers(mouse),
            }
        }
        EventKind::MouseMove => ZoomEvent::MouseMove {
            position: client_position(event.dyn_ref::<MouseEvent>()?),
        },
        EventKind::MouseUp => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            ZoomEvent::MouseUp {
                button: mouse.button(),
                modifiers: mouse_modifiers(mouse),
            }
        }
        EventKind::TouchStart => ZoomEvent::TouchStart {
            position: first_touch(event.dyn_ref::<TouchEvent>()?)?,
        },
        EventKind::TouchMove => ZoomEvent::TouchMove {
            position: first_touch(event.dyn_ref::<TouchEvent>()?)?,
        },
        EventKind::TouchEnd => ZoomEvent::TouchEnd {
            remaining: event.dyn_ref::<TouchEvent>()?.touches().length(),
        },
        EventKind::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            ZoomEvent::KeyDown {
                key: key.key(),
                key_code: key.key_code(),
            }
        }
        EventKind::Scroll => ZoomEvent::Scroll,
        EventKind::Resize => ZoomEvent::Resize,
        EventKind::TransitionEnd => ZoomEvent::TransitionEnd {
            target: bound?.clone(),
        },
    };
    Some(zoom_event)
}

fn mouse_modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        meta: event.meta_key(),
        ctrl: event.ctrl_key(),
    }
}

fn client_position(event: &MouseEvent) -> Vec2 {
    Vec2::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn first_touch(event: &TouchEvent) -> Option<Vec2> {
    let touch = event.touches().get(0)?;
    Some(Vec2::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

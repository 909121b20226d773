//! Input mapping
//!
//! Translates [`ZoomEvent`]s into zoom operations. Rejected operations are
//! expected here (a click during a transition, a scroll after the close has
//! started) and are dropped after being logged by the controller.

use tracing::{debug, trace};

use crate::events::{is_escape, InputResult, TargetRef, ZoomEvent, BUTTON_LEFT};
use crate::host::DomHost;
use crate::math::Vec2;
use crate::options::HookKind;
use crate::session::PendingPress;
use crate::source::original_source;
use crate::types::{Modifiers, TimerId, PRESS_DELAY_MS};
use crate::zooming::Zooming;

impl<H: DomHost> Zooming<H> {
    /// Feed one event from the host. The caller must `preventDefault()` the
    /// DOM event when the result says so.
    pub fn handle_event(&mut self, event: ZoomEvent<H::Element>) -> InputResult {
        trace!(event = event.name(), state = self.state().name(), "event");
        match event {
            ZoomEvent::Click { target, modifiers } => self.on_click(target, modifiers),
            ZoomEvent::MouseDown {
                button,
                position,
                modifiers,
            } => {
                if !self.session.grab_listeners
                    || button != BUTTON_LEFT
                    || modifiers.is_new_tab_gesture()
                {
                    return InputResult::Ignored;
                }
                self.arm_press(position);
                InputResult::PreventDefault
            }
            ZoomEvent::TouchStart { position } => {
                if !self.session.grab_listeners {
                    return InputResult::Ignored;
                }
                self.arm_press(position);
                InputResult::PreventDefault
            }
            ZoomEvent::MouseMove { position } | ZoomEvent::TouchMove { position } => {
                if !self.session.grab_listeners || self.is_released() {
                    return InputResult::Ignored;
                }
                let _ = self.move_to(position.x, position.y, None, None);
                InputResult::Handled
            }
            ZoomEvent::MouseUp { button, modifiers } => {
                if !self.session.grab_listeners
                    || button != BUTTON_LEFT
                    || modifiers.is_new_tab_gesture()
                {
                    return InputResult::Ignored;
                }
                self.end_press();
                InputResult::Handled
            }
            ZoomEvent::TouchEnd { remaining } => {
                if !self.session.grab_listeners || remaining > 0 {
                    return InputResult::Ignored;
                }
                self.end_press();
                InputResult::Handled
            }
            ZoomEvent::KeyDown { key, key_code } => {
                if !self.is_shown() || !is_escape(&key, key_code) {
                    return InputResult::Ignored;
                }
                if self.is_released() {
                    let _ = self.close(None);
                } else {
                    let _ = self.release_then_close();
                }
                InputResult::Handled
            }
            ZoomEvent::Scroll => self.on_scroll(),
            ZoomEvent::Resize => {
                if !self.session.resize_listener {
                    return InputResult::Ignored;
                }
                let _ = self.close(None);
                InputResult::Handled
            }
            ZoomEvent::TransitionEnd { target } => {
                if self.pending.is_empty() || self.target_element() != Some(&target) {
                    return InputResult::Ignored;
                }
                self.complete_transition();
                InputResult::Handled
            }
            ZoomEvent::TimerFired(id) => self.on_timer(id),
            ZoomEvent::ImageLoaded { target } => {
                self.hooks.fire(HookKind::ImageLoaded, &target);
                InputResult::Handled
            }
        }
    }

    fn on_click(&mut self, target: H::Element, modifiers: Modifiers) -> InputResult {
        if &target == self.overlay.element() {
            if self.is_shown() {
                let _ = self.close(None);
            }
            return InputResult::Handled;
        }
        if !self.listening().contains(&target) {
            return InputResult::Ignored;
        }

        if modifiers.is_new_tab_gesture() {
            let url = original_source(&self.host, &target)
                .or_else(|| self.host.attribute(&target, "src"));
            if let Some(url) = url {
                self.host.open_in_new_context(&url);
            }
            return InputResult::PreventDefault;
        }

        if !self.is_shown() {
            let _ = self.open(TargetRef::Element(target), None);
        } else if self.is_released() {
            let _ = self.close(None);
        } else {
            let _ = self.release(None);
        }
        InputResult::PreventDefault
    }

    fn on_scroll(&mut self) -> InputResult {
        if !self.is_shown() {
            return InputResult::Ignored;
        }
        let position = self.host.scroll_position();
        let start = *self.session.last_scroll_position.get_or_insert(position);
        let delta = start - position;
        let threshold = self.options.scroll_threshold;

        if delta.x.abs() >= threshold || delta.y.abs() >= threshold {
            debug!(?delta, "scrolled past threshold");
            self.session.last_scroll_position = None;
            let _ = self.close(None);
        }
        InputResult::Handled
    }

    fn on_timer(&mut self, id: TimerId) -> InputResult {
        if let Some(press) = self.session.press.filter(|p| p.timer == id) {
            self.session.press = None;
            let _ = self.grab(press.position.x, press.position.y, None, None);
            return InputResult::Handled;
        }

        if self.switcher.pending_timer() == Some(id) {
            if let Some(target) = self.target.as_ref() {
                self.switcher
                    .complete(&mut self.host, target.element(), target.sources(), id);
            }
            return InputResult::Handled;
        }

        if self.pending.fallback() == Some(id) {
            debug!(pending = ?self.pending.names(), "transition end missing, completing");
            self.complete_transition();
            return InputResult::Handled;
        }

        InputResult::Ignored
    }

    /// Start the press delay; a grab follows unless the press ends first
    fn arm_press(&mut self, position: Vec2) {
        self.cancel_press();
        let timer = self.alloc_timer();
        self.host.set_timeout(timer, PRESS_DELAY_MS);
        self.session.press = Some(PendingPress { timer, position });
    }

    fn end_press(&mut self) {
        self.cancel_press();
        if self.is_released() {
            let _ = self.close(None);
        } else {
            let _ = self.release(None);
        }
    }
}

//! Zoom transitions
//!
//! `open`, `close`, `grab`, `move_to` and `release` check their
//! preconditions, apply the visual change immediately and queue a
//! [`Completion`] that runs on the next transition-end of the target.

use tracing::{debug, trace};

use crate::error::{ZoomError, ZoomResult};
use crate::events::TargetRef;
use crate::host::{DomHost, EventKind, ListenTarget};
use crate::options::{Callback, HookKind};
use crate::session::ZoomState;
use crate::target::ZoomTarget;
use crate::transition::{AfterRelease, Completion};
use crate::types::{Cursor, TRANSITION_FALLBACK_GRACE_MS};
use crate::zooming::Zooming;

impl<H: DomHost> Zooming<H> {
    /// Zoom `target` into the center of the viewport.
    ///
    /// Rejected while another image is shown or a transition runs, and for
    /// anything that is not an `<img>`. `cb` replaces `onOpen` for this call.
    pub fn open(
        &mut self,
        target: impl Into<TargetRef<H::Element>>,
        cb: Option<Callback<H::Element>>,
    ) -> ZoomResult<&mut Self> {
        if self.is_shown() {
            return Err(rejected(ZoomError::already_shown("open")));
        }
        if self.is_locked() {
            return Err(rejected(ZoomError::locked("open")));
        }
        let el = self.resolve(target.into()).map_err(rejected)?;
        if !self.is_image(&el) {
            return Err(rejected(ZoomError::NotAnImage));
        }

        self.hooks.fire(HookKind::BeforeOpen, &el);

        let mut target = ZoomTarget::capture(&self.host, el.clone());
        if !self.options.preload_image {
            if let Some(original) = target.sources().original.clone() {
                self.hooks.fire(HookKind::ImageLoading, &el);
                self.host.load_image(&original, Some(&el));
            }
        }

        self.session.state = ZoomState::Opening;
        self.session.last_scroll_position = None;

        target.zoom_in(&mut self.host, &self.options);
        self.overlay.insert(&mut self.host);
        self.overlay.fade_in(&mut self.host, &self.options);

        self.host
            .set_listener(ListenTarget::Document, EventKind::Scroll, true);
        self.host
            .set_listener(ListenTarget::Document, EventKind::KeyDown, true);
        if self.options.close_on_window_resize {
            self.host
                .set_listener(ListenTarget::Window, EventKind::Resize, true);
            self.session.resize_listener = true;
        }

        trace!(
            translate = ?target.translate(),
            scale = ?target.scale(),
            "opening"
        );
        self.target = Some(target);
        self.await_transition(Completion::Open(cb));
        Ok(self)
    }

    /// Zoom the current image back to its place. `cb` replaces `onClose`.
    pub fn close(&mut self, cb: Option<Callback<H::Element>>) -> ZoomResult<&mut Self> {
        let el = self.unlocked_target("close")?;

        self.hooks.fire(HookKind::BeforeClose, &el);
        self.session.state = ZoomState::Closing;
        self.set_body_cursor(Cursor::Default);
        self.overlay.fade_out(&mut self.host);
        if let Some(target) = self.target.as_ref() {
            target.zoom_out(&mut self.host);
        }

        self.host
            .set_listener(ListenTarget::Document, EventKind::Scroll, false);
        self.host
            .set_listener(ListenTarget::Document, EventKind::KeyDown, false);
        if self.session.resize_listener {
            self.host
                .set_listener(ListenTarget::Window, EventKind::Resize, false);
            self.session.resize_listener = false;
        }

        trace!("closing");
        self.await_transition(Completion::Close(cb));
        Ok(self)
    }

    /// Hold the image with extra zoom, panning toward `(x, y)`.
    ///
    /// `scale_extra` defaults to the configured value. Does not lock: move
    /// and release may follow before the grab transition has ended.
    pub fn grab(
        &mut self,
        x: f64,
        y: f64,
        scale_extra: Option<f64>,
        cb: Option<Callback<H::Element>>,
    ) -> ZoomResult<&mut Self> {
        let el = self.unlocked_target("grab")?;
        let extra = scale_extra.unwrap_or(self.options.scale_extra);

        self.hooks.fire(HookKind::BeforeGrab, &el);
        self.session.state = ZoomState::Grabbed;
        if let Some(target) = self.target.as_ref() {
            target.grab(&mut self.host, x, y, extra);
        }

        self.await_transition(Completion::Grab(cb));
        Ok(self)
    }

    /// Follow the pointer to `(x, y)` without animating
    pub fn move_to(
        &mut self,
        x: f64,
        y: f64,
        scale_extra: Option<f64>,
        cb: Option<Callback<H::Element>>,
    ) -> ZoomResult<&mut Self> {
        self.unlocked_target("move")?;
        let extra = scale_extra.unwrap_or(self.options.scale_extra);

        self.session.state = ZoomState::Grabbed;
        if let Some(target) = self.target.as_ref() {
            target.move_to(&mut self.host, x, y, extra);
        }
        self.set_body_cursor(Cursor::Move);

        self.await_transition(Completion::Move(cb));
        Ok(self)
    }

    /// Let go of a grabbed image. `cb` replaces `onRelease`.
    pub fn release(&mut self, cb: Option<Callback<H::Element>>) -> ZoomResult<&mut Self> {
        self.begin_release(AfterRelease::Notify(cb))?;
        Ok(self)
    }

    /// Release, then close as soon as the release has settled
    pub(crate) fn release_then_close(&mut self) -> ZoomResult<()> {
        self.begin_release(AfterRelease::Close)
    }

    fn begin_release(&mut self, after: AfterRelease<H::Element>) -> ZoomResult<()> {
        let el = self.unlocked_target("release")?;

        self.hooks.fire(HookKind::BeforeRelease, &el);
        self.session.state = ZoomState::Releasing;
        self.set_body_cursor(Cursor::Default);
        if let Some(target) = self.target.as_ref() {
            target.restore_open_style(&mut self.host);
        }

        self.await_transition(Completion::Release(after));
        Ok(())
    }

    /// The zoomed element, if an unlocked image is shown
    fn unlocked_target(&self, op: &'static str) -> ZoomResult<H::Element> {
        let Some(el) = self.target_element().cloned() else {
            return Err(rejected(ZoomError::not_shown(op)));
        };
        if !self.is_shown() {
            return Err(rejected(ZoomError::not_shown(op)));
        }
        if self.is_locked() {
            return Err(rejected(ZoomError::locked(op)));
        }
        Ok(el)
    }

    /// Queue `completion` for the next transition-end of the target
    fn await_transition(&mut self, completion: Completion<H::Element>) {
        let Some(el) = self.target_element().cloned() else {
            return;
        };
        if self.pending.is_empty() {
            self.host
                .set_listener(ListenTarget::Element(el), EventKind::TransitionEnd, true);
        }

        let locking = completion.is_locking();
        trace!(completion = completion.name(), "awaiting transition end");
        self.pending.push(completion);

        if locking {
            let timer = self.alloc_timer();
            if let Some(previous) = self.pending.replace_fallback(timer) {
                self.host.clear_timeout(previous);
            }
            let delay = self
                .options
                .transition_duration_ms()
                .saturating_add(TRANSITION_FALLBACK_GRACE_MS);
            self.host.set_timeout(timer, delay);
        }
    }

    /// Run every completion queued so far. Completions queued while these
    /// run wait for the next transition-end.
    pub(crate) fn complete_transition(&mut self) {
        let Some(el) = self.target_element().cloned() else {
            return;
        };
        let (completions, fallback) = self.pending.take();
        if let Some(timer) = fallback {
            self.host.clear_timeout(timer);
        }
        self.host
            .set_listener(ListenTarget::Element(el.clone()), EventKind::TransitionEnd, false);

        for completion in completions {
            trace!(completion = completion.name(), "transition finished");
            self.run_completion(completion, &el);
        }
    }

    fn run_completion(&mut self, completion: Completion<H::Element>, el: &H::Element) {
        match completion {
            Completion::Open(cb) => {
                if self.session.state == ZoomState::Opening {
                    self.session.state = ZoomState::Open;
                }
                self.upgrade_source();
                if self.options.enable_grab {
                    self.set_grab_listeners(true);
                }
                self.hooks.finish(HookKind::Open, cb, el);
            }
            Completion::Close(cb) => {
                self.session.state = ZoomState::Closed;
                self.cancel_press();
                if let Some(target) = self.target.take() {
                    self.switcher
                        .downgrade(&mut self.host, target.element(), target.sources());
                    if self.session.grab_listeners {
                        self.set_grab_listeners(false);
                    }
                    target.restore_close_style(&mut self.host);
                }
                self.overlay.remove(&mut self.host);
                self.hooks.finish(HookKind::Close, cb, el);
            }
            Completion::Grab(cb) => self.hooks.finish(HookKind::Grab, cb, el),
            Completion::Move(cb) => self.hooks.finish(HookKind::Move, cb, el),
            Completion::Release(after) => {
                if self.session.state == ZoomState::Releasing {
                    self.session.state = ZoomState::Open;
                }
                match after {
                    AfterRelease::Notify(cb) => self.hooks.finish(HookKind::Release, cb, el),
                    AfterRelease::Close => {
                        if let Err(err) = self.close(None) {
                            debug!(%err, "close after release skipped");
                        }
                    }
                }
            }
        }
    }

    fn upgrade_source(&mut self) {
        let timer = self.alloc_timer();
        if let Some(target) = self.target.as_ref() {
            self.switcher
                .upgrade(&mut self.host, target.element(), target.sources(), timer);
        }
    }

    pub(crate) fn set_grab_listeners(&mut self, active: bool) {
        for kind in EventKind::GRAB {
            self.host.set_listener(ListenTarget::Document, kind, active);
        }
        self.session.grab_listeners = active;
    }

    pub(crate) fn cancel_press(&mut self) {
        if let Some(press) = self.session.press.take() {
            self.host.clear_timeout(press.timer);
        }
    }
}

fn rejected(err: ZoomError) -> ZoomError {
    debug!(%err, "operation rejected");
    err
}

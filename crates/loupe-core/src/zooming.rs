//! Public entry point
//!
//! [`Zooming`] owns the host, the options and the single zoom slot. The
//! transition operations live in `controller.rs` and the input mapping in
//! `handlers.rs`; this file holds construction, `listen`, `config` and
//! inspection.

use tracing::{debug, trace};

use crate::error::{ZoomError, ZoomResult};
use crate::events::TargetRef;
use crate::host::{DomHost, EventKind, ListenTarget};
use crate::options::{Hooks, Options, OptionsPatch};
use crate::overlay::Overlay;
use crate::session::{ZoomSession, ZoomState};
use crate::source::{original_source, SourceSwitcher};
use crate::style::StyleProp;
use crate::target::ZoomTarget;
use crate::transition::PendingTransitions;
use crate::types::{Cursor, TimerId};

/// A click-to-zoom widget instance bound to one document
pub struct Zooming<H: DomHost> {
    pub(crate) host: H,
    pub(crate) options: Options,
    pub(crate) hooks: Hooks<H::Element>,
    pub(crate) session: ZoomSession,
    pub(crate) overlay: Overlay<H::Element>,
    pub(crate) target: Option<ZoomTarget<H::Element>>,
    pub(crate) switcher: SourceSwitcher<H::Element>,
    pub(crate) pending: PendingTransitions<H::Element>,
    listening: Vec<H::Element>,
    next_timer: u64,
}

impl<H: DomHost> Zooming<H> {
    /// Create an instance. The overlay element is created immediately but
    /// only inserted into the document while an image is zoomed.
    pub fn new(host: H, options: Options, hooks: Hooks<H::Element>) -> ZoomResult<Self> {
        options.validate()?;
        Ok(Self::build(host, options, hooks))
    }

    /// Create an instance with default options and no hooks
    pub fn with_defaults(host: H) -> Self {
        Self::build(host, Options::default(), Hooks::new())
    }

    fn build(mut host: H, options: Options, hooks: Hooks<H::Element>) -> Self {
        let overlay = Overlay::new(&mut host, &options);
        Self {
            host,
            options,
            hooks,
            session: ZoomSession::new(),
            overlay,
            target: None,
            switcher: SourceSwitcher::new(),
            pending: PendingTransitions::new(),
            listening: Vec::new(),
            next_timer: 1,
        }
    }

    /// Make images zoomable: every `<img>` matching a selector, or the given
    /// element. Non-image elements are skipped.
    pub fn listen(&mut self, target: impl Into<TargetRef<H::Element>>) -> &mut Self {
        let elements = match target.into() {
            TargetRef::Selector(selector) => self.host.query_selector_all(&selector),
            TargetRef::Element(el) => vec![el],
        };

        for el in elements {
            if !self.is_image(&el) {
                continue;
            }
            self.host.set_style(&el, StyleProp::Cursor, Cursor::ZoomIn.css());
            if !self.listening.contains(&el) {
                self.host
                    .set_listener(ListenTarget::Element(el.clone()), EventKind::Click, true);
                self.listening.push(el.clone());
            }
            if self.options.preload_image {
                if let Some(src) = original_source(&self.host, &el) {
                    self.host.load_image(&src, None);
                }
            }
        }
        trace!(count = self.listening.len(), "listening");
        self
    }

    /// Shallow-merge `patch` into the options and restyle the overlay.
    ///
    /// Invalid values are rejected and leave the options untouched.
    pub fn config(&mut self, patch: OptionsPatch) -> ZoomResult<&mut Self> {
        let mut merged = self.options.clone();
        merged.merge(patch);
        merged.validate()?;
        self.options = merged;
        self.overlay.update_style(&mut self.host, &self.options);
        debug!(options = ?self.options, "config updated");
        Ok(self)
    }

    /// Merge lifecycle hooks; hooks not set in `hooks` are kept
    pub fn set_hooks(&mut self, hooks: Hooks<H::Element>) -> &mut Self {
        self.hooks.merge(hooks);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn hooks(&self) -> &Hooks<H::Element> {
        &self.hooks
    }

    pub fn state(&self) -> ZoomState {
        self.session.state
    }

    pub fn is_shown(&self) -> bool {
        self.session.state.is_shown()
    }

    pub fn is_locked(&self) -> bool {
        self.session.state.is_locked()
    }

    pub fn is_released(&self) -> bool {
        self.session.state.is_released()
    }

    /// A press is waiting for the press delay
    pub fn is_pressing(&self) -> bool {
        self.session.is_pressing()
    }

    /// The element currently zoomed, if any
    pub fn target_element(&self) -> Option<&H::Element> {
        self.target.as_ref().map(|t| t.element())
    }

    pub fn target(&self) -> Option<&ZoomTarget<H::Element>> {
        self.target.as_ref()
    }

    pub fn overlay_element(&self) -> &H::Element {
        self.overlay.element()
    }

    /// Elements registered through `listen`
    pub fn listening(&self) -> &[H::Element] {
        &self.listening
    }

    /// Names of transitions waiting for their end signal, oldest first
    pub fn pending_transitions(&self) -> Vec<&'static str> {
        self.pending.names()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub(crate) fn is_image(&self, el: &H::Element) -> bool {
        self.host.tag_name(el).eq_ignore_ascii_case("img")
    }

    pub(crate) fn resolve(&self, target: TargetRef<H::Element>) -> ZoomResult<H::Element> {
        match target {
            TargetRef::Element(el) => Ok(el),
            TargetRef::Selector(selector) => self
                .host
                .query_selector(&selector)
                .ok_or(ZoomError::TargetNotFound(selector)),
        }
    }

    pub(crate) fn alloc_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        id
    }

    pub(crate) fn set_body_cursor(&mut self, cursor: Cursor) {
        let body = self.host.body();
        self.host.set_style(&body, StyleProp::Cursor, cursor.css());
    }
}

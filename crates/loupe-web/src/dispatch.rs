//! Shared ownership of the core between JavaScript calls and DOM callbacks

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use loupe_core::{Options, TimerId, ZoomEvent, ZoomResult, ZoomState, Zooming};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::host::WebHost;
use crate::log;

type Command = Box<dyn FnOnce(&mut Zooming<WebHost>)>;

/// The zoom core plus the calls that arrived while it was busy
pub(crate) struct Shared {
    zooming: RefCell<Option<Zooming<WebHost>>>,
    queue: RefCell<VecDeque<Command>>,
    /// State after the last call that ran to completion
    settled: Cell<ZoomState>,
}

impl Shared {
    pub(crate) fn new(
        options: Options,
        hooks: loupe_core::Hooks<Element>,
    ) -> Result<Rc<Self>, JsValue> {
        let shared = Rc::new(Self {
            zooming: RefCell::new(None),
            queue: RefCell::new(VecDeque::new()),
            settled: Cell::new(ZoomState::Closed),
        });
        let host = WebHost::new(Rc::downgrade(&shared))?;
        let zooming = Zooming::new(host, options, hooks)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        *shared.zooming.borrow_mut() = Some(zooming);
        log("[loupe] Zooming ready");
        Ok(shared)
    }

    /// Run `f` now, or queue it if the core is already borrowed further up
    /// the stack. Returns `None` when queued.
    pub(crate) fn with<R: 'static>(
        &self,
        f: impl FnOnce(&mut Zooming<WebHost>) -> R + 'static,
    ) -> Option<R> {
        let result = match self.zooming.try_borrow_mut() {
            Ok(mut guard) => guard.as_mut().map(|z| {
                let result = f(z);
                self.settled.set(z.state());
                result
            }),
            Err(_) => {
                self.queue.borrow_mut().push_back(Box::new(move |z| {
                    f(z);
                }));
                return None;
            }
        };
        self.drain();
        result
    }

    /// Current state without queueing. While the core is busy (a hook is
    /// running) this is the state the last finished call left behind.
    pub(crate) fn state(&self) -> ZoomState {
        match self.zooming.try_borrow() {
            Ok(guard) => guard.as_ref().map_or(self.settled.get(), |z| z.state()),
            Err(_) => self.settled.get(),
        }
    }

    /// Feed a DOM event; true when the caller must `preventDefault()`
    pub(crate) fn dispatch(&self, event: ZoomEvent<Element>) -> bool {
        self.with(move |z| z.handle_event(event).prevents_default())
            .unwrap_or(false)
    }

    pub(crate) fn timer_fired(&self, id: TimerId) {
        self.with(move |z| {
            z.host_mut().forget_timer(id);
            z.handle_event(ZoomEvent::TimerFired(id));
        });
    }

    /// Run `f` and surface a core rejection as a thrown string
    pub(crate) fn try_with(
        &self,
        f: impl FnOnce(&mut Zooming<WebHost>) -> ZoomResult<()> + 'static,
    ) -> Result<(), JsValue> {
        match self.with(f) {
            Some(Err(err)) => Err(JsValue::from_str(&err.to_string())),
            _ => Ok(()),
        }
    }

    fn drain(&self) {
        loop {
            let Some(command) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            let Ok(mut guard) = self.zooming.try_borrow_mut() else {
                // Still borrowed further up; that dispatch drains on return
                self.queue.borrow_mut().push_front(command);
                break;
            };
            if let Some(zooming) = guard.as_mut() {
                command(zooming);
                self.settled.set(zooming.state());
            }
        }
    }
}

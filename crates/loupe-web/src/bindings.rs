//! The `Zooming` JavaScript class
//!
//! Mirrors the classic API: every method returns the instance so calls can
//! be chained, and calls that the current state does not allow are ignored.

use std::rc::Rc;

use js_sys::Function;
use loupe_core::Options;
use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::dispatch::Shared;
use crate::log;
use crate::options::{callback, options_to_js, parse_options, target_ref};

/// Click-to-zoom controller for one page
#[wasm_bindgen]
#[derive(Clone)]
pub struct Zooming {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Zooming {
    /// `new Zooming(options?)`
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Zooming, JsValue> {
        let (patch, hooks) = parse_options(&options)?;
        let mut merged = Options::default();
        merged.merge(patch);
        let shared = Shared::new(merged, hooks)?;
        Ok(Zooming { shared })
    }

    /// Make images zoomable: a selector (all matches) or an element
    pub fn listen(&self, target: JsValue) -> Result<Zooming, JsValue> {
        let target = target_ref(target)?;
        self.shared.with(move |z| {
            let count = z.listen(target).listening().len();
            log(&format!("[loupe] listening on {} image(s)", count));
        });
        Ok(self.clone())
    }

    /// Merge `options` and return the instance, or return the current
    /// options when called without an argument
    pub fn config(&self, options: JsValue) -> Result<JsValue, JsValue> {
        if options.is_undefined() {
            return self
                .shared
                .with(|z| options_to_js(z.options()))
                .unwrap_or(Ok(JsValue::UNDEFINED));
        }
        let (patch, hooks) = parse_options(&options)?;
        self.shared.try_with(move |z| {
            z.config(patch)?.set_hooks(hooks);
            Ok(())
        })?;
        Ok(self.clone().into())
    }

    /// Zoom into `target`; `cb` replaces `onOpen` for this call
    pub fn open(&self, target: JsValue, cb: Option<Function>) -> Result<Zooming, JsValue> {
        let target = target_ref(target)?;
        let cb = callback(cb);
        self.shared.with(move |z| {
            if let Err(err) = z.open(target, cb) {
                debug!(%err, "open ignored");
            }
        });
        Ok(self.clone())
    }

    pub fn close(&self, cb: Option<Function>) -> Zooming {
        let cb = callback(cb);
        self.shared.with(move |z| {
            if let Err(err) = z.close(cb) {
                debug!(%err, "close ignored");
            }
        });
        self.clone()
    }

    /// Hold the zoomed image at `(x, y)` with extra zoom
    pub fn grab(&self, x: f64, y: f64, scale_extra: Option<f64>, cb: Option<Function>) -> Zooming {
        let cb = callback(cb);
        self.shared.with(move |z| {
            if let Err(err) = z.grab(x, y, scale_extra, cb) {
                debug!(%err, "grab ignored");
            }
        });
        self.clone()
    }

    /// Follow the pointer to `(x, y)` without animating
    #[wasm_bindgen(js_name = "move")]
    pub fn move_to(&self, x: f64, y: f64, scale_extra: Option<f64>, cb: Option<Function>) -> Zooming {
        let cb = callback(cb);
        self.shared.with(move |z| {
            if let Err(err) = z.move_to(x, y, scale_extra, cb) {
                debug!(%err, "move ignored");
            }
        });
        self.clone()
    }

    pub fn release(&self, cb: Option<Function>) -> Zooming {
        let cb = callback(cb);
        self.shared.with(move |z| {
            if let Err(err) = z.release(cb) {
                debug!(%err, "release ignored");
            }
        });
        self.clone()
    }

    /// Current lifecycle state (`closed`, `opening`, `open`, ...). Read from
    /// inside a hook, it is the state before the running call started.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.shared.state().name().to_string()
    }
}

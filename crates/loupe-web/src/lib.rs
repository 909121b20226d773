//! Browser bindings for Loupe
//!
//! This crate wires the pure [`loupe_core`] state machine to the real DOM:
//! - [`WebHost`]: `DomHost` over `web-sys` (listeners, timers, styles)
//! - [`Zooming`]: the JavaScript-facing class (`new Zooming(options)`)
//! - Event conversion from DOM events to `ZoomEvent`s
//! - Option objects translated through `JSON.stringify` and `serde_json`
//!
//! ## Re-entrancy
//!
//! Hooks run while the core is mutably borrowed. A hook that calls back into
//! the API (for example `onOpen` calling `close()`) has its call queued and
//! replayed as soon as the outer dispatch returns.

use wasm_bindgen::prelude::*;

mod bindings;
mod dispatch;
pub mod events;
pub mod host;
pub mod options;

pub use bindings::Zooming;
pub use host::WebHost;

/// Write a line to the browser console
pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

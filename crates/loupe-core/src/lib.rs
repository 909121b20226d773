//! Click-to-zoom core for Loupe
//!
//! This crate provides the complete behaviour of the zoom widget:
//! - Opening a thumbnail into a centred, scaled view over a backdrop
//! - Press-and-hold grabbing with extra zoom, following the pointer
//! - Closing on click, Escape, scroll past a threshold or window resize
//! - Swapping in the high resolution source once the zoom has settled
//!
//! ## Architecture
//!
//! - [`host`]: The [`DomHost`] trait through which every DOM effect goes
//! - [`geometry`]: Pure translate/scale computation
//! - [`style`]: Inline style maps with restore snapshots
//! - [`session`]: The [`ZoomState`] machine
//! - [`transition`]: Transition-end continuations and the fallback timer
//! - [`memory`]: [`MemoryDom`], an in-memory host for tests
//!
//! ## Example
//!
//! ```rust
//! use loupe_core::{DomHost, MemoryDom, Rect, Size, ZoomState, Zooming};
//!
//! let mut dom = MemoryDom::with_viewport(Size::new(1000.0, 800.0));
//! let body = dom.body();
//! let img = dom.create_element("img");
//! dom.append_child(&body, &img);
//! dom.set_rect(&img, Rect::new(100.0, 100.0, 200.0, 100.0));
//!
//! let mut zooming = Zooming::with_defaults(dom);
//! zooming.listen("img");
//! zooming.click(img);
//! assert_eq!(zooming.state(), ZoomState::Opening);
//!
//! zooming.finish_transition();
//! assert_eq!(zooming.state(), ZoomState::Open);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Injected Host**: DOM access and timers go through [`DomHost`]
//! 3. **Explicit States**: `shown`/`locked`/`released` are projections of one enum

pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod math;
pub mod memory;
pub mod options;
pub mod session;
pub mod source;
pub mod style;
pub mod target;
pub mod transition;
pub mod types;

mod controller;
mod handlers;
mod overlay;
mod zooming;

// Re-export core types for convenience
pub use error::{ZoomError, ZoomResult};
pub use events::{InputResult, TargetRef, ZoomEvent, BUTTON_LEFT, KEY_CODE_ESCAPE};
pub use geometry::{TargetMetrics, ZoomGeometry};
pub use host::{DomHost, EventKind, ListenTarget};
pub use math::{Rect, Size, Vec2};
pub use memory::{MemoryDom, NodeId};
pub use options::{Callback, CustomSize, Hook, HookKind, Hooks, Options, OptionsPatch, Percent};
pub use session::ZoomState;
pub use style::{StyleMap, StyleProp};
pub use types::{Cursor, Modifiers, TimerId, PRESS_DELAY_MS};

pub use zooming::Zooming;

//! Core geometry types
//!
//! Coordinates are CSS pixels in the viewport's client space, so everything
//! is `f64` to match what the DOM reports.

mod rect;
mod size;
mod vec2;

pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;

//! Coordinate and geometry types shared across the toolkit.
//!
//! Canonical space:
//! - design-space (canvas) pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! The viewport maps design space onto a window of arbitrary size without
//! touching any windowing API; hosts apply the computed layout themselves.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::{FitAxis, FitMode, Viewport, ViewportLayout};

//! Playkit engine crate.
//!
//! Frame pacing for a fixed-rate game loop, plus the small utility pieces a
//! 2-D game keeps around it: vector math, viewport fit, a sprite stage, and
//! language tables.

pub mod time;

pub mod coords;
pub mod lang;
pub mod logging;
pub mod stage;

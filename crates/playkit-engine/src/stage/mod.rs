//! Sprite stage.
//!
//! Responsibilities:
//! - own the sprite container (no global registry; whoever drives the game
//!   loop owns the stage and passes it where it is needed)
//! - integrate per-frame motion and spin
//! - emit renderer-agnostic sprite commands in insertion order

mod cmd;
mod list;
mod sprite;

pub use cmd::SpriteCmd;
pub use list::Stage;
pub use sprite::{Sprite, SpriteHook, SpriteId, SpriteState};

use crate::coords::Vec2;

/// Identifier for a sprite owned by a [`Stage`](super::Stage).
///
/// Ids are unique per stage and never reused, so a stale id after `remove`
/// simply resolves to nothing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SpriteId(pub(super) u64);

/// Per-frame sprite hook, run after built-in integration with the tick's
/// measured delta milliseconds.
pub type SpriteHook = Box<dyn FnMut(&mut SpriteState, f64)>;

/// Mutable sprite fields visible to hooks and renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteState {
    /// Image asset path or key; meaning is up to the host renderer.
    pub image: String,
    /// Width/height in design-space pixels.
    pub size: Vec2,
    /// Center position in design-space pixels.
    pub position: Vec2,
    /// Translation applied each frame, design-space pixels per frame.
    pub motion: Vec2,
    /// Current rotation, degrees clockwise.
    pub rotation_deg: f32,
    /// Rotation increment applied each frame, degrees per frame.
    pub spin_deg: f32,
}

/// A sprite: state plus an optional per-frame hook.
pub struct Sprite {
    pub state: SpriteState,
    pub(super) hook: Option<SpriteHook>,
}

impl Sprite {
    pub fn new(image: impl Into<String>, size: Vec2) -> Self {
        Self {
            state: SpriteState {
                image: image.into(),
                size,
                position: Vec2::zero(),
                motion: Vec2::zero(),
                rotation_deg: 0.0,
                spin_deg: 0.0,
            },
            hook: None,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.state.position = position;
        self
    }

    /// Per-frame translation.
    pub fn with_motion(mut self, motion: Vec2) -> Self {
        self.state.motion = motion;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.state.rotation_deg = degrees;
        self
    }

    /// Per-frame rotation increment.
    pub fn with_spin(mut self, degrees_per_frame: f32) -> Self {
        self.state.spin_deg = degrees_per_frame;
        self
    }

    /// Installs a per-frame hook, run after built-in integration.
    pub fn with_hook(mut self, hook: impl FnMut(&mut SpriteState, f64) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

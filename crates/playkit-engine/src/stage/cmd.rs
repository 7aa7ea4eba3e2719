use crate::coords::Vec2;

/// Renderer-agnostic sprite draw command.
///
/// One command per sprite per frame. Consuming these — canvas, GPU, terminal,
/// a test buffer — is the host's business; the stage never draws.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    /// Image asset path or key; meaning is up to the host renderer.
    pub image: String,
    /// Center position in design-space pixels.
    pub center: Vec2,
    /// Width/height in design-space pixels.
    pub size: Vec2,
    /// Rotation about the center, degrees clockwise.
    pub rotation_deg: f32,
}

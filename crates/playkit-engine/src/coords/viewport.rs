use super::Vec2;

/// How the design-space area maps onto the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FitMode {
    /// Fill the window on both axes; aspect ratio is not preserved.
    Stretch,
    /// Preserve aspect ratio and fill the window; overflow is cropped.
    Cover,
    /// Preserve aspect ratio and fit inside the window; the rest is
    /// letterboxed.
    Contain,
    /// Match the window height; width is capped at the aspect-correct value.
    Limited,
}

/// Axis that drove the scale factor for a layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FitAxis {
    X,
    Y,
    /// Per-axis scaling ([`FitMode::Stretch`]); no single driving axis.
    Both,
}

/// Computed layout for one window size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportLayout {
    /// Container size in window coordinates, centered in the window.
    pub container: Vec2,
    /// Canvas pixel-buffer size.
    pub canvas: Vec2,
    /// Size of one design-space pixel in window coordinates.
    ///
    /// For [`FitMode::Stretch`] this is the vertical scale; the horizontal
    /// scale follows from `container.x / canvas.x`.
    pub pixel_scale: f32,
    /// Axis that determined `pixel_scale`.
    pub axis: FitAxis,
}

impl ViewportLayout {
    const EMPTY: Self = Self {
        container: Vec2::zero(),
        canvas: Vec2::zero(),
        pixel_scale: 0.0,
        axis: FitAxis::Y,
    };
}

/// Pure fit-mode layout for a fixed design-space area.
///
/// Holds no window handle and installs no resize hooks; the host calls
/// [`layout`] with the current window size whenever it changes and applies
/// the result itself.
#[derive(Debug, Clone)]
pub struct Viewport {
    area: Vec2,
    mode: FitMode,
}

impl Viewport {
    pub fn new(area: Vec2, mode: FitMode) -> Self {
        Self { area, mode }
    }

    /// Design-space area, width and height in canvas pixels.
    pub fn area(&self) -> Vec2 {
        self.area
    }

    pub fn mode(&self) -> FitMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FitMode) {
        self.mode = mode;
    }

    /// Computes the layout for `window` (window size in window coordinates).
    ///
    /// Degenerate inputs (non-positive window or area) yield an empty layout
    /// rather than NaNs.
    pub fn layout(&self, window: Vec2) -> ViewportLayout {
        if window.x <= 0.0 || window.y <= 0.0 || self.area.x <= 0.0 || self.area.y <= 0.0 {
            return ViewportLayout::EMPTY;
        }

        let scale_x = window.x / self.area.x;
        let scale_y = window.y / self.area.y;

        match self.mode {
            FitMode::Stretch => ViewportLayout {
                container: window,
                canvas: self.area,
                pixel_scale: scale_y,
                axis: FitAxis::Both,
            },
            FitMode::Cover => {
                let (scale, axis) = if scale_x >= scale_y {
                    (scale_x, FitAxis::X)
                } else {
                    (scale_y, FitAxis::Y)
                };
                ViewportLayout {
                    container: window,
                    canvas: self.area,
                    pixel_scale: scale,
                    axis,
                }
            }
            FitMode::Contain => {
                let (scale, axis) = if scale_x <= scale_y {
                    (scale_x, FitAxis::X)
                } else {
                    (scale_y, FitAxis::Y)
                };
                ViewportLayout {
                    container: self.area * scale,
                    canvas: self.area,
                    pixel_scale: scale,
                    axis,
                }
            }
            FitMode::Limited => {
                let width = window.x.min(window.y * self.area.x / self.area.y);
                let container = Vec2::new(width, window.y);
                ViewportLayout {
                    container,
                    canvas: container,
                    pixel_scale: scale_y,
                    axis: FitAxis::Y,
                }
            }
        }
    }

    /// Converts a window-space point to canvas space, assuming the container
    /// is centered in the window. Returns the zero vector for an empty
    /// layout.
    pub fn client_to_canvas(&self, window: Vec2, point: Vec2) -> Vec2 {
        let layout = self.layout(window);
        if layout.container.x <= 0.0 || layout.container.y <= 0.0 {
            return Vec2::zero();
        }
        let origin = (window - layout.container) * 0.5;
        let local = point - origin;
        Vec2::new(
            local.x * layout.canvas.x / layout.container.x,
            local.y * layout.canvas.y / layout.container.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(mode: FitMode) -> Viewport {
        Viewport::new(Vec2::new(320.0, 180.0), mode)
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn stretch_fills_the_window() {
        let layout = viewport(FitMode::Stretch).layout(Vec2::new(1000.0, 500.0));
        assert_eq!(layout.container, Vec2::new(1000.0, 500.0));
        assert_eq!(layout.canvas, Vec2::new(320.0, 180.0));
        assert_eq!(layout.axis, FitAxis::Both);
    }

    #[test]
    fn contain_letterboxes_a_wide_window() {
        // Window is wider than 16:9, so height limits the scale.
        let layout = viewport(FitMode::Contain).layout(Vec2::new(1280.0, 360.0));
        assert_eq!(layout.axis, FitAxis::Y);
        assert_eq!(layout.pixel_scale, 2.0);
        assert_eq!(layout.container, Vec2::new(640.0, 360.0));
        assert_eq!(layout.canvas, Vec2::new(320.0, 180.0));
    }

    #[test]
    fn contain_pillarboxes_a_tall_window() {
        let layout = viewport(FitMode::Contain).layout(Vec2::new(320.0, 720.0));
        assert_eq!(layout.axis, FitAxis::X);
        assert_eq!(layout.pixel_scale, 1.0);
        assert_eq!(layout.container, Vec2::new(320.0, 180.0));
    }

    #[test]
    fn cover_scales_by_the_larger_factor() {
        let layout = viewport(FitMode::Cover).layout(Vec2::new(1280.0, 360.0));
        assert_eq!(layout.axis, FitAxis::X);
        assert_eq!(layout.pixel_scale, 4.0);
        assert_eq!(layout.container, Vec2::new(1280.0, 360.0));
    }

    #[test]
    fn limited_caps_the_width_at_the_aspect_correct_value() {
        let layout = viewport(FitMode::Limited).layout(Vec2::new(1280.0, 360.0));
        assert_eq!(layout.container, Vec2::new(640.0, 360.0));
        assert_eq!(layout.canvas, Vec2::new(640.0, 360.0));
        assert_eq!(layout.pixel_scale, 2.0);
        assert_eq!(layout.axis, FitAxis::Y);
    }

    #[test]
    fn limited_keeps_a_narrow_window_width() {
        let layout = viewport(FitMode::Limited).layout(Vec2::new(300.0, 360.0));
        assert_eq!(layout.container, Vec2::new(300.0, 360.0));
    }

    #[test]
    fn degenerate_window_yields_an_empty_layout() {
        let layout = viewport(FitMode::Contain).layout(Vec2::new(0.0, 360.0));
        assert_eq!(layout, ViewportLayout::EMPTY);
    }

    // ── client_to_canvas ──────────────────────────────────────────────────

    #[test]
    fn window_center_maps_to_canvas_center() {
        let vp = viewport(FitMode::Contain);
        let window = Vec2::new(1280.0, 360.0);
        let p = vp.client_to_canvas(window, Vec2::new(640.0, 180.0));
        assert_eq!(p, Vec2::new(160.0, 90.0));
    }

    #[test]
    fn container_origin_maps_to_canvas_origin() {
        let vp = viewport(FitMode::Contain);
        let window = Vec2::new(1280.0, 360.0);
        // Container is 640x360 centered, so its top-left sits at x = 320.
        let p = vp.client_to_canvas(window, Vec2::new(320.0, 0.0));
        assert_eq!(p, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn degenerate_layout_maps_to_zero() {
        let vp = Viewport::new(Vec2::zero(), FitMode::Contain);
        assert_eq!(
            vp.client_to_canvas(Vec2::new(100.0, 100.0), Vec2::new(5.0, 5.0)),
            Vec2::zero()
        );
    }
}

//! View of the complex plane
//!
//! Holds the region of the plane being shown plus the escape-time
//! parameters, and the two pieces of math that act on it: the input mapper
//! (pixel interactions -> new view) and the render step (view -> uniforms).

pub mod mapper;
pub mod uniforms;

pub use mapper::MapperSettings;
pub use uniforms::MandelbrotUniforms;

// Compiled-in defaults, restored by `ViewState::reset`.
pub const DEFAULT_RE_MIN_RANGE: f64 = 5.0;
pub const DEFAULT_IM_MIN_RANGE: f64 = 5.0;
pub const DEFAULT_RE_CENTRE: f64 = 0.0;
pub const DEFAULT_IM_CENTRE: f64 = 0.0;
pub const DEFAULT_BREAKOUT: f64 = 2.0;
pub const DEFAULT_MAX_IT: f64 = 40.0;
pub const DEFAULT_POWER: i32 = 2;
pub const DEFAULT_ROTATION: f64 = 0.0;

/// Pixel dimensions of the surface being rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A viewport with no area cannot be mapped to or rendered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn size_f64(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Visible region of the plane and the iteration parameters.
///
/// `re_range`/`im_range` are derived: only [`ViewState::fit_ranges`] (called
/// by the render step) writes them. Input handlers move the centre and the
/// minimum ranges instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub re_min_range: f64,
    pub im_min_range: f64,
    pub re_centre: f64,
    pub im_centre: f64,
    pub re_range: f64,
    pub im_range: f64,
    pub breakout: f64,
    pub max_it: f64,
    pub power: i32,
    /// Radians, unbounded.
    pub rotation: f64,
    scroll_track: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            re_min_range: DEFAULT_RE_MIN_RANGE,
            im_min_range: DEFAULT_IM_MIN_RANGE,
            re_centre: DEFAULT_RE_CENTRE,
            im_centre: DEFAULT_IM_CENTRE,
            re_range: 0.0,
            im_range: 0.0,
            breakout: DEFAULT_BREAKOUT,
            max_it: DEFAULT_MAX_IT,
            power: DEFAULT_POWER,
            rotation: DEFAULT_ROTATION,
            scroll_track: 0.0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net scroll ticks since the last reset.
    #[inline]
    pub fn scroll_track(&self) -> f64 {
        self.scroll_track
    }

    /// Restore every parameter to the compiled-in defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Uniform scale (plane units per pixel) for `viewport`: the larger of
    /// the two axis stretches, so that both minimum ranges stay visible.
    pub fn stretch_for(&self, viewport: Viewport) -> Option<f64> {
        if viewport.is_empty() {
            return None;
        }
        let (w, h) = viewport.size_f64();
        let re_stretch = self.re_min_range / w;
        let im_stretch = self.im_min_range / h;
        Some(re_stretch.max(im_stretch))
    }

    /// Ranges the render step will derive for `viewport`.
    pub fn ranges_for(&self, viewport: Viewport) -> Option<(f64, f64)> {
        let stretch = self.stretch_for(viewport)?;
        let (w, h) = viewport.size_f64();
        Some((w * stretch, h * stretch))
    }

    /// Recompute and store the derived ranges. Returns the stretch used.
    pub fn fit_ranges(&mut self, viewport: Viewport) -> Option<f64> {
        let stretch = self.stretch_for(viewport)?;
        let (w, h) = viewport.size_f64();
        self.re_range = w * stretch;
        self.im_range = h * stretch;
        Some(stretch)
    }

    pub(crate) fn add_scroll(&mut self, ticks: f64) -> f64 {
        self.scroll_track += ticks;
        self.scroll_track
    }

    /// One-line summary used for the window title.
    pub fn info_string(&self) -> String {
        let sign = if self.im_centre < 0.0 { '-' } else { '+' };
        format!(
            "c = {:.6} {} {:.6}i | zoom {:+} | max_it {} | power {} | rot {:.1}°",
            self.re_centre,
            sign,
            self.im_centre.abs(),
            self.scroll_track(),
            self.max_it.max(1.0) as u32,
            self.power,
            self.rotation.to_degrees(),
        )
    }
}

//! Pixel-space interactions to complex-plane updates.
//!
//! All operations take the viewport they were observed on and do nothing
//! when it has no area. Ranges are taken from `ViewState::ranges_for`, which
//! is what the render step stores, so several inputs between two frames
//! compose correctly.

use super::{ViewState, Viewport, DEFAULT_IM_MIN_RANGE, DEFAULT_MAX_IT, DEFAULT_RE_MIN_RANGE};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tunables for the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperSettings {
    /// Range multiplier per scroll tick, in (0, 1).
    pub coeff_range: f64,
    /// Iteration multiplier per scroll tick, > 1.
    pub coeff_it: f64,
    /// Fraction of the visible range moved per arrow key press.
    pub pan_fraction: f64,
    /// Radians added per rotation key press.
    pub rotation_step: f64,
    /// Pixel scroll deltas (touchpads) are divided by this to get ticks.
    pub pixels_per_line: f64,
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            coeff_range: 0.9,
            coeff_it: 1.0325,
            pan_fraction: 0.075,
            rotation_step: PI / 16.0,
            pixels_per_line: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ViewState {
    /// Complex-plane point under pixel `(xpos, ypos)` (origin top-left),
    /// ignoring rotation.
    pub fn cursor_to_complex(&self, xpos: f64, ypos: f64, viewport: Viewport) -> Option<DVec2> {
        let (re_range, im_range) = self.ranges_for(viewport)?;
        let (w, h) = viewport.size_f64();
        let xcfrac = xpos / w - 0.5;
        let ycfrac = ypos / h - 0.5;
        Some(DVec2::new(
            self.re_centre + xcfrac * re_range,
            self.im_centre - ycfrac * im_range,
        ))
    }

    /// Move the view with a pointer drag of `(xdrag, ydrag)` pixels.
    pub fn drag(&mut self, xdrag: f64, ydrag: f64, viewport: Viewport) {
        let Some((re_range, im_range)) = self.ranges_for(viewport) else {
            return;
        };
        let (w, h) = viewport.size_f64();
        // Pixel rows grow downwards, the imaginary axis grows upwards.
        self.re_centre -= re_range * xdrag / w;
        self.im_centre += im_range * ydrag / h;
    }

    /// Zoom by `yoffset` scroll ticks about the cursor at `(xpos, ypos)`.
    ///
    /// Zoom-dependent values are recomputed from the defaults through the
    /// accumulated tick count rather than multiplied in place, so zooming in
    /// and back out lands on the same values.
    pub fn scroll(
        &mut self,
        yoffset: f64,
        xpos: f64,
        ypos: f64,
        viewport: Viewport,
        settings: &MapperSettings,
    ) {
        if yoffset == 0.0 {
            return;
        }
        let Some((re_range, im_range)) = self.ranges_for(viewport) else {
            return;
        };
        let (w, h) = viewport.size_f64();

        let scroll_track = self.add_scroll(yoffset);
        let range_from_def = settings.coeff_range.powf(scroll_track);
        let range_from_curr = settings.coeff_range.powf(yoffset);
        let it_from_def = settings.coeff_it.powf(scroll_track);

        let xcfrac = xpos / w - 0.5;
        let ycfrac = ypos / h - 0.5;

        let re_delta = re_range * range_from_curr - re_range;
        let im_delta = im_range * range_from_curr - im_range;
        self.re_centre -= re_delta * xcfrac;
        self.im_centre += im_delta * ycfrac;

        self.re_min_range = DEFAULT_RE_MIN_RANGE * range_from_def;
        self.im_min_range = DEFAULT_IM_MIN_RANGE * range_from_def;
        self.max_it = DEFAULT_MAX_IT * it_from_def;
    }

    /// Keyboard zoom: one tick about the centre of the viewport.
    pub fn zoom_step(&mut self, zoom_in: bool, viewport: Viewport, settings: &MapperSettings) {
        let (w, h) = viewport.size_f64();
        let ticks = if zoom_in { 1.0 } else { -1.0 };
        self.scroll(ticks, w * 0.5, h * 0.5, viewport, settings);
    }

    pub fn pan(&mut self, direction: PanDirection, viewport: Viewport, settings: &MapperSettings) {
        let Some((re_range, im_range)) = self.ranges_for(viewport) else {
            return;
        };
        let fraction = settings.pan_fraction;
        match direction {
            PanDirection::Left => self.re_centre -= re_range * fraction,
            PanDirection::Right => self.re_centre += re_range * fraction,
            PanDirection::Up => self.im_centre += im_range * fraction,
            PanDirection::Down => self.im_centre -= im_range * fraction,
        }
    }

    pub fn adjust_power(&mut self, delta: i32) {
        self.power = self.power.saturating_add(delta);
    }

    pub fn rotate(&mut self, steps: f64, settings: &MapperSettings) {
        self.rotation += steps * settings.rotation_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn viewport() -> Viewport {
        Viewport::new(800, 600)
    }

    #[test]
    fn test_single_tick_at_centre() {
        let mut view = ViewState::new();
        let settings = MapperSettings::default();
        view.scroll(1.0, 400.0, 300.0, viewport(), &settings);
        assert!((view.re_min_range - 4.5).abs() < EPS);
        assert!((view.im_min_range - 4.5).abs() < EPS);
        assert!((view.max_it - 40.0 * 1.0325).abs() < EPS);
        assert_eq!(view.re_centre, 0.0);
        assert_eq!(view.im_centre, 0.0);
        assert_eq!(view.scroll_track(), 1.0);
    }

    #[test]
    fn test_zoom_in_then_out_restores_parameters() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.scroll(2.0, 123.0, 456.0, viewport(), &settings);
        let before = (view.re_min_range, view.im_min_range, view.max_it);

        for _ in 0..7 {
            view.scroll(1.0, 610.0, 90.0, viewport(), &settings);
        }
        for _ in 0..7 {
            view.scroll(-1.0, 610.0, 90.0, viewport(), &settings);
        }

        assert!((view.re_min_range - before.0).abs() < EPS);
        assert!((view.im_min_range - before.1).abs() < EPS);
        assert!((view.max_it - before.2).abs() < 1e-7);
    }

    #[test]
    fn test_point_under_cursor_is_fixed() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.re_centre = -0.7;
        view.im_centre = 0.3;
        for (ticks, x, y) in [(1.0, 100.0, 50.0), (3.0, 700.0, 520.0), (-2.0, 10.0, 590.0)] {
            let before = view.cursor_to_complex(x, y, viewport()).unwrap();
            view.scroll(ticks, x, y, viewport(), &settings);
            view.fit_ranges(viewport());
            let after = view.cursor_to_complex(x, y, viewport()).unwrap();
            assert!((before - after).length() < EPS, "{before} != {after}");
        }
    }

    #[test]
    fn test_scrolls_between_frames_keep_cursor_point() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.fit_ranges(viewport());
        let before = view.cursor_to_complex(200.0, 150.0, viewport()).unwrap();
        // No render in between: stored ranges are stale after the first step.
        view.scroll(1.0, 200.0, 150.0, viewport(), &settings);
        view.scroll(1.0, 200.0, 150.0, viewport(), &settings);
        let after = view.cursor_to_complex(200.0, 150.0, viewport()).unwrap();
        assert!((before - after).length() < EPS);
    }

    #[test]
    fn test_zero_scroll_is_noop() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.scroll(0.0, 10.0, 10.0, viewport(), &settings);
        assert_eq!(view, ViewState::new());
    }

    #[test]
    fn test_empty_viewport_is_noop() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        let empty = Viewport::new(0, 600);
        view.scroll(1.0, 0.0, 0.0, empty, &settings);
        view.drag(10.0, 10.0, empty);
        view.pan(PanDirection::Left, empty, &settings);
        assert_eq!(view, ViewState::new());
    }

    #[test]
    fn test_drag_round_trip() {
        let mut view = ViewState::new();
        view.re_centre = 0.25;
        view.im_centre = -0.5;
        view.drag(37.0, -12.0, viewport());
        assert!(view.re_centre < 0.25);
        assert!(view.im_centre < -0.5);
        view.drag(-37.0, 12.0, viewport());
        assert!((view.re_centre - 0.25).abs() < 1e-12);
        assert!((view.im_centre + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_drag_moves_by_visible_range() {
        let mut view = ViewState::new();
        // 800x600 at min range 5 -> 6.666.. x 5.0 visible
        view.drag(80.0, 60.0, viewport());
        assert!((view.re_centre + 5.0 / 600.0 * 80.0).abs() < EPS);
        assert!((view.im_centre - 0.5).abs() < EPS);
    }

    #[test]
    fn test_pan_directions() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.pan(PanDirection::Up, viewport(), &settings);
        assert!((view.im_centre - 5.0 * 0.075).abs() < EPS);
        view.pan(PanDirection::Down, viewport(), &settings);
        assert!(view.im_centre.abs() < EPS);
        view.pan(PanDirection::Right, viewport(), &settings);
        assert!((view.re_centre - 800.0 * 5.0 / 600.0 * 0.075).abs() < EPS);
        view.pan(PanDirection::Left, viewport(), &settings);
        assert!(view.re_centre.abs() < EPS);
    }

    #[test]
    fn test_keyboard_zoom_keeps_centre() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.re_centre = -1.2;
        view.zoom_step(true, viewport(), &settings);
        view.zoom_step(true, viewport(), &settings);
        assert!((view.re_centre + 1.2).abs() < EPS);
        assert!((view.re_min_range - 5.0 * 0.81).abs() < EPS);
        view.zoom_step(false, viewport(), &settings);
        assert!((view.re_min_range - 4.5).abs() < EPS);
    }

    #[test]
    fn test_power_and_rotation() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.adjust_power(1);
        view.adjust_power(1);
        view.adjust_power(-1);
        assert_eq!(view.power, 3);
        view.rotate(1.0, &settings);
        view.rotate(1.0, &settings);
        assert!((view.rotation - PI / 8.0).abs() < EPS);
        view.rotate(-3.0, &settings);
        assert!((view.rotation + PI / 16.0).abs() < EPS);
    }

    #[test]
    fn test_reset_restores_everything() {
        let settings = MapperSettings::default();
        let mut view = ViewState::new();
        view.scroll(5.0, 10.0, 20.0, viewport(), &settings);
        view.drag(3.0, 4.0, viewport());
        view.adjust_power(4);
        view.rotate(3.0, &settings);
        view.breakout = 8.0;
        view.fit_ranges(viewport());
        view.reset();
        assert_eq!(view, ViewState::new());
        assert_eq!(view.scroll_track(), 0.0);
    }
}

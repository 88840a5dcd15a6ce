use super::{ViewState, Viewport};

/// Uniform block read by `mandelbrot.wgsl`. Field order and padding match the
/// WGSL struct (48 bytes, 16-byte multiple).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MandelbrotUniforms {
    /// Plane units per pixel on each axis (always uniform).
    pub stretch: [f32; 2],
    /// Plane coordinate of the bottom-left pixel.
    pub translation: [f32; 2],
    pub viewport: [f32; 2],
    pub breakout: f32,
    pub max_it: u32,
    pub power: i32,
    pub rotation: f32,
    pub _padding: [f32; 2],
}

impl MandelbrotUniforms {
    /// Render step: derive the shader inputs for `viewport`, writing the
    /// fitted ranges back into `view`. `None` for a viewport with no area;
    /// the frame should be skipped.
    pub fn from_view(view: &mut ViewState, viewport: Viewport) -> Option<Self> {
        let stretch = view.fit_ranges(viewport)?;
        let re_translation = view.re_centre - view.re_range / 2.0;
        let im_translation = view.im_centre - view.im_range / 2.0;
        Some(Self {
            stretch: [stretch as f32, stretch as f32],
            translation: [re_translation as f32, im_translation as f32],
            viewport: [viewport.width as f32, viewport.height as f32],
            breakout: view.breakout as f32,
            max_it: view.max_it.max(1.0) as u32,
            power: view.power,
            rotation: view.rotation as f32,
            _padding: [0.0; 2],
        })
    }
}

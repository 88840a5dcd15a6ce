//! GPU side of the viewer
//!
//! Owns the surface, the Mandelbrot pipeline and its buffers. Everything
//! here forwards to wgpu; the numbers it draws come from `crate::view`.

pub mod renderer;
pub mod shaders;

pub use renderer::Renderer;

use std::path::PathBuf;

/// Corner of the full-screen quad, in clip space.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
        }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(-1.0, 1.0),
    Vertex::new(1.0, 1.0),
    Vertex::new(-1.0, -1.0),
    Vertex::new(1.0, -1.0),
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("Shader compilation error: {0}")]
    Shader(String),
    #[error("Resource creation error: {0}")]
    Resource(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;

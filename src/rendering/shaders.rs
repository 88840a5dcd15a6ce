use super::{RenderError, RenderResult};
use std::{collections::HashMap, path::Path, sync::Arc};

pub const VERTEX_SHADER: &str = "mandelbrot_vs";
pub const FRAGMENT_SHADER: &str = "mandelbrot_fs";

pub const VERTEX_SOURCE: &str = include_str!("shaders/vertex.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("shaders/mandelbrot.wgsl");

/// Named WGSL modules. Compilation is checked inside a validation error
/// scope so a bad shader surfaces as `RenderError::Shader` instead of
/// reaching the device's uncaptured-error handler.
pub struct ShaderManager {
    device: Arc<wgpu::Device>,
    shader_modules: HashMap<String, wgpu::ShaderModule>,
}

impl ShaderManager {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self {
            device,
            shader_modules: HashMap::new(),
        }
    }

    pub async fn load_wgsl_str(&mut self, name: &str, source: &str) -> RenderResult<()> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(name),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        if let Some(err) = self.device.pop_error_scope().await {
            return Err(RenderError::Shader(format!("{name}: {err}")));
        }
        log::debug!("Compiled shader '{name}'");
        self.shader_modules.insert(name.to_string(), module);
        Ok(())
    }

    pub async fn load_wgsl_file(&mut self, name: &str, path: &Path) -> RenderResult<()> {
        let src = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_wgsl_str(name, &src).await
    }

    pub fn get(&self, name: &str) -> RenderResult<&wgpu::ShaderModule> {
        self.shader_modules
            .get(name)
            .ok_or_else(|| RenderError::Shader(format!("shader '{name}' not loaded")))
    }
}

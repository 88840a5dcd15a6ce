use anyhow::Context;
use clap::Parser;
use parking_lot::Mutex;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod config;
mod rendering;
mod session;
mod view;

use config::{Cli, ViewerConfig};
use rendering::Renderer;
use session::{Response, Session, CONTROLS_HELP};
use view::ViewState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::load(&cli).context("Failed to load configuration")?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
        .build(&event_loop)?;
    let window = Arc::new(window);

    let view = Arc::new(Mutex::new(ViewState::new()));
    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        view.clone(),
        config.fragment_shader.as_deref(),
    ))
    .context("Failed to set up the Mandelbrot renderer")?;
    let mut session = Session::new(view, config.mapper, renderer.viewport());

    log::info!("Mandelbrot viewer started");
    log::info!("{CONTROLS_HELP}");
    window.set_title(&format!("{} | {}", config.title, session.info_string()));

    let win_id = window.id();
    event_loop.run(move |event, target| {
        target.set_control_flow(ControlFlow::Wait);
        match event {
            Event::WindowEvent { event, window_id } if window_id == win_id => match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(size) => {
                    renderer.resize(size);
                    session.set_viewport(size.into());
                    window.request_redraw();
                }
                WindowEvent::RedrawRequested => match renderer.render() {
                    Ok(true) => {}
                    Ok(false) => log::trace!("Skipped frame for empty viewport"),
                    Err(rendering::RenderError::Surface(
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                    )) => {
                        log::warn!("Surface lost or outdated, reconfiguring");
                        renderer.reconfigure();
                        window.request_redraw();
                    }
                    Err(rendering::RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        log::error!("Out of GPU memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("Render error: {e}"),
                },
                other => match session.handle_window_event(&other) {
                    Response::Exit => target.exit(),
                    Response::Redraw => {
                        window.set_cursor_icon(session.cursor_icon());
                        window.set_title(&format!("{} | {}", config.title, session.info_string()));
                        window.request_redraw();
                    }
                    Response::Ignored => {}
                },
            },
            _ => {}
        }
    })?;
    Ok(())
}

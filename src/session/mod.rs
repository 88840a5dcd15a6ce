//! Interaction context
//!
//! `Session` is owned by the event loop closure and turns winit events into
//! mapper calls on the shared view. Each update takes the view lock once, so
//! the renderer never sees half an update.

pub mod keys;

pub use keys::{action_for_key, Action, CONTROLS_HELP};

use crate::view::{MapperSettings, ViewState, Viewport};
use parking_lot::Mutex;
use std::sync::Arc;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;
use winit::window::CursorIcon;

/// Left-button drag tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer held down; `last` is the previous cursor position.
    Dragging { last: (f64, f64) },
}

/// What the event loop should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ignored,
    /// The view or cursor changed.
    Redraw,
    Exit,
}

pub struct Session {
    view: Arc<Mutex<ViewState>>,
    settings: MapperSettings,
    viewport: Viewport,
    cursor: (f64, f64),
    drag: DragState,
}

impl Session {
    pub fn new(view: Arc<Mutex<ViewState>>, settings: MapperSettings, viewport: Viewport) -> Self {
        Self {
            view,
            settings,
            viewport,
            cursor: (0.0, 0.0),
            drag: DragState::Idle,
        }
    }

    #[inline]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self.drag_state() {
            DragState::Idle => CursorIcon::Default,
            DragState::Dragging { .. } => CursorIcon::Grabbing,
        }
    }

    /// View summary followed by the plane point under the cursor.
    pub fn info_string(&self) -> String {
        let view = self.view.lock();
        let mut info = view.info_string();
        let (x, y) = self.cursor;
        if let Some(p) = view.cursor_to_complex(x, y, self.viewport) {
            info.push_str(&format!(" | cursor {:.6} {:+.6}i", p.x, p.y));
        }
        info
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Response {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.on_key(code, event.state),
                PhysicalKey::Unidentified(_) => Response::Ignored,
            },
            WindowEvent::CursorMoved { position, .. } => self.on_cursor_moved(position.x, position.y),
            WindowEvent::CursorLeft { .. } => self.on_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => self.on_mouse_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => self.on_scroll(*delta),
            _ => Response::Ignored,
        }
    }

    /// Presses and auto-repeats act; releases don't.
    pub fn on_key(&mut self, code: winit::keyboard::KeyCode, state: ElementState) -> Response {
        if state != ElementState::Pressed {
            return Response::Ignored;
        }
        match action_for_key(code) {
            Some(action) => self.apply(action),
            None => Response::Ignored,
        }
    }

    pub fn apply(&mut self, action: Action) -> Response {
        let mut view = self.view.lock();
        match action {
            Action::Exit => return Response::Exit,
            Action::ZoomIn => view.zoom_step(true, self.viewport, &self.settings),
            Action::ZoomOut => view.zoom_step(false, self.viewport, &self.settings),
            Action::Pan(direction) => view.pan(direction, self.viewport, &self.settings),
            Action::Power(delta) => view.adjust_power(delta),
            Action::Rotate(steps) => view.rotate(steps, &self.settings),
            Action::Reset => view.reset(),
        }
        log::debug!("{action:?} -> {}", view.info_string());
        Response::Redraw
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Response {
        self.cursor = (x, y);
        match self.drag {
            DragState::Idle => Response::Ignored,
            DragState::Dragging { last } => {
                self.view.lock().drag(x - last.0, y - last.1, self.viewport);
                self.drag = DragState::Dragging { last: (x, y) };
                Response::Redraw
            }
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) -> Response {
        if button != MouseButton::Left {
            return Response::Ignored;
        }
        self.drag = match state {
            ElementState::Pressed => DragState::Dragging { last: self.cursor },
            ElementState::Released => DragState::Idle,
        };
        Response::Redraw
    }

    pub fn on_cursor_left(&mut self) -> Response {
        if self.drag == DragState::Idle {
            return Response::Ignored;
        }
        self.drag = DragState::Idle;
        Response::Redraw
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) -> Response {
        let ticks = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y / self.settings.pixels_per_line,
        };
        if ticks == 0.0 {
            return Response::Ignored;
        }
        let (x, y) = self.cursor;
        self.view
            .lock()
            .scroll(ticks, x, y, self.viewport, &self.settings);
        Response::Redraw
    }
}

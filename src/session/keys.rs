//! Keyboard bindings.

use crate::view::mapper::PanDirection;
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Exit,
    ZoomIn,
    ZoomOut,
    Pan(PanDirection),
    /// Change the iteration exponent by this many steps.
    Power(i32),
    /// Rotate by this many rotation steps.
    Rotate(f64),
    Reset,
}

/// Physical key -> action. Layout independent, so `Equal` is the `=`/`+` key.
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Escape => Action::Exit,
        KeyCode::Equal | KeyCode::NumpadAdd => Action::ZoomIn,
        KeyCode::Minus | KeyCode::NumpadSubtract => Action::ZoomOut,
        KeyCode::ArrowLeft => Action::Pan(PanDirection::Left),
        KeyCode::ArrowRight => Action::Pan(PanDirection::Right),
        KeyCode::ArrowUp => Action::Pan(PanDirection::Up),
        KeyCode::ArrowDown => Action::Pan(PanDirection::Down),
        KeyCode::KeyW => Action::Power(1),
        KeyCode::KeyQ => Action::Power(-1),
        KeyCode::KeyA => Action::Rotate(1.0),
        KeyCode::KeyS => Action::Rotate(-1.0),
        KeyCode::KeyR => Action::Reset,
        _ => return None,
    };
    Some(action)
}

pub const CONTROLS_HELP: &str = "Controls: drag/arrows pan  wheel or +/- zoom  W/Q power  A/S rotate  R reset  Esc quit";

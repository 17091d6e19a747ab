use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use keyflick_core::PointerAction;

use crate::app::App;

/// Handle a key press and return true if the app should quit
pub fn handle_key(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') => app.clear_text(),
        KeyCode::Char('r') => app.reload_settings(),
        _ => {}
    }
    false
}

/// Translate left-button mouse input into pointer 0
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Down,
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Move,
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Up,
        _ => return,
    };
    app.pointer(action, mouse.column, mouse.row);
}

mod footer;
mod header;
mod keyboard;
mod output_panel;

use std::rc::Rc;

use ratatui::prelude::*;

use crate::app::{App, KEY_CELLS};

fn root_chunks(area: Rect, keyboard_rows: usize) -> Rc<[Rect]> {
    let keyboard_height = (keyboard_rows as u16).saturating_mul(KEY_CELLS);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Min(3),                  // Committed text and history
            Constraint::Length(keyboard_height), // Keyboard
            Constraint::Length(1),               // Footer
        ])
        .split(area)
}

/// Area the keyboard occupies inside the frame
pub fn keyboard_area(area: Rect, keyboard_rows: usize) -> Rect {
    root_chunks(area, keyboard_rows)[2]
}

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = root_chunks(frame.area(), app.machine.layout().rows().len());

    header::render(frame, app, root[0]);
    output_panel::render(frame, app, root[1]);
    keyboard::render(frame, app, root[2]);
    footer::render(frame, app, root[3]);
}

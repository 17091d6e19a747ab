use std::time::Instant;

use ratatui::layout::Rect;

use keyflick_core::{
    Flags, GeometryConfig, GestureConfig, GestureStateMachine, Key, KeyKind, KeyValue,
    KeyboardGeometry, KeyboardHost, KeyboardLayout, PointerAction, PointerEvent, Settings,
};

use crate::ui;

/// Terminal rows per keyboard row
pub const KEY_CELLS: u16 = 5;

const MAX_HISTORY: usize = 200;

/// Host that edits a plain text buffer
#[derive(Debug, Default)]
pub struct TextHost {
    pub text: String,
    pub history: Vec<String>,
}

impl TextHost {
    fn record(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }
}

impl KeyboardHost for TextHost {
    fn key_up(&mut self, value: &KeyValue, flags: Flags) {
        match value.kind() {
            KeyKind::Char(c) => self.text.push(*c),
            KeyKind::String(s) => self.text.push_str(s),
            KeyKind::KeyEvent(key) if *key == Key::BACKSPACE => {
                self.text.pop();
            }
            KeyKind::KeyEvent(key) if *key == Key::ENTER => self.text.push('\n'),
            KeyKind::KeyEvent(key) if *key == Key::TAB => self.text.push('\t'),
            KeyKind::KeyEvent(_) | KeyKind::Modifier(_) | KeyKind::Removed => {}
        }

        let held: Vec<&str> = [
            (Flags::LOCKED, "locked"),
            (Flags::SHIFT, "shift"),
            (Flags::KEEP_ON, "held"),
        ]
        .into_iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, label)| label)
        .collect();

        if held.is_empty() {
            self.record(format!("{} ({})", value.symbol(false), value.name()));
        } else {
            self.record(format!(
                "{} ({}) [{}]",
                value.symbol(false),
                value.name(),
                held.join(",")
            ));
        }
    }
}

pub struct App {
    pub machine: GestureStateMachine,
    pub host: TextHost,
    pub keyboard_area: Rect,
    pub status: String,
    settings: Settings,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            machine: build_machine(settings),
            host: TextHost::default(),
            keyboard_area: Rect::default(),
            status: "Ready".to_string(),
            settings: settings.clone(),
        }
    }

    /// Fit the keyboard to the terminal, re-sizing keys when the area changes
    pub fn resize(&mut self, frame_area: Rect) {
        let area = ui::keyboard_area(frame_area, self.machine.layout().rows().len());
        if area == self.keyboard_area {
            return;
        }
        self.keyboard_area = area;
        let geometry = KeyboardGeometry::for_width(area.width as f32, &cell_geometry(&self.settings));
        self.machine.set_geometry(geometry);
    }

    /// Feed a mouse position, in terminal cells, to the gesture machine
    pub fn pointer(&mut self, action: PointerAction, column: u16, row: u16) {
        let x = f32::from(column) - f32::from(self.keyboard_area.x) + 0.5;
        let y = f32::from(row) - f32::from(self.keyboard_area.y) + 0.5;
        let event = PointerEvent::new(action, 0, x, y, Instant::now());
        self.machine.handle_event(&event, &mut self.host);
    }

    pub fn clear_text(&mut self) {
        self.host.text.clear();
        self.status = "Text cleared".to_string();
    }

    /// Re-read the settings file and rebuild the keyboard
    pub fn reload_settings(&mut self) {
        match self.settings.reload() {
            Ok(()) => {
                self.machine = build_machine(&self.settings);
                self.keyboard_area = Rect::default();
                self.status = "Settings reloaded".to_string();
            }
            Err(err) => {
                self.status = format!("Reload failed: {}", err);
            }
        }
    }
}

/// Geometry in terminal cells: one key row is `KEY_CELLS` high and the
/// keyboard fills its area edge to edge
fn cell_geometry(settings: &Settings) -> GeometryConfig {
    GeometryConfig {
        keys_per_row: settings.geometry().keys_per_row,
        key_height: f32::from(KEY_CELLS),
        vertical_margin: 0.0,
        horizontal_margin: 0.0,
    }
}

/// Drag distances are configured in layout units; scale them to cells
fn cell_gesture(settings: &Settings) -> GestureConfig {
    let mut gesture = *settings.gesture();
    gesture.sub_value_dist *= f32::from(KEY_CELLS) / settings.geometry().key_height;
    gesture
}

fn build_machine(settings: &Settings) -> GestureStateMachine {
    GestureStateMachine::new(
        KeyboardLayout::qwerty(),
        KeyboardGeometry::for_width(0.0, &cell_geometry(settings)),
        cell_gesture(settings),
    )
    .with_resolver(settings.resolver())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new(&Settings::new());
        app.resize(Rect::new(0, 0, 100, 30));
        app
    }

    fn tap(app: &mut App, column: u16, row: u16) {
        app.pointer(PointerAction::Down, column, row);
        app.pointer(PointerAction::Up, column, row);
    }

    #[test]
    fn test_keyboard_fills_width() {
        let app = app();
        assert_eq!(app.keyboard_area.width, 100);
        assert_eq!(app.keyboard_area.height, KEY_CELLS * 4);
        assert_eq!(app.machine.geometry().key_width, 10.0);
    }

    #[test]
    fn test_tap_commits_text() {
        let mut app = app();
        let area = app.keyboard_area;

        tap(&mut app, area.x + 5, area.y + 2);
        tap(&mut app, area.x + 15, area.y + 2);

        assert_eq!(app.host.text, "qw");
        assert_eq!(app.host.history.len(), 2);
    }

    #[test]
    fn test_drag_selects_corner() {
        let mut app = app();
        let area = app.keyboard_area;

        app.pointer(PointerAction::Down, area.x + 5, area.y + 2);
        app.pointer(PointerAction::Move, area.x + 6, area.y + 1);
        app.pointer(PointerAction::Up, area.x + 6, area.y + 1);

        assert_eq!(app.host.text, "1");
    }

    #[test]
    fn test_backspace_edits_buffer() {
        let mut host = TextHost::default();
        host.key_up(&KeyValue::char('a'), Flags::empty());
        host.key_up(&KeyValue::string("bc"), Flags::empty());
        host.key_up(
            &KeyValue::key_event("backspace", "⌫", Key::BACKSPACE),
            Flags::empty(),
        );
        assert_eq!(host.text, "ab");
        assert_eq!(host.history.len(), 3);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut host = TextHost::default();
        for _ in 0..MAX_HISTORY + 10 {
            host.key_up(&KeyValue::char('x'), Flags::empty());
        }
        assert_eq!(host.history.len(), MAX_HISTORY);
    }

    #[test]
    fn test_reload_without_file() {
        let mut app = app();
        app.reload_settings();
        assert!(app.status.starts_with("Reload failed"));
    }

    #[test]
    fn test_drag_distance_scaled_to_cells() {
        let gesture = cell_gesture(&Settings::new());
        assert!((gesture.sub_value_dist - 0.6).abs() < 1e-5);
    }
}

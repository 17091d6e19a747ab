mod palette;

use ratatui::prelude::*;

use keyflick_core::SlotState;

pub use palette::Palette;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    // Panel border style
    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.palette.border_default)
    }

    pub fn panel_title(&self, title: &str) -> Line<'_> {
        Line::styled(
            format!(" {} ", title),
            Style::default()
                .fg(self.palette.accent_primary)
                .add_modifier(Modifier::BOLD),
        )
    }

    // Key outline by pressed state
    pub fn key_border(&self, state: SlotState) -> Style {
        match state {
            SlotState::Up => Style::default().fg(self.palette.key_up),
            SlotState::Down => Style::default()
                .fg(self.palette.key_down)
                .add_modifier(Modifier::BOLD),
            SlotState::Locked => Style::default()
                .fg(self.palette.key_locked)
                .add_modifier(Modifier::BOLD),
        }
    }

    // Main key label
    pub fn key_label(&self, state: SlotState) -> Style {
        match state {
            SlotState::Up => Style::default()
                .fg(self.palette.text_primary)
                .add_modifier(Modifier::BOLD),
            SlotState::Down => Style::default()
                .fg(self.palette.key_down)
                .add_modifier(Modifier::BOLD),
            SlotState::Locked => Style::default()
                .fg(self.palette.key_locked)
                .add_modifier(Modifier::BOLD),
        }
    }

    // Corner labels
    pub fn key_corner(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Held modifier badge in the header
    pub fn modifier_badge(&self, locked: bool) -> Style {
        let bg = if locked {
            self.palette.key_locked
        } else {
            self.palette.accent_success
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    // Muted text (hints, labels)
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Committed text cursor
    pub fn cursor(&self) -> Style {
        Style::default().fg(self.palette.border_focused)
    }

    // Key hint style (the key part like "q")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.accent_warning)
    }

    pub fn status_error(&self) -> Style {
        Style::default().fg(self.palette.accent_danger)
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}

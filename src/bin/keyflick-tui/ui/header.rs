use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use keyflick_core::Flags;

use crate::app::App;
use crate::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let modifiers = app.machine.active_modifiers();

    let mut spans = vec![Span::styled(
        "keyflick ",
        t.text_primary().add_modifier(Modifier::BOLD),
    )];

    if modifiers.is_empty() {
        spans.push(Span::styled("no modifiers ", t.text_muted()));
    } else {
        let locked = app.machine.aggregate_flags().contains(Flags::LOCKED);
        spans.push(Span::styled(format!("[{}]", modifiers), t.modifier_badge(locked)));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled("q:quit", t.key_hint()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let status_style = if app.status.starts_with("Reload failed") {
        t.status_error()
    } else {
        t.status_message()
    };

    let line = Line::from(vec![
        Span::styled(format!("{}  ", app.status), status_style),
        Span::styled("click", t.key_hint()),
        Span::styled(":tap  ", t.text_muted()),
        Span::styled("drag", t.key_hint()),
        Span::styled(":corner  ", t.text_muted()),
        Span::styled("c", t.key_hint()),
        Span::styled(":clear  ", t.text_muted()),
        Span::styled("r", t.key_hint()),
        Span::styled(":reload", t.text_muted()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

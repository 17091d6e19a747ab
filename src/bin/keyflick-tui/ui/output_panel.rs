use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    render_text(frame, app, chunks[0]);
    render_history(frame, app, chunks[1]);
}

fn render_text(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("TEXT"))
        .borders(Borders::ALL)
        .border_style(t.panel_border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = app
        .host
        .text
        .split('\n')
        .map(|l| Line::styled(l.replace('\t', "    "), t.text_primary()))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("▏", t.cursor()));
    }

    // Keep the cursor line visible
    let visible_height = inner.height as usize;
    let start = lines.len().saturating_sub(visible_height);
    let text = Paragraph::new(lines.split_off(start)).wrap(Wrap { trim: false });
    frame.render_widget(text, inner);
}

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("KEYS"))
        .borders(Borders::ALL)
        .border_style(t.panel_border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.host.history.is_empty() {
        let empty = Paragraph::new(Line::styled("Click a key to type.", t.text_muted()));
        frame.render_widget(empty, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.host.history.len().saturating_sub(visible_height);
    let lines: Vec<Line> = app.host.history[start..]
        .iter()
        .map(|entry| Line::styled(entry.clone(), t.text_secondary()))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use keyflick_core::{Direction as KeyDirection, SlotId, SlotRect, SlotState};

use crate::app::App;
use crate::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = app.machine.layout();
    let geometry = app.machine.geometry();

    for (row_index, row) in layout.rows().iter().enumerate() {
        for col in 0..row.slots().len() {
            let id = SlotId::new(row_index, col);
            let Some(cell) = geometry
                .slot_rect(layout, id)
                .and_then(|rect| to_cells(rect, area))
            else {
                continue;
            };
            render_slot(frame, app, id, cell);
        }
    }
}

/// Snap a slot's box onto the terminal grid, dropping slots too small to draw
fn to_cells(rect: SlotRect, area: Rect) -> Option<Rect> {
    let left = rect.x.round().max(0.0) as u16;
    let right = (rect.x + rect.width).round().max(0.0) as u16;
    let top = rect.y.round().max(0.0) as u16;
    let bottom = (rect.y + rect.height).round().max(0.0) as u16;

    let cell = Rect::new(
        area.x.saturating_add(left),
        area.y.saturating_add(top),
        right.saturating_sub(left),
        bottom.saturating_sub(top),
    )
    .intersection(area);

    (cell.width >= 3 && cell.height >= 3).then_some(cell)
}

fn render_slot(frame: &mut Frame, app: &App, id: SlotId, cell: Rect) {
    let t = theme();
    let state = app.machine.slot_state(id);
    let label = |direction| app.machine.label(id, direction).unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.key_border(state))
        .border_type(match state {
            SlotState::Up => BorderType::Rounded,
            SlotState::Down => BorderType::Thick,
            SlotState::Locked => BorderType::Double,
        });
    let inner = block.inner(cell);
    frame.render_widget(block, cell);

    let width = inner.width as usize;
    let center = Line::styled(label(KeyDirection::Center), t.key_label(state)).centered();

    let lines = if inner.height >= 3 {
        vec![
            Line::styled(
                spread(&label(KeyDirection::TopLeft), &label(KeyDirection::TopRight), width),
                t.key_corner(),
            ),
            center,
            Line::styled(
                spread(
                    &label(KeyDirection::BottomLeft),
                    &label(KeyDirection::BottomRight),
                    width,
                ),
                t.key_corner(),
            ),
        ]
    } else {
        vec![center]
    };

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Put `left` and `right` at opposite ends of a `width` wide line
fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    if used >= width {
        return format!("{}{}", left, right);
    }
    format!("{}{}{}", left, " ".repeat(width - used), right)
}

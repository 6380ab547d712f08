use ratatui::layout::{Constraint, Layout, Rect};

use super::constants::{BUTTON_GAP, STATUS_HEIGHT, TOOLBAR_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub toolbar: Rect,
    pub body: Rect,
    pub status: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let [toolbar, body, status] = Layout::vertical([
        Constraint::Length(TOOLBAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);
    Areas {
        toolbar,
        body,
        status,
    }
}

/// A rect of the given percentage of `area`, centered in it.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    centered_fixed(area, width, height)
}

/// A rect of at most `width` x `height`, centered in `area`.
pub fn centered_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// One-row slots laid left to right for buttons of the given widths,
/// clipped to `area`.
pub fn button_slots(area: Rect, widths: &[u16]) -> Vec<Rect> {
    let mut x = area.x;
    let mut slots = Vec::with_capacity(widths.len());
    for &width in widths {
        let width = width.min(area.right().saturating_sub(x));
        slots.push(Rect::new(x, area.y, width, area.height.min(1)));
        x = x.saturating_add(width).saturating_add(BUTTON_GAP).min(area.right());
    }
    slots
}

/// Screen rows of a bordered table with a one-line header, for the rows
/// visible from `offset`. Yields `(row_index, rect)`.
pub fn table_rows(area: Rect, offset: usize, count: usize) -> Vec<(usize, Rect)> {
    let inner_x = area.x.saturating_add(1);
    let inner_width = area.width.saturating_sub(2);
    let first_row = area.y.saturating_add(2);
    let last_row = area.bottom().saturating_sub(1);
    (offset..count)
        .zip(first_row..last_row)
        .map(|(index, y)| (index, Rect::new(inner_x, y, inner_width, 1)))
        .collect()
}

//! Pure screen geometry. No rendering, no state.

use ratatui::layout::Rect;

pub const HEADER_HEIGHT: u16 = 2;
/// Border plus four entries.
pub const LOG_HEIGHT: u16 = 6;
pub const STATUS_HEIGHT: u16 = 1;

/// Width of the add-device prompt box.
pub const PROMPT_WIDTH: u16 = 50;
pub const PROMPT_HEIGHT: u16 = 3;

/// Columns of label and value text on a sensor line, before the bar.
const SENSOR_TEXT_WIDTH: u16 = 30;
const MIN_INTERIOR_WIDTH: u16 = 10;

/// The four horizontal bands of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    pub header: Rect,
    pub grid: Rect,
    pub log: Rect,
    pub status: Rect,
}

/// Split the frame into header | grid | log | status.
///
/// Fixed bands keep their height as long as they fit, claimed from the
/// bottom up; the grid gets whatever is left and may be empty.
pub fn frame_areas(area: Rect) -> FrameAreas {
    let status_h = STATUS_HEIGHT.min(area.height);
    let log_h = LOG_HEIGHT.min(area.height - status_h);
    let header_h = HEADER_HEIGHT.min(area.height - status_h - log_h);
    let grid_h = area.height - status_h - log_h - header_h;

    let band = |y: u16, height: u16| Rect::new(area.x, y, area.width, height);
    let header = band(area.y, header_h);
    let grid = band(header.bottom(), grid_h);
    let log = band(grid.bottom(), log_h);
    let status = band(log.bottom(), status_h);

    FrameAreas {
        header,
        grid,
        log,
        status,
    }
}

/// Number of grid columns for `n` devices.
pub fn grid_cols(n: usize) -> usize {
    match n {
        0..=2 => n,
        4 => 2,
        _ => 3,
    }
}

/// Rects for `n` cells laid out row-major in `grid`.
///
/// Columns are `floor(W / cols)` wide except the last, which takes the
/// remainder; rows are a uniform `floor(H / rows)`.
pub fn cell_rects(grid: Rect, n: usize) -> Vec<Rect> {
    let cols = grid_cols(n);
    if cols == 0 {
        return Vec::new();
    }
    let rows = n.div_ceil(cols);

    let cols_u16 = u16::try_from(cols).unwrap_or(u16::MAX);
    let rows_u16 = u16::try_from(rows).unwrap_or(u16::MAX);
    let col_w = grid.width / cols_u16;
    let row_h = grid.height / rows_u16;

    (0..n)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            let col = u16::try_from(col).unwrap_or(u16::MAX);
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            let x = grid.x + col * col_w;
            let width = if usize::from(col) == cols - 1 {
                grid.width - col * col_w
            } else {
                col_w
            };
            Rect::new(x, grid.y + row * row_h, width, row_h)
        })
        .collect()
}

/// Usable text width inside a cell of `cell_width` (border + padding).
pub fn interior_width(cell_width: u16) -> u16 {
    cell_width.saturating_sub(4).max(MIN_INTERIOR_WIDTH)
}

/// Width of a sensor bar for the given interior width; zero means no bar.
pub fn bar_width(interior: u16) -> u16 {
    interior.saturating_sub(SENSOR_TEXT_WIDTH)
}

/// Prompt box centered in `grid`, clipped to `frame`.
pub fn prompt_rect(grid: Rect, frame: Rect) -> Rect {
    let width = PROMPT_WIDTH.min(frame.width);
    let x = grid.x + grid.width.saturating_sub(width) / 2;
    let y = grid.y + grid.height.saturating_sub(PROMPT_HEIGHT) / 2;
    Rect::new(x, y, width, PROMPT_HEIGHT).intersection(frame)
}

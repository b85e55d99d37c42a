//! Synthetic strip images for unit tests.

use ndarray::Array2;

/// One ink trace drawn onto a synthetic strip
#[derive(Debug, Clone, Copy)]
pub(crate) enum StripTrace {
    /// Full-width horizontal line on a single row
    Row(usize),
    /// Straight line from `start_row` at column 0 to `end_row` at the last
    /// column, inked only on every `every`-th column
    Slope {
        start_row: usize,
        end_row: usize,
        every: usize,
    },
}

/// Render a `height` x `width` grid of `bg_pix` with the given traces in `ink_pix`
pub(crate) fn draw_strip(
    width: usize,
    height: usize,
    traces: &[StripTrace],
    bg_pix: u8,
    ink_pix: u8,
) -> Array2<u8> {
    let mut grid = Array2::from_elem((height, width), bg_pix);
    for trace in traces {
        match *trace {
            StripTrace::Row(row) => grid.row_mut(row).fill(ink_pix),
            StripTrace::Slope {
                start_row,
                end_row,
                every,
            } => {
                let last = width.saturating_sub(1).max(1) as f64;
                for x in (0..width).step_by(every.max(1)) {
                    let t = x as f64 / last;
                    let row = start_row as f64 + (end_row as f64 - start_row as f64) * t;
                    grid[[row.round() as usize, x]] = ink_pix;
                }
            }
        }
    }
    grid
}

/// Strip with a wandering FHR trace and a UC trace, both fully inked
pub(crate) fn wavy_strip(width: usize, height: usize) -> Array2<u8> {
    let mut grid = Array2::zeros((height, width));
    let split = (0.55 * height as f64).round() as usize;
    for x in 0..width {
        let phase = x as f64 / 7.0;
        let fhr_row = (split as f64 * (0.5 + 0.3 * phase.sin())) as usize;
        let uc_row = split + ((height - split) as f64 * (0.5 + 0.3 * phase.cos())) as usize;
        grid[[fhr_row, x]] = 255;
        grid[[uc_row.min(height - 1), x]] = 255;
    }
    grid
}

use ndarray::ArrayView2;

/// Vertical position of the dominant ink trace in every column of a region
///
/// A pixel is ink when its (polarity-normalized) intensity is strictly
/// greater than `ink_threshold`. The column position is the median row of its
/// ink pixels, so isolated specks and crossing gridlines pull it less than a
/// mean would. Columns without ink yield `None`.
pub fn trace_positions(region: ArrayView2<'_, u8>, ink_threshold: u8) -> Vec<Option<f64>> {
    let mut ink_rows = Vec::with_capacity(region.nrows());

    region
        .columns()
        .into_iter()
        .map(|column| {
            ink_rows.clear();
            ink_rows.extend(
                column
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v > ink_threshold)
                    .map(|(row, _)| row),
            );
            median_row(&ink_rows)
        })
        .collect()
}

/// Median of ascending row indices; the mean of the middle pair for even counts
fn median_row(rows: &[usize]) -> Option<f64> {
    let n = rows.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(rows[n / 2] as f64)
    } else {
        Some((rows[n / 2 - 1] + rows[n / 2]) as f64 / 2.0)
    }
}

/// Replace gaps by linear interpolation between the nearest defined samples
///
/// Leading and trailing gaps take the nearest defined value. When nothing is
/// defined at all, every sample becomes `empty_value`.
pub fn fill_gaps(positions: &[Option<f64>], empty_value: f64) -> Vec<f64> {
    let anchors: Vec<(usize, f64)> = positions
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.map(|v| (i, v)))
        .collect();

    let (first, last) = match (anchors.first(), anchors.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return vec![empty_value; positions.len()],
    };

    let mut filled = vec![first.1; positions.len()];

    for pair in anchors.windows(2) {
        let (i0, v0) = pair[0];
        let (i1, v1) = pair[1];
        let span = (i1 - i0) as f64;
        for (offset, slot) in filled[i0..i1].iter_mut().enumerate() {
            *slot = v0 + (v1 - v0) * offset as f64 / span;
        }
    }

    for slot in &mut filled[last.0..] {
        *slot = last.1;
    }

    filled
}

/// Number of `None` entries
pub fn count_gaps(positions: &[Option<f64>]) -> usize {
    positions.iter().filter(|p| p.is_none()).count()
}

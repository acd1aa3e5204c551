//! Pure transforms on polyomino cell lists: normalization, quarter-turn
//! rotation, and anchored translation.
//!
//! All shapes, boards and pieces alike, pass through [`normalize`] so that
//! shape comparison and translation arithmetic are well-defined.

/// A single grid cell, as a `(row, column)` pair.
///
/// Coordinates are signed because rotating a shape about the origin produces
/// negative intermediates; [`normalize`] translates them back so the minimum
/// row and column are both 0.
pub type Cell = (i32, i32);

/// Return a normalized copy of `cells`: sorted by row then column, with
/// duplicates collapsed, translated so the minimum row and minimum column
/// are both 0.
///
/// Normalizing an already-normalized list returns it unchanged. An empty
/// input yields an empty output.
pub fn normalize(cells: &[Cell]) -> Vec<Cell> {
    let mut cells = cells.to_vec();
    cells.sort();
    cells.dedup();

    if let (Some(min_row), Some(min_col)) = (
        cells.iter().map(|&(row, _)| row).min(),
        cells.iter().map(|&(_, col)| col).min(),
    ) {
        for (row, col) in &mut cells {
            *row -= min_row;
            *col -= min_col;
        }
    }

    cells
}

/// Rotate every cell by `quarter_turns` × 90° about the origin and
/// renormalize the result.
///
/// The rotation uses the integer cosine/sine cycles `{1, 0, -1, 0}` and
/// `{0, 1, 0, -1}`, so four quarter turns reproduce the original cell set.
pub fn rotate(cells: &[Cell], quarter_turns: usize) -> Vec<Cell> {
    const COS: [i32; 4] = [1, 0, -1, 0];
    const SIN: [i32; 4] = [0, 1, 0, -1];

    let (cos, sin) = (COS[quarter_turns % 4], SIN[quarter_turns % 4]);

    let rotated: Vec<Cell> = cells
        .iter()
        .map(|&(row, col)| (row * cos - col * sin, row * sin + col * cos))
        .collect();

    normalize(&rotated)
}

/// Translate `cells` so that its first element lands on `anchor`.
///
/// Callers pass sorted (normalized) cell lists, making the first element the
/// topmost-leftmost cell of the shape.
pub fn shift(cells: &[Cell], anchor: Cell) -> Vec<Cell> {
    let Some(&(first_row, first_col)) = cells.first() else {
        return Vec::new();
    };

    cells
        .iter()
        .map(|&(row, col)| (row - first_row + anchor.0, col - first_col + anchor.1))
        .collect()
}

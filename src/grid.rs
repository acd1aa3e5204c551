use std::fmt::Debug;

/// A 0/1 constraint matrix that can be permuted to enumerate exact covers
/// with Algorithm X.
///
/// Columns are constraints and rows are candidate placements; the solver
/// drives the search entirely through this trait, so the matrix
/// representation (dense bookkeeping or dancing links) is interchangeable.
pub trait Grid {
    /// The type representing a column in the grid.
    type Column: Debug + Copy;
    /// The type of an iterator over all the uncovered columns in the grid.
    type UncoveredColumnsIter: Iterator<Item = Self::Column>;
    /// The type representing a row in the grid.
    type Row: Debug + Copy;
    /// The type of an iterator over all uncovered rows in a column.
    type UncoveredRowsIter: Iterator<Item = Self::Row>;
    /// The type of an iterator over all uncovered columns in a row.
    type UncoveredColumnsInRowIter: Iterator<Item = Self::Column>;

    /// Create a new grid with the given number of columns and the given
    /// coordinates filled.
    ///
    /// Coordinates are `(row, column)` pairs, 0-indexed. Row indices may be
    /// sparse; a row exists in the grid only where it has filled cells.
    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self;

    /// Cover the entire column, removing every row that appears in it from
    /// the rest of the grid.
    ///
    /// # Panics
    ///
    /// Panics if the same `column` is covered again without an intermediate
    /// `uncover`.
    fn cover(&self, column: Self::Column);

    /// Uncover the entire column, restoring every row that appears in it.
    ///
    /// Covers must be undone in reverse order of the corresponding `cover`
    /// calls.
    ///
    /// # Panics
    ///
    /// Panics if the column is not the most recently covered one.
    fn uncover(&self, column: Self::Column);

    /// Return an iterator over the columns that are currently uncovered.
    fn uncovered_columns(&self) -> Self::UncoveredColumnsIter;

    /// Return an iterator over the uncovered rows present in this column.
    fn uncovered_rows_in_column(&self, column: Self::Column) -> Self::UncoveredRowsIter;

    /// Return a stable unique identifier for this column: its constraint
    /// index.
    fn column_id(&self, column: Self::Column) -> usize;

    /// Return a stable unique identifier for this row: its possibility
    /// index.
    fn row_id(&self, row: Self::Row) -> usize;

    /// Return the number of rows uncovered in this column.
    fn column_size(&self, column: Self::Column) -> usize;

    /// Return an iterator over the columns in which the given row has a
    /// filled cell.
    ///
    /// Only valid for rows that are still live (reachable through an
    /// uncovered column); every column of a live row is itself uncovered.
    fn uncovered_columns_in_row(&self, row: Self::Row) -> Self::UncoveredColumnsInRowIter;
}

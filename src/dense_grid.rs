//! Dense `Grid` implementation for use in the `Solver`.
//!
//! This grid stores the whole 0/1 matrix and tracks covered rows and
//! columns in plain sets, trading speed for an implementation that is easy
//! to audit. Tests use it to cross-check the dancing-links grid; it is also
//! a reasonable choice for very small matrices.

use std::{
    cell::RefCell,
    collections::HashSet,
    vec::{self},
};

use crate::Grid;

/// Dense grid implementation.
#[derive(Debug)]
pub struct DenseGrid(RefCell<DenseGridInner>);

#[derive(Debug)]
struct DenseGridInner {
    num_rows: usize,
    num_columns: usize,

    covered_columns: HashSet<usize>,
    covered_rows: HashSet<usize>,

    data: Vec<bool>,

    covers: Vec<Cover>,
}

#[derive(Debug)]
struct Cover {
    column: usize,
    rows: Vec<usize>,
}

impl DenseGridInner {
    #[inline]
    fn to_index(row: usize, column: usize, num_columns: usize) -> usize {
        row * num_columns + column
    }

    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let filled_coordinates: Vec<_> = filled_coordinates.into_iter().collect();

        let num_rows = filled_coordinates
            .iter()
            .map(|&(row, _)| row + 1)
            .max()
            .unwrap_or(0);

        let mut data = vec![false; num_rows * num_columns];

        for (row, column) in filled_coordinates {
            assert!(
                column < num_columns,
                "filled coordinate names column {} outside the grid",
                column
            );
            data[Self::to_index(row, column, num_columns)] = true;
        }

        DenseGridInner {
            num_rows,
            num_columns,
            covered_columns: HashSet::with_capacity(num_columns / 2),
            covered_rows: HashSet::with_capacity(num_rows / 2),
            covers: Vec::new(),
            data,
        }
    }

    fn cover(&mut self, column: usize) {
        let cover = Cover {
            column,
            rows: self.uncovered_rows_in_column(column).collect(),
        };

        assert!(
            self.covered_columns.insert(column),
            "column {} covered twice without an intermediate uncover",
            column
        );
        self.covered_rows.extend(cover.rows.iter().copied());

        self.covers.push(cover);
    }

    fn uncover(&mut self, column: usize) {
        let cover = self
            .covers
            .pop()
            .expect("mismatched number of cover & uncover");
        assert_eq!(
            cover.column, column,
            "uncover out of order: column is not the most recently covered"
        );

        assert!(self.covered_columns.remove(&cover.column));
        for row in cover.rows {
            self.covered_rows.remove(&row);
        }
    }

    fn uncovered_columns(&self) -> vec::IntoIter<usize> {
        (0..self.num_columns)
            .filter(|column| !self.covered_columns.contains(column))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn uncovered_rows_in_column(&self, column: usize) -> vec::IntoIter<usize> {
        (0..self.num_rows)
            .filter(|row| !self.covered_rows.contains(row))
            .filter(move |row| self.data[Self::to_index(*row, column, self.num_columns)])
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn column_size(&self, column: usize) -> usize {
        (0..self.num_rows)
            .filter(|row| !self.covered_rows.contains(row))
            .filter(|row| self.data[Self::to_index(*row, column, self.num_columns)])
            .count()
    }

    fn uncovered_columns_in_row(&self, row: usize) -> vec::IntoIter<usize> {
        (0..self.num_columns)
            .filter(|column| !self.covered_columns.contains(column))
            .filter(|column| self.data[Self::to_index(row, *column, self.num_columns)])
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl Grid for DenseGrid {
    type Column = usize;
    type Row = usize;
    type UncoveredColumnsInRowIter = vec::IntoIter<usize>;
    type UncoveredColumnsIter = vec::IntoIter<usize>;
    type UncoveredRowsIter = vec::IntoIter<usize>;

    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        DenseGrid(RefCell::new(DenseGridInner::new(
            num_columns,
            filled_coordinates,
        )))
    }

    fn cover(&self, column: Self::Column) {
        let mut inner = self.0.borrow_mut();
        DenseGridInner::cover(&mut inner, column)
    }

    fn uncover(&self, column: Self::Column) {
        let mut inner = self.0.borrow_mut();
        DenseGridInner::uncover(&mut inner, column)
    }

    fn uncovered_columns(&self) -> Self::UncoveredColumnsIter {
        let inner = self.0.borrow();
        DenseGridInner::uncovered_columns(&inner)
    }

    fn uncovered_rows_in_column(&self, column: Self::Column) -> Self::UncoveredRowsIter {
        let inner = self.0.borrow();
        DenseGridInner::uncovered_rows_in_column(&inner, column)
    }

    fn column_id(&self, column: Self::Column) -> usize {
        column
    }

    fn row_id(&self, row: Self::Row) -> usize {
        row
    }

    fn column_size(&self, column: Self::Column) -> usize {
        let inner = self.0.borrow();
        DenseGridInner::column_size(&inner, column)
    }

    fn uncovered_columns_in_row(&self, row: Self::Row) -> Self::UncoveredColumnsInRowIter {
        let inner = self.0.borrow();
        DenseGridInner::uncovered_columns_in_row(&inner, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> DenseGrid {
        // c0 c1 c2
        // r0: 1  0  1
        // r1: 1  1  0
        // r2: 0  1  1
        DenseGrid::new(3, vec![(0, 0), (0, 2), (1, 0), (1, 1), (2, 1), (2, 2)])
    }

    #[test]
    fn cover_hides_conflicting_rows() {
        let grid = small_grid();

        grid.cover(0);

        assert_eq!(grid.uncovered_columns().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(grid.uncovered_rows_in_column(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(grid.column_size(2), 1);
    }

    #[test]
    fn uncover_restores_rows() {
        let grid = small_grid();

        grid.cover(0);
        grid.cover(1);
        grid.uncover(1);
        grid.uncover(0);

        assert_eq!(
            grid.uncovered_columns().collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(
            grid.uncovered_rows_in_column(1).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    #[should_panic(expected = "uncover out of order")]
    fn out_of_order_uncover_panics() {
        let grid = small_grid();

        grid.cover(0);
        grid.cover(1);
        grid.uncover(0);
    }
}

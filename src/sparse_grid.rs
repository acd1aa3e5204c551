//! Sparse `Grid` implementation using the
//! [dancing links](https://en.wikipedia.org/wiki/Dancing_Links) technique.
//!
//! Every column keeps a circular doubly-linked list of the nodes filled in
//! it, every node is linked circularly to its row siblings, and all column
//! headers hang off a root header. Covering a column unlinks it and every
//! row that appears in it in O(1) per link; uncovering reverses the dance
//! exactly.
//!
//! Nodes live in a flat arena and links are stored as indices into it, so
//! the cyclic structure needs neither back-pointers nor `unsafe`.

use std::{cell::RefCell, vec};

use crate::Grid;

/// Sparse dancing-links grid implementation.
#[derive(Debug)]
pub struct SparseGrid(RefCell<SparseGridInner>);

#[derive(Debug)]
struct SparseGridInner {
    /// Node arena. Column headers sit at indices `0..num_columns`, the root
    /// header at `num_columns`, row nodes after that.
    nodes: Vec<Node>,
    /// Count of live (uncovered) rows per column.
    sizes: Vec<usize>,
    /// Stack of covered columns; covers must unwind in reverse order.
    cover_log: Vec<usize>,
    num_columns: usize,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Header index of the owning column. Headers and the root name
    /// themselves.
    column: usize,
    /// Index of the grid row this node is part of. Meaningless for headers
    /// and the root.
    row: usize,
}

impl SparseGridInner {
    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let root = num_columns;

        let mut nodes = Vec::with_capacity(num_columns + 1);
        for column in 0..num_columns {
            nodes.push(Node {
                left: if column == 0 { root } else { column - 1 },
                right: if column + 1 == num_columns { root } else { column + 1 },
                up: column,
                down: column,
                column,
                row: usize::MAX,
            });
        }
        nodes.push(Node {
            left: if num_columns == 0 { root } else { num_columns - 1 },
            right: if num_columns == 0 { root } else { 0 },
            up: root,
            down: root,
            column: root,
            row: usize::MAX,
        });

        let mut inner = SparseGridInner {
            nodes,
            sizes: vec![0; num_columns],
            cover_log: Vec::new(),
            num_columns,
        };

        // Sorting groups each row's cells together and keeps every column's
        // vertical list ordered by row index, independent of input order.
        let mut filled_coordinates: Vec<_> = filled_coordinates.into_iter().collect();
        filled_coordinates.sort_unstable();
        filled_coordinates.dedup();

        let mut first_in_row: Option<(usize, usize)> = None;
        for (row, column) in filled_coordinates {
            let node = inner.push_node(row, column);

            match first_in_row {
                Some((first_row, first)) if first_row == row => inner.link_into_row(node, first),
                _ => first_in_row = Some((row, node)),
            }
        }

        inner
    }

    /// Append a node at the bottom of `column`'s vertical list, linked only
    /// to itself horizontally.
    fn push_node(&mut self, row: usize, column: usize) -> usize {
        assert!(
            column < self.num_columns,
            "filled coordinate names column {} outside the grid",
            column
        );

        let node = self.nodes.len();
        let up = self.nodes[column].up;

        self.nodes.push(Node {
            left: node,
            right: node,
            up,
            down: column,
            column,
            row,
        });
        self.nodes[up].down = node;
        self.nodes[column].up = node;
        self.sizes[column] += 1;

        node
    }

    /// Splice `node` into the circular row list that `first` starts, to the
    /// left of `first` (i.e. at the end of the row).
    fn link_into_row(&mut self, node: usize, first: usize) {
        let last = self.nodes[first].left;

        self.nodes[node].left = last;
        self.nodes[node].right = first;
        self.nodes[last].right = node;
        self.nodes[first].left = node;
    }

    fn cover(&mut self, column: usize) {
        assert!(
            !self.cover_log.contains(&column),
            "column {} covered twice without an intermediate uncover",
            column
        );
        self.cover_log.push(column);

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut row_node = self.nodes[column].down;
        while row_node != column {
            let mut node = self.nodes[row_node].right;
            while node != row_node {
                let Node {
                    up,
                    down,
                    column: node_column,
                    ..
                } = self.nodes[node];
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.sizes[node_column] -= 1;

                node = self.nodes[node].right;
            }

            row_node = self.nodes[row_node].down;
        }
    }

    fn uncover(&mut self, column: usize) {
        assert_eq!(
            self.cover_log.pop(),
            Some(column),
            "uncover out of order: column {} is not the most recently covered",
            column
        );

        let mut row_node = self.nodes[column].up;
        while row_node != column {
            let mut node = self.nodes[row_node].left;
            while node != row_node {
                let Node {
                    up,
                    down,
                    column: node_column,
                    ..
                } = self.nodes[node];
                self.nodes[up].down = node;
                self.nodes[down].up = node;
                self.sizes[node_column] += 1;

                node = self.nodes[node].left;
            }

            row_node = self.nodes[row_node].up;
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[left].right = column;
        self.nodes[right].left = column;
    }

    fn uncovered_columns(&self) -> vec::IntoIter<usize> {
        let root = self.num_columns;
        let mut columns = Vec::new();

        let mut column = self.nodes[root].right;
        while column != root {
            columns.push(column);
            column = self.nodes[column].right;
        }

        columns.into_iter()
    }

    fn uncovered_rows_in_column(&self, column: usize) -> vec::IntoIter<usize> {
        let mut rows = Vec::with_capacity(self.sizes[column]);

        let mut node = self.nodes[column].down;
        while node != column {
            rows.push(node);
            node = self.nodes[node].down;
        }

        rows.into_iter()
    }

    fn uncovered_columns_in_row(&self, row_node: usize) -> vec::IntoIter<usize> {
        let mut columns = vec![self.nodes[row_node].column];

        let mut node = self.nodes[row_node].right;
        while node != row_node {
            columns.push(self.nodes[node].column);
            node = self.nodes[node].right;
        }

        columns.into_iter()
    }
}

impl Grid for SparseGrid {
    type Column = usize;
    type Row = usize;
    type UncoveredColumnsInRowIter = vec::IntoIter<usize>;
    type UncoveredColumnsIter = vec::IntoIter<usize>;
    type UncoveredRowsIter = vec::IntoIter<usize>;

    fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        SparseGrid(RefCell::new(SparseGridInner::new(
            num_columns,
            filled_coordinates,
        )))
    }

    fn cover(&self, column: Self::Column) {
        let mut inner = self.0.borrow_mut();
        SparseGridInner::cover(&mut inner, column)
    }

    fn uncover(&self, column: Self::Column) {
        let mut inner = self.0.borrow_mut();
        SparseGridInner::uncover(&mut inner, column)
    }

    fn uncovered_columns(&self) -> Self::UncoveredColumnsIter {
        let inner = self.0.borrow();
        SparseGridInner::uncovered_columns(&inner)
    }

    fn uncovered_rows_in_column(&self, column: Self::Column) -> Self::UncoveredRowsIter {
        let inner = self.0.borrow();
        SparseGridInner::uncovered_rows_in_column(&inner, column)
    }

    fn column_id(&self, column: Self::Column) -> usize {
        column
    }

    fn row_id(&self, row: Self::Row) -> usize {
        let inner = self.0.borrow();
        inner.nodes[row].row
    }

    fn column_size(&self, column: Self::Column) -> usize {
        let inner = self.0.borrow();
        inner.sizes[column]
    }

    fn uncovered_columns_in_row(&self, row: Self::Row) -> Self::UncoveredColumnsInRowIter {
        let inner = self.0.borrow();
        SparseGridInner::uncovered_columns_in_row(&inner, row)
    }
}

use std::collections::HashSet;

use tiling_solver::{
    geometry::{self, Cell},
    tiling::Placement,
};

/// Build a full `rows` × `cols` rectangular board.
pub fn rect(rows: i32, cols: i32) -> Vec<Cell> {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .collect()
}

#[allow(dead_code)]
pub fn domino() -> Vec<Cell> {
    vec![(0, 0), (0, 1)]
}

#[allow(dead_code)]
pub fn ell_tromino() -> Vec<Cell> {
    vec![(0, 0), (0, 1), (1, 0)]
}

#[allow(dead_code)]
pub fn square_tetromino() -> Vec<Cell> {
    vec![(0, 0), (0, 1), (1, 0), (1, 1)]
}

/// Assert that a solution is an exact cover of the board: every board cell
/// is covered exactly once and no piece index is placed more than once.
#[allow(dead_code)]
pub fn assert_exact_cover(board: &[Cell], solution: &[Placement]) {
    let board: HashSet<Cell> = geometry::normalize(board).into_iter().collect();

    let mut covered = HashSet::new();
    let mut pieces_placed = HashSet::new();

    for placement in solution {
        assert!(
            pieces_placed.insert(placement.piece),
            "piece {} placed more than once",
            placement.piece
        );

        for &cell in &placement.cells {
            assert!(
                board.contains(&cell),
                "covered cell {:?} is not a board cell",
                cell
            );
            assert!(covered.insert(cell), "cell {:?} covered twice", cell);
        }
    }

    assert_eq!(covered, board, "board not exactly covered");
}

//! A [polyomino tiling puzzle](https://en.wikipedia.org/wiki/Polyomino#Tiling_regions_with_sets_of_polyominoes)
//! asks for every way to place a collection of polyomino pieces, optionally
//! rotated, so that they exactly cover a target board with no overlap.
//!
//! The board is an arbitrary finite set of cells (it need not be
//! rectangular) and pieces are cell lists in arbitrary local offsets.
//! Board cells become required constraints (covered exactly once) and piece
//! identities become optional constraints (used at most once), so a board
//! coverable by a subset of the pieces still counts as solved.

use crate::{
    geometry::{self, Cell},
    ExactCover,
};
use std::collections::HashMap;

/// Instance of a polyomino tiling puzzle.
#[derive(Debug)]
pub struct Tiling {
    /// The list of candidate placements of pieces on the board.
    pub possibilities: Vec<Placement>,
    /// The list of constraints that must be satisfied to tile the board.
    pub constraints: Vec<Constraint>,
    /// The board cells, normalized.
    pub board: Vec<Cell>,
    /// The pieces, as given.
    pub pieces: Vec<Vec<Cell>>,
    /// Whether pieces may be rotated in quarter turns.
    pub rotatable: bool,
}

impl Tiling {
    /// Create a new instance of a polyomino tiling puzzle.
    ///
    /// Neither the board nor the pieces need to be normalized; cells may use
    /// any integer offsets and duplicates collapse. An empty piece is legal
    /// input that can simply never be placed, and an empty board is tiled
    /// exactly once by placing nothing.
    pub fn new(
        board: impl IntoIterator<Item = Cell>,
        pieces: impl IntoIterator<Item = Vec<Cell>>,
        rotatable: bool,
    ) -> Self {
        let board = geometry::normalize(&board.into_iter().collect::<Vec<_>>());
        let pieces: Vec<Vec<Cell>> = pieces.into_iter().collect();

        let possibilities = Self::generate_all_placements(&board, &pieces, rotatable);
        let constraints = Constraint::all(&board, pieces.len()).collect();

        Self {
            possibilities,
            constraints,
            board,
            pieces,
            rotatable,
        }
    }

    /// Generate every valid placement of every piece against the board.
    fn generate_all_placements(
        board: &[Cell],
        pieces: &[Vec<Cell>],
        rotatable: bool,
    ) -> Vec<Placement> {
        // Membership is checked per transformed cell; a hashed index keeps
        // the enumeration at O(orientations × |board| × |piece|).
        let board_index: HashMap<Cell, usize> = board
            .iter()
            .enumerate()
            .map(|(index, &cell)| (cell, index))
            .collect();

        let mut placements = Vec::new();
        for (piece, cells) in pieces.iter().enumerate() {
            if cells.is_empty() {
                continue;
            }

            for orientation in Self::orientations(cells, rotatable) {
                for &anchor in board {
                    let shifted = geometry::shift(&orientation.cells, anchor);

                    if shifted.iter().all(|cell| board_index.contains_key(cell)) {
                        placements.push(Placement {
                            piece,
                            rotation: orientation.rotation,
                            translation: anchor,
                            cells: shifted,
                        });
                    }
                }
            }
        }

        log::debug!(
            "enumerated {} placements of {} pieces against {} board cells",
            placements.len(),
            pieces.len(),
            board.len()
        );

        placements
    }

    /// Generate the distinct orientations of a piece.
    ///
    /// Rotation stops as soon as a quarter turn reproduces an orientation
    /// already produced, which captures rotational symmetry: a 2×2 square
    /// yields one orientation, a domino two, an L tetromino four.
    fn orientations(piece: &[Cell], rotatable: bool) -> Vec<Orientation> {
        let mut orientations: Vec<Orientation> = Vec::new();

        let rotation_limit = if rotatable { 4 } else { 1 };
        for rotation in 0..rotation_limit {
            let cells = geometry::rotate(piece, rotation);
            if orientations.iter().any(|seen| seen.cells == cells) {
                break;
            }
            orientations.push(Orientation { cells, rotation });
        }

        orientations
    }

    /// Map each covered board cell to the index of the piece covering it in
    /// the given solution.
    ///
    /// The covered cells are recomputed from each placement's piece index,
    /// rotation count, and translation, re-applying the rotate-then-shift
    /// transform used during placement enumeration, so callers can render
    /// a solution from the lightweight placement records alone.
    pub fn paint(&self, solution: &[&Placement]) -> HashMap<Cell, usize> {
        let mut owners = HashMap::with_capacity(self.board.len());

        for placement in solution {
            let rotated = geometry::rotate(&self.pieces[placement.piece], placement.rotation);
            for cell in geometry::shift(&rotated, placement.translation) {
                owners.insert(cell, placement.piece);
            }
        }

        owners
    }
}

impl ExactCover for Tiling {
    type Constraint = Constraint;
    type Possibility = Placement;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.satisfies(cons)
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        matches!(cons, Constraint::Piece(_))
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// Enumerate every way to exactly cover `board` with the given pieces.
///
/// This is the one-call entry point over [`Tiling`]: inputs may be
/// unnormalized and contain duplicates, and the result is the full solution
/// list, each solution a list of [`Placement`]s. An empty outer list means
/// no exact cover exists. Solution order is unspecified but deterministic
/// for identical input.
pub fn solve(board: &[Cell], pieces: &[Vec<Cell>], rotatable: bool) -> Vec<Vec<Placement>> {
    let puzzle = Tiling::new(board.iter().copied(), pieces.iter().cloned(), rotatable);

    puzzle
        .solver()
        .map(|solution| solution.into_iter().cloned().collect())
        .collect()
}

/// A piece rotated into one of its distinct shapes.
#[derive(Debug)]
struct Orientation {
    /// The rotated, normalized cells.
    cells: Vec<Cell>,
    /// The number of quarter turns producing this shape.
    rotation: usize,
}

/// One concrete way to lay a specific piece on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// Index of the piece in the puzzle's piece list.
    pub piece: usize,
    /// Number of quarter turns applied to the piece, in `0..4`.
    pub rotation: usize,
    /// The board cell that the rotated piece's first (topmost-leftmost)
    /// cell lands on.
    pub translation: Cell,
    /// The board cells this placement covers.
    pub cells: Vec<Cell>,
}

impl Placement {
    /// Check if this placement satisfies a given constraint.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Piece(index) => self.piece == *index,
            Constraint::Cell(cell) => self.cells.contains(cell),
        }
    }
}

/// A condition that must be satisfied in order to tile the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// A given piece appears in a solution at most once. Optional: an
    /// unused piece satisfies it vacuously.
    Piece(usize),
    /// A given board cell is covered exactly once.
    Cell(Cell),
}

impl Constraint {
    /// Return an iterator over all `Constraint`s for a given board and
    /// piece count.
    pub fn all(board: &[Cell], piece_count: usize) -> impl Iterator<Item = Constraint> + '_ {
        let piece_it = (0..piece_count).map(Constraint::Piece);
        let cell_it = board.iter().copied().map(Constraint::Cell);

        piece_it.chain(cell_it)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(rows: i32, cols: i32) -> Vec<Cell> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .collect()
    }

    #[test]
    fn orientation_counts_follow_symmetry() {
        let domino = vec![(0, 0), (0, 1)];
        let square = vec![(0, 0), (0, 1), (1, 0), (1, 1)];
        let ell = vec![(0, 0), (1, 0), (2, 0), (2, 1)];

        assert_eq!(Tiling::orientations(&domino, true).len(), 2);
        assert_eq!(Tiling::orientations(&square, true).len(), 1);
        assert_eq!(Tiling::orientations(&ell, true).len(), 4);
        assert_eq!(Tiling::orientations(&domino, false).len(), 1);
    }

    #[test]
    fn orientations_record_rotation_counts() {
        let domino = vec![(0, 0), (0, 1)];
        let orientations = Tiling::orientations(&domino, true);

        assert_eq!(orientations[0].rotation, 0);
        assert_eq!(orientations[0].cells, vec![(0, 0), (0, 1)]);
        assert_eq!(orientations[1].rotation, 1);
        assert_eq!(orientations[1].cells, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn placements_stay_on_the_board() {
        let board = rect(2, 2);
        let placements =
            Tiling::generate_all_placements(&board, &[vec![(0, 0), (0, 1)]], false);

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].translation, (0, 0));
        assert_eq!(placements[0].cells, vec![(0, 0), (0, 1)]);
        assert_eq!(placements[1].translation, (1, 0));
        assert_eq!(placements[1].cells, vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn single_cell_piece_has_one_placement_per_board_cell() {
        let board = rect(3, 3);
        let placements = Tiling::generate_all_placements(&board, &[vec![(0, 0)]], true);

        assert_eq!(placements.len(), board.len());
    }

    #[test]
    fn empty_piece_has_no_placements() {
        let placements = Tiling::generate_all_placements(&rect(2, 2), &[vec![]], true);

        assert!(placements.is_empty());
    }

    #[test]
    fn oversized_piece_has_no_placements() {
        let board = rect(1, 3);
        let placements = Tiling::generate_all_placements(
            &board,
            &[vec![(0, 0), (0, 1), (1, 0), (1, 1)]],
            true,
        );

        assert!(placements.is_empty());
    }

    #[test]
    fn tiling_constraints_cover_pieces_and_cells() {
        let puzzle = Tiling::new(rect(1, 2), vec![vec![(0, 0), (0, 1)]], false);

        assert_eq!(
            puzzle.constraints,
            vec![
                Constraint::Piece(0),
                Constraint::Cell((0, 0)),
                Constraint::Cell((0, 1)),
            ]
        );
        assert!(puzzle.is_optional(&Constraint::Piece(0)));
        assert!(!puzzle.is_optional(&Constraint::Cell((0, 0))));
    }

    #[test]
    fn solve_single_domino_board() {
        let solutions = solve(&rect(1, 2), &[vec![(0, 0), (0, 1)]], false);

        assert_eq!(
            solutions,
            vec![vec![Placement {
                piece: 0,
                rotation: 0,
                translation: (0, 0),
                cells: vec![(0, 0), (0, 1)],
            }]]
        );
    }

    #[test]
    fn inputs_need_not_be_normalized() {
        let board = vec![(5, 4), (5, 3), (5, 4)];
        let pieces = vec![vec![(2, 7), (2, 8)]];

        let solutions = solve(&board, &pieces, false);

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0][0].translation, (0, 0));
        assert_eq!(solutions[0][0].cells, vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn either_spare_piece_may_go_unused() {
        let domino = vec![(0, 0), (0, 1)];
        let solutions = solve(&rect(1, 2), &[domino.clone(), domino], false);

        assert_eq!(solutions.len(), 2);
        let placed: Vec<usize> = solutions
            .iter()
            .map(|solution| {
                assert_eq!(solution.len(), 1);
                solution[0].piece
            })
            .collect();
        assert_eq!(placed, vec![0, 1]);
    }

    #[test]
    fn empty_board_is_tiled_by_placing_nothing() {
        let solutions = solve(&[], &[vec![(0, 0)]], true);

        assert_eq!(solutions, vec![Vec::<Placement>::new()]);
    }

    #[test]
    fn paint_recomputes_covered_cells() {
        let puzzle = Tiling::new(rect(2, 2), vec![vec![(0, 0), (0, 1)]; 2], true);
        let mut solver = puzzle.solver();
        let solution = solver.next().unwrap();

        let owners = puzzle.paint(&solution);

        assert_eq!(owners.len(), 4);
        for placement in &solution {
            for cell in &placement.cells {
                assert_eq!(owners[cell], placement.piece);
            }
        }
    }
}

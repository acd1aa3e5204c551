mod common;

use common::{assert_exact_cover, domino, rect};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tiling_solver::tiling;

// Every solve owns its matrix for the duration of the search, so
// independent puzzles can run concurrently even though a single search is
// strictly sequential.
#[test]
fn parallel_solves_match_serial_solves() {
    let widths: Vec<i32> = vec![1, 2, 3, 4];

    let solve_board = |&cols: &i32| {
        tiling::solve(&rect(2, cols), &vec![domino(); cols as usize], true)
    };

    let serial: Vec<_> = widths.iter().map(solve_board).collect();
    let parallel: Vec<_> = widths.par_iter().map(solve_board).collect();

    assert_eq!(serial, parallel);

    // Labeled domino tilings of a 2×n board: (n-th Fibonacci) × n!.
    let counts: Vec<_> = serial.iter().map(|solutions| solutions.len()).collect();
    assert_eq!(counts, vec![1, 4, 18, 120]);

    for (solutions, &cols) in serial.iter().zip(&widths) {
        let board = rect(2, cols);
        for solution in solutions {
            assert_exact_cover(&board, solution);
        }
    }
}

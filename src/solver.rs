use crate::{grid::Grid, sparse_grid::SparseGrid, ExactCover};
use std::collections::VecDeque;

/// Solver that iteratively returns solutions to exact cover problems.
///
/// The search is Algorithm X, run over any [`Grid`] implementation (the
/// dancing-links [`SparseGrid`] by default). The recursion is expressed as
/// an explicit stack of frames so that search depth is bounded by the heap,
/// not the call stack.
#[derive(Debug)]
pub struct Solver<'e, E: ExactCover, G: Grid = SparseGrid> {
    problem: &'e E,

    // Values used to track the state of solving
    grid: G,
    partial_solution: Vec<usize>,
    stack: Vec<Frame<G>>,
    pending_trivial: bool,

    // Caller-imposed bound on search effort
    step_budget: Option<u64>,
    steps_taken: u64,
    interrupted: bool,
}

#[derive(Debug)]
enum FrameState {
    // Before covering one of the rows
    Cover,
    // After checking, before uncovering
    Uncover,
}

#[derive(Debug)]
struct Frame<G: Grid> {
    selected_rows: VecDeque<(usize, Vec<G::Column>)>,
    state: FrameState,
}

impl<'e, E, G> Solver<'e, E, G>
where
    E: ExactCover,
    G: Grid,
{
    /// Create a new `Solver` with the given instance of an exact cover
    /// problem.
    pub fn new(problem: &'e E) -> Self {
        let grid = Self::populate_grid(problem);
        log::debug!(
            "populated exact cover grid with {} possibilities and {} constraints",
            problem.possibilities().len(),
            problem.constraints().len()
        );

        let mut solver = Self {
            problem,

            grid,
            partial_solution: Vec::new(),
            stack: Vec::new(),
            pending_trivial: false,

            step_budget: None,
            steps_taken: 0,
            interrupted: false,
        };

        solver.prime();
        solver
    }

    /// Limit the search to at most `steps` frame transitions.
    ///
    /// When the budget runs out the search stops without producing further
    /// solutions and [`was_interrupted`](Self::was_interrupted) reports
    /// true. There is no built-in timeout otherwise; this is the hook for
    /// callers that need bounded latency.
    pub fn step_budget(mut self, steps: u64) -> Self {
        self.step_budget = Some(steps);
        self
    }

    /// Return true if a previous search was abandoned because the step
    /// budget ran out.
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Reset all solver state except for the stored possibilities,
    /// constraints, and step budget.
    pub fn reset(&mut self) {
        self.grid = Self::populate_grid(self.problem);
        self.partial_solution.clear();
        self.stack.clear();
        self.pending_trivial = false;
        self.steps_taken = 0;
        self.interrupted = false;

        self.prime();
    }

    /// Push the initial frame, or note that the grid is born solved (no
    /// required column uncovered), in which case the single trivial
    /// solution is emitted by the first call to `next_solution`.
    fn prime(&mut self) {
        match Self::choose_column(&self.grid, self.problem) {
            None => self.pending_trivial = true,
            Some(min_column) => {
                let selected_rows = Self::select_rows_from_column(&self.grid, min_column);

                if !selected_rows.is_empty() {
                    self.stack.push(Frame {
                        state: FrameState::Cover,
                        selected_rows,
                    });
                }
            }
        }
    }

    fn populate_grid(problem: &E) -> G {
        let coordinates_iter =
            problem
                .possibilities()
                .iter()
                .enumerate()
                .flat_map(|(row, poss)| {
                    problem
                        .constraints()
                        .iter()
                        .enumerate()
                        .filter_map(move |(column, cons)| {
                            problem.satisfies(poss, cons).then_some((row, column))
                        })
                });

        G::new(problem.constraints().len(), coordinates_iter)
    }

    /// Select the column to branch on: the required (non-optional) column
    /// with the fewest uncovered rows, ties broken by header order.
    ///
    /// `None` means no required column is uncovered, i.e. the current
    /// partial solution is a complete solution.
    fn choose_column(grid: &G, problem: &E) -> Option<G::Column> {
        grid.uncovered_columns()
            .filter(|column| !problem.is_optional(&problem.constraints()[grid.column_id(*column)]))
            .min_by_key(|column| grid.column_size(*column))
    }

    /// Snapshot the rows currently present in the given column, each paired
    /// with the full list of columns it touches.
    ///
    /// The snapshot is taken up front because the column's live list
    /// mutates while the rows are tried.
    fn select_rows_from_column(grid: &G, min_column: G::Column) -> VecDeque<(usize, Vec<G::Column>)> {
        grid.uncovered_rows_in_column(min_column)
            .map(|row| {
                (
                    grid.row_id(row),
                    grid.uncovered_columns_in_row(row).collect(),
                )
            })
            .collect()
    }

    /// Return all possible solutions.
    pub fn all_solutions(&mut self) -> Vec<Vec<&'e E::Possibility>> {
        self.collect()
    }

    /// Compute up to the next solution, returning `None` if there are no
    /// more.
    pub fn next_solution<'s>(&'s mut self) -> Option<Vec<&'e E::Possibility>>
    where
        'e: 's,
    {
        enum StackOp<T> {
            Push(T),
            Pop,
            None,
        }

        if self.pending_trivial {
            self.pending_trivial = false;
            return Some(Vec::new());
        }

        while !self.stack.is_empty() {
            if let Some(budget) = self.step_budget {
                if self.steps_taken >= budget {
                    log::debug!("step budget of {} exhausted, abandoning search", budget);
                    self.interrupted = true;
                    // The grid is discarded wholesale, so no unwinding
                    // restoration is needed.
                    self.stack.clear();
                    return None;
                }
                self.steps_taken += 1;
            }

            let curr_frame = self.stack.last_mut().unwrap();

            let (stack_op, possible_solution) = match curr_frame.state {
                // For the current row of this frame, cover the selected
                // columns and add the row to the solution.
                FrameState::Cover => {
                    let (row_index, columns) = curr_frame.selected_rows.front().unwrap();

                    self.partial_solution.push(*row_index);
                    for column in columns {
                        self.grid.cover(*column);
                    }

                    // This is where the recursion happens, but we also have
                    // to check for the solution here.
                    let stack_op = match Self::choose_column(&self.grid, self.problem) {
                        None => (StackOp::None, Some(self.partial_solution.clone())),
                        Some(min_column) => {
                            let selected_rows =
                                Self::select_rows_from_column(&self.grid, min_column);

                            if selected_rows.is_empty() {
                                (StackOp::None, None)
                            } else {
                                (
                                    StackOp::Push(Frame {
                                        state: FrameState::Cover,
                                        selected_rows,
                                    }),
                                    None,
                                )
                            }
                        }
                    };

                    curr_frame.state = FrameState::Uncover;
                    stack_op
                }
                // Cleanup the current row: uncover the selected columns in
                // reverse cover order, remove the row from the solution.
                FrameState::Uncover => {
                    let (_row_index, columns) = curr_frame.selected_rows.pop_front().unwrap();

                    for column in columns.iter().rev() {
                        self.grid.uncover(*column);
                    }
                    self.partial_solution.pop();

                    if curr_frame.selected_rows.is_empty() {
                        (StackOp::Pop, None)
                    } else {
                        curr_frame.state = FrameState::Cover;
                        (StackOp::None, None)
                    }
                }
            };

            match stack_op {
                StackOp::Push(val) => {
                    self.stack.push(val);
                }
                StackOp::Pop => {
                    self.stack.pop();
                }
                StackOp::None => {}
            }

            if let Some(solution) = possible_solution {
                log::trace!("found solution using {} possibilities", solution.len());
                return Some(
                    solution
                        .into_iter()
                        .map(|row_index| &self.problem.possibilities()[row_index])
                        .collect(),
                );
            }
        }

        None
    }
}

impl<'e, E, G> Iterator for Solver<'e, E, G>
where
    E: ExactCover,
    G: Grid,
{
    type Item = Vec<&'e E::Possibility>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense_grid::DenseGrid;

    /// An exact cover instance given directly as a 0/1 matrix: possibility
    /// `r` satisfies constraint `c` iff `rows[r]` contains `c`.
    #[derive(Debug)]
    struct Matrix {
        possibilities: Vec<usize>,
        constraints: Vec<usize>,
        rows: Vec<Vec<usize>>,
        optional: Vec<usize>,
    }

    impl Matrix {
        fn new(num_columns: usize, rows: Vec<Vec<usize>>, optional: Vec<usize>) -> Self {
            Matrix {
                possibilities: (0..rows.len()).collect(),
                constraints: (0..num_columns).collect(),
                rows,
                optional,
            }
        }
    }

    impl ExactCover for Matrix {
        type Constraint = usize;
        type Possibility = usize;

        fn satisfies(&self, poss: &usize, cons: &usize) -> bool {
            self.rows[*poss].contains(cons)
        }

        fn is_optional(&self, cons: &usize) -> bool {
            self.optional.contains(cons)
        }

        fn possibilities(&self) -> &[usize] {
            &self.possibilities
        }

        fn constraints(&self) -> &[usize] {
            &self.constraints
        }
    }

    fn knuth_example() -> Matrix {
        Matrix::new(
            7,
            vec![
                vec![2, 4, 5],
                vec![0, 3, 6],
                vec![1, 2, 5],
                vec![0, 3],
                vec![1, 6],
                vec![3, 4, 6],
            ],
            vec![],
        )
    }

    #[test]
    fn solve_knuth_example() {
        let matrix = knuth_example();
        let solutions = matrix.solver().all_solutions();

        assert_eq!(solutions, vec![vec![&3, &0, &4]]);
    }

    #[test]
    fn dense_grid_agrees_with_sparse_grid() {
        let matrix = knuth_example();

        let sparse: Vec<_> = Solver::<_, SparseGrid>::new(&matrix).collect();
        let dense: Vec<_> = Solver::<_, DenseGrid>::new(&matrix).collect();

        assert_eq!(sparse, dense);
    }

    #[test]
    fn optional_columns_are_at_most_once() {
        // Two required columns (0, 1) and two optional (2, 3). Pairing the
        // rows that share an optional column is forbidden, so only two of
        // the four row pairs survive.
        let matrix = Matrix::new(
            4,
            vec![vec![0, 2], vec![1, 3], vec![0, 3], vec![1, 2]],
            vec![2, 3],
        );
        let solutions = matrix.solver().all_solutions();

        assert_eq!(solutions, vec![vec![&0, &1], vec![&2, &3]]);
    }

    #[test]
    fn optional_columns_may_stay_unused() {
        let matrix = Matrix::new(3, vec![vec![0, 1]], vec![1, 2]);
        let solutions = matrix.solver().all_solutions();

        assert_eq!(solutions, vec![vec![&0]]);
    }

    #[test]
    fn no_constraints_has_the_trivial_solution() {
        let matrix = Matrix::new(0, vec![], vec![]);
        let solutions = matrix.solver().all_solutions();

        assert_eq!(solutions, vec![Vec::<&usize>::new()]);
    }

    #[test]
    fn unsatisfiable_column_has_no_solutions() {
        // Column 1 is required but no row fills it.
        let matrix = Matrix::new(2, vec![vec![0]], vec![]);

        assert_eq!(matrix.solver().count(), 0);
    }

    #[test]
    fn step_budget_interrupts_search() {
        let matrix = knuth_example();
        let mut solver = Solver::<_, SparseGrid>::new(&matrix).step_budget(1);

        assert_eq!(solver.next_solution(), None);
        assert!(solver.was_interrupted());
    }

    #[test]
    fn reset_allows_solving_again() {
        let matrix = knuth_example();
        let mut solver = Solver::<_, SparseGrid>::new(&matrix);

        let first = solver.all_solutions();
        solver.reset();
        let second = solver.all_solutions();

        assert_eq!(first, second);
    }
}

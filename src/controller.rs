//! Pure input dispatch: every UI event becomes one action here, and every
//! mutating action is followed by a solved re-check. No windowing types;
//! the eframe shell only translates events and paints.

use eawase_core::{Board, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PuzzleAction {
    /// A click already mapped to a grid cell. First press selects, second
    /// press swaps against the selection and clears it.
    PressCell { row: usize, col: usize },
    RotateLeft,
    RotateRight,
    Flip,
    /// One second of wall time.
    Tick,
}

/// Emitted exactly once, when the puzzle first verifies as fully solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SolveReport {
    pub(crate) elapsed_secs: u64,
}

/// Maps the click position inside the board area to a grid cell.
pub(crate) fn cell_at(x: f32, y: f32, box_size: u32) -> Option<(usize, usize)> {
    if x < 0.0 || y < 0.0 || box_size == 0 {
        return None;
    }
    let col = (x as u32 / box_size) as usize;
    let row = (y as u32 / box_size) as usize;
    Some((row, col))
}

pub(crate) struct GameController {
    board: Board,
    selected: Option<(usize, usize)>,
    elapsed_secs: u64,
    solved: bool,
}

impl GameController {
    pub(crate) fn new(board: Board) -> Self {
        Self {
            board,
            selected: None,
            elapsed_secs: 0,
            solved: false,
        }
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    pub(crate) fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub(crate) fn is_solved(&self) -> bool {
        self.solved
    }

    /// Applies one action. Once the puzzle is solved the controller is
    /// frozen: every further action is ignored, including the clock.
    pub(crate) fn apply(&mut self, action: PuzzleAction) -> Option<SolveReport> {
        if self.solved {
            return None;
        }
        let mutated = match action {
            PuzzleAction::PressCell { row, col } => self.press(row, col),
            PuzzleAction::RotateLeft => self.transform_selected(Tile::rotate_left),
            PuzzleAction::RotateRight => self.transform_selected(Tile::rotate_right),
            PuzzleAction::Flip => self.transform_selected(Tile::flip),
            PuzzleAction::Tick => {
                self.elapsed_secs += 1;
                true
            }
        };
        if !mutated {
            return None;
        }
        self.check_solved()
    }

    /// Presses outside the grid are ignored; they neither select nor swap.
    fn press(&mut self, row: usize, col: usize) -> bool {
        if row >= self.board.rows() || col >= self.board.cols() {
            return false;
        }
        match self.selected.take() {
            None => {
                self.selected = Some((row, col));
                false
            }
            Some((from_row, from_col)) => {
                self.board.swap(from_row, from_col, row, col).is_ok()
            }
        }
    }

    fn transform_selected(&mut self, op: fn(&mut Tile)) -> bool {
        let Some((row, col)) = self.selected else {
            return false;
        };
        match self.board.tile_at_mut(row, col) {
            Ok(tile) => {
                op(tile);
                true
            }
            Err(_) => false,
        }
    }

    fn check_solved(&mut self) -> Option<SolveReport> {
        if !self.board.is_fully_solved() {
            return None;
        }
        self.solved = true;
        Some(SolveReport {
            elapsed_secs: self.elapsed_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn controller(rows: usize, cols: usize) -> GameController {
        let source = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, x as u8 ^ y as u8, 255]));
        GameController::new(Board::partition(rows, cols, source).unwrap())
    }

    #[test]
    fn first_press_selects_second_swaps_and_clears() {
        let mut game = controller(2, 2);
        assert!(game.apply(PuzzleAction::PressCell { row: 0, col: 0 }).is_none());
        assert_eq!(game.selected(), Some((0, 0)));

        game.apply(PuzzleAction::PressCell { row: 1, col: 1 });
        assert_eq!(game.selected(), None);
        assert_eq!(game.board().tile_at(0, 0).unwrap().home(), (1, 1));
    }

    #[test]
    fn press_outside_grid_is_ignored() {
        let mut game = controller(2, 2);
        assert!(game.apply(PuzzleAction::PressCell { row: 5, col: 0 }).is_none());
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn transforms_without_selection_are_noops() {
        let mut game = controller(2, 2);
        game.apply(PuzzleAction::RotateLeft);
        game.apply(PuzzleAction::Flip);
        assert!(game.board().is_fully_solved());
    }

    #[test]
    fn transforms_act_on_the_selected_cell() {
        let mut game = controller(2, 2);
        game.apply(PuzzleAction::PressCell { row: 0, col: 1 });
        game.apply(PuzzleAction::RotateRight);
        let tile = game.board().tile_at(0, 1).unwrap();
        assert_eq!(tile.rotation(), eawase_core::Rotation::R90);
        // Selection survives a transform so repeated turns work.
        assert_eq!(game.selected(), Some((0, 1)));
    }

    #[test]
    fn swap_back_announces_the_solve_once() {
        let mut game = controller(2, 2);
        game.apply(PuzzleAction::PressCell { row: 0, col: 0 });
        game.apply(PuzzleAction::PressCell { row: 1, col: 1 });
        game.apply(PuzzleAction::Tick);
        assert!(!game.is_solved());

        game.apply(PuzzleAction::PressCell { row: 0, col: 0 });
        let report = game.apply(PuzzleAction::PressCell { row: 1, col: 1 });
        assert_eq!(report, Some(SolveReport { elapsed_secs: 1 }));
        assert!(game.is_solved());
    }

    #[test]
    fn tick_detects_an_already_solved_board() {
        let mut game = controller(2, 2);
        let report = game.apply(PuzzleAction::Tick);
        assert_eq!(report, Some(SolveReport { elapsed_secs: 1 }));
    }

    #[test]
    fn solved_controller_freezes_input_and_clock() {
        let mut game = controller(2, 2);
        game.apply(PuzzleAction::Tick);
        assert!(game.is_solved());

        assert!(game.apply(PuzzleAction::Tick).is_none());
        assert!(game.apply(PuzzleAction::PressCell { row: 0, col: 0 }).is_none());
        assert!(game.apply(PuzzleAction::RotateLeft).is_none());
        assert_eq!(game.selected(), None);
        assert_eq!(game.elapsed_secs(), 1);
    }

    #[test]
    fn rotating_a_selected_tile_blocks_the_full_solve() {
        let mut game = controller(2, 2);
        game.apply(PuzzleAction::PressCell { row: 0, col: 0 });
        game.apply(PuzzleAction::RotateRight);
        assert!(game.apply(PuzzleAction::Tick).is_none());

        game.apply(PuzzleAction::RotateLeft);
        assert!(game.is_solved());
    }

    #[test]
    fn cell_mapping_uses_integer_division() {
        assert_eq!(cell_at(0.0, 0.0, 100), Some((0, 0)));
        assert_eq!(cell_at(99.9, 0.0, 100), Some((0, 0)));
        assert_eq!(cell_at(100.0, 250.0, 100), Some((2, 1)));
        assert_eq!(cell_at(-1.0, 10.0, 100), None);
        assert_eq!(cell_at(10.0, 10.0, 0), None);
    }
}

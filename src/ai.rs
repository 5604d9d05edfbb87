use crate::board::{BOARD_SIZE, Board};
use crate::game::MoveSelector;

/// Static positional weights, row-major. Corners are uncapturable and
/// score highest; the squares touching a corner hand the corner to the
/// opponent and are penalized hardest; edges are mildly positive.
const WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 5, 1, 1, 5, -2, 10],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [10, -2, 5, 1, 1, 5, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Heuristic opponent: picks the legal move with the highest static
/// weight, no lookahead. Ties resolve to the first move in row-major
/// order, so selection is fully deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalSelector;

impl MoveSelector for PositionalSelector {
    fn select_move(&self, board: &Board, is_black: bool) -> Option<usize> {
        let mut legal = board.legal_moves(is_black);
        let mut best: Option<(usize, i32)> = None;

        while legal != 0 {
            let pos = legal.trailing_zeros() as usize;
            legal &= legal - 1;

            let weight = WEIGHTS[pos / BOARD_SIZE][pos % BOARD_SIZE];
            match best {
                Some((_, best_weight)) if best_weight >= weight => {}
                _ => best = Some((pos, weight)),
            }
        }

        best.map(|(pos, _)| pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * BOARD_SIZE + col)
    }

    #[test]
    fn returns_none_without_legal_moves() {
        let board = Board::from_bitboards(u64::MAX, 0);

        assert_eq!(PositionalSelector.select_move(&board, true), None);
        assert_eq!(PositionalSelector.select_move(&board, false), None);
    }

    #[test]
    fn prefers_a_corner_over_any_other_move() {
        // Black can take the a1 corner (capturing b1) or the weak c2
        // square (capturing c3).
        let black = bit(0, 2) | bit(3, 2);
        let white = bit(0, 1) | bit(2, 2);
        let board = Board::from_bitboards(black, white);

        let legal = board.legal_moves(true);
        assert_ne!(legal & bit(0, 0), 0);
        assert_ne!(legal & bit(1, 2), 0);

        assert_eq!(PositionalSelector.select_move(&board, true), Some(0));
    }

    #[test]
    fn equal_weights_resolve_to_the_first_move_in_order() {
        // All four opening moves for black sit on weight-1 squares.
        let board = Board::new();

        let choice = PositionalSelector.select_move(&board, true);
        assert_eq!(choice, Some(2 * BOARD_SIZE + 3)); // d3, lowest index
    }

    #[test]
    fn selection_is_deterministic() {
        let board = Board::new();

        let first = PositionalSelector.select_move(&board, false);
        for _ in 0..10 {
            assert_eq!(PositionalSelector.select_move(&board, false), first);
        }
    }
}

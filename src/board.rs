pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
/// Bit `row * 8 + col` is set in at most one of the two masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the standard opening:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds an arbitrary position. The masks must not overlap.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        debug_assert_eq!(black & white, 0, "bitboards must be disjoint");
        Self { black, white }
    }

    /// Pure capture query: the mask of opposing stones that placing
    /// `pos` for the given side would flip. Zero means the move is
    /// illegal (occupied target, out of range, or nothing bracketed).
    pub fn flips(&self, pos: usize, is_black: bool) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }
        let (me, opp) = self.sides(is_black);
        if ((me | opp) & bit(pos)) != 0 {
            return 0;
        }

        let row = (pos / BOARD_SIZE) as i32;
        let col = (pos % BOARD_SIZE) as i32;

        DIRECTIONS
            .iter()
            .fold(0u64, |acc, &(dr, dc)| acc | ray_capture(me, opp, row, col, dr, dc))
    }

    /// Returns the legal move mask for the given side.
    /// Bit order (row-major ascending) is the enumeration contract.
    pub fn legal_moves(&self, is_black: bool) -> u64 {
        let mut legal = 0u64;
        for pos in 0..NUM_SQUARES {
            if self.flips(pos, is_black) != 0 {
                legal |= bit(pos);
            }
        }
        legal
    }

    /// Places one stone and flips captured stones.
    /// Returns the flipped mask, or 0 (board untouched) when illegal.
    pub fn place(&mut self, pos: usize, is_black: bool) -> u64 {
        let captured = self.flips(pos, is_black);
        if captured == 0 {
            return 0;
        }

        let (me, opp) = self.sides(is_black);
        let next_me = me | bit(pos) | captured;
        let next_opp = opp & !captured;

        if is_black {
            self.black = next_me;
            self.white = next_opp;
        } else {
            self.white = next_me;
            self.black = next_opp;
        }

        captured
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - (self.black | self.white).count_ones() as u8
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (pos, cell) in cells.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.black & square) != 0 {
                1
            } else if (self.white & square) != 0 {
                2
            } else {
                0
            };
        }
        cells
    }

    fn sides(&self, is_black: bool) -> (u64, u64) {
        if is_black {
            (self.black, self.white)
        } else {
            (self.white, self.black)
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks one compass direction from `(row, col)` over contiguous
/// opposing stones. The run is captured only when it terminates on an
/// own stone; an empty square or the board edge yields nothing.
fn ray_capture(me: u64, opp: u64, row: i32, col: i32, dr: i32, dc: i32) -> u64 {
    let mut run = 0u64;
    let mut r = row + dr;
    let mut c = col + dc;

    while in_bounds(r, c) {
        let square = bit((r as usize) * BOARD_SIZE + c as usize);
        if (opp & square) != 0 {
            run |= square;
        } else if (me & square) != 0 {
            return run;
        } else {
            return 0;
        }
        r += dr;
        c += dc;
    }

    0
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

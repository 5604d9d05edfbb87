use web_time::{Duration, Instant};

use crate::board::{BOARD_SIZE, Board, NUM_SQUARES};
use crate::stats::StatsRecord;
use crate::types::{GameMode, GameResult, GameState, Position};

pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

/// Artificial decision delay before the computer's move is applied.
/// Purely cosmetic; gameplay does not depend on it.
pub const CPU_THINK_TIME: Duration = Duration::from_millis(1200);

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, is_black: bool) -> Option<usize>;
}

/// A computer move scheduled for the future. The generation tag pins it
/// to the board it was scheduled against: reset and mode changes bump
/// the session generation, so a stale pending move is dropped instead
/// of being applied to a fresh board.
#[derive(Debug, Clone, Copy)]
struct PendingCpuMove {
    generation: u64,
    deadline: Instant,
}

pub struct GameSession {
    board: Board,
    current_player: u8,
    mode: GameMode,
    is_game_over: bool,
    is_pass: bool,
    passed_player: Option<u8>,
    flipped: Vec<u8>,
    stats: StatsRecord,
    selector: Box<dyn MoveSelector>,
    pending_cpu: Option<PendingCpuMove>,
    generation: u64,
}

impl GameSession {
    pub fn new(mode: GameMode, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current_player: PLAYER_BLACK,
            mode,
            is_game_over: false,
            is_pass: false,
            passed_player: None,
            flipped: Vec::new(),
            stats: StatsRecord {
                last_mode: mode,
                ..StatsRecord::default()
            },
            selector,
            pending_cpu: None,
            generation: 0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn is_thinking(&self) -> bool {
        self.pending_cpu.is_some()
    }

    /// Human command: place a stone for the side to move.
    /// Rejections leave the session untouched.
    pub fn submit_move(&mut self, row: u8, col: u8) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.pending_cpu.is_some() {
            return Err("computer is thinking".to_string());
        }
        if self.mode == GameMode::Solo && self.current_player != PLAYER_BLACK {
            return Err("it is not the player's turn".to_string());
        }

        let pos = row_col_to_pos(row, col)?;
        self.apply_move(pos)
    }

    /// Applies the scheduled computer move once its deadline has
    /// passed. Returns `Ok(true)` when a move was applied.
    pub fn poll_cpu(&mut self) -> Result<bool, String> {
        let Some(pending) = self.pending_cpu else {
            return Ok(false);
        };
        if pending.generation != self.generation {
            self.pending_cpu = None;
            return Ok(false);
        }
        if Instant::now() < pending.deadline {
            return Ok(false);
        }

        self.pending_cpu = None;
        self.run_cpu_move()?;
        Ok(true)
    }

    /// Collapses the thinking delay and applies the pending computer
    /// move immediately, if any.
    pub fn tick_cpu_now(&mut self) -> Result<bool, String> {
        if let Some(pending) = &mut self.pending_cpu {
            pending.deadline = Instant::now();
        }
        self.poll_cpu()
    }

    /// Switches solo/duo and starts over from the opening position.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.stats.last_mode = mode;
        self.reset();
    }

    /// Back to the opening position, black to move. Any in-flight
    /// computer move is invalidated.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending_cpu = None;
        self.board = Board::new();
        self.current_player = PLAYER_BLACK;
        self.is_game_over = false;
        self.is_pass = false;
        self.passed_player = None;
        self.flipped.clear();
    }

    pub fn stats(&self) -> &StatsRecord {
        &self.stats
    }

    /// Startup path: adopts a previously persisted record and resumes
    /// its last mode from the opening position.
    pub fn set_stats(&mut self, stats: StatsRecord) {
        self.stats = stats;
        self.set_mode(stats.last_mode);
    }

    pub fn get_legal_moves(&self) -> Vec<Position> {
        let legal = self.board.legal_moves(self.current_player == PLAYER_BLACK);
        bitmask_to_indices(legal)
            .into_iter()
            .map(|idx| Position {
                row: idx / BOARD_SIZE as u8,
                col: idx % BOARD_SIZE as u8,
            })
            .collect()
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            mode: self.mode,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_thinking: self.pending_cpu.is_some(),
            is_pass: self.is_pass,
            passed_player: self.passed_player,
            flipped: self.flipped.clone(),
            legal_moves: self.get_legal_moves(),
        }
    }

    /// Meaningful once the game-over flag is set.
    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult {
            winner: if black_count > white_count {
                PLAYER_BLACK
            } else if white_count > black_count {
                PLAYER_WHITE
            } else {
                0
            },
            black_count,
            white_count,
        }
    }

    fn apply_move(&mut self, pos: usize) -> Result<(), String> {
        let mover = self.current_player;
        let flipped = self.board.place(pos, mover == PLAYER_BLACK);
        if flipped == 0 {
            return Err("illegal move".to_string());
        }

        self.is_pass = false;
        self.passed_player = None;
        self.flipped = bitmask_to_indices(flipped);
        self.advance_turn(mover);
        Ok(())
    }

    /// Turn resolution after an accepted move by `mover`:
    /// opponent moves next if it can; a stuck opponent is skipped and
    /// the mover stays on turn; the game ends when neither side can
    /// move (a full board is the same case).
    fn advance_turn(&mut self, mover: u8) {
        let opponent = opponent_of(mover);

        if self.board.legal_moves(opponent == PLAYER_BLACK) != 0 {
            self.current_player = opponent;
        } else if self.board.legal_moves(mover == PLAYER_BLACK) != 0 {
            self.is_pass = true;
            self.passed_player = Some(opponent);
            self.current_player = mover;
        } else {
            self.finish_game();
            return;
        }

        self.maybe_schedule_cpu();
    }

    fn maybe_schedule_cpu(&mut self) {
        if self.mode == GameMode::Solo && self.current_player == PLAYER_WHITE {
            self.pending_cpu = Some(PendingCpuMove {
                generation: self.generation,
                deadline: Instant::now() + CPU_THINK_TIME,
            });
        }
    }

    fn run_cpu_move(&mut self) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if self.mode != GameMode::Solo || self.current_player != PLAYER_WHITE {
            return Err("it is not the computer's turn".to_string());
        }

        let legal = self.board.legal_moves(false);
        let selected = self
            .selector
            .select_move(&self.board, false)
            .ok_or_else(|| "computer could not select a move".to_string())?;

        if selected >= NUM_SQUARES {
            return Err("computer selected an out-of-range move".to_string());
        }
        if (legal & (1u64 << selected)) == 0 {
            return Err("computer selected an illegal move".to_string());
        }

        self.apply_move(selected)
    }

    /// Game over: higher count wins. Solo tallies are kept from the
    /// human's perspective; duo games never touch the record.
    fn finish_game(&mut self) {
        self.is_game_over = true;
        self.pending_cpu = None;

        if self.mode == GameMode::Solo {
            let (black_count, white_count) = self.board.count();
            if black_count > white_count {
                self.stats.wins += 1;
            } else if white_count > black_count {
                self.stats.losses += 1;
            } else {
                self.stats.draws += 1;
            }
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: u8) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
        self.passed_player = None;
        self.flipped.clear();
        self.maybe_schedule_cpu();
    }
}

fn row_col_to_pos(row: u8, col: u8) -> Result<usize, String> {
    if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
        return Err("row/col out of range".to_string());
    }
    Ok((row as usize) * BOARD_SIZE + col as usize)
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}

fn opponent_of(player: u8) -> u8 {
    match player {
        PLAYER_BLACK => PLAYER_WHITE,
        _ => PLAYER_BLACK,
    }
}

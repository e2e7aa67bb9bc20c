//! Core game state and the action reducer
//!
//! The engine is a single pure function: `reduce` takes the current
//! snapshot and one action and returns the next snapshot. All timing,
//! input mapping, and rendering live in the driver; the engine never
//! mutates state in place across a transition boundary.

use crate::bag::SevenBag;
use crate::board::Board;
use crate::piece::{Piece, RotationDirection};
use crate::score::Score;
use crate::tetromino::TetrominoType;

/// Number of upcoming pieces shown to the player
pub const QUEUE_SIZE: usize = 5;

/// Player and timer actions the reducer accepts.
///
/// Tick comes from the driver's drop timer and behaves exactly like
/// MoveDown; everything else is a key press. None carry payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    RotateCcw,
    HardDrop,
    Hold,
    Pause,
    Resume,
    Restart,
    Tick,
}

/// The authoritative game snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Locked stack. Never contains ghost markers.
    pub board: Board,
    /// The falling piece
    pub current: Piece,
    /// Upcoming piece types, always QUEUE_SIZE long
    pub queue: Vec<TetrominoType>,
    /// Piece set aside by hold, keeping the rotation it had
    pub held: Option<Piece>,
    /// False only between a hold and the next successful lock
    pub can_hold: bool,
    pub score: Score,
    pub game_over: bool,
    pub paused: bool,
    bag: SevenBag,
}

impl GameState {
    /// Fresh game with a random piece sequence.
    ///
    /// Starts paused; the driver's pause key doubles as "start".
    pub fn new() -> Self {
        Self::from_bag(SevenBag::new())
    }

    /// Fresh game with a fixed piece sequence (reproducible runs and tests)
    pub fn with_seed(seed: u64) -> Self {
        Self::from_bag(SevenBag::with_seed(seed))
    }

    fn from_bag(mut bag: SevenBag) -> Self {
        let current = Piece::spawn(bag.draw());
        let queue = (0..QUEUE_SIZE).map(|_| bag.draw()).collect();
        Self {
            board: Board::new(),
            current,
            queue,
            held: None,
            can_hold: true,
            score: Score::new(),
            game_over: false,
            paused: true,
            bag,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Produce the next snapshot for an action.
///
/// Guards come first: a finished game only accepts Restart, and a paused
/// game only accepts Pause (idempotent), Resume, and Restart. Guarded-off
/// actions are silent no-ops returning the state unchanged.
pub fn reduce(state: &GameState, action: Action) -> GameState {
    if state.game_over && action != Action::Restart {
        return state.clone();
    }
    if state.paused && !matches!(action, Action::Pause | Action::Resume | Action::Restart) {
        return state.clone();
    }

    match action {
        Action::MoveLeft => try_shift(state, -1),
        Action::MoveRight => try_shift(state, 1),
        Action::MoveDown | Action::Tick => step_down(state),
        Action::Rotate => try_rotate(state, RotationDirection::Clockwise),
        Action::RotateCcw => try_rotate(state, RotationDirection::CounterClockwise),
        Action::HardDrop => hard_drop(state),
        Action::Hold => hold(state),
        Action::Pause => GameState {
            paused: true,
            ..state.clone()
        },
        Action::Resume => GameState {
            paused: false,
            ..state.clone()
        },
        Action::Restart => GameState::new(),
    }
}

/// Sideways move, accepted only if the checker allows it
fn try_shift(state: &GameState, dx: i32) -> GameState {
    let moved = state.current.translated(dx, 0);
    if state.board.can_place(&moved) {
        GameState {
            current: moved,
            ..state.clone()
        }
    } else {
        state.clone()
    }
}

/// Rotation through the kick resolver; a rejected rotation changes nothing
fn try_rotate(state: &GameState, direction: RotationDirection) -> GameState {
    match state.current.rotate_with_kicks(direction, &state.board) {
        Some(rotated) => GameState {
            current: rotated,
            ..state.clone()
        },
        None => state.clone(),
    }
}

/// One row of gravity; a blocked step soft-locks the piece where it is
fn step_down(state: &GameState) -> GameState {
    let below = state.current.translated(0, 1);
    if state.board.can_place(&below) {
        GameState {
            current: below,
            ..state.clone()
        }
    } else {
        lock_piece(state, &state.current, 0)
    }
}

/// Instant drop to the landing row, with distance scored as a bonus
fn hard_drop(state: &GameState) -> GameState {
    let landed = state.current.dropped(&state.board);
    let distance = (landed.y - state.current.y) as u32;
    lock_piece(state, &landed, distance)
}

/// Lock a landed piece and assemble the next snapshot: merge, clear,
/// score, advance the queue, and check whether the next spawn fits.
fn lock_piece(state: &GameState, landed: &Piece, hard_drop_cells: u32) -> GameState {
    let mut board = state.board.clone();
    board.merge(landed);
    let cleared = board.clear_lines();

    let mut score = state.score;
    if hard_drop_cells > 0 {
        score.add_hard_drop(hard_drop_cells);
    }
    score.add_line_clear(cleared);
    if cleared > 0 {
        tracing::debug!(
            cleared,
            lines = score.lines,
            level = score.level,
            "lines cleared"
        );
    }

    let (next_piece, queue, bag) = advance_queue(state);
    let game_over = !board.can_place(&next_piece);
    if game_over {
        tracing::info!(points = score.points, lines = score.lines, "spawn blocked, game over");
    }

    GameState {
        board,
        current: next_piece,
        queue,
        held: state.held.clone(),
        can_hold: true,
        score,
        game_over,
        paused: game_over || state.paused,
        bag,
    }
}

/// Pop the queue front as the next piece and refill the tail from the bag
fn advance_queue(state: &GameState) -> (Piece, Vec<TetrominoType>, SevenBag) {
    let mut bag = state.bag.clone();
    let mut queue = state.queue.clone();
    let next = Piece::spawn(queue.remove(0));
    queue.push(bag.draw());
    (next, queue, bag)
}

/// Swap the current piece with the held one (or the queue front when
/// nothing is held yet). Allowed once per lock cycle.
fn hold(state: &GameState) -> GameState {
    if !state.can_hold {
        return state.clone();
    }

    let (incoming, queue, bag) = match &state.held {
        // Direct swap; queue and randomizer stay untouched
        Some(parked) => (
            parked.at_spawn_anchor(),
            state.queue.clone(),
            state.bag.clone(),
        ),
        // First hold of the cycle pulls from the queue like a lock does
        None => advance_queue(state),
    };
    let held = Some(state.current.clone());

    if !state.board.can_place(&incoming) {
        tracing::info!("hold swap cannot spawn, game over");
        return GameState {
            queue,
            held,
            can_hold: false,
            game_over: true,
            paused: true,
            bag,
            ..state.clone()
        };
    }

    GameState {
        current: incoming,
        queue,
        held,
        can_hold: false,
        bag,
        ..state.clone()
    }
}

//! Game state module - the snake simulation as pure transitions
//!
//! `GameState` is an immutable snapshot. Every transition (`advance`,
//! `change_direction`, `with_paused`) returns a fresh value and leaves the
//! receiver untouched, so a renderer holding an older snapshot never observes
//! a half-applied tick.

use crate::rng::SimpleRng;
use crate::snake::{Food, Snake};
use crate::types::{BoardSize, Direction, Position};

/// Random samples tried before falling back to scanning for free cells.
const FOOD_SAMPLE_ATTEMPTS: u32 = 64;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, leaving no room for food.
    BoardFilled,
}

impl EndReason {
    pub fn is_win(&self) -> bool {
        matches!(self, EndReason::BoardFilled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::WallCollision => "wall",
            EndReason::SelfCollision => "self",
            EndReason::BoardFilled => "board_filled",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: BoardSize,
    snake: Snake,
    /// `None` only once the board is filled.
    food: Option<Food>,
    score: u32,
    end: Option<EndReason>,
    paused: bool,
    rng: SimpleRng,
}

impl GameState {
    /// Start a new game: head at the board center, heading right, one food.
    pub fn initialize(board: BoardSize, seed: u32) -> Self {
        let snake = Snake::new(board.center(), Direction::Right);
        let mut rng = SimpleRng::new(seed);
        let food = spawn_food(&snake, board, &mut rng);
        let end = if food.is_none() {
            Some(EndReason::BoardFilled)
        } else {
            None
        };

        Self {
            board,
            snake,
            food,
            score: 0,
            end,
            paused: false,
            rng,
        }
    }

    /// Assemble a state from explicit parts (scenario setup and tests).
    pub fn from_parts(board: BoardSize, snake: Snake, food: Position, score: u32, seed: u32) -> Self {
        Self {
            board,
            snake,
            food: Some(Food::new(food)),
            score,
            end: None,
            paused: false,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn board(&self) -> BoardSize {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn terminal(&self) -> bool {
        self.end.is_some()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end
    }

    /// Snake length including the head.
    pub fn snake_length(&self) -> usize {
        self.snake.len()
    }

    /// Neither paused nor over.
    pub fn playable(&self) -> bool {
        !self.paused && self.end.is_none()
    }

    /// Advance one tick.
    ///
    /// Returns an unchanged copy when paused or over. Collisions freeze the
    /// board and only set the end reason.
    pub fn advance(&self) -> GameState {
        if !self.playable() {
            return self.clone();
        }

        let new_head = self.snake.head().step(self.snake.direction());

        if !self.board.contains(new_head) {
            return self.ended(EndReason::WallCollision);
        }

        let eats = self.food.is_some_and(|f| f.position == new_head);

        if self.snake.would_bite(new_head, eats) {
            return self.ended(EndReason::SelfCollision);
        }

        let snake = self.snake.moved_to(new_head, eats);
        if !eats {
            return Self {
                snake,
                ..self.clone()
            };
        }

        let mut rng = self.rng;
        let food = spawn_food(&snake, self.board, &mut rng);
        let end = if food.is_none() {
            Some(EndReason::BoardFilled)
        } else {
            None
        };

        Self {
            board: self.board,
            snake,
            food,
            score: self.score.saturating_add(1),
            end,
            paused: false,
            rng,
        }
    }

    /// Turn the snake. Reversing onto the neck is rejected.
    pub fn change_direction(&self, requested: Direction) -> GameState {
        if requested.is_opposite(self.snake.direction()) {
            return self.clone();
        }
        Self {
            snake: self.snake.with_direction(requested),
            ..self.clone()
        }
    }

    /// Set the paused flag. Finished games cannot be paused.
    pub fn with_paused(&self, paused: bool) -> GameState {
        if self.terminal() {
            return self.clone();
        }
        Self {
            paused,
            ..self.clone()
        }
    }

    fn ended(&self, reason: EndReason) -> GameState {
        Self {
            end: Some(reason),
            ..self.clone()
        }
    }
}

/// Pick a uniformly random cell not covered by `snake`.
///
/// Returns `None` when the snake covers the whole board.
fn spawn_food(snake: &Snake, board: BoardSize, rng: &mut SimpleRng) -> Option<Food> {
    let cells = board.cell_count();
    if snake.len() >= cells {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let p = rng.next_cell(board);
        if !snake.occupies(p) {
            return Some(Food::new(p));
        }
    }

    // Crowded board: choose among the free cells directly.
    let free = cells - snake.len();
    let mut nth = rng.next_range(free as u32) as usize;
    for y in 0..board.height as i32 {
        for x in 0..board.width as i32 {
            let p = Position::new(x, y);
            if snake.occupies(p) {
                continue;
            }
            if nth == 0 {
                return Some(Food::new(p));
            }
            nth -= 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn board10() -> BoardSize {
        BoardSize::new(10, 10)
    }

    #[test]
    fn test_initialize() {
        let state = GameState::initialize(board10(), 12345);

        assert_eq!(state.snake().head(), Position::new(5, 5));
        assert!(state.snake().body().is_empty());
        assert_eq!(state.snake().direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert!(!state.terminal());
        assert!(!state.paused());

        let food = state.food().unwrap();
        assert!(board10().contains(food.position));
        assert_ne!(food.position, state.snake().head());
    }

    #[test]
    fn test_initialize_food_never_on_head() {
        for seed in 0..500 {
            for (w, h) in [(5, 5), (6, 9), (12, 7)] {
                let state = GameState::initialize(BoardSize::new(w, h), seed);
                assert_ne!(state.food().unwrap().position, state.snake().head());
            }
        }
    }

    #[test]
    fn test_initialize_single_cell_board_is_filled() {
        let state = GameState::initialize(BoardSize::new(1, 1), 1);
        assert!(state.food().is_none());
        assert_eq!(state.end_reason(), Some(EndReason::BoardFilled));
    }

    #[test]
    fn test_advance_moves_forward() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right);
        let state = GameState::from_parts(board10(), snake, Position::new(0, 0), 0, 1);

        let next = state.advance();
        assert_eq!(next.snake().head(), Position::new(6, 5));
        assert!(next.snake().body().is_empty());
        assert_eq!(next.score(), 0);
        assert_eq!(next.food(), state.food());
    }

    #[test]
    fn test_advance_eats_food() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right);
        let state = GameState::from_parts(board10(), snake, Position::new(6, 5), 0, 1);

        let next = state.advance();
        assert_eq!(next.snake().head(), Position::new(6, 5));
        assert_eq!(next.score(), 1);
        assert_eq!(next.snake().body().len(), 1);
        assert!(next.snake().body().contains(&Position::new(5, 5)));

        let food = next.food().unwrap().position;
        assert!(!next.snake().occupies(food));
        assert!(board10().contains(food));
    }

    #[test]
    fn test_advance_wall_collision_freezes() {
        let snake = Snake::new(Position::new(0, 5), Direction::Left);
        let state = GameState::from_parts(board10(), snake, Position::new(7, 7), 4, 1);

        let next = state.advance();
        assert!(next.terminal());
        assert_eq!(next.end_reason(), Some(EndReason::WallCollision));
        assert_eq!(next.snake(), state.snake());
        assert_eq!(next.score(), 4);
        assert_eq!(next.food(), state.food());

        // Further ticks are no-ops.
        assert_eq!(next.advance(), next);
    }

    #[test]
    fn test_advance_self_collision() {
        // Head at (2,1) heading up into (2,0), which is mid-body.
        let snake = Snake::with_body(
            Position::new(2, 1),
            [
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0),
                Position::new(3, 1),
            ],
            Direction::Up,
        );
        let state = GameState::from_parts(board10(), snake, Position::new(9, 9), 5, 1);
        let next = state.advance();
        assert_eq!(next.end_reason(), Some(EndReason::SelfCollision));
        assert_eq!(next.snake(), state.snake());
    }

    #[test]
    fn test_advance_into_vacating_tail_is_safe() {
        let snake = Snake::with_body(
            Position::new(1, 0),
            [Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)],
            Direction::Left,
        );
        let state = GameState::from_parts(board10(), snake, Position::new(9, 9), 3, 1);
        let next = state.advance();
        assert!(!next.terminal());
        assert_eq!(next.snake().head(), Position::new(0, 0));
        assert_eq!(next.snake().len(), 4);
    }

    #[test]
    fn test_paused_blocks_advance() {
        let state = GameState::initialize(board10(), 3).with_paused(true);
        assert!(state.paused());
        assert_eq!(state.advance(), state);
    }

    #[test]
    fn test_paused_accepts_direction() {
        let state = GameState::initialize(board10(), 3).with_paused(true);
        let turned = state.change_direction(Direction::Up);
        assert_eq!(turned.snake().direction(), Direction::Up);
        assert!(turned.paused());
    }

    #[test]
    fn test_cannot_pause_finished_game() {
        let snake = Snake::new(Position::new(9, 0), Direction::Right);
        let over = GameState::from_parts(board10(), snake, Position::new(0, 9), 0, 1).advance();
        assert!(over.terminal());
        assert!(!over.with_paused(true).paused());
    }

    #[test]
    fn test_change_direction_rejects_opposite() {
        let state = GameState::initialize(board10(), 42);
        for d in Direction::ALL {
            let s = state.change_direction(d);
            let reversed = s.change_direction(s.snake().direction().opposite());
            assert_eq!(reversed, s);
        }
    }

    #[test]
    fn test_change_direction_does_not_mutate_receiver() {
        let state = GameState::initialize(board10(), 42);
        let turned = state.change_direction(Direction::Down);
        assert_eq!(state.snake().direction(), Direction::Right);
        assert_eq!(turned.snake().direction(), Direction::Down);
    }

    #[test]
    fn test_board_filled_is_a_win() {
        // 2x1 board: snake at (0,0), food at (1,0).
        let board = BoardSize::new(2, 1);
        let snake = Snake::new(Position::new(0, 0), Direction::Right);
        let state = GameState::from_parts(board, snake, Position::new(1, 0), 0, 1);

        let next = state.advance();
        assert_eq!(next.score(), 1);
        assert!(next.food().is_none());
        assert_eq!(next.end_reason(), Some(EndReason::BoardFilled));
        assert!(next.end_reason().unwrap().is_win());
    }

    #[test]
    fn test_spawn_food_crowded_board_finds_last_cell() {
        // 3x3 board, snake covers 8 cells, (2,2) is the only free one.
        let board = BoardSize::new(3, 3);
        let snake = Snake::with_body(
            Position::new(1, 2),
            [
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 2),
            ],
            Direction::Right,
        );
        let mut rng = SimpleRng::new(5);
        let food = spawn_food(&snake, board, &mut rng).unwrap();
        assert_eq!(food.position, Position::new(2, 2));
    }

    #[test]
    fn test_long_run_body_has_no_duplicates() {
        // Sweep the board in a serpentine so the snake eats and grows.
        let board = BoardSize::new(8, 8);
        let mut state = GameState::initialize(board, 777);
        for step in 0..2_000 {
            if state.terminal() {
                break;
            }
            let head = state.snake().head();
            let dir = state.snake().direction();
            let next_dir = match dir {
                Direction::Right if head.x == board.width as i32 - 1 => Direction::Down,
                Direction::Left if head.x == 0 => Direction::Down,
                Direction::Down if head.x == 0 => Direction::Right,
                Direction::Down => Direction::Left,
                Direction::Up => Direction::Right,
                d => d,
            };
            state = state.change_direction(next_dir).advance();

            let mut seen = HashSet::new();
            for p in state.snake().body() {
                assert!(seen.insert(*p), "duplicate body cell at step {}", step);
            }
            if !state.terminal() {
                assert!(!state.snake().body().contains(&state.snake().head()));
            }
        }
    }
}

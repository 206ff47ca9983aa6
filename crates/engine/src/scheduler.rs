//! Game loop scheduler - owns one session and drives it tick by tick
//!
//! `GameLoop` holds the current [`GameState`] snapshot, the tick timer, the
//! input gate and the score ledger. It never reads a clock: every call takes
//! `now_ms`, so the same loop runs under the terminal poll loop, the tokio
//! session actor, or a test that simply counts milliseconds.
//!
//! Session lifecycle:
//!
//! 1. `start` creates a fresh state and arms the first tick.
//! 2. Each due token goes back through `on_tick`, which advances the state and
//!    re-arms using the speed curve (or a short poll while paused).
//! 3. When the state turns terminal the timer stops and the session is
//!    recorded once in the ledger (if it scored anything).
//! 4. `restart` records an unfinished session, then starts a new one.

use crate::config::{Settings, SettingsProvider};
use crate::core::{next_interval_ms, seed_from_time, EndReason, GameState};
use crate::error::LoopError;
use crate::input::InputGate;
use crate::ledger::{NewScore, ScoreLedger, ScoreRecord};
use crate::timer::{TickTimer, TickToken};
use crate::types::{BoardSize, Direction, GameAction, PAUSE_POLL_MS};

/// Final numbers of one session, kept in memory whether or not saving works.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub session: u64,
    pub score: u32,
    /// Including the head.
    pub snake_length: u32,
    pub tier_label: String,
    pub player_name: String,
    pub duration_ms: u64,
    /// `None` when a running session was cut short by a restart.
    pub end_reason: Option<EndReason>,
}

impl SessionSummary {
    pub fn to_new_score(&self) -> NewScore {
        NewScore::new(
            self.score,
            self.player_name.clone(),
            self.snake_length,
            self.tier_label.clone(),
            self.duration_ms,
        )
    }
}

/// What happened to a finished session's score.
#[derive(Debug, Clone, PartialEq)]
pub enum Persisted {
    Saved(ScoreRecord),
    /// Zero scores are not recorded.
    Skipped,
    /// The ledger refused the write; the summary is queued for `flush_unsaved`.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionEnded {
    pub summary: SessionSummary,
    pub persisted: Persisted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The token was cancelled or replaced; nothing happened.
    Stale,
    /// Paused: no advance, polled again at `next`.
    Idle { next: TickToken },
    Advanced { next: TickToken },
    Ended(SessionEnded),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Restarted {
    /// The outgoing session, if it had not been recorded yet.
    pub previous: Option<SessionEnded>,
    pub first_tick: TickToken,
}

pub struct GameLoop<L> {
    ledger: L,
    provider: Box<dyn SettingsProvider>,
    /// Settings read at the last session start.
    active: Settings,
    state: Option<GameState>,
    timer: TickTimer,
    gate: InputGate,
    started_at_ms: u64,
    session: u64,
    recorded: bool,
    seed: Option<u32>,
    unsaved: Vec<SessionSummary>,
}

impl<L: ScoreLedger> GameLoop<L> {
    /// `provider` is consulted again every time a session starts, so changed
    /// settings take effect on the next `start` or `restart`.
    pub fn new<P: SettingsProvider + 'static>(provider: P, ledger: L) -> Self {
        let active = provider.settings();
        Self {
            ledger,
            provider: Box::new(provider),
            active,
            state: None,
            timer: TickTimer::new(),
            gate: InputGate::new(),
            started_at_ms: 0,
            session: 0,
            recorded: false,
            seed: None,
            unsaved: Vec::new(),
        }
    }

    /// Use a fixed base seed so food placement is reproducible.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Settings of the current session (or the provider's values before the
    /// first start).
    pub fn settings(&self) -> &Settings {
        &self.active
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn pending_tick(&self) -> Option<TickToken> {
        self.timer.pending()
    }

    /// The pending tick if it is due at `now_ms`.
    pub fn due_tick(&self, now_ms: u64) -> Option<TickToken> {
        self.timer.due(now_ms)
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Summaries whose insert failed, oldest first.
    pub fn unsaved(&self) -> &[SessionSummary] {
        &self.unsaved
    }

    /// Start a new session on `board`, replacing any current one without
    /// recording it. Returns the first tick.
    pub fn start(&mut self, board: BoardSize, now_ms: u64) -> TickToken {
        self.begin(Some(board), now_ms)
    }

    /// Start a new session on the provider's board size.
    pub fn start_configured(&mut self, now_ms: u64) -> TickToken {
        self.begin(None, now_ms)
    }

    fn begin(&mut self, board: Option<BoardSize>, now_ms: u64) -> TickToken {
        self.active = self.provider.settings();
        let board = board.unwrap_or(self.active.board);

        self.timer.cancel();
        self.gate.reset();
        self.session += 1;
        self.recorded = false;
        self.started_at_ms = now_ms;

        let seed = match self.seed {
            Some(base) => base.wrapping_add(self.session as u32),
            None => seed_from_time(),
        };
        let state = GameState::initialize(board, seed);
        self.state = Some(state);

        tracing::info!(
            session = self.session,
            width = board.width,
            height = board.height,
            tier = self.active.tier.label,
            "session started"
        );

        self.timer
            .arm(now_ms, next_interval_ms(&self.active.tier, 0))
    }

    /// Handle a fired tick.
    pub fn on_tick(&mut self, token: TickToken, now_ms: u64) -> Result<TickOutcome, LoopError> {
        let Some(state) = self.state.as_ref() else {
            return Err(LoopError::NotStarted);
        };

        if !self.timer.take_if_current(token) {
            return Ok(TickOutcome::Stale);
        }

        if !state.playable() {
            let next = self.timer.arm(now_ms, PAUSE_POLL_MS);
            return Ok(TickOutcome::Idle { next });
        }

        let next_state = state.advance();
        let terminal = next_state.terminal();
        let score = next_state.score();
        self.state = Some(next_state);

        if terminal {
            self.timer.cancel();
            return Ok(match self.record_session(now_ms) {
                Some(ended) => TickOutcome::Ended(ended),
                None => TickOutcome::Stale,
            });
        }

        let next = self
            .timer
            .arm(now_ms, next_interval_ms(&self.active.tier, score));
        Ok(TickOutcome::Advanced { next })
    }

    /// Drive every tick due at `now_ms` (at most one, since each re-arms ahead).
    pub fn poll(&mut self, now_ms: u64) -> Result<Option<TickOutcome>, LoopError> {
        match self.due_tick(now_ms) {
            Some(token) => self.on_tick(token, now_ms).map(Some),
            None => Ok(None),
        }
    }

    /// Route a turn through the debounce gate into the state.
    ///
    /// Returns true when the direction was applied. Reversals are refused
    /// before the gate so they do not use up the debounce window.
    pub fn change_direction(&mut self, requested: Direction, now_ms: u64) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        if state.terminal() || requested.is_opposite(state.snake().direction()) {
            return false;
        }
        let min_interval = self.active.min_input_interval_ms();
        let Some(direction) = self.gate.accept(requested, now_ms, min_interval) else {
            return false;
        };

        let next = state.change_direction(direction);
        self.state = Some(next);
        true
    }

    /// Pause the session. The timer keeps polling so resume stays responsive.
    pub fn pause(&mut self) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        if !state.playable() {
            return false;
        }
        self.state = Some(state.with_paused(true));
        tracing::debug!(session = self.session, "paused");
        true
    }

    /// Resume a paused session, arming a tick if none is pending.
    pub fn resume(&mut self, now_ms: u64) -> Option<TickToken> {
        let state = self.state.as_ref()?;
        if state.paused() {
            self.state = Some(state.with_paused(false));
            tracing::debug!(session = self.session, "resumed");
        }

        let state = self.state.as_ref()?;
        if state.playable() && !self.timer.is_armed() {
            let interval = next_interval_ms(&self.active.tier, state.score());
            self.timer.arm(now_ms, interval);
        }
        self.timer.pending()
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> Option<TickToken> {
        let paused = self.state.as_ref()?.paused();
        if paused {
            self.resume(now_ms)
        } else {
            self.pause();
            self.timer.pending()
        }
    }

    /// Record the outgoing session (if not yet recorded) and start over.
    pub fn restart(&mut self, board: BoardSize, now_ms: u64) -> Result<Restarted, LoopError> {
        self.restart_on(Some(board), now_ms)
    }

    fn restart_on(&mut self, board: Option<BoardSize>, now_ms: u64) -> Result<Restarted, LoopError> {
        if self.state.is_none() {
            return Err(LoopError::NotStarted);
        }
        self.timer.cancel();
        let previous = self.record_session(now_ms);
        tracing::debug!(session = self.session, "restarting");
        let first_tick = self.begin(board, now_ms);
        Ok(Restarted {
            previous,
            first_tick,
        })
    }

    /// Apply a player action. Restart re-reads the settings, board size included.
    pub fn apply(&mut self, action: GameAction, now_ms: u64) -> Result<Option<Restarted>, LoopError> {
        match action {
            GameAction::Turn(direction) => {
                self.change_direction(direction, now_ms);
                Ok(None)
            }
            GameAction::Pause => {
                self.toggle_pause(now_ms);
                Ok(None)
            }
            GameAction::Restart => self.restart_on(None, now_ms).map(Some),
        }
    }

    /// Cancel any pending tick. Calling it again is a no-op.
    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    /// Retry queued summaries. Returns how many were saved; stops at the
    /// first failure and leaves the rest queued.
    pub fn flush_unsaved(&mut self) -> Result<usize, crate::ledger::LedgerError> {
        let mut saved = 0;
        while let Some(summary) = self.unsaved.first() {
            self.ledger.insert(&summary.to_new_score())?;
            self.unsaved.remove(0);
            saved += 1;
        }
        Ok(saved)
    }

    fn record_session(&mut self, now_ms: u64) -> Option<SessionEnded> {
        if self.recorded {
            return None;
        }
        let state = self.state.as_ref()?;
        self.recorded = true;

        let summary = SessionSummary {
            session: self.session,
            score: state.score(),
            snake_length: state.snake_length() as u32,
            tier_label: self.active.tier.label.to_string(),
            player_name: self.active.player_name.clone(),
            duration_ms: self.elapsed_ms(now_ms),
            end_reason: state.end_reason(),
        };

        tracing::info!(
            session = summary.session,
            score = summary.score,
            length = summary.snake_length,
            duration_ms = summary.duration_ms,
            reason = summary.end_reason.map(|r| r.as_str()).unwrap_or("restart"),
            "session ended"
        );

        let persisted = if summary.score == 0 {
            Persisted::Skipped
        } else {
            match self.ledger.insert(&summary.to_new_score()) {
                Ok(record) => Persisted::Saved(record),
                Err(e) => {
                    tracing::warn!(
                        session = summary.session,
                        score = summary.score,
                        error = %e,
                        "failed to save score, keeping it for retry"
                    );
                    self.unsaved.push(summary.clone());
                    Persisted::Failed(e.to_string())
                }
            }
        };

        Some(SessionEnded { summary, persisted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use crate::ledger::{LedgerError, LedgerResult, MemoryLedger};
    use crate::types::SpeedTier;

    fn game() -> GameLoop<MemoryLedger> {
        GameLoop::new(Settings::default(), MemoryLedger::new()).with_seed(11)
    }

    #[test]
    fn test_tick_before_start_is_error() {
        let mut g = game();
        let token = TickToken {
            generation: 1,
            due_at_ms: 0,
        };
        assert_eq!(g.on_tick(token, 0), Err(LoopError::NotStarted));
        assert!(matches!(
            g.restart(BoardSize::SMALL, 0),
            Err(LoopError::NotStarted)
        ));
    }

    #[test]
    fn test_start_arms_first_tick_at_tier_interval() {
        let mut g = game();
        let token = g.start(BoardSize::new(10, 10), 1_000);
        assert_eq!(token.due_at_ms, 1_000 + SpeedTier::NORMAL.start_interval_ms);
        assert_eq!(g.state().unwrap().score(), 0);
    }

    #[test]
    fn test_tick_advances_and_rearms() {
        let mut g = game();
        let token = g.start(BoardSize::new(20, 20), 0);
        let head = g.state().unwrap().snake().head();

        let outcome = g.on_tick(token, token.due_at_ms).unwrap();
        let TickOutcome::Advanced { next } = outcome else {
            panic!("expected advance, got {:?}", outcome);
        };
        assert_eq!(next.due_at_ms, token.due_at_ms + 350);
        assert_eq!(g.state().unwrap().snake().head().x, head.x + 1);
    }

    #[test]
    fn test_stale_token_ignored() {
        let mut g = game();
        let first = g.start(BoardSize::new(20, 20), 0);
        g.stop();
        g.stop();
        assert_eq!(g.on_tick(first, 400).unwrap(), TickOutcome::Stale);
    }

    #[test]
    fn test_pause_polls_without_advancing() {
        let mut g = game();
        let token = g.start(BoardSize::new(20, 20), 0);
        let before = g.state().unwrap().clone();

        assert!(g.pause());
        let outcome = g.on_tick(token, 350).unwrap();
        let TickOutcome::Idle { next } = outcome else {
            panic!("expected idle, got {:?}", outcome);
        };
        assert_eq!(next.due_at_ms, 350 + PAUSE_POLL_MS);
        assert_eq!(g.state().unwrap().snake(), before.snake());
    }

    #[test]
    fn test_resume_rearms_when_nothing_pending() {
        let mut g = game();
        g.start(BoardSize::new(20, 20), 0);
        g.pause();
        g.stop();
        assert!(g.pending_tick().is_none());

        let token = g.resume(500).unwrap();
        assert_eq!(token.due_at_ms, 850);
        assert!(!g.state().unwrap().paused());
    }

    #[test]
    fn test_resume_keeps_existing_tick() {
        let mut g = game();
        let token = g.start(BoardSize::new(20, 20), 0);
        g.pause();
        assert_eq!(g.resume(10), Some(token));
    }

    #[test]
    fn test_turn_debounced() {
        let mut g = game();
        g.start(BoardSize::new(20, 20), 0);

        assert!(g.change_direction(Direction::Up, 1_000));
        // Inside the 150ms window.
        assert!(!g.change_direction(Direction::Left, 1_100));
        assert_eq!(g.state().unwrap().snake().direction(), Direction::Up);
        assert!(g.change_direction(Direction::Left, 1_150));
        assert_eq!(g.state().unwrap().snake().direction(), Direction::Left);
    }

    #[test]
    fn test_reversal_does_not_consume_window() {
        let mut g = game();
        g.start(BoardSize::new(20, 20), 0);

        // Heading right: a left turn is a reversal.
        assert!(!g.change_direction(Direction::Left, 1_000));
        assert!(g.change_direction(Direction::Up, 1_010));
    }

    #[test]
    fn test_turn_while_paused_applies_on_resume() {
        let mut g = game();
        let token = g.start(BoardSize::new(20, 20), 0);
        let head = g.state().unwrap().snake().head();

        g.pause();
        assert!(g.change_direction(Direction::Down, 100));
        g.resume(200);

        g.on_tick(token, 350).unwrap();
        assert_eq!(g.state().unwrap().snake().head().y, head.y + 1);
    }

    #[test]
    fn test_wall_collision_ends_and_records() {
        let mut g = game();
        // 5 wide: head starts at x=2, wall after three moves.
        let mut token = g.start(BoardSize::new(5, 5), 0);
        let mut now = 0;
        let ended = loop {
            now = token.due_at_ms;
            match g.on_tick(token, now).unwrap() {
                TickOutcome::Advanced { next } => token = next,
                TickOutcome::Ended(ended) => break ended,
                other => panic!("unexpected {:?}", other),
            }
        };

        assert!(g.pending_tick().is_none());
        assert!(g.state().unwrap().terminal());
        assert_eq!(ended.summary.duration_ms, now);
        assert_eq!(ended.summary.tier_label, "Normal");
        assert_eq!(ended.summary.end_reason, Some(EndReason::WallCollision));

        let games = g.ledger().total_games().unwrap();
        match ended.persisted {
            Persisted::Saved(ref r) => {
                assert_eq!(games, 1);
                assert_eq!(r.score, ended.summary.score);
            }
            Persisted::Skipped => assert_eq!(games, 0),
            Persisted::Failed(e) => panic!("memory ledger failed: {}", e),
        }

        // Restarting after game over must not record the session twice.
        let restarted = g.restart(BoardSize::new(5, 5), now + 10).unwrap();
        assert!(restarted.previous.is_none());
        assert_eq!(g.ledger().total_games().unwrap(), games);
        assert_eq!(g.session(), 2);
    }

    #[test]
    fn test_restart_records_running_session_with_score() {
        let mut g = game();
        g.start(BoardSize::new(10, 10), 0);

        // Put food right in front of the snake.
        let state = g.state().unwrap();
        let head = state.snake().head();
        let fed = GameState::from_parts(
            state.board(),
            state.snake().clone(),
            head.step(Direction::Right),
            0,
            3,
        );
        g.state = Some(fed);
        let token = g.pending_tick().unwrap();
        g.on_tick(token, 350).unwrap();
        assert_eq!(g.state().unwrap().score(), 1);

        let restarted = g.restart(BoardSize::new(10, 10), 1_000).unwrap();
        let previous = restarted.previous.unwrap();
        assert_eq!(previous.summary.score, 1);
        assert_eq!(previous.summary.snake_length, 2);
        assert_eq!(previous.summary.end_reason, None);
        assert!(matches!(previous.persisted, Persisted::Saved(_)));
        assert_eq!(g.ledger().total_games().unwrap(), 1);
        assert_eq!(g.state().unwrap().score(), 0);
    }

    #[test]
    fn test_restart_zero_score_skips_ledger() {
        let mut g = game();
        g.start(BoardSize::new(10, 10), 0);
        let restarted = g.restart(BoardSize::new(10, 10), 100).unwrap();
        assert_eq!(restarted.previous.unwrap().persisted, Persisted::Skipped);
        assert_eq!(g.ledger().total_games().unwrap(), 0);
    }

    #[test]
    fn test_old_session_token_cannot_fire_after_restart() {
        let mut g = game();
        let old = g.start(BoardSize::new(10, 10), 0);
        let restarted = g.restart(BoardSize::new(10, 10), 50).unwrap();
        assert_eq!(g.on_tick(old, 350).unwrap(), TickOutcome::Stale);
        assert!(matches!(
            g.on_tick(restarted.first_tick, 400).unwrap(),
            TickOutcome::Advanced { .. }
        ));
    }

    /// Refuses writes until `healthy` is flipped.
    struct FlakyLedger {
        inner: MemoryLedger,
        healthy: AtomicBool,
    }

    impl ScoreLedger for FlakyLedger {
        fn insert(&self, entry: &NewScore) -> LedgerResult<ScoreRecord> {
            if self.healthy.load(Ordering::SeqCst) {
                self.inner.insert(entry)
            } else {
                Err(LedgerError::Unavailable("disk full".to_string()))
            }
        }
        fn top_n(&self, n: usize) -> LedgerResult<Vec<ScoreRecord>> {
            self.inner.top_n(n)
        }
        fn all(&self) -> LedgerResult<Vec<ScoreRecord>> {
            self.inner.all()
        }
        fn highest_score(&self) -> LedgerResult<u32> {
            self.inner.highest_score()
        }
        fn total_games(&self) -> LedgerResult<u64> {
            self.inner.total_games()
        }
        fn average_score(&self) -> LedgerResult<f64> {
            self.inner.average_score()
        }
        fn rank(&self, score: u32) -> LedgerResult<u32> {
            self.inner.rank(score)
        }
        fn clear(&self) -> LedgerResult<usize> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_failed_save_is_queued_and_flushed() {
        let ledger = FlakyLedger {
            inner: MemoryLedger::new(),
            healthy: AtomicBool::new(false),
        };
        let mut g = GameLoop::new(Settings::default(), ledger).with_seed(5);
        g.start(BoardSize::new(10, 10), 0);

        let state = g.state().unwrap();
        let head = state.snake().head();
        g.state = Some(GameState::from_parts(
            state.board(),
            state.snake().clone(),
            head.step(Direction::Right),
            4,
            9,
        ));

        let restarted = g.restart(BoardSize::new(10, 10), 2_000).unwrap();
        let previous = restarted.previous.unwrap();
        assert!(matches!(previous.persisted, Persisted::Failed(_)));
        assert_eq!(g.unsaved().len(), 1);
        assert_eq!(g.unsaved()[0].score, 4);

        assert!(g.flush_unsaved().is_err());
        assert_eq!(g.unsaved().len(), 1);

        g.ledger().healthy.store(true, Ordering::SeqCst);
        assert_eq!(g.flush_unsaved().unwrap(), 1);
        assert!(g.unsaved().is_empty());
        assert_eq!(g.ledger().highest_score().unwrap(), 4);
    }

    /// Returns the next entry on every read, then keeps repeating the last.
    struct ChangingSettings {
        reads: Mutex<usize>,
        entries: Vec<Settings>,
    }

    impl SettingsProvider for ChangingSettings {
        fn settings(&self) -> Settings {
            let mut reads = self.reads.lock().unwrap();
            let i = (*reads).min(self.entries.len() - 1);
            *reads += 1;
            self.entries[i].clone()
        }
    }

    #[test]
    fn test_restart_reads_fresh_settings() {
        let named = |name: &str| Settings {
            player_name: name.to_string(),
            ..Settings::default()
        };
        let changed = Settings {
            board: BoardSize::new(12, 12),
            tier: SpeedTier::EXPERT,
            sensitivity: 2.0,
            player_name: "Bob".to_string(),
        };
        // Reads: construction, first start, restart.
        let provider = ChangingSettings {
            reads: Mutex::new(0),
            entries: vec![named("Init"), named("Ana"), changed],
        };
        let mut g = GameLoop::new(provider, MemoryLedger::new()).with_seed(3);
        assert_eq!(g.settings().player_name, "Init");

        g.start_configured(0);
        assert_eq!(g.settings().player_name, "Ana");
        assert_eq!(g.state().unwrap().board(), Settings::default().board);

        let restarted = g.apply(GameAction::Restart, 1_000).unwrap().unwrap();
        let previous = restarted.previous.unwrap();
        assert_eq!(previous.summary.player_name, "Ana");
        assert_eq!(previous.summary.tier_label, "Normal");

        assert_eq!(g.settings().player_name, "Bob");
        assert_eq!(g.state().unwrap().board(), BoardSize::new(12, 12));
        assert_eq!(restarted.first_tick.due_at_ms, 1_000 + 250);
        assert_eq!(g.settings().min_input_interval_ms(), 75);
    }

    #[test]
    fn test_explicit_board_overrides_provider() {
        let mut g = game();
        g.start(BoardSize::new(7, 9), 0);
        assert_eq!(g.state().unwrap().board(), BoardSize::new(7, 9));
        g.restart(BoardSize::new(11, 5), 10).unwrap();
        assert_eq!(g.state().unwrap().board(), BoardSize::new(11, 5));
    }

    #[test]
    fn test_poll_only_fires_when_due() {
        let mut g = game();
        g.start(BoardSize::new(20, 20), 0);
        assert_eq!(g.poll(349).unwrap(), None);
        assert!(matches!(
            g.poll(350).unwrap(),
            Some(TickOutcome::Advanced { .. })
        ));
    }

    #[test]
    fn test_apply_actions() {
        let mut g = game();
        g.start(BoardSize::new(20, 20), 0);

        g.apply(GameAction::Turn(Direction::Down), 0).unwrap();
        assert_eq!(g.state().unwrap().snake().direction(), Direction::Down);

        g.apply(GameAction::Pause, 10).unwrap();
        assert!(g.state().unwrap().paused());
        g.apply(GameAction::Pause, 20).unwrap();
        assert!(!g.state().unwrap().paused());

        let restarted = g.apply(GameAction::Restart, 30).unwrap().unwrap();
        assert_eq!(g.state().unwrap().board(), Settings::default().board);
        assert_eq!(restarted.first_tick.due_at_ms, 30 + 350);
    }
}

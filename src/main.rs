//! Terminal snake runner (default binary).
//!
//! `tui-snake` (or `tui-snake play`) opens the game in the alternate screen.
//! The other subcommands read or clear the score ledger without starting a
//! game.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use tui_snake::engine::{
    EnvSettings, GameLoop, Persisted, Settings, SettingsProvider, TickOutcome, DEFAULT_DB_PATH,
    ENV_DB_PATH, ENV_LOG_PATH,
};
use tui_snake::input::{handle_key_event, should_quit};
use tui_snake::ledger::{MemoryLedger, ScoreLedger, SqliteLedger};
use tui_snake::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use tui_snake::types::{BoardSize, SpeedTier};

/// Upper bound on how long input polling blocks when no tick is pending.
const IDLE_POLL_MS: u64 = 250;

#[derive(Parser)]
#[command(name = "tui-snake")]
#[command(about = "Terminal snake with a persistent leaderboard", long_about = None)]
struct Cli {
    /// Score database path (defaults to $SNAKE_DB_PATH or ./snake_scores.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (default)
    Play {
        /// Board size: small, medium, large or WxH
        #[arg(long)]
        board: Option<String>,
        /// Speed tier: beginner, normal or expert
        #[arg(long)]
        speed: Option<String>,
        /// Player name stored with scores
        #[arg(long)]
        player: Option<String>,
        /// Control sensitivity (higher accepts faster turns)
        #[arg(long)]
        sensitivity: Option<f32>,
        /// Fixed RNG seed for reproducible food placement
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Show the best scores
    Leaderboard {
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show aggregate statistics
    Stats,

    /// Rank a score would get on the leaderboard
    Rank { score: u32 },

    /// Delete every recorded score
    Clear {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let db_path = cli
        .db
        .or_else(|| std::env::var(ENV_DB_PATH).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

    match cli.command.unwrap_or(Commands::Play {
        board: None,
        speed: None,
        player: None,
        sensitivity: None,
        seed: None,
    }) {
        Commands::Play {
            board,
            speed,
            player,
            sensitivity,
            seed,
        } => {
            let overrides = CliSettings {
                board: board
                    .map(|b| {
                        BoardSize::from_str(&b)
                            .with_context(|| format!("unknown board size '{}'", b))
                    })
                    .transpose()?,
                tier: speed
                    .map(|s| {
                        SpeedTier::from_str(&s)
                            .with_context(|| format!("unknown speed tier '{}'", s))
                    })
                    .transpose()?,
                player: player
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                sensitivity,
            };
            play(overrides, open_ledger_or_memory(&db_path), seed)
        }
        Commands::Leaderboard { limit, json } => {
            let ledger = SqliteLedger::open(&db_path)?;
            let records = ledger.top_n(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            if records.is_empty() {
                println!("No scores yet.");
                return Ok(());
            }
            println!(
                "{:>4}  {:<10}  {:>5}  {:>6}  {:<8}  {:>7}  {}",
                "#", "PLAYER", "SCORE", "LENGTH", "TIER", "TIME", "DATE"
            );
            for (i, r) in records.iter().enumerate() {
                println!(
                    "{:>4}  {:<10}  {:>5}  {:>6}  {:<8}  {:>7}  {}",
                    i + 1,
                    r.player_name,
                    r.score,
                    r.snake_length,
                    r.speed_tier,
                    r.formatted_duration(),
                    r.formatted_timestamp()
                );
            }
            Ok(())
        }
        Commands::Stats => {
            let stats = SqliteLedger::open(&db_path)?.stats()?;
            println!("Games played: {}", stats.total_games);
            println!("Best score:   {}", stats.highest_score);
            println!("Average:      {:.1}", stats.average_score);
            Ok(())
        }
        Commands::Rank { score } => {
            let rank = SqliteLedger::open(&db_path)?.rank(score)?;
            println!("A score of {} would rank #{}", score, rank);
            Ok(())
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to clear scores without --yes");
            }
            let removed = SqliteLedger::open(&db_path)?.clear()?;
            println!("Removed {} score(s).", removed);
            Ok(())
        }
    }
}

/// Command-line flags layered over the `SNAKE_*` environment. The
/// environment is re-read at every session start; flags always win.
struct CliSettings {
    board: Option<BoardSize>,
    tier: Option<SpeedTier>,
    player: Option<String>,
    sensitivity: Option<f32>,
}

impl SettingsProvider for CliSettings {
    fn settings(&self) -> Settings {
        let mut settings = EnvSettings.settings();
        if let Some(board) = self.board {
            settings.board = board;
        }
        if let Some(tier) = self.tier {
            settings.tier = tier;
        }
        if let Some(player) = &self.player {
            settings.player_name = player.clone();
        }
        if let Some(sensitivity) = self.sensitivity {
            settings.sensitivity = sensitivity;
        }
        settings
    }
}

/// Logs go to `$SNAKE_LOG_PATH` only; stdout belongs to the game screen.
fn init_tracing() -> Result<()> {
    let Some(path) = std::env::var_os(ENV_LOG_PATH) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Scores still work for the session when the database cannot be opened;
/// they just do not outlive it.
fn open_ledger_or_memory(path: &Path) -> Arc<dyn ScoreLedger> {
    match SqliteLedger::open(path) {
        Ok(ledger) => Arc::new(ledger),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "score database unavailable, using memory");
            Arc::new(MemoryLedger::new())
        }
    }
}

fn play(provider: CliSettings, ledger: Arc<dyn ScoreLedger>, seed: Option<u32>) -> Result<()> {
    let mut game = GameLoop::new(provider, ledger);
    if let Some(seed) = seed {
        game = game.with_seed(seed);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();

    if !game.unsaved().is_empty() {
        match game.flush_unsaved() {
            Ok(n) => tracing::info!(saved = n as u64, "flushed unsaved scores"),
            Err(e) => eprintln!(
                "warning: {} score(s) could not be saved: {}",
                game.unsaved().len(),
                e
            ),
        }
    }
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameLoop<Arc<dyn ScoreLedger>>) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let mut best = game.ledger().highest_score().unwrap_or(0);
    game.start_configured(now_ms());

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        if let Some(state) = game.state() {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let settings = game.settings();
            let hud = Hud {
                player: &settings.player_name,
                tier: settings.tier,
                best,
            };
            view.render_into(state, &hud, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
        }

        // Input with timeout until the next tick.
        let timeout = game
            .pending_tick()
            .map(|t| t.due_at_ms.saturating_sub(now_ms()))
            .unwrap_or(IDLE_POLL_MS);

        if event::poll(Duration::from_millis(timeout))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(restarted) = game.apply(action, now_ms())? {
                            if let Some(previous) = restarted.previous {
                                best = best.max(previous.summary.score);
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(TickOutcome::Ended(ended)) = game.poll(now_ms())? {
            best = best.max(ended.summary.score);
            if let Persisted::Failed(e) = &ended.persisted {
                tracing::warn!(error = %e, "score kept in memory");
            }
        }
    }
}

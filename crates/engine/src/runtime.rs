//! Async session runtime.
//!
//! Runs a [`GameLoop`] inside a tokio task. Commands go in over a bounded
//! channel, snapshots come out over a `watch` channel (readers always see the
//! latest complete state), and lifecycle events are queued on an unbounded
//! channel so none are dropped.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::core::GameState;
use crate::error::LoopError;
use crate::ledger::ScoreLedger;
use crate::scheduler::{GameLoop, SessionEnded, TickOutcome};
use crate::timer::TickToken;
use crate::types::{BoardSize, Direction};

/// Bound on queued commands before `send` waits.
pub const COMMAND_QUEUE_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start(BoardSize),
    Turn(Direction),
    TogglePause,
    Pause,
    Resume,
    Restart(BoardSize),
    /// Cancel the pending tick; the task keeps serving commands.
    Stop,
    /// End the task and hand the game loop back.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { session: u64 },
    Ended(SessionEnded),
}

pub struct SessionHandle<L> {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<Option<GameState>>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    task: JoinHandle<GameLoop<L>>,
}

impl<L: ScoreLedger + 'static> SessionHandle<L> {
    pub async fn send(&self, command: SessionCommand) -> Result<(), LoopError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| LoopError::SessionClosed)
    }

    /// Latest published state, `None` before the first `Start`.
    pub fn snapshot(&self) -> Option<GameState> {
        self.snapshots.borrow().clone()
    }

    /// A receiver of its own for render loops that wait on changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<GameState>> {
        self.snapshots.clone()
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Stop the task and take back the game loop (and its ledger).
    pub async fn shutdown(self) -> Result<GameLoop<L>, LoopError> {
        // Already gone is fine: the join below still returns the loop.
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        self.task.await.map_err(|_| LoopError::TaskFailed)
    }
}

/// Spawn `game` onto the current tokio runtime.
pub fn spawn_session<L: ScoreLedger + 'static>(game: GameLoop<L>) -> SessionHandle<L> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>(COMMAND_QUEUE_DEPTH);
    let (snap_tx, snap_rx) = watch::channel(game.state().cloned());
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();

    let task = tokio::spawn(run_session(game, cmd_rx, snap_tx, event_tx));

    SessionHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        events: event_rx,
        task,
    }
}

async fn run_session<L: ScoreLedger>(
    mut game: GameLoop<L>,
    mut commands: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<Option<GameState>>,
    events: mpsc::UnboundedSender<SessionEvent>,
) -> GameLoop<L> {
    let epoch = Instant::now();

    let mut outgoing = Vec::new();

    loop {
        let pending = game.pending_tick();

        tokio::select! {
            biased;

            command = commands.recv() => {
                let Some(command) = command else { break };
                let now = elapsed_ms(epoch);
                match command {
                    SessionCommand::Start(board) => {
                        game.start(board, now);
                        outgoing.push(SessionEvent::Started { session: game.session() });
                    }
                    SessionCommand::Turn(direction) => {
                        game.change_direction(direction, now);
                    }
                    SessionCommand::TogglePause => {
                        game.toggle_pause(now);
                    }
                    SessionCommand::Pause => {
                        game.pause();
                    }
                    SessionCommand::Resume => {
                        game.resume(now);
                    }
                    SessionCommand::Restart(board) => match game.restart(board, now) {
                        Ok(restarted) => {
                            if let Some(previous) = restarted.previous {
                                outgoing.push(SessionEvent::Ended(previous));
                            }
                            outgoing.push(SessionEvent::Started { session: game.session() });
                        }
                        Err(e) => tracing::warn!(error = %e, "restart ignored"),
                    },
                    SessionCommand::Stop => game.stop(),
                    SessionCommand::Shutdown => break,
                }
            }

            _ = wait_for(epoch, pending) => {
                let Some(token) = pending else { continue };
                match game.on_tick(token, elapsed_ms(epoch)) {
                    Ok(TickOutcome::Ended(ended)) => {
                        outgoing.push(SessionEvent::Ended(ended));
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "tick dropped"),
                }
            }
        }

        // Publish the state before announcing what produced it.
        snapshots.send_replace(game.state().cloned());
        for event in outgoing.drain(..) {
            let _ = events.send(event);
        }
    }

    game.stop();
    snapshots.send_replace(game.state().cloned());
    tracing::debug!(session = game.session(), "session task finished");
    game
}

async fn wait_for(epoch: Instant, pending: Option<TickToken>) {
    match pending {
        Some(token) => sleep_until(epoch + Duration::from_millis(token.due_at_ms)).await,
        None => std::future::pending::<()>().await,
    }
}

fn elapsed_ms(epoch: Instant) -> u64 {
    epoch.elapsed().as_millis() as u64
}

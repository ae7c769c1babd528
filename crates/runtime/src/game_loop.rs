//! Async game loop.
//!
//! One task owns the [`GameState`]. Player commands arrive on an `mpsc`
//! channel and the fall timer is driven by a periodic interval; both are
//! consumed by the same `select!`, so a tick and a command never interleave.
//! Snapshots are published on a `watch` channel and engine events are fanned
//! out on a `broadcast` channel.

use std::time::Duration;

use anyhow::{anyhow, Context};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use skills_tetris_core::{GameEvent, GameSnapshot, GameState};
use skills_tetris_types::GameCommand;

use crate::config::RuntimeConfig;

/// Handle to a running game loop.
///
/// Dropping the handle stops the loop.
#[derive(Debug)]
pub struct GameHandle {
    commands: mpsc::Sender<GameCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    events: broadcast::Sender<GameEvent>,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<GameState>,
}

impl GameHandle {
    /// Queue a command, waiting for channel capacity.
    pub async fn send(&self, command: GameCommand) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    /// Queue a command without waiting.
    ///
    /// Returns Ok(false) if the command was dropped because the queue is full.
    pub fn try_send(&self, command: GameCommand) -> anyhow::Result<bool> {
        match self.commands.try_send(command) {
            Ok(()) => Ok(true),
            Err(mpsc::error::TrySendError::Full(command)) => {
                warn!(command = command.as_str(), "command queue full, dropping command");
                Ok(false)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(anyhow!("game loop has stopped")),
        }
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified whenever a new snapshot is published.
    pub fn watch_snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Subscribe to engine events published from now on.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Stop the loop and return the final game state.
    pub async fn shutdown(self) -> anyhow::Result<GameState> {
        let _ = self.shutdown_tx.send(());
        self.task.await.context("game loop task failed")
    }
}

/// Spawn the game loop on the current tokio runtime.
///
/// The game is started if it has not been already.
pub fn spawn_game_loop(mut state: GameState, config: RuntimeConfig) -> GameHandle {
    state.start();

    let (command_tx, command_rx) = mpsc::channel(config.max_pending_commands.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(run_game_loop(
        state,
        config,
        command_rx,
        snapshot_tx,
        event_tx.clone(),
        shutdown_rx,
    ));

    GameHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        events: event_tx,
        shutdown_tx,
        task,
    }
}

async fn run_game_loop(
    mut state: GameState,
    config: RuntimeConfig,
    mut commands: mpsc::Receiver<GameCommand>,
    snapshots: watch::Sender<GameSnapshot>,
    events: broadcast::Sender<GameEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> GameState {
    let period = Duration::from_millis(u64::from(config.tick_ms.max(1)));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut clock = TickClock::new(Instant::now());
    info!(tick_ms = config.tick_ms, "game loop started");

    loop {
        let changed = tokio::select! {
            biased;
            _ = &mut shutdown_rx => break,
            command = commands.recv() => match command {
                Some(command) => {
                    debug!(command = command.as_str(), "command received");
                    state.apply_command(command)
                }
                None => break,
            },
            _ = ticker.tick() => {
                let elapsed_ms = clock.elapsed_ms(Instant::now());
                state.tick(elapsed_ms)
            }
        };

        publish(&mut state, &snapshots, &events, changed);
    }

    info!(score = state.score(), lines = state.lines(), "game loop stopped");
    state
}

fn publish(
    state: &mut GameState,
    snapshots: &watch::Sender<GameSnapshot>,
    events: &broadcast::Sender<GameEvent>,
    changed: bool,
) {
    let drained = state.take_events();
    if !changed && drained.is_empty() {
        return;
    }

    for event in drained {
        // No subscribers is not an error.
        let _ = events.send(event);
    }

    snapshots.send_if_modified(|current| {
        let next = state.snapshot();
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

/// Converts wall-clock ticks into whole milliseconds without losing the remainder.
#[derive(Debug)]
struct TickClock {
    last: Instant,
    carry: Duration,
}

impl TickClock {
    fn new(now: Instant) -> Self {
        Self {
            last: now,
            carry: Duration::ZERO,
        }
    }

    fn elapsed_ms(&mut self, now: Instant) -> u32 {
        self.carry += now.saturating_duration_since(self.last);
        self.last = now;

        let ms = self.carry.as_millis().min(u128::from(u32::MAX)) as u32;
        self.carry -= Duration::from_millis(u64::from(ms));
        ms
    }
}

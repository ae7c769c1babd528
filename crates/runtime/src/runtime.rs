//! Blocking wrapper for synchronous hosts.
//!
//! Owns a tokio runtime with the game loop spawned on it, so a terminal host
//! can stay a plain `loop { poll input; render }`.

use anyhow::Context;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::broadcast;

use skills_tetris_core::{GameEvent, GameSnapshot, GameState};
use skills_tetris_types::GameCommand;

use crate::config::RuntimeConfig;
use crate::game_loop::{spawn_game_loop, GameHandle};

/// Running game loop plus the runtime it lives on.
pub struct GameRuntime {
    runtime: Runtime,
    handle: GameHandle,
}

impl GameRuntime {
    pub fn start(state: GameState, config: RuntimeConfig) -> anyhow::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("skills-tetris-loop")
            .enable_time()
            .build()
            .context("failed to create tokio runtime")?;

        let handle = {
            let _guard = runtime.enter();
            spawn_game_loop(state, config)
        };

        Ok(Self { runtime, handle })
    }

    /// Queue a command without blocking; false if it was dropped.
    pub fn send(&self, command: GameCommand) -> anyhow::Result<bool> {
        self.handle.try_send(command)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.handle.subscribe_events()
    }

    /// Stop the loop and return the final game state.
    pub fn shutdown(self) -> anyhow::Result<GameState> {
        let Self { runtime, handle } = self;
        runtime.block_on(handle.shutdown())
    }
}

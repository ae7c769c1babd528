//! Game state module - manages the complete game session
//!
//! This module ties together the board, pieces, piece queue, scoring and skill
//! discovery. It handles the fall timer, piece movement, rotation, locking,
//! the deferred line clear and the game lifecycle.
//!
//! The engine never fails at runtime: commands that cannot apply are no-ops and
//! fatal board states move the session to the terminal game-over phase.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::board::{Board, RowSet};
use crate::catalog::SkillCatalog;
use crate::config::EngineConfig;
use crate::discovery::{Discovery, RevealNotice, SkillReveal};
use crate::error::ConfigError;
use crate::pieces::{try_rotate, Tetromino};
use crate::rng::{seeded_rng, GameRng, PieceQueue};
use crate::scoring::{level_for_lines, line_clear_points, next_fall_interval};
use crate::snapshot::{ActiveSnapshot, CategoryProgress, GameSnapshot};
use crate::types::{GameCommand, PieceKind, BUFFER_ROWS, NEXT_QUEUE_LEN};

/// Lifecycle phase of the session
///
/// Pause is orthogonal and reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No active piece yet (before `start`)
    #[default]
    Spawning,
    Falling,
    /// Full rows are flashing and no piece is active
    LineClearing,
    GameOver,
}

/// Something that happened inside the engine, drained with [`GameState::take_events`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PieceLocked { kind: PieceKind, x: i8, y: i8 },
    SkillRevealed(SkillReveal),
    LinesCleared { count: u32, points: u32 },
    LevelUp { level: u32, fall_interval_ms: f64 },
    GameOver { score: u32, lines: u32, level: u32 },
}

/// Full rows waiting for the flash to finish
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingClear {
    rows: RowSet,
    remaining_ms: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    catalog: Arc<SkillCatalog>,
    rng: GameRng,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    can_hold: bool,
    queue: PieceQueue,
    discovery: Discovery,
    reveal: Option<RevealNotice>,
    clearing: Option<PendingClear>,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: f64,
    fall_timer_ms: f64,
    paused: bool,
    game_over: bool,
    started: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session seeded from `config.seed`
    pub fn new(
        catalog: impl Into<Arc<SkillCatalog>>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        let rng = seeded_rng(config.seed);
        Self::with_rng(catalog, config, rng)
    }

    /// Create a new session drawing from an explicit random source
    pub fn with_rng(
        catalog: impl Into<Arc<SkillCatalog>>,
        config: EngineConfig,
        rng: GameRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::fresh(catalog.into(), config, rng))
    }

    fn fresh(catalog: Arc<SkillCatalog>, config: EngineConfig, mut rng: GameRng) -> Self {
        let queue = PieceQueue::new(&mut rng);
        let fall_interval_ms = config.initial_fall_ms;

        Self {
            config,
            catalog,
            rng,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            queue,
            discovery: Discovery::new(),
            reveal: None,
            clearing: None,
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms,
            fall_timer_ms: 0.0,
            paused: false,
            game_over: false,
            started: false,
            events: Vec::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval_ms(&self) -> f64 {
        self.fall_interval_ms
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> [PieceKind; NEXT_QUEUE_LEN] {
        self.queue.preview()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Current reveal notification, if it has not expired yet
    pub fn reveal(&self) -> Option<&RevealNotice> {
        self.reveal.as_ref()
    }

    /// Grid rows (buffer included) currently flashing before removal
    pub fn clearing_rows(&self) -> &[usize] {
        self.clearing
            .as_ref()
            .map(|pending| pending.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.clearing.is_some() {
            Phase::LineClearing
        } else if self.active.is_some() {
            Phase::Falling
        } else {
            Phase::Spawning
        }
    }

    pub fn total_skills(&self) -> usize {
        self.catalog.total_skills()
    }

    /// Discovered skills in catalog order
    pub fn discovered_skills(&self) -> Vec<SkillReveal> {
        self.discovery.in_catalog_order(&self.catalog)
    }

    /// Revealed and total skill counts for each category, in catalog order
    pub fn category_progress(&self) -> Vec<CategoryProgress> {
        self.catalog
            .categories()
            .map(|(key, category)| CategoryProgress {
                key: key.to_string(),
                name: category.name.clone(),
                revealed: self.discovery.revealed_in(key),
                total: category.skills.len() as u32,
            })
            .collect()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_visible_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.next_queue = self.queue.preview();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.fall_interval_ms = self.fall_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.phase = self.phase();
        out.discovered = self.discovered_skills();
        out.progress = self.category_progress();
        out.total_skills = self.total_skills();
        out.reveal = self.reveal.as_ref().map(|notice| notice.reveal.clone());
        out.clearing_rows.clear();
        out.clearing_rows.extend(
            self.clearing_rows()
                .iter()
                .filter_map(|&row| row.checked_sub(BUFFER_ROWS as usize)),
        );
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn the queue head at the spawn position
    ///
    /// Re-permits hold. A blocked spawn position ends the game.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let kind = self.queue.advance(&mut self.rng);
        let piece = Tetromino::new(kind);
        self.fall_timer_ms = 0.0;
        self.can_hold = true;

        if self.board.collides(&piece.shape, piece.x, piece.y) {
            debug!(?kind, "spawn position blocked");
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        debug!(?kind, next = ?self.queue.preview(), "piece spawned");
        true
    }

    fn accepts_piece_commands(&self) -> bool {
        !self.paused && !self.game_over && self.active.is_some()
    }

    /// Translate the active piece if the destination is free
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.board.collides(&moved.shape, moved.x, moved.y) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down by one row, locking the piece if it cannot move
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Rotate clockwise, trying each wall kick in order
    pub fn rotate(&mut self) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(&active.shape, active.x, active.y, |shape, x, y| {
            board.collides(shape, x, y)
        });

        match result {
            Some((shape, (dx, dy))) => {
                self.active = Some(Tetromino {
                    shape,
                    x: active.x + dx,
                    y: active.y + dy,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Drop the active piece as far as it goes and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        let Some(mut active) = self.active else {
            return false;
        };

        while !self.board.collides(&active.shape, active.x, active.y + 1) {
            active.y += 1;
        }

        self.active = Some(active);
        self.lock_piece();
        true
    }

    /// Swap the active piece with the hold slot (once per piece)
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || !self.accepts_piece_commands() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold {
            Some(held) => {
                let piece = Tetromino::new(held);
                if self.board.collides(&piece.shape, piece.x, piece.y) {
                    debug!(?held, "held piece blocked at spawn");
                    self.active = None;
                    self.end_game();
                    return true;
                }
                self.hold = Some(active.kind);
                self.active = Some(piece);
                self.fall_timer_ms = 0.0;
            }
            None => {
                self.hold = Some(active.kind);
                self.active = None;
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Bake the active piece into the board and resolve the consequences
    ///
    /// A placement that is out of bounds or overlaps locked cells ends the
    /// game. Otherwise a skill is revealed, the buffer rows are checked for
    /// overflow, and full rows are either cleared at once or flagged for the
    /// clear flash.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        if !self
            .board
            .lock_piece(&active.shape, active.x, active.y, active.kind)
        {
            debug!(kind = ?active.kind, x = active.x, y = active.y, "invalid lock");
            self.end_game();
            return;
        }

        debug!(kind = ?active.kind, x = active.x, y = active.y, "piece locked");
        self.events.push(GameEvent::PieceLocked {
            kind: active.kind,
            x: active.x,
            y: active.y,
        });
        self.reveal_skill(active.kind.category());
        self.can_hold = true;

        if self.board.buffer_occupied() {
            self.end_game();
            return;
        }

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_piece();
        } else if self.config.line_clear_delay_ms == 0 {
            self.clear_lines();
            self.spawn_piece();
        } else {
            debug!(rows = ?rows.as_slice(), "rows flagged for clearing");
            self.clearing = Some(PendingClear {
                rows,
                remaining_ms: self.config.line_clear_delay_ms,
            });
        }
    }

    /// Remove every full row at once and update score, lines and level
    ///
    /// Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared == 0 {
            return 0;
        }

        let points = line_clear_points(cleared, &self.config);
        self.score = self.score.saturating_add(points);
        self.lines += cleared;
        self.events.push(GameEvent::LinesCleared {
            count: cleared,
            points,
        });

        while level_for_lines(self.lines, &self.config) > self.level {
            self.level += 1;
            self.fall_interval_ms = next_fall_interval(self.fall_interval_ms, &self.config);
            info!(
                level = self.level,
                fall_interval_ms = self.fall_interval_ms,
                "level up"
            );
            self.events.push(GameEvent::LevelUp {
                level: self.level,
                fall_interval_ms: self.fall_interval_ms,
            });
        }

        cleared
    }

    /// Reveal one undiscovered skill of `category_key`
    ///
    /// The newest reveal replaces any notification still showing. Unknown or
    /// exhausted categories change nothing.
    pub fn reveal_skill(&mut self, category_key: &str) -> Option<SkillReveal> {
        let reveal = self
            .discovery
            .reveal(&self.catalog, category_key, &mut self.rng)?;

        debug!(skill = %reveal.skill, category = %reveal.category_key, "skill revealed");
        self.reveal = Some(RevealNotice::new(
            reveal.clone(),
            self.config.reveal_duration_ms,
        ));
        self.events.push(GameEvent::SkillRevealed(reveal.clone()));
        Some(reveal)
    }

    /// Flip the paused flag; no-op once the game is over
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        true
    }

    /// Start a brand new session with the same catalog and configuration
    ///
    /// The random stream continues, so the new session deals different pieces.
    pub fn reset(&mut self) {
        let catalog = Arc::clone(&self.catalog);
        let config = self.config.clone();
        let rng = self.rng.clone();

        *self = Self::fresh(catalog, config, rng);
        info!("game reset");
        self.start();
    }

    fn end_game(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.active = None;
        self.clearing = None;
        info!(
            score = self.score,
            lines = self.lines,
            level = self.level,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            lines: self.lines,
            level: self.level,
        });
    }

    fn finish_line_clear(&mut self) {
        self.clearing = None;
        self.clear_lines();
        self.spawn_piece();
    }

    /// Advance timers by `elapsed_ms`
    ///
    /// The reveal notification and the clear flash count down regardless of
    /// pause; the fall timer only runs while a piece is falling and the game is
    /// neither paused nor over. Returns true if anything visible changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started {
            return false;
        }

        let mut changed = false;

        if let Some(notice) = self.reveal.as_mut() {
            if notice.advance(elapsed_ms) {
                self.reveal = None;
                changed = true;
            }
        }

        if let Some(pending) = self.clearing.as_mut() {
            pending.remaining_ms = pending.remaining_ms.saturating_sub(elapsed_ms);
            if pending.remaining_ms == 0 {
                self.finish_line_clear();
                changed = true;
            }
            return changed;
        }

        if self.paused || self.game_over || self.active.is_none() {
            return changed;
        }

        self.fall_timer_ms += f64::from(elapsed_ms);
        while self.fall_timer_ms >= self.fall_interval_ms {
            self.fall_timer_ms -= self.fall_interval_ms;
            changed = true;
            if !self.try_move(0, 1) {
                self.lock_piece();
                break;
            }
        }

        changed
    }

    /// Apply a player command
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::Rotate => self.rotate(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::Hold => self.hold(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Reset => {
                self.reset();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{rotate, template_shape};
    use crate::types::{BOARD_WIDTH, TOTAL_HEIGHT};

    fn new_game(config: EngineConfig) -> GameState {
        let catalog = SkillCatalog::builtin().unwrap();
        let mut state = GameState::new(catalog, config).unwrap();
        state.start();
        state
    }

    fn started() -> GameState {
        new_game(EngineConfig::with_seed(12345))
    }

    fn fill_row(state: &mut GameState, y: i8, except: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != except {
                state.board.set(x, y, Some(PieceKind::O));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let catalog = SkillCatalog::builtin().unwrap();
        let state = GameState::new(catalog, EngineConfig::default()).unwrap();

        assert!(!state.started);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.fall_interval_ms, 800.0);
        assert!(state.active.is_none());
        assert!(state.hold.is_none());
        assert!(state.can_hold);
        assert_eq!(state.phase(), Phase::Spawning);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let catalog = SkillCatalog::builtin().unwrap();
        let config = EngineConfig {
            lines_per_level: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            GameState::new(catalog, config).unwrap_err(),
            ConfigError::ZeroLinesPerLevel
        );
    }

    #[test]
    fn test_start_spawns_queue_head() {
        let catalog = SkillCatalog::builtin().unwrap();
        let mut state = GameState::new(catalog, EngineConfig::with_seed(7)).unwrap();
        let head = state.next_queue()[0];
        let second = state.next_queue()[1];

        state.start();

        let active = state.active.unwrap();
        assert_eq!(active.kind, head);
        assert_eq!((active.x, active.y), (4, 0));
        assert_eq!(state.next_queue()[0], second);
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = started();
        let mut b = started();
        for _ in 0..20 {
            a.apply_command(GameCommand::HardDrop);
            b.apply_command(GameCommand::HardDrop);
            a.tick(600);
            b.tick(600);
        }
        assert_eq!(a.board().cells(), b.board().cells());
        assert_eq!(a.discovered_skills(), b.discovered_skills());
    }

    // Hard-dropping an O onto an empty board lands it on the bottom rows and
    // reveals a backend skill.
    #[test]
    fn test_hard_drop_o_piece_reveals_backend_skill() {
        let mut state = started();
        state.active = Some(Tetromino::new(PieceKind::O));

        assert!(state.hard_drop());

        let bottom = TOTAL_HEIGHT as i8 - 1;
        for (x, y) in [(4, bottom - 1), (5, bottom - 1), (4, bottom), (5, bottom)] {
            assert_eq!(state.board.get(x, y), Some(Some(PieceKind::O)));
        }
        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.discovery.revealed_in("backend"), 1);
        assert_eq!(state.reveal().unwrap().reveal.category_key, "backend");
        assert_eq!(state.board.visible_rows().count(), 20);
        assert!(state.active.is_some());
    }

    // A vertical I completing the bottom row clears it for 100 points.
    #[test]
    fn test_vertical_i_completes_bottom_row() {
        let mut state = started();
        let bottom = TOTAL_HEIGHT as i8 - 1;
        fill_row(&mut state, bottom, Some(9));
        state.active = Some(Tetromino {
            shape: rotate(&template_shape(PieceKind::I)),
            x: 9,
            ..Tetromino::new(PieceKind::I)
        });

        state.hard_drop();

        assert_eq!(state.phase(), Phase::LineClearing);
        assert_eq!(state.clearing_rows(), &[bottom as usize]);
        assert!(state.active.is_none());
        assert_eq!(state.score, 0);
        let snap = state.snapshot();
        assert_eq!(snap.clearing_rows, vec![19]);
        assert!(snap.is_row_clearing(19));

        state.tick(500);

        assert_eq!(state.score, 100);
        assert_eq!(state.lines, 1);
        assert_eq!(state.phase(), Phase::Falling);
        // The three I cells above the cleared row shifted down by one.
        for y in bottom - 2..=bottom {
            assert_eq!(state.board.get(9, y), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.board.filled_count(), 3);
    }

    #[test]
    fn test_zero_clear_delay_clears_immediately() {
        let mut state = new_game(EngineConfig {
            line_clear_delay_ms: 0,
            ..EngineConfig::with_seed(3)
        });
        let bottom = TOTAL_HEIGHT as i8 - 1;
        fill_row(&mut state, bottom, Some(9));
        state.active = Some(Tetromino {
            shape: rotate(&template_shape(PieceKind::I)),
            x: 9,
            ..Tetromino::new(PieceKind::I)
        });

        state.hard_drop();

        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100);
        assert!(state.clearing_rows().is_empty());
        assert!(state.active.is_some());
    }

    // Ten cumulative lines move the game to level 2 with a 640ms fall interval.
    #[test]
    fn test_ten_lines_reach_level_two() {
        let mut state = started();
        let bottom = TOTAL_HEIGHT as i8 - 1;

        for _ in 0..10 {
            fill_row(&mut state, bottom, None);
            assert_eq!(state.clear_lines(), 1);
        }

        assert_eq!(state.lines, 10);
        assert_eq!(state.score, 1000);
        assert_eq!(state.level, 2);
        assert!((state.fall_interval_ms - 640.0).abs() < 1e-9);

        let events = state.take_events();
        assert!(events.contains(&GameEvent::LevelUp {
            level: 2,
            fall_interval_ms: state.fall_interval_ms,
        }));
    }

    #[test]
    fn test_four_line_clear_crosses_level_boundary() {
        let mut state = started();
        state.lines = 18;
        state.level = 2;
        state.fall_interval_ms = 640.0;
        let bottom = TOTAL_HEIGHT as i8 - 1;
        for y in bottom - 3..=bottom {
            fill_row(&mut state, y, None);
        }

        assert_eq!(state.clear_lines(), 4);
        assert_eq!(state.lines, 22);
        assert_eq!(state.level, 3);
        assert!((state.fall_interval_ms - 512.0).abs() < 1e-9);
        assert_eq!(state.score, 400);
    }

    // Holding with an empty slot stores the piece and forbids a second hold.
    #[test]
    fn test_hold_once_per_piece() {
        let mut state = started();
        state.active = Some(Tetromino::new(PieceKind::T));

        assert!(state.hold());
        assert_eq!(state.hold, Some(PieceKind::T));
        assert!(state.active.is_some());
        assert!(!state.can_hold);

        let active_before = state.active;
        assert!(!state.hold());
        assert_eq!(state.hold, Some(PieceKind::T));
        assert_eq!(state.active, active_before);
    }

    #[test]
    fn test_hold_swap_after_lock() {
        let mut state = started();
        state.active = Some(Tetromino::new(PieceKind::T));
        state.hold();
        state.hard_drop();
        assert!(state.can_hold);

        let current = state.active.unwrap().kind;
        assert!(state.hold());
        assert_eq!(state.hold, Some(current));
        let active = state.active.unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (4, 0));
    }

    #[test]
    fn test_hold_swap_into_blocked_spawn_ends_game() {
        let mut state = started();
        state.hold = Some(PieceKind::O);
        state.active = Some(Tetromino {
            y: 10,
            ..Tetromino::new(PieceKind::I)
        });
        state.board.set(4, 0, Some(PieceKind::Z));

        state.hold();

        assert!(state.game_over);
        assert_eq!(state.hold, Some(PieceKind::O));
        assert!(state.active.is_none());
    }

    // A blocked spawn ends the game; only reset brings it back.
    #[test]
    fn test_spawn_collision_is_game_over_until_reset() {
        let mut state = started();
        for x in 3..8 {
            state.board.set(x, 0, Some(PieceKind::L));
        }
        state.active = None;

        assert!(!state.spawn_piece());
        assert!(state.game_over);
        assert_eq!(state.phase(), Phase::GameOver);

        let board_before = state.board.clone();
        assert!(!state.move_left());
        assert_eq!(state.board, board_before);

        state.apply_command(GameCommand::Reset);
        assert!(!state.game_over);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = started();
        state.end_game();
        state.take_events();

        for command in GameCommand::ALL {
            if command == GameCommand::Reset {
                continue;
            }
            assert!(!state.apply_command(command), "{:?}", command);
        }
        assert!(!state.tick(10_000));
        assert!(!state.paused);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_lock_into_buffer_rows_ends_game() {
        let mut state = started();
        state.board.set(4, 2, Some(PieceKind::J));
        state.active = Some(Tetromino::new(PieceKind::O));

        assert!(state.soft_drop());

        assert!(state.game_over);
        // The skill is revealed before the overflow check.
        assert_eq!(state.discovery.revealed_in("backend"), 1);
    }

    #[test]
    fn test_lock_out_of_bounds_ends_game() {
        let mut state = started();
        state.active = Some(Tetromino {
            y: -1,
            ..Tetromino::new(PieceKind::O)
        });

        state.lock_piece();

        assert!(state.game_over);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.discovery.is_empty());
    }

    #[test]
    fn test_moves_stop_at_walls() {
        let mut state = started();
        state.active = Some(Tetromino::new(PieceKind::O));

        let mut moves = 0;
        while state.move_left() {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(state.active.unwrap().x, 0);

        while state.move_right() {}
        assert_eq!(state.active.unwrap().x, 8);
    }

    #[test]
    fn test_soft_drop_locks_at_bottom() {
        let mut state = started();
        state.active = Some(Tetromino {
            y: TOTAL_HEIGHT as i8 - 2,
            ..Tetromino::new(PieceKind::O)
        });

        assert!(state.soft_drop());

        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.active.unwrap().y, 0);
    }

    #[test]
    fn test_rotate_uses_wall_kick() {
        let mut state = started();
        // Vertical I against the right wall: rotating back to horizontal must
        // kick left to fit.
        state.active = Some(Tetromino {
            shape: rotate(&template_shape(PieceKind::I)),
            x: 9,
            y: 5,
            kind: PieceKind::I,
        });

        assert!(!state.rotate());
        assert_eq!(state.active.unwrap().x, 9);

        state.active = Some(Tetromino {
            shape: rotate(&template_shape(PieceKind::T)),
            x: 8,
            y: 5,
            kind: PieceKind::T,
        });
        assert!(state.rotate());
        let active = state.active.unwrap();
        assert_eq!(active.x, 7);
        assert_eq!(active.shape.cols(), 3);
    }

    #[test]
    fn test_rotate_blocked_keeps_shape() {
        let mut state = started();
        let piece = Tetromino {
            y: 10,
            ..Tetromino::new(PieceKind::I)
        };
        state.active = Some(piece);
        for y in 0..TOTAL_HEIGHT as i8 {
            if y != 10 {
                for x in 0..BOARD_WIDTH as i8 {
                    if !(4..8).contains(&x) || y > 10 {
                        state.board.set(x, y, Some(PieceKind::S));
                    }
                }
            }
        }

        assert!(!state.rotate());
        assert_eq!(state.active, Some(piece));
    }

    #[test]
    fn test_pause_gates_commands_and_gravity() {
        let mut state = started();
        let before = state.active;

        assert!(state.toggle_pause());
        assert!(!state.move_left());
        assert!(!state.rotate());
        assert!(!state.hard_drop());
        assert!(!state.hold());
        state.tick(5_000);
        assert_eq!(state.active, before);

        assert!(state.toggle_pause());
        assert!(!state.paused);
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = started();
        state.active = Some(Tetromino::new(PieceKind::O));

        assert!(!state.tick(799));
        assert_eq!(state.active.unwrap().y, 0);
        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, 1);

        state.tick(1600);
        assert_eq!(state.active.unwrap().y, 3);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let catalog = SkillCatalog::builtin().unwrap();
        let mut state = GameState::new(catalog, EngineConfig::default()).unwrap();
        assert!(!state.tick(10_000));
        assert!(state.active.is_none());
    }

    #[test]
    fn test_reveal_expires_even_while_paused() {
        let mut state = started();
        state.reveal_skill("cloud").unwrap();
        state.toggle_pause();

        state.tick(2_999);
        assert!(state.reveal().is_some());
        state.tick(1);
        assert!(state.reveal().is_none());
    }

    #[test]
    fn test_latest_reveal_wins() {
        let mut state = started();
        state.reveal_skill("cloud").unwrap();
        state.tick(2_000);
        let second = state.reveal_skill("mlops").unwrap();

        let notice = state.reveal().unwrap();
        assert_eq!(notice.reveal, second);
        assert_eq!(notice.remaining_ms, 3_000);
    }

    #[test]
    fn test_discovery_is_bounded() {
        let mut state = started();
        for _ in 0..100 {
            state.reveal_skill("aiml");
        }
        let total = state.catalog.category("aiml").unwrap().skills.len();
        assert_eq!(state.discovery.len(), total);
        assert_eq!(state.discovery.revealed_in("aiml") as usize, total);
        assert!(state.discovery.len() <= state.total_skills());
    }

    #[test]
    fn test_unknown_category_reveals_nothing() {
        let mut state = started();
        assert!(state.reveal_skill("frontend").is_none());
        assert!(state.reveal().is_none());
    }

    #[test]
    fn test_clear_flash_runs_while_paused() {
        let mut state = started();
        let bottom = TOTAL_HEIGHT as i8 - 1;
        fill_row(&mut state, bottom, Some(9));
        state.active = Some(Tetromino {
            shape: rotate(&template_shape(PieceKind::I)),
            x: 9,
            ..Tetromino::new(PieceKind::I)
        });
        state.hard_drop();
        state.toggle_pause();

        state.tick(500);

        assert_eq!(state.lines, 1);
        assert!(state.paused);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_commands_ignored_while_clearing() {
        let mut state = started();
        let bottom = TOTAL_HEIGHT as i8 - 1;
        fill_row(&mut state, bottom, Some(9));
        state.active = Some(Tetromino {
            shape: rotate(&template_shape(PieceKind::I)),
            x: 9,
            ..Tetromino::new(PieceKind::I)
        });
        state.hard_drop();

        assert!(!state.move_left());
        assert!(!state.hold());
        assert!(!state.hard_drop());
        assert_eq!(state.phase(), Phase::LineClearing);
    }

    #[test]
    fn test_events_are_drained() {
        let mut state = started();
        state.active = Some(Tetromino::new(PieceKind::S));
        state.hard_drop();

        let events = state.take_events();
        assert!(matches!(
            events[0],
            GameEvent::PieceLocked {
                kind: PieceKind::S,
                ..
            }
        ));
        assert!(matches!(&events[1], GameEvent::SkillRevealed(r) if r.category_key == "cloud"));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_reset_restores_fresh_session() {
        let mut state = started();
        state.hard_drop();
        state.toggle_pause();
        state.score = 500;

        state.reset();

        assert!(state.started);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.discovery.is_empty());
        assert!(state.hold.is_none());
        assert!(state.reveal.is_none());
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_category_progress_in_catalog_order() {
        let mut state = started();
        state.reveal_skill("data");
        state.reveal_skill("data");

        let progress = state.category_progress();
        let keys: Vec<_> = progress.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["aiml", "data", "mlops", "backend", "cloud"]);
        assert_eq!(progress[1].revealed, 2);
        assert_eq!(progress[1].total, 5);
        assert_eq!(state.discovered_skills().len(), 2);
    }
}

//! Game module - the session state machine
//!
//! Ties together the field, the falling piece, the next-piece lookahead, the
//! gravity schedule and the score. Time is always passed in by the caller as
//! elapsed seconds; nothing here reads a clock.
//!
//! Between a lock and the following spawn there is no current piece. The next
//! gravity tick spawns one, and a spawn that collides right away ends the game.

use log::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::field::Field;
use crate::piece::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{is_winning_level, level_for_lines, line_clear_score};
use crate::snapshot::{CurrentSnapshot, GameSnapshot};
use crate::types::{Action, Direction, Edge, FallingMode, GamePhase, GridOffset, PieceKind, Seconds};

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    field: Field,
    current: Option<Piece>,
    next: Option<PieceKind>,
    generator: PieceGenerator,
    falling_mode: FallingMode,
    next_tick_time: Seconds,
    score: u32,
    lines: u32,
    level: u32,
    /// Rows cleared by the most recent lock.
    last_clear: u32,
    phase: GamePhase,
    /// Set on every visible change; cleared by the renderer.
    modified: bool,
}

impl Game {
    /// New session on an empty field, waiting in [`GamePhase::Starting`].
    ///
    /// Panics if `config` fails [`GameConfig::validate`]; use [`Game::try_new`]
    /// for configs that come from outside the program.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        match Self::try_new(config, seed) {
            Ok(game) => game,
            Err(e) => panic!("invalid game configuration: {}", e),
        }
    }

    /// Like [`Game::new`], but reports a rejected config instead of panicking.
    pub fn try_new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::new(config.width, config.height);
        Ok(Self::with_field(config, field, seed))
    }

    /// New session on a prepared field. The field's dimensions win over the config's.
    ///
    /// Panics if `config` fails [`GameConfig::validate_rules`].
    pub fn with_field(mut config: GameConfig, field: Field, seed: u32) -> Self {
        if let Err(e) = config.validate_rules() {
            panic!("invalid game configuration: {}", e);
        }
        config.width = field.width();
        config.height = field.height();
        let generator = PieceGenerator::new(config.randomizer, seed);
        Self {
            config,
            field,
            current: None,
            next: None,
            generator,
            falling_mode: FallingMode::Normal,
            next_tick_time: 0.0,
            score: 0,
            lines: 0,
            level: 1,
            last_clear: 0,
            phase: GamePhase::Starting,
            modified: true,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn last_clear(&self) -> u32 {
        self.last_clear
    }

    pub fn falling_mode(&self) -> FallingMode {
        self.falling_mode
    }

    pub fn next_tick_time(&self) -> Seconds {
        self.next_tick_time
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Acknowledge a redraw.
    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Apply a decoded input action.
    ///
    /// Returns whether the `(phase, action)` pair means anything; pairs that
    /// don't are ignored. [`GamePhase::Exiting`] ignores everything.
    pub fn apply(&mut self, action: Action, now: Seconds) -> bool {
        use GamePhase::*;

        let handled = match (self.phase, action) {
            (Exiting, _) => false,
            (_, Action::Exit) => {
                self.set_phase(Exiting);
                true
            }
            (Starting, Action::Play) => {
                self.start(now);
                true
            }
            (GameOver | Winning, Action::Play) => {
                self.restart(now);
                true
            }
            (Playing, Action::Pause) => {
                self.set_phase(Paused);
                true
            }
            (Paused, Action::Resume) => {
                self.set_phase(Playing);
                // Time spent paused must not count towards the next tick.
                self.next_tick_time = now + self.speed();
                true
            }
            (Playing, Action::Rotate) => {
                self.rotate_tetrimino();
                true
            }
            (Playing, Action::ShiftLeft) => {
                self.shift_tetrimino(Direction::Left);
                true
            }
            (Playing, Action::ShiftRight) => {
                self.shift_tetrimino(Direction::Right);
                true
            }
            (Playing, Action::FallFast(Edge::Press)) => {
                self.set_falling_mode(FallingMode::Fast, now);
                true
            }
            (Playing, Action::FallFast(Edge::Release)) => {
                if self.falling_mode == FallingMode::Fast {
                    self.set_falling_mode(FallingMode::Normal, now);
                }
                true
            }
            (Playing, Action::Drop) => {
                self.set_falling_mode(FallingMode::Drop, now);
                true
            }
            _ => false,
        };

        if handled {
            self.modified = true;
        } else {
            debug!(
                "ignored action {} in phase {}",
                action.as_str(),
                self.phase.as_str()
            );
        }
        handled
    }

    /// Advance gravity: at most one tick per call, only while playing.
    pub fn update(&mut self, now: Seconds) {
        if self.phase != GamePhase::Playing || now < self.next_tick_time {
            return;
        }
        self.tick();
        if self.phase == GamePhase::Playing {
            self.next_tick_time = now + self.speed();
        }
    }

    /// One gravity step: spawn, descend, or lock.
    ///
    /// Does nothing outside [`GamePhase::Playing`].
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        match self.current {
            None => self.spawn(),
            Some(current) => {
                let moved = current.moved(GridOffset::DOWN);
                if self.field.touching(&moved) {
                    self.lock(current);
                } else {
                    self.current = Some(moved);
                }
            }
        }
        self.modified = true;
    }

    /// Rotate the current piece clockwise if the result fits. No wall kicks.
    pub fn rotate_tetrimino(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let rotated = current.rotated();
        if self.field.touching(&rotated) {
            return false;
        }
        self.current = Some(rotated);
        self.modified = true;
        true
    }

    /// Shift the current piece one column if the result fits.
    pub fn shift_tetrimino(&mut self, direction: Direction) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let moved = current.moved(direction.offset());
        if self.field.touching(&moved) {
            return false;
        }
        self.current = Some(moved);
        self.modified = true;
        true
    }

    /// Switch gravity regime and reschedule the next tick from `now`.
    pub fn set_falling_mode(&mut self, mode: FallingMode, now: Seconds) {
        self.falling_mode = mode;
        self.next_tick_time = now + self.speed();
    }

    /// Seconds between ticks for the current mode and level.
    pub fn speed(&self) -> Seconds {
        self.config.speed(self.falling_mode, self.level)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.field.clone_from(&self.field);
        out.current = self.current.map(CurrentSnapshot::from);
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.phase = self.phase;
        out.falling_mode = self.falling_mode;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot {
            field: Field::new(self.field.width(), self.field.height()),
            ..GameSnapshot::default()
        };
        self.snapshot_into(&mut s);
        s
    }

    fn start(&mut self, now: Seconds) {
        info!(
            "session start: {}x{} field, seed {}",
            self.field.width(),
            self.field.height(),
            self.generator.seed()
        );
        self.set_phase(GamePhase::Playing);
        self.falling_mode = FallingMode::Normal;
        self.next_tick_time = now;
    }

    fn restart(&mut self, now: Seconds) {
        info!(
            "restart after {} (score {}, lines {})",
            self.phase.as_str(),
            self.score,
            self.lines
        );
        self.field.clear();
        self.current = None;
        self.next = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.last_clear = 0;
        self.start(now);
    }

    fn spawn(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.generator.draw(),
        };
        let piece = Piece::new(kind, self.field.spawn_position());

        if self.field.touching(&piece) {
            self.next = Some(kind);
            self.set_phase(GamePhase::GameOver);
            return;
        }

        debug!("spawn {} at {:?}", kind.as_str(), piece.position());
        self.current = Some(piece);
        self.next = Some(self.generator.draw());
        self.falling_mode = FallingMode::Normal;
    }

    fn lock(&mut self, piece: Piece) {
        let placed = self.field.put(&piece);
        debug_assert!(placed, "locked piece overlaps the field");
        if !placed {
            warn!("lock rejected for {:?}", piece);
        }
        self.current = None;
        self.falling_mode = FallingMode::Normal;

        let count = self.field.delete_filled_rows() as u32;
        self.last_clear = count;
        self.score = self.score.saturating_add(line_clear_score(count, &self.config));
        self.lines = self.lines.saturating_add(count);
        self.level = level_for_lines(self.lines, &self.config);
        debug!(
            "lock {} at {:?}: {} row(s), score {}, lines {}, level {}",
            piece.kind().as_str(),
            piece.position(),
            count,
            self.score,
            self.lines,
            self.level
        );

        if is_winning_level(self.level, &self.config) {
            self.next = None;
            self.set_phase(GamePhase::Winning);
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!("phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(field: Field) -> Game {
        let mut game = Game::with_field(GameConfig::default(), field, 7);
        assert!(game.apply(Action::Play, 0.0));
        game
    }

    #[test]
    fn play_schedules_an_immediate_spawn() {
        let mut game = Game::new(GameConfig::default(), 1);
        assert_eq!(game.phase(), GamePhase::Starting);
        game.apply(Action::Play, 5.0);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.current().is_none());

        game.update(5.0);
        let current = game.current().expect("spawned");
        assert_eq!(current.position(), GridOffset::new(4, 0));
        assert!(game.next().is_some());
        assert!((game.next_tick_time() - 5.73).abs() < 1e-9);
    }

    #[test]
    fn update_waits_for_the_schedule() {
        let mut game = playing(Field::default());
        game.update(0.0);
        let spawned = game.current().unwrap();

        game.update(0.5);
        assert_eq!(game.current(), Some(spawned));

        game.update(0.8);
        assert_eq!(game.current().unwrap().position(), GridOffset::new(4, 1));
    }

    #[test]
    fn rotation_checks_the_rotated_candidate() {
        // An I piece lying in row 1 of its mask at the floor cannot stand up.
        let mut game = playing(Field::new(10, 3));
        game.current = Some(Piece::new(PieceKind::I, GridOffset::new(3, 0)));
        assert!(!game.rotate_tetrimino());
        assert_eq!(game.current().unwrap().mask(), &crate::pieces::mask(PieceKind::I));

        // With room it rotates in place.
        let mut game = playing(Field::default());
        game.current = Some(Piece::new(PieceKind::I, GridOffset::new(3, 0)));
        assert!(game.rotate_tetrimino());
        assert_eq!(game.current().unwrap().position(), GridOffset::new(3, 0));
    }

    #[test]
    fn shift_stops_at_walls() {
        let mut game = playing(Field::default());
        game.current = Some(Piece::new(PieceKind::O, GridOffset::new(0, 5)));
        assert!(!game.shift_tetrimino(Direction::Left));
        assert!(game.shift_tetrimino(Direction::Right));
        assert_eq!(game.current().unwrap().position(), GridOffset::new(1, 5));

        game.current = Some(Piece::new(PieceKind::O, GridOffset::new(8, 5)));
        assert!(!game.shift_tetrimino(Direction::Right));
    }

    #[test]
    fn falling_mode_change_reschedules() {
        let mut game = playing(Field::default());
        game.update(0.0);
        game.apply(Action::FallFast(Edge::Press), 1.0);
        assert_eq!(game.falling_mode(), FallingMode::Fast);
        assert!((game.next_tick_time() - 1.05).abs() < 1e-9);

        game.apply(Action::Drop, 1.01);
        game.apply(Action::FallFast(Edge::Release), 1.02);
        assert_eq!(game.falling_mode(), FallingMode::Drop, "release must not cancel a drop");
    }

    #[test]
    fn lock_scores_and_resets_falling_mode() {
        let mut field = Field::new(4, 4);
        for x in 0..4 {
            field.set(GridOffset::new(x, 3), Some(PieceKind::Z));
            field.set(GridOffset::new(x, 2), Some(PieceKind::Z));
        }
        // Leave a 2x2 hole for an O at the right edge of both rows.
        field.set(GridOffset::new(2, 2), None);
        field.set(GridOffset::new(3, 2), None);
        field.set(GridOffset::new(2, 3), None);
        field.set(GridOffset::new(3, 3), None);

        let mut game = playing(field);
        game.current = Some(Piece::new(PieceKind::O, GridOffset::new(2, 2)));
        game.falling_mode = FallingMode::Drop;
        game.tick();

        assert!(game.current().is_none());
        assert_eq!(game.last_clear(), 2);
        assert_eq!(game.score(), 40);
        assert_eq!(game.lines(), 2);
        assert_eq!(game.level(), 1);
        assert_eq!(game.falling_mode(), FallingMode::Normal);
        assert!(game.field().is_empty());
    }

    #[test]
    fn reaching_the_win_level_stops_spawning() {
        let config = GameConfig {
            lines_per_level: 1,
            win_level: 2,
            ..GameConfig::default()
        };
        let mut field = Field::new(4, 4);
        for x in 0..3 {
            field.set(GridOffset::new(x, 3), Some(PieceKind::L));
        }
        let mut game = Game::with_field(config, field, 3);
        game.apply(Action::Play, 0.0);
        // A vertical I dropping into the last column.
        game.current = Some(Piece::new(PieceKind::I, GridOffset::new(1, 0)).rotated());
        game.tick();

        assert_eq!(game.lines(), 1);
        assert_eq!(game.level(), 2);
        assert_eq!(game.phase(), GamePhase::Winning);
        assert_eq!(game.next(), None);

        game.tick();
        assert!(game.current().is_none());
    }

    #[test]
    fn pause_and_resume() {
        let mut game = playing(Field::default());
        game.update(0.0);
        assert!(game.apply(Action::Pause, 1.0));
        assert_eq!(game.phase(), GamePhase::Paused);

        let before = game.current();
        game.update(100.0);
        assert_eq!(game.current(), before);
        assert!(!game.apply(Action::Rotate, 100.0));

        assert!(game.apply(Action::Resume, 100.0));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!((game.next_tick_time() - 100.73).abs() < 1e-9);
    }

    #[test]
    fn play_after_game_over_restarts() {
        let mut field = Field::new(10, 4);
        for x in 0..9 {
            field.set(GridOffset::new(x, 0), Some(PieceKind::T));
            field.set(GridOffset::new(x, 1), Some(PieceKind::T));
        }
        let mut game = playing(field);
        game.update(0.0);
        assert_eq!(game.phase(), GamePhase::GameOver);

        assert!(game.apply(Action::Play, 1.0));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.field().is_empty());
        assert_eq!(game.score(), 0);
        game.update(1.0);
        assert!(game.current().is_some());
    }

    #[test]
    fn dirty_flag_round_trip() {
        let mut game = Game::new(GameConfig::default(), 1);
        assert!(game.is_modified());
        game.clear_modified();
        assert!(!game.is_modified());

        assert!(!game.apply(Action::Rotate, 0.0));
        assert!(!game.is_modified(), "ignored actions leave the flag alone");

        game.apply(Action::Play, 0.0);
        assert!(game.is_modified());
    }

    #[test]
    fn snapshot_copies_state() {
        let mut game = playing(Field::default());
        game.update(0.0);
        let snap = game.snapshot();
        let current = game.current().unwrap();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.next, game.next());
        let cur = snap.current.as_ref().unwrap();
        assert_eq!(cur.kind, current.kind());
        assert_eq!(cur.cells, current.occupied_cells());
        assert_eq!(&snap.field, game.field());
    }

    #[test]
    fn locks_accumulate_score_lines_and_level() {
        let config = GameConfig {
            lines_per_level: 5,
            win_level: 0,
            ..GameConfig::default()
        };
        let field = Field::from_rows(&[
            "..........",
            "..........",
            "ZZZZZZ....",
            "JJJJJJJJJ.",
            "JJJJJJJJJ.",
            "JJJJJJJJJ.",
            "JJJJJJJJJ.",
            "LLLLLL....",
        ]);
        let mut game = Game::with_field(config, field, 5);
        game.apply(Action::Play, 0.0);

        // Horizontal I completes the bottom row.
        game.current = Some(Piece::new(PieceKind::I, GridOffset::new(6, 6)));
        game.tick();
        assert_eq!(game.last_clear(), 1);
        assert_eq!((game.score(), game.lines(), game.level()), (10, 1, 1));

        // Vertical I down the last column takes the four J rows.
        game.current = Some(Piece::new(PieceKind::I, GridOffset::new(7, 4)).rotated());
        game.tick();
        assert_eq!(game.last_clear(), 4);
        assert_eq!((game.score(), game.lines(), game.level()), (90, 5, 2));

        // The Z row has settled to the bottom.
        game.current = Some(Piece::new(PieceKind::I, GridOffset::new(6, 6)));
        game.tick();
        assert_eq!(game.last_clear(), 1);
        assert_eq!((game.score(), game.lines(), game.level()), (100, 6, 2));
        assert!(game.field().is_empty());
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn win_level_one_wins_on_the_first_lock() {
        let config = GameConfig {
            win_level: 1,
            ..GameConfig::default()
        };
        let mut game = Game::with_field(config, Field::new(10, 4), 2);
        game.apply(Action::Play, 0.0);
        game.current = Some(Piece::new(PieceKind::O, GridOffset::new(0, 2)));
        game.tick();

        assert_eq!(game.last_clear(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), GamePhase::Winning);
        assert_eq!(game.next(), None);
    }

    #[test]
    #[should_panic(expected = "invalid game configuration")]
    fn zero_lines_per_level_is_rejected() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        Game::new(config, 1);
    }

    #[test]
    #[should_panic(expected = "normal_interval")]
    fn nan_interval_is_rejected_on_a_prepared_field() {
        let config = GameConfig {
            normal_interval: f64::NAN,
            ..GameConfig::default()
        };
        Game::with_field(config, Field::new(4, 4), 1);
    }

    #[test]
    fn try_new_reports_the_rejected_value() {
        let narrow = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(Game::try_new(narrow, 1).err(), Some(ConfigError::Width(3)));

        let game = Game::try_new(GameConfig::default(), 1).expect("defaults are valid");
        assert_eq!(game.phase(), GamePhase::Starting);
    }
}

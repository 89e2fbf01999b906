//! Game session
//!
//! Owns the simulation engine and its collaborators, and implements the
//! tick scheduler contract: every tick returns the delay before the next one,
//! or `None` to stop. Timer callbacks carry the run id they were scheduled
//! for, so a callback left over from a previous run is a no-op.

use crate::audio::{AudioCue, SoundEffect};
use crate::highscores::HighScores;
use crate::persistence::KeyValueStore;
use crate::platform::{SwipeTracker, heading_for_key};
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GridSize, Heading, RunState, SimulationEngine, TickOutcome};

/// A tick the host should schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    /// Run the tick belongs to
    pub run_id: u64,
    /// Delay before firing
    pub delay_ms: u32,
}

/// Game instance holding all state
pub struct Game<R: Renderer, A: AudioCue> {
    engine: SimulationEngine,
    settings: Settings,
    highscores: HighScores,
    store: Box<dyn KeyValueStore>,
    renderer: R,
    audio: A,
    swipe: SwipeTracker,
    /// Final score waiting for a player name
    pending_score: Option<u32>,
}

impl<R: Renderer, A: AudioCue> Game<R, A> {
    /// Build a session from persisted settings and leaderboard.
    ///
    /// `clock_seed` seeds food placement unless the settings pin a seed.
    pub fn load(
        store: Box<dyn KeyValueStore>,
        renderer: R,
        audio: A,
        viewport: (u32, u32),
        clock_seed: u64,
    ) -> Self {
        let settings = Settings::load(store.as_ref());
        Self::new(settings, store, renderer, audio, viewport, clock_seed)
    }

    /// Build a session from explicit settings. Out-of-range values are
    /// clamped before the grid is derived from them.
    pub fn new(
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        renderer: R,
        mut audio: A,
        viewport: (u32, u32),
        clock_seed: u64,
    ) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or(clock_seed);
        let grid = GridSize::from_viewport(viewport.0, viewport.1, settings.tile_size);
        let highscores = HighScores::load(store.as_ref());
        audio.set_volume(settings.effective_volume());
        log::info!(
            "Game initialized with seed {} on {}x{} grid",
            seed,
            grid.width,
            grid.height
        );

        let mut game = Self {
            engine: SimulationEngine::new(grid, seed),
            settings,
            highscores,
            store,
            renderer,
            audio,
            swipe: SwipeTracker::new(),
            pending_score: None,
        };
        game.redraw();
        game
    }

    /// Start (or restart) a run and return the first tick to schedule
    pub fn start(&mut self) -> TimerTicket {
        self.pending_score = None;
        self.engine.start_run();
        self.audio.play(SoundEffect::Start);
        self.redraw();
        self.ticket()
    }

    fn ticket(&self) -> TimerTicket {
        TimerTicket {
            run_id: self.engine.run_id(),
            delay_ms: self.engine.tick_interval_ms(),
        }
    }

    /// Timer callback. Returns the next tick to schedule, or None to stop.
    pub fn on_timer(&mut self, run_id: u64) -> Option<TimerTicket> {
        if run_id != self.engine.run_id() || !self.engine.is_running() {
            log::debug!(
                "Dropping stale tick for run {} (current run {}, {:?})",
                run_id,
                self.engine.run_id(),
                self.engine.phase()
            );
            return None;
        }

        match self.engine.tick() {
            TickOutcome::Continued {
                ate_food,
                level_up,
                ..
            } => {
                if ate_food {
                    self.audio.play(SoundEffect::Eat);
                }
                if level_up.is_some() {
                    self.audio.play(SoundEffect::LevelUp);
                }
                self.redraw();
                Some(self.ticket())
            }
            TickOutcome::Collided(_) => {
                self.audio.play(SoundEffect::GameOver);
                self.finish_run();
                None
            }
            TickOutcome::Halted => None,
        }
    }

    fn finish_run(&mut self) {
        let Some(run) = self.engine.final_snapshot() else {
            return;
        };
        if self.highscores.is_high_score(run.score) {
            log::info!(
                "Score {} qualifies for rank {:?}",
                run.score,
                self.highscores.potential_rank(run.score)
            );
            self.pending_score = Some(run.score);
        }
    }

    /// Record the finished run under `name`. Returns the rank achieved.
    ///
    /// Storage failures are logged; the in-memory board still updates.
    pub fn submit_name(&mut self, name: &str) -> Option<usize> {
        let score = self.pending_score.take()?;
        let rank = self.highscores.add_score(name, score);
        if let Err(e) = self.highscores.save(self.store.as_mut()) {
            log::warn!("Failed to save high scores: {e}");
        }
        rank
    }

    /// Queue a heading. Reverse turns and input outside a run are ignored.
    pub fn request_heading(&mut self, heading: Heading) -> bool {
        self.engine.request_heading(heading)
    }

    /// Keyboard input (DOM key names)
    pub fn on_key(&mut self, key: &str) -> bool {
        heading_for_key(key).is_some_and(|h| self.request_heading(h))
    }

    pub fn on_touch_start(&mut self, x: f32, y: f32) {
        self.swipe.begin(x, y);
    }

    pub fn on_touch_end(&mut self, x: f32, y: f32) -> bool {
        self.swipe
            .end(x, y, self.settings.swipe_threshold)
            .is_some_and(|h| self.request_heading(h))
    }

    /// Viewport changed: recompute the grid and redraw
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let grid = GridSize::from_viewport(width, height, self.settings.tile_size);
        self.engine.set_grid(grid);
        self.redraw();
    }

    /// Draw the current state
    pub fn redraw(&mut self) {
        let frame = Frame::from_engine(&self.engine, self.settings.tile_size);
        self.renderer.render(&frame);
    }

    /// Replace settings, persisting them and applying audio volume
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        self.audio.set_volume(self.settings.effective_volume());
        if let Err(e) = self.settings.save(self.store.as_mut()) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn run_state(&self) -> &RunState {
        self.engine.run_state()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// Score of the finished run, if it earned a leaderboard spot
    pub fn pending_score(&self) -> Option<u32> {
        self.pending_score
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};
    use crate::sim::GamePhase;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: usize,
        last_score: u32,
        last_grid: Option<GridSize>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            self.last_score = frame.score;
            self.last_grid = Some(frame.grid);
        }
    }

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<SoundEffect>,
        volume: Option<f32>,
    }

    impl AudioCue for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = Some(volume);
        }
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    type TestGame = Game<RecordingRenderer, RecordingAudio>;

    fn game_with_store(store: Box<dyn KeyValueStore>) -> TestGame {
        Game::load(
            store,
            RecordingRenderer::default(),
            RecordingAudio::default(),
            (400, 400),
            12345,
        )
    }

    fn game() -> TestGame {
        game_with_store(Box::new(MemoryStore::new()))
    }

    /// Tick straight into the right wall
    fn crash(game: &mut TestGame, ticket: TimerTicket) {
        let mut ticket = Some(ticket);
        while let Some(t) = ticket {
            ticket = game.on_timer(t.run_id);
        }
    }

    #[test]
    fn test_new_clamps_oversized_tiles() {
        let settings = Settings {
            tile_size: u32::MAX,
            ..Settings::default()
        };
        let mut game = Game::new(
            settings,
            Box::new(MemoryStore::new()),
            RecordingRenderer::default(),
            RecordingAudio::default(),
            (400, 400),
            1,
        );
        let tile_size = game.settings().tile_size;
        assert!(tile_size <= crate::settings::MAX_TILE_SIZE);
        let grid = game.engine().grid();
        assert!(grid.width >= 10 && grid.height >= 10);
        let (w, h) = grid.pixel_size(tile_size);
        assert_eq!((w, h), (grid.width as u32 * tile_size, grid.height as u32 * tile_size));

        game.start();
        assert_eq!(game.renderer().frames, 2);
        assert_eq!(game.renderer().last_grid, Some(grid));
    }

    #[test]
    fn test_start_schedules_first_tick() {
        let mut game = game();
        assert_eq!(game.renderer().frames, 1);
        assert_eq!(game.audio().volume, Some(0.8));

        let ticket = game.start();
        assert_eq!(
            ticket,
            TimerTicket {
                run_id: 1,
                delay_ms: 100
            }
        );
        assert_eq!(game.audio().played, vec![SoundEffect::Start]);
        assert_eq!(game.renderer().frames, 2);
        assert_eq!(game.renderer().last_grid, Some(GridSize::new(20, 20)));
    }

    #[test]
    fn test_timer_ticks_and_renders() {
        let mut game = game();
        let ticket = game.start();
        game.engine_mut().set_food(glam::IVec2::new(0, 0));
        let next = game.on_timer(ticket.run_id).expect("run continues");
        assert_eq!(next, ticket);
        assert_eq!(game.engine().ticks(), 1);
        assert_eq!(game.renderer().frames, 3);
    }

    #[test]
    fn test_eat_and_level_up_cues() {
        let mut game = game();
        let mut ticket = game.start();
        for _ in 0..5 {
            let ahead = game.engine().snake().head() + Heading::Right.delta();
            game.engine_mut().set_food(ahead);
            ticket = game.on_timer(ticket.run_id).expect("run continues");
        }
        let eats = game
            .audio()
            .played
            .iter()
            .filter(|e| **e == SoundEffect::Eat)
            .count();
        assert_eq!(eats, 5);
        assert!(game.audio().played.contains(&SoundEffect::LevelUp));
        assert_eq!(ticket.delay_ms, 90);
        assert_eq!(game.renderer().last_score, 50);
    }

    #[test]
    fn test_game_over_stops_and_records() {
        let mut game = game();
        let ticket = game.start();
        let ahead = game.engine().snake().head() + Heading::Right.delta();
        game.engine_mut().set_food(ahead);
        crash(&mut game, ticket);

        assert_eq!(game.engine().phase(), GamePhase::GameOver);
        assert_eq!(game.audio().played.last(), Some(&SoundEffect::GameOver));
        assert!(game.run_state().score >= 10);
        assert_eq!(game.pending_score(), Some(game.run_state().score));

        assert_eq!(game.submit_name("  Ada "), Some(1));
        assert_eq!(game.pending_score(), None);
        assert_eq!(game.submit_name("again"), None);

        let reloaded = HighScores::load(game.store());
        assert_eq!(reloaded.entries()[0].name, "Ada");
        assert_eq!(reloaded, *game.highscores());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut game = game();
        let old = game.start();
        let current = game.start();
        assert_ne!(old.run_id, current.run_id);

        assert_eq!(game.on_timer(old.run_id), None);
        assert_eq!(game.engine().ticks(), 0);
        assert!(game.on_timer(current.run_id).is_some());
    }

    #[test]
    fn test_no_ticks_after_game_over() {
        let mut game = game();
        let ticket = game.start();
        crash(&mut game, ticket);
        let frozen = *game.run_state();
        let frames = game.renderer().frames;

        assert_eq!(game.on_timer(ticket.run_id), None);
        assert_eq!(*game.run_state(), frozen);
        assert_eq!(game.renderer().frames, frames);
    }

    #[test]
    fn test_input_translation() {
        let mut game = game();
        assert!(!game.on_key("ArrowUp"), "ignored before a run");

        game.start();
        assert!(!game.on_key("ArrowLeft"), "reverse of heading");
        assert!(!game.on_key("x"));
        assert!(game.on_key("ArrowUp"));

        game.on_touch_start(100.0, 100.0);
        assert!(game.on_touch_end(100.0, 180.0));
        assert_eq!(game.engine().snake().pending_heading(), Heading::Down);

        game.on_touch_start(100.0, 100.0);
        assert!(!game.on_touch_end(110.0, 105.0), "too short");
    }

    #[test]
    fn test_resize_clamps_grid() {
        let mut game = game();
        game.on_resize(50, 5000);
        assert_eq!(game.engine().grid(), GridSize::new(10, 250));
        assert_eq!(game.renderer().last_grid, Some(GridSize::new(10, 250)));
    }

    #[test]
    fn test_storage_failures_do_not_abort() {
        let mut game = game_with_store(Box::new(ReadOnlyStore));
        assert!(game.highscores().is_empty());
        assert_eq!(game.settings(), &Settings::default());

        let ticket = game.start();
        crash(&mut game, ticket);
        assert_eq!(game.submit_name("Bo"), Some(1));
        assert_eq!(game.highscores().len(), 1);

        game.update_settings(Settings {
            muted: true,
            ..Settings::default()
        });
        assert_eq!(game.audio().volume, Some(0.0));
    }

    #[test]
    fn test_pinned_seed_reproduces_food() {
        let mut store = MemoryStore::new();
        Settings {
            seed: Some(7),
            ..Settings::default()
        }
        .save(&mut store)
        .unwrap();

        let mut a = game_with_store(Box::new(store.clone()));
        let mut b: TestGame = Game::load(
            Box::new(store),
            RecordingRenderer::default(),
            RecordingAudio::default(),
            (400, 400),
            999,
        );
        a.start();
        b.start();
        assert_eq!(a.engine().food(), b.engine().food());
    }
}

//! Top-level game state machine
//!
//! The orchestrator sequences the three subsystems, scoring, lives and level
//! progression. Transitions are data: `transition` maps the current state and
//! a snapshot of guards to the next state plus an ordered list of entry
//! actions, and `Orchestrator::enter` executes them. Every state other than
//! `Init` unwinds the same way on a disable signal: disable all subsystems,
//! erase whatever overlay is on screen, reset the session.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSubsystem;
use super::collision::{check_craft_hit, check_projectile_hits};
use super::craft::CraftSubsystem;
use super::projectile::ProjectileSubsystem;
use super::session::GameSession;
use crate::error::ConfigError;
use crate::platform::{Controls, Display, InputSource};
use crate::settings::{CollisionSettings, GameSettings, Settings};
use crate::ui::Overlays;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Init,
    Welcome,
    WelcomeConfirm,
    Play,
    NextLevel,
    Death,
    GameOver,
    PlayAgain,
    PlayAgainConfirm,
}

/// Side effect executed on entering a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ShowWelcome,
    HideWelcome,
    ShowHud,
    HideHud,
    ShowGameOver,
    HideGameOver,
    ShowPlayAgain,
    HidePlayAgain,
    /// Erase whichever overlays are on screen
    HideOverlays,
    /// Asteroids and projectiles together
    EnableField,
    DisableField,
    RespawnCraft,
    EnableCraft,
    DisableCraft,
    /// Spawn one large asteroid per level
    SpawnWave,
    AdvanceLevel,
    ResetSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: GameState,
    pub actions: &'static [Action],
}

/// Everything a transition may depend on, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guards {
    pub enabled: bool,
    pub touched: bool,
    /// Ticks spent in the current state
    pub in_state: u32,
    pub level_clear: u32,
    pub field_empty: bool,
    pub lives: u8,
    /// Set only after the play step ran collision detection
    pub craft_hit: bool,
}

use Action::*;

const TEARDOWN: &[Action] = &[DisableField, DisableCraft, HideOverlays, ResetSession];
const START: &[Action] = &[
    HideWelcome,
    ResetSession,
    EnableField,
    RespawnCraft,
    EnableCraft,
    ShowHud,
    SpawnWave,
];
const RESTART: &[Action] = &[
    HideGameOver,
    HidePlayAgain,
    ResetSession,
    EnableField,
    RespawnCraft,
    EnableCraft,
    ShowHud,
    SpawnWave,
];
const LEVEL_CLEARED: &[Action] = &[DisableField, AdvanceLevel];
const NEXT_WAVE: &[Action] = &[EnableField, SpawnWave];
const CRAFT_LOST: &[Action] = &[DisableCraft];
const RESUME: &[Action] = &[RespawnCraft, EnableCraft];
const OUT_OF_LIVES: &[Action] = &[DisableField, DisableCraft, HideHud, ShowGameOver];
const OFFER_REPLAY: &[Action] = &[ShowPlayAgain];
const BACK_TO_TITLE: &[Action] = &[HideGameOver, HidePlayAgain, ShowWelcome];

fn to(next: GameState, actions: &'static [Action]) -> Option<Transition> {
    Some(Transition { next, actions })
}

/// The transition table. `None` means stay in `state`.
pub fn transition(state: GameState, g: &Guards, rules: &GameSettings) -> Option<Transition> {
    use GameState::*;

    if !g.enabled {
        return match state {
            Init => None,
            _ => to(Init, TEARDOWN),
        };
    }

    match state {
        Init => to(Welcome, &[ShowWelcome]),
        Welcome if g.touched => to(WelcomeConfirm, &[]),
        WelcomeConfirm if g.in_state >= rules.confirm_ticks => {
            if g.touched {
                to(Play, START)
            } else {
                to(Welcome, &[])
            }
        }
        Play if g.field_empty && g.level_clear >= rules.level_clear_ticks && g.lives > 0 => {
            to(NextLevel, LEVEL_CLEARED)
        }
        Play if g.craft_hit => to(Death, CRAFT_LOST),
        NextLevel if g.in_state >= rules.next_level_ticks => to(Play, NEXT_WAVE),
        Death if g.in_state >= rules.death_ticks => {
            if g.lives == 0 {
                to(GameOver, OUT_OF_LIVES)
            } else {
                to(Play, RESUME)
            }
        }
        GameOver if g.in_state >= rules.game_over_ticks => to(PlayAgain, OFFER_REPLAY),
        PlayAgain if g.in_state >= rules.play_again_ticks => to(Welcome, BACK_TO_TITLE),
        PlayAgain if g.touched => to(PlayAgainConfirm, &[]),
        PlayAgainConfirm if g.in_state >= rules.confirm_ticks => {
            if g.touched {
                to(Play, RESTART)
            } else {
                to(PlayAgain, &[])
            }
        }
        _ => None,
    }
}

/// The three cooperating subsystems the orchestrator drives
pub struct World<R = Pcg32> {
    pub asteroids: AsteroidSubsystem<R>,
    pub projectiles: ProjectileSubsystem,
    pub craft: CraftSubsystem,
}

impl<R: RngCore + SeedableRng> World<R> {
    pub fn with_rng(settings: &Settings, rng: R) -> Self {
        Self {
            asteroids: AsteroidSubsystem::with_rng(settings, rng),
            projectiles: ProjectileSubsystem::new(settings),
            craft: CraftSubsystem::new(settings),
        }
    }

    pub fn init(&mut self) {
        self.asteroids.init();
        self.projectiles.init();
        self.craft.init();
    }

    /// Advance every subsystem one tick, in a fixed order
    pub fn tick(&mut self, display: &mut dyn Display) {
        self.asteroids.tick(display);
        self.projectiles.tick(display);
        self.craft.tick(display);
    }
}

pub struct Orchestrator {
    state: GameState,
    rules: GameSettings,
    collision: CollisionSettings,
    session: GameSession,
    overlays: Overlays,
}

impl Orchestrator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: GameState::Init,
            rules: settings.game.clone(),
            collision: settings.collision.clone(),
            session: GameSession::new(&settings.game),
            overlays: Overlays::new(settings.playfield.extent()),
        }
    }

    /// Power-on state: `Init`, disabled, fresh session, nothing on screen
    pub fn init(&mut self) {
        self.state = GameState::Init;
        self.session.reset();
        self.session.enabled = false;
        self.overlays.reset();
    }

    pub fn enable(&mut self) {
        self.session.enabled = true;
    }

    /// Unwinds to `Init` on the next tick from whatever state is current
    pub fn disable(&mut self) {
        self.session.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.session.enabled
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_out_of_lives()
    }

    fn guards<R: RngCore + SeedableRng>(&self, world: &World<R>, controls: Controls) -> Guards {
        Guards {
            enabled: self.session.enabled,
            touched: controls.contains(Controls::TOUCH),
            in_state: self.session.counters.in_state,
            level_clear: self.session.counters.level_clear,
            field_empty: world.asteroids.count() == 0,
            lives: self.session.lives,
            craft_hit: false,
        }
    }

    pub fn tick<R: RngCore + SeedableRng>(
        &mut self,
        world: &mut World<R>,
        display: &mut dyn Display,
        controls: Controls,
    ) {
        log::trace!("game state: {:?}", self.state);

        if world.craft.is_enabled() {
            world.craft.set_controls(controls);
        }

        let mut guards = self.guards(world, controls);
        let mut step = transition(self.state, &guards, &self.rules);
        if step.is_none() && self.state == GameState::Play {
            guards.craft_hit = self.play(world, display, controls);
            step = transition(self.state, &guards, &self.rules);
        }
        if let Some(step) = step {
            self.enter(step, world, display);
        }
        self.count(world);
    }

    /// In-state work while playing. Returns whether the craft was hit.
    fn play<R: RngCore + SeedableRng>(
        &mut self,
        world: &mut World<R>,
        display: &mut dyn Display,
        controls: Controls,
    ) -> bool {
        if self.session.counters.hud_refresh >= self.rules.hud_refresh_ticks {
            self.overlays
                .show_hud(display, self.session.score, self.session.lives);
            self.session.counters.hud_refresh = 0;
        }

        if controls.contains(Controls::FIRE) {
            world.craft.fire(&mut world.projectiles);
        }

        check_projectile_hits(
            &mut world.asteroids,
            &mut world.projectiles,
            &mut self.session,
            &self.collision,
        );
        let points = world.craft.principal_points();
        check_craft_hit(&points, &mut world.asteroids, &mut self.session, &self.collision)
    }

    fn enter<R: RngCore + SeedableRng>(
        &mut self,
        step: Transition,
        world: &mut World<R>,
        display: &mut dyn Display,
    ) {
        log::info!("game: {:?} -> {:?}", self.state, step.next);
        for &action in step.actions {
            self.apply(action, world, display);
        }
        self.state = step.next;
        let counters = &mut self.session.counters;
        counters.in_state = 0;
        if step.next == GameState::Play {
            counters.level_clear = 0;
            counters.hud_refresh = 0;
        }
        if step.next == GameState::GameOver {
            log::info!(
                "game over at level {} with score {}",
                self.session.level,
                self.session.score
            );
        }
    }

    fn apply<R: RngCore + SeedableRng>(
        &mut self,
        action: Action,
        world: &mut World<R>,
        display: &mut dyn Display,
    ) {
        match action {
            ShowWelcome => self.overlays.show_welcome(display),
            HideWelcome => self.overlays.hide_welcome(display),
            ShowHud => self
                .overlays
                .show_hud(display, self.session.score, self.session.lives),
            HideHud => self.overlays.hide_hud(display),
            ShowGameOver => self.overlays.show_game_over(display),
            HideGameOver => self.overlays.hide_game_over(display),
            ShowPlayAgain => self.overlays.show_play_again(display),
            HidePlayAgain => self.overlays.hide_play_again(display),
            HideOverlays => self.overlays.hide_all(display),
            EnableField => {
                world.asteroids.enable();
                world.projectiles.enable();
            }
            DisableField => {
                world.asteroids.disable(display);
                world.projectiles.disable(display);
            }
            RespawnCraft => world.craft.respawn(),
            EnableCraft => world.craft.enable(),
            DisableCraft => world.craft.disable(display),
            SpawnWave => {
                let wanted = self.session.wave_size();
                let spawned = world.asteroids.generate(wanted);
                if spawned < wanted {
                    log::warn!("wave short: spawned {spawned} of {wanted} asteroids");
                }
            }
            AdvanceLevel => {
                let level = self.session.advance_level();
                log::info!("level {level}");
            }
            ResetSession => self.session.reset(),
        }
    }

    fn count<R: RngCore + SeedableRng>(&mut self, world: &World<R>) {
        let counters = &mut self.session.counters;
        counters.in_state = counters.in_state.saturating_add(1);
        if self.state == GameState::Play {
            counters.hud_refresh = counters.hud_refresh.saturating_add(1);
            counters.level_clear = if world.asteroids.count() == 0 {
                counters.level_clear.saturating_add(1)
            } else {
                0
            };
        }
    }
}

/// Owns the subsystems and the orchestrator; one `frame` per external tick
pub struct Game<R = Pcg32> {
    world: World<R>,
    orchestrator: Orchestrator,
    tick_period_ms: u32,
}

impl Game<Pcg32> {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        Self::with_rng(settings, Pcg32::seed_from_u64(0))
    }
}

impl<R: RngCore + SeedableRng> Game<R> {
    pub fn with_rng(settings: &Settings, rng: R) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            world: World::with_rng(settings, rng),
            orchestrator: Orchestrator::new(settings),
            tick_period_ms: settings.playfield.tick_period_ms,
        })
    }

    /// Reset everything to power-on without drawing
    pub fn init(&mut self) {
        self.world.init();
        self.orchestrator.init();
    }

    /// One tick: subsystems first, then a single input sample drives the
    /// orchestrator
    pub fn frame(&mut self, display: &mut dyn Display, input: &mut dyn InputSource) {
        self.world.tick(display);
        let controls = input.sample();
        self.orchestrator.tick(&mut self.world, display, controls);
    }

    pub fn enable(&mut self) {
        self.orchestrator.enable();
    }

    pub fn disable(&mut self) {
        self.orchestrator.disable();
    }

    pub fn is_enabled(&self) -> bool {
        self.orchestrator.is_enabled()
    }

    pub fn state(&self) -> GameState {
        self.orchestrator.state()
    }

    pub fn session(&self) -> &GameSession {
        self.orchestrator.session()
    }

    pub fn overlays(&self) -> &Overlays {
        self.orchestrator.overlays()
    }

    pub fn is_game_over(&self) -> bool {
        self.orchestrator.is_game_over()
    }

    pub fn ms_per_tick(&self) -> u32 {
        self.tick_period_ms
    }

    pub fn world(&self) -> &World<R> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<R> {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Color, CommandLog, NullDisplay};
    use crate::sim::asteroid::SizeClass;
    use crate::ui::{GAME_OVER_TEXT, TITLE_TEXT};
    use glam::Vec2;

    fn quick_settings() -> Settings {
        let mut settings = Settings::default();
        settings.game.death_ticks = 3;
        settings.game.next_level_ticks = 2;
        settings.game.game_over_ticks = 2;
        settings.game.play_again_ticks = 4;
        settings.game.level_clear_ticks = 1000;
        settings
    }

    fn step(game: &mut Game, display: &mut dyn Display, controls: Controls) -> GameState {
        let mut input = controls;
        game.frame(display, &mut input);
        game.state()
    }

    /// Enable and confirm through the title screen
    fn start(game: &mut Game, display: &mut dyn Display) {
        game.enable();
        assert_eq!(step(game, display, Controls::NONE), GameState::Welcome);
        assert_eq!(step(game, display, Controls::TOUCH), GameState::WelcomeConfirm);
        assert_eq!(step(game, display, Controls::TOUCH), GameState::Play);
    }

    /// Drop the opening wave so a test controls every asteroid
    fn clear_field(game: &mut Game, display: &mut dyn Display) {
        let asteroids = &mut game.world_mut().asteroids;
        asteroids.disable(display);
        asteroids.enable();
    }

    fn run_while(
        game: &mut Game,
        display: &mut dyn Display,
        state: GameState,
        limit: usize,
    ) -> GameState {
        for _ in 0..limit {
            let next = step(game, display, Controls::NONE);
            if next != state {
                return next;
            }
        }
        panic!("stuck in {state:?}");
    }

    #[test]
    fn test_table_unwinds_every_state_on_disable() {
        use GameState::*;
        let rules = GameSettings::default();
        let guards = Guards::default();
        assert_eq!(transition(Init, &guards, &rules), None);
        for state in [
            Welcome,
            WelcomeConfirm,
            Play,
            NextLevel,
            Death,
            GameOver,
            PlayAgain,
            PlayAgainConfirm,
        ] {
            let t = transition(state, &guards, &rules).unwrap();
            assert_eq!(t.next, Init);
            assert_eq!(t.actions, TEARDOWN);
        }
    }

    #[test]
    fn test_level_clear_needs_lives() {
        let rules = GameSettings::default();
        let guards = Guards {
            enabled: true,
            field_empty: true,
            level_clear: rules.level_clear_ticks,
            lives: 0,
            ..Guards::default()
        };
        assert_eq!(transition(GameState::Play, &guards, &rules), None);
    }

    #[test]
    fn test_welcome_disable_erases_title_once() {
        let mut game = Game::new(&Settings::default()).unwrap();
        let mut display = CommandLog::new();
        game.enable();
        assert_eq!(step(&mut game, &mut display, Controls::NONE), GameState::Welcome);
        assert_eq!(display.text_count(TITLE_TEXT, Color::Foreground), 1);

        game.disable();
        assert_eq!(step(&mut game, &mut display, Controls::NONE), GameState::Init);
        step(&mut game, &mut display, Controls::NONE);
        step(&mut game, &mut display, Controls::NONE);

        assert_eq!(display.text_count(TITLE_TEXT, Color::Background), 1);
        assert_eq!(display.text_count(TITLE_TEXT, Color::Foreground), 1);
        assert!(!game.overlays().welcome_shown());
    }

    #[test]
    fn test_touch_must_be_held_to_confirm() {
        let mut game = Game::new(&Settings::default()).unwrap();
        let mut display = NullDisplay;
        game.enable();
        step(&mut game, &mut display, Controls::NONE);
        assert_eq!(step(&mut game, &mut display, Controls::TOUCH), GameState::WelcomeConfirm);
        assert_eq!(step(&mut game, &mut display, Controls::NONE), GameState::Welcome);
        assert!(game.overlays().welcome_shown());
    }

    #[test]
    fn test_start_spawns_level_one_wave() {
        let mut game = Game::new(&Settings::default()).unwrap();
        let mut display = CommandLog::new();
        start(&mut game, &mut display);

        assert_eq!(game.world().asteroids.count(), 1);
        assert!(game.world().craft.is_enabled());
        assert!(game.overlays().hud_shown());
        assert!(!game.overlays().welcome_shown());
        assert_eq!(display.text_count("AAA", Color::Foreground), 1);
    }

    #[test]
    fn test_three_collisions_end_the_game() {
        let mut game = Game::new(&quick_settings()).unwrap();
        let mut display = CommandLog::new();
        start(&mut game, &mut display);
        clear_field(&mut game, &mut display);

        let mut visited = Vec::new();
        for _ in 0..3 {
            let center = game.world().craft.craft().center;
            game.world_mut()
                .asteroids
                .spawn(center, Vec2::ZERO, SizeClass::Small)
                .unwrap();

            let next = run_while(&mut game, &mut display, GameState::Play, 5);
            visited.push(next);
            let next = run_while(&mut game, &mut display, next, 10);
            visited.push(next);
        }

        use GameState::*;
        assert_eq!(visited, vec![Death, Play, Death, Play, Death, GameOver]);
        assert!(game.is_game_over());
        assert_eq!(display.text_count(GAME_OVER_TEXT, Color::Foreground), 1);
        assert!(!game.world().craft.is_enabled());
        assert!(!game.world().asteroids.is_enabled());
    }

    #[test]
    fn test_death_respawns_craft_at_center() {
        let mut game = Game::new(&quick_settings()).unwrap();
        let mut display = NullDisplay;
        start(&mut game, &mut display);
        clear_field(&mut game, &mut display);

        let mut thrust = Controls::THRUST;
        for _ in 0..5 {
            game.frame(&mut display, &mut thrust);
        }
        let center = game.world().craft.craft().center;
        assert_ne!(center, Vec2::new(160.0, 120.0));
        game.world_mut()
            .asteroids
            .spawn(center, Vec2::ZERO, SizeClass::Medium)
            .unwrap();

        assert_eq!(run_while(&mut game, &mut display, GameState::Play, 5), GameState::Death);
        assert_eq!(run_while(&mut game, &mut display, GameState::Death, 10), GameState::Play);
        assert_eq!(game.world().craft.craft().center, Vec2::new(160.0, 120.0));
        assert_eq!(game.session().lives, 2);
    }

    #[test]
    fn test_cleared_field_advances_level() {
        let mut settings = quick_settings();
        settings.game.level_clear_ticks = 3;
        let mut game = Game::new(&settings).unwrap();
        let mut display = NullDisplay;
        start(&mut game, &mut display);
        clear_field(&mut game, &mut display);

        assert_eq!(
            run_while(&mut game, &mut display, GameState::Play, 10),
            GameState::NextLevel
        );
        assert_eq!(game.session().level, 2);
        assert!(!game.world().asteroids.is_enabled());

        assert_eq!(
            run_while(&mut game, &mut display, GameState::NextLevel, 10),
            GameState::Play
        );
        assert_eq!(game.world().asteroids.count(), 2);
    }

    fn reach_play_again(game: &mut Game, display: &mut dyn Display) {
        start(game, display);
        clear_field(game, display);
        for _ in 0..3 {
            let center = game.world().craft.craft().center;
            game.world_mut()
                .asteroids
                .spawn(center, Vec2::ZERO, SizeClass::Small)
                .unwrap();
            run_while(game, display, GameState::Play, 5);
            run_while(game, display, GameState::Death, 10);
        }
        assert_eq!(
            run_while(game, display, GameState::GameOver, 10),
            GameState::PlayAgain
        );
    }

    #[test]
    fn test_play_again_restarts_fresh_session() {
        let mut game = Game::new(&quick_settings()).unwrap();
        let mut display = CommandLog::new();
        reach_play_again(&mut game, &mut display);

        assert_eq!(
            step(&mut game, &mut display, Controls::TOUCH),
            GameState::PlayAgainConfirm
        );
        assert_eq!(step(&mut game, &mut display, Controls::TOUCH), GameState::Play);

        let session = game.session();
        assert_eq!((session.level, session.lives, session.score), (1, 3, 0));
        assert_eq!(game.world().asteroids.count(), 1);
        assert!(!game.overlays().game_over_shown());
        assert!(!game.overlays().play_again_shown());
        assert_eq!(display.text_count(GAME_OVER_TEXT, Color::Background), 1);
    }

    #[test]
    fn test_play_again_times_out_to_welcome() {
        let mut game = Game::new(&quick_settings()).unwrap();
        let mut display = NullDisplay;
        reach_play_again(&mut game, &mut display);

        assert_eq!(
            run_while(&mut game, &mut display, GameState::PlayAgain, 10),
            GameState::Welcome
        );
        assert!(game.overlays().welcome_shown());
        assert!(!game.overlays().game_over_shown());

        // A new game from the title starts from scratch
        assert_eq!(
            step(&mut game, &mut display, Controls::TOUCH),
            GameState::WelcomeConfirm
        );
        assert_eq!(step(&mut game, &mut display, Controls::TOUCH), GameState::Play);
        let session = game.session();
        assert_eq!((session.level, session.lives, session.score), (1, 3, 0));
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_craft_follows_input_between_levels() {
        let mut settings = quick_settings();
        settings.game.level_clear_ticks = 3;
        settings.game.next_level_ticks = 10;
        let mut game = Game::new(&settings).unwrap();
        let mut display = NullDisplay;
        start(&mut game, &mut display);
        clear_field(&mut game, &mut display);

        let mut state = GameState::Play;
        for _ in 0..10 {
            state = step(&mut game, &mut display, Controls::TURN_LEFT);
            if state != GameState::Play {
                break;
            }
        }
        assert_eq!(state, GameState::NextLevel);

        // The turn sampled on the last play tick is applied once more
        step(&mut game, &mut display, Controls::NONE);
        let heading = game.world().craft.heading();
        step(&mut game, &mut display, Controls::NONE);
        assert_eq!(step(&mut game, &mut display, Controls::NONE), GameState::NextLevel);
        assert_eq!(game.world().craft.heading(), heading);
    }

    #[test]
    fn test_disable_mid_play_unwinds_everything() {
        let mut game = Game::new(&Settings::default()).unwrap();
        let mut display = CommandLog::new();
        start(&mut game, &mut display);
        let mut fire = Controls::FIRE;
        game.frame(&mut display, &mut fire);
        assert!(game.world().projectiles.count() > 0);

        game.disable();
        assert_eq!(step(&mut game, &mut display, Controls::NONE), GameState::Init);
        assert_eq!(game.world().asteroids.count(), 0);
        assert_eq!(game.world().projectiles.count(), 0);
        assert!(!game.world().craft.is_enabled());
        assert!(!game.overlays().hud_shown());
        assert_eq!(game.session().lives, 3);

        // Re-enabling starts over from the title
        game.enable();
        assert_eq!(step(&mut game, &mut display, Controls::NONE), GameState::Welcome);
    }

    #[test]
    fn test_shooting_scores_points() {
        let mut game = Game::new(&quick_settings()).unwrap();
        let mut display = NullDisplay;
        start(&mut game, &mut display);
        clear_field(&mut game, &mut display);

        // Park an asteroid right above the nose
        game.world_mut()
            .asteroids
            .spawn(Vec2::new(160.0, 80.0), Vec2::ZERO, SizeClass::Large)
            .unwrap();
        let mut fire = Controls::FIRE;
        for _ in 0..6 {
            game.frame(&mut display, &mut fire);
        }
        assert!(game.session().score >= 100);
        assert_eq!(game.state(), GameState::Play);
    }

    #[test]
    fn test_init_returns_to_power_on() {
        let mut game = Game::new(&Settings::default()).unwrap();
        let mut display = NullDisplay;
        start(&mut game, &mut display);
        game.frame(&mut display, &mut Controls::THRUST);

        game.init();
        assert_eq!(game.state(), GameState::Init);
        assert!(!game.is_enabled());
        assert_eq!(game.world().asteroids.count(), 0);
        assert!(!game.world().craft.is_enabled());
        assert!(!game.overlays().hud_shown());
        assert_eq!(step(&mut game, &mut display, Controls::TOUCH), GameState::Init);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.game.start_lives = 0;
        assert!(matches!(Game::new(&settings), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_ms_per_tick() {
        let game = Game::new(&Settings::default()).unwrap();
        assert_eq!(game.ms_per_tick(), 100);
    }
}

use crate::consts::*;
use crate::engine::input::InputState;
use crate::engine::{Point, Size, Tick};
use crate::sim::collab::{Effects, Panel, Track};
use crate::sim::entities::{Enemy, Hero, Projectile};
use crate::sim::phase::{Event, Phase};
use crate::sim::physics;
use crate::sim::spawner;
use crate::sim::timers::{Cue, Schedule, ScorePulse};
use rand::Rng;

/// Aggregate root of one game, owned by the tick driver.
///
/// A restart never patches fields back to zero: `restart` consumes the state
/// and builds a fresh one, carrying over only `intro_seen`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub hero: Hero,
    pub projectiles: Vec<Projectile>,
    /// in spawn order
    pub enemies: Vec<Enemy>,
    pub score: u32,
    /// Playing ticks since the game began
    pub elapsed: u64,
    pub level: usize,
    pub phase: Phase,
    arena: Size,
    base_size: f64,
    score_pulse: ScorePulse,
    schedule: Schedule,
    intro_seen: bool,
}

impl GameState {
    pub fn new(arena: Size, intro_seen: bool) -> Self {
        let base_size = arena.width.min(arena.height) * BASE_SIZE_RATIO;
        GameState {
            hero: Hero::new(Point::new(arena.width / 2.0, arena.height / 2.0), base_size),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            elapsed: 0,
            level: 0,
            phase: Phase::Playing,
            arena,
            base_size,
            score_pulse: ScorePulse::default(),
            schedule: Schedule::default(),
            intro_seen,
        }
    }

    pub fn arena(&self) -> Size {
        self.arena
    }

    /// Hero and enemy diameter
    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn intro_seen(&self) -> bool {
        self.intro_seen
    }

    pub fn score_pulse(&self) -> &ScorePulse {
        &self.score_pulse
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Called once the intro (or the title card) is over
    pub fn begin<R: Rng + ?Sized>(&mut self, rng: &mut R, fx: &mut Effects<'_>) {
        log::info!("Game started");
        self.intro_seen = true;
        fx.overlay.hide(Panel::Title);
        fx.overlay.hide(Panel::Subtitle);
        fx.overlay.show(Panel::Score, Some(text::score(self.score).as_str()));
        fx.audio.set_volume(Track::Music, MUSIC_VOLUME);
        fx.audio.play_loop(Track::Music);
        self.spawn_next(rng);
    }

    /// Tears the overlay down and returns a fresh game
    pub fn restart(self, fx: &mut Effects<'_>) -> GameState {
        log::info!("Restarting after a score of {}", self.score);
        fx.overlay.hide(Panel::Score);
        fx.overlay.hide(Panel::GameOver);
        fx.overlay.hide(Panel::KillBanner);
        fx.overlay.hide(Panel::Crawl);
        fx.audio.stop(Track::Music);
        GameState::new(self.arena, self.intro_seen)
    }

    /// Appends the enemy for the current level. No-op once the game is over or
    /// every tier has been used.
    pub fn spawn_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Enemy> {
        if !self.phase.is_playing() {
            return None;
        }
        let enemy = spawner::next_enemy(
            rng,
            self.level,
            self.arena,
            self.base_size,
            self.hero.position,
        )?;
        self.enemies.push(enemy);
        Some(enemy)
    }

    pub fn fire(&mut self, fx: &mut Effects<'_>) {
        if !self.phase.is_playing() {
            return;
        }
        self.projectiles.push(Projectile::new(self.hero.muzzle()));
        fx.audio.play_once(Track::Shoot);
    }

    /// Advances the game by one tick: physics and collisions while playing,
    /// the end-of-game phases otherwise
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        input: &mut InputState,
        rng: &mut R,
        fx: &mut Effects<'_>,
    ) -> Tick {
        self.schedule.advance(fx);
        let shots = input.take_fire_requests();

        if self.phase.is_playing() {
            physics::steer_hero(&mut self.hero, input, self.arena);
            for _ in 0..shots {
                self.fire(fx);
            }
            physics::advance_projectiles(&mut self.projectiles);
            self.update_enemies(rng, fx);
            self.advance_score(fx);
            self.score_pulse.advance(fx);
        } else {
            self.phase = self.phase.transition(Event::Update, fx);
        }

        if self.phase.restart_due() {
            Tick::Restart
        } else {
            Tick::Continue
        }
    }

    /// Enemies are processed in spawn order. Once the game ends mid-tick the
    /// rest are left as they are, and enemies spawned during the tick wait for
    /// the next one.
    fn update_enemies<R: Rng + ?Sized>(&mut self, rng: &mut R, fx: &mut Effects<'_>) {
        let enemies = std::mem::take(&mut self.enemies);
        let mut survivors = Vec::with_capacity(enemies.len() + 1);

        for mut enemy in enemies {
            if !self.phase.is_playing() {
                survivors.push(enemy);
                continue;
            }

            physics::pursue(&mut enemy, self.hero.position);
            for _ in 0..physics::absorb_hits(&mut enemy, &mut self.projectiles) {
                fx.audio.play_once(Track::Hit);
            }

            if enemy.is_dead() {
                self.on_enemy_killed(&enemy, rng, fx);
                continue;
            }
            if enemy.touches(&self.hero) {
                self.phase = self.phase.transition(Event::Defeat, fx);
            }
            survivors.push(enemy);
        }

        survivors.append(&mut self.enemies);
        self.enemies = survivors;
    }

    fn on_enemy_killed<R: Rng + ?Sized>(&mut self, enemy: &Enemy, rng: &mut R, fx: &mut Effects<'_>) {
        if enemy.tier.is_final() {
            self.phase = self.phase.transition(Event::Victory, fx);
            return;
        }

        log::info!("Enemy of tier {} defeated", enemy.tier.level());
        fx.audio.play_once(Track::Kill);
        for repeat in 1..KILL_STING_REPEATS {
            self.schedule
                .after(repeat * KILL_STING_GAP_TICKS, Cue::Play(Track::Kill));
        }
        fx.audio.set_volume(Track::Music, MUSIC_DUCKED_VOLUME);
        self.schedule
            .after(MUSIC_DUCK_TICKS, Cue::Volume(Track::Music, MUSIC_VOLUME));
        fx.overlay.show(Panel::KillBanner, None);
        self.schedule
            .after(KILL_BANNER_TICKS, Cue::Hide(Panel::KillBanner));

        self.level += 1;
        self.spawn_next(rng);
    }

    fn advance_score(&mut self, fx: &mut Effects<'_>) {
        self.elapsed += 1;
        if self.elapsed % TICKS_PER_POINT != 0 {
            return;
        }
        self.score += 1;
        fx.overlay.show(Panel::Score, Some(text::score(self.score).as_str()));
        if self.score % SCORE_MILESTONE == 0 {
            log::info!("Score milestone: {}", self.score);
            self.score_pulse.start();
        }
    }
}

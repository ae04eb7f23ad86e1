//! Game state and core simulation types
//!
//! Everything a round mutates lives here and is owned by [`GameState`].

use serde::{Deserialize, Serialize};

use super::grid::{Buttons, Direction, GridSelector};
use super::random::RandomSource;
use super::timer::RoundTimer;
use crate::consts::{CELL_COUNT, LIVES_PER_COFFIN};
use crate::settings::Settings;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Covers opening, no attacks yet
    Intro,
    /// Timer running, crosses attacking
    Playing,
    /// Terminal; ticks are no-ops
    Ended,
}

/// Why the round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    AllLivesLost,
}

/// One ghost life above a coffin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeSlot {
    /// 1.0 = untouched, below 1.0 = hit and shrinking, 0.0 = gone
    pub scale: f32,
    /// Cosmetic spin (degrees)
    pub spin: f32,
}

impl Default for LifeSlot {
    fn default() -> Self {
        Self {
            scale: 1.0,
            spin: 0.0,
        }
    }
}

impl LifeSlot {
    pub fn is_hit(&self) -> bool {
        self.scale < 1.0
    }

    pub fn is_dying(&self) -> bool {
        self.is_hit() && self.scale > 0.0
    }

    /// Shrink and spin a dying slot
    pub fn decay(&mut self, dt: f32, rate: f32, spin_rate: f32) {
        if !self.is_dying() || dt <= 0.0 {
            return;
        }
        self.spin = (self.spin + spin_rate * dt) % 360.0;
        self.scale = (self.scale - rate.abs() * dt).max(0.0);
    }
}

/// A coffin in one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coffin {
    /// Cover shut over this coffin (the selected cell)
    pub covered: bool,
    /// Lives lost so far (0..=3)
    pub hit_count: u8,
    pub lives: [LifeSlot; LIVES_PER_COFFIN],
    /// Cover angle from its base (open) orientation, degrees
    pub cover_angle: f32,
    /// Box sway from its base orientation, degrees
    pub box_angle: f32,
    /// Signed sway speed, degrees/sec
    pub box_speed: f32,
}

impl Coffin {
    pub fn new(settings: &Settings) -> Self {
        Self {
            covered: false,
            hit_count: 0,
            lives: [LifeSlot::default(); LIVES_PER_COFFIN],
            cover_angle: settings.cover_shut_angle,
            box_angle: 0.0,
            box_speed: settings.box_sway_speed,
        }
    }

    pub fn is_exposed(&self) -> bool {
        !self.covered
    }

    /// Still has at least one life
    pub fn is_saved(&self) -> bool {
        (self.hit_count as usize) < LIVES_PER_COFFIN
    }

    pub fn cover(&mut self, shut_angle: f32) {
        self.covered = true;
        self.cover_angle = shut_angle;
    }

    pub fn uncover(&mut self) {
        self.covered = false;
        self.cover_angle = 0.0;
    }

    /// Lose the next untouched life; false if none are left
    pub fn take_hit(&mut self, shrink: f32) -> bool {
        if !self.is_saved() {
            return false;
        }
        self.lives[self.hit_count as usize].scale = shrink;
        self.hit_count += 1;
        true
    }

    /// Rock the box, bouncing between `-range` and `range`
    pub fn sway(&mut self, amount: f32, range: f32) {
        if amount <= 0.0 {
            return;
        }
        let range = range.abs();
        self.box_angle += self.box_speed * amount;
        if self.box_angle >= range || self.box_angle <= -range {
            self.box_speed = -self.box_speed;
            self.box_angle = self.box_angle.clamp(-range, range);
        }
    }

    /// Snap the box back to base, ready to sway again
    pub fn relax_box(&mut self) {
        self.box_angle = 0.0;
        self.box_speed = self.box_speed.abs();
    }
}

/// A cross hovering over one coffin
///
/// Depth is measured from its resting point; striking depth is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cross {
    pub moving: bool,
    pub depth: f32,
    pub base_depth: f32,
    pub target_depth: f32,
    /// Signed speed; negative moves toward the coffin
    pub speed: f32,
}

impl Cross {
    pub fn new(settings: &Settings) -> Self {
        Self {
            moving: false,
            depth: 0.0,
            base_depth: 0.0,
            target_depth: -settings.cross_travel,
            speed: -settings.cross_speed,
        }
    }

    /// Advance one step; returns true on the step that reaches the coffin
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.moving || dt <= 0.0 {
            return false;
        }
        self.depth += self.speed * dt;

        if self.depth <= self.target_depth {
            self.depth = self.target_depth;
            self.speed = self.speed.abs();
            return true;
        }
        if self.depth >= self.base_depth {
            self.depth = self.base_depth;
            self.speed = -self.speed.abs();
            self.moving = false;
        }
        false
    }

    /// Closing in on the coffin
    pub fn is_descending(&self) -> bool {
        self.moving && self.speed < 0.0
    }

    /// 1.0 at rest, 0.0 at the coffin
    pub fn approach(&self) -> f32 {
        let span = self.base_depth - self.target_depth;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.depth - self.target_depth) / span).clamp(0.0, 1.0)
    }
}

/// Final tally, fixed once the round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub remaining_lives: u32,
    pub saved_coffins: u32,
    pub score: u32,
    pub reason: EndReason,
}

impl RoundResult {
    pub fn tally(
        coffins: &[Coffin],
        remaining_lives: u32,
        settings: &Settings,
        reason: EndReason,
    ) -> Self {
        let saved_coffins = coffins.iter().filter(|c| c.is_saved()).count() as u32;
        Self {
            remaining_lives,
            saved_coffins,
            score: settings.score_per_life * remaining_lives
                + settings.score_per_coffin * saved_coffins,
            reason,
        }
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    /// Seconds of intro left
    pub intro_remaining: f32,
    pub timer: RoundTimer,
    pub selector: GridSelector,
    pub buttons: Buttons,
    /// Seconds until the next attack
    pub spawn_countdown: f32,
    pub coffins: [Coffin; CELL_COUNT],
    pub crosses: [Cross; CELL_COUNT],
    /// Lives left across all coffins
    pub remaining_lives: u32,
    pub result: Option<RoundResult>,
    pub rng: RandomSource,
}

impl GameState {
    /// Create a round with the given settings and RNG
    pub fn new(settings: Settings, rng: RandomSource) -> Self {
        let mut state = Self {
            phase: GamePhase::Intro,
            intro_remaining: 0.0,
            timer: RoundTimer::new(&settings),
            selector: GridSelector::new(settings.start_cell),
            buttons: Buttons::default(),
            spawn_countdown: 0.0,
            coffins: std::array::from_fn(|_| Coffin::new(&settings)),
            crosses: std::array::from_fn(|_| Cross::new(&settings)),
            remaining_lives: 0,
            result: None,
            rng,
            settings,
        };
        state.reset();
        state
    }

    /// Default settings, entropy-seeded RNG
    pub fn with_entropy() -> Self {
        Self::new(Settings::default(), RandomSource::from_entropy())
    }

    /// Start a fresh round, keeping settings and the RNG stream
    pub fn reset(&mut self) {
        let settings = &self.settings;
        self.timer = RoundTimer::new(settings);
        self.selector = GridSelector::new(settings.start_cell);
        self.buttons = Buttons::default();
        self.spawn_countdown = settings.attack_interval;
        self.coffins = std::array::from_fn(|_| Coffin::new(settings));
        self.crosses = std::array::from_fn(|_| Cross::new(settings));
        self.remaining_lives = settings.total_lives();
        self.result = None;
        self.intro_remaining = settings.intro_duration;

        let start = self.selector.current();
        self.coffins[start].cover(settings.cover_shut_angle);

        if self.intro_remaining > 0.0 {
            self.phase = GamePhase::Intro;
        } else {
            self.phase = GamePhase::Playing;
            for coffin in self.coffins.iter_mut().filter(|c| c.is_exposed()) {
                coffin.cover_angle = 0.0;
            }
        }

        log::info!("Round started (seed {}, start cell {})", self.rng.seed(), start);
    }

    /// Directional input; takes effect on the next tick
    pub fn handle_direction(&mut self, dir: Direction) {
        if self.is_ended() {
            return;
        }
        self.buttons.press(dir);
        self.selector.handle_direction(dir);
    }

    /// Key-name input; unknown keys are ignored
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Direction::from_key_name(key) {
            Some(dir) => {
                self.handle_direction(dir);
                true
            }
            None => false,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// The selected (covered) cell
    pub fn selected(&self) -> usize {
        self.selector.current()
    }

    pub fn covered_count(&self) -> usize {
        self.coffins.iter().filter(|c| c.covered).count()
    }

    /// Crosses currently attacking
    pub fn moving_crosses(&self) -> usize {
        self.crosses.iter().filter(|c| c.moving).count()
    }

    pub fn idle_crosses(&self) -> Vec<usize> {
        self.crosses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.moving)
            .map(|(i, _)| i)
            .collect()
    }
}

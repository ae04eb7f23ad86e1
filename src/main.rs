//! Coffin Guard headless driver
//!
//! Plays one round against a scripted random walk, feeding a demo scene the
//! way a host renderer would, and prints the final result as JSON.

use coffin_guard::sim::{Direction, GameState, RandomSource, tick};
use coffin_guard::{HudText, Scene, SceneBinding, Settings};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Host frame rate
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between scripted key presses
const INPUT_EVERY: u32 = 45;

fn main() {
    env_logger::init();
    log::info!("Coffin Guard (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut scene = Scene::demo();
    let binding = SceneBinding::resolve(&scene);
    if !binding.is_complete() {
        log::warn!("{} scene nodes missing", binding.missing.len());
    }

    let rng = RandomSource::from_entropy();
    let mut player = Pcg32::seed_from_u64(rng.seed() ^ 0x5eed);
    let mut state = GameState::new(settings, rng);

    let mut frame: u32 = 0;
    let mut last_headline = String::new();
    while !state.is_ended() {
        if frame % INPUT_EVERY == 0 {
            let dir = Direction::ALL[player.random_range(0..Direction::ALL.len())];
            state.handle_direction(dir);
        }

        tick(&mut state, FRAME_DT);
        binding.apply(&state, &mut scene);

        let hud = HudText::from_state(&state);
        if hud.headline != last_headline {
            log::debug!("{} {}", hud.headline, hud.explain);
            last_headline = hud.headline;
        }
        frame += 1;
    }

    let hud = HudText::from_state(&state);
    log::info!("{}: {} ({})", hud.title, hud.headline, hud.explain);

    match state.result.map(|r| serde_json::to_string_pretty(&r)) {
        Some(Ok(json)) => println!("{}", json),
        Some(Err(e)) => log::error!("Failed to encode result: {}", e),
        None => log::error!("Round ended without a result"),
    }
}

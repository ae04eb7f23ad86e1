//! Per-frame round update
//!
//! Phases run in order: intro, timer, selection, attack spawn, then
//! per-cell cross motion, hits and animation.

use super::state::{EndReason, GamePhase, GameState, RoundResult};
use crate::consts::CELL_COUNT;

/// Advance the round by `elapsed` seconds
pub fn tick(state: &mut GameState, elapsed: f32) {
    if state.is_ended() {
        return;
    }
    let elapsed = elapsed.max(0.0);

    if state.phase == GamePhase::Intro {
        run_intro(state, elapsed);
        state.buttons.clear();
        return;
    }

    if state.timer.advance(elapsed) {
        end_round(state, EndReason::TimeUp);
        return;
    }

    apply_selection(state);
    spawn_attack(state, elapsed);

    for i in 0..CELL_COUNT {
        update_cell(state, i, elapsed);
    }

    if state.remaining_lives == 0 {
        end_round(state, EndReason::AllLivesLost);
        return;
    }

    state.buttons.clear();
}

/// Open every exposed cover; the selected coffin stays shut
///
/// The first attack countdown already runs here, so the opening cross
/// launches as soon as the intro ends.
fn run_intro(state: &mut GameState, elapsed: f32) {
    state.spawn_countdown -= elapsed;

    let step = state.settings.cover_open_rate * elapsed;
    for coffin in state.coffins.iter_mut().filter(|c| c.is_exposed()) {
        coffin.cover_angle = (coffin.cover_angle - step).max(0.0);
    }

    state.intro_remaining -= elapsed;
    if state.intro_remaining <= 0.0 {
        state.intro_remaining = 0.0;
        for coffin in state.coffins.iter_mut().filter(|c| c.is_exposed()) {
            coffin.cover_angle = 0.0;
        }
        state.phase = GamePhase::Playing;
        log::info!("Intro finished, round clock running");
    }
}

fn apply_selection(state: &mut GameState) {
    if let Some((old, new)) = state.selector.take_change() {
        state.coffins[old].uncover();
        state.coffins[new].cover(state.settings.cover_shut_angle);
        log::debug!("Selection {} -> {}", old, new);
    }
}

fn spawn_attack(state: &mut GameState, elapsed: f32) {
    state.spawn_countdown -= elapsed;
    if state.spawn_countdown >= 0.0 {
        return;
    }
    state.spawn_countdown = state.timer.attack_interval;

    let idle = state.idle_crosses();
    match state.rng.pick(&idle) {
        Some(i) => {
            state.crosses[i].moving = true;
            log::debug!(
                "Cross {} attacking (next in {:.2}s)",
                i,
                state.timer.attack_interval
            );
        }
        None => log::warn!("No idle cross to attack with, spawn skipped"),
    }
}

fn update_cell(state: &mut GameState, i: usize, elapsed: f32) {
    let GameState {
        settings,
        coffins,
        crosses,
        remaining_lives,
        ..
    } = state;
    let cross = &mut crosses[i];
    let coffin = &mut coffins[i];

    let struck = cross.advance(elapsed);
    if struck && coffin.is_exposed() && coffin.take_hit(settings.hit_shrink) {
        *remaining_lives = remaining_lives.saturating_sub(1);
        log::debug!(
            "Coffin {} hit ({} of 3), {} lives left",
            i,
            coffin.hit_count,
            remaining_lives
        );
    }

    if cross.is_descending() && coffin.is_exposed() {
        let closeness = 1.0 - cross.approach();
        coffin.sway(closeness * 2.0 * elapsed, settings.box_sway_range);
    } else {
        coffin.relax_box();
    }

    for life in coffin.lives.iter_mut() {
        life.decay(elapsed, settings.life_decay_rate, settings.life_spin_rate);
    }
}

fn end_round(state: &mut GameState, reason: EndReason) {
    state.phase = GamePhase::Ended;
    let selected = state.selector.current();
    state.coffins[selected].uncover();
    for coffin in state.coffins.iter_mut() {
        coffin.relax_box();
    }

    let result = RoundResult::tally(
        &state.coffins,
        state.remaining_lives,
        &state.settings,
        reason,
    );
    log::info!(
        "Round over ({:?}): {} lives, {} coffins saved, score {}",
        reason,
        result.remaining_lives,
        result.saved_coffins,
        result.score
    );
    state.result = Some(result);
    state.buttons.clear();
}
